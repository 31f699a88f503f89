//! User preference domain module.

mod model;
mod repository;

pub use model::{DEFAULT_LANGUAGE, Language};
pub use repository::PreferenceRepository;
