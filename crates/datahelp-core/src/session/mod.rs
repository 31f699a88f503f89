//! Report session domain module.
//!
//! # Module Structure
//!
//! - `model`: `AppSession` aggregate, `Screen`, `NavigationError`
//! - `error_surface`: single-slot `ErrorState`

mod error_surface;
mod model;

pub use error_surface::ErrorState;
pub use model::{AppSession, NavigationError, Screen};
