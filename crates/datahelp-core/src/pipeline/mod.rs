//! Report build pipeline.

pub mod executor;
pub mod machine;
pub mod state;

pub use executor::{ProgressObserver, StageExecutor};
pub use machine::BuildPipeline;
pub use state::{BuildError, BuildRequest, BuildState};
