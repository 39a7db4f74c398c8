pub mod matcher;
pub mod extract;
pub mod intent;
pub mod ai;
pub mod orchestrator;

pub use matcher::*;
pub use extract::*;
pub use intent::*;
pub use orchestrator::*;
