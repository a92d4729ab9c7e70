pub mod constants;
pub mod project;
pub mod recognizer;
pub mod spatial;
pub mod staff;

pub use project::*;
pub use recognizer::*;
pub use spatial::*;
pub use staff::*;
