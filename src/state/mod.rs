/// State management module
///
/// The only cross-frame mutable state in the system: the scoreboard and the
/// freeze-frame replay. Both are plain structs owned by the caller and
/// threaded through the pipeline by reference.

pub mod freeze;
pub mod scoreboard;

// Re-export commonly used types
pub use freeze::FreezeFrame;
pub use scoreboard::{Scoreboard, Side};
