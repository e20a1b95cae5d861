/// Detection module
///
/// Decision logic for the per-frame pipeline.
///
/// ## Architecture
///
/// ```text
/// FramePipeline
///   ├── ball_mask (color segmentation)
///   ├── extract_blobs (connected components)
///   ├── EventDecider
///   │     └── ZoneClassifier (Goal > Handball > Neutral)
///   ├── MatchState mutation (Scoreboard, FreezeFrame)
///   └── OverlayComposer (marks + label plan)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use var_vision::{Config, FramePipeline, MatchState};
///
/// let config = Config::load()?;
/// config.validate()?;
///
/// let pipeline = FramePipeline::new(&config);
/// let mut state = MatchState::new(&config);
///
/// let output = pipeline.process(&mut state, frame, std::time::Instant::now());
/// println!("{}", output.event.banner());
/// ```

pub mod decider;
pub mod pipeline;
pub mod zones;

// Re-export commonly used types
pub use decider::{EventDecider, FrameEvent};
pub use pipeline::{FrameOutput, FramePipeline, MatchState};
pub use zones::{Zone, ZoneClassifier};
