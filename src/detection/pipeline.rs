/// Detection pipeline
///
/// Coordinates segmentation, blob extraction, event decision, state
/// mutation and overlay composition for one frame.

use std::time::Instant;

use image::RgbaImage;

use super::decider::{EventDecider, FrameEvent};
use super::zones::ZoneClassifier;
use crate::config::Config;
use crate::overlay::{Label, OverlayComposer};
use crate::state::{FreezeFrame, Scoreboard};
use crate::utils::{StageTiming, Timer};
use crate::vision::{ball_mask, extract_blobs, Blob, HsvRange};

/// Cross-frame mutable state, owned by the caller and passed by reference
/// through the pipeline.
pub struct MatchState {
    pub scoreboard: Scoreboard,
    pub freeze: FreezeFrame,
}

impl MatchState {
    pub fn new(config: &Config) -> Self {
        Self {
            scoreboard: Scoreboard::new(),
            freeze: FreezeFrame::new(config.freeze_secs, config.blend_alpha),
        }
    }
}

/// Everything the display layer needs for one processed frame.
pub struct FrameOutput {
    /// Annotated frame, blended with the freeze capture while a replay is
    /// active
    pub frame: RgbaImage,
    /// The event this frame resolved to
    pub event: FrameEvent,
    /// Text annotations for the display layer to rasterize
    pub labels: Vec<Label>,
    /// Qualifying blobs, in extractor order
    pub blobs: Vec<Blob>,
    /// Per-stage wall-clock timings
    pub timing: StageTiming,
}

/// Per-frame detection pipeline.
///
/// Immutable once built; all mutation goes through the `MatchState` handed
/// to `process`.
pub struct FramePipeline {
    ball_color: HsvRange,
    decider: EventDecider,
    composer: OverlayComposer,
}

impl FramePipeline {
    pub fn new(config: &Config) -> Self {
        let classifier = ZoneClassifier::from_config(config);
        Self {
            ball_color: config.ball_color,
            decider: EventDecider::new(classifier, config.min_blob_area),
            composer: OverlayComposer::from_config(config),
        }
    }

    /// Run the full pipeline on one frame. `now` is read once per frame by
    /// the caller and used for both the freeze trigger and the replay
    /// predicate.
    pub fn process(&self, state: &mut MatchState, mut frame: RgbaImage, now: Instant) -> FrameOutput {
        let total = Timer::start();
        let mut timing = StageTiming::new();

        // 1. Segment the ball color into a binary mask
        let t = Timer::start();
        let mask = ball_mask(&frame, &self.ball_color);
        timing.segment_us = t.elapsed_us();

        // 2. Extract candidate blobs
        let t = Timer::start();
        let blobs = extract_blobs(&mask);
        timing.extract_us = t.elapsed_us();

        // 3. Reduce to the frame's event
        let t = Timer::start();
        let qualifying: Vec<Blob> = self
            .decider
            .qualifying(&blobs)
            .into_iter()
            .cloned()
            .collect();
        let (event, _) = self.decider.decide(&qualifying);
        timing.decide_us = t.elapsed_us();

        let t = Timer::start();

        // 4. Geometric annotations (goal rectangles, ball markers)
        self.composer.draw_marks(&mut frame, &qualifying);

        // 5. Side effects, at most once per frame
        if let FrameEvent::Goal(side) = event {
            state.scoreboard.increment(side);
        }
        if event.is_trigger() {
            // The replay holds the annotated frame
            state.freeze.capture(&frame, now);
        }

        // 6. Replay blend while the freeze window is open
        let frame = if state.freeze.is_active(now) {
            state.freeze.blend(&frame)
        } else {
            frame
        };

        // 7. Text annotations for the display layer
        let labels = self
            .composer
            .labels(&qualifying, event, state.scoreboard.scores());
        timing.compose_us = t.elapsed_us();

        timing.total_us = total.elapsed_us();

        FrameOutput {
            frame,
            event,
            labels,
            blobs: qualifying,
            timing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn test_frame(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
    }

    fn draw_ball(frame: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32) {
        for py in y..y + h {
            for px in x..x + w {
                frame.put_pixel(px, py, Rgba([255, 255, 255, 255]));
            }
        }
    }

    fn setup() -> (FramePipeline, MatchState) {
        let config = Config::default();
        (FramePipeline::new(&config), MatchState::new(&config))
    }

    #[test]
    fn test_empty_frame_is_waiting() {
        let (pipeline, mut state) = setup();
        let output = pipeline.process(&mut state, test_frame(640, 480), Instant::now());

        assert_eq!(output.event, FrameEvent::Waiting);
        assert!(output.blobs.is_empty());
        assert_eq!(state.scoreboard.scores(), (0, 0));
        assert!(!state.freeze.is_active(Instant::now()));
    }

    #[test]
    fn test_goal_frame_mutates_state_once() {
        let (pipeline, mut state) = setup();
        let mut frame = test_frame(640, 480);
        // 25x20 ball centered on (300, 150), inside the goal rectangle
        draw_ball(&mut frame, 288, 140, 25, 20);

        let now = Instant::now();
        let output = pipeline.process(&mut state, frame, now);

        assert_eq!(output.event, FrameEvent::Goal(crate::state::Side::Team1));
        assert_eq!(output.blobs.len(), 1);
        assert_eq!(state.scoreboard.scores(), (1, 0));
        assert!(state.freeze.is_active(now));
        // The frame's scoreboard label reflects the increment
        assert!(output
            .labels
            .iter()
            .any(|l| l.text == "Player1: 1 | Player2: 0"));
    }

    #[test]
    fn test_two_goal_blobs_score_once() {
        let (pipeline, mut state) = setup();
        let mut frame = test_frame(640, 480);
        draw_ball(&mut frame, 240, 140, 25, 20);
        draw_ball(&mut frame, 380, 200, 25, 20);

        let output = pipeline.process(&mut state, frame, Instant::now());

        assert_eq!(output.event, FrameEvent::Goal(crate::state::Side::Team1));
        assert_eq!(output.blobs.len(), 2);
        assert_eq!(state.scoreboard.scores(), (1, 0));
    }

    #[test]
    fn test_timings_are_recorded() {
        let (pipeline, mut state) = setup();
        let output = pipeline.process(&mut state, test_frame(640, 480), Instant::now());

        assert!(output.timing.total_us > 0.0);
        assert!(output.timing.total_us >= output.timing.segment_us);
    }
}
