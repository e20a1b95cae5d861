/// Event decision
///
/// Reduces a frame's candidate blobs to a single event. Side-effect free:
/// score and freeze mutation happen in the pipeline, against explicit state.
use super::zones::{Zone, ZoneClassifier};
use crate::state::Side;
use crate::vision::Blob;

/// The event a frame resolves to. Exactly one per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    Goal(Side),
    Handball,
    Waiting,
}

impl FrameEvent {
    /// Banner text shown for this event.
    pub fn banner(&self) -> &'static str {
        match self {
            FrameEvent::Goal(_) => "GOAL !!!",
            FrameEvent::Handball => "HAND BALL!",
            FrameEvent::Waiting => "Waiting for ball...",
        }
    }

    /// True for events that start the freeze-frame replay.
    pub fn is_trigger(&self) -> bool {
        !matches!(self, FrameEvent::Waiting)
    }
}

/// Decides the per-frame event from candidate blobs.
///
/// Candidates are filtered by area (strictly greater than the configured
/// minimum), then reduced deterministically: the first blob, in extractor
/// order, whose centroid's zone has the highest priority wins. A single pass
/// that keeps the first strictly-better candidate, so extractor order only
/// breaks ties within the same zone priority.
pub struct EventDecider {
    classifier: ZoneClassifier,
    min_area: f32,
}

impl EventDecider {
    pub fn new(classifier: ZoneClassifier, min_area: f32) -> Self {
        Self {
            classifier,
            min_area,
        }
    }

    /// Blobs large enough to be considered a ball.
    pub fn qualifying<'a>(&self, blobs: &'a [Blob]) -> Vec<&'a Blob> {
        blobs.iter().filter(|b| b.area > self.min_area).collect()
    }

    /// Reduce the frame's blobs to one event. Returns the winning blob for
    /// Goal and Handball; `Waiting` carries no blob.
    pub fn decide<'a>(&self, blobs: &'a [Blob]) -> (FrameEvent, Option<&'a Blob>) {
        let mut best: Option<(Zone, &'a Blob)> = None;

        for blob in blobs.iter().filter(|b| b.area > self.min_area) {
            let zone = self.classifier.classify(blob.centroid);
            let better = match &best {
                Some((current, _)) => zone.priority() > current.priority(),
                None => true,
            };
            if better {
                best = Some((zone, blob));
            }
        }

        match best {
            Some((Zone::Goal(side), blob)) => {
                tracing::debug!(?side, centroid = ?blob.centroid, area = blob.area, "goal detected");
                (FrameEvent::Goal(side), Some(blob))
            }
            Some((Zone::Handball, blob)) => {
                tracing::debug!(centroid = ?blob.centroid, area = blob.area, "handball detected");
                (FrameEvent::Handball, Some(blob))
            }
            _ => (FrameEvent::Waiting, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoalArea;
    use crate::geometry::{Point, Rect};

    fn decider() -> EventDecider {
        let classifier = ZoneClassifier::new(
            vec![GoalArea {
                side: Side::Team1,
                rect: Rect::new(200, 100, 240, 200),
            }],
            [50, 200],
        );
        EventDecider::new(classifier, 200.0)
    }

    fn blob_at(x: i32, y: i32, area: f32) -> Blob {
        Blob {
            centroid: Point::new(x, y),
            area,
            bbox: Rect::new(x.max(0) as u32, y.max(0) as u32, 1, 1),
        }
    }

    #[test]
    fn test_goal_event() {
        let blobs = vec![blob_at(300, 150, 500.0)];
        let (event, blob) = decider().decide(&blobs);
        assert_eq!(event, FrameEvent::Goal(Side::Team1));
        assert_eq!(blob.unwrap().centroid, Point::new(300, 150));
    }

    #[test]
    fn test_handball_event() {
        let blobs = vec![blob_at(100, 125, 500.0)];
        let (event, blob) = decider().decide(&blobs);
        assert_eq!(event, FrameEvent::Handball);
        assert!(blob.is_some());
    }

    #[test]
    fn test_no_blobs_is_waiting() {
        let (event, blob) = decider().decide(&[]);
        assert_eq!(event, FrameEvent::Waiting);
        assert!(blob.is_none());
    }

    #[test]
    fn test_area_threshold_is_strict() {
        // Below and exactly at the threshold are both rejected
        let blobs = vec![blob_at(300, 150, 50.0)];
        assert_eq!(decider().decide(&blobs).0, FrameEvent::Waiting);

        let blobs = vec![blob_at(300, 150, 200.0)];
        assert_eq!(decider().decide(&blobs).0, FrameEvent::Waiting);

        let blobs = vec![blob_at(300, 150, 200.5)];
        assert_eq!(decider().decide(&blobs).0, FrameEvent::Goal(Side::Team1));
    }

    #[test]
    fn test_qualifying_filter() {
        let blobs = vec![
            blob_at(10, 10, 500.0),
            blob_at(20, 20, 200.0),
            blob_at(30, 30, 201.0),
        ];
        let qualifying = decider().qualifying(&blobs);
        assert_eq!(qualifying.len(), 2);
        assert_eq!(qualifying[0].centroid, Point::new(10, 10));
    }

    #[test]
    fn test_reduction_prefers_goal_over_later_neutral() {
        let blobs = vec![blob_at(300, 150, 500.0), blob_at(100, 400, 500.0)];
        let (event, _) = decider().decide(&blobs);
        assert_eq!(event, FrameEvent::Goal(Side::Team1));
    }

    #[test]
    fn test_reduction_prefers_goal_regardless_of_order() {
        let blobs = vec![blob_at(100, 400, 500.0), blob_at(300, 150, 500.0)];
        let (event, _) = decider().decide(&blobs);
        assert_eq!(event, FrameEvent::Goal(Side::Team1));
    }

    #[test]
    fn test_equal_priority_ties_break_on_extractor_order() {
        let blobs = vec![blob_at(250, 150, 500.0), blob_at(400, 200, 500.0)];
        let (event, blob) = decider().decide(&blobs);
        assert_eq!(event, FrameEvent::Goal(Side::Team1));
        assert_eq!(blob.unwrap().centroid, Point::new(250, 150));
    }

    #[test]
    fn test_handball_beats_neutral() {
        let blobs = vec![blob_at(100, 400, 500.0), blob_at(100, 125, 500.0)];
        let (event, blob) = decider().decide(&blobs);
        assert_eq!(event, FrameEvent::Handball);
        assert_eq!(blob.unwrap().centroid, Point::new(100, 125));
    }

    #[test]
    fn test_banner_texts() {
        assert_eq!(FrameEvent::Goal(Side::Team1).banner(), "GOAL !!!");
        assert_eq!(FrameEvent::Handball.banner(), "HAND BALL!");
        assert_eq!(FrameEvent::Waiting.banner(), "Waiting for ball...");
    }

    #[test]
    fn test_trigger_predicate() {
        assert!(FrameEvent::Goal(Side::Team2).is_trigger());
        assert!(FrameEvent::Handball.is_trigger());
        assert!(!FrameEvent::Waiting.is_trigger());
    }
}
