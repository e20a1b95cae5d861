/// Freeze-frame replay state
///
/// Holds the most recent event frame and its trigger time. There is no
/// explicit Active -> Idle transition: activity is a pure predicate over
/// `(now, started, duration)`, and the captured frame simply stays in place
/// until the next trigger overwrites it. Re-triggering while active
/// overwrites both the frame and the timestamp; nothing queues or stacks.
use std::time::{Duration, Instant};

use image::RgbaImage;

pub struct FreezeFrame {
    captured: Option<RgbaImage>,
    started: Option<Instant>,
    duration: Duration,
    alpha: f32,
}

impl FreezeFrame {
    /// `duration_secs` is how long the replay overlay stays active after a
    /// trigger; `alpha` is the weight of the frozen frame in the blend.
    pub fn new(duration_secs: f64, alpha: f32) -> Self {
        Self {
            captured: None,
            started: None,
            duration: Duration::from_secs_f64(duration_secs),
            alpha,
        }
    }

    /// Store a copy of the (already annotated) frame and mark `now` as the
    /// trigger time.
    pub fn capture(&mut self, frame: &RgbaImage, now: Instant) {
        self.captured = Some(frame.clone());
        self.started = Some(now);
    }

    /// True while the replay overlay should be applied: strictly less than
    /// the configured duration has elapsed since the last trigger. Elapsed
    /// time exactly equal to the duration counts as expired.
    pub fn is_active(&self, now: Instant) -> bool {
        match self.started {
            Some(started) => now.saturating_duration_since(started) < self.duration,
            None => false,
        }
    }

    /// Per-pixel convex combination of the captured frame and the live
    /// frame, with `alpha` weighting the captured side.
    ///
    /// Computed as `live + alpha * (captured - live)` per channel, which
    /// keeps `blend(f, f) == f` exact. Falls back to the live frame when no
    /// capture exists or dimensions disagree.
    pub fn blend(&self, live: &RgbaImage) -> RgbaImage {
        let Some(captured) = &self.captured else {
            return live.clone();
        };
        if captured.dimensions() != live.dimensions() {
            tracing::warn!(
                captured = ?captured.dimensions(),
                live = ?live.dimensions(),
                "captured frame dimensions disagree with live frame, skipping blend"
            );
            return live.clone();
        }

        let mut out = live.clone();
        for (o, c) in out
            .as_flat_samples_mut()
            .samples
            .iter_mut()
            .zip(captured.as_raw().iter())
        {
            let l = *o as f32;
            let v = l + self.alpha * (*c as f32 - l);
            *o = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    pub fn captured(&self) -> Option<&RgbaImage> {
        self.captured.as_ref()
    }
}
