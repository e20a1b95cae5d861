use std::time::Instant;

/// Simple wall-clock stage timer.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_us(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1_000_000.0
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Timing measurements for a single pipeline iteration
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTiming {
    pub segment_us: f64,
    pub extract_us: f64,
    pub decide_us: f64,
    pub compose_us: f64,
    pub total_us: f64,
}

impl StageTiming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> f64 {
        self.total_us / 1000.0
    }
}

/// Statistics collector for latency measurements
pub struct LatencyStats {
    timings: Vec<StageTiming>,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self {
            timings: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timings: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, timing: StageTiming) {
        self.timings.push(timing);
    }

    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    /// Calculate percentile from sorted data
    fn percentile(sorted: &[f64], p: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }

        let idx = (p / 100.0 * (sorted.len() - 1) as f64).round() as usize;
        sorted[idx]
    }

    /// Calculate statistics for a specific stage
    fn stage_stats(&self, extract: impl Fn(&StageTiming) -> f64) -> (f64, f64, f64, f64) {
        if self.timings.is_empty() {
            return (0.0, 0.0, 0.0, 0.0);
        }

        let mut values: Vec<f64> = self.timings.iter().map(&extract).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let p50 = Self::percentile(&values, 50.0);
        let p95 = Self::percentile(&values, 95.0);
        let p99 = Self::percentile(&values, 99.0);

        (mean, p50, p95, p99)
    }

    /// Log a per-stage latency report
    pub fn report(&self) {
        if self.timings.is_empty() {
            tracing::info!("no timing data collected");
            return;
        }

        tracing::info!("latency report over {} iterations", self.timings.len());

        let segment_stats = self.stage_stats(|t| t.segment_us);
        let extract_stats = self.stage_stats(|t| t.extract_us);
        let decide_stats = self.stage_stats(|t| t.decide_us);
        let compose_stats = self.stage_stats(|t| t.compose_us);
        let total_stats = self.stage_stats(|t| t.total_us);

        Self::report_row("segment", segment_stats);
        Self::report_row("extract", extract_stats);
        Self::report_row("decide", decide_stats);
        Self::report_row("compose", compose_stats);
        Self::report_row("total", total_stats);

        // Frame budget for 30 fps capture
        let total_p95_ms = total_stats.2 / 1000.0;
        if total_p95_ms < 33.0 {
            tracing::info!(p95_ms = total_p95_ms, "within the 33ms frame budget");
        } else {
            tracing::warn!(p95_ms = total_p95_ms, "exceeds the 33ms frame budget");
        }

        let stages = [
            ("segment", segment_stats.2),
            ("extract", extract_stats.2),
            ("decide", decide_stats.2),
            ("compose", compose_stats.2),
        ];
        if let Some(bottleneck) = stages
            .iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        {
            tracing::info!(stage = bottleneck.0, p95_us = bottleneck.1, "bottleneck");
        }
    }

    fn report_row(name: &str, stats: (f64, f64, f64, f64)) {
        tracing::info!(
            "{:<8} mean {:>7.0} us | p50 {:>7.0} us | p95 {:>7.0} us | p99 {:>7.0} us",
            name,
            stats.0,
            stats.1,
            stats.2,
            stats.3
        );
    }
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self::new()
    }
}
