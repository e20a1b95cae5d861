use std::time::Instant;

use anyhow::{Context, Result};
use opencv::core::{Mat, Point as CvPoint, Scalar};
use opencv::prelude::*;
use opencv::{highgui, imgproc};
use tracing::{error, info};

use var_vision::capture::CameraSource;
use var_vision::config::Config;
use var_vision::detection::{FramePipeline, MatchState};
use var_vision::overlay::Label;
use var_vision::utils::LatencyStats;

const WINDOW_NAME: &str = "VAR Vision";

fn main() -> Result<()> {
    init_tracing();

    info!("var-vision starting");

    let config = Config::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    info!(
        width = config.frame_width,
        height = config.frame_height,
        camera = config.camera_index,
        goal_areas = config.goal_areas.len(),
        min_blob_area = config.min_blob_area,
        "configuration loaded"
    );

    let bench = std::env::args().nth(1).as_deref() == Some("--bench");
    run(&config, bench)
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("var_vision=info")),
        )
        .init();
}

fn run(config: &Config, bench: bool) -> Result<()> {
    let mut source = CameraSource::open(config.camera_index, config.frame_width, config.frame_height)
        .context("failed to open camera (check camera_index in config.json)")?;

    let pipeline = FramePipeline::new(config);
    let mut state = MatchState::new(config);
    let mut stats = LatencyStats::with_capacity(config.bench_frames);

    let mut frame_count: u64 = 0;
    let mut event_count: u64 = 0;
    let mut size_warned = false;

    info!(bench, "detection loop started, press 'q' in the window to quit");

    loop {
        if bench && frame_count >= config.bench_frames as u64 {
            break;
        }

        // Frame acquisition failure is terminal, not retried
        let frame = match source.next_frame() {
            Ok(frame) => frame,
            Err(err) => {
                error!(%err, "frame acquisition failed, stopping");
                break;
            }
        };
        frame_count += 1;

        if !size_warned && frame.dimensions() != (config.frame_width, config.frame_height) {
            tracing::warn!(
                actual = ?frame.dimensions(),
                configured = ?(config.frame_width, config.frame_height),
                "camera delivers a different frame size than configured, zones may be off"
            );
            size_warned = true;
        }

        let now = Instant::now();
        let output = pipeline.process(&mut state, frame, now);

        if output.event.is_trigger() {
            event_count += 1;
            info!(
                event = ?output.event,
                scores = ?state.scoreboard.scores(),
                "event"
            );
        }
        stats.add(output.timing);

        if frame_count % 100 == 0 {
            let fps = 1_000_000.0 / output.timing.total_us.max(1.0);
            info!(
                "frame {}: {:.1}ms total ({:.1} FPS) | events: {}",
                frame_count,
                output.timing.total_ms(),
                fps,
                event_count
            );
        }

        if !bench {
            show_frame(&output.frame, &output.labels).context("display failed")?;

            let key = highgui::wait_key(1).context("keyboard poll failed")?;
            if key == 'q' as i32 {
                info!("quit requested");
                break;
            }
        }
    }

    info!(frames = frame_count, events = event_count, "detection stopped");
    if bench {
        stats.report();
    }

    Ok(())
}

/// Convert the processed frame to BGR, rasterize the label plan and show it.
fn show_frame(frame: &image::RgbaImage, labels: &[Label]) -> Result<()> {
    let (_, height) = frame.dimensions();

    let rgba = Mat::from_slice(frame.as_raw()).context("frame to Mat")?;
    let rgba = rgba.reshape(4, height as i32).context("frame reshape")?;
    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgba, &mut bgr, imgproc::COLOR_RGBA2BGR, 0).context("RGBA to BGR")?;

    for label in labels {
        let [r, g, b, _] = label.color.0;
        imgproc::put_text(
            &mut bgr,
            &label.text,
            CvPoint::new(label.position.x, label.position.y),
            imgproc::FONT_HERSHEY_SIMPLEX,
            label.scale as f64,
            Scalar::new(b as f64, g as f64, r as f64, 0.0),
            2,
            imgproc::LINE_AA,
            false,
        )
        .context("label draw")?;
    }

    highgui::imshow(WINDOW_NAME, &bgr).context("imshow")?;
    Ok(())
}
