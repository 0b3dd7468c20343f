use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use boxtrack_rs::config::parse_bbox;
use boxtrack_rs::opencv_backend::{VideoFileSource, WindowSink, create_tracker};
use boxtrack_rs::{BoundingBox, FrameLoop, Termination, TrackerKind, TrackingConfig, VideoSource};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "boxtrack", about = "Track one object through a video")]
struct Args {
    /// Video file to read
    #[arg(long, value_name = "PATH")]
    video: Option<PathBuf>,
    /// BOOSTING, MIL, KCF, CSRT, TLD, MEDIANFLOW, GOTURN or MOSSE
    #[arg(long, value_parser = parse_kind)]
    tracker: Option<TrackerKind>,
    /// Object location in the first frame
    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_seed)]
    bbox: Option<BoundingBox>,
    /// Pause after each frame, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Directory holding goturn.prototxt and goturn.caffemodel
    #[arg(long, value_name = "DIR")]
    model_dir: Option<PathBuf>,
    /// Window size relative to the video
    #[arg(long)]
    window_scale: Option<f64>,
}

fn parse_kind(s: &str) -> Result<TrackerKind, String> {
    s.parse().map_err(|e: boxtrack_rs::Error| e.to_string())
}

fn parse_seed(s: &str) -> Result<BoundingBox, String> {
    parse_bbox(s).map_err(|e| e.to_string())
}

impl Args {
    fn into_config(self) -> TrackingConfig {
        let mut config = TrackingConfig::default();
        if let Some(video) = self.video {
            config.video_path = video;
        }
        if let Some(kind) = self.tracker {
            config.tracker_kind = kind;
        }
        if let Some(bbox) = self.bbox {
            config.initial_bbox = bbox;
        }
        if let Some(ms) = self.delay_ms {
            config.frame_delay = Duration::from_millis(ms);
        }
        if let Some(dir) = self.model_dir {
            config.model_dir = dir;
        }
        if let Some(scale) = self.window_scale {
            config.window_scale = scale;
        }
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let config = Args::parse().into_config();
    run(&config)
}

fn run(config: &TrackingConfig) -> Result<()> {
    config.validate()?;

    let tracker = create_tracker(config.tracker_kind, &config.model_dir)
        .with_context(|| format!("Failed to create {} tracker", config.tracker_kind))?;

    let source = VideoFileSource::open(&config.video_path).with_context(|| {
        format!("Error opening video file {}", config.video_path.display())
    })?;
    let sink = WindowSink::open(&config.window_name, source.dimensions(), config.window_scale)
        .context("Failed to open display window")?;

    let summary = FrameLoop::start(source, tracker, sink, config.initial_bbox)
        .context("Failed to initialize tracker")?
        .with_quit_key(config.quit_key)
        .with_frame_delay(config.frame_delay)
        .run()?;

    match summary.termination {
        Termination::EndOfStream => tracing::info!("end of video"),
        Termination::Quit => tracing::info!("stopped by user"),
    }
    Ok(())
}
