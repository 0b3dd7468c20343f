//! OpenCV backend: video decoding, a display window and the tracker algorithms.
//!
//! This module provides `VideoFileSource`, `WindowSink` and one `Tracker`
//! implementation per `TrackerKind`, all operating on `opencv::core::Mat`.
//!
//! # Example
//!
//! ```ignore
//! use boxtrack_rs::opencv_backend::{VideoFileSource, WindowSink, create_tracker};
//! use boxtrack_rs::{BoundingBox, FrameLoop, TrackerKind};
//!
//! let source = VideoFileSource::open("race_car.mp4")?;
//! let sink = WindowSink::open("Object Tracker", source.dimensions(), 0.5)?;
//! let tracker = create_tracker(TrackerKind::Csrt, ".".as_ref())?;
//! let seed = BoundingBox::new(1300.0, 405.0, 160.0, 120.0);
//! FrameLoop::start(source, tracker, sink, seed)?.run()?;
//! ```

use std::path::{Path, PathBuf};

use opencv::core::{Mat, Ptr, Rect, Rect2d, Scalar};
use opencv::prelude::*;
use opencv::{highgui, imgproc, tracking, video, videoio};
use tracing::{debug, warn};

use super::overlay::{Canvas, Color, Overlay, render_all};
use super::sink::FrameSink;
use super::source::VideoSource;
use crate::error::{Error, Result};
use crate::tracker::{BoundingBox, Point, Tracker, TrackerKind};

fn scalar(color: Color) -> Scalar {
    Scalar::new(color.b as f64, color.g as f64, color.r as f64, 0.0)
}

fn to_rect(bbox: BoundingBox) -> Rect {
    let (top_left, bottom_right) = bbox.corners();
    Rect::new(
        top_left.x,
        top_left.y,
        bottom_right.x - top_left.x,
        bottom_right.y - top_left.y,
    )
}

fn from_rect(rect: Rect) -> BoundingBox {
    BoundingBox::new(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

fn to_rect2d(bbox: BoundingBox) -> Rect2d {
    Rect2d::new(
        bbox.x as f64,
        bbox.y as f64,
        bbox.width as f64,
        bbox.height as f64,
    )
}

fn from_rect2d(rect: Rect2d) -> BoundingBox {
    BoundingBox::new(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

impl Canvas for Mat {
    fn draw_rectangle(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        color: Color,
        thickness: i32,
    ) -> Result<()> {
        imgproc::rectangle_points(
            self,
            opencv::core::Point::new(top_left.x, top_left.y),
            opencv::core::Point::new(bottom_right.x, bottom_right.y),
            scalar(color),
            thickness,
            imgproc::LINE_8,
            0,
        )?;
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        color: Color,
        scale: f64,
        thickness: i32,
    ) -> Result<()> {
        imgproc::put_text(
            self,
            text,
            opencv::core::Point::new(origin.x, origin.y),
            imgproc::FONT_HERSHEY_SIMPLEX,
            scale,
            scalar(color),
            thickness,
            imgproc::LINE_8,
            false,
        )?;
        Ok(())
    }
}

/// Frames decoded from a video file.
///
/// The capture is released when the source is dropped.
pub struct VideoFileSource {
    capture: videoio::VideoCapture,
    path: PathBuf,
    dimensions: Option<(u32, u32)>,
}

impl VideoFileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let name = path
            .to_str()
            .ok_or_else(|| Error::SourceOpen { path: path.clone() })?;

        let capture = videoio::VideoCapture::from_file(name, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(Error::SourceOpen { path });
        }

        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)?;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)?;
        let dimensions = (width > 0.0 && height > 0.0).then(|| (width as u32, height as u32));
        debug!(path = %path.display(), ?dimensions, "video opened");

        Ok(Self {
            capture,
            path,
            dimensions,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VideoSource for VideoFileSource {
    type Frame = Mat;

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }
}

impl Drop for VideoFileSource {
    fn drop(&mut self) {
        if let Err(err) = self.capture.release() {
            warn!(path = %self.path.display(), %err, "failed to release video capture");
        }
    }
}

/// A resizable HighGUI window.
///
/// The window is destroyed when the sink is dropped.
pub struct WindowSink {
    name: String,
}

impl WindowSink {
    /// Create the window, sized to `scale` times the video when its dimensions are known.
    pub fn open(name: &str, dimensions: Option<(u32, u32)>, scale: f64) -> Result<Self> {
        highgui::named_window(name, highgui::WINDOW_NORMAL)?;
        let sink = Self {
            name: name.to_string(),
        };
        if let Some((width, height)) = dimensions {
            let width = (width as f64 * scale) as i32;
            let height = (height as f64 * scale) as i32;
            highgui::resize_window(name, width, height)?;
        }
        Ok(sink)
    }
}

impl FrameSink<Mat> for WindowSink {
    fn show(&mut self, frame: &mut Mat, overlays: &[Overlay]) -> Result<()> {
        render_all(frame, overlays)?;
        highgui::imshow(&self.name, &*frame)?;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<u8>> {
        let key = highgui::wait_key(1)?;
        Ok((key >= 0).then(|| (key & 0xFF) as u8))
    }
}

impl Drop for WindowSink {
    fn drop(&mut self) {
        if let Err(err) = highgui::destroy_window(&self.name) {
            warn!(window = %self.name, %err, "failed to destroy window");
        }
    }
}

/// A tracker from OpenCV's current API (integer `Rect` boxes).
pub struct OpenCvTracker<T> {
    kind: TrackerKind,
    inner: Ptr<T>,
    initialized: bool,
}

impl<T> OpenCvTracker<T> {
    fn new(kind: TrackerKind, inner: Ptr<T>) -> Self {
        Self {
            kind,
            inner,
            initialized: false,
        }
    }
}

impl<T> Tracker<Mat> for OpenCvTracker<T>
where
    Ptr<T>: video::TrackerTrait,
{
    fn kind(&self) -> TrackerKind {
        self.kind
    }

    fn init(&mut self, frame: &Mat, bbox: BoundingBox) -> Result<()> {
        self.inner.init(frame, to_rect(bbox))?;
        self.initialized = true;
        Ok(())
    }

    fn update(&mut self, frame: &Mat) -> Result<Option<BoundingBox>> {
        if !self.initialized {
            return Err(Error::NotInitialized(self.kind));
        }
        let mut rect = Rect::default();
        let found = self.inner.update(frame, &mut rect)?;
        Ok(found.then(|| from_rect(rect)))
    }
}

/// A tracker only available through OpenCV's legacy API (`Rect2d` boxes).
pub struct LegacyTracker<T> {
    kind: TrackerKind,
    inner: Ptr<T>,
    initialized: bool,
}

impl<T> LegacyTracker<T> {
    fn new(kind: TrackerKind, inner: Ptr<T>) -> Self {
        Self {
            kind,
            inner,
            initialized: false,
        }
    }
}

impl<T> Tracker<Mat> for LegacyTracker<T>
where
    Ptr<T>: tracking::legacy_TrackerTrait,
{
    fn kind(&self) -> TrackerKind {
        self.kind
    }

    fn init(&mut self, frame: &Mat, bbox: BoundingBox) -> Result<()> {
        if !self.inner.init(frame, to_rect2d(bbox))? {
            return Err(Error::TrackerInit(self.kind));
        }
        self.initialized = true;
        Ok(())
    }

    fn update(&mut self, frame: &Mat) -> Result<Option<BoundingBox>> {
        if !self.initialized {
            return Err(Error::NotInitialized(self.kind));
        }
        let mut rect = Rect2d::default();
        let found = self.inner.update(frame, &mut rect)?;
        Ok(found.then(|| from_rect2d(rect)))
    }
}

/// Construct the tracker implementing `kind`.
///
/// Model files under `model_dir` are checked before OpenCV loads them.
pub fn create_tracker(kind: TrackerKind, model_dir: &Path) -> Result<Box<dyn Tracker<Mat>>> {
    let assets = kind.locate_assets(model_dir)?;

    let tracker: Box<dyn Tracker<Mat>> = match kind {
        TrackerKind::Boosting => Box::new(LegacyTracker::new(
            kind,
            tracking::legacy_TrackerBoosting::create(
                &tracking::legacy_TrackerBoosting_Params::default()?,
            )?,
        )),
        TrackerKind::Mil => Box::new(OpenCvTracker::new(
            kind,
            video::TrackerMIL::create(video::TrackerMIL_Params::default()?)?,
        )),
        TrackerKind::Kcf => Box::new(OpenCvTracker::new(
            kind,
            tracking::TrackerKCF::create(tracking::TrackerKCF_Params::default()?)?,
        )),
        TrackerKind::Csrt => Box::new(OpenCvTracker::new(
            kind,
            tracking::TrackerCSRT::create(&tracking::TrackerCSRT_Params::default()?)?,
        )),
        TrackerKind::Tld => Box::new(LegacyTracker::new(
            kind,
            tracking::legacy_TrackerTLD::create(&tracking::legacy_TrackerTLD_Params::default()?)?,
        )),
        TrackerKind::MedianFlow => Box::new(LegacyTracker::new(
            kind,
            tracking::legacy_TrackerMedianFlow::create(
                &tracking::legacy_TrackerMedianFlow_Params::default()?,
            )?,
        )),
        TrackerKind::Goturn => {
            let [prototxt, caffemodel] = assets.as_slice() else {
                return Err(Error::MissingAsset {
                    path: model_dir.to_path_buf(),
                });
            };
            let mut params = video::TrackerGOTURN_Params::default()?;
            params.set_model_txt(path_str(prototxt)?);
            params.set_model_bin(path_str(caffemodel)?);
            Box::new(OpenCvTracker::new(
                kind,
                video::TrackerGOTURN::create(&params)?,
            ))
        }
        TrackerKind::Mosse => Box::new(LegacyTracker::new(
            kind,
            tracking::legacy_TrackerMOSSE::create()?,
        )),
    };

    debug!(tracker = %kind, legacy = kind.is_legacy(), "tracker created");
    Ok(tracker)
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::MissingAsset {
        path: path.to_path_buf(),
    })
}
