use boxtrack_rs::integration::{FAILURE_TEXT, ShownFrame};
use boxtrack_rs::{
    BoundingBox, Error, Frame, FrameLoop, FrameSequence, Overlay, Point, RecordingSink, ScriptEnd,
    ScriptedTracker, Termination, Tracker, TrackerKind,
};

fn seed() -> BoundingBox {
    BoundingBox::new(1300.0, 405.0, 160.0, 120.0)
}

/// Seed frame plus `updates` frames, large enough to hold the seed box.
fn video(updates: usize) -> FrameSequence {
    FrameSequence::blank(1600, 600, updates + 1)
}

fn rectangle_corners(shown: &ShownFrame<Frame>) -> Vec<(Point, Point)> {
    shown
        .rectangles()
        .map(|o| match o {
            Overlay::Rectangle {
                top_left,
                bottom_right,
                ..
            } => (*top_left, *bottom_right),
            Overlay::Text { .. } => unreachable!(),
        })
        .collect()
}

/// Tracker that moves the box right by one pixel per frame.
struct Drifting {
    bbox: Option<BoundingBox>,
}

impl Tracker<Frame> for Drifting {
    fn kind(&self) -> TrackerKind {
        TrackerKind::Csrt
    }

    fn init(&mut self, _frame: &Frame, bbox: BoundingBox) -> boxtrack_rs::Result<()> {
        self.bbox = Some(bbox);
        Ok(())
    }

    fn update(&mut self, _frame: &Frame) -> boxtrack_rs::Result<Option<BoundingBox>> {
        let bbox = self.bbox.as_mut().ok_or(Error::NotInitialized(TrackerKind::Csrt))?;
        bbox.x += 1.0;
        Ok(Some(*bbox))
    }
}

#[test]
fn test_stationary_tracker_draws_seed_box() {
    let tracker = ScriptedTracker::stationary(TrackerKind::Goturn);
    let mut frame_loop = FrameLoop::start(video(3), tracker, RecordingSink::new(), seed()).unwrap();
    frame_loop.step().unwrap();

    let (_, _, sink) = frame_loop.into_parts();
    let first = &sink.shown()[0];
    assert_eq!(
        rectangle_corners(first),
        vec![(Point::new(1300, 405), Point::new(1460, 525))]
    );
    assert!(first.has_text("GOTURN Tracker"));
    assert!(!first.has_text(FAILURE_TEXT));

    // Rasterized onto the frame as well.
    assert_eq!(first.frame.pixel(1300, 405), Some([255, 0, 0]));
    assert_eq!(first.frame.pixel(1460, 525), Some([255, 0, 0]));
}

#[test]
fn test_rectangle_matches_returned_box() {
    let tracker = Drifting { bbox: None };
    let mut frame_loop = FrameLoop::start(video(5), tracker, RecordingSink::new(), seed()).unwrap();
    while frame_loop.step().unwrap().is_some() {}
    let (_, _, sink) = frame_loop.into_parts();

    assert_eq!(sink.shown().len(), 5);
    for (i, shown) in sink.shown().iter().enumerate() {
        let x = 1300 + i as i32 + 1;
        assert_eq!(
            rectangle_corners(shown),
            vec![(Point::new(x, 405), Point::new(x + 160, 525))]
        );
    }
}

#[test]
fn test_always_failing_tracker_never_draws_box() {
    let tracker = ScriptedTracker::always_failing(TrackerKind::Mosse);
    let sink = RecordingSink::new();
    let mut frame_loop = FrameLoop::start(video(4), tracker, sink, seed()).unwrap();
    while frame_loop.step().unwrap().is_some() {}
    let (_, _, sink) = frame_loop.into_parts();

    assert_eq!(sink.shown().len(), 4);
    for shown in sink.shown() {
        assert!(shown.has_text(FAILURE_TEXT));
        assert!(shown.has_text("MOSSE Tracker"));
        assert_eq!(shown.rectangles().count(), 0);
        assert_eq!(shown.frame.pixel(1300, 405), Some([0, 0, 0]));
    }
}

#[test]
fn test_runs_every_frame_without_quit() {
    let tracker = ScriptedTracker::stationary(TrackerKind::Kcf);
    let summary = FrameLoop::start(video(7), tracker, RecordingSink::new(), seed())
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.frames, 7);
    assert_eq!(summary.tracked, 7);
    assert_eq!(summary.termination, Termination::EndOfStream);
}

#[test]
fn test_seed_frame_only_performs_no_updates() {
    let tracker = ScriptedTracker::stationary(TrackerKind::Kcf);
    let mut frame_loop = FrameLoop::start(video(0), tracker, RecordingSink::new(), seed()).unwrap();
    assert_eq!(frame_loop.step().unwrap(), None);

    let (_, tracker, sink) = frame_loop.into_parts();
    assert!(tracker.is_initialized());
    assert_eq!(tracker.updates(), 0);
    assert!(sink.shown().is_empty());
}

#[test]
fn test_quit_key_stops_loop() {
    let tracker = ScriptedTracker::stationary(TrackerKind::Boosting);
    let sink = RecordingSink::pressing_on(b'q', 3);
    let summary = FrameLoop::start(video(10), tracker, sink, seed())
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.termination, Termination::Quit);
}

#[test]
fn test_other_keys_are_ignored() {
    let tracker = ScriptedTracker::stationary(TrackerKind::Mil);
    let sink = RecordingSink::with_keys([Some(b'a'), Some(b'Q'), Some(b' ')]);
    let summary = FrameLoop::start(video(4), tracker, sink, seed())
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.frames, 4);
    assert_eq!(summary.termination, Termination::EndOfStream);
}

#[test]
fn test_lost_then_recovered() {
    let moved = BoundingBox::new(1310.0, 410.0, 160.0, 120.0);
    let tracker = ScriptedTracker::new(
        TrackerKind::MedianFlow,
        [None, None, Some(moved)],
        ScriptEnd::Hold,
    );
    let mut frame_loop = FrameLoop::start(video(4), tracker, RecordingSink::new(), seed()).unwrap();
    while frame_loop.step().unwrap().is_some() {}
    assert_eq!(frame_loop.bbox(), moved);
    let (_, _, sink) = frame_loop.into_parts();

    let lost: Vec<bool> = sink
        .shown()
        .iter()
        .map(|s| s.has_text(FAILURE_TEXT))
        .collect();
    assert_eq!(lost, vec![true, true, false, false]);
    assert_eq!(
        rectangle_corners(&sink.shown()[3]),
        vec![(Point::new(1310, 410), Point::new(1470, 530))]
    );
}

#[test]
fn test_tracker_error_propagates() {
    struct Broken;

    impl Tracker<Frame> for Broken {
        fn kind(&self) -> TrackerKind {
            TrackerKind::Tld
        }

        fn init(&mut self, _frame: &Frame, _bbox: BoundingBox) -> boxtrack_rs::Result<()> {
            Err(Error::TrackerInit(TrackerKind::Tld))
        }

        fn update(&mut self, _frame: &Frame) -> boxtrack_rs::Result<Option<BoundingBox>> {
            Ok(None)
        }
    }

    let err = FrameLoop::start(video(2), Broken, RecordingSink::new(), seed())
        .err()
        .unwrap();
    assert!(matches!(err, Error::TrackerInit(TrackerKind::Tld)));
}
