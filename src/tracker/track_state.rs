/// Per-frame tracking outcome.
///
/// Does not persist across frames: each update is judged on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// The tracker located the object in this frame
    #[default]
    Tracked,
    /// The tracker reported failure for this frame
    Lost,
}

impl TrackState {
    /// Classify the result of a single `Tracker::update` call.
    pub fn of<B>(update: &Option<B>) -> Self {
        if update.is_some() {
            Self::Tracked
        } else {
            Self::Lost
        }
    }
}
