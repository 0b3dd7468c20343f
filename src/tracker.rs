mod kind;
mod rect;
mod single_tracker;
mod track_state;

pub use kind::TrackerKind;
pub use rect::{BoundingBox, Point};
pub use single_tracker::{ScriptEnd, ScriptedTracker, Tracker};
pub use track_state::TrackState;
