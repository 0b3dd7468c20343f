//! The fixed set of tracking algorithms a run can select from.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Tracking algorithm kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackerKind {
    Boosting,
    Mil,
    Kcf,
    Csrt,
    Tld,
    MedianFlow,
    Goturn,
    Mosse,
}

impl TrackerKind {
    /// All kinds, in menu order.
    pub const ALL: [TrackerKind; 8] = [
        TrackerKind::Boosting,
        TrackerKind::Mil,
        TrackerKind::Kcf,
        TrackerKind::Csrt,
        TrackerKind::Tld,
        TrackerKind::MedianFlow,
        TrackerKind::Goturn,
        TrackerKind::Mosse,
    ];

    /// Upper-case identifier, e.g. `MEDIANFLOW`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Boosting => "BOOSTING",
            Self::Mil => "MIL",
            Self::Kcf => "KCF",
            Self::Csrt => "CSRT",
            Self::Tld => "TLD",
            Self::MedianFlow => "MEDIANFLOW",
            Self::Goturn => "GOTURN",
            Self::Mosse => "MOSSE",
        }
    }

    /// On-frame label identifying the active tracker.
    pub fn label(self) -> String {
        format!("{} Tracker", self.name())
    }

    /// Whether this crate drives the algorithm through OpenCV's legacy tracking API.
    ///
    /// MIL and CSRT also exist in the legacy API but are created through
    /// the current one here, which takes integer `Rect` boxes.
    pub fn is_legacy(self) -> bool {
        matches!(
            self,
            Self::Boosting | Self::Tld | Self::MedianFlow | Self::Mosse
        )
    }

    /// Model files the algorithm loads at construction time.
    pub fn required_assets(self) -> &'static [&'static str] {
        match self {
            Self::Goturn => &["goturn.prototxt", "goturn.caffemodel"],
            _ => &[],
        }
    }

    /// Resolve the required assets under `model_dir`, failing on the first one missing.
    pub fn locate_assets(self, model_dir: &Path) -> Result<Vec<PathBuf>, Error> {
        self.required_assets()
            .iter()
            .map(|name| {
                let path = model_dir.join(name);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(Error::MissingAsset { path })
                }
            })
            .collect()
    }
}

impl std::fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownTrackerKind(s.to_string()))
    }
}
