//! The [`Label`] type: what a board cell currently shows.

use std::fmt;

/// Display label of one board cell.
///
/// `Start`, `Finish` and `Wall` mirror the node flags; `Visited` and
/// `ShortestPath` are transient and only ever painted by a replay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    #[default]
    None,
    Start,
    Finish,
    Wall,
    Visited,
    ShortestPath,
}

impl Label {
    /// Labels cleared by a run-state reset.
    #[inline]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Visited | Self::ShortestPath)
    }

    /// Start or finish; replays never paint over these.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::Finish)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Start => "start",
            Self::Finish => "finish",
            Self::Wall => "wall",
            Self::Visited => "visited",
            Self::ShortestPath => "shortest-path",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_labels() {
        assert!(Label::Visited.is_transient());
        assert!(Label::ShortestPath.is_transient());
        assert!(!Label::Wall.is_transient());
        assert!(!Label::None.is_transient());
    }

    #[test]
    fn endpoint_labels() {
        assert!(Label::Start.is_endpoint());
        assert!(Label::Finish.is_endpoint());
        assert!(!Label::Visited.is_endpoint());
    }

    #[test]
    fn display_names() {
        assert_eq!(Label::ShortestPath.to_string(), "shortest-path");
        assert_eq!(Label::default().to_string(), "none");
    }
}
