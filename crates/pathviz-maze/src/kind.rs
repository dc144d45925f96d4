use std::fmt;
use std::str::FromStr;

use pathviz_core::Point;
use rand::Rng;
use thiserror::Error;

use crate::mapgen::MazeGen;

/// Which maze [`MazeGen::generate`] produces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeKind {
    #[default]
    None,
    Basic,
    RecursiveDivision,
}

impl MazeKind {
    pub const ALL: [MazeKind; 3] = [Self::None, Self::Basic, Self::RecursiveDivision];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::RecursiveDivision => "recursiveDivision",
        }
    }

    /// The kind after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Basic,
            Self::Basic => Self::RecursiveDivision,
            Self::RecursiveDivision => Self::None,
        }
    }
}

impl fmt::Display for MazeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown maze `{0}`, expected one of none, basic, recursiveDivision")]
pub struct ParseMazeKindError(pub String);

impl FromStr for MazeKind {
    type Err = ParseMazeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "none" => Ok(Self::None),
            "basic" => Ok(Self::Basic),
            "recursivedivision" => Ok(Self::RecursiveDivision),
            _ => Err(ParseMazeKindError(s.to_string())),
        }
    }
}

impl<R: Rng> MazeGen<R> {
    /// Generate the wall sequence for `kind`. [`MazeKind::None`] yields
    /// nothing.
    pub fn generate(&mut self, kind: MazeKind, density: f64, exclude: &[Point]) -> Vec<Point> {
        match kind {
            MazeKind::None => Vec::new(),
            MazeKind::Basic => self.basic(density, exclude),
            MazeKind::RecursiveDivision => self.recursive_division(exclude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Range;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!("none".parse(), Ok(MazeKind::None));
        assert_eq!("Basic".parse(), Ok(MazeKind::Basic));
        assert_eq!("recursiveDivision".parse(), Ok(MazeKind::RecursiveDivision));
        assert_eq!("recursive-division".parse(), Ok(MazeKind::RecursiveDivision));
        assert!("prim".parse::<MazeKind>().is_err());
        for k in MazeKind::ALL {
            assert_eq!(k.to_string().parse(), Ok(k));
        }
    }

    #[test]
    fn next_cycles_through_all() {
        let mut k = MazeKind::None;
        for expected in [MazeKind::Basic, MazeKind::RecursiveDivision, MazeKind::None] {
            k = k.next();
            assert_eq!(k, expected);
        }
    }

    #[test]
    fn generate_dispatches() {
        let mut mg = MazeGen::new(7, 7, StdRng::seed_from_u64(9));
        assert!(mg.generate(MazeKind::None, 1.0, &[]).is_empty());
        assert_eq!(mg.generate(MazeKind::Basic, 1.0, &[]).len(), 49);
        let walls = mg.generate(MazeKind::RecursiveDivision, 1.0, &[]);
        assert_eq!(&walls[..24], &Range::sized(7, 7).perimeter()[..]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&MazeKind::RecursiveDivision).unwrap();
        let back: MazeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MazeKind::RecursiveDivision);
    }
}
