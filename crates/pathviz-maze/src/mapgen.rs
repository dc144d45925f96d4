//! Maze generators.
//!
//! Generators never touch a board: they return the wall cells to place, in
//! the order they should be animated. Two styles are provided:
//! - **Basic**: independent coin flip per cell, row-major.
//! - **Recursive division**: a walled border, then chambers split by
//!   single-gap dividers, emitted in pre-order.

use pathviz_core::{Point, Range};
use rand::Rng;

/// Chambers narrower or shorter than this are left open.
pub const MIN_CHAMBER: i32 = 3;

/// Default probability of a cell becoming a wall in [`MazeGen::basic`].
pub const DEFAULT_DENSITY: f64 = 0.3;

/// Maze generator over a fixed `rows × cols` board.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    bounds: Range,
}

/// One dividing line of a recursive division and its single gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Divider {
    /// The chamber the line splits.
    pub(crate) chamber: Range,
    pub(crate) line: Range,
    pub(crate) gap: Point,
}

/// Everything a recursive division decided, in pre-order.
#[derive(Debug, Default)]
pub(crate) struct Division {
    pub(crate) walls: Vec<Point>,
    pub(crate) dividers: Vec<Divider>,
    pub(crate) leaves: Vec<Range>,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator for a board of the given size.
    pub fn new(rows: i32, cols: i32, rng: R) -> Self {
        Self {
            rng,
            bounds: Range::sized(rows, cols),
        }
    }

    /// Board area the generator covers.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Wall each cell independently with probability `density`.
    ///
    /// Cells listed in `exclude` are never emitted. `density` is clamped to
    /// `[0, 1]`.
    pub fn basic(&mut self, density: f64, exclude: &[Point]) -> Vec<Point> {
        let density = density.clamp(0.0, 1.0);
        let mut walls = Vec::new();
        for p in self.bounds {
            let roll: f64 = self.rng.random();
            if roll < density && !exclude.contains(&p) {
                walls.push(p);
            }
        }
        log::debug!("basic maze: {} walls at density {density}", walls.len());
        walls
    }

    /// Recursive division maze.
    ///
    /// The border is emitted first, clockwise from the top-left corner.
    /// Then the interior chamber is split: across its rows when it is at
    /// least as tall as it is wide, across its columns otherwise. Dividers
    /// sit at odd offsets from the chamber origin and gaps at even offsets,
    /// so a later divider can never close an earlier gap.
    pub fn recursive_division(&mut self, exclude: &[Point]) -> Vec<Point> {
        let division = self.divide_board(exclude);
        log::debug!(
            "recursive division: {} walls, {} dividers, {} chambers",
            division.walls.len(),
            division.dividers.len(),
            division.leaves.len()
        );
        division.walls
    }

    pub(crate) fn divide_board(&mut self, exclude: &[Point]) -> Division {
        let mut division = Division::default();
        division.walls.extend(
            self.bounds
                .perimeter()
                .into_iter()
                .filter(|p| !exclude.contains(p)),
        );
        let interior = self
            .bounds
            .lines(1, self.bounds.rows() - 1)
            .columns(1, self.bounds.cols() - 1);
        self.divide(interior, exclude, &mut division);
        division
    }

    fn divide(&mut self, chamber: Range, exclude: &[Point], out: &mut Division) {
        let (h, w) = (chamber.rows(), chamber.cols());
        if h < MIN_CHAMBER || w < MIN_CHAMBER {
            if !chamber.is_empty() {
                out.leaves.push(chamber);
            }
            return;
        }

        if h >= w {
            let at = self.odd_offset(h);
            let gap = self.even_offset(w);
            let line = chamber.line(at);
            let gap = Point::new(line.min.row, line.min.col + gap);
            self.emit(Divider { chamber, line, gap }, exclude, out);
            self.divide(chamber.lines(0, at), exclude, out);
            self.divide(chamber.lines(at + 1, h), exclude, out);
        } else {
            let at = self.odd_offset(w);
            let gap = self.even_offset(h);
            let line = chamber.column(at);
            let gap = Point::new(line.min.row + gap, line.min.col);
            self.emit(Divider { chamber, line, gap }, exclude, out);
            self.divide(chamber.columns(0, at), exclude, out);
            self.divide(chamber.columns(at + 1, w), exclude, out);
        }
    }

    fn emit(&mut self, divider: Divider, exclude: &[Point], out: &mut Division) {
        let Divider { line, gap, .. } = divider;
        log::trace!("divider {line} with gap at {gap}");
        out.walls
            .extend(line.iter().filter(|p| *p != gap && !exclude.contains(p)));
        out.dividers.push(divider);
    }

    /// Random odd offset in `[1, len - 2]`; needs `len >= 3`.
    fn odd_offset(&mut self, len: i32) -> i32 {
        2 * self.rng.random_range(0..(len - 1) / 2) + 1
    }

    /// Random even offset in `[0, len - 1]`.
    fn even_offset(&mut self, len: i32) -> i32 {
        2 * self.rng.random_range(0..(len + 1) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn gen_seeded(rows: i32, cols: i32, seed: u64) -> MazeGen<StdRng> {
        MazeGen::new(rows, cols, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn basic_is_row_major_and_skips_excluded() {
        let exclude = [Point::new(0, 0), Point::new(3, 7)];
        let mut mg = gen_seeded(10, 12, 7);
        let walls = mg.basic(1.0, &exclude);
        assert_eq!(walls.len(), 120 - 2);
        assert!(walls.windows(2).all(|w| w[0] < w[1]));
        assert!(exclude.iter().all(|p| !walls.contains(p)));
    }

    #[test]
    fn basic_density_extremes() {
        let mut mg = gen_seeded(10, 10, 1);
        assert!(mg.basic(0.0, &[]).is_empty());
        let walls = mg.basic(0.3, &[]);
        assert!(!walls.is_empty() && walls.len() < 100);
        assert!(walls.iter().all(|&p| mg.bounds().contains(p)));
    }

    #[test]
    fn basic_is_reproducible_with_a_seed() {
        let a = gen_seeded(8, 8, 42).basic(DEFAULT_DENSITY, &[]);
        let b = gen_seeded(8, 8, 42).basic(DEFAULT_DENSITY, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn division_starts_with_the_border() {
        let mut mg = gen_seeded(9, 13, 3);
        let walls = mg.recursive_division(&[]);
        let border = Range::sized(9, 13).perimeter();
        assert_eq!(&walls[..border.len()], &border[..]);
    }

    #[test]
    fn every_divider_has_exactly_one_gap() {
        for seed in 0..20 {
            let mut mg = gen_seeded(20, 57, seed);
            let division = mg.divide_board(&[]);
            let walls: HashSet<Point> = division.walls.iter().copied().collect();
            assert!(!division.dividers.is_empty());
            for d in &division.dividers {
                let open: Vec<Point> = d.line.iter().filter(|p| !walls.contains(p)).collect();
                assert_eq!(open, vec![d.gap], "seed {seed}, divider {}", d.line);
            }
        }
    }

    #[test]
    fn gaps_stay_passable_from_both_sides() {
        for seed in 0..20 {
            let mut mg = gen_seeded(21, 31, seed);
            let division = mg.divide_board(&[]);
            let walls: HashSet<Point> = division.walls.iter().copied().collect();
            for d in &division.dividers {
                let g = d.gap;
                let sides = if d.line.rows() == 1 {
                    [g.shift(-1, 0), g.shift(1, 0)]
                } else {
                    [g.shift(0, -1), g.shift(0, 1)]
                };
                assert!(sides.iter().all(|p| !walls.contains(p)), "seed {seed}");
            }
        }
    }

    #[test]
    fn tall_or_square_chambers_split_across_rows() {
        let boards = [(7, 7), (7, 9), (9, 7), (20, 57), (21, 31), (12, 12)];
        for (rows, cols) in boards {
            for seed in 0..10 {
                let mut mg = gen_seeded(rows, cols, seed);
                let division = mg.divide_board(&[]);
                for d in &division.dividers {
                    let (h, w) = (d.chamber.rows(), d.chamber.cols());
                    let across_rows = d.line.rows() == 1 && d.line.cols() == w;
                    let across_cols = d.line.cols() == 1 && d.line.rows() == h;
                    assert!(d.chamber.contains(d.gap));
                    assert_eq!(across_rows, h >= w, "{rows}x{cols} seed {seed}: {}", d.chamber);
                    assert_eq!(across_cols, h < w, "{rows}x{cols} seed {seed}: {}", d.chamber);
                }
            }
        }
        // A square interior is split across its rows.
        let division = gen_seeded(7, 7, 4).divide_board(&[]);
        let first = division.dividers[0];
        assert_eq!(first.chamber, Range::new(1, 1, 6, 6));
        assert_eq!(first.line.rows(), 1);
        // A wide interior is split across its columns.
        let division = gen_seeded(7, 9, 4).divide_board(&[]);
        let first = division.dividers[0];
        assert_eq!(first.chamber, Range::new(1, 1, 6, 8));
        assert_eq!(first.line.cols(), 1);
    }

    #[test]
    fn leaf_chambers_are_small_and_open() {
        let mut mg = gen_seeded(20, 57, 11);
        let division = mg.divide_board(&[]);
        let walls: HashSet<Point> = division.walls.iter().copied().collect();
        assert!(!division.leaves.is_empty());
        for leaf in &division.leaves {
            assert!(leaf.rows() < MIN_CHAMBER || leaf.cols() < MIN_CHAMBER);
            assert!(leaf.iter().all(|p| !walls.contains(&p)), "chamber {leaf}");
        }
    }

    #[test]
    fn division_skips_excluded_cells() {
        let exclude = [Point::new(0, 3), Point::new(5, 5), Point::new(5, 15)];
        let mut mg = gen_seeded(20, 57, 5);
        let walls = mg.recursive_division(&exclude);
        assert!(exclude.iter().all(|p| !walls.contains(p)));
        let unique: HashSet<_> = walls.iter().collect();
        assert_eq!(unique.len(), walls.len());
    }

    #[test]
    fn tiny_boards_are_all_border() {
        let mut mg = gen_seeded(4, 4, 0);
        let division = mg.divide_board(&[]);
        assert!(division.dividers.is_empty());
        assert_eq!(division.walls.len(), 12);
        assert_eq!(division.leaves, vec![Range::new(1, 1, 3, 3)]);
    }
}
