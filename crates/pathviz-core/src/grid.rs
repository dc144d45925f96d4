//! The [`Grid`] type: a 2D grid of [`Label`]s mirroring the render surface.
//!
//! The engine keeps one `Grid` as the source of truth for what every cell
//! currently shows. Drivers only ever receive the difference between two
//! successive grids as a [`Frame`].
//!
//! Besides the cells a grid carries one line of free text, the status line,
//! which drivers show next to the board.

use crate::geom::{Point, Range, RangeIter};
use crate::label::Label;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A row-major 2D grid of [`Label`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Label>,
    bounds: Range,
    status: String,
}

impl Grid {
    /// Create a new grid of the given dimensions, every cell [`Label::None`].
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Range::sized(rows, cols);
        Self {
            cells: vec![Label::default(); bounds.len()],
            bounds,
            status: String::new(),
        }
    }

    /// The bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// Whether `p` is inside this grid's bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Read the label at `p`. Returns [`Label::None`] outside bounds.
    pub fn at(&self, p: Point) -> Label {
        self.bounds
            .index(p)
            .map(|i| self.cells[i])
            .unwrap_or_default()
    }

    /// Set the label at `p`. No-op if `p` is outside bounds.
    pub fn set(&mut self, p: Point, label: Label) {
        if let Some(i) = self.bounds.index(p) {
            self.cells[i] = label;
        }
    }

    /// The status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replace the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Set every cell to `label`.
    pub fn fill(&mut self, label: Label) {
        self.cells.fill(label);
    }

    /// Replace each label with `f(point, label)`.
    pub fn map_cells<F: Fn(Point, Label) -> Label>(&mut self, f: F) {
        let bounds = self.bounds;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(bounds.point(i), *cell);
        }
    }

    /// Copy the overlapping region of `src` into `self`, status included.
    pub fn copy_from(&mut self, src: &Grid) {
        let shared = self.bounds.intersect(src.bounds);
        for p in shared {
            self.set(p, src.at(p));
        }
        self.status.clone_from(&src.status);
    }

    /// Whether any cell satisfies `pred`.
    pub fn any(&self, pred: impl Fn(Label) -> bool) -> bool {
        self.cells.iter().any(|&l| pred(l))
    }

    /// Number of cells showing `label`.
    pub fn count(&self, label: Label) -> usize {
        self.cells.iter().filter(|&&l| l == label).count()
    }

    /// Row-major iterator over `(Point, Label)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Point, Label)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: RangeIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Point, Label);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let p = self.inner.next()?;
        Some((p, self.grid.at(p)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub label: Label,
    pub pos: Point,
}

/// A set of label changes (a diff frame).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    /// New status line, if it changed.
    pub status: Option<String>,
    pub rows: i32,
    pub cols: i32,
}

impl Frame {
    /// Whether the frame changes nothing on screen.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.status.is_none()
    }
}

/// Compute the difference between two same-sized grids.
///
/// Returns a [`Frame`] containing only the cells that differ.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let cells = curr
        .iter()
        .filter(|&(p, label)| prev.at(p) != label)
        .map(|(pos, label)| FrameCell { label, pos })
        .collect();
    let status = (prev.status != curr.status).then(|| curr.status.clone());
    Frame {
        cells,
        status,
        rows: curr.rows(),
        cols: curr.cols(),
    }
}

/// A frame repainting every cell of `grid`, used for the first flush.
pub fn full_frame(grid: &Grid) -> Frame {
    Frame {
        cells: grid
            .iter()
            .map(|(pos, label)| FrameCell { label, pos })
            .collect(),
        status: Some(grid.status.clone()),
        rows: grid.rows(),
        cols: grid.cols(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_and_at() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.at(Point::new(0, 0)), Label::None);
    }

    #[test]
    fn grid_set_and_get() {
        let mut g = Grid::new(3, 4);
        g.set(Point::new(1, 2), Label::Wall);
        assert_eq!(g.at(Point::new(1, 2)), Label::Wall);
        // out of bounds is ignored and reads as None
        g.set(Point::new(10, 10), Label::Wall);
        assert_eq!(g.at(Point::new(10, 10)), Label::None);
        assert_eq!(g.count(Label::Wall), 1);
    }

    #[test]
    fn grid_map_cells_clears_transient() {
        let mut g = Grid::new(2, 2);
        g.set(Point::new(0, 0), Label::Visited);
        g.set(Point::new(0, 1), Label::Wall);
        g.set(Point::new(1, 1), Label::ShortestPath);
        assert!(g.any(Label::is_transient));
        g.map_cells(|_, l| if l.is_transient() { Label::None } else { l });
        assert!(!g.any(Label::is_transient));
        assert_eq!(g.at(Point::new(0, 1)), Label::Wall);
    }

    #[test]
    fn grid_copy_from() {
        let mut a = Grid::new(2, 3);
        let mut b = Grid::new(2, 3);
        b.set(Point::new(1, 1), Label::Start);
        a.copy_from(&b);
        assert_eq!(a, b);
    }

    #[test]
    fn compute_frame_diff() {
        let a = Grid::new(2, 3);
        let mut b = Grid::new(2, 3);
        b.set(Point::new(0, 1), Label::Finish);
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Point::new(0, 1));
        assert_eq!(frame.cells[0].label, Label::Finish);
        assert_eq!((frame.rows, frame.cols), (2, 3));
        assert_eq!(frame.status, None);
    }

    #[test]
    fn status_changes_are_diffed() {
        let a = Grid::new(1, 1);
        let mut b = Grid::new(1, 1);
        assert!(compute_frame(&a, &b).is_empty());
        b.set_status("running");
        let frame = compute_frame(&a, &b);
        assert!(frame.cells.is_empty());
        assert_eq!(frame.status.as_deref(), Some("running"));
        let mut c = Grid::new(1, 1);
        c.copy_from(&b);
        assert_eq!(c.status(), "running");
    }

    #[test]
    fn full_frame_covers_grid() {
        let g = Grid::new(2, 3);
        assert_eq!(full_frame(&g).cells.len(), 6);
    }
}
