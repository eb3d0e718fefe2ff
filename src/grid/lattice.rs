//! Padded vertex lattice shared by all tilings.
//!
//! Vertices are addressed as `(row, col, corner)`: `row ∈ [-1, rows]`,
//! `col ∈ [-1, cols]` and `corner < multiplicity`. The extra row/column on
//! every side lets cells at the rectangle edge reference their right and
//! lower neighbours without bounds special cases. Storage is row-major, so
//! iterating [`Lattice::vertices_mut`] visits rows top to bottom and, within a
//! row, cells left to right with their corners in order.
use crate::error::GeometryError;
use crate::polygon::Vertex;
use nalgebra::Point2;

/// Padding cells on each side of the logical grid.
pub const PAD: isize = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    rows: usize,
    cols: usize,
    multiplicity: usize,
    vertices: Vec<Vertex>,
}

impl Lattice {
    /// Lattice of `rows × cols` logical cells owning `multiplicity` vertices
    /// each, plus padding. All vertices start at the origin.
    pub fn new(rows: usize, cols: usize, multiplicity: usize) -> Self {
        let len = (rows + 2) * (cols + 2) * multiplicity;
        Self {
            rows,
            cols,
            multiplicity,
            vertices: vec![Point2::origin(); len],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    #[inline]
    fn row_stride(&self) -> usize {
        (self.cols + 2) * self.multiplicity
    }

    /// Storage offset of `(row, col, corner)`, or `None` outside the padding.
    pub fn offset(&self, row: isize, col: isize, corner: usize) -> Option<usize> {
        let r = row + PAD;
        let c = col + PAD;
        if r < 0 || c < 0 || corner >= self.multiplicity {
            return None;
        }
        let (r, c) = (r as usize, c as usize);
        if r >= self.rows + 2 || c >= self.cols + 2 {
            return None;
        }
        Some(r * self.row_stride() + c * self.multiplicity + corner)
    }

    pub fn get(&self, row: isize, col: isize, corner: usize) -> Result<Vertex, GeometryError> {
        self.offset(row, col, corner)
            .map(|i| self.vertices[i])
            .ok_or(GeometryError::LatticeIndex { row, col, corner })
    }

    pub fn set(
        &mut self,
        row: isize,
        col: isize,
        corner: usize,
        v: Vertex,
    ) -> Result<(), GeometryError> {
        let i = self
            .offset(row, col, corner)
            .ok_or(GeometryError::LatticeIndex { row, col, corner })?;
        self.vertices[i] = v;
        Ok(())
    }

    /// Every `(row, col)` including the padding ring, in storage order.
    pub fn padded_cells(&self) -> impl Iterator<Item = (isize, isize)> {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        (-PAD..rows + PAD).flat_map(move |r| (-PAD..cols + PAD).map(move |c| (r, c)))
    }

    /// Cells that emit polygons: the logical grid plus the leading padding
    /// row and column. Each references at most one row/column further down
    /// and right, which the trailing padding covers.
    pub fn render_cells(&self) -> impl Iterator<Item = (isize, isize)> {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        (-PAD..rows).flat_map(move |r| (-PAD..cols).map(move |c| (r, c)))
    }

    pub fn render_cell_count(&self) -> usize {
        (self.rows + 1) * (self.cols + 1)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// View of one cell for neighbour-relative lookups.
    pub fn cell(&self, row: isize, col: isize) -> CellRef<'_> {
        CellRef {
            lattice: self,
            row,
            col,
        }
    }
}

/// A cell position with lookups relative to it.
#[derive(Clone, Copy, Debug)]
pub struct CellRef<'a> {
    lattice: &'a Lattice,
    pub row: isize,
    pub col: isize,
}

impl CellRef<'_> {
    /// Corner `corner` of the cell `dr` rows below and `dc` columns right.
    #[inline]
    pub fn at(&self, dr: isize, dc: isize, corner: usize) -> Result<Vertex, GeometryError> {
        self.lattice.get(self.row + dr, self.col + dc, corner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_cover_padding_exactly() {
        let lattice = Lattice::new(2, 3, 4);
        assert_eq!(lattice.vertices().len(), 4 * 5 * 4);
        assert_eq!(lattice.offset(-1, -1, 0), Some(0));
        assert_eq!(lattice.offset(2, 3, 3), Some(lattice.vertices().len() - 1));
        assert_eq!(lattice.offset(-2, 0, 0), None);
        assert_eq!(lattice.offset(0, 4, 0), None);
        assert_eq!(lattice.offset(0, 0, 4), None);
    }

    #[test]
    fn padded_cells_follow_storage_order() {
        let lattice = Lattice::new(2, 2, 1);
        let offsets: Vec<usize> = lattice
            .padded_cells()
            .map(|(r, c)| lattice.offset(r, c, 0).expect("inside padding"))
            .collect();
        assert_eq!(offsets, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn render_cells_reach_only_padded_neighbours() {
        let lattice = Lattice::new(3, 2, 2);
        assert_eq!(lattice.render_cells().count(), lattice.render_cell_count());
        for (r, c) in lattice.render_cells() {
            let cell = lattice.cell(r, c);
            for (dr, dc) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                for corner in 0..2 {
                    assert!(cell.at(dr, dc, corner).is_ok());
                }
            }
        }
    }
}
