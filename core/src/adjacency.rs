use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Neighbor list of one cell; never more than eight entries.
pub type Neighbors = SmallVec<[Coord2; 8]>;

/// Precomputed neighbor lists for every cell of a grid.
///
/// Cells refer to each other by coordinates only, so the grid graph carries no
/// ownership cycles and a lookup is a single array index.
#[derive(Clone, Debug, PartialEq)]
pub struct Adjacency {
    neighbors: Array2<Neighbors>,
}

impl Adjacency {
    pub fn new(size: Coord2) -> Self {
        let neighbors = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            // shape comes from `Coord` values, so both indices fit back into a `Coord`
            NeighborIter::new((row as Coord, col as Coord), size).collect()
        });
        Self { neighbors }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.neighbors.dim();
        (rows as Coord, cols as Coord)
    }

    /// Neighbors of `coords`; `coords` must be inside the grid.
    pub fn neighbors(&self, coords: Coord2) -> &[Coord2] {
        &self.neighbors[coords.to_nd_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &[Coord2])> {
        self.neighbors
            .indexed_iter()
            .map(|((row, col), list)| ((row as Coord, col as Coord), list.as_slice()))
    }
}
