/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row/column offsets of the eight surrounding cells, in row-major order.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays inside `bounds`.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Walks the in-bounds neighbors of a cell without allocating.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
