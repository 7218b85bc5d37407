use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
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

/// Row-major index of `coords` inside a grid of `size`, matching the `Array2` layout `[x, y]`.
pub const fn flat_index(coords: Coord2, size: Coord2) -> usize {
    coords.0 as usize * size.1 as usize + coords.1 as usize
}

pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

pub trait AreaIterExt {
    /// Positions within Chebyshev distance `radius` of `index`, center excluded, clipped to the grid.
    fn iter_area(&self, index: Coord2, radius: Coord) -> AreaIter;

    /// The classic 8-neighborhood.
    fn iter_neighbors(&self, index: Coord2) -> AreaIter {
        self.iter_area(index, 1)
    }
}

impl<T> AreaIterExt for Array2<T> {
    fn iter_area(&self, index: Coord2, radius: Coord) -> AreaIter {
        let dim = self.dim();
        let size = (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        );
        AreaIter::new(index, radius, size)
    }
}

/// Iterator over the square neighborhood of a cell.
///
/// Walks column by column (`x` outer, `y` inner) and never yields the center or an out-of-bounds position.
#[derive(Clone, Debug)]
pub struct AreaIter {
    center: Coord2,
    x_end: Coord,
    y_start: Coord,
    y_end: Coord,
    cursor: Option<Coord2>,
}

impl AreaIter {
    pub fn new(center: Coord2, radius: Coord, bounds: Coord2) -> Self {
        let (x, y) = center;
        let (max_x, max_y) = bounds;

        let cursor_and_ends = (max_x > 0 && max_y > 0)
            .then(|| {
                let x_start = x.saturating_sub(radius);
                let x_end = x.saturating_add(radius).min(max_x - 1);
                let y_start = y.saturating_sub(radius);
                let y_end = y.saturating_add(radius).min(max_y - 1);
                (x_start <= x_end && y_start <= y_end)
                    .then_some(((x_start, y_start), x_end, y_end))
            })
            .flatten();

        match cursor_and_ends {
            Some((start, x_end, y_end)) => Self {
                center,
                x_end,
                y_start: start.1,
                y_end,
                cursor: Some(start),
            },
            None => Self {
                center,
                x_end: 0,
                y_start: 0,
                y_end: 0,
                cursor: None,
            },
        }
    }

    fn advance(&mut self, (x, y): Coord2) {
        self.cursor = if y < self.y_end {
            Some((x, y + 1))
        } else if x < self.x_end {
            Some((x + 1, self.y_start))
        } else {
            None
        };
    }
}

impl Iterator for AreaIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.cursor?;
            self.advance(current);

            if current != self.center {
                return Some(current);
            }
        }
    }
}
