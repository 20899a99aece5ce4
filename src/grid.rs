// grid.rs - Toroidal cell grid with incremental neighbor bookkeeping

/// One button+LED cell.
///
/// `live_neighbors` is maintained incrementally by [`Grid::flip`] and is never
/// recomputed by a full neighbor scan during a tick. The controller's
/// `pending_toggle` flag also lives here so a tick can walk the grid once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub alive: bool,
    pub pending_toggle: bool,
    pub live_neighbors: u8,
}

/// 0-indexed grid position, `x` across columns, `y` down rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Coordinate { x, y }
    }
}

// The eight neighbor offsets around a cell.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// True (never negative) modulo, so -1 wraps to m - 1.
fn wrap(value: isize, modulus: usize) -> usize {
    let m = modulus as isize;
    (((value % m) + m) % m) as usize
}

/// W×H cell store with toroidal topology: the grid has no edges, every cell
/// has exactly eight neighbors.
///
/// The grid does no locking of its own; the automaton controller serializes
/// all access.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>, // row-major, y * width + x
}

impl Grid {
    /// Creates an all-dead grid. Dimensions are fixed for the grid's lifetime.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Grid {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: Coordinate) -> usize {
        debug_assert!(self.contains(coord));
        coord.y * self.width + coord.x
    }

    pub fn cell(&self, coord: Coordinate) -> &Cell {
        &self.cells[self.index(coord)]
    }

    pub fn cell_mut(&mut self, coord: Coordinate) -> &mut Cell {
        let index = self.index(coord);
        &mut self.cells[index]
    }

    /// The eight toroidal neighbors of `coord`, wrapped modulo (W, H).
    pub fn neighbors(&self, coord: Coordinate) -> [Coordinate; 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| {
            Coordinate::new(
                wrap(coord.x as isize + dx, self.width),
                wrap(coord.y as isize + dy, self.height),
            )
        })
    }

    /// Toggles `alive` at `coord` and adjusts each neighbor's count by ±1.
    ///
    /// This is the sole mutator of `live_neighbors`, which keeps the
    /// invariant: every cell's count equals the number of its eight toroidal
    /// neighbors currently alive.
    pub fn flip(&mut self, coord: Coordinate) {
        let index = self.index(coord);
        let now_alive = !self.cells[index].alive;
        self.cells[index].alive = now_alive;

        for neighbor in self.neighbors(coord) {
            let neighbor_index = self.index(neighbor);
            let count = &mut self.cells[neighbor_index].live_neighbors;
            if now_alive {
                *count += 1;
            } else {
                *count -= 1;
            }
        }
    }

    /// Resets every cell to dead with zeroed bookkeeping.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// All coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }

    /// Row-major alive flags, for rendering and assertions.
    pub fn alive_cells(&self) -> Vec<bool> {
        self.cells.iter().map(|cell| cell.alive).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Brute-force recount, for checking the incremental bookkeeping against.
    fn recount(grid: &Grid, coord: Coordinate) -> u8 {
        grid.neighbors(coord)
            .iter()
            .filter(|&&n| grid.cell(n).alive)
            .count() as u8
    }

    fn assert_counts_consistent(grid: &Grid) {
        for coord in grid.coordinates() {
            assert_eq!(
                grid.cell(coord).live_neighbors,
                recount(grid, coord),
                "neighbor count mismatch at ({}, {})",
                coord.x,
                coord.y
            );
        }
    }

    #[test]
    fn corner_neighbors_wrap_toroidally() {
        let grid = Grid::new(16, 16);
        let neighbors = grid.neighbors(Coordinate::new(0, 0));

        for expected in [
            Coordinate::new(15, 15),
            Coordinate::new(15, 0),
            Coordinate::new(0, 15),
            Coordinate::new(1, 15),
            Coordinate::new(15, 1),
        ] {
            assert!(
                neighbors.contains(&expected),
                "({}, {}) missing from corner neighbor set",
                expected.x,
                expected.y
            );
        }
    }

    #[test]
    fn every_cell_has_eight_distinct_neighbors() {
        let grid = Grid::new(16, 8);
        for coord in grid.coordinates() {
            let mut neighbors = grid.neighbors(coord).to_vec();
            neighbors.sort();
            neighbors.dedup();
            assert_eq!(neighbors.len(), 8);
            assert!(!neighbors.contains(&coord));
        }
    }

    #[test]
    fn flip_maintains_neighbor_counts() {
        let mut grid = Grid::new(16, 16);

        // A scattered flip sequence, including re-flips and wrap positions.
        let sequence = [
            (0, 0),
            (15, 15),
            (0, 15),
            (7, 7),
            (8, 7),
            (7, 8),
            (0, 0), // back to dead
            (1, 0),
            (15, 0),
        ];
        for (x, y) in sequence {
            grid.flip(Coordinate::new(x, y));
            assert_counts_consistent(&grid);
        }
    }

    #[test]
    fn flip_twice_restores_dead_state() {
        let mut grid = Grid::new(16, 16);
        let coord = Coordinate::new(3, 4);

        grid.flip(coord);
        assert!(grid.cell(coord).alive);
        grid.flip(coord);
        assert!(!grid.cell(coord).alive);
        assert_counts_consistent(&grid);
    }

    #[test]
    fn clear_resets_all_bookkeeping() {
        let mut grid = Grid::new(8, 8);
        grid.flip(Coordinate::new(1, 1));
        grid.flip(Coordinate::new(2, 2));
        grid.clear();

        for coord in grid.coordinates() {
            assert_eq!(*grid.cell(coord), Cell::default());
        }
    }
}
