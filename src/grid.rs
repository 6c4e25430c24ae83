use std::fmt;

use rand::Rng;
use tracing::trace;

use crate::CellOffset;

/// Offsets of the Moore neighborhood, relative to the cell at its center.
///
/// ```notrust
///     (-1, -1)  (0, -1)  (1, -1)
///     (-1,  0)     x     (1,  0)
///     (-1,  1)  (0,  1)  (1,  1)
/// ```
const NEIGHBORHOOD: [(CellOffset, CellOffset); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Rules of Conway's Game of Life (B3/S23).
///
/// 1. Any live cell with two or three live neighbors survives.
/// 2. Any dead cell with three live neighbors becomes a live cell.
/// 3. All other live cells die in the next generation. Similarly, all other dead cells stay dead.
fn rule(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}

/// A fixed size grid of cells, whose edges wrap around to the opposite edge (a torus).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// The cell buffer. Cell `(x, y)` lives at index `y * width + x`.
    cells: Vec<bool>,

    /// Number of columns
    width: usize,

    /// Number of rows
    height: usize,
}

impl Grid {
    /// Create a grid of `width` columns and `height` rows where every cell is dead.
    ///
    /// # Panics
    ///
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0, "grid width must be positive");
        assert!(height > 0, "grid height must be positive");

        Self {
            cells: vec![false; width * height],
            width,
            height,
        }
    }

    /// Create a grid where exactly the given cells are alive. Coordinates wrap like they do in
    /// [`Grid::get`].
    pub fn from_cells<I>(width: usize, height: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = (CellOffset, CellOffset)>,
    {
        let mut grid = Self::new(width, height);

        for (x, y) in cells {
            let i = grid.index(x, y);
            grid.cells[i] = true;
        }

        grid
    }

    /// Create a grid and fill it using the thread local random number generator. See
    /// [`Grid::randomize`].
    pub fn random(width: usize, height: usize, probability: f64) -> Self {
        let mut grid = Self::new(width, height);
        grid.randomize(&mut rand::thread_rng(), probability);

        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Replace the state of every cell: each one is independently alive with the given
    /// probability, and dead otherwise.
    ///
    /// # Panics
    ///
    /// If `probability` is not in `[0, 1]`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) {
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(probability);
        }

        trace!(
            probability,
            population = self.population(),
            "randomized {}x{} grid",
            self.width,
            self.height
        );
    }

    /// State of the cell at `(x, y)`. Any coordinate is valid: `x` is taken modulo the width and
    /// `y` modulo the height, so `(-1, y)` is the last cell of row `y`.
    pub fn get(&self, x: CellOffset, y: CellOffset) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Number of live cells among the 8 cells surrounding `(x, y)`. The cell itself is not
    /// counted.
    pub fn live_neighbors(&self, x: CellOffset, y: CellOffset) -> u8 {
        // Brought into the grid first so the offsets below cannot overflow
        let (x, y) = self.wrap(x, y);

        NEIGHBORHOOD
            .iter()
            .filter(|&&(dx, dy)| self.get(x + dx, y + dy))
            .count() as u8
    }

    /// Compute the following generation.
    ///
    /// Every cell of the result is derived from `self` alone, never from cells already updated
    /// in the same pass.
    pub fn next_generation(&self) -> Grid {
        let mut cells = Vec::with_capacity(self.cells.len());

        for y in 0..self.height as CellOffset {
            for x in 0..self.width as CellOffset {
                cells.push(rule(self.get(x, y), self.live_neighbors(x, y)));
            }
        }

        Grid {
            cells,
            width: self.width,
            height: self.height,
        }
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Coordinates of the live cells, row by row.
    pub fn live_cells(&self) -> impl Iterator<Item = (CellOffset, CellOffset)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell)
            .map(|(i, _)| self.xy_to(i))
    }

    fn xy_to(&self, i: usize) -> (CellOffset, CellOffset) {
        ((i % self.width) as CellOffset, (i / self.width) as CellOffset)
    }

    // The only place coordinates get wrapped
    fn wrap(&self, x: CellOffset, y: CellOffset) -> (CellOffset, CellOffset) {
        (
            x.rem_euclid(self.width as CellOffset),
            y.rem_euclid(self.height as CellOffset),
        )
    }

    fn index(&self, x: CellOffset, y: CellOffset) -> usize {
        let (x, y) = self.wrap(x, y);

        y as usize * self.width + x as usize
    }
}

/// One line per row, `#` for live cells and `.` for dead ones.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }

            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
        }

        Ok(())
    }
}
