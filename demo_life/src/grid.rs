/// A fixed-size grid of cells with a one-cell always-dead border on all
/// sides. The border lets neighbor counting use (x|y)-1 and (x|y)+1 without
/// ever indexing out of bounds; it is never exposed to callers and never
/// set alive.
///
/// Coordinates passed to the accessors address the interior only:
/// `0 <= x < width`, `0 <= y < height`. Anything else is a programming
/// error and fails fast.
#[derive(Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    // Scratch buffer for neighbor counts, reused across steps.
    neighbors: Vec<u8>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let padded = (width + 2) * (height + 2);
        Self {
            width,
            height,
            cells: vec![false; padded],
            neighbors: vec![0; padded],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) out of bounds ({}x{})",
            x,
            y,
            self.width,
            self.height
        );
        (y + 1) * (self.width + 2) + (x + 1)
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    pub fn set_alive(&mut self, x: usize, y: usize) {
        let i = self.index(x, y);
        self.cells[i] = true;
    }

    pub fn set_dead(&mut self, x: usize, y: usize) {
        let i = self.index(x, y);
        self.cells[i] = false;
    }

    /// Turns every interior cell dead.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Advances the grid one generation. Neighbor counts are computed in
    /// full from the pre-step grid before any cell is rewritten, so all
    /// cells update simultaneously. A live cell survives on 2 or 3 live
    /// neighbors; a dead cell becomes alive on exactly 3.
    pub fn step(&mut self) {
        let stride = self.width + 2;

        self.neighbors.fill(0);
        for y in 1..=self.height {
            for x in 1..=self.width {
                if !self.cells[y * stride + x] {
                    continue;
                }
                let i = y * stride + x;
                self.neighbors[i - stride - 1] += 1;
                self.neighbors[i - stride] += 1;
                self.neighbors[i - stride + 1] += 1;

                self.neighbors[i - 1] += 1;
                self.neighbors[i + 1] += 1;

                self.neighbors[i + stride - 1] += 1;
                self.neighbors[i + stride] += 1;
                self.neighbors[i + stride + 1] += 1;
            }
        }

        // Only interior cells are rewritten; counts that landed in the
        // border are discarded, and the border itself stays dead.
        for y in 1..=self.height {
            for x in 1..=self.width {
                let i = y * stride + x;
                self.cells[i] = if self.cells[i] {
                    self.neighbors[i] == 2 || self.neighbors[i] == 3
                } else {
                    self.neighbors[i] == 3
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells = vec![];
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.is_alive(x, y) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn block_is_a_still_life() {
        let mut grid = Grid::new(8, 8);
        for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
            grid.set_alive(x, y);
        }
        let before = alive_cells(&grid);
        grid.step();
        assert_eq!(alive_cells(&grid), before);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut grid = Grid::new(8, 8);
        for x in 2..5 {
            grid.set_alive(x, 3);
        }
        let horizontal = alive_cells(&grid);

        grid.step();
        assert_eq!(alive_cells(&grid), vec![(3, 2), (3, 3), (3, 4)]);

        grid.step();
        assert_eq!(alive_cells(&grid), horizontal);
    }

    #[test]
    fn step_is_a_pure_function_of_the_previous_grid() {
        let mut a = Grid::new(10, 10);
        for (x, y) in [(1, 1), (2, 1), (3, 1), (3, 2), (2, 3)] {
            // glider
            a.set_alive(x, y);
        }
        let mut b = a.clone();
        for _ in 0..5 {
            a.step();
            b.step();
            assert_eq!(alive_cells(&a), alive_cells(&b));
        }
    }

    #[test]
    fn clear_then_step_stays_dead() {
        let mut grid = Grid::new(6, 6);
        for x in 0..6 {
            grid.set_alive(x, 2);
        }
        grid.clear();
        grid.step();
        assert!(alive_cells(&grid).is_empty());
    }

    #[test]
    fn border_cells_stay_dead() {
        let mut grid = Grid::new(4, 4);
        // A block in the corner keeps its corner cell alive without ever
        // leaking into the border.
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            grid.set_alive(x, y);
        }
        grid.step();
        assert!(grid.is_alive(0, 0));

        let stride = grid.width + 2;
        for x in 0..stride {
            assert!(!grid.cells[x]); // top border row
            assert!(!grid.cells[(grid.height + 1) * stride + x]); // bottom
        }
        for y in 0..grid.height + 2 {
            assert!(!grid.cells[y * stride]); // left border column
            assert!(!grid.cells[y * stride + stride - 1]); // right
        }
    }

    #[test]
    fn overcrowded_cell_dies() {
        let mut grid = Grid::new(5, 5);
        for (x, y) in [(2, 2), (1, 1), (3, 1), (1, 3), (3, 3)] {
            grid.set_alive(x, y);
        }
        grid.step();
        // Center has 4 neighbors and dies.
        assert!(!grid.is_alive(2, 2));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_access_panics() {
        let mut grid = Grid::new(4, 4);
        grid.set_alive(4, 0);
    }
}
