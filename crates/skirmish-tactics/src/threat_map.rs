//! Grid danger map over the arena.
//!
//! Two layers: a persistent layer fed by hits we take (never decreases within
//! a round), and a transient layer rebuilt from the current enemy snapshot on
//! every query (never stored).

use rand::Rng;

use skirmish_core::types::{Arena, Point};

use crate::enemy_model::EnemySnapshot;

/// Row/column of a grid cell. Row 0 covers `y` in `[0, cell_height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Total danger per cell for one tick, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DangerGrid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl DangerGrid {
    /// `None` for a cell outside the grid.
    pub fn get(&self, cell: CellIndex) -> Option<f64> {
        offset(self.rows, self.cols, cell).map(|i| self.values[i])
    }

    /// Cells with their danger in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, f64)> + '_ {
        let cols = self.cols;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (CellIndex::new(i / cols, i % cols), *v))
    }

    /// Lowest-danger cell; the first one in row-major order wins ties.
    pub fn min_cell(&self) -> CellIndex {
        let mut best = CellIndex::new(0, 0);
        let mut best_danger = f64::INFINITY;
        for (cell, danger) in self.iter() {
            if danger < best_danger {
                best_danger = danger;
                best = cell;
            }
        }
        best
    }
}

/// Danger accumulator for one agent.
#[derive(Debug, Clone)]
pub struct ThreatMap {
    rows: usize,
    cols: usize,
    cell_width: f64,
    cell_height: f64,
    hit_danger: f64,
    persistent: Vec<f64>,
}

impl ThreatMap {
    /// `rows` and `cols` must be non-zero; `EngineConfig::validate` enforces it.
    pub fn new(arena: Arena, rows: usize, cols: usize, hit_danger: f64) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            cell_width: arena.width / cols as f64,
            cell_height: arena.height / rows as f64,
            hit_danger,
            persistent: vec![0.0; rows * cols],
        }
    }

    /// Cell containing `p`. Total: anything off the grid, NaN included,
    /// clamps to the nearest edge cell.
    pub fn cell_of(&self, p: Point) -> CellIndex {
        CellIndex::new(
            axis_index(p.y, self.cell_height, self.rows),
            axis_index(p.x, self.cell_width, self.cols),
        )
    }

    /// Record a hit taken at `p`. Returns the cell that was marked.
    pub fn record_hit(&mut self, p: Point) -> CellIndex {
        let cell = self.cell_of(p);
        let i = self.index(cell);
        self.persistent[i] += self.hit_danger;
        tracing::debug!(row = cell.row, col = cell.col, "hit recorded");
        cell
    }

    /// Accumulated hit danger of `cell`, `None` outside the grid.
    pub fn persistent(&self, cell: CellIndex) -> Option<f64> {
        offset(self.rows, self.cols, cell).map(|i| self.persistent[i])
    }

    /// Persistent danger plus the energy of every enemy in each cell.
    pub fn danger_snapshot(&self, enemies: &EnemySnapshot<'_>) -> DangerGrid {
        let mut values = self.persistent.clone();
        for enemy in enemies.iter() {
            let cell = self.cell_of(enemy.position);
            values[self.index(cell)] += enemy.energy;
        }
        DangerGrid {
            rows: self.rows,
            cols: self.cols,
            values,
        }
    }

    pub fn safest_cell(&self, enemies: &EnemySnapshot<'_>) -> CellIndex {
        self.danger_snapshot(enemies).min_cell()
    }

    pub fn cell_center(&self, cell: CellIndex) -> Point {
        Point::new(
            (cell.col as f64 + 0.5) * self.cell_width,
            (cell.row as f64 + 0.5) * self.cell_height,
        )
    }

    /// Cell center offset by up to a quarter cell on each axis.
    pub fn jittered_point_in<R: Rng + ?Sized>(&self, cell: CellIndex, rng: &mut R) -> Point {
        let center = self.cell_center(cell);
        let dx = (rng.gen::<f64>() - 0.5) * self.cell_width / 2.0;
        let dy = (rng.gen::<f64>() - 0.5) * self.cell_height / 2.0;
        center + Point::new(dx, dy)
    }

    /// Drop all hit history. Called at round boundaries only.
    pub fn reset(&mut self) {
        self.persistent.iter_mut().for_each(|v| *v = 0.0);
    }

    /// Row-major index of a cell produced by `cell_of`, which is always in range.
    fn index(&self, cell: CellIndex) -> usize {
        cell.row * self.cols + cell.col
    }
}

fn offset(rows: usize, cols: usize, cell: CellIndex) -> Option<usize> {
    (cell.row < rows && cell.col < cols).then(|| cell.row * cols + cell.col)
}

fn axis_index(v: f64, cell_size: f64, count: usize) -> usize {
    if v.is_nan() || v <= 0.0 {
        return 0;
    }
    let i = (v / cell_size).floor();
    if i >= count as f64 {
        count - 1
    } else {
        i as usize
    }
}
