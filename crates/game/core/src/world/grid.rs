//! Hex grid storage and bounded reachability.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::error::{ErrorSeverity, GameError};

/// Axial hex coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// `(dx, dy)` offsets of the six neighbors, in the order they are reported.
    pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] =
        [(-1, 1), (0, 1), (1, 0), (1, -1), (0, -1), (-1, 0)];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn adjacents(self) -> [Position; 6] {
        Self::NEIGHBOR_OFFSETS.map(|(dx, dy)| Position::new(self.x + dx, self.y + dy))
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.adjacents().contains(&other)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Addressing failures. These indicate a programmer error, never a bad move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    #[error("row {y} does not exist")]
    MissingRow { y: i32 },

    #[error("hex {position} is outside its row")]
    OutOfBounds { position: Position },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRow { .. } => "grid_missing_row",
            Self::OutOfBounds { .. } => "grid_out_of_bounds",
        }
    }
}

/// One map row. Negative x lives in `left_reversed` so `x = -1` is index 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldRow<T> {
    pub left_reversed: Vec<T>,
    pub right: Vec<T>,
}

impl<T> WorldRow<T> {
    pub fn new(left_reversed: Vec<T>, right: Vec<T>) -> Self {
        Self {
            left_reversed,
            right,
        }
    }

    fn slot(&self, x: i32) -> Option<&T> {
        if x >= 0 {
            self.right.get(x as usize)
        } else {
            self.left_reversed.get(x.unsigned_abs() as usize - 1)
        }
    }

    fn slot_mut(&mut self, x: i32) -> Option<&mut T> {
        if x >= 0 {
            self.right.get_mut(x as usize)
        } else {
            self.left_reversed.get_mut(x.unsigned_abs() as usize - 1)
        }
    }
}

/// Mapping from [`Position`] to `T` over a fixed set of rows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World<T> {
    rows: Vec<WorldRow<T>>,
}

impl<T> World<T> {
    pub fn new(rows: Vec<WorldRow<T>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[WorldRow<T>] {
        &self.rows
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        if pos.y < 0 {
            return None;
        }
        self.rows.get(pos.y as usize)?.slot(pos.x)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Overwrites an existing hex. The grid never grows.
    pub fn set(&mut self, pos: Position, value: T) -> Result<(), GridError> {
        let row = usize::try_from(pos.y)
            .ok()
            .and_then(|y| self.rows.get_mut(y))
            .ok_or(GridError::MissingRow { y: pos.y })?;
        let slot = row
            .slot_mut(pos.x)
            .ok_or(GridError::OutOfBounds { position: pos })?;
        *slot = value;
        Ok(())
    }

    /// Every hex, row by row: non-negative x ascending, then negative x descending.
    pub fn list_hexes(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            let y = y as i32;
            let right = row
                .right
                .iter()
                .enumerate()
                .map(move |(x, value)| (Position::new(x as i32, y), value));
            let left = row
                .left_reversed
                .iter()
                .enumerate()
                .map(move |(negx, value)| (Position::new(-(negx as i32) - 1, y), value));
            right.chain(left)
        })
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> World<U> {
        let rows = self
            .rows
            .iter()
            .map(|row| WorldRow {
                left_reversed: row.left_reversed.iter().map(&mut f).collect(),
                right: row.right.iter().map(&mut f).collect(),
            })
            .collect();
        World { rows }
    }

    /// In-bounds neighbors of `pos`, in [`Position::NEIGHBOR_OFFSETS`] order.
    pub fn get_adjacents(&self, pos: Position) -> Vec<(Position, &T)> {
        pos.adjacents()
            .into_iter()
            .filter_map(|adj| self.get(adj).map(|value| (adj, value)))
            .collect()
    }

    /// Breadth-first search bounded to `limit` hops.
    ///
    /// `start` is always part of the result. Every other hex is entered only
    /// if `passable` accepts it; hexes exactly `limit` hops away are reported
    /// but not expanded. Each hex appears once, in nondecreasing hop order.
    pub fn bfs(
        &self,
        start: Position,
        limit: u32,
        passable: impl Fn(&T) -> bool,
    ) -> Result<Vec<(Position, &T)>, GridError> {
        let start_value = self.get(start).ok_or(GridError::OutOfBounds { position: start })?;

        let mut visited: HashSet<Position> = HashSet::new();
        let mut queue: VecDeque<(Position, &T, u32)> = VecDeque::new();
        let mut result = Vec::new();
        queue.push_back((start, start_value, 0));

        while let Some((pos, value, distance)) = queue.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            result.push((pos, value));

            if distance >= limit {
                continue;
            }
            for (adj, adj_value) in self.get_adjacents(pos) {
                if !visited.contains(&adj) && passable(adj_value) {
                    queue.push_back((adj, adj_value, distance + 1));
                }
            }
        }

        Ok(result)
    }
}
