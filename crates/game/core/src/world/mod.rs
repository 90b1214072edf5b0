//! Hex map: generic grid storage, cell contents, and the fixed map template.
mod cell;
mod grid;
mod template;

pub use cell::{Cell, SageId, Terrain, WorldObject};
pub use grid::{GridError, Position, World, WorldRow};
pub use template::{DEFAULT_MAP, TemplateTile, default_template, parse_template};

/// Hexes reachable from `start` within `limit` hops that a move may end on.
///
/// A hex with any object is never a landing hex, though previously visited
/// hexes can still be passed through when `passable` allows it.
pub fn list_cells_can_reach_and_end_turn_there<'w>(
    world: &'w World<Cell>,
    start: Position,
    limit: u32,
    passable: impl Fn(&Cell) -> bool,
) -> Result<Vec<(Position, &'w Cell)>, GridError> {
    Ok(world
        .bfs(start, limit, passable)?
        .into_iter()
        .filter(|(_, cell)| cell.is_free())
        .collect())
}

/// The target hex if a move from `start` may end there.
pub fn can_reach_and_end_turn_there<'w>(
    world: &'w World<Cell>,
    start: Position,
    end: Position,
    limit: u32,
    passable: impl Fn(&Cell) -> bool,
) -> Result<Option<&'w Cell>, GridError> {
    Ok(
        list_cells_can_reach_and_end_turn_there(world, start, limit, passable)?
            .into_iter()
            .find(|(pos, _)| *pos == end)
            .map(|(_, cell)| cell),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> World<Cell> {
        World::new(vec![WorldRow::new(
            vec![],
            vec![
                Cell::new(Terrain::Plains),
                Cell::new(Terrain::Plains).with_object(WorldObject::PreviouslyVisited {
                    turn_number: 1,
                }),
                Cell::new(Terrain::Plains),
                Cell::new(Terrain::Plains).with_object(WorldObject::Market),
                Cell::new(Terrain::Plains),
            ],
        )])
    }

    fn walkable(cell: &Cell) -> bool {
        match &cell.object {
            Some(object) => matches!(object, WorldObject::PreviouslyVisited { .. }),
            None => cell.terrain == Terrain::Plains,
        }
    }

    #[test]
    fn passes_through_visited_hexes_but_never_lands_on_objects() {
        let world = strip();
        let landing: Vec<_> =
            list_cells_can_reach_and_end_turn_there(&world, Position::new(0, 0), 4, walkable)
                .unwrap()
                .into_iter()
                .map(|(p, _)| p)
                .collect();
        assert_eq!(landing, vec![Position::new(0, 0), Position::new(2, 0)]);
    }

    #[test]
    fn single_target_lookup() {
        let world = strip();
        let start = Position::new(0, 0);
        assert!(
            can_reach_and_end_turn_there(&world, start, Position::new(2, 0), 2, walkable)
                .unwrap()
                .is_some()
        );
        assert!(
            can_reach_and_end_turn_there(&world, start, Position::new(2, 0), 1, walkable)
                .unwrap()
                .is_none()
        );
        assert!(
            can_reach_and_end_turn_there(&world, start, Position::new(4, 0), 9, walkable)
                .unwrap()
                .is_none()
        );
    }
}
