use std::collections::HashSet;

use ndarray::Array2;
use varisat::Var;

use crate::adjacency::Adjacency;
use crate::model::Model;

/// Look for a closed loop among the edges selected by `model`, returning its edge variables if one exists.
///
/// Each unvisited cell starts a walk which repeatedly leaves the current cell by a selected edge other than the one it arrived by.
/// Running into an edge already used by the same walk means the walk went around a loop.
/// This relies on every cell having at most two selected edges, which the encoding guarantees;
/// then the selected edges split into simple paths and simple cycles, and one walk per component suffices.
pub fn find_cycle(model: &Model, adjacency: &Adjacency) -> Option<Vec<Var>> {
    let (width, height) = (adjacency.dims().0.get(), adjacency.dims().1.get());
    let mut visited = Array2::from_elem((height, width), false);

    for start in adjacency.locations() {
        if visited[start.as_index()] {
            continue;
        }
        visited[start.as_index()] = true;

        let mut used = HashSet::new();
        let mut walk = Vec::new();
        let mut current = start;
        let mut last = None;

        while let Some((var, neighbor)) = adjacency.neighbors(current)
            .find(|(var, _)| model.value(*var) && Some(*var) != last) {
            if !used.insert(var) {
                return Some(walk);
            }
            walk.push(var);

            visited[neighbor.as_index()] = true;
            current = neighbor;
            last = Some(var);
        }
    }

    None
}

/// Whether the edges selected by `model` are free of closed loops.
pub fn is_acyclic(model: &Model, adjacency: &Adjacency) -> bool {
    find_cycle(model, adjacency).is_none()
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use itertools::Itertools;
    use varisat::Lit;

    use super::*;
    use crate::location::Location;
    use crate::shape::SquareStep;
    use crate::variable::VariableIndex;

    fn setup(width: usize, height: usize) -> (VariableIndex, Adjacency) {
        let dims = (NonZero::new(width).unwrap(), NonZero::new(height).unwrap());
        let index = VariableIndex::new(dims, 1);
        (index, Adjacency::new(dims, &index))
    }

    fn select(index: &VariableIndex, edges: &[(Location, SquareStep)]) -> Model {
        let lits = edges.iter()
            .map(|(location, direction)| index.edge(*location, *direction).unwrap().positive())
            .collect_vec();
        Model::from_lits(&lits, index.var_count())
    }

    #[test]
    fn square_loop() {
        let (index, adjacency) = setup(3, 3);
        // a loop around the bottom right 2x2 block, plus an unrelated path along the top
        let model = select(&index, &[
            (Location(0, 0), SquareStep::Right),
            (Location(1, 0), SquareStep::Right),
            (Location(1, 1), SquareStep::Right),
            (Location(2, 1), SquareStep::Down),
            (Location(2, 2), SquareStep::Left),
            (Location(1, 2), SquareStep::Up),
        ]);

        let cycle = find_cycle(&model, &adjacency).unwrap();
        let expected = [
            (Location(1, 1), SquareStep::Right),
            (Location(2, 1), SquareStep::Down),
            (Location(2, 2), SquareStep::Left),
            (Location(1, 2), SquareStep::Up),
        ].map(|(location, direction)| index.edge(location, direction).unwrap());

        assert_eq!(cycle.len(), 4);
        assert!(expected.iter().all(|var| cycle.contains(var)));
        assert!(!is_acyclic(&model, &adjacency));
    }

    #[test]
    fn paths_only() {
        let (index, adjacency) = setup(3, 2);
        // a snake through every cell
        let model = select(&index, &[
            (Location(0, 0), SquareStep::Right),
            (Location(1, 0), SquareStep::Right),
            (Location(2, 0), SquareStep::Down),
            (Location(2, 1), SquareStep::Left),
            (Location(1, 1), SquareStep::Left),
        ]);

        assert_eq!(find_cycle(&model, &adjacency), None);
        // repeatable
        assert!(is_acyclic(&model, &adjacency));
        assert!(is_acyclic(&model, &adjacency));
    }

    #[test]
    fn nothing_selected() {
        let (index, adjacency) = setup(2, 2);
        let model = Model::from_lits(&Vec::<Lit>::new(), index.var_count());

        assert!(is_acyclic(&model, &adjacency));
    }
}
