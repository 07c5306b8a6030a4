use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use varisat::Var;

use crate::location::{Dimension, Location};
use crate::shape::{SquareStep, Step};
use crate::variable::VariableIndex;

/// The grid as an undirected graph: one node per cell, one edge per pair of neighboring cells, weighted by that edge's variable.
///
/// Built once from the board dimensions and only read afterwards.
#[derive(Clone, Debug)]
pub struct Adjacency {
    graph: UnGraphMap<Location, Var>,
    dims: (Dimension, Dimension),
}

impl Adjacency {
    /// Lay out every cell and every edge of a board of size `dims`, numbered according to `index`.
    pub fn new(dims: (Dimension, Dimension), index: &VariableIndex) -> Self {
        let (width, height) = (dims.0.get(), dims.1.get());
        let mut graph = UnGraphMap::with_capacity(
            width * height,
            // horizontal edges, then vertical edges
            (width - 1) * height + (height - 1) * width,
        );

        for (y, x) in (0..height).cartesian_product(0..width) {
            graph.add_node(Location(x, y));
        }

        for location in graph.nodes().collect_vec() {
            // add edges down and to the right, if possible
            for direction in SquareStep::FORWARD_VARIANTS {
                if let (Some(var), Some(neighbor)) = (index.edge(location, *direction), direction.step_within(location, dims)) {
                    graph.add_edge(location, neighbor, var);
                }
            }
        }

        Self { graph, dims }
    }

    /// Every `(edge variable, neighbor)` pair of `location`, in the order right, down, left, up.
    /// Edges which would leave the board are absent.
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item = (Var, Location)> + '_ {
        SquareStep::VARIANTS.iter().filter_map(move |direction| {
            let neighbor = direction.step_within(location, self.dims)?;
            Some((*self.graph.edge_weight(location, neighbor)?, neighbor))
        })
    }

    /// Every cell, row by row.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.graph.nodes()
    }

    /// Every edge variable on the board.
    pub fn edge_vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.graph.all_edges().map(|(_, _, var)| *var)
    }

    /// Board dimensions in `(x, y)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }
}
