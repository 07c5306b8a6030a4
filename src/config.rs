use serde::Deserialize;
use strum::{Display, EnumString};

/// How "a selected edge joins two cells of the same color" is written as clauses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EdgeColoring {
    /// One clause per element of the cross product, over all colors, of "this end has the color" and "the other end has the color".
    /// Exponential in the number of colors.
    #[default]
    CrossProduct,
    /// Per color, the edge plus either end having the color implies the other end has it too.
    /// Two clauses per color; equivalent given that every cell has exactly one color.
    Implication,
}

/// What the search adds to the formula after rejecting a candidate which contains a cycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Refinement {
    /// Block the candidate's exact choice of edges, so the next candidate selects a different set of edges.
    BlockModel,
    /// Forbid the cycle that was found, ruling out every candidate containing it.
    #[default]
    ForbidCycle,
}

/// Options for a [`Search`](crate::solver::Search).
///
/// Deserializable so it can be read from a TOML file; missing keys keep their defaults.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SolveConfig {
    /// Encoding of edge-color propagation.
    pub edge_coloring: EdgeColoring,
    /// Formula refinement after a rejected candidate.
    pub refinement: Refinement,
    /// Give up after examining this many candidates. `None` searches until the solver runs out of candidates.
    pub max_candidates: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml() {
        let config: SolveConfig = toml::from_str("max-candidates = 100\n").unwrap();

        assert_eq!(config, SolveConfig { max_candidates: Some(100), ..Default::default() });
        assert_eq!(config.edge_coloring, EdgeColoring::CrossProduct);
        assert_eq!(config.refinement, Refinement::ForbidCycle);
    }

    #[test]
    fn full_toml() {
        let config: SolveConfig = toml::from_str("edge-coloring = \"implication\"\nrefinement = \"block-model\"\n").unwrap();

        assert_eq!(config.edge_coloring, EdgeColoring::Implication);
        assert_eq!(config.refinement, Refinement::BlockModel);
        assert_eq!(config.max_candidates, None);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<SolveConfig>("max_candidates = 3\n").is_err());
    }

    #[test]
    fn names_round_trip() {
        for refinement in [Refinement::BlockModel, Refinement::ForbidCycle] {
            assert_eq!(refinement.to_string().parse::<Refinement>().unwrap(), refinement);
        }
        assert_eq!("cross-product".parse::<EdgeColoring>().unwrap(), EdgeColoring::CrossProduct);
        assert!("sideways".parse::<EdgeColoring>().is_err());
    }
}
