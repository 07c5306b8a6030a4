use varisat::{Lit, Var};

/// A complete truth assignment, as produced by the SAT solver.
///
/// Variables the solver did not report read as false.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// Collect `lits` into a dense assignment over `var_count` variables.
    /// Literals of variables beyond `var_count` are ignored.
    pub fn from_lits(lits: &[Lit], var_count: usize) -> Self {
        let mut values = vec![false; var_count];
        for lit in lits {
            if let Some(value) = values.get_mut(lit.index()) {
                *value = lit.is_positive();
            }
        }

        Self { values }
    }

    /// The value assigned to `var`.
    #[inline]
    pub fn value(&self, var: Var) -> bool {
        self.values.get(var.index()).copied().unwrap_or(false)
    }

    /// The literal of `var` which is true under this assignment.
    pub fn lit(&self, var: Var) -> Lit {
        var.lit(self.value(var))
    }

    /// The number of variables covered by this assignment.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this assignment covers no variables at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every literal true under this assignment, in variable order.
    pub fn lits(&self) -> impl Iterator<Item = Lit> + '_ {
        self.values.iter().enumerate().map(|(index, value)| Var::from_index(index).lit(*value))
    }
}
