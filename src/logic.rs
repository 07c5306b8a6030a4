use itertools::Itertools;
use varisat::Lit;

/// Clauses pinning the number of true literals among `lits` to exactly `k`.
///
/// Every choice of `k + 1` literals has at least one false, and every choice of `n - k + 1` literals has at least one true.
/// If fewer than `k` literals are given, the result is the empty clause, which no assignment satisfies.
pub(crate) fn exactly(lits: &[Lit], k: usize) -> Vec<Vec<Lit>> {
    if lits.len() < k {
        return vec![Vec::new()];
    }

    let mut clauses = Vec::new();

    // no k + 1 are true; (!A + !B + ...) for each selection
    clauses.extend(lits.iter()
        .combinations(k + 1)
        .map(|selection| selection.into_iter().map(|lit| !*lit).collect_vec())
    );
    // no n - k + 1 are false; (A + B + ...) for each selection
    clauses.extend(lits.iter()
        .combinations(lits.len() - k + 1)
        .map(|selection| selection.into_iter().copied().collect_vec())
    );

    clauses
}

pub(crate) fn exactly_one(lits: &[Lit]) -> Vec<Vec<Lit>> {
    let mut clauses = Vec::with_capacity(lits.len() * (lits.len() + 1) / 2 + 1);

    // no two are true; (!A + !B) * (!A + !C) * ...
    clauses.extend(lits.iter()
        .tuple_combinations()
        .map(|(a, b)| vec![!*a, !*b])
    );
    // at least one is true; A + B + C + ...
    clauses.push(lits.to_vec());

    clauses
}

#[cfg(test)]
mod tests {
    use varisat::Var;

    use super::*;

    fn lits(n: usize) -> Vec<Lit> {
        (0..n).map(|i| Var::from_index(i).positive()).collect_vec()
    }

    fn count_satisfying(n: usize, clauses: &[Vec<Lit>]) -> Vec<usize> {
        // brute force over all assignments; returns the popcount of each satisfying one
        (0..1usize << n)
            .filter(|bits| clauses.iter().all(|clause| clause.iter()
                .any(|lit| (bits >> lit.index() & 1 == 1) == lit.is_positive())))
            .map(|bits| bits.count_ones() as usize)
            .collect_vec()
    }

    #[test]
    fn exactly_k_of_n() {
        for n in 1..=4 {
            for k in 1..=2 {
                let clauses = exactly(&lits(n), k);
                let satisfying = count_satisfying(n, &clauses);

                assert!(satisfying.iter().all(|ones| *ones == k), "n = {n}, k = {k}");
                let expected = if k <= n { (0..n).combinations(k).count() } else { 0 };
                assert_eq!(satisfying.len(), expected, "n = {n}, k = {k}");
            }
        }
    }

    #[test]
    fn two_of_two_is_unit_clauses() {
        let l = lits(2);
        assert_eq!(exactly(&l, 2), vec![vec![l[0]], vec![l[1]]]);
    }

    #[test]
    fn too_few_literals_is_empty_clause() {
        assert_eq!(exactly(&lits(1), 2), vec![Vec::<Lit>::new()]);
        assert_eq!(exactly(&[], 1), vec![Vec::<Lit>::new()]);
    }

    #[test]
    fn exactly_one_matches_general_form() {
        let l = lits(4);
        assert_eq!(exactly_one(&l), exactly(&l, 1));
    }
}
