use std::collections::HashMap;

/// A quadratic unconstrained binary optimization problem in coefficient-map form.
///
/// Each entry `(p, q) -> c` contributes `c * x[p] * x[q]` to the energy of an
/// assignment; entries with `p == q` act as linear terms. Entries at the same
/// key accumulate: [`Qubo::add`] never overwrites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Qubo {
    num_variables: usize,
    terms: HashMap<(usize, usize), f64>,
}

impl Qubo {
    pub fn new(num_variables: usize) -> Self {
        Self {
            num_variables,
            terms: HashMap::new(),
        }
    }

    pub fn with_capacity(num_variables: usize, capacity: usize) -> Self {
        Self {
            num_variables,
            terms: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn add(&mut self, p: usize, q: usize, value: f64) {
        debug_assert!(
            p < self.num_variables && q < self.num_variables,
            "QUBO key ({p}, {q}) out of range for {} variables",
            self.num_variables
        );
        *self.terms.entry((p, q)).or_insert(0.0) += value;
    }

    /// Coefficient stored at `(p, q)`, or zero when the key is absent.
    pub fn get(&self, p: usize, q: usize) -> f64 {
        self.terms.get(&(p, q)).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, p: usize, q: usize) -> bool {
        self.terms.contains_key(&(p, q))
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Number of stored entries, including explicit zeros.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.terms.iter().map(|(&key, &value)| (key, value))
    }

    /// Evaluates `Σ c[(p,q)] * x[p] * x[q]` over every stored entry.
    ///
    /// # Panics
    ///
    /// Panics if `assignment` is shorter than [`Qubo::num_variables`].
    pub fn energy(&self, assignment: &[bool]) -> f64 {
        assert!(
            assignment.len() >= self.num_variables,
            "assignment has {} entries but the QUBO has {} variables",
            assignment.len(),
            self.num_variables
        );
        self.terms
            .iter()
            .filter(|&(&(p, q), _)| assignment[p] && assignment[q])
            .map(|(_, &c)| c)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_at_shared_keys() {
        let mut qubo = Qubo::new(2);
        qubo.add(0, 1, 1.5);
        qubo.add(0, 1, -0.5);
        qubo.add(1, 0, 2.0);

        assert_eq!(qubo.get(0, 1), 1.0);
        assert_eq!(qubo.get(1, 0), 2.0);
        assert_eq!(qubo.len(), 2);
    }

    #[test]
    fn get_returns_zero_for_absent_key() {
        let qubo = Qubo::new(3);
        assert_eq!(qubo.get(2, 1), 0.0);
        assert!(!qubo.contains(2, 1));
        assert!(qubo.is_empty());
    }

    #[test]
    fn explicit_zero_entries_are_kept() {
        let mut qubo = Qubo::new(1);
        qubo.add(0, 0, 0.0);
        assert!(qubo.contains(0, 0));
        assert_eq!(qubo.len(), 1);
    }

    #[test]
    fn energy_sums_linear_and_quadratic_terms_of_active_variables() {
        let mut qubo = Qubo::new(3);
        qubo.add(0, 0, -1.0);
        qubo.add(1, 1, 2.0);
        qubo.add(2, 2, -3.0);
        qubo.add(0, 2, 0.5);
        qubo.add(2, 0, 0.25);
        qubo.add(0, 1, 10.0);

        assert_eq!(qubo.energy(&[false, false, false]), 0.0);
        assert_eq!(qubo.energy(&[true, false, false]), -1.0);
        assert_eq!(qubo.energy(&[true, false, true]), -1.0 - 3.0 + 0.5 + 0.25);
        assert_eq!(qubo.energy(&[true, true, false]), -1.0 + 2.0 + 10.0);
    }

    #[test]
    #[should_panic]
    fn energy_panics_on_short_assignment() {
        let qubo = Qubo::new(2);
        qubo.energy(&[true]);
    }
}
