//! Variation operators over allocation vectors.
//!
//! Crossover and mutation operate on the raw `Plan`; neither preserves the
//! derived candidate state, so callers re-evaluate the result. Reproduction is
//! handled by the engine as a pass-through of an already evaluated candidate.

use rand::prelude::*;

use super::plan::Plan;

/// Seeded random number generator owning the variation operators.
pub struct PlanRng {
    rng: StdRng,
}

impl PlanRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with an entropy-derived seed.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen()
    }

    /// A uniform index in `[0, n)`.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// A uniform value in `[0, high)`.
    #[inline]
    pub fn density_below(&mut self, high: f64) -> f64 {
        self.rng.gen_range(0.0..high)
    }

    /// Pick one entry of a non-empty slice.
    #[inline]
    pub fn choose(&mut self, values: &[f64]) -> f64 {
        *values.choose(&mut self.rng).expect("non-empty slice")
    }

    /// Two-point crossover: exchange the segment between two distinct cuts.
    ///
    /// The combined multiset of allocation values across the two children
    /// equals the combined multiset across the two parents. Dwelling totals
    /// and density bounds of the individual children are not preserved.
    pub fn crossover(&mut self, a: &Plan, b: &Plan) -> (Plan, Plan) {
        assert_eq!(a.len(), b.len(), "parents must cover the same zones");
        let size = a.len();

        let mut first = a.clone();
        let mut second = b.clone();
        if size < 2 {
            return (first, second);
        }

        let mut lo = self.rng.gen_range(0..size);
        let mut hi = self.rng.gen_range(0..size - 1);
        if hi >= lo {
            hi += 1;
        } else {
            std::mem::swap(&mut lo, &mut hi);
        }

        for i in lo..hi {
            std::mem::swap(&mut first.dwellings[i], &mut second.dwellings[i]);
        }
        (first, second)
    }

    /// Shuffle mutation: select positions independently with probability
    /// `p_element`, then randomly permute the values at exactly those
    /// positions. The allocation total is preserved by construction.
    pub fn mutate(&mut self, parent: &Plan, p_element: f64) -> Plan {
        let mut child = parent.clone();

        let selected: Vec<usize> = (0..child.len())
            .filter(|_| self.rng.gen_bool(p_element))
            .collect();
        if selected.len() < 2 {
            return child;
        }

        let mut values: Vec<u32> = selected.iter().map(|&i| child.dwellings[i]).collect();
        values.shuffle(&mut self.rng);
        for (&i, value) in selected.iter().zip(values) {
            child.dwellings[i] = value;
        }
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut values: Vec<u32>) -> Vec<u32> {
        values.sort_unstable();
        values
    }

    #[test]
    fn crossover_preserves_length_and_combined_multiset() {
        let mut rng = PlanRng::new(7);
        let a = Plan {
            dwellings: vec![5, 0, 12, 3, 9, 1],
        };
        let b = Plan {
            dwellings: vec![2, 8, 0, 0, 4, 11],
        };

        for _ in 0..50 {
            let (c1, c2) = rng.crossover(&a, &b);
            assert_eq!(c1.len(), a.len());
            assert_eq!(c2.len(), b.len());

            let mut parents: Vec<u32> = a.dwellings.clone();
            parents.extend(&b.dwellings);
            let mut children: Vec<u32> = c1.dwellings.clone();
            children.extend(&c2.dwellings);
            assert_eq!(sorted(parents), sorted(children));
        }
    }

    #[test]
    fn crossover_swaps_positionally() {
        // Per index, each child slot holds one of the two parent values.
        let mut rng = PlanRng::new(3);
        let a = Plan {
            dwellings: vec![1, 2, 3, 4, 5],
        };
        let b = Plan {
            dwellings: vec![10, 20, 30, 40, 50],
        };
        let (c1, c2) = rng.crossover(&a, &b);
        for i in 0..a.len() {
            let pair = [c1.dwellings[i], c2.dwellings[i]];
            assert!(pair.contains(&a.dwellings[i]));
            assert!(pair.contains(&b.dwellings[i]));
        }
    }

    #[test]
    fn mutation_preserves_total_and_multiset() {
        let mut rng = PlanRng::new(11);
        let parent = Plan {
            dwellings: vec![7, 0, 3, 14, 2, 9, 0, 5],
        };
        for _ in 0..50 {
            let child = rng.mutate(&parent, 0.5);
            assert_eq!(child.len(), parent.len());
            assert_eq!(child.total_dwellings(), parent.total_dwellings());
            assert_eq!(sorted(child.dwellings), sorted(parent.dwellings.clone()));
        }
    }

    #[test]
    fn zero_probability_mutation_is_identity() {
        let mut rng = PlanRng::new(1);
        let parent = Plan {
            dwellings: vec![4, 4, 2, 8],
        };
        assert_eq!(rng.mutate(&parent, 0.0), parent);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn crossover_combined_multiset_holds(
                seed in 0u64..1_000,
                left in prop::collection::vec(0u32..500, 2..40),
            ) {
                let right: Vec<u32> = left.iter().map(|v| v.wrapping_mul(3) % 400).collect();
                let a = Plan { dwellings: left };
                let b = Plan { dwellings: right };
                let mut rng = PlanRng::new(seed);

                let (c1, c2) = rng.crossover(&a, &b);
                let mut parents = a.dwellings.clone();
                parents.extend(&b.dwellings);
                let mut children = c1.dwellings.clone();
                children.extend(&c2.dwellings);
                prop_assert_eq!(sorted(parents), sorted(children));
            }

            #[test]
            fn mutation_total_holds(
                seed in 0u64..1_000,
                dwellings in prop::collection::vec(0u32..500, 1..40),
                p in 0.0f64..1.0,
            ) {
                let parent = Plan { dwellings };
                let mut rng = PlanRng::new(seed);
                let child = rng.mutate(&parent, p);
                prop_assert_eq!(child.total_dwellings(), parent.total_dwellings());
                prop_assert_eq!(sorted(child.dwellings), sorted(parent.dwellings));
            }
        }
    }
}
