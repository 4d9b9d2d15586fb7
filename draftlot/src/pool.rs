//! The entry pool: every participant repeated once per ball they hold.

use tinyrand::Rand;

use crate::scheme::{Resolved, Weight};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPool {
    entries: Vec<usize>,
}

impl EntryPool {
    pub fn new(resolved: &Resolved) -> Self {
        let mut pool = Self {
            entries: Vec::with_capacity(resolved.total_weight() as usize),
        };
        pool.fill(resolved.order(), resolved.weights());
        pool
    }

    /// Discards the current entries and refills the pool, reusing its allocation.
    pub fn fill(&mut self, order: &[usize], weights: &[Weight]) {
        debug_assert_eq!(order.len(), weights.len());
        self.entries.clear();
        for (&seed, &weight) in order.iter().zip(weights) {
            self.entries
                .extend(std::iter::repeat(seed).take(weight as usize));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    /// Number of entries held by the participant at `seed`.
    pub fn count(&self, seed: usize) -> usize {
        self.entries.iter().filter(|&&entry| entry == seed).count()
    }

    /// Draws one entry uniformly and removes every remaining entry of the drawn participant.
    /// Returns `None` if the pool is empty.
    pub fn draw(&mut self, rand: &mut impl Rand) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rand.next_lim_u64(self.entries.len() as u64) as usize;
        let seed = self.entries[index];
        self.entries.retain(|&entry| entry != seed);
        Some(seed)
    }
}

impl From<Vec<usize>> for EntryPool {
    fn from(entries: Vec<usize>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use tinyrand::{Seeded, Wyrand};

    use super::*;
    use crate::participant::participants;
    use crate::scheme::{resolve, CustomDistribution, DistributionScheme};

    #[test]
    fn weighted_pool() {
        let league = participants(&["a", "b", "c", "d"]);
        let resolved = resolve(&DistributionScheme::Weighted, &league).unwrap();
        let pool = EntryPool::new(&resolved);
        assert_eq!(10, pool.len());
        assert_eq!(&[0, 0, 0, 0, 1, 1, 1, 2, 2, 3], pool.entries());
    }

    #[test]
    fn custom_pool_follows_custom_order() {
        let league = participants(&["a", "b", "c"]);
        let scheme = DistributionScheme::Custom(CustomDistribution {
            order: participants(&["b", "c", "a"]),
            balls: vec![2, 1, 3],
        });
        let resolved = resolve(&scheme, &league).unwrap();
        let pool = EntryPool::new(&resolved);
        assert_eq!(&[1, 1, 2, 0, 0, 0], pool.entries());
        assert_eq!(3, pool.count(0));
        assert_eq!(2, pool.count(1));
        assert_eq!(1, pool.count(2));
    }

    #[test]
    fn draw_removes_whole_block() {
        let mut pool = EntryPool::from(vec![0, 0, 0, 1, 1, 2]);
        let mut rand = Wyrand::seed(7);
        let first = pool.draw(&mut rand).unwrap();
        assert_eq!(0, pool.count(first));
        assert!(pool.len() < 6);
        let second = pool.draw(&mut rand).unwrap();
        let third = pool.draw(&mut rand).unwrap();
        assert!(pool.is_empty());
        let mut drawn = vec![first, second, third];
        drawn.sort();
        assert_eq!(vec![0, 1, 2], drawn);
        assert_eq!(None, pool.draw(&mut rand));
    }

    #[test]
    fn refill_reuses_pool() {
        let mut pool = EntryPool::from(vec![5]);
        pool.fill(&[1, 0], &[1, 2]);
        assert_eq!(&[1, 0, 0], pool.entries());
    }
}
