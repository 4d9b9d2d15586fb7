//! Monte Carlo audit of the odds: repeated independent draws, tallying how often each participant
//! lands each pick. The tallies converge on the exact odds as the number of trials grows.

use tinyrand::Rand;

use crate::draw::{draw_into, FatalError};
use crate::linear::Matrix;
use crate::pool::EntryPool;
use crate::probs::SliceExt;
use crate::scheme::Resolved;

/// Repeats the draw `trials` times, reusing a single pool and podium between trials.
pub struct MonteCarloEngine<'a, R: Rand> {
    resolved: &'a Resolved,
    rand: &'a mut R,
    pool: EntryPool,
    podium: Vec<usize>,
}

impl<'a, R: Rand> MonteCarloEngine<'a, R> {
    pub fn new(resolved: &'a Resolved, rand: &'a mut R) -> Self {
        Self {
            resolved,
            rand,
            pool: EntryPool::new(resolved),
            podium: vec![usize::MAX; resolved.len()],
        }
    }

    /// Runs a single trial, returning the drawn seed indices.
    pub fn run_once(&mut self) -> Result<&[usize], FatalError> {
        self.pool.fill(self.resolved.order(), self.resolved.weights());
        draw_into(&mut self.pool, &mut self.podium, &mut *self.rand)?;
        Ok(self.podium.as_slice())
    }

    /// Adds the outcomes of `trials` draws to `counts`, indexed by `(seed, pick)`.
    pub fn simulate_batch(&mut self, trials: u64, counts: &mut Matrix<u64>) -> Result<(), FatalError> {
        debug_assert_eq!(counts.rows(), self.resolved.len());
        debug_assert_eq!(counts.cols(), self.resolved.len());
        for _ in 0..trials {
            self.run_once()?;
            for (pick, &seed) in self.podium.iter().enumerate() {
                counts[(seed, pick)] += 1;
            }
        }
        Ok(())
    }
}

/// Empirical odds over `trials` draws, laid out like [exact](crate::odds::exact) in seed order.
pub fn simulate(resolved: &Resolved, trials: u64, rand: &mut impl Rand) -> Result<Matrix<f64>, FatalError> {
    let participants = resolved.len();
    let mut counts = Matrix::allocate(participants, participants);
    MonteCarloEngine::new(resolved, rand).simulate_batch(trials, &mut counts)?;

    let mut frequencies = Matrix::allocate(participants, participants);
    for (frequency, &count) in frequencies.flatten_mut().iter_mut().zip(counts.flatten()) {
        *frequency = count as f64;
    }
    if trials > 0 {
        frequencies.flatten_mut().scale(1.0 / trials as f64);
    }
    Ok(frequencies)
}

#[cfg(test)]
mod tests {
    use draftlot_testing::{assert_permutation, assert_slice_f64_absolute};
    use tinyrand::{Seeded, Wyrand};

    use super::*;
    use crate::odds::exact;
    use crate::participant::Participant;
    use crate::scheme::{resolve, DistributionScheme};

    fn league(n: usize) -> Vec<Participant> {
        (0..n).map(|index| Participant::new(format!("m{index}"))).collect()
    }

    #[test]
    fn run_once_yields_permutations() {
        let resolved = resolve(&DistributionScheme::Weighted, &league(6)).unwrap();
        let mut rand = Wyrand::seed(11);
        let mut engine = MonteCarloEngine::new(&resolved, &mut rand);
        for _ in 0..1_000 {
            assert_permutation(6, engine.run_once().unwrap());
        }
    }

    #[test]
    fn counts_cover_every_trial() {
        let resolved = resolve(&DistributionScheme::Straight, &league(4)).unwrap();
        let mut rand = Wyrand::seed(5);
        let mut counts = Matrix::allocate(4, 4);
        MonteCarloEngine::new(&resolved, &mut rand)
            .simulate_batch(500, &mut counts)
            .unwrap();
        for row in &counts {
            assert_eq!(500, row.iter().sum::<u64>());
        }
        for col in 0..4 {
            assert_eq!(500, counts.col(col).sum::<u64>());
        }
    }

    #[test]
    fn frequencies_converge_to_exact() {
        let resolved = resolve(&DistributionScheme::Weighted, &league(5)).unwrap();
        let frequencies = simulate(&resolved, 100_000, &mut Wyrand::seed(17)).unwrap();
        let expected = exact(&resolved.seed_weights());
        assert_slice_f64_absolute(expected.flatten(), frequencies.flatten(), 0.01);
    }

    #[test]
    fn zero_trials() {
        let resolved = resolve(&DistributionScheme::Straight, &league(3)).unwrap();
        let frequencies = simulate(&resolved, 0, &mut Wyrand::seed(1)).unwrap();
        assert!(frequencies.flatten().iter().all(|&frequency| frequency == 0.0));
    }
}
