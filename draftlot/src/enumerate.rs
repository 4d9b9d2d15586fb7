//! Brute-force odds by enumerating every possible draft order. Exponentially expensive; serves as
//! the reference against which the exact odds are verified.

use crate::comb::Orderings;
use crate::linear::Matrix;
use crate::scheme::Weight;

/// Largest league that may be enumerated. `8^8` combinations are walked at this size.
pub const MAX_ENUMERATED: usize = 8;

/// Probability of the draw producing precisely `ordering` (a sequence of indices into `weights`).
pub fn ordering_prob(weights: &[Weight], ordering: &[usize]) -> f64 {
    let mut remaining = weights.iter().map(|&weight| weight as u64).sum::<u64>();
    let mut combined_prob = 1.0;
    for &participant in ordering {
        let weight = weights[participant] as u64;
        combined_prob *= weight as f64 / remaining as f64;
        remaining -= weight;
    }
    combined_prob
}

/// Odds matrix obtained by summing [ordering_prob] over all `N!` orderings. Laid out the same way
/// as [exact](crate::odds::exact).
pub fn exact_by_enumeration(weights: &[Weight]) -> Matrix<f64> {
    let participants = weights.len();
    assert!(
        participants <= MAX_ENUMERATED,
        "enumeration is limited to {MAX_ENUMERATED} participants, got {participants}"
    );
    let mut odds = Matrix::allocate(participants, participants);
    for ordering in Orderings::new(participants) {
        let prob = ordering_prob(weights, &ordering);
        for (pick, &participant) in ordering.iter().enumerate() {
            odds[(participant, pick)] += prob;
        }
    }
    odds
}
