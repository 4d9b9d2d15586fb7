//! Odds of each participant landing each pick.
//!
//! Two figures are produced side by side. The _simplified_ odds are the naive share of the pool,
//! `weight / total`, and are only meaningful for the first pick. The _exact_ odds account for the
//! removal of a winner's entire block of balls after every pick, which shifts the conditional
//! distribution of everyone still in the pool.
//!
//! The exact calculation works over sets of already-drawn participants rather than over orderings.
//! Let `reach(S)` be the probability that the first `|S|` picks are exactly the members of `S`, in
//! any order. Starting from `reach(∅) = 1`, each participant `p ∉ S` is drawn next with probability
//! `weight(p) / (total - weight(S))`; that mass is credited to `p` at pick `|S| + 1` and carried into
//! `reach(S ∪ {p})`. Sets are visited in increasing bitmask order, so every subset is complete
//! before its supersets are expanded. The cost is `O(2^N · N)` against `O(N!)` for enumeration.

use std::fmt::{Display, Formatter};

use crate::linear::Matrix;
use crate::probs::MatrixExt;
use crate::scheme::{Resolved, Weight, MAX_PARTICIPANTS};

/// Largest acceptable deviation of an exact row or column sum from 1.
pub const TOLERANCE: f64 = 0.005;

/// Simplified first-pick odds: each participant's share of the pool.
pub fn simplified(weights: &[Weight]) -> Vec<f64> {
    let total = weights.iter().map(|&weight| weight as u64).sum::<u64>() as f64;
    weights
        .iter()
        .map(|&weight| weight as f64 / total)
        .collect()
}

/// Exact odds matrix. Row `p` corresponds to `weights[p]`; column `k` is the 0-based pick.
pub fn exact(weights: &[Weight]) -> Matrix<f64> {
    let participants = weights.len();
    assert!(
        participants <= MAX_PARTICIPANTS,
        "exact odds are limited to {MAX_PARTICIPANTS} participants, got {participants}"
    );
    let total = weights.iter().map(|&weight| weight as u64).sum::<u64>();
    let mut odds = Matrix::allocate(participants, participants);
    let sets = 1usize << participants;
    let mut reach = vec![0.0; sets];
    reach[0] = 1.0;

    // the full set is never expanded: nobody is left to draw
    for set in 0..sets - 1 {
        let prob = reach[set];
        if prob == 0.0 {
            continue;
        }
        let pick = set.count_ones() as usize;
        let drawn = (0..participants)
            .filter(|&participant| set & (1 << participant) != 0)
            .map(|participant| weights[participant] as u64)
            .sum::<u64>();
        let remaining = (total - drawn) as f64;
        for participant in 0..participants {
            let bit = 1 << participant;
            if set & bit == 0 {
                let next = prob * weights[participant] as f64 / remaining;
                odds[(participant, pick)] += next;
                reach[set | bit] += next;
            }
        }
    }
    odds
}

/// Both odds figures for a resolved allocation, with rows in seed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Odds {
    pub simplified: Vec<f64>,
    pub exact: Matrix<f64>,
}

impl Odds {
    pub fn compute(resolved: &Resolved) -> Self {
        let weights = resolved.seed_weights();
        Self {
            simplified: simplified(&weights),
            exact: exact(&weights),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A participant's odds across all picks, by seed index.
    Participant(usize),
    /// All participants' odds for a pick, 0-based.
    Pick(usize),
}

/// A row or column of the exact matrix whose sum strays from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ToleranceBreach {
    pub axis: Axis,
    pub sum: f64,
}

impl Display for ToleranceBreach {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.axis {
            Axis::Participant(seed) => write!(f, "odds for participant #{} sum to {:.6}", seed + 1, self.sum),
            Axis::Pick(pick) => write!(f, "odds for pick {} sum to {:.6}", pick + 1, self.sum),
        }
    }
}

/// Reports every row and column of `odds` whose sum deviates from 1 by more than `tolerance`.
pub fn check_tolerance(odds: &Matrix<f64>, tolerance: f64) -> Vec<ToleranceBreach> {
    let rows = odds
        .row_sums()
        .into_iter()
        .enumerate()
        .map(|(seed, sum)| ToleranceBreach {
            axis: Axis::Participant(seed),
            sum,
        });
    let cols = odds
        .col_sums()
        .into_iter()
        .enumerate()
        .map(|(pick, sum)| ToleranceBreach {
            axis: Axis::Pick(pick),
            sum,
        });
    rows.chain(cols)
        .filter(|breach| (breach.sum - 1.0).abs() > tolerance)
        .collect()
}
