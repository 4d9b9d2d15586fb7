//! Running a lottery end to end: odds are derived from the resolved allocation, then the draft order
//! is drawn. The outcome is immutable once returned.

use tinyrand::Rand;

use crate::draw::{draw, DraftOrder, FatalError};
use crate::odds::{check_tolerance, Odds, ToleranceBreach, TOLERANCE};
use crate::participant::Participant;
use crate::scheme::{Resolved, Weight};

#[derive(Debug, Clone, PartialEq)]
pub struct Lottery {
    participants: Vec<Participant>,
    weights: Vec<Weight>,
    draft_order: DraftOrder,
    odds: Odds,
    diagnostics: Vec<ToleranceBreach>,
}

/// One line of the audit: a drafted participant and the odds they had.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<'a> {
    /// 0-based pick.
    pub pick: usize,
    pub participant: &'a Participant,
    pub seed: usize,
    pub weight: Weight,
    pub first_pick_odds: f64,
    pub this_pick_odds: f64,
}

/// Runs the lottery for `resolved`. Odds do not depend on `rand`; only the draft order does.
pub fn run(resolved: &Resolved, rand: &mut impl Rand) -> Result<Lottery, FatalError> {
    let odds = Odds::compute(resolved);
    let diagnostics = check_tolerance(&odds.exact, TOLERANCE);
    let draft_order = draw(resolved, rand)?;
    Ok(Lottery {
        participants: resolved.participants().to_vec(),
        weights: resolved.seed_weights(),
        draft_order,
        odds,
        diagnostics,
    })
}

impl Lottery {
    /// Participants in seed order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Weights in seed order.
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&weight| weight as u64).sum()
    }

    pub fn draft_order(&self) -> &DraftOrder {
        &self.draft_order
    }

    pub fn odds(&self) -> &Odds {
        &self.odds
    }

    pub fn diagnostics(&self) -> &[ToleranceBreach] {
        &self.diagnostics
    }

    /// Audit entries in pick order.
    pub fn entries(&self) -> Vec<Entry<'_>> {
        self.draft_order
            .seeds()
            .iter()
            .enumerate()
            .map(|(pick, &seed)| Entry {
                pick,
                participant: &self.participants[seed],
                seed,
                weight: self.weights[seed],
                first_pick_odds: self.odds.simplified[seed],
                this_pick_odds: self.odds.exact[(seed, pick)],
            })
            .collect()
    }
}
