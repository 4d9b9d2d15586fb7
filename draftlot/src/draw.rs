//! Without-replacement draws from the [EntryPool].

use std::fmt::{Display, Formatter};

use thiserror::Error;
use tinyrand::Rand;

use crate::participant::Participant;
use crate::pool::EntryPool;
use crate::scheme::Resolved;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FatalError {
    #[error("entry pool exhausted after {picked} of {expected} picks")]
    PoolExhausted { picked: usize, expected: usize },
}

/// The realised draft order. Picks are held as seed indices alongside the participants they refer
/// to; pick 1 is at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftOrder {
    seeds: Vec<usize>,
    picks: Vec<Participant>,
}

impl DraftOrder {
    pub fn seeds(&self) -> &[usize] {
        &self.seeds
    }

    pub fn picks(&self) -> &[Participant] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// The 0-based pick held by the participant at `seed`.
    pub fn pick_of(&self, seed: usize) -> Option<usize> {
        self.seeds.iter().position(|&drafted| drafted == seed)
    }
}

impl Display for DraftOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (pick, participant) in self.picks.iter().enumerate() {
            if pick != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}. {participant}", pick + 1)?;
        }
        Ok(())
    }
}

/// Fills `podium` with successive draws from `pool`. The pool is consumed in the process. Fails if
/// the pool runs dry before the podium is full.
pub fn draw_into(
    pool: &mut EntryPool,
    podium: &mut [usize],
    rand: &mut impl Rand,
) -> Result<(), FatalError> {
    for rank in 0..podium.len() {
        podium[rank] = pool.draw(rand).ok_or(FatalError::PoolExhausted {
            picked: rank,
            expected: podium.len(),
        })?;
    }
    Ok(())
}

/// Draws a complete draft order for `resolved`.
pub fn draw(resolved: &Resolved, rand: &mut impl Rand) -> Result<DraftOrder, FatalError> {
    let mut pool = EntryPool::new(resolved);
    let mut seeds = vec![0; resolved.len()];
    draw_into(&mut pool, &mut seeds, rand)?;
    let picks = seeds
        .iter()
        .map(|&seed| resolved.participants()[seed].clone())
        .collect();
    Ok(DraftOrder { seeds, picks })
}
