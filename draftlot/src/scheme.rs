//! Distribution schemes and their resolution into a concrete `(order, weights)` pair.
//!
//! Resolution is the only place where lottery input is validated. A [Resolved] value is therefore
//! a witness that every participant appears exactly once and holds at least one ball; the draw and
//! odds engines rely on it and do not re-check.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::participant::Participant;

/// Number of balls held by a participant.
pub type Weight = u32;

/// Upper bound on league size accepted by the engine. Exact odds are computed over every subset of
/// participants, so this bounds their cost.
pub const MAX_PARTICIPANTS: usize = 20;

/// Upper bound on the balls held by one participant. Every ball occupies a slot in the entry pool.
pub const MAX_BALLS: Weight = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    Straight,
    Weighted,
    Custom,
}

/// Caller-supplied ball allocation. The arrays are parallel and may be ordered independently of the
/// league's seed order. Ball counts are signed so that values mid-edit can be represented and
/// rejected, rather than wrapped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomDistribution {
    #[serde(default)]
    pub order: Vec<Participant>,
    #[serde(default)]
    pub balls: Vec<i64>,
}

impl CustomDistribution {
    pub fn is_empty(&self) -> bool {
        self.order.is_empty() && self.balls.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DistributionScheme {
    Straight,
    Weighted,
    Custom(CustomDistribution),
}

impl DistributionScheme {
    pub fn kind(&self) -> SchemeKind {
        match self {
            DistributionScheme::Straight => SchemeKind::Straight,
            DistributionScheme::Weighted => SchemeKind::Weighted,
            DistributionScheme::Custom(_) => SchemeKind::Custom,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("no participants to draw from")]
    NoParticipants,

    #[error("{participants} participants exceed the limit of {max}")]
    TooManyParticipants { participants: usize, max: usize },

    #[error("participant '{0}' is listed more than once in the league")]
    DuplicateParticipant(Participant),

    #[error("custom distribution has not been set up")]
    Unconfigured,

    #[error("custom distribution has {order} participants and {balls} ball counts for a league of {participants}")]
    LengthMismatch {
        participants: usize,
        order: usize,
        balls: usize,
    },

    #[error("participant '{0}' in the custom order is not in the league")]
    UnknownParticipant(Participant),

    #[error("participant '{0}' appears more than once in the custom order")]
    RepeatedInOrder(Participant),

    #[error("participant '{participant}' has {balls} balls; at least 1 is required")]
    NonPositiveWeight { participant: Participant, balls: i64 },

    #[error("participant '{participant}' has {balls} balls; at most {max} are allowed")]
    TooManyBalls {
        participant: Participant,
        balls: i64,
        max: Weight,
    },
}

/// A validated ball allocation. `order` holds seed indices in pool-construction order and
/// `weights` is parallel to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    participants: Vec<Participant>,
    order: Vec<usize>,
    weights: Vec<Weight>,
}

impl Resolved {
    /// Validates an explicit allocation against the league's seed-ordered `participants`.
    pub fn try_new(
        participants: &[Participant],
        order: &[Participant],
        balls: &[i64],
    ) -> Result<Self, ConfigurationError> {
        let seeds = index_seeds(participants)?;
        if order.is_empty() && balls.is_empty() {
            return Err(ConfigurationError::Unconfigured);
        }
        if order.len() != participants.len() || balls.len() != participants.len() {
            return Err(ConfigurationError::LengthMismatch {
                participants: participants.len(),
                order: order.len(),
                balls: balls.len(),
            });
        }

        let mut seen = FxHashSet::default();
        let mut indices = Vec::with_capacity(order.len());
        let mut weights = Vec::with_capacity(order.len());
        for (participant, &balls) in order.iter().zip(balls) {
            let &seed = seeds
                .get(participant)
                .ok_or_else(|| ConfigurationError::UnknownParticipant(participant.clone()))?;
            if !seen.insert(seed) {
                return Err(ConfigurationError::RepeatedInOrder(participant.clone()));
            }
            if balls < 1 {
                return Err(ConfigurationError::NonPositiveWeight {
                    participant: participant.clone(),
                    balls,
                });
            }
            if balls > MAX_BALLS as i64 {
                return Err(ConfigurationError::TooManyBalls {
                    participant: participant.clone(),
                    balls,
                    max: MAX_BALLS,
                });
            }
            indices.push(seed);
            weights.push(balls as Weight);
        }

        Ok(Self {
            participants: participants.to_vec(),
            order: indices,
            weights,
        })
    }

    fn seeded(participants: &[Participant], weights: Vec<Weight>) -> Result<Self, ConfigurationError> {
        index_seeds(participants)?;
        Ok(Self {
            participants: participants.to_vec(),
            order: (0..participants.len()).collect(),
            weights,
        })
    }

    /// Participants in seed order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Seed indices in the order the entry pool is built.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Weights parallel to [order](Self::order).
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    /// Weights indexed by seed position.
    pub fn seed_weights(&self) -> Vec<Weight> {
        let mut seed_weights = vec![0; self.len()];
        for (&seed, &weight) in self.order.iter().zip(&self.weights) {
            seed_weights[seed] = weight;
        }
        seed_weights
    }

    pub fn weight_of(&self, seed: usize) -> Weight {
        self.order
            .iter()
            .position(|&index| index == seed)
            .map(|position| self.weights[position])
            .unwrap_or(0)
    }

    /// Total number of balls in the entry pool.
    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&weight| weight as u64).sum()
    }
}

fn index_seeds(participants: &[Participant]) -> Result<FxHashMap<&Participant, usize>, ConfigurationError> {
    if participants.is_empty() {
        return Err(ConfigurationError::NoParticipants);
    }
    if participants.len() > MAX_PARTICIPANTS {
        return Err(ConfigurationError::TooManyParticipants {
            participants: participants.len(),
            max: MAX_PARTICIPANTS,
        });
    }
    let mut seeds = FxHashMap::default();
    for (seed, participant) in participants.iter().enumerate() {
        if seeds.insert(participant, seed).is_some() {
            return Err(ConfigurationError::DuplicateParticipant(participant.clone()));
        }
    }
    Ok(seeds)
}

/// Resolves `scheme` against the league's seed-ordered `participants`.
pub fn resolve(
    scheme: &DistributionScheme,
    participants: &[Participant],
) -> Result<Resolved, ConfigurationError> {
    let n = participants.len() as Weight;
    match scheme {
        DistributionScheme::Straight => Resolved::seeded(participants, vec![1; participants.len()]),
        DistributionScheme::Weighted => Resolved::seeded(participants, (1..=n).rev().collect()),
        DistributionScheme::Custom(custom) => {
            Resolved::try_new(participants, &custom.order, &custom.balls)
        }
    }
}
