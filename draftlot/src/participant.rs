//! A [Participant] is a league manager taking part in the lottery. Participants are opaque names;
//! their position in the league's manager list (the _seed order_) is what the engine indexes by.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Deserialized names are parsed with [FromStr], so they arrive trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Participant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<Participant> for String {
    fn from(participant: Participant) -> Self {
        participant.0
    }
}

impl TryFrom<String> for Participant {
    type Error = anyhow::Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_str(&name)
    }
}

impl FromStr for Participant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            bail!("participant name cannot be blank");
        }
        Ok(Self::new(trimmed))
    }
}

/// Converts a list of names into participants, preserving their order.
pub fn participants<S: AsRef<str>>(names: &[S]) -> Vec<Participant> {
    names.iter().map(|name| Participant::new(name.as_ref())).collect()
}
