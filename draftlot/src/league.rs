//! League definitions as persisted in JSON: a name, the managers in seed order, and the ball
//! distribution to draw with.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::participant::Participant;
use crate::scheme::{resolve, ConfigurationError, CustomDistribution, DistributionScheme, Resolved, SchemeKind};

pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 18;
pub const MAX_LEAGUES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub name: String,
    pub num_teams: usize,
    pub managers: Vec<Participant>,
    #[serde(default = "default_distribution")]
    pub distribution: SchemeKind,
    #[serde(default)]
    pub custom_distribution: CustomDistribution,
}

fn default_distribution() -> SchemeKind {
    SchemeKind::Straight
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidLeague {
    #[error("league name cannot be blank")]
    BlankName,

    #[error("league '{name}' has {teams} teams; between {MIN_TEAMS} and {MAX_TEAMS} are required")]
    TeamCount { name: String, teams: usize },

    #[error("league '{name}' declares {declared} teams but lists {actual} managers")]
    TeamCountMismatch {
        name: String,
        declared: usize,
        actual: usize,
    },

    #[error("league '{name}' has a blank manager name")]
    BlankManager { name: String },

    #[error("league '{name}' lists manager '{manager}' more than once")]
    DuplicateManager { name: String, manager: Participant },
}

impl League {
    /// A league drawn with the straight distribution.
    pub fn new(name: impl Into<String>, managers: Vec<Participant>) -> Self {
        Self {
            name: name.into(),
            num_teams: managers.len(),
            managers,
            distribution: SchemeKind::Straight,
            custom_distribution: CustomDistribution::default(),
        }
    }

    pub fn validate(&self) -> Result<(), InvalidLeague> {
        if self.name.trim().is_empty() {
            return Err(InvalidLeague::BlankName);
        }
        let teams = self.managers.len();
        if !(MIN_TEAMS..=MAX_TEAMS).contains(&teams) {
            return Err(InvalidLeague::TeamCount {
                name: self.name.clone(),
                teams,
            });
        }
        if self.num_teams != teams {
            return Err(InvalidLeague::TeamCountMismatch {
                name: self.name.clone(),
                declared: self.num_teams,
                actual: teams,
            });
        }
        let mut seen = FxHashSet::default();
        for manager in &self.managers {
            if manager.name().trim().is_empty() {
                return Err(InvalidLeague::BlankManager {
                    name: self.name.clone(),
                });
            }
            if !seen.insert(manager) {
                return Err(InvalidLeague::DuplicateManager {
                    name: self.name.clone(),
                    manager: manager.clone(),
                });
            }
        }
        Ok(())
    }

    /// The league's configured distribution scheme.
    pub fn scheme(&self) -> DistributionScheme {
        self.scheme_as(self.distribution)
    }

    /// The distribution scheme of the given `kind`, drawing custom allocations from this league.
    pub fn scheme_as(&self, kind: SchemeKind) -> DistributionScheme {
        match kind {
            SchemeKind::Straight => DistributionScheme::Straight,
            SchemeKind::Weighted => DistributionScheme::Weighted,
            SchemeKind::Custom => DistributionScheme::Custom(self.custom_distribution.clone()),
        }
    }

    pub fn resolve(&self) -> Result<Resolved, ConfigurationError> {
        resolve(&self.scheme(), &self.managers)
    }
}

/// The contents of a league file: either a single league or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeagueFile {
    Many(Vec<League>),
    One(League),
}

impl LeagueFile {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let league_file = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("cannot parse {}", path.display()))?;
        Ok(league_file)
    }

    pub fn leagues(&self) -> &[League] {
        match self {
            LeagueFile::Many(leagues) => leagues.as_slice(),
            LeagueFile::One(league) => std::slice::from_ref(league),
        }
    }

    /// Picks the league called `name`, or the first league if no name is given, and validates it.
    pub fn select(&self, name: Option<&str>) -> anyhow::Result<League> {
        let leagues = self.leagues();
        if leagues.len() > MAX_LEAGUES {
            bail!("{} leagues defined; at most {MAX_LEAGUES} are supported", leagues.len());
        }
        let league = match name {
            None => leagues.first().context("no leagues defined")?,
            Some(name) => leagues
                .iter()
                .find(|league| league.name == name)
                .with_context(|| {
                    let names = leagues
                        .iter()
                        .map(|league| league.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("no league named '{name}' (available: {names})")
                })?,
        };
        league.validate()?;
        Ok(league.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::participants;

    const LEAGUES_JSON: &str = r#"[
        {
            "name": "Dynasty",
            "num_teams": 4,
            "managers": ["Ann", "Ben", "Cat", "Dan"],
            "distribution": "custom",
            "custom_distribution": {
                "order": ["Dan", "Cat", "Ben", "Ann"],
                "balls": [10, 6, 3, 1]
            }
        },
        {
            "name": "Redraft",
            "num_teams": 3,
            "managers": ["Xi", "Yu", "Zo"],
            "distribution": "weighted",
            "custom_distribution": {}
        }
    ]"#;

    fn parse(json: &str) -> LeagueFile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parse_many() {
        let file = parse(LEAGUES_JSON);
        assert_eq!(2, file.leagues().len());
        let dynasty = file.select(Some("Dynasty")).unwrap();
        assert_eq!(SchemeKind::Custom, dynasty.distribution);
        let resolved = dynasty.resolve().unwrap();
        assert_eq!(vec![1, 3, 6, 10], resolved.seed_weights());

        let redraft = file.select(Some("Redraft")).unwrap();
        assert!(redraft.custom_distribution.is_empty());
        assert_eq!(&[3, 2, 1], redraft.resolve().unwrap().weights());
    }

    #[test]
    fn parse_one_with_defaults() {
        let file = parse(r#"{"name": "Solo", "num_teams": 2, "managers": ["A", "B"]}"#);
        let league = file.select(None).unwrap();
        assert_eq!(SchemeKind::Straight, league.distribution);
        assert_eq!(&[1, 1], league.resolve().unwrap().weights());
    }

    #[test]
    fn parse_trims_manager_names() {
        let file = parse(
            r#"{
                "name": "Padded",
                "num_teams": 2,
                "managers": [" Ann ", "Ben"],
                "distribution": "custom",
                "custom_distribution": {"order": ["Ben ", "Ann"], "balls": [2, 1]}
            }"#,
        );
        let league = file.select(None).unwrap();
        assert_eq!(participants(&["Ann", "Ben"]), league.managers);
        assert_eq!(vec![1, 2], league.resolve().unwrap().seed_weights());
    }

    #[test]
    fn parse_rejects_blank_manager() {
        let json = r#"{"name": "Gap", "num_teams": 2, "managers": ["Ann", " "]}"#;
        assert!(serde_json::from_str::<LeagueFile>(json).is_err());
    }

    #[test]
    fn oversized_custom_balls_fail_to_resolve() {
        let file = parse(
            r#"{
                "name": "Typo",
                "num_teams": 2,
                "managers": ["a", "b"],
                "distribution": "custom",
                "custom_distribution": {"order": ["a", "b"], "balls": [4294967295, 1]}
            }"#,
        );
        let league = file.select(None).unwrap();
        assert!(matches!(
            league.resolve(),
            Err(ConfigurationError::TooManyBalls { balls: 4_294_967_295, .. })
        ));
    }

    #[test]
    fn select_first_by_default() {
        assert_eq!("Dynasty", parse(LEAGUES_JSON).select(None).unwrap().name);
    }

    #[test]
    fn select_unknown() {
        let err = parse(LEAGUES_JSON).select(Some("Keeper")).unwrap_err();
        assert_eq!(
            "no league named 'Keeper' (available: Dynasty, Redraft)",
            err.to_string()
        );
    }

    #[test]
    fn custom_unconfigured_is_a_configuration_error() {
        let mut league = League::new("L", participants(&["a", "b"]));
        league.distribution = SchemeKind::Custom;
        assert_eq!(Err(ConfigurationError::Unconfigured), league.resolve());
    }

    #[test]
    fn scheme_override() {
        let league = parse(LEAGUES_JSON).select(None).unwrap();
        assert_eq!(DistributionScheme::Weighted, league.scheme_as(SchemeKind::Weighted));
        assert_eq!(SchemeKind::Custom, league.scheme().kind());
    }

    #[test]
    fn validate_team_count() {
        let league = League::new("Tiny", participants(&["a"]));
        assert_eq!(
            Err(InvalidLeague::TeamCount {
                name: "Tiny".into(),
                teams: 1
            }),
            league.validate()
        );
        let names = (0..19).map(|index| format!("m{index}")).collect::<Vec<_>>();
        let league = League::new("Huge", participants(names.as_slice()));
        assert!(matches!(league.validate(), Err(InvalidLeague::TeamCount { teams: 19, .. })));
    }

    #[test]
    fn validate_mismatch_and_duplicates() {
        let mut league = League::new("L", participants(&["a", "b", "c"]));
        league.num_teams = 4;
        assert_eq!(
            Err(InvalidLeague::TeamCountMismatch {
                name: "L".into(),
                declared: 4,
                actual: 3
            }),
            league.validate()
        );

        let league = League::new("L", participants(&["a", "b", "a"]));
        assert_eq!(
            Err(InvalidLeague::DuplicateManager {
                name: "L".into(),
                manager: Participant::from("a")
            }),
            league.validate()
        );

        let league = League::new("L", participants(&["a", " "]));
        assert_eq!(Err(InvalidLeague::BlankManager { name: "L".into() }), league.validate());

        let league = League::new(" ", participants(&["a", "b"]));
        assert_eq!(Err(InvalidLeague::BlankName), league.validate());
    }

    #[test]
    fn too_many_leagues() {
        let leagues = (0..6)
            .map(|index| League::new(format!("L{index}"), participants(&["a", "b"])))
            .collect();
        assert!(LeagueFile::Many(leagues).select(None).is_err());
    }

    #[test]
    fn json_round_trip_field_names() {
        let league = League::new("Rt", participants(&["a", "b"]));
        let json = serde_json::to_value(&league).unwrap();
        assert_eq!("straight", json["distribution"]);
        assert_eq!(Some(2), json["num_teams"].as_u64());
        assert_eq!(serde_json::json!({"order": [], "balls": []}), json["custom_distribution"]);
    }
}
