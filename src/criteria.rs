//! Filter criteria and the predicates built from them.

use serde::{Deserialize, Serialize};

use crate::dataset::{Pokemon, Stat};
use crate::errors::CriteriaError;

/// Starting minimum for every stat until the user moves it.
pub const DEFAULT_MIN: u16 = 50;

fn default_min() -> u16 {
    DEFAULT_MIN
}

/// Minimum required value per stat. All six keys are always present; a
/// stat the user never touched keeps the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatThresholds {
    #[serde(default = "default_min")]
    pub hp: u16,
    #[serde(default = "default_min")]
    pub attack: u16,
    #[serde(default = "default_min")]
    pub defense: u16,
    #[serde(default = "default_min")]
    pub sp_atk: u16,
    #[serde(default = "default_min")]
    pub sp_def: u16,
    #[serde(default = "default_min")]
    pub speed: u16,
}

impl Default for StatThresholds {
    fn default() -> Self {
        Self::uniform(DEFAULT_MIN)
    }
}

impl StatThresholds {
    /// Same minimum for every stat.
    pub fn uniform(min: u16) -> Self {
        Self {
            hp: min,
            attack: min,
            defense: min,
            sp_atk: min,
            sp_def: min,
            speed: min,
        }
    }

    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpAtk => self.sp_atk,
            Stat::SpDef => self.sp_def,
            Stat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: Stat, min: u16) {
        match stat {
            Stat::Hp => self.hp = min,
            Stat::Attack => self.attack = min,
            Stat::Defense => self.defense = min,
            Stat::SpAtk => self.sp_atk = min,
            Stat::SpDef => self.sp_def = min,
            Stat::Speed => self.speed = min,
        }
    }
}

/// Everything the user can ask for in one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub thresholds: StatThresholds,
    /// Keep legendary Pokemon only
    pub legendary_only: bool,
    /// Name substring to search for; blank means no name filter
    pub name_query: String,
}

/// A non-threshold condition. These narrow the candidate pool that both
/// result views are computed from; threshold misses only lower a ranking,
/// but failing one of these removes the record entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraPredicate {
    /// Keep legendary Pokemon only
    LegendaryOnly,
    /// Keep Pokemon whose English name contains the query ignoring case,
    /// or whose Korean name contains it exactly. Hangul has no letter
    /// case, so the Korean side stays case-sensitive on purpose.
    NameContains { query: String, query_lower: String },
}

impl ExtraPredicate {
    pub fn name_contains(query: &str) -> Self {
        ExtraPredicate::NameContains {
            query: query.to_string(),
            query_lower: query.to_lowercase(),
        }
    }

    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        match self {
            ExtraPredicate::LegendaryOnly => pokemon.legendary,
            ExtraPredicate::NameContains { query, query_lower } => {
                pokemon.name.to_lowercase().contains(query_lower.as_str())
                    || pokemon.name_kor.contains(query.as_str())
            }
        }
    }
}

/// Output of the predicate builder: always all six threshold predicates
/// in canonical stat order, plus whatever extra predicates the criteria
/// asked for.
#[derive(Debug, Clone)]
pub struct Predicates {
    pub thresholds: Vec<(Stat, u16)>,
    pub extra: Vec<ExtraPredicate>,
}

/// Build the predicate set for one query.
///
/// A whitespace-only name query adds no predicate, but a query with
/// surrounding whitespace is searched as typed.
///
/// # Errors
///
/// `CriteriaError` if any threshold exceeds its stat's maximum. Callers
/// that want to proceed anyway clamp with [`clamp_threshold`] first.
pub fn build_predicates(criteria: &FilterCriteria) -> Result<Predicates, CriteriaError> {
    let mut thresholds = Vec::with_capacity(Stat::ALL.len());
    for stat in Stat::ALL {
        let min = criteria.thresholds.get(stat);
        if min > stat.max() {
            return Err(CriteriaError::ThresholdOutOfRange {
                stat,
                value: min,
                max: stat.max(),
            });
        }
        thresholds.push((stat, min));
    }

    let mut extra = Vec::new();
    if criteria.legendary_only {
        extra.push(ExtraPredicate::LegendaryOnly);
    }
    if !criteria.name_query.trim().is_empty() {
        extra.push(ExtraPredicate::name_contains(&criteria.name_query));
    }

    Ok(Predicates { thresholds, extra })
}

/// Clamp a raw threshold into the stat's valid domain. This is the
/// recovery path for out-of-range input: the query proceeds with the
/// nearest bound instead of failing.
pub fn clamp_threshold(stat: Stat, raw: i64) -> u16 {
    raw.clamp(0, i64::from(stat.max())) as u16
}

/// Validate criteria before first use, e.g. defaults read from a config
/// file. Returns every problem at once rather than stopping at the first.
pub fn validate_criteria(criteria: &FilterCriteria) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for stat in Stat::ALL {
        let min = criteria.thresholds.get(stat);
        if min > stat.max() {
            errors.push(format!(
                "minimum {} of {} exceeds the stat maximum of {}",
                stat,
                min,
                stat.max()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
