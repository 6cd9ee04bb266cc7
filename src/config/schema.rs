use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::criteria::{FilterCriteria, StatThresholds};

/// User configuration. Everything is optional; missing pieces fall back
/// to built-in defaults, and command-line flags beat the file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the Pokedex CSV
    #[serde(default)]
    pub dataset: Option<PathBuf>,
    /// Starting minimums applied before the user touches anything.
    /// Stats left out keep the built-in default.
    #[serde(default)]
    pub thresholds: Option<StatThresholds>,
    /// Start with the legendary filter switched on
    #[serde(default)]
    pub legendary_only: Option<bool>,
    /// How many rows the ranked view keeps
    #[serde(default)]
    pub top: Option<usize>,
}

impl Config {
    /// The criteria every session starts from.
    pub fn starting_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            thresholds: self.thresholds.unwrap_or_default(),
            legendary_only: self.legendary_only.unwrap_or(false),
            name_query: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_yields_defaults() {
        let config = Config::default();
        let criteria = config.starting_criteria();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn partial_thresholds_fill_in_the_default() {
        let yaml = "thresholds:\n  hp: 80\n  speed: 100\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let criteria = config.starting_criteria();
        assert_eq!(criteria.thresholds.hp, 80);
        assert_eq!(criteria.thresholds.speed, 100);
        assert_eq!(criteria.thresholds.attack, 50);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let yaml = "dataset: pokedex.csv\nrefresh_interval: 30\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn full_config_parses() {
        let yaml = "dataset: data/Pokemon_translated.csv\n\
                    thresholds:\n  hp: 60\n  attack: 60\n  defense: 60\n  sp_atk: 60\n  sp_def: 60\n  speed: 60\n\
                    legendary_only: true\n\
                    top: 20\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(
            config.dataset.as_deref(),
            Some(std::path::Path::new("data/Pokemon_translated.csv"))
        );
        assert_eq!(config.top, Some(20));
        let criteria = config.starting_criteria();
        assert!(criteria.legendary_only);
        assert_eq!(criteria.thresholds, StatThresholds::uniform(60));
    }
}
