use std::fmt;

use serde::Serialize;

/// The six filterable stats, in the order they appear in the dataset and
/// in every table this tool prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpAtk,
    SpDef,
    Speed,
}

impl Stat {
    /// Every stat in canonical order. Threshold predicates are built in
    /// this order, one per stat, so result columns always line up.
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpAtk,
        Stat::SpDef,
        Stat::Speed,
    ];

    /// Column label in the source dataset.
    pub fn column(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpAtk => "Sp. Atk",
            Stat::SpDef => "Sp. Def",
            Stat::Speed => "Speed",
        }
    }

    /// Largest value this stat takes anywhere in the dataset. Doubles as
    /// the upper bound for user thresholds: a minimum above this matches
    /// nothing, so inputs are clamped here.
    pub fn max(&self) -> u16 {
        match self {
            Stat::Hp => 255,
            Stat::Attack => 190,
            Stat::Defense => 230,
            Stat::SpAtk => 194,
            Stat::SpDef => 230,
            Stat::Speed => 180,
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One Pokedex entry. Immutable once loaded; every view the pipeline
/// produces is a derived copy, never a mutation of the store.
#[derive(Debug, Clone, Serialize)]
pub struct Pokemon {
    /// English name; never empty
    pub name: String,
    /// Korean name
    pub name_kor: String,
    pub type1: String,
    /// Secondary type; absent for mono-type Pokemon
    pub type2: Option<String>,
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_atk: u16,
    pub sp_def: u16,
    pub speed: u16,
    /// Precomputed stat sum, used for display ordering only
    pub total: u16,
    pub legendary: bool,
}

impl Pokemon {
    /// Look up a stat value by its enum key.
    pub fn stat(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpAtk => self.sp_atk,
            Stat::SpDef => self.sp_def,
            Stat::Speed => self.speed,
        }
    }

    /// "Grass/Poison" for dual types, "Fire" for mono types.
    pub fn type_label(&self) -> String {
        match &self.type2 {
            Some(type2) => format!("{}/{}", self.type1, type2),
            None => self.type1.clone(),
        }
    }
}
