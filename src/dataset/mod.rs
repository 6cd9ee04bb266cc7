pub mod loader;
pub mod types;

pub use loader::load_pokedex;
pub use types::{Pokemon, Stat};

/// Dataset filename looked for in the working directory when neither the
/// command line nor the config file names one.
pub const DEFAULT_DATASET: &str = "Pokemon_translated.csv";
