use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use statdex::dataset::Stat;

// Exit codes: missing or malformed data is fatal, bad criteria are
// clamped and only config problems reject outright.
const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Explore the Pokedex interactively (default if no subcommand)
    Tui,
    /// Print both result tables once and exit
    List {
        /// Minimum HP
        #[arg(long)]
        min_hp: Option<i64>,
        /// Minimum Attack
        #[arg(long)]
        min_attack: Option<i64>,
        /// Minimum Defense
        #[arg(long)]
        min_defense: Option<i64>,
        /// Minimum Sp. Atk
        #[arg(long)]
        min_sp_atk: Option<i64>,
        /// Minimum Sp. Def
        #[arg(long)]
        min_sp_def: Option<i64>,
        /// Minimum Speed
        #[arg(long)]
        min_speed: Option<i64>,
        /// Only consider legendary Pokemon
        #[arg(long)]
        legendary: bool,
        /// Name substring to search for (English or Korean)
        #[arg(long)]
        name: Option<String>,
        /// How many rows the ranked view keeps
        #[arg(long)]
        top: Option<usize>,
        /// Tab-separated output for scripting: matched rows, a blank
        /// line, then ranked rows
        #[arg(long)]
        tsv: bool,
        /// JSON output with both views
        #[arg(long, conflicts_with = "tsv")]
        json: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "statdex")]
#[command(about = "Pokedex stat-threshold filter and recommender", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/statdex/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the Pokedex CSV (overrides the config file)
    #[arg(short, long, global = true)]
    data: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    let start_time = Instant::now();

    // Init writes the config the other commands read, so it runs before
    // anything is loaded.
    if let Commands::Init = command {
        let config_path = cli.config.map(PathBuf::from);
        if let Err(e) = statdex::config::run_init_wizard(config_path) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match statdex::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config-supplied starting criteria before first use
    let starting = config.starting_criteria();
    if let Err(errors) = statdex::criteria::validate_criteria(&starting) {
        eprintln!("Config criteria errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let top_count = config.top.unwrap_or(statdex::scoring::DEFAULT_TOP_N);

    // Resolve the dataset path: --data beats the config file
    let data_path = cli
        .data
        .map(PathBuf::from)
        .or_else(|| config.dataset.clone())
        .unwrap_or_else(|| PathBuf::from(statdex::dataset::DEFAULT_DATASET));

    if cli.verbose {
        eprintln!("Reading Pokedex from {}", data_path.display());
    }

    // Load the store; nothing works without it
    let records = match statdex::dataset::load_pokedex(&data_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Data error: {}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded {} Pokemon in {:?}",
            records.len(),
            start_time.elapsed()
        );
    }

    match command {
        Commands::Tui => {
            let app = statdex::tui::App::new(records, starting, top_count);
            if let Err(e) = statdex::tui::run_tui(app) {
                eprintln!("TUI error: {}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::List {
            min_hp,
            min_attack,
            min_defense,
            min_sp_atk,
            min_sp_def,
            min_speed,
            legendary,
            name,
            top,
            tsv,
            json,
        } => {
            let mut criteria = starting;

            // Out-of-range minimums are clamped, not fatal
            let overrides = [
                (Stat::Hp, min_hp),
                (Stat::Attack, min_attack),
                (Stat::Defense, min_defense),
                (Stat::SpAtk, min_sp_atk),
                (Stat::SpDef, min_sp_def),
                (Stat::Speed, min_speed),
            ];
            for (stat, raw) in overrides {
                if let Some(raw) = raw {
                    let clamped = statdex::criteria::clamp_threshold(stat, raw);
                    if i64::from(clamped) != raw {
                        eprintln!(
                            "Warning: minimum {} of {} is outside 0..={}; using {}",
                            stat,
                            raw,
                            stat.max(),
                            clamped
                        );
                    }
                    criteria.thresholds.set(stat, clamped);
                }
            }
            if legendary {
                criteria.legendary_only = true;
            }
            if let Some(name) = name {
                criteria.name_query = name;
            }
            let top_count = top.unwrap_or(top_count);

            let output = match statdex::query::run_query(&records, &criteria, top_count) {
                Ok(o) => o,
                Err(e) => {
                    eprintln!("Criteria error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            if json {
                match statdex::output::render_json(&output) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Failed to render JSON: {}", e);
                        std::process::exit(EXIT_IO);
                    }
                }
            } else if tsv {
                let matched = statdex::output::format_matched_tsv(&output.matched);
                let ranked = statdex::output::format_top_tsv(&output.top);
                if !matched.is_empty() {
                    println!("{}", matched);
                }
                println!();
                if !ranked.is_empty() {
                    println!("{}", ranked);
                }
            } else {
                let use_colors = statdex::output::should_use_colors();
                println!(
                    "{} of {} Pokemon match every minimum:",
                    output.matched.len(),
                    output.pool_size
                );
                println!(
                    "{}",
                    statdex::output::format_matched_table(&output.matched, use_colors)
                );
                println!();
                println!("Top {} by thresholds met:", output.top.len());
                println!(
                    "{}",
                    statdex::output::format_top_table(&output.top, use_colors)
                );
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Pool {} of {} Pokemon, {} full matches in {:?}",
                    output.pool_size,
                    records.len(),
                    output.matched.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Init => unreachable!("handled before the data load"),
    }

    std::process::exit(EXIT_SUCCESS);
}
