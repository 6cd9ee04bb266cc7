use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config};
use crate::criteria::{StatThresholds, DEFAULT_MIN};
use crate::dataset::{Stat, DEFAULT_DATASET};
use crate::scoring::DEFAULT_TOP_N;

/// One question, one trimmed answer. An empty answer takes the default.
fn ask(question: &str, default: &str) -> Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{} [{}]: ", question, default).context("Failed to write prompt")?;
    stdout.flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read input")?;
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

fn ask_yes_no(question: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = ask(question, hint)?.to_lowercase();
    match answer.as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Ok(default_yes),
    }
}

/// Keep asking until the answer parses and passes `accept`.
fn ask_number<T: std::str::FromStr + Copy>(
    question: &str,
    default: T,
    accept: impl Fn(T) -> bool,
    complaint: &str,
) -> Result<T>
where
    T: std::fmt::Display,
{
    loop {
        let answer = ask(question, &default.to_string())?;
        match answer.parse::<T>() {
            Ok(value) if accept(value) => return Ok(value),
            _ => println!("  {}", complaint),
        }
    }
}

// A uniform minimum must fit the tightest stat domain, which is Speed.
fn uniform_ceiling() -> u16 {
    Stat::ALL.iter().map(|stat| stat.max()).min().unwrap_or(0)
}

/// Walk the user through a starter config and write it out.
///
/// With `default_path` set (the `--config` flag) the file goes there;
/// otherwise the user is offered the default location under ~/.config.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Statdex setup");
    println!("=============");
    println!();
    println!("Statdex reads a Pokedex CSV with English and Korean names plus the six base stats.");

    let dataset = PathBuf::from(ask("Path to the Pokedex CSV", DEFAULT_DATASET)?);
    if !dataset.exists() {
        println!(
            "  Note: {} does not exist yet. Put the file there before running.",
            dataset.display()
        );
    }

    println!();
    println!("A Pokemon counts as a full match when all six stats meet their minimums.");
    println!("You pick one starting value here; stats can be tuned live in the TUI.");
    let ceiling = uniform_ceiling();
    let starting_min: u16 = ask_number(
        "Starting minimum for every stat",
        DEFAULT_MIN,
        |v| v <= ceiling,
        &format!("Invalid: must be a number no larger than {}. Try again.", ceiling),
    )?;

    println!();
    let legendary_only = ask_yes_no("Start with the legendary-only filter on?", false)?;

    println!();
    println!("Besides the full matches, statdex ranks the near misses by thresholds met.");
    let top: usize = ask_number(
        "How many ranked rows to keep",
        DEFAULT_TOP_N,
        |v| v > 0,
        "Invalid: must be a positive number. Try again.",
    )?;

    println!();
    let suggested = default_path.unwrap_or_else(get_config_path);
    let config_path = PathBuf::from(ask(
        "Where should the config be saved?",
        &suggested.display().to_string(),
    )?);

    if config_path.exists() {
        let question = format!(
            "Config already exists at {}. Overwrite?",
            config_path.display()
        );
        if !ask_yes_no(&question, false)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        dataset: Some(dataset),
        thresholds: Some(StatThresholds::uniform(starting_min)),
        legendary_only: Some(legendary_only),
        top: Some(top),
    };
    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `statdex` to get started.");

    Ok(())
}
