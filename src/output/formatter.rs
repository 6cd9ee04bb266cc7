use std::io::IsTerminal;

use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::dataset::{Pokemon, Stat};
use crate::query::QueryOutput;
use crate::scoring::MatchScore;

const KOR_WIDTH: usize = 10;
const TYPE_WIDTH: usize = 14;
const STAT_WIDTH: usize = 4;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Render a match ratio as a whole-number percentage. Ties round to even,
/// so 12.5 lands on "12%" and 87.5 on "88%".
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Format the fully-matched view as a table with a header row.
/// Columns: Index, Korean name, Name, Type, the six stats, Legendary, Total.
pub fn format_matched_table(records: &[Pokemon], use_colors: bool) -> String {
    if records.is_empty() {
        return "No Pokemon matched every minimum.".to_string();
    }

    let name_width = name_column_width(records.iter().map(|p| &p.name));
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(matched_header(name_width, use_colors));

    for (idx, pokemon) in records.iter().enumerate() {
        // 1-based index, right-aligned with trailing dot
        let index = format!("{:>2}.", idx + 1);
        let kor = pad_right(&truncate_name(&pokemon.name_kor, KOR_WIDTH), KOR_WIDTH);
        let name = pad_right(&truncate_name(&pokemon.name, name_width), name_width);
        let types = pad_right(&truncate_name(&pokemon.type_label(), TYPE_WIDTH), TYPE_WIDTH);
        let stats = Stat::ALL.map(|stat| format!("{:>STAT_WIDTH$}", pokemon.stat(stat)));
        let leg = format!("{:>5}", pokemon.legendary);
        let total = format!("{:>6}", pokemon.total);

        let line = if use_colors {
            format!(
                "{} {} {} {} {} {} {} {} {} {} {} {}",
                index.dimmed(),
                kor,
                name.bold(),
                types.cyan(),
                stats[0],
                stats[1],
                stats[2],
                stats[3],
                stats[4],
                stats[5],
                leg,
                total.bold()
            )
        } else {
            format!(
                "{} {} {} {} {} {} {} {} {} {} {} {}",
                index,
                kor,
                name,
                types,
                stats[0],
                stats[1],
                stats[2],
                stats[3],
                stats[4],
                stats[5],
                leg,
                total
            )
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Format the ranked view as a table with a header row.
/// Columns: Index, Korean name, Name, Match percentage, the six stats, Legendary.
pub fn format_top_table(scored: &[(Pokemon, MatchScore)], use_colors: bool) -> String {
    if scored.is_empty() {
        return "No Pokemon to rank.".to_string();
    }

    let name_width = name_column_width(scored.iter().map(|(p, _)| &p.name));
    let mut lines = Vec::with_capacity(scored.len() + 1);
    lines.push(top_header(name_width, use_colors));

    for (idx, (pokemon, score)) in scored.iter().enumerate() {
        let index = format!("{:>2}.", idx + 1);
        let kor = pad_right(&truncate_name(&pokemon.name_kor, KOR_WIDTH), KOR_WIDTH);
        let name = pad_right(&truncate_name(&pokemon.name, name_width), name_width);
        let ratio = format!("{:>5}", format_ratio(score.ratio));
        let stats = Stat::ALL.map(|stat| format!("{:>STAT_WIDTH$}", pokemon.stat(stat)));
        let leg = format!("{:>5}", pokemon.legendary);

        let line = if use_colors {
            let ratio_cell = if score.satisfied as usize == Stat::ALL.len() {
                ratio.green().bold().to_string()
            } else {
                ratio.bold().to_string()
            };
            format!(
                "{} {} {} {} {} {} {} {} {} {} {}",
                index.dimmed(),
                kor,
                name.bold(),
                ratio_cell,
                stats[0],
                stats[1],
                stats[2],
                stats[3],
                stats[4],
                stats[5],
                leg
            )
        } else {
            format!(
                "{} {} {} {} {} {} {} {} {} {} {}",
                index,
                kor,
                name,
                ratio,
                stats[0],
                stats[1],
                stats[2],
                stats[3],
                stats[4],
                stats[5],
                leg
            )
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Format the fully-matched view as tab-separated values for scripting.
/// Columns mirror the table; no headers, no colors.
pub fn format_matched_tsv(records: &[Pokemon]) -> String {
    records
        .iter()
        .map(|p| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                p.name_kor,
                p.name,
                p.type1,
                p.type2.as_deref().unwrap_or(""),
                p.hp,
                p.attack,
                p.defense,
                p.sp_atk,
                p.sp_def,
                p.speed,
                p.legendary,
                p.total
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the ranked view as tab-separated values for scripting.
pub fn format_top_tsv(scored: &[(Pokemon, MatchScore)]) -> String {
    scored
        .iter()
        .map(|(p, score)| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                p.name_kor,
                p.name,
                format_ratio(score.ratio),
                p.hp,
                p.attack,
                p.defense,
                p.sp_atk,
                p.sp_def,
                p.speed,
                p.legendary
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    pokemon: &'a Pokemon,
    satisfied: u8,
    ratio: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    pool_size: usize,
    matched: &'a [Pokemon],
    top: Vec<JsonEntry<'a>>,
}

/// Render both views as a single JSON document.
pub fn render_json(output: &QueryOutput) -> anyhow::Result<String> {
    let report = JsonReport {
        pool_size: output.pool_size,
        matched: &output.matched,
        top: output
            .top
            .iter()
            .map(|(pokemon, score)| JsonEntry {
                pokemon,
                satisfied: score.satisfied,
                ratio: score.ratio,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn matched_header(name_width: usize, use_colors: bool) -> String {
    let line = format!(
        "{:>3} {:<KOR_WIDTH$} {:<name_width$} {:<TYPE_WIDTH$} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>5} {:>6}",
        "#", "Korean", "Name", "Type", "HP", "Atk", "Def", "SpA", "SpD", "Spe", "Leg", "Total"
    );
    if use_colors {
        line.dimmed().to_string()
    } else {
        line
    }
}

fn top_header(name_width: usize, use_colors: bool) -> String {
    let line = format!(
        "{:>3} {:<KOR_WIDTH$} {:<name_width$} {:>5} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>STAT_WIDTH$} {:>5}",
        "#", "Korean", "Name", "Match", "HP", "Atk", "Def", "SpA", "SpD", "Spe", "Leg"
    );
    if use_colors {
        line.dimmed().to_string()
    } else {
        line
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Width of the Name column: wide enough for the longest name on show,
/// capped so the stat columns stay on screen in a narrow terminal.
fn name_column_width<'a, I>(names: I) -> usize
where
    I: Iterator<Item = &'a String>,
{
    let longest = names.map(|n| n.chars().count()).max().unwrap_or(4);
    let fixed = 4 + KOR_WIDTH + 1 + TYPE_WIDTH + 1 + 6 * (STAT_WIDTH + 1) + 6 + 7;
    let cap = match get_terminal_width() {
        Some(width) if width > fixed + 8 => (width - fixed).min(24),
        Some(_) => 8,
        None => 24,
    };
    longest.clamp(4, cap)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad_right(text: &str, width: usize) -> String {
    format!("{:<width$}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pokemon() -> Pokemon {
        Pokemon {
            name: "Charizard".to_string(),
            name_kor: "리자몽".to_string(),
            type1: "Fire".to_string(),
            type2: Some("Flying".to_string()),
            hp: 78,
            attack: 84,
            defense: 78,
            sp_atk: 109,
            sp_def: 85,
            speed: 100,
            total: 534,
            legendary: false,
        }
    }

    fn sample_score(satisfied: u8) -> MatchScore {
        MatchScore {
            satisfied,
            ratio: f64::from(satisfied) / 6.0,
        }
    }

    #[test]
    fn test_format_ratio_sixths() {
        assert_eq!(format_ratio(0.0), "0%");
        assert_eq!(format_ratio(1.0 / 6.0), "17%");
        assert_eq!(format_ratio(2.0 / 6.0), "33%");
        assert_eq!(format_ratio(3.0 / 6.0), "50%");
        assert_eq!(format_ratio(4.0 / 6.0), "67%");
        assert_eq!(format_ratio(5.0 / 6.0), "83%");
        assert_eq!(format_ratio(1.0), "100%");
    }

    #[test]
    fn test_format_ratio_ties_round_to_even() {
        assert_eq!(format_ratio(0.125), "12%");
        assert_eq!(format_ratio(0.875), "88%");
    }

    #[test]
    fn test_matched_table_empty() {
        let result = format_matched_table(&[], false);
        assert_eq!(result, "No Pokemon matched every minimum.");
    }

    #[test]
    fn test_matched_table_single() {
        let result = format_matched_table(&[sample_pokemon()], false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Korean"));
        assert!(lines[0].contains("Total"));
        assert!(lines[1].contains(" 1."));
        assert!(lines[1].contains("리자몽"));
        assert!(lines[1].contains("Charizard"));
        assert!(lines[1].contains("Fire/Flying"));
        assert!(lines[1].contains("534"));
        assert!(lines[1].contains("false"));
    }

    #[test]
    fn test_matched_table_keeps_given_order() {
        let mut second = sample_pokemon();
        second.name = "Venusaur".to_string();
        second.name_kor = "이상해꽃".to_string();
        let result = format_matched_table(&[sample_pokemon(), second], false);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[1].contains(" 1."));
        assert!(lines[1].contains("Charizard"));
        assert!(lines[2].contains(" 2."));
        assert!(lines[2].contains("Venusaur"));
    }

    #[test]
    fn test_top_table_empty() {
        let result = format_top_table(&[], false);
        assert_eq!(result, "No Pokemon to rank.");
    }

    #[test]
    fn test_top_table_shows_percentages() {
        let scored = vec![
            (sample_pokemon(), sample_score(6)),
            (sample_pokemon(), sample_score(5)),
        ];
        let result = format_top_table(&scored, false);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[0].contains("Match"));
        assert!(lines[1].contains("100%"));
        assert!(lines[2].contains("83%"));
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Pikachu", 20), "Pikachu");
    }

    #[test]
    fn test_truncate_name_exact() {
        assert_eq!(truncate_name("Exact", 5), "Exact");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(truncate_name("CharizardMega Charizard X", 15), "CharizardMeg...");
    }

    #[test]
    fn test_truncate_name_unicode() {
        // Handled by char, not by byte, so Hangul never splits mid-glyph
        assert_eq!(truncate_name("이상해씨", 10), "이상해씨");
        assert_eq!(truncate_name("이상해꽃이상해꽃", 6), "이상해...");
    }

    #[test]
    fn test_matched_tsv_empty() {
        assert_eq!(format_matched_tsv(&[]), "");
    }

    #[test]
    fn test_matched_tsv_single() {
        let result = format_matched_tsv(&[sample_pokemon()]);
        assert_eq!(result.split('\t').count(), 12);
        assert!(result.starts_with("리자몽\tCharizard\tFire\tFlying\t"));
        assert!(result.ends_with("\tfalse\t534"));
    }

    #[test]
    fn test_matched_tsv_empty_second_type() {
        let mut pokemon = sample_pokemon();
        pokemon.type2 = None;
        let result = format_matched_tsv(&[pokemon]);
        assert!(result.contains("\tFire\t\t78"));
    }

    #[test]
    fn test_top_tsv_multiple() {
        let scored = vec![
            (sample_pokemon(), sample_score(6)),
            (sample_pokemon(), sample_score(3)),
        ];
        let result = format_top_tsv(&scored);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split('\t').count(), 10);
        assert!(lines[0].contains("\t100%\t"));
        assert!(lines[0].ends_with("\tfalse"));
        assert!(lines[1].contains("\t50%\t"));
    }

    #[test]
    fn test_render_json_round_trips() {
        let output = QueryOutput {
            matched: vec![sample_pokemon()],
            top: vec![(sample_pokemon(), sample_score(6))],
            pool_size: 3,
        };
        let json = render_json(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pool_size"], 3);
        assert_eq!(value["matched"][0]["name"], "Charizard");
        assert_eq!(value["top"][0]["satisfied"], 6);
        assert_eq!(value["top"][0]["name_kor"], "리자몽");
    }
}
