use std::path::Path;

use crate::dataset::types::{Pokemon, Stat};
use crate::errors::DataLoadError;

/// Load the Pokedex from a CSV file.
///
/// Column labels are matched after trimming surrounding whitespace, so a
/// header like `" HP "` still binds to the HP stat; cell values are kept
/// as written. The returned order is the file order, which is also the
/// tie-break order for every ranked view downstream.
///
/// # Errors
///
/// Returns `DataLoadError` if the file is missing or unreadable, a
/// required column is absent, or any row is malformed. A malformed row is
/// never skipped silently; the error names the row and column.
pub fn load_pokedex(path: &Path) -> Result<Vec<Pokemon>, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::Missing {
            path: path.to_path_buf(),
        });
    }

    let read_err = |source: csv::Error| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .map(|label| label.trim().to_string())
        .collect();

    let column_index = |column: &'static str| -> Result<usize, DataLoadError> {
        headers
            .iter()
            .position(|label| label == column)
            .ok_or(DataLoadError::MissingColumn { column })
    };

    let idx_name = column_index("Name")?;
    let idx_name_kor = column_index("Name_KOR")?;
    let idx_type1 = column_index("Type 1")?;
    let idx_type2 = column_index("Type 2")?;
    let stat_columns: Vec<(Stat, usize)> = Stat::ALL
        .iter()
        .map(|&stat| column_index(stat.column()).map(|idx| (stat, idx)))
        .collect::<Result<_, _>>()?;
    let idx_total = column_index("Total")?;
    let idx_legendary = column_index("Legendary")?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_number = idx + 1;
        let row = result.map_err(read_err)?;
        let cell = |column_idx: usize| row.get(column_idx).unwrap_or("");

        let name = cell(idx_name).to_string();
        if name.trim().is_empty() {
            return Err(DataLoadError::BadRow {
                row: row_number,
                column: "Name",
                message: "name is empty".to_string(),
            });
        }

        let type2_raw = cell(idx_type2);
        let type2 = if type2_raw.trim().is_empty() {
            None
        } else {
            Some(type2_raw.to_string())
        };

        let mut stats = [0u16; 6];
        for (slot, &(stat, column_idx)) in stat_columns.iter().enumerate() {
            let value = parse_number(cell(column_idx), row_number, stat.column())?;
            if value > stat.max() {
                return Err(DataLoadError::BadRow {
                    row: row_number,
                    column: stat.column(),
                    message: format!("{} exceeds the {} maximum of {}", value, stat, stat.max()),
                });
            }
            stats[slot] = value;
        }

        records.push(Pokemon {
            name,
            name_kor: cell(idx_name_kor).to_string(),
            type1: cell(idx_type1).to_string(),
            type2,
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            sp_atk: stats[3],
            sp_def: stats[4],
            speed: stats[5],
            total: parse_number(cell(idx_total), row_number, "Total")?,
            legendary: parse_flag(cell(idx_legendary), row_number)?,
        });
    }

    Ok(records)
}

fn parse_number(raw: &str, row: usize, column: &'static str) -> Result<u16, DataLoadError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| DataLoadError::BadRow {
            row,
            column,
            message: format!("expected a non-negative number, got '{}'", raw),
        })
}

fn parse_flag(raw: &str, row: usize) -> Result<bool, DataLoadError> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") || value == "1" {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") || value.eq_ignore_ascii_case("no") || value == "0"
    {
        Ok(false)
    } else {
        Err(DataLoadError::BadRow {
            row,
            column: "Legendary",
            message: format!("expected true or false, got '{}'", raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str =
        "Name,Name_KOR,Type 1,Type 2,HP,Attack,Defense,Sp. Atk,Sp. Def,Speed,Total,Legendary";

    fn write_dataset(rows: &[&str]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pokedex.csv");
        let mut contents = String::from(HEADER);
        for row in rows {
            contents.push('\n');
            contents.push_str(row);
        }
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_rows_in_file_order() {
        let (_dir, path) = write_dataset(&[
            "Bulbasaur,이상해씨,Grass,Poison,45,49,49,65,65,45,318,False",
            "Charmander,파이리,Fire,,39,52,43,60,50,65,309,False",
            "Mewtwo,뮤츠,Psychic,,106,110,90,154,90,130,680,True",
        ]);

        let records = load_pokedex(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Bulbasaur");
        assert_eq!(records[0].name_kor, "이상해씨");
        assert_eq!(records[0].type2.as_deref(), Some("Poison"));
        assert_eq!(records[1].name, "Charmander");
        assert_eq!(records[1].type2, None);
        assert_eq!(records[2].name, "Mewtwo");
        assert!(records[2].legendary);
        assert_eq!(records[2].sp_atk, 154);
        assert_eq!(records[2].total, 680);
    }

    #[test]
    fn trims_whitespace_from_column_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pokedex.csv");
        let contents = " Name ,Name_KOR,Type 1,Type 2, HP ,Attack,Defense,Sp. Atk,Sp. Def,Speed,Total,Legendary\n\
                        Pikachu,피카츄,Electric,,35,55,40,50,50,90,320,False";
        fs::write(&path, contents).unwrap();

        let records = load_pokedex(&path).unwrap();
        assert_eq!(records[0].name, "Pikachu");
        assert_eq!(records[0].hp, 35);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        let err = load_pokedex(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Missing { .. }));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pokedex.csv");
        let contents = "Name,Name_KOR,Type 1,Type 2,HP,Attack,Defense,Sp. Atk,Speed,Total,Legendary\n\
                        Pikachu,피카츄,Electric,,35,55,40,50,90,320,False";
        fs::write(&path, contents).unwrap();

        let err = load_pokedex(&path).unwrap_err();
        match err {
            DataLoadError::MissingColumn { column } => assert_eq!(column, "Sp. Def"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_stat_names_row_and_column() {
        let (_dir, path) = write_dataset(&[
            "Bulbasaur,이상해씨,Grass,Poison,45,49,49,65,65,45,318,False",
            "Broken,고장,Grass,,forty,49,49,65,65,45,318,False",
        ]);

        let err = load_pokedex(&path).unwrap_err();
        match err {
            DataLoadError::BadRow { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "HP");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stat_above_domain_maximum_is_rejected() {
        let (_dir, path) = write_dataset(&[
            "Overflow,과충전,Electric,,256,49,49,65,65,45,529,False",
        ]);

        let err = load_pokedex(&path).unwrap_err();
        match err {
            DataLoadError::BadRow { row, column, message } => {
                assert_eq!(row, 1);
                assert_eq!(column, "HP");
                assert!(message.contains("255"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let (_dir, path) = write_dataset(&[
            "  ,이름없음,Normal,,50,50,50,50,50,50,300,False",
        ]);

        let err = load_pokedex(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::BadRow { column: "Name", .. }));
    }

    #[test]
    fn legendary_flag_accepts_common_spellings() {
        let (_dir, path) = write_dataset(&[
            "A,가,Normal,,50,50,50,50,50,50,300,True",
            "B,나,Normal,,50,50,50,50,50,50,300,false",
            "C,다,Normal,,50,50,50,50,50,50,300,1",
            "D,라,Normal,,50,50,50,50,50,50,300,0",
            "E,마,Normal,,50,50,50,50,50,50,300,Yes",
            "F,바,Normal,,50,50,50,50,50,50,300,no",
        ]);

        let records = load_pokedex(&path).unwrap();
        let flags: Vec<bool> = records.iter().map(|p| p.legendary).collect();
        assert_eq!(flags, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn unrecognized_legendary_flag_is_rejected() {
        let (_dir, path) = write_dataset(&[
            "A,가,Normal,,50,50,50,50,50,50,300,maybe",
        ]);

        let err = load_pokedex(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::BadRow { column: "Legendary", .. }));
    }
}
