use serde::Serialize;
use std::str::FromStr;

use super::HeaderMap;
use crate::error::{Result, StoreError};
use crate::schema::{col, POKEMON};

/// One creature row as stored in the `pokemon` table.
///
/// String fields are always lower-case once a record has gone through
/// [`parse_record`]; lookups compare against that normalized form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub name: String,
    pub species_id: i64,
    pub height: f64,
    pub weight: f64,
    pub type_1: String,
    pub type_2: String,
    pub url_image: String,
    pub generation_id: i64,
    pub evolves_from_species_id: String,
}

impl Record {
    /// Map a row selected with all schema columns in declaration order
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(col::NAME)?,
            species_id: row.get(col::SPECIES_ID)?,
            height: row.get(col::HEIGHT)?,
            weight: row.get(col::WEIGHT)?,
            type_1: row.get(col::TYPE_1)?,
            type_2: row.get(col::TYPE_2)?,
            url_image: row.get(col::URL_IMAGE)?,
            generation_id: row.get(col::GENERATION_ID)?,
            evolves_from_species_id: row.get(col::EVOLVES_FROM_SPECIES_ID)?,
        })
    }
}

/// Parse one data line into a normalized record.
///
/// Whitespace around the line is dropped unless it is part of the separator,
/// so an empty last field in a tab-separated file survives. `line_number` is
/// 1-based and only used for error reporting.
pub fn parse_record(
    line: &str,
    line_number: usize,
    separator: &str,
    header: &HeaderMap,
) -> Result<Record> {
    let line = line.trim_matches(|c: char| c.is_whitespace() && !separator.contains(c));
    let fields: Vec<&str> = line.split(separator).collect();
    let field = |column: usize| -> Result<&str> {
        fields
            .get(header.index_of(column))
            .copied()
            .ok_or_else(|| StoreError::Parse {
                line: line_number,
                column: POKEMON.columns[column].csv_name(),
                value: String::new(),
                reason: format!("line has only {} fields", fields.len()),
            })
    };
    let text = |column: usize| -> Result<String> { Ok(field(column)?.to_lowercase()) };

    Ok(Record {
        name: text(col::NAME)?,
        species_id: parse_number(field(col::SPECIES_ID)?, line_number, col::SPECIES_ID)?,
        height: parse_float(field(col::HEIGHT)?, line_number, col::HEIGHT)?,
        weight: parse_float(field(col::WEIGHT)?, line_number, col::WEIGHT)?,
        type_1: text(col::TYPE_1)?,
        type_2: text(col::TYPE_2)?,
        url_image: text(col::URL_IMAGE)?,
        generation_id: parse_number(
            field(col::GENERATION_ID)?,
            line_number,
            col::GENERATION_ID,
        )?,
        evolves_from_species_id: text(col::EVOLVES_FROM_SPECIES_ID)?,
    })
}

fn parse_number<T>(raw: &str, line_number: usize, column: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| StoreError::Parse {
        line: line_number,
        column: POKEMON.columns[column].csv_name(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// SQLite stores NaN as NULL, so only finite values are accepted
fn parse_float(raw: &str, line_number: usize, column: usize) -> Result<f64> {
    let value: f64 = parse_number(raw, line_number, column)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StoreError::Parse {
            line: line_number,
            column: POKEMON.columns[column].csv_name(),
            value: raw.to_string(),
            reason: "not a finite number".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "pokemon,species_id,height,weight,type_1,type_2,url_image,generation_id,evolves_from_species_id";

    fn header(line: &str) -> HeaderMap {
        HeaderMap::parse(line, ",", &POKEMON).unwrap()
    }

    #[test]
    fn test_parse_record_lowercases_strings() {
        let map = header("species_id,pokemon,height,weight,type_1,type_2,url_image,generation_id,evolves_from_species_id");
        let record = parse_record(
            "1,Bulbasaur,0.7,6.9,Grass,Poison,HTTP://X/Bulba.PNG,1,",
            2,
            ",",
            &map,
        )
        .unwrap();

        assert_eq!(record.name, "bulbasaur");
        assert_eq!(record.species_id, 1);
        assert_eq!(record.height, 0.7);
        assert_eq!(record.weight, 6.9);
        assert_eq!(record.type_1, "grass");
        assert_eq!(record.type_2, "poison");
        assert_eq!(record.url_image, "http://x/bulba.png");
        assert_eq!(record.generation_id, 1);
        assert_eq!(record.evolves_from_species_id, "");
    }

    #[test]
    fn test_numeric_fields_ignore_surrounding_whitespace() {
        let map = header(HEADER);
        let record =
            parse_record("ivysaur, 2 ,1.0 , 13,grass,poison,u, 1,1", 3, ",", &map).unwrap();
        assert_eq!(record.species_id, 2);
        assert_eq!(record.height, 1.0);
        assert_eq!(record.weight, 13.0);
        assert_eq!(record.generation_id, 1);
        assert_eq!(record.evolves_from_species_id, "1");
    }

    #[test]
    fn test_non_numeric_value_is_parse_error() {
        let map = header(HEADER);
        let err = parse_record("mew,151,tall,4,psychic,,u,1,", 9, ",", &map).unwrap_err();
        match err {
            StoreError::Parse {
                line, column, value, ..
            } => {
                assert_eq!(line, 9);
                assert_eq!(column, "height");
                assert_eq!(value, "tall");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_float_in_integer_column_is_parse_error() {
        let map = header(HEADER);
        let err = parse_record("mew,151.5,0.4,4,psychic,,u,1,", 2, ",", &map).unwrap_err();
        assert!(matches!(err, StoreError::Parse { column: "species_id", .. }));
    }

    #[test]
    fn test_short_line_is_parse_error() {
        let map = header(HEADER);
        let err = parse_record("mew,151,0.4", 4, ",", &map).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 4, column: "weight", .. }));
    }

    #[test]
    fn test_non_finite_float_is_parse_error() {
        let map = header(HEADER);
        for raw in ["nan", "NaN", "inf", "-infinity"] {
            let line = format!("mew,151,{raw},4.0,psychic,,u,1,");
            let err = parse_record(&line, 5, ",", &map).unwrap_err();
            match err {
                StoreError::Parse {
                    line, column, value, ..
                } => {
                    assert_eq!(line, 5);
                    assert_eq!(column, "height");
                    assert_eq!(value, raw);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_dropped_from_line() {
        let map = header(HEADER);
        let record = parse_record("  Mew,151,0.4,4.0,psychic,,u,1,2  ", 2, ",", &map).unwrap();
        assert_eq!(record.name, "mew");
        assert_eq!(record.evolves_from_species_id, "2");
    }

    #[test]
    fn test_tab_separator_keeps_empty_last_field() {
        let tab_header = HEADER.replace(',', "\t");
        let map = HeaderMap::parse(&tab_header, "\t", &POKEMON).unwrap();
        let record =
            parse_record(" Mew\t151\t0.4\t4.0\tpsychic\t\tu\t1\t", 2, "\t", &map).unwrap();
        assert_eq!(record.name, "mew");
        assert_eq!(record.type_2, "");
        assert_eq!(record.evolves_from_species_id, "");
    }
}
