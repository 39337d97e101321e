use crate::error::{Result, StoreError};
use crate::schema::TableSchema;

const BOM: char = '\u{feff}';

/// Maps each schema column to its position in the CSV header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    indices: Vec<usize>,
}

impl HeaderMap {
    /// Build the mapping from a header line.
    ///
    /// Header names are matched after trimming surrounding whitespace; when a
    /// name appears twice the first occurrence wins. Columns not named by the
    /// schema are ignored.
    pub fn parse(line: &str, separator: &str, schema: &TableSchema) -> Result<Self> {
        let line = line.strip_prefix(BOM).unwrap_or(line);
        let header: Vec<&str> = line.split(separator).map(str::trim).collect();

        let indices = schema
            .columns
            .iter()
            .map(|col| {
                let wanted = col.csv_name();
                header
                    .iter()
                    .position(|field| *field == wanted)
                    .ok_or(StoreError::MissingColumn(wanted))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { indices })
    }

    /// Header position of the schema column at `column`
    pub fn index_of(&self, column: usize) -> usize {
        self.indices[column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{col, POKEMON};

    const HEADER: &str =
        "pokemon,species_id,height,weight,type_1,type_2,url_image,generation_id,evolves_from_species_id";

    #[test]
    fn test_parse_in_declared_order() {
        let map = HeaderMap::parse(HEADER, ",", &POKEMON).unwrap();
        for i in 0..POKEMON.columns.len() {
            assert_eq!(map.index_of(i), i);
        }
    }

    #[test]
    fn test_parse_reordered_with_extras() {
        let header = "id,species_id,extra,pokemon,height,weight,type_1,type_2,url_image,generation_id,evolves_from_species_id";
        let map = HeaderMap::parse(header, ",", &POKEMON).unwrap();
        assert_eq!(map.index_of(col::NAME), 3);
        assert_eq!(map.index_of(col::SPECIES_ID), 1);
        assert_eq!(map.index_of(col::EVOLVES_FROM_SPECIES_ID), 10);
    }

    #[test]
    fn test_parse_strips_bom_and_whitespace() {
        let header = format!("\u{feff}{}", HEADER.replace(',', " ; "));
        let map = HeaderMap::parse(&header, ";", &POKEMON).unwrap();
        assert_eq!(map.index_of(col::NAME), 0);
        assert_eq!(map.index_of(col::GENERATION_ID), 7);
    }

    #[test]
    fn test_duplicate_header_uses_first() {
        let header = format!("{HEADER},pokemon");
        let map = HeaderMap::parse(&header, ",", &POKEMON).unwrap();
        assert_eq!(map.index_of(col::NAME), 0);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let header = HEADER.replace("type_2,", "");
        let err = HeaderMap::parse(&header, ",", &POKEMON).unwrap_err();
        assert!(matches!(err, StoreError::MissingColumn("type_2")));
    }

    #[test]
    fn test_name_header_is_not_accepted_for_pokemon() {
        let header = HEADER.replace("pokemon,", "name,");
        let err = HeaderMap::parse(&header, ",", &POKEMON).unwrap_err();
        assert!(matches!(err, StoreError::MissingColumn("pokemon")));
    }
}
