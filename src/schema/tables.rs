//! Table schema definition for the creature dataset

use super::types::*;

/// Position of each column inside [`POKEMON`]. Kept in sync with the
/// column list below; record parsing and row mapping index by these.
pub mod col {
    pub const NAME: usize = 0;
    pub const SPECIES_ID: usize = 1;
    pub const HEIGHT: usize = 2;
    pub const WEIGHT: usize = 3;
    pub const TYPE_1: usize = 4;
    pub const TYPE_2: usize = 5;
    pub const URL_IMAGE: usize = 6;
    pub const GENERATION_ID: usize = 7;
    pub const EVOLVES_FROM_SPECIES_ID: usize = 8;
}

pub static POKEMON: TableSchema = TableSchema {
    name: "pokemon",
    columns: &[
        Column::new("name", ColumnType::Text).csv("pokemon"),
        Column::new("species_id", ColumnType::Integer),
        Column::new("height", ColumnType::Real),
        Column::new("weight", ColumnType::Real),
        Column::new("type_1", ColumnType::Text),
        Column::new("type_2", ColumnType::Text),
        Column::new("url_image", ColumnType::Text),
        Column::new("generation_id", ColumnType::Integer),
        Column::new("evolves_from_species_id", ColumnType::Text),
    ],
    indexes: &[
        Index::on(&["name"]),
        Index::on(&["species_id"]),
        Index::on(&["type_1"]),
        Index::on(&["type_2"]),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_positions_match_declaration() {
        let names = POKEMON.column_names();
        assert_eq!(names.len(), 9);
        assert_eq!(names[col::NAME], "name");
        assert_eq!(names[col::SPECIES_ID], "species_id");
        assert_eq!(names[col::HEIGHT], "height");
        assert_eq!(names[col::WEIGHT], "weight");
        assert_eq!(names[col::TYPE_1], "type_1");
        assert_eq!(names[col::TYPE_2], "type_2");
        assert_eq!(names[col::URL_IMAGE], "url_image");
        assert_eq!(names[col::GENERATION_ID], "generation_id");
        assert_eq!(names[col::EVOLVES_FROM_SPECIES_ID], "evolves_from_species_id");
    }

    #[test]
    fn test_name_column_reads_pokemon_header() {
        let fields = POKEMON.csv_fields();
        assert_eq!(fields[col::NAME], "pokemon");
        assert!(!fields.contains(&"name"));
    }
}
