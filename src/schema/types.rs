/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    /// SQLite type affinity used in CREATE TABLE
    pub const fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
    /// Override CSV header name (default: same as column name)
    pub csv_field: Option<&'static str>,
}

impl Column {
    pub const fn new(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            csv_field: None,
        }
    }

    /// Set the CSV header name (for when it differs from the column name)
    pub const fn csv(self, field: &'static str) -> Self {
        Self {
            csv_field: Some(field),
            ..self
        }
    }

    /// Name of this column in the CSV header
    pub fn csv_name(&self) -> &'static str {
        self.csv_field.unwrap_or(self.name)
    }
}

/// Index definition
#[derive(Debug, Clone)]
pub struct Index {
    pub columns: &'static [&'static str],
}

impl Index {
    /// Create a non-unique index
    pub const fn on(columns: &'static [&'static str]) -> Self {
        Self { columns }
    }
}

/// Table schema definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub indexes: &'static [Index],
}

impl TableSchema {
    /// SQL column names in declaration order
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// CSV header names in declaration order
    pub fn csv_fields(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.csv_name()).collect()
    }
}
