use crate::schema::TableSchema;

/// Generate DROP TABLE SQL for a table schema
pub fn generate_drop_table(schema: &TableSchema) -> String {
    format!("DROP TABLE IF EXISTS {}", schema.name)
}

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);

    let columns: Vec<String> = schema
        .columns
        .iter()
        .map(|col| format!("    {} {}", col.name, col.col_type.sql_type()))
        .collect();

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for the schema's declared indexes
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .indexes
        .iter()
        .map(|index| {
            format!(
                "CREATE INDEX idx_{}_{} ON {}({})",
                schema.name,
                index.columns.join("_"),
                schema.name,
                index.columns.join(", ")
            )
        })
        .collect()
}

/// Generate a positional INSERT statement covering every column
pub fn generate_insert(schema: &TableSchema) -> String {
    let columns = schema.column_names();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name,
        columns.join(", "),
        placeholders.join(", ")
    )
}
