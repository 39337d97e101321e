use rusqlite::{params, Connection, Transaction};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use super::schema_gen::{
    generate_create_table, generate_drop_table, generate_indexes, generate_insert,
};
use crate::config::LoadOptions;
use crate::error::{Result, StoreError};
use crate::parser::{parse_record, HeaderMap, Record};
use crate::schema::{TableSchema, POKEMON};
use crate::ui::{Phase, Ui};

const BATCH_SIZE: usize = 1000;

/// Replace the `pokemon` table with the contents of a CSV file.
///
/// Drop, create, inserts and index creation run in one transaction that is
/// committed once at the end. Any error rolls the whole load back, so the
/// previous table (if any) survives a failed import.
///
/// Returns the number of rows inserted.
pub fn import_csv(
    conn: &mut Connection,
    csv_path: &Path,
    options: &LoadOptions,
    ui: &mut impl Ui,
) -> Result<u64> {
    let input_err = |source| StoreError::Input {
        path: csv_path.to_path_buf(),
        source,
    };

    let file = File::open(csv_path).map_err(input_err)?;
    let total = file.metadata().map(|m| m.len()).unwrap_or(0);
    let mut reader = BufReader::new(file);

    ui.set_phase(Phase::Preparing);
    let tx = conn.transaction()?;
    reset_table(&tx, &POKEMON)?;

    let mut line = String::new();
    let mut consumed = reader.read_line(&mut line).map_err(input_err)? as u64;
    if consumed == 0 {
        return Err(StoreError::MissingHeader);
    }
    let header = HeaderMap::parse(trim_line_end(&line), &options.separator, &POKEMON)?;

    ui.set_phase(Phase::Importing);
    let insert_sql = generate_insert(&POKEMON);
    let mut count: u64 = 0;
    let mut line_number: usize = 1;
    let mut batch: Vec<Record> = Vec::with_capacity(BATCH_SIZE);

    loop {
        line.clear();
        let read = reader.read_line(&mut line).map_err(input_err)?;
        if read == 0 {
            break;
        }
        consumed += read as u64;
        line_number += 1;

        let content = trim_line_end(&line);
        if content.trim().is_empty() {
            continue;
        }

        batch.push(parse_record(content, line_number, &options.separator, &header)?);

        if batch.len() >= BATCH_SIZE {
            insert_batch(&tx, &insert_sql, &batch)?;
            count += batch.len() as u64;
            ui.set_progress(consumed, total.max(consumed));
            batch.clear();
        }
    }

    // Insert remaining batch
    if !batch.is_empty() {
        insert_batch(&tx, &insert_sql, &batch)?;
        count += batch.len() as u64;
    }
    ui.set_progress(consumed, total.max(consumed));

    for index_sql in generate_indexes(&POKEMON) {
        tx.execute(&index_sql, [])?;
    }

    ui.set_phase(Phase::Committing);
    tx.commit()?;
    ui.log(format!("{}: {} records", POKEMON.name, count));
    ui.set_phase(Phase::Complete);

    Ok(count)
}

/// Drop and recreate a table inside the load transaction
fn reset_table(tx: &Transaction, schema: &TableSchema) -> Result<()> {
    debug!(table = schema.name, "resetting table");
    tx.execute(&generate_drop_table(schema), [])?;
    tx.execute(&generate_create_table(schema), [])?;
    Ok(())
}

/// Insert a batch of rows into the database
fn insert_batch(tx: &Transaction, sql: &str, batch: &[Record]) -> Result<()> {
    let mut stmt = tx.prepare_cached(sql)?;

    for record in batch {
        stmt.execute(params![
            record.name,
            record.species_id,
            record.height,
            record.weight,
            record.type_1,
            record.type_2,
            record.url_image,
            record.generation_id,
            record.evolves_from_species_id,
        ])?;
    }

    Ok(())
}

/// Strip the line terminator (`\n` or `\r\n`) and nothing else
fn trim_line_end(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
