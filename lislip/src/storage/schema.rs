//! Schema reconciliation for the tables this crate owns
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS` by their owners. The
//! functions here then bring an existing table in line with the declared
//! schema: missing columns are added, unique indexes and foreign keys are
//! created when absent, and on PostgreSQL mismatched column types are
//! converted in place. SQLite cannot change a column type or add a foreign
//! key without rebuilding the table, so there those are only reported.

use sqlx::{Pool, Postgres, Row, Sqlite};

use super::errors::StorageError;

/// A column the application expects to find in a table
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnSpec {
    /// Column name as stored in the catalog
    pub name: &'static str,
    /// Type name as reported by the database catalog
    pub sql_type: &'static str,
    /// Column definition used when the column has to be added
    pub definition: &'static str,
}

/// How an existing table differs from its declared columns
#[derive(Debug, Default)]
struct ColumnDiff<'a> {
    missing: Vec<&'a ColumnSpec>,
    /// Declared column paired with the type found in the catalog
    mismatched: Vec<(&'a ColumnSpec, String)>,
}

/// Add missing columns to a SQLite table; returns the names of added columns
pub(crate) async fn reconcile_sqlite_table(
    pool: &Pool<Sqlite>,
    table_name: &str,
    expected_columns: &[ColumnSpec],
) -> Result<Vec<String>, StorageError> {
    let rows = sqlx::query("SELECT name, type FROM pragma_table_info(?)")
        .bind(table_name)
        .fetch_all(pool)
        .await?;

    if rows.is_empty() {
        return Err(StorageError::Schema(format!(
            "Table '{table_name}' does not exist"
        )));
    }

    let actual_columns: Vec<(String, String)> = rows
        .iter()
        .map(|row| (row.get::<String, _>("name"), row.get::<String, _>("type")))
        .collect();

    let diff = compare_columns(table_name, expected_columns, &actual_columns);

    for (spec, actual_type) in &diff.mismatched {
        tracing::warn!(
            "Column '{}' in table '{}' is '{}' but expected '{}'; \
             SQLite needs a table rebuild to change it",
            spec.name,
            table_name,
            actual_type,
            spec.sql_type
        );
    }

    let mut added = Vec::new();
    for spec in diff.missing {
        tracing::info!("Adding column '{}' to table '{}'", spec.name, table_name);
        sqlx::query(&format!(
            "ALTER TABLE {table_name} ADD COLUMN {}",
            spec.definition
        ))
        .execute(pool)
        .await
        .map_err(|e| StorageError::Schema(format!("Failed to add column '{}': {e}", spec.name)))?;
        added.push(spec.name.to_string());
    }

    Ok(added)
}

/// Make sure a single-column unique index exists on a SQLite table
///
/// Returns `true` when an index had to be created. Fails if the column
/// already holds duplicate values.
pub(crate) async fn ensure_unique_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
    column: &str,
) -> Result<bool, StorageError> {
    let existing: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM pragma_index_list(?1) AS il, pragma_index_info(il.name) AS ii
        WHERE il."unique" = 1
          AND ii.name = ?2
          AND (SELECT COUNT(*) FROM pragma_index_info(il.name)) = 1
        "#,
    )
    .bind(table_name)
    .bind(column)
    .fetch_one(pool)
    .await?;

    if existing > 0 {
        return Ok(false);
    }

    tracing::info!("Adding unique index on '{}.{}'", table_name, column);
    sqlx::query(&format!(
        r#"CREATE UNIQUE INDEX IF NOT EXISTS {table_name}_{column}_key ON {table_name}("{column}")"#
    ))
    .execute(pool)
    .await
    .map_err(|e| {
        StorageError::Schema(format!("Failed to make '{table_name}.{column}' unique: {e}"))
    })?;

    Ok(true)
}

/// Whether a SQLite table declares a foreign key from `column` to `ref_table`
///
/// A missing key is logged; adding one requires rebuilding the table.
pub(crate) async fn check_foreign_key_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
    column: &str,
    ref_table: &str,
) -> Result<bool, StorageError> {
    let count: i64 = sqlx::query_scalar(
        r#"SELECT COUNT(*) FROM pragma_foreign_key_list(?) WHERE "from" = ? AND "table" = ?"#,
    )
    .bind(table_name)
    .bind(column)
    .bind(ref_table)
    .fetch_one(pool)
    .await?;

    if count == 0 {
        tracing::warn!(
            "Table '{}' has no foreign key from '{}' to '{}'; \
             SQLite needs a table rebuild to add it",
            table_name,
            column,
            ref_table
        );
    }

    Ok(count > 0)
}

/// Add missing columns and fix column types of a PostgreSQL table
///
/// Returns the names of added columns.
pub(crate) async fn reconcile_postgres_table(
    pool: &Pool<Postgres>,
    table_name: &str,
    expected_columns: &[ColumnSpec],
) -> Result<Vec<String>, StorageError> {
    let rows = sqlx::query(
        "SELECT column_name, data_type FROM information_schema.columns
         WHERE table_name = $1 ORDER BY ordinal_position",
    )
    .bind(table_name)
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Err(StorageError::Schema(format!(
            "Table '{table_name}' does not exist"
        )));
    }

    let actual_columns: Vec<(String, String)> = rows
        .iter()
        .map(|row| {
            let name: String = row.get("column_name");
            let type_: String = row.get("data_type");
            (name, type_)
        })
        .collect();

    let diff = compare_columns(table_name, expected_columns, &actual_columns);

    // Narrowing conversions may fail or lose data; that is accepted here
    for (spec, actual_type) in &diff.mismatched {
        tracing::warn!(
            "Converting column '{}' in table '{}' from '{}' to '{}'",
            spec.name,
            table_name,
            actual_type,
            spec.sql_type
        );
        sqlx::query(&format!(
            r#"ALTER TABLE {table_name} ALTER COLUMN "{name}"
               TYPE {sql_type} USING "{name}"::{sql_type}"#,
            name = spec.name,
            sql_type = spec.sql_type,
        ))
        .execute(pool)
        .await
        .map_err(|e| {
            StorageError::Schema(format!("Failed to convert column '{}': {e}", spec.name))
        })?;
    }

    let mut added = Vec::new();
    for spec in diff.missing {
        tracing::info!("Adding column '{}' to table '{}'", spec.name, table_name);
        sqlx::query(&format!(
            "ALTER TABLE {table_name} ADD COLUMN IF NOT EXISTS {}",
            spec.definition
        ))
        .execute(pool)
        .await
        .map_err(|e| StorageError::Schema(format!("Failed to add column '{}': {e}", spec.name)))?;
        added.push(spec.name.to_string());
    }

    Ok(added)
}

/// Make sure a unique index exists on a PostgreSQL column
///
/// The name matches the one PostgreSQL gives an inline `UNIQUE`
/// constraint, so tables created by this crate are left untouched.
pub(crate) async fn ensure_unique_postgres(
    pool: &Pool<Postgres>,
    table_name: &str,
    column: &str,
) -> Result<(), StorageError> {
    sqlx::query(&format!(
        r#"CREATE UNIQUE INDEX IF NOT EXISTS {table_name}_{column}_key ON {table_name}("{column}")"#
    ))
    .execute(pool)
    .await
    .map_err(|e| {
        StorageError::Schema(format!("Failed to make '{table_name}.{column}' unique: {e}"))
    })?;
    Ok(())
}

/// Add a cascading foreign key from `column` to `ref_table(id)` if none exists
pub(crate) async fn ensure_foreign_key_postgres(
    pool: &Pool<Postgres>,
    table_name: &str,
    column: &str,
    ref_table: &str,
) -> Result<(), StorageError> {
    let existing: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
           ON tc.constraint_name = kcu.constraint_name
          AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_name = $1
           AND kcu.column_name = $2",
    )
    .bind(table_name)
    .bind(column)
    .fetch_one(pool)
    .await?;

    if existing > 0 {
        return Ok(());
    }

    tracing::info!(
        "Adding foreign key '{}.{}' -> '{}'",
        table_name,
        column,
        ref_table
    );
    sqlx::query(&format!(
        r#"ALTER TABLE {table_name} ADD CONSTRAINT {table_name}_{column}_fkey
           FOREIGN KEY ("{column}") REFERENCES {ref_table}(id) ON DELETE CASCADE"#
    ))
    .execute(pool)
    .await
    .map_err(|e| {
        StorageError::Schema(format!("Failed to add foreign key on '{table_name}.{column}': {e}"))
    })?;
    Ok(())
}

/// Compare declared and actual columns, logging extra columns
fn compare_columns<'a>(
    table_name: &str,
    expected_columns: &'a [ColumnSpec],
    actual_columns: &[(String, String)],
) -> ColumnDiff<'a> {
    let mut diff = ColumnDiff::default();

    for spec in expected_columns {
        match actual_columns.iter().find(|(name, _)| name == spec.name) {
            Some((_, actual_type)) if actual_type.eq_ignore_ascii_case(spec.sql_type) => {}
            Some((_, actual_type)) => diff.mismatched.push((spec, actual_type.clone())),
            None => diff.missing.push(spec),
        }
    }

    for (actual_name, _) in actual_columns {
        if !expected_columns.iter().any(|spec| spec.name == actual_name) {
            tracing::warn!(
                "Extra column '{}' found in table '{}'",
                actual_name,
                table_name
            );
        }
    }

    diff
}
