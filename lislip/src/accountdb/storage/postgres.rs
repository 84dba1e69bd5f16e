use sqlx::{Pool, Postgres};

use crate::accountdb::{
    errors::AccountError,
    types::{
        Account, AccountContactRow, AccountWithContacts, EmergencyContact, NewAccount, NewContact,
        collect_account_rows,
    },
};
use crate::storage::{
    ColumnSpec, ensure_foreign_key_postgres, ensure_unique_postgres, reconcile_postgres_table,
};

use super::config::{DB_TABLE_EMERGENCY_CONTACTS, DB_TABLE_USERS};

const USER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        name: "id",
        sql_type: "bigint",
        definition: "id BIGSERIAL",
    },
    ColumnSpec {
        name: "name",
        sql_type: "text",
        definition: "name TEXT NOT NULL DEFAULT ''",
    },
    ColumnSpec {
        name: "email",
        sql_type: "text",
        definition: "email TEXT NOT NULL DEFAULT ''",
    },
    ColumnSpec {
        name: "createdAt",
        sql_type: "timestamp with time zone",
        definition: r#""createdAt" TIMESTAMPTZ NOT NULL DEFAULT now()"#,
    },
    ColumnSpec {
        name: "updatedAt",
        sql_type: "timestamp with time zone",
        definition: r#""updatedAt" TIMESTAMPTZ NOT NULL DEFAULT now()"#,
    },
];

const CONTACT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        name: "id",
        sql_type: "bigint",
        definition: "id BIGSERIAL",
    },
    ColumnSpec {
        name: "userId",
        sql_type: "bigint",
        definition: r#""userId" BIGINT"#,
    },
    ColumnSpec {
        name: "contactName",
        sql_type: "text",
        definition: r#""contactName" TEXT NOT NULL DEFAULT ''"#,
    },
    ColumnSpec {
        name: "contactPhone",
        sql_type: "text",
        definition: r#""contactPhone" TEXT"#,
    },
    ColumnSpec {
        name: "contactEmail",
        sql_type: "text",
        definition: r#""contactEmail" TEXT"#,
    },
    ColumnSpec {
        name: "createdAt",
        sql_type: "timestamp with time zone",
        definition: r#""createdAt" TIMESTAMPTZ NOT NULL DEFAULT now()"#,
    },
    ColumnSpec {
        name: "updatedAt",
        sql_type: "timestamp with time zone",
        definition: r#""updatedAt" TIMESTAMPTZ NOT NULL DEFAULT now()"#,
    },
];

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), AccountError> {
    let users_table = DB_TABLE_USERS.as_str();
    let contacts_table = DB_TABLE_EMERGENCY_CONTACTS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {users_table} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            "createdAt" TIMESTAMPTZ NOT NULL,
            "updatedAt" TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| AccountError::Storage(e.to_string()))?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {contacts_table} (
            id BIGSERIAL PRIMARY KEY,
            "userId" BIGINT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
            "contactName" TEXT NOT NULL,
            "contactPhone" TEXT,
            "contactEmail" TEXT,
            "createdAt" TIMESTAMPTZ NOT NULL,
            "updatedAt" TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| AccountError::Storage(e.to_string()))?;

    Ok(())
}

/// Bring existing tables in line with the declared columns and constraints
pub(super) async fn reconcile_tables_postgres(pool: &Pool<Postgres>) -> Result<(), AccountError> {
    let users_table = DB_TABLE_USERS.as_str();
    let contacts_table = DB_TABLE_EMERGENCY_CONTACTS.as_str();

    reconcile_postgres_table(pool, users_table, USER_COLUMNS).await?;
    reconcile_postgres_table(pool, contacts_table, CONTACT_COLUMNS).await?;
    ensure_unique_postgres(pool, users_table, "email").await?;
    ensure_foreign_key_postgres(pool, contacts_table, "userId", users_table).await?;
    Ok(())
}

pub(super) async fn count_accounts_postgres(pool: &Pool<Postgres>) -> Result<i64, AccountError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table_name}"))
        .fetch_one(pool)
        .await
        .map_err(|e| AccountError::Storage(e.to_string()))
}

pub(super) async fn get_account_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<Account>, AccountError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, Account>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AccountError::Storage(e.to_string()))
}

pub(super) async fn insert_account_postgres(
    pool: &Pool<Postgres>,
    account: NewAccount,
) -> Result<Account, AccountError> {
    let table_name = DB_TABLE_USERS.as_str();
    let now = chrono::Utc::now();

    let result = sqlx::query_as::<_, Account>(&format!(
        r#"
        INSERT INTO {table_name} (name, email, "createdAt", "updatedAt")
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#
    ))
    .bind(&account.name)
    .bind(&account.email)
    .bind(now) // createdAt
    .bind(now) // updatedAt
    .fetch_one(pool)
    .await?;

    Ok(result)
}

pub(super) async fn insert_contact_postgres(
    pool: &Pool<Postgres>,
    contact: NewContact,
) -> Result<EmergencyContact, AccountError> {
    let table_name = DB_TABLE_EMERGENCY_CONTACTS.as_str();
    let now = chrono::Utc::now();

    let result = sqlx::query_as::<_, EmergencyContact>(&format!(
        r#"
        INSERT INTO {table_name}
            ("userId", "contactName", "contactPhone", "contactEmail", "createdAt", "updatedAt")
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#
    ))
    .bind(contact.user_id)
    .bind(&contact.contact_name)
    .bind(&contact.contact_phone)
    .bind(&contact.contact_email)
    .bind(now) // createdAt
    .bind(now) // updatedAt
    .fetch_one(pool)
    .await?;

    Ok(result)
}

pub(super) async fn get_account_with_contacts_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<AccountWithContacts>, AccountError> {
    let users_table = DB_TABLE_USERS.as_str();
    let contacts_table = DB_TABLE_EMERGENCY_CONTACTS.as_str();

    let rows = sqlx::query_as::<_, AccountContactRow>(&format!(
        r#"
        SELECT
            u.id AS id,
            u.name AS name,
            u.email AS email,
            u."createdAt" AS created_at,
            u."updatedAt" AS updated_at,
            c.id AS contact_id,
            c."contactName" AS contact_name,
            c."contactPhone" AS contact_phone,
            c."contactEmail" AS contact_email,
            c."createdAt" AS contact_created_at,
            c."updatedAt" AS contact_updated_at
        FROM {users_table} u
        LEFT JOIN {contacts_table} c ON c."userId" = u.id
        WHERE u.id = $1
        ORDER BY c.id ASC
        "#
    ))
    .bind(id)
    .fetch_all(pool)
    .await
    .map_err(|e| AccountError::Storage(e.to_string()))?;

    Ok(collect_account_rows(rows))
}
