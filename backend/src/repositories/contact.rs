//! Contact repository for database operations
//!
//! Every read, update, and delete filters by `(id, user_id)` jointly.
//! An ID-only lookup would let one user reach another user's records.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Contact record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a contact
#[derive(Debug, Clone)]
pub struct CreateContact {
    pub user_id: Uuid,
    pub name: String,
    pub phone: String,
}

/// Contact repository for database operations
pub struct ContactRepository;

impl ContactRepository {
    /// Create a new contact
    pub async fn create(pool: &PgPool, input: CreateContact) -> Result<ContactRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, ContactRecord>(
            r#"
            INSERT INTO contacts (user_id, name, phone)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, phone, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(&input.phone)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get a contact by ID, scoped to its owner
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ContactRecord>> {
        let record = sqlx::query_as::<_, ContactRecord>(
            r#"
            SELECT id, user_id, name, phone, created_at, updated_at
            FROM contacts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List all contacts owned by a user, in insertion order
    pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<ContactRecord>> {
        let records = sqlx::query_as::<_, ContactRecord>(
            r#"
            SELECT id, user_id, name, phone, created_at, updated_at
            FROM contacts
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Check whether the owner already has a contact with this phone,
    /// optionally excluding one record (the one being edited)
    pub async fn phone_exists(
        pool: &PgPool,
        user_id: Uuid,
        phone: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM contacts
                WHERE user_id = $1 AND phone = $2 AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(user_id)
        .bind(phone)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Update name and phone of an owned contact; None when not owned
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        name: &str,
        phone: &str,
    ) -> Result<Option<ContactRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, ContactRecord>(
            r#"
            UPDATE contacts
            SET name = $3, phone = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, phone, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(phone)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete an owned contact, returning the deleted row; None when not owned
    pub async fn delete(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ContactRecord>> {
        let record = sqlx::query_as::<_, ContactRecord>(
            r#"
            DELETE FROM contacts
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, phone, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
