//! # Partner Repository
//!
//! Database operations for customers and suppliers. Both live in one table
//! discriminated by `kind`; the sync reconciler matches partners across
//! replicas by name, exactly like products.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use tradepost_core::validation::{validate_name, validate_partner_request};
use tradepost_core::{CreatePartnerRequest, Partner, PartnerKind, UpdatePartnerRequest};

const SELECT_COLUMNS: &str = "id, name, kind, phone, email, address, is_active, created_at";

/// Repository for partner database operations.
#[derive(Debug, Clone)]
pub struct PartnerRepository {
    pool: SqlitePool,
}

impl PartnerRepository {
    /// Creates a new PartnerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PartnerRepository { pool }
    }

    /// Lists partners ordered by name.
    ///
    /// ## Arguments
    /// * `search` - Substring match on name
    /// * `kind` - Restrict to customers or suppliers
    pub async fn list(
        &self,
        search: Option<&str>,
        kind: Option<PartnerKind>,
    ) -> DbResult<Vec<Partner>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM partners WHERE 1 = 1"
        ));

        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            qb.push(" AND name LIKE ");
            qb.push_bind(format!("%{term}%"));
        }
        if let Some(kind) = kind {
            qb.push(" AND kind = ");
            qb.push_bind(kind);
        }
        qb.push(" ORDER BY name");

        let partners = qb
            .build_query_as::<Partner>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = partners.len(), "Listed partners");
        Ok(partners)
    }

    /// Returns every partner row, for the sync snapshot.
    pub async fn list_all(&self) -> DbResult<Vec<Partner>> {
        let partners = sqlx::query_as::<_, Partner>(&format!(
            "SELECT {SELECT_COLUMNS} FROM partners ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(partners)
    }

    /// Gets a partner by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Partner>> {
        let partner = sqlx::query_as::<_, Partner>(&format!(
            "SELECT {SELECT_COLUMNS} FROM partners WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(partner)
    }

    /// Creates a partner with a fresh id.
    pub async fn create(&self, req: &CreatePartnerRequest) -> DbResult<Partner> {
        validate_partner_request(req)?;

        let partner = Partner {
            id: Uuid::new_v4().to_string(),
            name: req.name.trim().to_string(),
            kind: req.kind,
            phone: req.phone.clone(),
            email: req.email.clone(),
            address: req.address.clone(),
            is_active: req.is_active,
            created_at: Utc::now(),
        };

        debug!(id = %partner.id, name = %partner.name, kind = ?partner.kind, "Creating partner");
        self.insert_row(&partner).await?;

        Ok(partner)
    }

    /// Applies a partial update and returns the new row.
    pub async fn update(&self, id: &str, req: &UpdatePartnerRequest) -> DbResult<Partner> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Partner", id))?;

        let merged = Partner {
            id: current.id.clone(),
            name: req.name.clone().unwrap_or(current.name).trim().to_string(),
            kind: req.kind.unwrap_or(current.kind),
            phone: req.phone.clone().or(current.phone),
            email: req.email.clone().or(current.email),
            address: req.address.clone().or(current.address),
            is_active: req.is_active.unwrap_or(current.is_active),
            created_at: current.created_at,
        };

        validate_name("name", &merged.name)?;

        sqlx::query(
            r#"
            UPDATE partners SET
                name = ?2, kind = ?3, phone = ?4, email = ?5,
                address = ?6, is_active = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&merged.id)
        .bind(&merged.name)
        .bind(merged.kind)
        .bind(&merged.phone)
        .bind(&merged.email)
        .bind(&merged.address)
        .bind(merged.is_active)
        .execute(&self.pool)
        .await?;

        Ok(merged)
    }

    /// Deletes a partner. Existing transactions keep their partner_id; the
    /// reference simply stops resolving (cross-replica ids are loose).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM partners WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Partner", id));
        }

        debug!(id = %id, "Deleted partner");
        Ok(())
    }

    /// Reconciles one incoming partner from the sync peer, matching by name.
    /// Same contract as the product upsert: overwrite under the local id, or
    /// insert under a fresh one.
    pub async fn upsert_from_peer(&self, incoming: &Partner) -> DbResult<()> {
        let local_id: Option<String> =
            sqlx::query_scalar("SELECT id FROM partners WHERE name = ?1 ORDER BY id LIMIT 1")
                .bind(&incoming.name)
                .fetch_optional(&self.pool)
                .await?;

        match local_id {
            Some(id) => {
                debug!(local_id = %id, name = %incoming.name, "Sync: replacing partner");
                sqlx::query(
                    r#"
                    UPDATE partners SET
                        name = ?2, kind = ?3, phone = ?4, email = ?5,
                        address = ?6, is_active = ?7, created_at = ?8
                    WHERE id = ?1
                    "#,
                )
                .bind(&id)
                .bind(&incoming.name)
                .bind(incoming.kind)
                .bind(&incoming.phone)
                .bind(&incoming.email)
                .bind(&incoming.address)
                .bind(incoming.is_active)
                .bind(incoming.created_at)
                .execute(&self.pool)
                .await?;
            }
            None => {
                let fresh = Partner {
                    id: Uuid::new_v4().to_string(),
                    ..incoming.clone()
                };
                debug!(id = %fresh.id, name = %fresh.name, "Sync: inserting partner");
                self.insert_row(&fresh).await?;
            }
        }

        Ok(())
    }

    async fn insert_row(&self, partner: &Partner) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO partners (id, name, kind, phone, email, address, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&partner.id)
        .bind(&partner.name)
        .bind(partner.kind)
        .bind(&partner.phone)
        .bind(&partner.email)
        .bind(&partner.address)
        .bind(partner.is_active)
        .bind(partner.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
