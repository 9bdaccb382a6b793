//! # Settings Repository
//!
//! A single settings row per replica, created lazily with defaults the
//! first time anything reads it. `remote_url` here is what the sync
//! trigger dials unless the server config overrides it.

use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use tradepost_core::{Settings, UpdateSettingsRequest};

const SELECT_COLUMNS: &str = "id, store_name, currency, address, phone, theme, remote_url";

/// Repository for the store-wide settings singleton.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Returns the settings row, creating it with defaults on first read.
    pub async fn get(&self) -> DbResult<Settings> {
        let existing = sqlx::query_as::<_, Settings>(&format!(
            "SELECT {SELECT_COLUMNS} FROM settings LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        if let Some(settings) = existing {
            return Ok(settings);
        }

        let defaults = Settings::with_defaults(Uuid::new_v4().to_string());
        info!(id = %defaults.id, "Seeding default settings");
        sqlx::query(
            r#"
            INSERT INTO settings (id, store_name, currency, address, phone, theme, remote_url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&defaults.id)
        .bind(&defaults.store_name)
        .bind(&defaults.currency)
        .bind(&defaults.address)
        .bind(&defaults.phone)
        .bind(&defaults.theme)
        .bind(&defaults.remote_url)
        .execute(&self.pool)
        .await?;

        Ok(defaults)
    }

    /// Applies a partial update and returns the new settings.
    pub async fn update(&self, req: &UpdateSettingsRequest) -> DbResult<Settings> {
        let current = self.get().await?;

        let merged = Settings {
            id: current.id.clone(),
            store_name: req.store_name.clone().unwrap_or(current.store_name),
            currency: req.currency.clone().unwrap_or(current.currency),
            address: req.address.clone().or(current.address),
            phone: req.phone.clone().or(current.phone),
            theme: req.theme.clone().unwrap_or(current.theme),
            remote_url: req.remote_url.clone().or(current.remote_url),
        };

        sqlx::query(
            r#"
            UPDATE settings SET
                store_name = ?2, currency = ?3, address = ?4,
                phone = ?5, theme = ?6, remote_url = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&merged.id)
        .bind(&merged.store_name)
        .bind(&merged.currency)
        .bind(&merged.address)
        .bind(&merged.phone)
        .bind(&merged.theme)
        .bind(&merged.remote_url)
        .execute(&self.pool)
        .await?;

        debug!(id = %merged.id, "Updated settings");
        Ok(merged)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_first_read_seeds_defaults() {
        let db = test_db().await;

        let settings = db.settings().get().await.unwrap();
        assert_eq!(settings.store_name, "My Store");
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.theme, "light");
        assert!(settings.remote_url.is_none());

        // Second read returns the same row, not a new one.
        let again = db.settings().get().await.unwrap();
        assert_eq!(again.id, settings.id);
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let db = test_db().await;

        let updated = db
            .settings()
            .update(&UpdateSettingsRequest {
                store_name: Some("Tradepost North".to_string()),
                remote_url: Some("http://peer.local:5000".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.store_name, "Tradepost North");
        assert_eq!(updated.remote_url.as_deref(), Some("http://peer.local:5000"));
        assert_eq!(updated.currency, "USD", "untouched fields keep defaults");

        let reread = db.settings().get().await.unwrap();
        assert_eq!(reread.store_name, "Tradepost North");
    }
}
