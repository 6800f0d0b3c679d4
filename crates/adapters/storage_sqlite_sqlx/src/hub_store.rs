//! `SQLite` implementation of the hub store.

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hearth_app::ports::EntityStore;
use hearth_domain::entity::Entity;
use hearth_domain::error::{HearthError, NotFoundError};
use hearth_domain::hub::Hub;
use hearth_domain::id::{DeviceId, DwellingId, HubId};

use crate::error::{StorageError, insert_error};

/// Wrapper for converting database rows into domain [`Hub`] values.
struct Wrapper(Hub);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Hub> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let dwelling_id: Option<String> = row.try_get("dwelling_id")?;
        let paired_json: String = row.try_get("paired_device_ids")?;

        let id = HubId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let dwelling_id = dwelling_id
            .map(|s| DwellingId::from_str(&s))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let paired_device_ids: Vec<DeviceId> = serde_json::from_str(&paired_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Hub {
            id,
            name,
            dwelling_id,
            paired_device_ids,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO hubs (id, name, dwelling_id, paired_device_ids)
    VALUES (?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM hubs WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM hubs";

const UPDATE: &str = r"
    UPDATE hubs
    SET name = ?, dwelling_id = ?, paired_device_ids = ?
    WHERE id = ?
";

const DELETE_BY_ID: &str = "DELETE FROM hubs WHERE id = ?";

/// `SQLite`-backed hub store.
pub struct SqliteHubStore {
    pool: SqlitePool,
}

impl SqliteHubStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EntityStore<Hub> for SqliteHubStore {
    fn create(&self, hub: Hub) -> impl Future<Output = Result<Hub, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let paired_json =
                serde_json::to_string(&hub.paired_device_ids).map_err(StorageError::from)?;

            sqlx::query(INSERT)
                .bind(hub.id.to_string())
                .bind(&hub.name)
                .bind(hub.dwelling_id.map(|id| id.to_string()))
                .bind(&paired_json)
                .execute(&pool)
                .await
                .map_err(|err| insert_error(err, Hub::KIND, hub.id.to_string()))?;

            let row: Wrapper = sqlx::query_as(SELECT_BY_ID)
                .bind(hub.id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get(&self, id: HubId) -> impl Future<Output = Result<Option<Hub>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn list(&self) -> impl Future<Output = Result<Vec<Hub>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, hub: Hub) -> impl Future<Output = Result<Hub, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let paired_json =
                serde_json::to_string(&hub.paired_device_ids).map_err(StorageError::from)?;

            let result = sqlx::query(UPDATE)
                .bind(&hub.name)
                .bind(hub.dwelling_id.map(|id| id.to_string()))
                .bind(&paired_json)
                .bind(hub.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: Hub::KIND,
                    id: hub.id.to_string(),
                }
                .into());
            }

            let row: Wrapper = sqlx::query_as(SELECT_BY_ID)
                .bind(hub.id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn delete(&self, id: HubId) -> impl Future<Output = Result<(), HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: Hub::KIND,
                    id: id.to_string(),
                }
                .into());
            }

            Ok(())
        }
    }
}
