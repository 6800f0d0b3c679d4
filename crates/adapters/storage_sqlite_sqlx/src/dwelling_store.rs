//! `SQLite` implementation of the dwelling store.

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hearth_app::ports::EntityStore;
use hearth_domain::dwelling::Dwelling;
use hearth_domain::entity::Entity;
use hearth_domain::error::{HearthError, NotFoundError};
use hearth_domain::id::{DwellingId, HubId};

use crate::error::{StorageError, insert_error};

/// Wrapper for converting database rows into domain [`Dwelling`] values.
struct Wrapper(Dwelling);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Dwelling> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let is_occupied: bool = row.try_get("is_occupied")?;
        let hub_ids_json: String = row.try_get("hub_ids")?;

        let id = DwellingId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let hub_ids: Vec<HubId> = serde_json::from_str(&hub_ids_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Dwelling {
            id,
            name,
            is_occupied,
            hub_ids,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO dwellings (id, name, is_occupied, hub_ids)
    VALUES (?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM dwellings WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM dwellings";

const UPDATE: &str = r"
    UPDATE dwellings
    SET name = ?, is_occupied = ?, hub_ids = ?
    WHERE id = ?
";

const DELETE_BY_ID: &str = "DELETE FROM dwellings WHERE id = ?";

/// `SQLite`-backed dwelling store.
pub struct SqliteDwellingStore {
    pool: SqlitePool,
}

impl SqliteDwellingStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EntityStore<Dwelling> for SqliteDwellingStore {
    fn create(
        &self,
        dwelling: Dwelling,
    ) -> impl Future<Output = Result<Dwelling, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let hub_ids_json =
                serde_json::to_string(&dwelling.hub_ids).map_err(StorageError::from)?;

            sqlx::query(INSERT)
                .bind(dwelling.id.to_string())
                .bind(&dwelling.name)
                .bind(dwelling.is_occupied)
                .bind(&hub_ids_json)
                .execute(&pool)
                .await
                .map_err(|err| insert_error(err, Dwelling::KIND, dwelling.id.to_string()))?;

            let row: Wrapper = sqlx::query_as(SELECT_BY_ID)
                .bind(dwelling.id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get(
        &self,
        id: DwellingId,
    ) -> impl Future<Output = Result<Option<Dwelling>, HearthError>> + Send {
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

    fn list(&self) -> impl Future<Output = Result<Vec<Dwelling>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        dwelling: Dwelling,
    ) -> impl Future<Output = Result<Dwelling, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let hub_ids_json =
                serde_json::to_string(&dwelling.hub_ids).map_err(StorageError::from)?;

            let result = sqlx::query(UPDATE)
                .bind(&dwelling.name)
                .bind(dwelling.is_occupied)
                .bind(&hub_ids_json)
                .bind(dwelling.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: Dwelling::KIND,
                    id: dwelling.id.to_string(),
                }
                .into());
            }

            let row: Wrapper = sqlx::query_as(SELECT_BY_ID)
                .bind(dwelling.id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn delete(&self, id: DwellingId) -> impl Future<Output = Result<(), HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: Dwelling::KIND,
                    id: id.to_string(),
                }
                .into());
            }

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteDwellingStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDwellingStore::new(db.pool().clone())
    }

    fn test_dwelling(name: &str) -> Dwelling {
        Dwelling::builder().name(name).build().unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_dwelling_when_valid() {
        let store = setup().await;
        let dwelling = test_dwelling("Lake House");
        let id = dwelling.id;

        let created = store.create(dwelling).await.unwrap();
        assert_eq!(created.id, id);
        assert!(!created.is_occupied);

        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_reject_create_when_id_already_exists() {
        let store = setup().await;
        let dwelling = test_dwelling("Lake House");

        store.create(dwelling.clone()).await.unwrap();
        let result = store.create(dwelling).await;

        assert!(matches!(result, Err(HearthError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn should_return_none_when_dwelling_not_found() {
        let store = setup().await;
        let result = store.get(DwellingId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_preserve_occupancy_and_hub_ids_through_roundtrip() {
        let store = setup().await;
        let mut dwelling = store.create(test_dwelling("Lake House")).await.unwrap();

        dwelling.is_occupied = true;
        dwelling.install(HubId::new());
        let updated = store.update(dwelling.clone()).await.unwrap();

        assert!(updated.is_occupied);
        assert_eq!(updated.hub_ids, dwelling.hub_ids);
    }

    #[tokio::test]
    async fn should_reject_update_when_dwelling_is_absent() {
        let store = setup().await;
        let result = store.update(test_dwelling("Lake House")).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_dwelling_when_exists() {
        let store = setup().await;
        let dwelling = store.create(test_dwelling("Lake House")).await.unwrap();

        store.delete(dwelling.id).await.unwrap();

        let result = store.get(dwelling.id).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_dwellings() {
        let store = setup().await;
        store.create(test_dwelling("Lake House")).await.unwrap();
        store.create(test_dwelling("City Flat")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
