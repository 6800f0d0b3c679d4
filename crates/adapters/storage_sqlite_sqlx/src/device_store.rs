//! `SQLite` implementation of the device store.

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hearth_app::ports::EntityStore;
use hearth_domain::device::{Device, DeviceState, DeviceType};
use hearth_domain::entity::Entity;
use hearth_domain::error::{HearthError, NotFoundError};
use hearth_domain::id::{DeviceId, HubId};

use crate::error::{StorageError, insert_error};

/// Wrapper for converting database rows into domain [`Device`] values
/// without polluting domain structs with database concerns.
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let device_type: String = row.try_get("device_type")?;
        let state_json: String = row.try_get("state")?;
        let paired_hub_id: Option<String> = row.try_get("paired_hub_id")?;

        let id = DeviceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let device_type: DeviceType = serde_json::from_str(&format!("\"{device_type}\""))
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let state: DeviceState =
            serde_json::from_str(&state_json).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let paired_hub_id = paired_hub_id
            .map(|s| HubId::from_str(&s))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Device {
            id,
            name,
            device_type,
            state,
            paired_hub_id,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO devices (id, name, device_type, state, paired_hub_id)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices";

const UPDATE: &str = r"
    UPDATE devices
    SET name = ?, device_type = ?, state = ?, paired_hub_id = ?
    WHERE id = ?
";

const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device store.
pub struct SqliteDeviceStore {
    pool: SqlitePool,
}

impl SqliteDeviceStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EntityStore<Device> for SqliteDeviceStore {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let state_json = serde_json::to_string(&device.state).map_err(StorageError::from)?;

            sqlx::query(INSERT)
                .bind(device.id.to_string())
                .bind(&device.name)
                .bind(device.device_type.to_string())
                .bind(&state_json)
                .bind(device.paired_hub_id.map(|id| id.to_string()))
                .execute(&pool)
                .await
                .map_err(|err| insert_error(err, Device::KIND, device.id.to_string()))?;

            let row: Wrapper = sqlx::query_as(SELECT_BY_ID)
                .bind(device.id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HearthError>> + Send {
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

    fn list(&self) -> impl Future<Output = Result<Vec<Device>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let state_json = serde_json::to_string(&device.state).map_err(StorageError::from)?;

            let result = sqlx::query(UPDATE)
                .bind(&device.name)
                .bind(device.device_type.to_string())
                .bind(&state_json)
                .bind(device.paired_hub_id.map(|id| id.to_string()))
                .bind(device.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: Device::KIND,
                    id: device.id.to_string(),
                }
                .into());
            }

            let row: Wrapper = sqlx::query_as(SELECT_BY_ID)
                .bind(device.id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: Device::KIND,
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
    use hearth_domain::device::ThermostatMode;

    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteDeviceStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceStore::new(db.pool().clone())
    }

    fn test_device(name: &str, device_type: DeviceType) -> Device {
        Device::builder()
            .name(name)
            .device_type(device_type)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_device_when_valid() {
        let store = setup().await;
        let device = test_device("Porch Light", DeviceType::Switch);
        let id = device.id;

        let created = store.create(device).await.unwrap();
        assert_eq!(created.id, id);

        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_reject_create_when_id_already_exists() {
        let store = setup().await;
        let device = test_device("Porch Light", DeviceType::Switch);

        store.create(device.clone()).await.unwrap();
        let result = store.create(device).await;

        assert!(matches!(result, Err(HearthError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let store = setup().await;
        let result = store.get(DeviceId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_devices() {
        let store = setup().await;
        store
            .create(test_device("Porch Light", DeviceType::Switch))
            .await
            .unwrap();
        store
            .create(test_device("Nursery Cam", DeviceType::Camera))
            .await
            .unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_update_device_when_exists() {
        let store = setup().await;
        let mut device = store
            .create(test_device("Living Room", DeviceType::Thermostat))
            .await
            .unwrap();

        device.name = "Upstairs".to_string();
        device
            .set_state(DeviceState::Thermostat {
                mode: ThermostatMode::Cool,
                current_temperature: 74.5,
                target_temperature: 70.0,
            })
            .unwrap();
        store.update(device.clone()).await.unwrap();

        let fetched = store.get(device.id).await.unwrap().unwrap();
        assert_eq!(fetched, device);
    }

    #[tokio::test]
    async fn should_reject_update_when_device_is_absent() {
        let store = setup().await;
        let result = store
            .update(test_device("Porch Light", DeviceType::Switch))
            .await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_device_when_exists() {
        let store = setup().await;
        let device = store
            .create(test_device("Porch Light", DeviceType::Switch))
            .await
            .unwrap();

        store.delete(device.id).await.unwrap();

        let result = store.get(device.id).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_reject_delete_when_device_is_absent() {
        let store = setup().await;
        let result = store.delete(DeviceId::new()).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_preserve_state_fields_through_roundtrip() {
        let store = setup().await;
        let device = Device::builder()
            .name("Front Door")
            .device_type(DeviceType::Lock)
            .state(DeviceState::Lock {
                is_locked: false,
                pin_code: Some("4812".to_string()),
            })
            .build()
            .unwrap();

        let created = store.create(device).await.unwrap();

        assert_eq!(
            created.state,
            DeviceState::Lock {
                is_locked: false,
                pin_code: Some("4812".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn should_persist_paired_hub_id_when_set() {
        let store = setup().await;

        // The hub row must exist for the foreign key to hold.
        let hub_id = HubId::new();
        sqlx::query("INSERT INTO hubs (id, name) VALUES (?, ?)")
            .bind(hub_id.to_string())
            .bind("Main Hub")
            .execute(&store.pool)
            .await
            .unwrap();

        let mut device = store
            .create(test_device("Porch Light", DeviceType::Switch))
            .await
            .unwrap();
        device.paired_hub_id = Some(hub_id);
        let updated = store.update(device).await.unwrap();

        assert_eq!(updated.paired_hub_id, Some(hub_id));
    }
}
