//! Dwelling service — use-cases for dwellings and hub installation.
//!
//! Installation touches two entities. The hub side is persisted first,
//! then the dwelling side; there is no enclosing transaction, so a
//! dwelling persist failure leaves the hub installed while the dwelling's
//! list is unchanged.

use hearth_domain::dwelling::Dwelling;
use hearth_domain::entity::Entity;
use hearth_domain::error::{HearthError, InvalidStateError, NotFoundError};
use hearth_domain::hub::Hub;
use hearth_domain::id::{DwellingId, HubId};

use crate::ports::EntityStore;

/// Application service for dwelling CRUD and hub installation.
pub struct DwellingService<WS, HS> {
    dwelling_store: WS,
    hub_store: HS,
}

impl<WS, HS> DwellingService<WS, HS>
where
    WS: EntityStore<Dwelling>,
    HS: EntityStore<Hub>,
{
    /// Create a new service backed by the given stores.
    pub fn new(dwelling_store: WS, hub_store: HS) -> Self {
        Self {
            dwelling_store,
            hub_store,
        }
    }

    /// Create a new dwelling with a freshly generated id, unoccupied and
    /// with no hubs.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] when the name is empty, or a
    /// storage error from the store.
    #[tracing::instrument(skip(self, name), fields(name = %name))]
    pub async fn create_dwelling(&self, name: String) -> Result<Dwelling, HearthError> {
        let dwelling = Dwelling::builder().name(name).build()?;
        self.dwelling_store.create(dwelling).await
    }

    /// Look up a dwelling by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when no dwelling with `id`
    /// exists, or a storage error from the store.
    pub async fn get_dwelling(&self, id: DwellingId) -> Result<Dwelling, HearthError> {
        self.dwelling_store.get(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: Dwelling::KIND,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all dwellings.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_dwellings(&self) -> Result<Vec<Dwelling>, HearthError> {
        self.dwelling_store.list().await
    }

    /// Set a dwelling's occupancy flag.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when the dwelling does not exist,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn set_occupied_status(
        &self,
        id: DwellingId,
        is_occupied: bool,
    ) -> Result<Dwelling, HearthError> {
        let mut dwelling = self.get_dwelling(id).await?;
        dwelling.is_occupied = is_occupied;
        self.dwelling_store.update(dwelling).await
    }

    /// Install a hub in a dwelling, updating both sides of the
    /// association.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when either entity is missing,
    /// [`HearthError::InvalidState`] when the hub is already installed
    /// (the message names the dwelling it is currently in), or a storage
    /// error from either store.
    #[tracing::instrument(skip(self))]
    pub async fn install_hub(
        &self,
        dwelling_id: DwellingId,
        hub_id: HubId,
    ) -> Result<Dwelling, HearthError> {
        let mut dwelling = self.get_dwelling(dwelling_id).await?;
        let mut hub = self.load_hub(hub_id).await?;

        if let Some(existing) = hub.dwelling_id {
            return Err(InvalidStateError::HubAlreadyInstalled {
                hub_id,
                dwelling_id: existing,
            }
            .into());
        }

        dwelling.install(hub_id);
        hub.dwelling_id = Some(dwelling_id);

        self.hub_store.update(hub).await?;
        self.dwelling_store.update(dwelling).await
    }

    /// List all hubs installed in a dwelling.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when the dwelling is missing, or
    /// when an installed id no longer resolves to a hub (data-integrity
    /// fault). Storage errors propagate from either store.
    pub async fn list_hubs(&self, dwelling_id: DwellingId) -> Result<Vec<Hub>, HearthError> {
        let dwelling = self.get_dwelling(dwelling_id).await?;

        let mut hubs = Vec::with_capacity(dwelling.hub_ids.len());
        for hub_id in dwelling.hub_ids {
            hubs.push(self.load_hub(hub_id).await?);
        }
        Ok(hubs)
    }

    async fn load_hub(&self, hub_id: HubId) -> Result<Hub, HearthError> {
        self.hub_store.get(hub_id).await?.ok_or_else(|| {
            NotFoundError {
                entity: Hub::KIND,
                id: hub_id.to_string(),
            }
            .into()
        })
    }
}
