//! Dwelling — a home that hubs are installed in.
//!
//! Installation is bidirectional: a hub id appears in
//! [`hub_ids`](Dwelling::hub_ids) exactly when that hub's `dwelling_id`
//! points back at this dwelling. The list is append-only; there is no
//! uninstall operation.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{HearthError, ValidationError};
use crate::id::{DwellingId, HubId};

/// A home containing zero or more hubs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dwelling {
    pub id: DwellingId,
    pub name: String,
    pub is_occupied: bool,
    pub hub_ids: Vec<HubId>,
}

impl Dwelling {
    /// Create a builder for constructing a [`Dwelling`].
    #[must_use]
    pub fn builder() -> DwellingBuilder {
        DwellingBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HearthError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Record an installed hub. Membership stays unique.
    pub fn install(&mut self, hub_id: HubId) {
        if !self.hub_ids.contains(&hub_id) {
            self.hub_ids.push(hub_id);
        }
    }
}

impl Entity for Dwelling {
    type Id = DwellingId;

    const KIND: &'static str = "Dwelling";

    fn id(&self) -> DwellingId {
        self.id
    }
}

/// Step-by-step builder for [`Dwelling`].
#[derive(Debug, Default)]
pub struct DwellingBuilder {
    id: Option<DwellingId>,
    name: Option<String>,
}

impl DwellingBuilder {
    #[must_use]
    pub fn id(mut self, id: DwellingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`Dwelling`].
    ///
    /// New dwellings start unoccupied with no hubs.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Dwelling, HearthError> {
        let dwelling = Dwelling {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            is_occupied: false,
            hub_ids: Vec::new(),
        };
        dwelling.validate()?;
        Ok(dwelling)
    }
}
