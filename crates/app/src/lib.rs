//! # hearth-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **storage port** adapters must implement (driven/outbound):
//!   [`EntityStore`](ports::EntityStore), one generic CRUD contract shared
//!   by every entity kind
//! - Define **use-case services** (driving/inbound):
//!   - `DeviceService` — create, inspect, re-state, delete devices
//!   - `HubService` — create hubs, pair/unpair devices, query through hubs
//!   - `DwellingService` — create dwellings, occupancy, hub installation
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `hearth-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
