//! # hearth-domain
//!
//! Pure domain model for the hearth smart-home backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, the
//!   [`Entity`](entity::Entity) abstraction over persisted objects
//! - Define **Devices** (cameras, switches, dimmers, locks, thermostats)
//!   and their type-specific state variants
//! - Define **Hubs** (controllers that devices pair with)
//! - Define **Dwellings** (homes that hubs are installed in)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod entity;
pub mod error;
pub mod id;

pub mod device;
pub mod dwelling;
pub mod hub;
