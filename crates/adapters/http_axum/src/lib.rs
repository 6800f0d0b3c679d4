//! # hearth-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON REST API (`/api/devices`, `/api/hubs`, `/api/dwellings`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses, with domain errors
//!   translated to status codes by kind
//!
//! ## Dependency rule
//! Depends on `hearth-app` (for the storage port and services) and
//! `hearth-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
