//! trialdqi Data Layer
//!
//! An immutable, in-memory store of studies, sites, patients and alerts.
//! The store is built once at process start and shared read-only afterwards.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trialdqi_db::{DataStore, EntityLookup};
//!
//! let store = Arc::new(DataStore::seeded());
//! assert!(store.study("NOVA-2024-001").is_some());
//! assert!(store.site("SITE-404").is_none());
//! ```

pub mod store;
pub mod lookup;
pub mod seed;

pub use store::{DataStore, IntegrityIssue, StoreStats};
pub use lookup::{EntityLookup, ResolvedEntity};
