//! Quai Work Object
//!
//! Canonical block data model for a hierarchical proof-of-work chain:
//! - Identity and seal hashing of mining headers (Blake2s-256)
//! - Uncle and transaction list roots
//! - A protobuf codec with per-context views (block, work share, transaction proof)
//! - Location-scoped addresses for the prime / region / zone hierarchy
//!
//! Hashing and encoding are pure and synchronous. The only side effect in the
//! crate is the node-info sidecar file, written from a Tokio task.

pub mod config;
pub mod crypto;
pub mod error;
pub mod header;
pub mod location;
pub mod logging;
pub mod node_info;
pub mod proto;
pub mod transaction;
pub mod types;
pub mod work_object;

pub use config::{Config, HierarchyConfig};
pub use crypto::{EMPTY_ROOT_HASH, EMPTY_UNCLE_HASH};
pub use error::{Error, Result};
pub use header::Header;
pub use location::{HierarchyLevel, Location};
pub use node_info::NodeInfoFile;
pub use transaction::{derive_tx_root, Transaction};
pub use types::*;
pub use work_object::{
    calc_uncle_hash, pow_hash, WorkObject, WorkObjectBody, WorkObjectHeader, WorkObjectView,
};

/// Application information
pub const APP_NAME: &str = "wo-inspect";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
