//! SAIT data feed
//!
//! Everything that touches the outside world on behalf of the dashboard:
//! configuration, the on-chain snapshot provider and the timed refresh
//! that swaps new snapshots into an externally owned store.

pub mod config;
pub mod error;
pub mod provider;
pub mod refresher;
pub mod rpc;
pub mod store;

pub use config::{ContractAddresses, DashboardConfig};
pub use error::{FeedError, Result};
pub use provider::{BaselineProvider, RpcSnapshotProvider, SnapshotProvider};
pub use refresher::{RefreshHandle, RefreshOutcome, Refresher};
pub use store::{DataSource, SnapshotStore, StoredSnapshot};
