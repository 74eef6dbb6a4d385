//! scout-store: dual-mode persistence for the scout research suite
//!
//! One call surface over two storage backends:
//! - a hosted relational backend, used when an authenticated remote
//!   identity is available, and
//! - a flat string-keyed on-device store, used otherwise under a
//!   persistent guest identity.
//!
//! The [`DataStore`] facade decides per call which backend an operation
//! runs against and normalizes both representations into the shared
//! `scout-domain` shapes. Remote reads of the paper list go through an
//! injected TTL cache; remote writes retry transient network faults with
//! bounded exponential backoff.

pub mod cache;
pub mod config;
pub mod identity;
pub mod keys;
pub mod local;
pub mod remote;
pub mod storage;
pub mod unified;

mod ids;

pub use cache::{TtlCache, DEFAULT_CACHE_TTL};
pub use config::RemoteConfig;
pub use identity::{IdentityError, IdentityProvider, IdentityResolver};
pub use local::LocalStore;
pub use remote::rest::{HttpTransport, RestError, RestTransport, SelectQuery};
pub use remote::retry::RetryPolicy;
pub use remote::RemoteStore;
pub use storage::{FileStorage, MemoryStorage, StorageArea, StorageError};
pub use unified::{DataStore, StoreError};
