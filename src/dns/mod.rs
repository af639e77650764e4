//! Background Hostname Resolution
//!
//! Keeps the addresses of a registered set of hostnames fresh in the
//! background and hands them out round-robin, so a connection layer never
//! waits on DNS on its request path:
//! - [`HostCache`]: registry, refresh loop lifecycle and query API
//! - [`AddressSet`]: immutable per-update snapshot of one host's addresses
//! - [`Lookup`]: pluggable resolution collaborator, with system
//!   (getaddrinfo), hickory-dns and static implementations
//!
//! # Architecture
//!
//! Each registered host gets one tokio task that resolves it, installs the
//! parsed result and sleeps for the configured interval. A failed lookup
//! leaves the previous addresses in place (stale but available). Readers
//! share one reader/writer lock with the refresh tasks; the lookup itself
//! always runs outside the lock.
//!
//! # Example
//!
//! ```rust,ignore
//! use hostcache::dns::{HostCache, ResolverConfig};
//!
//! let cache = HostCache::system(ResolverConfig::default());
//! cache.register("example.com");
//!
//! if let Some(ip) = cache.next_address("example.com") {
//!     println!("Next: {}", ip);
//! }
//! ```

mod addrset;
mod cache;
mod config;
mod gai;
mod hickory;
mod lookup;
mod refresh;

pub use addrset::{AddressSet, ParsedAddresses};
pub use cache::HostCache;
pub use config::{ResolverConfig, DEFAULT_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL};
pub use gai::GaiLookup;
pub use hickory::HickoryLookup;
pub use lookup::{Lookup, LookupWithOverrides, Looking, Name, StaticLookup};
