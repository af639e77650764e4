//! # hostcache
//!
//! A background hostname resolver cache for Rust connection layers.
//!
//! `hostcache` periodically resolves a registered set of hostnames to
//! IPv4/IPv6 addresses, caches the results, and hands out addresses in
//! round-robin order without blocking on DNS per request.
//!
//! ## Features
//!
//! - **Background Refresh**: one tokio task per host, fixed interval (60s default)
//! - **Stale-but-Available**: failed lookups keep the last good addresses
//! - **Round-Robin**: shared rotation cursor per host over its IPv4 addresses
//! - **Pluggable Lookup**: system resolver, hickory-dns, or static tables
//! - **Diagnostics**: deterministic line-oriented dump of the whole cache
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostcache::dns::{HostCache, ResolverConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = HostCache::system(ResolverConfig::new().tag("upstreams"));
//!     cache.register("example.com");
//!
//!     // ... later, on the request path
//!     let addr = cache.next_socket_addr("example.com", 443);
//!     println!("Connecting to {:?}", addr);
//!
//!     cache.shutdown_and_wait().await;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core types and error definitions
//! - [`dns`] - Lookup collaborators, refresh loops and the host cache

pub mod base;
pub mod dns;
