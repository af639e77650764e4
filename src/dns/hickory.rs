//! Async hostname lookup using hickory-dns.
//!
//! This lookup provides fully async DNS resolution with support for:
//! - DNS-over-HTTPS (DoH)
//! - DNS-over-TLS (DoT)
//! - System DNS configuration auto-detection
//! - Dual-stack (IPv4 + IPv6) answers in one lookup
//!
//! # Performance
//!
//! Unlike `GaiLookup`, this lookup is fully async and doesn't require
//! spawning blocking tasks, which matters once many hosts are registered
//! and their refresh cycles line up.

use super::{Looking, Lookup, Name};
use crate::base::neterror::NetError;
use hickory_resolver::{
    config::{LookupIpStrategy, ResolverConfig},
    name_server::TokioConnectionProvider,
    TokioResolver,
};
use std::sync::LazyLock;

/// Async hostname lookup backed by hickory-dns.
///
/// The resolver is lazily initialized on first use and shared across
/// all instances via a static `LazyLock`. It automatically configures
/// itself based on the system's DNS settings.
///
/// # Example
///
/// ```rust,ignore
/// use hostcache::dns::{HickoryLookup, HostCache, ResolverConfig};
/// use std::sync::Arc;
///
/// let cache = HostCache::new(Arc::new(HickoryLookup::new()), ResolverConfig::default());
/// cache.register("example.com");
/// ```
#[derive(Debug, Clone)]
pub struct HickoryLookup {
    resolver: &'static LazyLock<TokioResolver>,
}

impl HickoryLookup {
    /// Creates a new `HickoryLookup`.
    ///
    /// The underlying resolver is lazily initialized on first query.
    /// It will attempt to read system DNS configuration; if that fails,
    /// it falls back to sensible defaults.
    pub fn new() -> Self {
        static RESOLVER: LazyLock<TokioResolver> = LazyLock::new(|| {
            let mut builder = match TokioResolver::builder_tokio() {
                Ok(builder) => {
                    tracing::debug!("Using system DNS configuration");
                    builder
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Failed to read system DNS config, using defaults"
                    );
                    TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                }
            };

            // Both families feed the cache
            builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

            builder.build()
        });

        Self {
            resolver: &RESOLVER,
        }
    }
}

impl Default for HickoryLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup for HickoryLookup {
    fn lookup(&self, name: Name) -> Looking {
        let lookup = self.clone();
        Box::pin(async move {
            let domain = name.as_str();
            tracing::debug!(domain = %domain, "resolving via hickory-dns");

            let answer = lookup.resolver.lookup_ip(domain).await.map_err(|e| {
                tracing::debug!(domain = %domain, error = %e, "hickory-dns lookup failed");
                NetError::dns_failed_msg(domain, e.to_string())
            })?;

            let addrs: Vec<String> = answer.iter().map(|ip| ip.to_string()).collect();

            if addrs.is_empty() {
                return Err(NetError::dns_failed_msg(domain, "No addresses returned"));
            }

            tracing::debug!(domain = %domain, count = addrs.len(), "hickory-dns resolution complete");
            Ok(addrs)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_hickory_lookup_invalid_domain() {
        let lookup = HickoryLookup::new();
        let result = lookup
            .lookup(Name::new("this-domain-definitely-does-not-exist.invalid"))
            .await;

        let err = result.expect_err("Should have error");
        match err {
            NetError::NameNotResolvedFor { domain, .. } => {
                assert_eq!(domain, "this-domain-definitely-does-not-exist.invalid");
            }
            _ => panic!("Unexpected error type"),
        }
    }

    #[test]
    fn test_hickory_lookup_is_clone() {
        let l1 = HickoryLookup::new();
        let l2 = l1.clone();
        // Both should point to the same static resolver
        assert!(std::ptr::eq(l1.resolver, l2.resolver));
    }
}
