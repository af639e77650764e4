//! System hostname lookup using getaddrinfo.
//!
//! This lookup uses the operating system's native resolution via
//! `getaddrinfo`, executed in a thread pool to avoid blocking the async runtime.
//!
//! # When to Use
//!
//! - When you need to respect system DNS configuration (/etc/resolv.conf, /etc/hosts)
//! - When DoH/DoT is not required
//! - As the default collaborator of [`HostCache::system`](super::HostCache::system)

use super::{Looking, Lookup, Name};
use crate::base::{context::IoResultExt, neterror::NetError};
use std::net::{IpAddr, ToSocketAddrs};

/// System hostname lookup using `getaddrinfo` in a thread pool.
///
/// Wraps the standard library's `ToSocketAddrs` trait and executes
/// resolution in `tokio::task::spawn_blocking`. The platform resolver's own
/// timeouts apply; no additional timeout is imposed.
#[derive(Clone, Debug, Default)]
pub struct GaiLookup;

impl GaiLookup {
    /// Creates a new `GaiLookup`.
    pub fn new() -> Self {
        Self
    }
}

/// Textual IPs in first-seen order with duplicates removed.
///
/// getaddrinfo reports one entry per socket type, so the same IP usually
/// shows up more than once.
fn unique_ip_strings(ips: impl IntoIterator<Item = IpAddr>) -> Vec<String> {
    let mut seen = Vec::new();
    for ip in ips {
        if !seen.contains(&ip) {
            seen.push(ip);
        }
    }
    seen.into_iter().map(|ip| ip.to_string()).collect()
}

impl Lookup for GaiLookup {
    fn lookup(&self, name: Name) -> Looking {
        Box::pin(async move {
            let host = name.as_str().to_string();
            let domain = host.clone();

            let result = tokio::task::spawn_blocking(move || {
                tracing::debug!(host = %host, "resolving via getaddrinfo");
                (host.as_str(), 0u16)
                    .to_socket_addrs()
                    .map(|iter| iter.map(|addr| addr.ip()).collect::<Vec<_>>())
                    .dns_context(&host)
            })
            .await;

            // Handle task join error (cancellation, panic)
            let ips = result
                .map_err(|e| {
                    tracing::error!(error = %e, "DNS resolution task failed");
                    NetError::NameNotResolved
                })?
                .inspect_err(|e| {
                    tracing::debug!(domain = %domain, error = %e, "DNS resolution failed");
                })?;

            if ips.is_empty() {
                return Err(NetError::dns_failed_msg(
                    domain,
                    "No addresses returned by getaddrinfo",
                ));
            }

            let addrs = unique_ip_strings(ips);
            tracing::debug!(domain = %domain, count = addrs.len(), "DNS resolution complete");
            Ok(addrs)
        })
    }
}
