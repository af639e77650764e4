//! Hostname registry and round-robin query API.
//!
//! [`HostCache`] owns the set of registered hosts. Registering a host
//! spawns its [`RefreshLoop`]; queries read the latest installed
//! [`AddressSet`] and never wait on DNS.
//!
//! All host state sits behind one reader/writer lock. Refresh loops replace
//! a host's snapshot in a single critical section, `next_address*` takes
//! the write side because it moves the rotation cursor, and the remaining
//! reads take the read side.

use super::addrset::AddressSet;
use super::config::ResolverConfig;
use super::gai::GaiLookup;
use super::refresh::{self, RefreshLoop};
use super::{Lookup, Name};
use crate::base::neterror::NetError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Per-host cache record.
struct HostEntry {
    /// Identifies the registration; a loop only writes to its own.
    registration: u64,
    addrs: Arc<AddressSet>,
    /// Rotation index into the IPv4 list, always `< ipv4_len()` or 0.
    cursor: usize,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl HostEntry {
    fn retire(mut self) -> Option<JoinHandle<()>> {
        self.cancel.cancel();
        self.task.take()
    }
}

/// State shared between the cache handle and its refresh loops.
pub(crate) struct Shared {
    hosts: RwLock<HashMap<Name, HostEntry>>,
    pub(crate) lookup: Arc<dyn Lookup>,
    pub(crate) config: ResolverConfig,
    next_registration: AtomicU64,
}

impl Shared {
    /// Installs `set` for `name` if `registration` is still current.
    ///
    /// Returns false when the host was removed (or removed and registered
    /// again) since the loop started.
    pub(crate) fn install(&self, name: &Name, registration: u64, set: AddressSet) -> bool {
        let set = Arc::new(set);
        let cursor = {
            let mut hosts = self.hosts.write();
            let Some(entry) = hosts
                .get_mut(name)
                .filter(|entry| entry.registration == registration)
            else {
                return false;
            };
            entry.addrs = Arc::clone(&set);
            if entry.cursor >= set.ipv4_len() {
                entry.cursor = 0;
            }
            entry.cursor
        };

        tracing::debug!(
            tag = %self.config.tag,
            host = %name,
            cursor,
            ipv4 = ?set.ipv4_strings(),
            ipv6 = ?set.ipv6_strings(),
            "addresses updated"
        );
        true
    }

    fn drain(&self) -> Vec<JoinHandle<()>> {
        let mut hosts = self.hosts.write();
        let tasks = hosts
            .drain()
            .filter_map(|(_, entry)| entry.retire())
            .collect();
        tasks
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        for entry in self.hosts.get_mut().values() {
            entry.cancel.cancel();
        }
    }
}

/// Background hostname resolver cache.
///
/// Cloning is cheap and every clone drives the same registry. Dropping the
/// last clone stops all refresh loops.
///
/// # Example
///
/// ```rust,ignore
/// use hostcache::dns::{HostCache, ResolverConfig};
///
/// let cache = HostCache::system(ResolverConfig::new().tag("upstreams"));
/// cache.register("api.example.com");
///
/// // Later, on the request path:
/// if let Some(addr) = cache.next_socket_addr("api.example.com", 443) {
///     connect(addr).await?;
/// }
/// ```
#[derive(Clone)]
pub struct HostCache {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for HostCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCache")
            .field("tag", &self.shared.config.tag)
            .field("refresh_interval", &self.shared.config.refresh_interval)
            .field("hosts", &self.len())
            .finish()
    }
}

impl HostCache {
    /// Creates an empty cache resolving through `lookup`.
    pub fn new(lookup: Arc<dyn Lookup>, config: ResolverConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                hosts: RwLock::new(HashMap::new()),
                lookup,
                config,
                next_registration: AtomicU64::new(1),
            }),
        }
    }

    /// Creates an empty cache resolving through the system resolver.
    pub fn system(config: ResolverConfig) -> Self {
        Self::new(Arc::new(GaiLookup::new()), config)
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.shared.config
    }

    /// Starts caching `host`.
    ///
    /// A no-op for a host that is already registered; its loop keeps
    /// running untouched. Must be called from within a tokio runtime.
    pub fn register(&self, host: impl Into<Name>) {
        let name = host.into();
        let mut hosts = self.shared.hosts.write();
        if hosts.contains_key(&name) {
            return;
        }

        let registration = self.shared.next_registration.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();
        let refresh_loop =
            RefreshLoop::new(&self.shared, name.clone(), registration, cancel.clone());
        let task = tokio::spawn(refresh_loop.run());

        hosts.insert(
            name,
            HostEntry {
                registration,
                addrs: Arc::new(AddressSet::default()),
                cursor: 0,
                cancel,
                task: Some(task),
            },
        );
    }

    /// Stops caching `host`.
    ///
    /// Queries return `None` right away. A loop waiting for its next cycle
    /// exits immediately; a loop in the middle of a lookup finishes it,
    /// notices the removal and exits without writing.
    pub fn unregister(&self, host: &str) {
        let removed = self.shared.hosts.write().remove(host);
        if let Some(entry) = removed {
            // Detach; the task ends on its own.
            drop(entry.retire());
        }
    }

    /// Removes every host in one critical section.
    pub fn shutdown(&self) {
        let stopped = self.shared.drain();
        tracing::info!(tag = %self.shared.config.tag, hosts = stopped.len(), "resolver shutdown");
    }

    /// Like [`shutdown`](Self::shutdown), then waits for every loop to exit.
    ///
    /// Loops blocked in a lookup are waited for; this returns only once
    /// the platform resolver answers or times out.
    pub async fn shutdown_and_wait(&self) {
        let tasks = self.shared.drain();
        tracing::info!(tag = %self.shared.config.tag, hosts = tasks.len(), "resolver shutdown");
        for result in futures::future::join_all(tasks).await {
            if let Err(e) = result {
                tracing::error!(tag = %self.shared.config.tag, error = %e, "resolver task failed");
            }
        }
    }

    /// Runs one refresh cycle for `host` right now.
    ///
    /// The periodic schedule is not affected. On failure the cached
    /// addresses are left as they were.
    pub async fn refresh_now(&self, host: &str) -> Result<(), NetError> {
        let (name, registration) = {
            let hosts = self.shared.hosts.read();
            let (name, entry) = hosts
                .get_key_value(host)
                .ok_or_else(|| NetError::unknown_host(host))?;
            (name.clone(), entry.registration)
        };

        let set = refresh::resolve(
            self.shared.lookup.as_ref(),
            &name,
            &self.shared.config.tag,
        )
        .await?;

        if self.shared.install(&name, registration, set) {
            Ok(())
        } else {
            Err(NetError::unknown_host(host))
        }
    }

    /// Advances the host's cursor and returns the IPv4 address it lands on.
    fn advance(&self, host: &str) -> Option<(IpAddr, String, usize)> {
        let mut hosts = self.shared.hosts.write();
        let entry = hosts.get_mut(host)?;
        let count = entry.addrs.ipv4_len();
        if count == 0 {
            return None;
        }
        entry.cursor = (entry.cursor + 1) % count;
        let (ip, text) = entry.addrs.ipv4_at(entry.cursor)?;
        Some((ip, text.to_string(), entry.cursor))
    }

    /// Next IPv4 address of `host` in round-robin order.
    ///
    /// `None` for an unknown host or one without IPv4 addresses.
    pub fn next_address(&self, host: &str) -> Option<String> {
        self.next_address_with_index(host).map(|(addr, _)| addr)
    }

    /// Like [`next_address`](Self::next_address), also returning the cursor
    /// position the address was taken from.
    pub fn next_address_with_index(&self, host: &str) -> Option<(String, usize)> {
        self.advance(host).map(|(_, text, idx)| (text, idx))
    }

    /// Next IPv4 address of `host` as a socket address on `port`.
    ///
    /// Shares the rotation with [`next_address`](Self::next_address).
    pub fn next_socket_addr(&self, host: &str, port: u16) -> Option<SocketAddr> {
        self.advance(host).map(|(ip, _, _)| SocketAddr::new(ip, port))
    }

    /// Latest snapshot of `host`, `None` if it is not registered.
    pub fn addresses(&self, host: &str) -> Option<Arc<AddressSet>> {
        self.shared
            .hosts
            .read()
            .get(host)
            .map(|entry| Arc::clone(&entry.addrs))
    }

    /// Parsed IPv4 and IPv6 addresses of `host`.
    pub fn addresses_binary(&self, host: &str) -> Option<(Vec<IpAddr>, Vec<IpAddr>)> {
        self.addresses(host).map(|set| (set.ipv4(), set.ipv6()))
    }

    /// Textual IPv4 and IPv6 addresses of `host`.
    pub fn addresses_string(&self, host: &str) -> Option<(Vec<String>, Vec<String>)> {
        self.addresses(host)
            .map(|set| (set.ipv4_strings(), set.ipv6_strings()))
    }

    pub fn contains(&self, host: &str) -> bool {
        self.shared.hosts.read().contains_key(host)
    }

    /// Registered hostnames, sorted.
    pub fn hosts(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self
            .shared
            .hosts
            .read()
            .keys()
            .map(|name| name.to_string())
            .collect();
        hosts.sort();
        hosts
    }

    pub fn len(&self) -> usize {
        self.shared.hosts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.hosts.read().is_empty()
    }

    /// Writes every cached address, one per line.
    pub fn dump<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        self.dump_with_prefix(w, "")
    }

    /// Writes every cached address, one per line, each starting with `prefix`.
    ///
    /// Hosts are sorted by name; within a host IPv4 lines come before IPv6
    /// lines, each sorted by address:
    ///
    /// ```text
    /// {prefix}resolver.v4.{host}.{idx}: {address}
    /// {prefix}resolver.v6.{host}.{idx}: {address}
    /// ```
    pub fn dump_with_prefix<W: io::Write>(&self, w: &mut W, prefix: &str) -> io::Result<()> {
        let mut snapshot: Vec<(Name, Arc<AddressSet>)> = {
            let hosts = self.shared.hosts.read();
            let snapshot = hosts
                .iter()
                .map(|(name, entry)| (name.clone(), Arc::clone(&entry.addrs)))
                .collect();
            snapshot
        };
        snapshot.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, set) in &snapshot {
            for (idx, addr) in set.ipv4_str_iter().enumerate() {
                writeln!(w, "{prefix}resolver.v4.{name}.{idx}: {addr}")?;
            }
            for (idx, addr) in set.ipv6_str_iter().enumerate() {
                writeln!(w, "{prefix}resolver.v6.{name}.{idx}: {addr}")?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn install_for_test(&self, host: &str, addrs: &[&str]) {
        let registration = self.shared.hosts.read()[host].registration;
        let set = AddressSet::parse(addrs).set;
        assert!(self.shared.install(&Name::new(host), registration, set));
    }

    #[cfg(test)]
    fn cursor(&self, host: &str) -> usize {
        self.shared.hosts.read()[host].cursor
    }
}
