//! Core lookup types and traits.
//!
//! This module defines the `Lookup` trait and supporting types that form
//! the boundary between the host cache and the platform resolver.

use crate::base::neterror::NetError;
use std::{
    borrow::{Borrow, Cow},
    collections::HashMap,
    fmt,
    future::Future,
    pin::Pin,
    sync::Arc,
};

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to lookups.
#[derive(Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.host
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for the `Future` type returned by a lookup.
///
/// Resolves to the textual addresses of the host, which may mix IPv4 and
/// IPv6 literals. Parsing and validation happen in the cache.
pub type Looking = Pin<Box<dyn Future<Output = Result<Vec<String>, NetError>> + Send>>;

/// Trait for hostname lookups.
///
/// This is the black-box resolution facility consumed by the host cache.
/// Implementations must be thread-safe and may block for as long as the
/// underlying resolver does; the cache never holds a lock across a lookup.
pub trait Lookup: Send + Sync {
    /// Resolves a hostname to a list of address strings.
    fn lookup(&self, name: Name) -> Looking;
}

/// Blanket implementation for Arc-wrapped lookups.
impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    fn lookup(&self, name: Name) -> Looking {
        (**self).lookup(name)
    }
}

/// Fixed hostname-to-address table.
///
/// Useful for tests and for hosts whose addresses are pinned by
/// configuration. Names missing from the table fail to resolve.
#[derive(Clone, Default)]
pub struct StaticLookup {
    table: Arc<HashMap<Cow<'static, str>, Vec<String>>>,
}

impl StaticLookup {
    /// Creates a lookup answering from `table`.
    pub fn new(table: HashMap<Cow<'static, str>, Vec<String>>) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Returns the number of configured names.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no names are configured.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Lookup for StaticLookup {
    fn lookup(&self, name: Name) -> Looking {
        let result = match self.table.get(name.as_str()) {
            Some(addrs) => Ok(addrs.clone()),
            None => Err(NetError::dns_failed_msg(
                name.as_str(),
                "no static entry for host",
            )),
        };
        Box::pin(std::future::ready(result))
    }
}

impl fmt::Debug for StaticLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticLookup")
            .field("entries", &self.table.len())
            .finish()
    }
}

/// Lookup wrapper that supports hostname overrides.
///
/// Checks a map of hostname-to-address overrides before falling back to
/// the underlying lookup. Useful for:
/// - Testing without real DNS
/// - Forcing specific IPs for certain domains
/// - Local development with custom hostnames
///
/// # Example
///
/// ```rust,ignore
/// use hostcache::dns::{GaiLookup, LookupWithOverrides};
/// use std::collections::HashMap;
///
/// let mut overrides = HashMap::new();
/// overrides.insert("api.local".into(), vec!["127.0.0.1".to_string()]);
///
/// let lookup = LookupWithOverrides::new(Arc::new(GaiLookup::new()), overrides);
/// ```
pub struct LookupWithOverrides {
    inner: Arc<dyn Lookup>,
    overrides: Arc<HashMap<Cow<'static, str>, Vec<String>>>,
}

impl LookupWithOverrides {
    /// Creates a new lookup with the given overrides.
    ///
    /// # Arguments
    ///
    /// * `inner` - The fallback lookup for non-overridden hostnames.
    /// * `overrides` - Map of hostnames to their address strings.
    pub fn new(inner: Arc<dyn Lookup>, overrides: HashMap<Cow<'static, str>, Vec<String>>) -> Self {
        Self {
            inner,
            overrides: Arc::new(overrides),
        }
    }

    /// Returns the number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Lookup for LookupWithOverrides {
    fn lookup(&self, name: Name) -> Looking {
        if let Some(addrs) = self.overrides.get(name.as_str()) {
            return Box::pin(std::future::ready(Ok(addrs.clone())));
        }
        self.inner.lookup(name)
    }
}

impl fmt::Debug for LookupWithOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupWithOverrides")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_str() {
        let name = Name::from("example.com");
        assert_eq!(name.as_str(), "example.com");
        assert_eq!(name.to_string(), "example.com");
    }

    #[test]
    fn test_name_from_string() {
        let domain = String::from("test.example.com");
        let name = Name::from(domain);
        assert_eq!(name.as_str(), "test.example.com");
    }

    #[test]
    fn test_name_ordering() {
        let mut names = vec![Name::new("b.com"), Name::new("a.com"), Name::new("c.com")];
        names.sort();
        let sorted: Vec<_> = names.iter().map(Name::as_str).collect();
        assert_eq!(sorted, ["a.com", "b.com", "c.com"]);
    }

    /// Builds a table from `host -> "addr,addr"` pairs.
    fn table(entries: &[(&'static str, &str)]) -> HashMap<Cow<'static, str>, Vec<String>> {
        entries
            .iter()
            .map(|&(host, addrs)| {
                (
                    Cow::Borrowed(host),
                    addrs.split(',').map(str::to_string).collect(),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_static_lookup_hit_and_miss() {
        let lookup = StaticLookup::new(table(&[("db.local", "10.0.0.5,::1")]));

        let addrs = lookup.lookup(Name::new("db.local")).await.unwrap();
        assert_eq!(addrs, vec!["10.0.0.5".to_string(), "::1".to_string()]);

        let err = lookup.lookup(Name::new("other.local")).await.unwrap_err();
        assert!(matches!(err, NetError::NameNotResolvedFor { ref domain, .. } if domain == "other.local"));
    }

    #[tokio::test]
    async fn test_override_lookup_hit() {
        let inner = Arc::new(StaticLookup::new(table(&[("override.local", "8.8.8.8")])));
        let lookup =
            LookupWithOverrides::new(inner, table(&[("override.local", "127.0.0.1")]));

        let addrs = lookup.lookup(Name::new("override.local")).await.unwrap();
        assert_eq!(addrs, vec!["127.0.0.1".to_string()]);
        assert_eq!(lookup.override_count(), 1);
    }

    #[tokio::test]
    async fn test_override_lookup_miss() {
        let inner = Arc::new(StaticLookup::new(table(&[("plain.com", "8.8.8.8")])));
        let lookup = LookupWithOverrides::new(inner, HashMap::new());

        let addrs = lookup.lookup(Name::new("plain.com")).await.unwrap();
        assert_eq!(addrs, vec!["8.8.8.8".to_string()]);
    }
}
