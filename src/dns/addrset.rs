//! Immutable per-update address snapshots.
//!
//! An [`AddressSet`] holds every address of one resolution for one host,
//! split into IPv4 and IPv6 and sorted by textual form. The cache never
//! mutates a set in place; each refresh installs a new one.

use std::net::IpAddr;

/// One resolved address in both representations.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    ip: IpAddr,
    text: String,
}

/// Resolved IPv4/IPv6 addresses of a host.
///
/// The parsed and textual lists come from the same entries, so they can
/// never disagree about which update they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSet {
    ipv4: Vec<Entry>,
    ipv6: Vec<Entry>,
}

/// Outcome of [`AddressSet::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddresses {
    /// Addresses that parsed.
    pub set: AddressSet,
    /// Number of input strings dropped because they were not IP literals.
    pub rejected: usize,
}

impl ParsedAddresses {
    /// True when the input had strings but none of them parsed.
    pub fn all_rejected(&self) -> bool {
        self.rejected > 0 && self.set.is_empty()
    }
}

impl AddressSet {
    /// Builds a set from lookup output.
    ///
    /// A string containing `:` goes to the IPv6 list, anything else to IPv4.
    /// Strings that are not IP literals are dropped and counted. Addresses
    /// are stored in canonical textual form; each list is sorted by that form
    /// with duplicate addresses removed.
    pub fn parse<I, S>(addrs: I) -> ParsedAddresses
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ipv4 = Vec::new();
        let mut ipv6 = Vec::new();
        let mut rejected = 0;

        for addr in addrs {
            let raw = addr.as_ref();
            let Ok(ip) = raw.parse::<IpAddr>() else {
                rejected += 1;
                continue;
            };
            let entry = Entry {
                ip,
                text: ip.to_string(),
            };
            if raw.contains(':') {
                ipv6.push(entry);
            } else {
                ipv4.push(entry);
            }
        }

        for list in [&mut ipv4, &mut ipv6] {
            list.sort_by(|a, b| a.text.cmp(&b.text));
            list.dedup_by(|a, b| a.ip == b.ip);
        }

        ParsedAddresses {
            set: AddressSet { ipv4, ipv6 },
            rejected,
        }
    }

    /// Parsed IPv4 addresses, in textual sort order.
    pub fn ipv4(&self) -> Vec<IpAddr> {
        self.ipv4.iter().map(|e| e.ip).collect()
    }

    /// Parsed IPv6 addresses, in textual sort order.
    pub fn ipv6(&self) -> Vec<IpAddr> {
        self.ipv6.iter().map(|e| e.ip).collect()
    }

    pub fn ipv4_strings(&self) -> Vec<String> {
        self.ipv4.iter().map(|e| e.text.clone()).collect()
    }

    pub fn ipv6_strings(&self) -> Vec<String> {
        self.ipv6.iter().map(|e| e.text.clone()).collect()
    }

    /// IPv4 address at `idx` in both forms.
    pub(crate) fn ipv4_at(&self, idx: usize) -> Option<(IpAddr, &str)> {
        self.ipv4.get(idx).map(|e| (e.ip, e.text.as_str()))
    }

    pub(crate) fn ipv4_str_iter(&self) -> impl Iterator<Item = &str> {
        self.ipv4.iter().map(|e| e.text.as_str())
    }

    pub(crate) fn ipv6_str_iter(&self) -> impl Iterator<Item = &str> {
        self.ipv6.iter().map(|e| e.text.as_str())
    }

    /// Number of IPv4 addresses; the rotation range.
    pub fn ipv4_len(&self) -> usize {
        self.ipv4.len()
    }

    pub fn ipv6_len(&self) -> usize {
        self.ipv6.len()
    }

    /// Total number of addresses.
    pub fn len(&self) -> usize {
        self.ipv4.len() + self.ipv6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }
}
