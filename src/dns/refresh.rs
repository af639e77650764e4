//! Per-host background refresh.
//!
//! Every registered host gets one [`RefreshLoop`] task. A cycle looks the
//! host up, parses the answer and installs a fresh [`AddressSet`], then
//! sleeps for the configured interval. Failures never leave the loop: a
//! failed lookup keeps the previous addresses in place.

use super::addrset::AddressSet;
use super::cache::Shared;
use super::{Lookup, Name};
use crate::base::neterror::NetError;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Looks `name` up and parses the answer.
///
/// Unparseable strings are dropped. An answer made only of unparseable
/// strings is an error so that it cannot wipe a good cache entry; an
/// answer with no strings at all is a genuine empty set.
pub(crate) async fn resolve(
    lookup: &dyn Lookup,
    name: &Name,
    tag: &str,
) -> Result<AddressSet, NetError> {
    let answer = lookup.lookup(name.clone()).await?;
    let parsed = AddressSet::parse(&answer);

    if parsed.all_rejected() {
        return Err(NetError::NoValidAddresses {
            domain: name.to_string(),
            rejected: parsed.rejected,
        });
    }
    if parsed.rejected > 0 {
        tracing::debug!(
            tag = %tag,
            host = %name,
            rejected = parsed.rejected,
            "dropped unparseable addresses"
        );
    }
    Ok(parsed.set)
}

/// Result of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cycle {
    Installed,
    Failed,
    /// The registration this loop serves is gone.
    Detached,
}

/// Background task keeping one host's addresses fresh.
pub(crate) struct RefreshLoop {
    shared: Weak<Shared>,
    lookup: Arc<dyn Lookup>,
    name: Name,
    registration: u64,
    cancel: CancellationToken,
    interval: Duration,
    tag: String,
}

impl RefreshLoop {
    pub(crate) fn new(
        shared: &Arc<Shared>,
        name: Name,
        registration: u64,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            shared: Arc::downgrade(shared),
            lookup: Arc::clone(&shared.lookup),
            name,
            registration,
            cancel,
            interval: shared.config.refresh_interval,
            tag: shared.config.tag.clone(),
        }
    }

    /// Runs until the host is unregistered or the cache is dropped.
    pub(crate) async fn run(self) {
        tracing::info!(tag = %self.tag, host = %self.name, "resolver started");

        loop {
            if self.cycle().await == Cycle::Detached {
                tracing::error!(tag = %self.tag, host = %self.name, "resolver stopped");
                return;
            }

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!(tag = %self.tag, host = %self.name, "resolver cancelled");
                    return;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    async fn cycle(&self) -> Cycle {
        // No lock is held here; a slow lookup only delays this host.
        match resolve(self.lookup.as_ref(), &self.name, &self.tag).await {
            Ok(set) => {
                let Some(shared) = self.shared.upgrade() else {
                    return Cycle::Detached;
                };
                if shared.install(&self.name, self.registration, set) {
                    Cycle::Installed
                } else {
                    Cycle::Detached
                }
            }
            Err(e) => {
                tracing::error!(
                    tag = %self.tag,
                    host = %self.name,
                    error = %e,
                    "resolve failed"
                );
                Cycle::Failed
            }
        }
    }
}
