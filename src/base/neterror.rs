use std::{io, sync::Arc};
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum NetError {
    // Resolution Errors
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Address invalid")]
    AddressInvalid,

    // Context-rich variants
    #[error("Name not resolved for {domain}: {source}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("No valid addresses for {domain} ({rejected} rejected)")]
    NoValidAddresses { domain: String, rejected: usize },
    #[error("Host not registered: {host}")]
    UnknownHost { host: String },

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::NameNotResolved => -105,
            NetError::AddressInvalid => -108,
            // Context variants report the code of their base error
            NetError::NameNotResolvedFor { .. } => -105,
            NetError::NoValidAddresses { .. } => -108,
            // Custom codes (starting at -900)
            NetError::UnknownHost { .. } => -900,
            NetError::Unknown(code) => *code,
        }
    }

    /// DNS failure for `domain` caused by an IO error.
    pub fn dns_failed(domain: impl Into<String>, err: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.into(),
            source: Arc::new(err),
        }
    }

    /// DNS failure for `domain` described by a message only.
    pub fn dns_failed_msg(domain: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::dns_failed(domain, io::Error::new(io::ErrorKind::NotFound, msg.into()))
    }

    pub fn unknown_host(host: impl Into<String>) -> Self {
        NetError::UnknownHost { host: host.into() }
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -105 => NetError::NameNotResolved,
            -108 => NetError::AddressInvalid,
            _ => NetError::Unknown(code),
        }
    }
}
