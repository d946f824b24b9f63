//! Error types.

use axum::extract::rejection::JsonRejection;
use std::net::{AddrParseError, IpAddr, SocketAddr};

/// Error enumerates the possible challengedns error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a [`DnsServer`][crate::dns::DnsServer] is constructed with a listen
    /// address that doesn't parse as a `host:port` socket address. No socket is bound
    /// before this validation passes.
    #[error("invalid DNS listen address \"{addr}\"")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    /// Returned by [`DnsServer::present`][crate::dns::DnsServer::present] when the UDP
    /// socket can't be bound, e.g. the port is already in use or requires privileges the
    /// process doesn't have. The manager is left inactive.
    #[error("failed to bind DNS listener on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Returned by [`DnsServer::present`][crate::dns::DnsServer::present] when the serve
    /// loop terminates before confirming that it is accepting queries.
    #[error("DNS serve loop exited before confirming startup")]
    Startup,

    /// Returned by [`DnsServer::clean_up`][crate::dns::DnsServer::clean_up] when no
    /// responder is active. An expected, recoverable condition: clients may retract a
    /// record they never presented.
    #[error("dns server is not running")]
    NotRunning,

    /// Returned by [`DnsServer::clean_up`][crate::dns::DnsServer::clean_up] when the serve
    /// loop terminated abnormally during shutdown. The active-responder slot is cleared
    /// regardless.
    #[error("DNS serve loop did not shut down cleanly")]
    Shutdown(#[source] tokio::task::JoinError),

    /// Returned when clients `POST` the [`/present` API endpoint][crate::api#present-post]
    /// with an empty `fqdn` or `value`.
    #[error("wrong present request: fqdn or value is empty")]
    InvalidPresentRequest,

    /// Returned when clients `POST` invalid JSON.
    #[error(transparent)]
    JsonExtractorRejection(#[from] JsonRejection),

    /// Returned when the [`Config::api_bind_addr`][crate::config::Config::api_bind_addr]
    /// is not a loopback address, or an address within a private network space. The
    /// [HTTP API][crate::api] performs no authentication of its own and is always intended
    /// to be reached over a private network.
    #[error("API bind address ({0}) must be a loopback or private IP")]
    InsecureAPIBind(IpAddr),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when the JSON config file can't be parsed.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
