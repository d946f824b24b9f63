//! Ephemeral single-record DNS responder.
//!
//! [`DnsServer`] owns the responder lifecycle. It holds no socket until a record is
//! [presented][DnsServer::present]; from then until [clean-up][DnsServer::clean_up] a
//! background serve loop answers `TXT` queries for exactly the presented FQDN:
//!
//! ```bash
//! ❯ curl --json \
//!   '{"fqdn":"_acme-challenge.domain.","value":"LHDhK3oGRvkiefQnx7OOczTY5Tic_xZ6HcMOc_gmtoM"}' \
//!    http://localhost:18888/present
//! {"fqdn":"_acme-challenge.domain.","value":"LHDhK3oGRvkiefQnx7OOczTY5Tic_xZ6HcMOc_gmtoM"}
//!
//! ❯ dig @127.0.0.1 -p 5352 +short _acme-challenge.domain. TXT
//! "LHDhK3oGRvkiefQnx7OOczTY5Tic_xZ6HcMOc_gmtoM"
//! ```
//!
//! Any other question — a different name, a non-`TXT` type — is answered authoritatively
//! with NXDOMAIN so that a validating resolver chain sees a definitive negative instead
//! of a timeout. Requests with no question section get no reply at all.
//!
//! Presenting a second record replaces the first; the responder never serves more than
//! one record at a time.

mod handlers;
pub mod server;

pub use server::{DnsServer, SharedDnsServer};
