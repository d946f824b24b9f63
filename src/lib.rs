//! challengedns
//!
//! An ephemeral, single-record authoritative DNS responder for solving
//! [RFC-8555][RFC-8555] [DNS-01] challenges through [lego]'s generic
//! [HTTP request provider][httpreq].
//!
//! An ACME client `POST`s one `(fqdn, value)` pair to `/present`, lets its certificate
//! authority observe the TXT record, then `POST`s `/cleanup` to retract it. At most one
//! record is ever live; presenting a new one supersedes the old. There is no zone
//! storage, no recursion and no persistence — the responder exists only for the few
//! seconds a validation takes.
//!
//! [lego]: https://go-acme.github.io/lego/
//! [httpreq]: https://go-acme.github.io/lego/dns/httpreq/
//! [RFC-8555]: https://www.rfc-editor.org/rfc/rfc8555
//! [DNS-01]: https://www.rfc-editor.org/rfc/rfc8555#section-8.4
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod dns;
pub mod error;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use dns::{DnsServer, SharedDnsServer};
