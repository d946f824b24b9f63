//! HTTP API for presenting and retracting the challenge TXT record.
//!
//! Implements the callback half of [lego]'s generic [HTTP request provider][httpreq]:
//! an ACME client configured with `HTTPREQ_ENDPOINT` pointing at this server will `POST`
//! here once before validation and once after.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is
//!   operational.
//!
//! ## `/present` (POST)
//!
//!   Expects a JSON request body of the form:
//!
//!   ```json
//!   { "fqdn": "_acme-challenge.domain.", "value": "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX" }
//!   ```
//!
//!  Both fields must be non-empty; no further validation is applied. Starts the DNS
//!  responder for `(fqdn, value)`, replacing whatever record was presented before, and
//!  returns once the responder is verifiably accepting queries.
//!
//!  For successful updates, returns HTTP 200 (OK) and echoes the request body back.
//!
//! ## `/cleanup` (POST)
//!
//!   Stops the DNS responder and releases its socket. Any request body (lego sends the
//!   same `fqdn`/`value` pair it presented) is ignored: there is only ever one record to
//!   retract. Fails with HTTP 400 if no record is currently presented.
//!
//! Requests to any other path are answered with HTTP 400 (Bad Request).
//!
//! [lego]: https://go-acme.github.io/lego/
//! [httpreq]: https://go-acme.github.io/lego/dns/httpreq/

mod api_error;
mod model;
mod routes;
pub mod server;

pub use server::new;
