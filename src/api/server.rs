use crate::api::routes;
use crate::config::SharedConfig;
use crate::dns::SharedDnsServer;
use std::future::Future;
use std::net::SocketAddr;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub dns: SharedDnsServer,
}

pub fn new(
    config: SharedConfig,
    dns: SharedDnsServer,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.api_bind_addr).serve(
        routes::new(AppState { config, dns })
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
}
