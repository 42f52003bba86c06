use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use conncheck::Counters;
use tracing::info;

use crate::error::AppError;
use crate::routes;

/// Bind the metrics endpoint. Binding errors surface here, the returned
/// server still has to be polled to serve requests.
pub fn metrics_server(addr: SocketAddr, counters: Arc<Counters>) -> Result<Server, AppError> {
    let counters = web::Data::from(counters);

    let server = HttpServer::new(move || {
        App::new().app_data(counters.clone()).configure(routes::routes)
    })
    .workers(1)
    .bind(addr)?
    .run();

    info!("Exporting counters on http://{}/debug/vars", addr);
    Ok(server)
}
