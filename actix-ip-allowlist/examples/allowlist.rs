//! Serves a page only to loopback clients, rejecting everyone else with a 403.
//!
//! Set `ALLOWLIST` to a comma-separated list of addresses/CIDRs to override the default, e.g.
//! `ALLOWLIST=10.0.0.0/8,::1 cargo run --example allowlist`.

use std::{env, io};

use actix_ip_allowlist::AllowlistConfig;
use actix_web::{App, HttpServer, middleware::Logger, web};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let ranges = env::var("ALLOWLIST").unwrap_or_else(|_| "127.0.0.1,::1".to_owned());
    let config = AllowlistConfig::new(ranges.split(',').map(str::trim));

    let allowlist = config
        .build()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    tracing::info!("starting HTTP server at http://localhost:8080");

    HttpServer::new(move || {
        App::new()
            .wrap(allowlist.clone())
            .wrap(Logger::default())
            .route("/", web::get().to(|| async { "Hello, trusted client!" }))
    })
    .workers(2)
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
