//! Middleware for allowing Actix Web requests by client IP range.
//!
//! Wraps an [`ip_allowlist::Checker`] so that only requests whose peer address lies in one of the
//! trusted ranges reach your services. Everything else is answered with a configurable
//! [`Rejection`]: `403 Forbidden` by default, `404 Not Found`, or a regex based redirect.
//!
//! # Examples
//! ```no_run
//! use actix_ip_allowlist::AllowlistConfig;
//! use actix_web::{App, HttpServer, web};
//!
//! # async fn run() -> std::io::Result<()> {
//! let allowlist = AllowlistConfig::new(["127.0.0.1", "10.0.0.0/8", "fe80::/16"])
//!     .build()
//!     .expect("invalid allowlist");
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .wrap(allowlist.clone())
//!         .route("/", web::get().to(|| async { "hello" }))
//! })
//! .bind(("127.0.0.1", 8080))?
//! .run()
//! .await
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, nonstandard_style)]
#![warn(future_incompatible, missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod config;
mod middleware;
mod peer;
mod reject;
mod swap;

pub use self::{
    config::{AllowlistConfig, ConfigError, RejectConfig},
    middleware::{IpAllowlist, IpAllowlistMiddleware},
    peer::strip_port,
    reject::{Rejection, RewriteRedirect},
    swap::SharedChecker,
};
