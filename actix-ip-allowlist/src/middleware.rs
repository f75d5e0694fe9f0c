//! For middleware documentation, see [`IpAllowlist`].

use std::{
    future::{Ready, ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_core::future::LocalBoxFuture;
use ip_allowlist::Checker;
use tracing::Instrument as _;

use crate::{
    Rejection, SharedChecker,
    config::DEFAULT_NAME,
    peer::{peer_ip_text, strip_port},
};

/// Middleware that only lets through requests whose peer address is in a trusted range.
///
/// The peer address of the connection is checked; forwarding headers are not consulted. Requests
/// that are rejected, including those whose peer address can not be parsed, never reach the
/// wrapped service and are answered according to the configured [`Rejection`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use actix_ip_allowlist::{IpAllowlist, Rejection};
/// use ip_allowlist::Checker;
///
/// let checker = Checker::new(["10.0.0.0/8", "fe80::/16"]).unwrap();
///
/// let mw = IpAllowlist::new(checker)
///     .name("internal")
///     .reject_with(Rejection::NotFound);
///
/// App::new().wrap(mw)
/// # ;
/// ```
///
/// Trusted ranges can be replaced while the server is running through the [`SharedChecker`]
/// handle:
///
/// ```
/// use actix_ip_allowlist::{IpAllowlist, SharedChecker};
/// use ip_allowlist::Checker;
///
/// let checker = SharedChecker::new(Checker::new(["10.0.0.0/8"]).unwrap());
/// let mw = IpAllowlist::shared(checker.clone());
///
/// // later, e.g. after a config reload
/// checker.store(Checker::new(["192.168.0.0/16"]).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct IpAllowlist {
    name: String,
    checker: SharedChecker,
    rejection: Rejection,
}

impl IpAllowlist {
    /// Constructs new allowlist middleware from a checker.
    pub fn new(checker: Checker) -> Self {
        Self::shared(SharedChecker::new(checker))
    }

    /// Constructs new allowlist middleware that reads its checker from a shared slot.
    pub fn shared(checker: SharedChecker) -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            checker,
            rejection: Rejection::default(),
        }
    }

    /// Sets name reported in log events, useful when several allowlists are in use.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets how rejected requests are answered.
    pub fn reject_with(mut self, rejection: Rejection) -> Self {
        self.rejection = rejection;
        self
    }

    /// Returns the shared checker slot used by this middleware.
    pub fn checker(&self) -> &SharedChecker {
        &self.checker
    }
}

impl<S, B> Transform<S, ServiceRequest> for IpAllowlist
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = S::Error;
    type Transform = IpAllowlistMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IpAllowlistMiddleware {
            service: Rc::new(service),
            name: self.name.clone(),
            checker: self.checker.clone(),
            rejection: self.rejection.clone(),
        }))
    }
}

/// Middleware service implementation for [`IpAllowlist`].
#[doc(hidden)]
#[allow(missing_debug_implementations)]
pub struct IpAllowlistMiddleware<S> {
    service: Rc<S>,
    name: String,
    checker: SharedChecker,
    rejection: Rejection,
}

impl<S, B> Service<ServiceRequest> for IpAllowlistMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let peer_addr = peer_ip_text(&req);
        let client_ip = strip_port(&peer_addr);

        let span = tracing::info_span!(
            "ip_allowlist",
            middleware = %self.name,
            client_ip = %client_ip,
            otel.status_code = tracing::field::Empty,
        );
        let _enter = span.enter();

        match self.checker.load().authorize(client_ip) {
            Ok(()) => {
                tracing::debug!(middleware = %self.name, "accepting IP {client_ip}");

                let service = Rc::clone(&self.service);
                let span = span.clone();
                Box::pin(
                    async move {
                        service
                            .call(req)
                            .await
                            .map(|res| res.map_into_left_body())
                    }
                    .instrument(span),
                )
            }

            Err(err) => {
                span.record("otel.status_code", "ERROR");
                tracing::debug!(middleware = %self.name, "rejecting IP {client_ip}: {err}");

                let res = self.rejection.respond(req.request());
                let res = req.into_response(res).map_into_right_body();
                Box::pin(ready(Ok(res)))
            }
        }
    }
}
