use std::net::SocketAddr;

use actix_web::dev::ServiceRequest;

/// Strips a trailing port from a `host:port` or `[host]:port` peer address.
///
/// Input without a separable port is returned unchanged; this includes bare IPv4 and IPv6
/// addresses. No validation of the host happens here, that is left to the checker.
///
/// # Examples
/// ```
/// use actix_ip_allowlist::strip_port;
///
/// assert_eq!(strip_port("20.20.20.20:1234"), "20.20.20.20");
/// assert_eq!(strip_port("[fe80::1]:443"), "fe80::1");
/// assert_eq!(strip_port("fe80::1"), "fe80::1");
/// assert_eq!(strip_port("20.20.20.20"), "20.20.20.20");
/// ```
pub fn strip_port(raw: &str) -> &str {
    if let Some(rest) = raw.strip_prefix('[') {
        return match rest.split_once("]:") {
            Some((host, _port)) if !host.contains(']') => host,
            _ => raw,
        };
    }

    match raw.rsplit_once(':') {
        Some((host, _port)) if !host.contains(':') => host,
        _ => raw,
    }
}

/// Renders the connection's peer socket address, or an empty string when it is unknown.
///
/// IPv4-mapped IPv6 peers, as seen by dual-stack listeners, are rendered as plain IPv4.
pub(crate) fn peer_ip_text(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map(|addr| SocketAddr::new(addr.ip().to_canonical(), addr.port()).to_string())
        .unwrap_or_default()
}
