use actix_web::{
    HttpRequest, HttpResponse, Responder as _,
    http::{StatusCode, header::ContentType},
    web::Redirect,
};
use regex::Regex;

/// How rejected requests are answered.
///
/// The default is a plain `403 Forbidden`.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub enum Rejection {
    /// Respond `403 Forbidden` with the status text as body.
    #[default]
    Forbidden,

    /// Respond `404 Not Found` with the status text as body.
    NotFound,

    /// Redirect to a rewritten URL, falling back to `404 Not Found`.
    Redirect(RewriteRedirect),
}

impl Rejection {
    pub(crate) fn respond(&self, req: &HttpRequest) -> HttpResponse {
        match self {
            Self::Forbidden => status_text(StatusCode::FORBIDDEN),
            Self::NotFound => status_text(StatusCode::NOT_FOUND),
            Self::Redirect(rewrite) => match rewrite.rewrite(&request_url(req)) {
                Some(location) => Redirect::to(location)
                    .using_status_code(rewrite.status())
                    .respond_to(req)
                    .map_into_boxed_body(),
                None => status_text(StatusCode::NOT_FOUND),
            },
        }
    }
}

/// Regex based URL rewrite used to redirect rejected clients elsewhere.
///
/// The regex is matched against the full request URL (`scheme://host/path?query`) and the
/// replacement may refer to capture groups (`$1`, `${name}`). Requests whose URL does not match,
/// or whose rewrite leaves the URL unchanged, get a `404 Not Found` instead.
///
/// # Examples
/// ```
/// use actix_ip_allowlist::{IpAllowlist, Rejection, RewriteRedirect};
/// use ip_allowlist::Checker;
///
/// let rewrite = RewriteRedirect::new(r"^https?://([^/]+)/admin(.*)$", "https://$1/login$2")
///     .unwrap()
///     .permanent(false);
///
/// let mw = IpAllowlist::new(Checker::new(["10.0.0.0/8"]).unwrap())
///     .reject_with(Rejection::Redirect(rewrite));
/// ```
#[derive(Debug, Clone)]
pub struct RewriteRedirect {
    regex: Regex,
    replacement: String,
    permanent: bool,
}

impl RewriteRedirect {
    /// Compiles `regex` and pairs it with `replacement`.
    pub fn new(regex: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(regex)?,
            replacement: replacement.into(),
            permanent: false,
        })
    }

    /// Sets whether to use `301 Moved Permanently` instead of `302 Found`.
    pub fn permanent(mut self, permanent: bool) -> Self {
        self.permanent = permanent;
        self
    }

    fn status(&self) -> StatusCode {
        if self.permanent {
            StatusCode::MOVED_PERMANENTLY
        } else {
            StatusCode::FOUND
        }
    }

    fn rewrite(&self, url: &str) -> Option<String> {
        if !self.regex.is_match(url) {
            return None;
        }

        let location = self.regex.replace(url, self.replacement.as_str());
        (location != url).then(|| location.into_owned())
    }
}

fn status_text(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::plaintext())
        .body(status.canonical_reason().unwrap_or_default())
}

fn request_url(req: &HttpRequest) -> String {
    let conn_info = req.connection_info();
    let path = req.uri().path_and_query().map_or("/", |pq| pq.as_str());

    format!("{}://{}{path}", conn_info.scheme(), conn_info.host())
}
