//! Access decision for the shared-PIN gate.
//!
//! Every request passes through [`require_auth`] before it can reach PIN
//! verification or content delivery. The decision itself is a pure function
//! over the request path and the raw `Cookie` header, so it can be tested
//! without a listener.

use axum::{
    extract::Request,
    http::{
        HeaderValue, StatusCode,
        header::{COOKIE, LOCATION},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Path of the unlock page shown to visitors without the auth cookie.
pub const UNLOCK_PAGE: &str = "/unlock.html";

/// Path of the PIN submission endpoint.
pub const UNLOCK_ENDPOINT: &str = "/__unlock";

/// Path prefix for assets that must stay reachable before unlocking.
/// Bare prefix, not anchored at a segment boundary: `/assets-foo` matches.
pub const ASSETS_PREFIX: &str = "/assets";

/// Literal cookie marker granting access.
pub const AUTH_COOKIE: &str = "auth=1";

// No Max-Age/Expires: the cookie lives exactly as long as the client keeps it.
const AUTH_COOKIE_ATTRIBUTES: &str = "auth=1; Path=/; HttpOnly; Secure; SameSite=Lax";

/// Shared-PIN configuration handed to the unlock handler.
#[derive(Clone)]
pub struct GateConfig {
    pin: SecretString,
}

impl GateConfig {
    #[must_use]
    pub fn new(pin: SecretString) -> Self {
        Self { pin }
    }

    /// Compare a submitted PIN against the configured secret.
    ///
    /// Plain string equality, not constant time. Accepted trade-off for a
    /// single shared low-value PIN with no lockout semantics to protect.
    #[must_use]
    pub fn pin_matches(&self, candidate: &str) -> bool {
        self.pin.expose_secret() == candidate
    }
}

/// Outcome of the access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request may proceed to PIN verification or content delivery.
    Allow,
    /// Request must be answered with a redirect to the unlock page.
    RedirectToUnlock,
}

/// Decide whether a request may pass the gate.
///
/// Exempt paths are allowed regardless of cookie state so the unlock flow
/// itself stays reachable. Everything else needs the [`AUTH_COOKIE`] marker
/// somewhere in the raw `Cookie` header. The check is substring containment
/// over the whole header, not cookie-pair parsing: `other=auth=1xyz`
/// matches too.
#[must_use]
pub fn decide(path: &str, cookie_header: Option<&str>) -> Decision {
    if is_exempt(path) || has_auth_cookie(cookie_header) {
        Decision::Allow
    } else {
        Decision::RedirectToUnlock
    }
}

/// Paths reachable without the auth cookie.
#[must_use]
pub fn is_exempt(path: &str) -> bool {
    path == UNLOCK_PAGE || path == UNLOCK_ENDPOINT || path.starts_with(ASSETS_PREFIX)
}

fn has_auth_cookie(cookie_header: Option<&str>) -> bool {
    cookie_header.is_some_and(|cookie| cookie.contains(AUTH_COOKIE))
}

/// Build the `Set-Cookie` value for a successful unlock.
#[must_use]
pub fn auth_cookie() -> HeaderValue {
    HeaderValue::from_static(AUTH_COOKIE_ATTRIBUTES)
}

/// Axum middleware enforcing the access decision in front of every route.
///
/// Redirects carry a relative `Location`; the client resolves it against
/// the request origin, which keeps the gate agnostic of scheme and host
/// behind proxies.
pub async fn require_auth(request: Request, next: Next) -> Response {
    let cookie_header = request
        .headers()
        .get(COOKIE)
        .and_then(|value| value.to_str().ok());

    match decide(request.uri().path(), cookie_header) {
        Decision::Allow => next.run(request).await,
        Decision::RedirectToUnlock => {
            debug!(path = request.uri().path(), "Redirecting to unlock page");
            (
                StatusCode::FOUND,
                [(LOCATION, HeaderValue::from_static(UNLOCK_PAGE))],
            )
                .into_response()
        }
    }
}
