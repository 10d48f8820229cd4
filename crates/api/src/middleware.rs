//! API middleware.

#![allow(missing_docs)]

use aaharsetu_core::{
    CertificateService, DonationRequestService, DonationService, RecommendationService,
    RegistrationService, SessionService, UserService, authorize,
};
use aaharsetu_db::entities::user::{self, Role};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

pub const DONOR: &[Role] = &[Role::Donor];
pub const NGO: &[Role] = &[Role::Ngo];
pub const VOLUNTEER: &[Role] = &[Role::Volunteer];
pub const ADMIN: &[Role] = &[Role::Admin];
pub const NGO_OR_ADMIN: &[Role] = &[Role::Ngo, Role::Admin];

/// Session cookie attributes.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub secure: bool,
    pub max_age_secs: i64,
}

impl SessionCookie {
    /// `Set-Cookie` value carrying a fresh session token.
    #[must_use]
    pub fn issue(&self, token: &str) -> String {
        self.render(token, self.max_age_secs)
    }

    /// `Set-Cookie` value instructing the client to drop the session.
    #[must_use]
    pub fn clear(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: i64) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!(
            "{}={value}; HttpOnly; SameSite=None{secure}; Path=/; Max-Age={max_age}",
            self.name
        )
    }

    /// Attach a cookie to a response.
    pub fn attach(response: &mut Response, cookie: &str) {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Unencodable session cookie"),
        }
    }
}

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub session_service: SessionService,
    pub donation_service: DonationService,
    pub request_service: DonationRequestService,
    pub registration_service: RegistrationService,
    pub recommendation_service: RecommendationService,
    pub certificate_service: CertificateService,
    pub session_cookie: SessionCookie,
}

/// Token of the session that authenticated the current request.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Read the session token from the cookie, falling back to a bearer header.
#[must_use]
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name)
        && !cookie.value().is_empty()
    {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
}

/// Session middleware.
///
/// Resolves the session token and stores the user in request extensions.
/// Unknown or expired tokens leave the request anonymous.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = session_token(req.headers(), &state.session_cookie.name) {
        match state.session_service.resolve(&token).await {
            Ok(Some(user)) => {
                req.extensions_mut().insert(user);
                req.extensions_mut().insert(SessionToken(token));
            }
            Ok(None) => {}
            Err(e) => return e.into_response(),
        }
    }

    next.run(req).await
}

/// Role guard, applied with `route_layer` so it runs before body extraction.
pub async fn require_roles(
    State(allowed): State<&'static [Role]>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Err(e) = authorize(req.extensions().get::<user::Model>(), allowed) {
        return e.into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(secure: bool) -> SessionCookie {
        SessionCookie {
            name: "sid".to_string(),
            secure,
            max_age_secs: 604_800,
        }
    }

    #[test]
    fn test_issue_cookie_attributes() {
        assert_eq!(
            cookie(true).issue("abc"),
            "sid=abc; HttpOnly; SameSite=None; Secure; Path=/; Max-Age=604800"
        );
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        assert_eq!(
            cookie(false).clear(),
            "sid=; HttpOnly; SameSite=None; Path=/; Max-Age=0"
        );
    }

    #[test]
    fn test_token_from_cookie_preferred() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; sid=tok1"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok2"));

        assert_eq!(session_token(&headers, "sid").as_deref(), Some("tok1"));
    }

    #[test]
    fn test_token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok2"));

        assert_eq!(session_token(&headers, "sid").as_deref(), Some("tok2"));
        assert_eq!(session_token(&HeaderMap::new(), "sid"), None);
    }
}
