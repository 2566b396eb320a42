use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use recital_core::session::{Session, SessionCheck};
use recital_shared::Masked;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ============================================================================
// Session Cookie Claims
// ============================================================================

/// Signed cookie payload: the session itself plus a standard `exp`
/// (seconds) mirroring the cookie's max-age.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub session: Session,
    pub exp: i64,
}

// ============================================================================
// Session Codec
// ============================================================================

/// Reads and writes the admin session cookie.
///
/// Without a signing secret every cookie reads as logged out and no cookie
/// can be issued.
#[derive(Clone)]
pub struct SessionCodec {
    secret: Option<Masked<String>>,
    cookie_name: String,
    lifetime: Duration,
    secure: bool,
}

impl SessionCodec {
    pub fn new(
        secret: Option<Masked<String>>,
        cookie_name: impl Into<String>,
        lifetime: Duration,
        secure: bool,
    ) -> Self {
        Self {
            secret,
            cookie_name: cookie_name.into(),
            lifetime,
            secure,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    fn validation() -> Validation {
        // Lifetime is enforced by `Session::check`, not by the token layer.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation
    }

    /// Signs `session` into a token.
    pub fn encode(&self, session: &Session, now: DateTime<Utc>) -> AppResult<String> {
        let secret = self
            .secret
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured("Admin panel is not configured".to_string()))?;
        let exp = session.expires_at(self.lifetime).unwrap_or(now + self.lifetime).timestamp();
        let claims = SessionClaims { session: session.clone(), exp };

        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.expose().as_bytes()))
            .map_err(|e| AppError::internal("Login failed", format!("Token encoding failed: {}", e)))
    }

    /// Tampered, foreign or unreadable tokens decode as logged out.
    pub fn decode(&self, token: &str) -> Session {
        let Some(secret) = self.secret.as_ref() else {
            return Session::logged_out();
        };
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(secret.expose().as_bytes()),
            &Self::validation(),
        )
        .map(|data| data.claims.session)
        .unwrap_or_else(|e| {
            tracing::debug!("Ignoring unreadable session cookie: {}", e);
            Session::logged_out()
        })
    }

    pub fn read(&self, jar: &CookieJar) -> Session {
        jar.get(&self.cookie_name)
            .map(|cookie| self.decode(cookie.value()))
            .unwrap_or_default()
    }

    /// Builds the cookie carrying `session`.
    pub fn issue(&self, session: &Session, now: DateTime<Utc>) -> AppResult<Cookie<'static>> {
        let token = self.encode(session, now)?;
        Ok(Cookie::build((self.cookie_name.clone(), token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .secure(self.secure)
            .max_age(time::Duration::seconds(self.lifetime.num_seconds()))
            .build())
    }

    pub fn removal(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), ""))
            .path("/")
            .build()
    }

    /// `isAuthenticated`: checks the cookie at `now`. When the session has
    /// just expired the returned jar carries the logged-out replacement,
    /// which the caller must send back.
    pub fn check(&self, jar: CookieJar, now: DateTime<Utc>) -> (SessionCheck, CookieJar) {
        if !self.is_enabled() {
            return (SessionCheck::LoggedOut, jar);
        }

        let mut session = self.read(&jar);
        let check = session.check(now, self.lifetime);
        if check != SessionCheck::Expired {
            return (check, jar);
        }

        tracing::info!("Admin session expired, logging out");
        match self.issue(&session, now) {
            Ok(cookie) => (check, jar.add(cookie)),
            Err(e) => {
                tracing::warn!("Could not persist logged-out session: {:?}", e);
                (check, jar.remove(self.removal()))
            }
        }
    }
}

// ============================================================================
// Admin Session Middleware
// ============================================================================

pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let (check, jar) = state.auth.session.check(jar, Utc::now());

    if !check.is_active() {
        return (jar, AppError::unauthorized()).into_response();
    }

    (jar, next.run(req).await).into_response()
}
