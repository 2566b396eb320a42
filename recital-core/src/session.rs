use chrono::{DateTime, Duration, TimeZone, Utc};
use recital_shared::Masked;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Fixed login lifetime in seconds. Activity never extends it.
pub const SESSION_LIFETIME_SECS: i64 = 60 * 60;

pub fn session_lifetime() -> Duration {
    Duration::seconds(SESSION_LIFETIME_SECS)
}

/// Admin login state as carried inside the session cookie.
///
/// `login_time` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub is_logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_time: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { since: DateTime<Utc> },
}

/// Result of checking a session against the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    Active,
    LoggedOut,
    /// The session was logged in but has outlived its lifetime. It has been
    /// flipped to logged-out and the caller must persist that change.
    Expired,
}

impl SessionCheck {
    pub fn is_active(self) -> bool {
        matches!(self, SessionCheck::Active)
    }
}

impl Session {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            is_logged_in: true,
            login_time: Some(now.timestamp_millis()),
        }
    }

    pub fn state(&self) -> SessionState {
        if !self.is_logged_in {
            return SessionState::LoggedOut;
        }
        // A logged-in flag without a login time is treated as logged in at the epoch,
        // which makes it expired for any realistic clock.
        let since = Utc
            .timestamp_millis_opt(self.login_time.unwrap_or(0))
            .single()
            .unwrap_or_default();
        SessionState::LoggedIn { since }
    }

    /// Checks the session at `now`. Expiry is strict: a session is still
    /// active at exactly `since + lifetime` and expired one millisecond later.
    pub fn check(&mut self, now: DateTime<Utc>, lifetime: Duration) -> SessionCheck {
        match self.state() {
            SessionState::LoggedOut => SessionCheck::LoggedOut,
            SessionState::LoggedIn { since } if now - since > lifetime => {
                self.is_logged_in = false;
                SessionCheck::Expired
            }
            SessionState::LoggedIn { .. } => SessionCheck::Active,
        }
    }

    pub fn expires_at(&self, lifetime: Duration) -> Option<DateTime<Utc>> {
        match self.state() {
            SessionState::LoggedIn { since } => Some(since + lifetime),
            SessionState::LoggedOut => None,
        }
    }
}

/// Compares the submitted password with the configured one and opens a
/// session on success. Without a configured password nobody can log in.
pub fn authenticate(
    submitted: &str,
    configured: Option<&Masked<String>>,
    now: DateTime<Utc>,
) -> CoreResult<Session> {
    let configured = configured
        .ok_or_else(|| CoreError::NotConfigured("Admin panel is not configured".to_string()))?;

    if submitted != configured.expose() {
        return Err(CoreError::Unauthorized);
    }

    Ok(Session::start(now))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_session_still_valid_just_before_an_hour() {
        let mut session = Session::start(login_at());
        let check = session.check(login_at() + Duration::seconds(3599), session_lifetime());
        assert_eq!(check, SessionCheck::Active);
        assert!(session.is_logged_in);
    }

    #[test]
    fn test_session_valid_at_exact_boundary() {
        let mut session = Session::start(login_at());
        let check = session.check(login_at() + Duration::seconds(3600), session_lifetime());
        assert_eq!(check, SessionCheck::Active);
    }

    #[test]
    fn test_session_expires_after_an_hour() {
        let mut session = Session::start(login_at());
        let check = session.check(login_at() + Duration::seconds(3601), session_lifetime());
        assert_eq!(check, SessionCheck::Expired);
        assert!(!session.is_logged_in);

        // Once flipped, further checks just see a logged-out session.
        let again = session.check(login_at() + Duration::seconds(3602), session_lifetime());
        assert_eq!(again, SessionCheck::LoggedOut);
    }

    #[test]
    fn test_checking_does_not_renew() {
        let mut session = Session::start(login_at());
        for minutes in [10, 30, 50] {
            assert!(session.check(login_at() + Duration::minutes(minutes), session_lifetime()).is_active());
        }
        assert_eq!(
            session.check(login_at() + Duration::minutes(61), session_lifetime()),
            SessionCheck::Expired
        );
    }

    #[test]
    fn test_logged_in_without_time_is_expired() {
        let mut session = Session { is_logged_in: true, login_time: None };
        assert_eq!(session.check(login_at(), session_lifetime()), SessionCheck::Expired);
    }

    #[test]
    fn test_authenticate() {
        let secret = Masked::new("s3cret".to_string());

        let session = authenticate("s3cret", Some(&secret), login_at()).unwrap();
        assert!(session.is_logged_in);
        assert_eq!(session.login_time, Some(login_at().timestamp_millis()));
        assert_eq!(session.expires_at(session_lifetime()), Some(login_at() + session_lifetime()));

        assert!(matches!(
            authenticate("wrong", Some(&secret), login_at()),
            Err(CoreError::Unauthorized)
        ));
        assert!(matches!(
            authenticate("s3cret", None, login_at()),
            Err(CoreError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_cookie_shape() {
        let json = serde_json::to_value(Session::start(login_at())).unwrap();
        assert_eq!(json["isLoggedIn"], true);
        assert_eq!(json["loginTime"], login_at().timestamp_millis());

        let empty: Session = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Session::logged_out());
    }
}
