//! Session cookie names and attributes.

use crate::config::SameSitePolicy;
use crate::session::domain::{SESSION_TTL_DAYS, SessionRecord};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::convert::Infallible;
use time::Duration;

/// Cookie carrying the session owner id.
pub const OWNER_COOKIE: &str = "uid";

/// Cookie carrying the device fingerprint.
pub const FINGERPRINT_COOKIE: &str = "fingerprint";

/// Attributes applied to both session cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    same_site: SameSitePolicy,
}

impl CookiePolicy {
    /// Creates a policy with the given `SameSite` restriction.
    #[must_use]
    pub const fn new(same_site: SameSitePolicy) -> Self {
        Self { same_site }
    }

    /// Adds both session cookies for `record` to `jar`.
    #[must_use]
    pub fn issue(self, jar: CookieJar, record: &SessionRecord) -> CookieJar {
        jar.add(self.cookie(OWNER_COOKIE, record.owner_id().as_str().to_owned()))
            .add(self.cookie(FINGERPRINT_COOKIE, record.fingerprint().as_str().to_owned()))
    }

    /// Adds expired, empty versions of both session cookies to `jar`.
    ///
    /// Removal cookies are always emitted, whether or not the request
    /// carried the cookies.
    #[must_use]
    pub fn clear(self, jar: CookieJar) -> CookieJar {
        [OWNER_COOKIE, FINGERPRINT_COOKIE]
            .into_iter()
            .fold(jar, |cleared, name| {
                let mut cookie = self.cookie(name, String::new());
                cookie.make_removal();
                cleared.add(cookie)
            })
    }

    fn cookie(self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(true)
            .same_site(self.same_site())
            .path("/")
            .max_age(Duration::days(SESSION_TTL_DAYS))
            .build()
    }

    const fn same_site(self) -> SameSite {
        match self.same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        }
    }
}

/// Raw owner and fingerprint cookie values presented by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    /// Value of the owner cookie.
    pub owner: Option<String>,
    /// Value of the fingerprint cookie.
    pub fingerprint: Option<String>,
}

impl SessionCookies {
    /// Reads both session cookies from `jar`.
    #[must_use]
    pub fn from_jar(jar: &CookieJar) -> Self {
        let value = |name| jar.get(name).map(|cookie| cookie.value().to_owned());
        Self {
            owner: value(OWNER_COOKIE),
            fingerprint: value(FINGERPRINT_COOKIE),
        }
    }
}

impl<S> FromRequestParts<S> for SessionCookies
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_jar(&CookieJar::from_headers(&parts.headers)))
    }
}
