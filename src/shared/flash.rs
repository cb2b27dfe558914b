//! One-shot notifications carried across a redirect in the session cookie.
//!
//! Writes queue messages with [`Flash::push_all`]; the next rendered page
//! drains them with [`Flash::take`].

use actix_session::{
    config::CookieContentSecurity, storage::CookieSessionStore, Session, SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::shared::crud::Notification;

pub(crate) const FLASH_KEY: &str = "_flash";
pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct Flash(Session);

impl Flash {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Appends to whatever is already queued. Cookie failures are logged and
    /// the messages dropped; they never fail the request.
    pub fn push_all(&self, notifications: &[Notification]) {
        if notifications.is_empty() {
            return;
        }

        let mut queued = self.peek();
        queued.extend_from_slice(notifications);

        if let Err(error) = self.0.insert(FLASH_KEY, &queued) {
            tracing::warn!(%error, "Failed to store flash messages");
        }
    }

    /// Removes and returns everything queued.
    pub fn take(&self) -> Vec<Notification> {
        match self.0.remove_as::<Vec<Notification>>(FLASH_KEY) {
            Some(Ok(messages)) => messages,
            Some(Err(raw)) => {
                tracing::warn!(raw = %raw, "Discarding unreadable flash messages");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn peek(&self) -> Vec<Notification> {
        self.0
            .get::<Vec<Notification>>(FLASH_KEY)
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "Failed to read flash messages");
                None
            })
            .unwrap_or_default()
    }
}

impl FromRequest for Flash {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Flash::new) })
    }
}

/// Private (encrypted) cookie session carrying flash messages.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_secure(secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}
