//! Request extractors resolving who is calling.
//!
//! Protected handlers take [`AuthenticatedUser`]; the extractor runs before
//! the handler body, so an anonymous visitor never reaches record
//! operations and is redirected to the login form instead. Public pages
//! take [`CurrentIdentity`] to show the signed-in user when there is one.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use super::error::LoginRequired;
use super::flash::{Flash, LOGIN_REQUIRED};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{Error, Identity, User, require_authenticated};

fn missing_state() -> Error {
    Error::internal("HTTP state is not configured")
}

async fn resolve_identity(
    state: &HttpState,
    session: &SessionContext,
) -> Result<Identity, Error> {
    let token = session.token()?;
    let identity = state.sessions.current_identity(token.as_ref()).await?;
    if token.is_some() && identity == Identity::Anonymous {
        session.clear_token();
    }
    Ok(identity)
}

/// The authenticated account behind the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let session = Session::from_request(req, payload);
        let next = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());

        Box::pin(async move {
            let state = state.ok_or_else(missing_state)?;
            let session = SessionContext::new(session.await?);
            let identity = resolve_identity(&state, &session).await?;
            match require_authenticated(identity) {
                Ok(user) => Ok(Self(user)),
                Err(_) => {
                    debug!(path = %next, "anonymous request to protected page");
                    session.push_flash(Flash::info(LOGIN_REQUIRED))?;
                    Err(LoginRequired::new(next).into())
                }
            }
        })
    }
}

/// Identity of the caller on pages open to everyone.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl CurrentIdentity {
    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match &self.0 {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous => None,
        }
    }
}

impl FromRequest for CurrentIdentity {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let session = Session::from_request(req, payload);

        Box::pin(async move {
            let state = state.ok_or_else(missing_state)?;
            let session = SessionContext::new(session.await?);
            Ok(Self(resolve_identity(&state, &session).await?))
        })
    }
}
