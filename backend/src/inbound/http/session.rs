//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: the opaque session token issued at login and
//! the queue of flash notices shown on the next page.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use super::flash::Flash;
use crate::domain::{Error, SessionToken};

pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const FLASHES_KEY: &str = "flashes";

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Token carried by the cookie, if any.
    ///
    /// A value that does not parse is treated as absent.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        let raw = self.0.get::<String>(TOKEN_KEY).map_err(read_error)?;
        Ok(raw.and_then(|raw| {
            let parsed = SessionToken::parse(&raw);
            if parsed.is_none() {
                warn!("invalid session token in cookie");
            }
            parsed
        }))
    }

    /// Store a freshly issued token, renewing the cookie first.
    pub fn bind_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(TOKEN_KEY, token.to_string())
            .map_err(write_error)
    }

    /// Forget the token without touching queued flashes.
    pub fn clear_token(&self) {
        self.0.remove(TOKEN_KEY);
    }

    /// Queue a notice for the next rendered page.
    pub fn push_flash(&self, flash: Flash) -> Result<(), Error> {
        let mut queued = self
            .0
            .get::<Vec<Flash>>(FLASHES_KEY)
            .map_err(read_error)?
            .unwrap_or_default();
        queued.push(flash);
        self.0.insert(FLASHES_KEY, queued).map_err(write_error)
    }

    /// Drain queued notices.
    pub fn take_flashes(&self) -> Result<Vec<Flash>, Error> {
        let queued = self
            .0
            .get::<Vec<Flash>>(FLASHES_KEY)
            .map_err(read_error)?
            .unwrap_or_default();
        if !queued.is_empty() {
            self.0.remove(FLASHES_KEY);
        }
        Ok(queued)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::flash::FlashCategory;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    const TOKEN: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[actix_web::test]
    async fn round_trips_token() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let token = SessionToken::parse(TOKEN).expect("fixture token");
                        session.bind_token(&token)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let token = session.token()?.map(|t| t.to_string()).unwrap_or_default();
                        Ok::<_, Error>(HttpResponse::Ok().body(token))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let get_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, TOKEN);
    }

    #[actix_web::test]
    async fn missing_token_reads_as_none() {
        let app = test::init_service(session_test_app().route(
            "/get",
            web::get().to(|session: SessionContext| async move {
                let present = session.token()?.is_some();
                Ok::<_, Error>(HttpResponse::Ok().body(present.to_string()))
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        let body = test::read_body(res).await;
        assert_eq!(body, "false");
    }

    #[actix_web::test]
    async fn flashes_are_shown_once() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/push",
                    web::get().to(|session: SessionContext| async move {
                        session.push_flash(Flash::success("first"))?;
                        session.push_flash(Flash::info("second"))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/take",
                    web::get().to(|session: SessionContext| async move {
                        let flashes = session.take_flashes()?;
                        Ok::<_, Error>(HttpResponse::Ok().json(flashes))
                    }),
                ),
        )
        .await;

        let push = test::call_service(&app, test::TestRequest::get().uri("/push").to_request()).await;
        let cookie = push
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let take = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/take")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let drained_cookie = take
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie rewritten")
            .into_owned();
        let flashes: Vec<Flash> = test::read_body_json(take).await;
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].category, FlashCategory::Success);
        assert_eq!(flashes[1].message, "second");

        let again = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/take")
                .cookie(drained_cookie)
                .to_request(),
        )
        .await;
        let flashes: Vec<Flash> = test::read_body_json(again).await;
        assert!(flashes.is_empty());
    }
}
