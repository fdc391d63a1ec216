//! Handler tests for user management pages.

use super::*;
use crate::domain::{ErrorCode, Registration, UserId};
use crate::inbound::http::configure;
use crate::inbound::http::test_utils::{
    location, login_request, session_cookie, test_session_middleware,
};
use crate::test_support::http::InMemoryBackend;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;

fn test_app(
    backend: &InMemoryBackend,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(backend.state()))
        .wrap(test_session_middleware())
        .configure(configure)
}

async fn seed(backend: &InMemoryBackend, name: &str, email: &str) -> UserId {
    let registration = Registration::try_from_parts(name, email, "p1").expect("registration");
    let verified = backend
        .state()
        .accounts
        .register(&registration)
        .await
        .expect("register");
    *verified.user().id()
}

#[actix_web::test]
async fn list_redirects_anonymous_visitors() {
    let backend = InMemoryBackend::default();
    let app = actix_test::init_service(test_app(&backend)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login?next=%2Fusers");
}

#[actix_web::test]
async fn list_shows_every_user_without_password_hashes() {
    let backend = InMemoryBackend::default();
    seed(&backend, "Ann", "ann@x.com").await;
    seed(&backend, "Bob", "bob@x.com").await;
    let app = actix_test::init_service(test_app(&backend)).await;
    let login = actix_test::call_service(&app, login_request("ann@x.com", "p1").to_request()).await;
    let cookie = session_cookie(&login);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/users")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let page: Value = actix_test::read_body_json(res).await;
    let users = page["content"]["users"].as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[1]["email"], "bob@x.com");
    assert_eq!(users[1]["status"], "Active");
    assert!(users[0].get("passwordHash").is_none());
    assert!(users[0].get("password_hash").is_none());
    assert_eq!(page["currentUser"]["email"], "ann@x.com");
}

#[actix_web::test]
async fn edit_overwrites_only_submitted_fields() {
    let backend = InMemoryBackend::default();
    seed(&backend, "Ann", "ann@x.com").await;
    let bob = seed(&backend, "Bob", "bob@x.com").await;
    let app = actix_test::init_service(test_app(&backend)).await;
    let login = actix_test::call_service(&app, login_request("ann@x.com", "p1").to_request()).await;
    let cookie = session_cookie(&login);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/edit_user/{bob}"))
            .cookie(cookie.clone())
            .set_form([("status", "Inactive")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/users");
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/edit_user/{bob}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let page: Value = actix_test::read_body_json(res).await;
    assert_eq!(page["content"]["user"]["name"], "Bob");
    assert_eq!(page["content"]["user"]["email"], "bob@x.com");
    assert_eq!(page["content"]["user"]["status"], "Inactive");
    assert_eq!(page["flashes"][0]["message"], "User updated.");
}

#[actix_web::test]
async fn edit_to_taken_email_conflicts() {
    let backend = InMemoryBackend::default();
    seed(&backend, "Ann", "ann@x.com").await;
    let bob = seed(&backend, "Bob", "bob@x.com").await;
    let app = actix_test::init_service(test_app(&backend)).await;
    let login = actix_test::call_service(&app, login_request("ann@x.com", "p1").to_request()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/edit_user/{bob}"))
            .cookie(session_cookie(&login))
            .set_form([("email", "ann@x.com")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[case("name", "   ", "empty")]
#[case("email", "not-an-email", "invalid_email")]
#[case("status", "Suspended", "invalid_status")]
#[actix_web::test]
async fn edit_rejects_invalid_fields(
    #[case] field: &str,
    #[case] value: &str,
    #[case] code: &str,
) {
    let backend = InMemoryBackend::default();
    let ann = seed(&backend, "Ann", "ann@x.com").await;
    let app = actix_test::init_service(test_app(&backend)).await;
    let login = actix_test::call_service(&app, login_request("ann@x.com", "p1").to_request()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/edit_user/{ann}"))
            .cookie(session_cookie(&login))
            .set_form([(field, value)])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn delete_removes_user_and_second_delete_is_not_found() {
    let backend = InMemoryBackend::default();
    seed(&backend, "Ann", "ann@x.com").await;
    let bob = seed(&backend, "Bob", "bob@x.com").await;
    let app = actix_test::init_service(test_app(&backend)).await;
    let login = actix_test::call_service(&app, login_request("ann@x.com", "p1").to_request()).await;
    let cookie = session_cookie(&login);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/delete_user/{bob}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(backend.users.len(), 1);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/delete_user/{bob}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn malformed_id_is_not_found() {
    let backend = InMemoryBackend::default();
    seed(&backend, "Ann", "ann@x.com").await;
    let app = actix_test::init_service(test_app(&backend)).await;
    let login = actix_test::call_service(&app, login_request("ann@x.com", "p1").to_request()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/edit_user/42")
            .cookie(session_cookie(&login))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: crate::domain::Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::NotFound);
}
