// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{assert_redirect, create_test_app, logged_in_app};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use blogadmin::application::forms::login::{INCORRECT_PASSWORD_MESSAGE, INVALID_USER_MESSAGE};
use blogadmin::application::use_cases::auth_use_case::{
    INVALID_PASSWORD_MESSAGE, LOGGED_IN_MESSAGE, PASSWORD_UPDATED_MESSAGE,
};

#[tokio::test]
async fn protected_pages_redirect_to_login() {
    let app = create_test_app().await;

    let response = app.server.get("/drafts?page=2").await;
    assert_redirect(&response, "/login?next=%2Fdrafts%3Fpage%3D2");

    let response = app.server.post("/delete?id=1").await;
    assert_redirect(&response, "/login?next=%2Fdelete%3Fid%3D1");
}

#[tokio::test]
async fn login_page_carries_next() {
    let app = create_test_app().await;

    let response = app.server.get("/login?next=/settings").await;
    response.assert_status(StatusCode::OK);
    let html = response.text();
    assert!(html.contains(r#"name="username""#));
    assert!(html.contains(r#"type="hidden" name="next" value="/settings""#));
}

#[tokio::test]
async fn bootstrap_login_shows_flash_once() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/login")
        .form(&[("username", "admin"), ("password", "admin")])
        .await;
    assert_redirect(&response, "/");

    let page = app.server.get("/").await;
    page.assert_status(StatusCode::OK);
    assert!(page.text().contains(LOGGED_IN_MESSAGE));

    let page = app.server.get("/").await;
    page.assert_status(StatusCode::OK);
    assert!(!page.text().contains(LOGGED_IN_MESSAGE));
}

#[tokio::test]
async fn failed_login_renders_errors_without_session() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/login")
        .form(&[("username", "admin"), ("password", "wrong")])
        .await;
    response.assert_status(StatusCode::OK);
    assert!(response.text().contains(INCORRECT_PASSWORD_MESSAGE));

    let response = app
        .server
        .post("/login")
        .form(&[("username", "bob"), ("password", "admin")])
        .await;
    response.assert_status(StatusCode::OK);
    assert!(response.text().contains(INVALID_USER_MESSAGE));

    let response = app.server.get("/").await;
    assert_redirect(&response, "/login?next=%2F");
}

#[tokio::test]
async fn login_follows_local_next_only() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/login")
        .form(&[
            ("username", "admin"),
            ("password", "admin"),
            ("next", "/settings"),
        ])
        .await;
    assert_redirect(&response, "/settings");

    let response = app
        .server
        .post("/login")
        .form(&[
            ("username", "admin"),
            ("password", "admin"),
            ("next", "//evil.example.com"),
        ])
        .await;
    assert_redirect(&response, "/");
}

#[tokio::test]
async fn logout_clears_session() {
    let app = logged_in_app().await;

    let response = app.server.get("/logout").await;
    assert_redirect(&response, "/");

    let response = app.server.get("/").await;
    assert_redirect(&response, "/login?next=%2F");
}

#[tokio::test]
async fn forged_session_cookie_is_rejected() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/settings")
        .add_header(
            HeaderName::from_static("cookie"),
            HeaderValue::from_static("blogadmin_session=1.1700000000.Zm9yZ2Vk"),
        )
        .await;
    assert_redirect(&response, "/login?next=%2Fsettings");
}

#[tokio::test]
async fn change_password_round_trip() {
    let app = logged_in_app().await;

    let response = app
        .server
        .post("/password")
        .form(&[("old", "admin"), ("new", "s3cret"), ("confirm", "nope")])
        .await;
    assert_redirect(&response, "/settings");
    assert!(app.server.get("/settings").await.text().contains(INVALID_PASSWORD_MESSAGE));

    let response = app
        .server
        .post("/password")
        .form(&[("old", "admin"), ("new", "s3cret"), ("confirm", "s3cret")])
        .await;
    assert_redirect(&response, "/settings");
    assert!(app.server.get("/settings").await.text().contains(PASSWORD_UPDATED_MESSAGE));

    app.server.get("/logout").await;
    let response = app
        .server
        .post("/login")
        .form(&[("username", "admin"), ("password", "admin")])
        .await;
    response.assert_status(StatusCode::OK);
    assert!(response.text().contains(INCORRECT_PASSWORD_MESSAGE));

    let response = app
        .server
        .post("/login")
        .form(&[("username", "admin"), ("password", "s3cret")])
        .await;
    assert_redirect(&response, "/");
}
