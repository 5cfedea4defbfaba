// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{assert_redirect, logged_in_app};
use axum::http::StatusCode;
use blogadmin::application::forms::field::{INVALID_CHOICE_MESSAGE, REQUIRED_MESSAGE};
use blogadmin::application::use_cases::settings_use_case::SETTINGS_UPDATED_MESSAGE;

#[tokio::test]
async fn settings_page_shows_both_forms() {
    let app = logged_in_app().await;

    let response = app.server.get("/settings").await;
    response.assert_status(StatusCode::OK);
    let html = response.text();
    assert!(html.contains(r#"action="/settings""#));
    assert!(html.contains(r#"action="/password""#));
    assert!(html.contains(r#"name="sociallinks-0-name""#));
}

#[tokio::test]
async fn settings_submit_merges_into_site() {
    let app = logged_in_app().await;

    let response = app
        .server
        .post("/settings")
        .form(&[
            ("name", "My Blog"),
            ("description", "Notes"),
            ("locale", "zh_Hans_CN"),
            ("sociallinks-1-name", "GitHub"),
            ("sociallinks-1-icon", "github"),
            ("sociallinks-1-link", "https://github.com/frost"),
            ("sociallinks-0-name", "Twitter"),
            ("sociallinks-0-icon", "twitter"),
            ("sociallinks-0-link", "https://twitter.com/frost"),
            ("sociallinks-2-name", ""),
            ("sociallinks-2-icon", ""),
            ("sociallinks-2-link", ""),
        ])
        .await;
    assert_redirect(&response, "/settings");

    let html = app.server.get("/settings").await.text();
    assert!(html.contains(SETTINGS_UPDATED_MESSAGE));
    assert!(html.contains(r#"value="My Blog""#));

    let site = app.ctx.site.load().await.unwrap();
    assert_eq!(site.name, "My Blog");
    assert_eq!(site.locale, "zh_Hans_CN");
    let names: Vec<&str> = site.sociallinks.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Twitter", "GitHub"]);

    // Fields left out of a later submission keep their stored values.
    let response = app
        .server
        .post("/settings")
        .form(&[("description", "Updated")])
        .await;
    assert_redirect(&response, "/settings");
    let site = app.ctx.site.load().await.unwrap();
    assert_eq!(site.name, "My Blog");
    assert_eq!(site.description, "Updated");
    assert_eq!(site.sociallinks.len(), 2);
}

#[tokio::test]
async fn invalid_settings_are_not_saved() {
    let app = logged_in_app().await;

    let response = app
        .server
        .post("/settings")
        .form(&[
            ("name", "Broken"),
            ("locale", "fr"),
            ("sociallinks-0-name", "GitHub"),
        ])
        .await;
    response.assert_status(StatusCode::OK);
    let html = response.text();
    assert!(html.contains(INVALID_CHOICE_MESSAGE));
    assert!(html.contains(REQUIRED_MESSAGE));

    let site = app.ctx.site.load().await.unwrap();
    assert_eq!(site.name, "");
}
