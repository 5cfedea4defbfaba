// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{assert_redirect, logged_in_app, TestApp};
use axum::http::StatusCode;
use blogadmin::application::forms::field::REQUIRED_MESSAGE;
use blogadmin::application::use_cases::post_use_case::{
    POST_DELETED_MESSAGE, POST_UPDATED_MESSAGE,
};
use blogadmin::domain::repositories::post_repository::PostListQuery;

async fn submit_post(app: &TestApp, title: &str, category: &str, is_draft: bool) {
    let mut form = vec![
        ("title", title),
        ("author", "Frost"),
        ("slug", "hello-world"),
        ("content", "# Hello"),
        ("lang", "en"),
        ("category", category),
        ("tags", "rust"),
        ("tags", "web"),
        ("tags", "rust"),
    ];
    if is_draft {
        form.push(("is_draft", "y"));
    }
    let response = app.server.post("/new").form(&form).await;
    assert_redirect(&response, "/");
}

async fn first_post_id(app: &TestApp, is_draft: bool) -> i32 {
    let page = app
        .ctx
        .posts
        .list(PostListQuery {
            is_draft,
            page: 1,
            per_page: 50,
        })
        .await
        .unwrap();
    page.items[0].id.unwrap()
}

#[tokio::test]
async fn new_draft_is_listed_under_drafts() {
    let app = logged_in_app().await;
    submit_post(&app, "Hello", "Rust", true).await;

    let page = app.server.get("/").await;
    let html = page.text();
    assert!(html.contains("The draft 'Hello' is saved!"));
    assert!(html.contains("Drafts: 1"));
    assert!(!html.contains(r#"">Hello</a>"#));

    let drafts = app.server.get("/drafts").await;
    drafts.assert_status(StatusCode::OK);
    assert!(drafts.text().contains(r#"">Hello</a>"#));
}

#[tokio::test]
async fn new_post_creates_labels_once() {
    let app = logged_in_app().await;
    submit_post(&app, "First", "Rust", false).await;
    submit_post(&app, "Second", "Rust", false).await;

    let html = app.server.get("/").await.text();
    assert!(html.contains("The article 'Second' is posted successfully!"));
    assert!(html.contains(r#"">First</a>"#));

    let categories = app.ctx.categories.all().await.unwrap();
    assert_eq!(categories.len(), 1);
    let tags = app.ctx.tags.all().await.unwrap();
    assert_eq!(tags.len(), 2);

    let id = first_post_id(&app, false).await;
    let post = app.ctx.posts.find_by_id(id).await.unwrap().unwrap();
    let texts: Vec<&str> = post.tags.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["rust", "web"]);
}

#[tokio::test]
async fn new_post_with_missing_fields_rerenders_form() {
    let app = logged_in_app().await;

    let response = app
        .server
        .post("/new")
        .form(&[("title", ""), ("category", "Fresh"), ("lang", "en")])
        .await;
    response.assert_status(StatusCode::OK);
    let html = response.text();
    assert!(html.contains(REQUIRED_MESSAGE));
    assert!(html.contains(r#"value="Fresh" selected"#));

    assert!(app.ctx.categories.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn new_page_prefills_category_hint() {
    let app = logged_in_app().await;

    let response = app.server.get("/new?cat=Notes&lang=en").await;
    response.assert_status(StatusCode::OK);
    assert!(response.text().contains(r#"value="Notes" selected"#));
}

#[tokio::test]
async fn edit_updates_post() {
    let app = logged_in_app().await;
    submit_post(&app, "Before", "Rust", false).await;
    let id = first_post_id(&app, false).await;

    let page = app.server.get(&format!("/edit?id={}", id)).await;
    page.assert_status(StatusCode::OK);
    assert!(page.text().contains(r#"value="Before""#));

    let response = app
        .server
        .post(&format!("/edit?id={}", id))
        .form(&[
            ("title", "After"),
            ("author", "Frost"),
            ("slug", "after"),
            ("content", "updated"),
            ("lang", "en"),
            ("category", "Rust"),
            ("tags", "web"),
        ])
        .await;
    assert_redirect(&response, "/");

    let html = app.server.get("/").await.text();
    assert!(html.contains(POST_UPDATED_MESSAGE));
    assert!(html.contains(r#"">After</a>"#));

    let post = app.ctx.posts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(post.tags.len(), 1);
    assert_eq!(post.tags[0].text, "web");
}

#[tokio::test]
async fn edit_unknown_post_is_not_found() {
    let app = logged_in_app().await;

    app.server
        .get("/edit?id=42")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/edit?id=abc")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/edit")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn about_page_routing() {
    let app = logged_in_app().await;

    let response = app.server.get("/edit?cat=About").await;
    assert_redirect(&response, "/new?cat=About&lang=zh");

    let response = app
        .server
        .post("/new")
        .form(&[
            ("title", "About me"),
            ("author", "Frost"),
            ("slug", "about"),
            ("content", "hi"),
            ("lang", "zh"),
            ("category", "About"),
        ])
        .await;
    assert_redirect(&response, "/");

    let about = app.ctx.posts.find_about("zh").await.unwrap().unwrap();
    let response = app.server.get("/edit?cat=About&lang=zh").await;
    assert_redirect(&response, &format!("/edit?id={}", about.id.unwrap()));

    let html = app.server.get("/").await.text();
    assert!(!html.contains(r#"">About me</a>"#));

    let response = app.server.get("/edit?cat=About&lang=en").await;
    assert_redirect(&response, "/new?cat=About&lang=en");
}

#[tokio::test]
async fn delete_then_not_found() {
    let app = logged_in_app().await;
    submit_post(&app, "Doomed", "Rust", false).await;
    let id = first_post_id(&app, false).await;

    let response = app.server.post(&format!("/delete?id={}", id)).await;
    assert_redirect(&response, "/");
    assert!(app.server.get("/").await.text().contains(POST_DELETED_MESSAGE));

    app.server
        .post(&format!("/delete?id={}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("/edit?id={}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_accepts_delete_method() {
    let app = logged_in_app().await;
    submit_post(&app, "Doomed", "Rust", true).await;
    let id = first_post_id(&app, true).await;

    let response = app.server.delete(&format!("/delete?id={}", id)).await;
    assert_redirect(&response, "/");
    assert!(app.ctx.posts.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn out_of_range_pages_are_not_found() {
    let app = logged_in_app().await;

    app.server.get("/?page=1").await.assert_status(StatusCode::OK);
    app.server
        .get("/?page=2")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/drafts?page=0")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/?page=abc")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/?page=18446744073709551615")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/drafts?page=9223372036854775809")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
