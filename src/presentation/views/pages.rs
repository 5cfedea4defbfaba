// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::widgets::render_field;
use crate::application::use_cases::outcome::{
    FlashCategory, FlashMessage, FormPage, PostListPage, SettingsPage,
};
use crate::domain::models::post::Post;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// 页面外框
///
/// `nav` 为真时显示后台导航
fn layout(title: &str, flashes: &[FlashMessage], nav: bool, body: &str) -> String {
    let mut html = format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{} - Admin</title></head><body>",
        encode_text(title)
    );
    if nav {
        html.push_str(concat!(
            r#"<nav><a href="/">Posts</a> <a href="/drafts">Drafts</a> "#,
            r#"<a href="/new">New Post</a> <a href="/edit?cat=About">About</a> "#,
            r#"<a href="/settings">Settings</a> <a href="/logout">Logout</a></nav>"#
        ));
    }
    for flash in flashes {
        let class = match flash.category {
            FlashCategory::Success => "success",
            FlashCategory::Danger => "danger",
        };
        html.push_str(&format!(
            r#"<div class="alert alert-{}">{}</div>"#,
            class,
            encode_text(&flash.message)
        ));
    }
    html.push_str(&format!("<main><h1>{}</h1>", encode_text(title)));
    html.push_str(body);
    html.push_str("</main></body></html>");
    html
}

fn form_body(form: &FormPage) -> String {
    let mut html = format!(
        r#"<form method="post" action="{}">"#,
        encode_double_quoted_attribute(&form.action)
    );
    for field in &form.fields {
        html.push_str(&render_field(field));
    }
    html.push_str(&format!(
        r#"<button type="submit">{}</button></form>"#,
        encode_text(form.submit)
    ));
    html
}

/// 登录页
pub fn login(form: &FormPage, flashes: &[FlashMessage]) -> String {
    layout(form.title, flashes, false, &form_body(form))
}

/// 文章编辑/新建页
pub fn editor(form: &FormPage, flashes: &[FlashMessage]) -> String {
    layout(form.title, flashes, true, &form_body(form))
}

/// 设置页，修改密码表单始终可用
pub fn settings(page: &SettingsPage, flashes: &[FlashMessage]) -> String {
    let mut body = form_body(&page.settings);
    body.push_str(&format!("<h2>{}</h2>", encode_text(page.password.title)));
    body.push_str(&form_body(&page.password));
    layout(page.settings.title, flashes, true, &body)
}

fn post_row(post: &Post) -> String {
    let id = post.id.unwrap_or_default();
    let category = post
        .category
        .as_ref()
        .map(|c| c.text.as_str())
        .unwrap_or_default();
    let tags = post
        .tags
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        concat!(
            r#"<tr><td><a href="/edit?id={id}">{title}</a></td><td>{category}</td>"#,
            r#"<td>{tags}</td><td>{lang}</td><td>{date}</td>"#,
            r#"<td><form method="post" action="/delete?id={id}">"#,
            r#"<button type="submit">Delete</button></form></td></tr>"#
        ),
        id = id,
        title = encode_text(&post.title),
        category = encode_text(category),
        tags = encode_text(&tags),
        lang = encode_text(&post.lang),
        date = post.date.format("%Y-%m-%d %H:%M"),
    )
}

/// 文章列表页
pub fn post_list(page: &PostListPage, flashes: &[FlashMessage]) -> String {
    let (title, base) = if page.is_draft {
        ("Drafts", "/drafts")
    } else {
        ("Posts", "/")
    };

    let mut body = format!(
        r#"<p class="draft-count">Drafts: {}</p>"#,
        page.draft_count
    );
    body.push_str(
        "<table><thead><tr><th>Title</th><th>Category</th><th>Tags</th>\
         <th>Language</th><th>Date</th><th></th></tr></thead><tbody>",
    );
    for post in &page.posts.items {
        body.push_str(&post_row(post));
    }
    body.push_str("</tbody></table>");

    let posts = &page.posts;
    if posts.has_prev() || posts.has_next() {
        body.push_str(r#"<nav class="pagination">"#);
        if posts.has_prev() {
            body.push_str(&format!(
                r#"<a href="{}?page={}">Previous</a> "#,
                base,
                posts.page - 1
            ));
        }
        body.push_str(&format!("<span>{} / {}</span>", posts.page, posts.pages()));
        if posts.has_next() {
            body.push_str(&format!(
                r#" <a href="{}?page={}">Next</a>"#,
                base,
                posts.page + 1
            ));
        }
        body.push_str("</nav>");
    }

    layout(title, flashes, true, &body)
}

pub fn not_found() -> String {
    layout("Not Found", &[], false, "<p>The requested page was not found.</p>")
}

pub fn server_error() -> String {
    layout(
        "Internal Server Error",
        &[],
        false,
        "<p>Something went wrong while handling the request.</p>",
    )
}
