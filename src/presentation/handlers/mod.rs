// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::outcome::{FlashMessage, Redirect};
use crate::presentation::flash;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

/// HTTP请求处理器模块
///
/// 每个处理器从上下文构造用例，执行后渲染页面或跳转
pub mod auth_handler;
pub mod post_handler;
pub mod settings_handler;

/// 以 303 跳转，附带的提示消息写入 Cookie
pub(crate) fn see_other(jar: CookieJar, redirect: Redirect) -> Response {
    let jar = match redirect.flash {
        Some(message) => flash::push(jar, message),
        None => jar,
    };
    (jar, axum::response::Redirect::to(&redirect.to)).into_response()
}

/// 渲染页面，同时取出待显示的提示消息
pub(crate) fn render<F>(jar: CookieJar, view: F) -> Response
where
    F: FnOnce(&[FlashMessage]) -> String,
{
    let (jar, flashes) = flash::take(jar);
    (jar, Html(view(&flashes))).into_response()
}
