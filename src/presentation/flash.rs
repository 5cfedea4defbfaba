// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::outcome::FlashMessage;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use tracing::debug;

/// 提示消息 Cookie 名称
pub const FLASH_COOKIE: &str = "blogadmin_flash";

/// 追加一条提示消息
pub fn push(jar: CookieJar, message: FlashMessage) -> CookieJar {
    let mut messages = read(&jar);
    messages.push(message);
    match serde_json::to_vec(&messages) {
        Ok(raw) => jar.add(
            Cookie::build((FLASH_COOKIE, URL_SAFE_NO_PAD.encode(raw)))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build(),
        ),
        Err(e) => {
            debug!("Dropping flash message: {}", e);
            jar
        }
    }
}

/// 取出全部提示消息并清除 Cookie
pub fn take(jar: CookieJar) -> (CookieJar, Vec<FlashMessage>) {
    let messages = read(&jar);
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, messages);
    }
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, messages)
}

fn read(jar: &CookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| URL_SAFE_NO_PAD.decode(cookie.value()).ok())
        .and_then(|raw| serde_json::from_slice(&raw).ok())
        .unwrap_or_default()
}
