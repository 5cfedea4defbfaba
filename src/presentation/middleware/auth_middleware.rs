// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::user::User;
use crate::presentation::context::AdminContext;
use crate::presentation::errors::AppError;
use crate::presentation::session::SESSION_COOKIE;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::{debug, warn};

/// 当前登录的管理员，由认证中间件注入请求扩展
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// 认证中间件
///
/// 校验会话 Cookie 并加载管理员；未登录时以 303 跳转到登录页，
/// 并通过 `next` 参数带上原请求路径
///
/// # 参数
///
/// * `ctx` - 后台请求上下文
/// * `jar` - 请求 Cookie
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
pub async fn auth_middleware(
    State(ctx): State<AdminContext>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    debug!("AuthMiddleware processing path: {}", path);

    let user_id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| ctx.signer.verify(cookie.value(), Utc::now().timestamp()));

    let user = match user_id {
        Some(id) => match ctx.users.find_by_id(id).await {
            Ok(user) => user,
            Err(e) => return AppError::from(e).into_response(),
        },
        None => None,
    };

    match user {
        Some(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        None => {
            if jar.get(SESSION_COOKIE).is_some() {
                warn!("Rejected session cookie for {}", path);
            }
            login_redirect(&path)
        }
    }
}

fn login_redirect(path: &str) -> Response {
    let location = format!("/login?next={}", urlencoding::encode(path));
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
}
