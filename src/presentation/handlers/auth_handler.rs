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

use axum::{
    extract::{Extension, Query},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use crate::{
    application::{
        forms::form_data::FormData,
        use_cases::{auth_use_case::LoginResult, outcome::Redirect},
    },
    presentation::{
        context::AdminContext,
        errors::AppError,
        handlers::{render, see_other},
        middleware::auth_middleware::CurrentUser,
        session,
        views::pages,
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// 登录页面
pub async fn login_page(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    let page = ctx.auth_use_case().login_page(query.next);
    render(jar, |flashes| pages::login(&page, flashes))
}

/// 登录提交
pub async fn login(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    formdata: FormData,
) -> Result<Response, AppError> {
    match ctx.auth_use_case().login(&formdata).await? {
        LoginResult::Invalid(page) => Ok(render(jar, |flashes| pages::login(&page, flashes))),
        LoginResult::Authenticated {
            user,
            remember,
            redirect,
        } => {
            let jar = jar.add(ctx.signer.session_cookie(user.id, remember));
            Ok(see_other(jar, redirect))
        }
    }
}

/// 注销并回到文章列表
pub async fn logout(Extension(CurrentUser(user)): Extension<CurrentUser>, jar: CookieJar) -> Response {
    info!("Administrator '{}' logged out", user.username);
    see_other(jar.remove(session::removal_cookie()), Redirect::to("/"))
}

/// 修改密码
pub async fn change_password(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    formdata: FormData,
) -> Result<Response, AppError> {
    let redirect = ctx.auth_use_case().change_password(&formdata).await?;
    Ok(see_other(jar, redirect))
}
