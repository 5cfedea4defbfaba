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

use axum::{extract::Extension, response::Response};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    application::{forms::form_data::FormData, use_cases::outcome::Outcome},
    presentation::{
        context::AdminContext,
        errors::AppError,
        handlers::{render, see_other},
        views::pages,
    },
};

/// 站点设置页面
pub async fn settings_page(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let page = ctx.settings_use_case().page().await?;
    Ok(render(jar, |flashes| pages::settings(&page, flashes)))
}

/// 保存站点设置
pub async fn settings_submit(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    formdata: FormData,
) -> Result<Response, AppError> {
    match ctx.settings_use_case().submit(&formdata).await? {
        Outcome::Render(page) => Ok(render(jar, |flashes| pages::settings(&page, flashes))),
        Outcome::Redirect(redirect) => Ok(see_other(jar, redirect)),
    }
}
