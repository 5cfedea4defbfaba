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
    extract::{Extension, OriginalUri, Query},
    http::HeaderMap,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::{
    application::{
        forms::form_data::FormData,
        use_cases::{
            outcome::{FormPage, Outcome},
            post_use_case::{PageQuery, PostQuery},
        },
    },
    presentation::{
        context::AdminContext,
        errors::AppError,
        handlers::{render, see_other},
        views::pages,
    },
};

/// 已发布文章列表
pub async fn posts(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    list(ctx, jar, query, false).await
}

/// 草稿列表
pub async fn drafts(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    list(ctx, jar, query, true).await
}

async fn list(
    ctx: AdminContext,
    jar: CookieJar,
    query: PageQuery,
    is_draft: bool,
) -> Result<Response, AppError> {
    let page = ctx.post_use_case().list(is_draft, query.page()?).await?;
    Ok(render(jar, |flashes| pages::post_list(&page, flashes)))
}

/// 编辑页面
pub async fn edit_page(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    Query(query): Query<PostQuery>,
) -> Result<Response, AppError> {
    let outcome = ctx.post_use_case().edit_page(&query).await?;
    Ok(respond(jar, outcome))
}

/// 编辑提交
pub async fn edit_submit(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    Query(query): Query<PostQuery>,
    formdata: FormData,
) -> Result<Response, AppError> {
    let outcome = ctx.post_use_case().edit_submit(&query, &formdata).await?;
    Ok(respond(jar, outcome))
}

/// 新建页面
pub async fn new_page(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    Query(query): Query<PostQuery>,
) -> Result<Response, AppError> {
    let page = ctx.post_use_case().new_page(&query).await?;
    Ok(render(jar, |flashes| pages::editor(&page, flashes)))
}

/// 新建提交
pub async fn new_submit(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    formdata: FormData,
) -> Result<Response, AppError> {
    let outcome = ctx.post_use_case().new_submit(&formdata).await?;
    Ok(respond(jar, outcome))
}

/// 删除文章（POST 或 DELETE）
pub async fn delete(
    Extension(ctx): Extension<AdminContext>,
    jar: CookieJar,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<PostQuery>,
) -> Result<Response, AppError> {
    let host = headers
        .get("host")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    info!("http://{}{}", host, uri);

    let redirect = ctx.post_use_case().delete(&query).await?;
    Ok(see_other(jar, redirect))
}

fn respond(jar: CookieJar, outcome: Outcome<FormPage>) -> Response {
    match outcome {
        Outcome::Render(page) => render(jar, |flashes| pages::editor(&page, flashes)),
        Outcome::Redirect(redirect) => see_other(jar, redirect),
    }
}
