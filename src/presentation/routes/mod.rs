// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::context::AdminContext;
use crate::presentation::handlers::{auth_handler, post_handler, settings_handler};
use crate::presentation::middleware::auth_middleware::auth_middleware;
use axum::{
    extract::Extension,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// 除登录页和探活端点外，所有页面都要求已登录
///
/// # 参数
///
/// * `ctx` - 后台请求上下文
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(ctx: AdminContext) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route(
            "/login",
            get(auth_handler::login_page).post(auth_handler::login),
        );

    let protected_routes = Router::new()
        .route("/", get(post_handler::posts))
        .route("/drafts", get(post_handler::drafts))
        .route("/logout", get(auth_handler::logout))
        .route(
            "/settings",
            get(settings_handler::settings_page).post(settings_handler::settings_submit),
        )
        .route(
            "/edit",
            get(post_handler::edit_page).post(post_handler::edit_submit),
        )
        .route(
            "/delete",
            post(post_handler::delete).delete(post_handler::delete),
        )
        .route(
            "/new",
            get(post_handler::new_page).post(post_handler::new_submit),
        )
        .route("/password", post(auth_handler::change_password))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(ctx))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
