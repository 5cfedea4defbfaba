// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use blogadmin::config::settings::{
    AdminSettings, DatabaseSettings, ServerSettings, SessionSettings, Settings,
};
use blogadmin::infrastructure::database::connection;
use blogadmin::presentation::context::AdminContext;
use blogadmin::presentation::routes;
use std::sync::Arc;

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub ctx: AdminContext,
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
            min_connections: Some(1),
            connect_timeout: None,
            idle_timeout: None,
        },
        admin: AdminSettings {
            password_iterations: 1000,
            ..AdminSettings::default()
        },
        session: SessionSettings {
            secret: "integration-secret".to_string(),
            ..SessionSettings::default()
        },
    }
}

/// 基于内存数据库的测试应用，客户端会保存响应中的 Cookie
pub async fn create_test_app() -> TestApp {
    let db = Arc::new(connection::in_memory().await.unwrap());
    let ctx = AdminContext::new(db, Arc::new(test_settings())).unwrap();
    let mut server = TestServer::new(routes::routes(ctx.clone())).unwrap();
    server.save_cookies();

    TestApp { server, ctx }
}

/// 已用初始密码登录的测试应用
pub async fn logged_in_app() -> TestApp {
    let app = create_test_app().await;
    let response = app
        .server
        .post("/login")
        .form(&[("username", "admin"), ("password", "admin")])
        .await;
    assert_redirect(&response, "/");
    // Consume the login flash so later pages start clean.
    app.server.get("/").await;
    app
}

pub fn assert_redirect(response: &TestResponse, location: &str) {
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), location);
}
