// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::application::use_cases::outcome::UseCaseError;
use crate::domain::repositories::RepositoryError;
use crate::presentation::views::pages;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn is_not_found(&self) -> bool {
        matches!(
            self.0.downcast_ref::<UseCaseError>(),
            Some(UseCaseError::NotFound)
                | Some(UseCaseError::Repository(RepositoryError::NotFound))
        ) || matches!(
            self.0.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::NotFound)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            return (StatusCode::NOT_FOUND, Html(pages::not_found())).into_response();
        }

        error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(pages::server_error()),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
