// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::forms::field::FieldView;
use crate::domain::models::field_value::AssignError;
use crate::domain::repositories::post_repository::PostPage;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::password::PasswordError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 用例错误类型
#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Record not found")]
    NotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Field mapping error: {0}")]
    Assign(#[from] AssignError),
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

/// 提示消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Danger,
}

/// 一次性提示消息，在下一个页面显示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: FlashCategory,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Danger,
            message: message.into(),
        }
    }
}

/// 提交成功后的跳转
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub flash: Option<FlashMessage>,
}

impl Redirect {
    pub fn to(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            flash: None,
        }
    }

    pub fn with_flash(mut self, flash: FlashMessage) -> Self {
        self.flash = Some(flash);
        self
    }
}

/// 工作流结果：渲染页面，或提交后跳转
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Render(T),
    Redirect(Redirect),
}

/// 表单页面
#[derive(Debug, Clone, PartialEq)]
pub struct FormPage {
    pub title: &'static str,
    /// 表单提交地址
    pub action: String,
    pub fields: Vec<FieldView>,
    pub submit: &'static str,
}

/// 设置页面，附带修改密码表单
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPage {
    pub settings: FormPage,
    pub password: FormPage,
}

/// 文章列表页面
#[derive(Debug, Clone)]
pub struct PostListPage {
    pub posts: PostPage,
    pub draft_count: u64,
    pub is_draft: bool,
}
