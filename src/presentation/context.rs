// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::auth_use_case::AuthUseCase;
use crate::application::use_cases::post_use_case::PostUseCase;
use crate::application::use_cases::settings_use_case::SettingsUseCase;
use crate::config::settings::Settings;
use crate::domain::models::label::{Category, Tag};
use crate::domain::repositories::label_repository::LabelLookup;
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::site_settings_repository::SiteSettingsRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::infrastructure::repositories::label_repo_impl::{CategoryRepositoryImpl, TagRepositoryImpl};
use crate::infrastructure::repositories::post_repo_impl::PostRepositoryImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use crate::presentation::session::{SessionError, SessionSigner};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// 后台请求上下文
///
/// 每个处理器通过它显式获得仓库、配置与会话签名器
#[derive(Clone)]
pub struct AdminContext {
    pub settings: Arc<Settings>,
    pub users: Arc<dyn UserRepository>,
    pub site: Arc<dyn SiteSettingsRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn LabelLookup<Category>>,
    pub tags: Arc<dyn LabelLookup<Tag>>,
    pub signer: SessionSigner,
}

impl AdminContext {
    /// 基于数据库连接装配全部仓库
    pub fn new(db: Arc<DatabaseConnection>, settings: Arc<Settings>) -> Result<Self, SessionError> {
        let users = Arc::new(UserRepositoryImpl::new(db.clone(), settings.admin.clone()));
        let signer = SessionSigner::new(&settings.session)?;

        Ok(Self {
            users: users.clone(),
            site: users,
            posts: Arc::new(PostRepositoryImpl::new(db.clone())),
            categories: Arc::new(CategoryRepositoryImpl::new(db.clone())),
            tags: Arc::new(TagRepositoryImpl::new(db)),
            signer,
            settings,
        })
    }

    pub fn auth_use_case(&self) -> AuthUseCase {
        AuthUseCase::new(self.users.clone(), self.settings.admin.clone())
    }

    pub fn post_use_case(&self) -> PostUseCase {
        PostUseCase::new(
            self.posts.clone(),
            self.categories.clone(),
            self.tags.clone(),
            self.settings.admin.clone(),
        )
    }

    pub fn settings_use_case(&self) -> SettingsUseCase {
        SettingsUseCase::new(self.site.clone())
    }
}
