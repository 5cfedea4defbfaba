// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::user::User;
use async_trait::async_trait;

/// 管理员仓库特质
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据用户名查找管理员
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    /// 根据ID查找管理员
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;
    /// 是否已存在管理员记录
    async fn exists(&self) -> Result<bool, RepositoryError>;
    /// 获取唯一的管理员，不存在时以默认密码创建 `admin`
    async fn get_one(&self) -> Result<User, RepositoryError>;
    /// 更新管理员密码哈希
    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), RepositoryError>;
}
