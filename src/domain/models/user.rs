// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::password;
use serde::Serialize;

/// 引导登录使用的管理员用户名
pub const BOOTSTRAP_USERNAME: &str = "admin";

/// 站点管理员
///
/// 系统中有且仅有一条管理员记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// 校验明文密码与存储的哈希是否匹配
    pub fn check_password(&self, password: &str) -> bool {
        password::check_password_hash(&self.password_hash, password)
    }
}
