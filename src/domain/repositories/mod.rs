// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 标签查找（label_repository）：按属性查找分类、标签，供自动新增字段使用
/// - 文章仓库（post_repository）：文章的查询、分页与级联保存
/// - 站点设置仓库（site_settings_repository）：站点设置的整体读写
/// - 管理员仓库（user_repository）：唯一管理员的查找与初始化
pub mod label_repository;
pub mod post_repository;
pub mod site_settings_repository;
pub mod user_repository;

use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 按名称查找的列不存在
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
