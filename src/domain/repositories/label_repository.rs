// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::label::LabelEntity;
use async_trait::async_trait;

/// 标签类实体查找特质
///
/// 为自动新增字段提供“按属性查找”和“列出全部”两种只读查询
#[async_trait]
pub trait LabelLookup<E: LabelEntity>: Send + Sync {
    /// 查找 `label_key` 属性等于 `label` 的第一条记录
    async fn find_by_label(&self, label_key: &str, label: &str)
        -> Result<Option<E>, RepositoryError>;
    /// 列出全部记录
    async fn all(&self) -> Result<Vec<E>, RepositoryError>;
}
