// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::label::{Category, LabelEntity, Tag};
use crate::domain::repositories::label_repository::LabelLookup;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{category, tag};
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

/// 分类仓库实现
#[derive(Clone)]
pub struct CategoryRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepositoryImpl {
    /// 创建新的分类仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LabelLookup<Category> for CategoryRepositoryImpl {
    async fn find_by_label(
        &self,
        label_key: &str,
        label: &str,
    ) -> Result<Option<Category>, RepositoryError> {
        let column = label_column::<Category, category::Column>(label_key)?;
        let model = category::Entity::find()
            .filter(column.eq(label))
            .order_by_asc(category::Column::Id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn all(&self) -> Result<Vec<Category>, RepositoryError> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

/// 标签仓库实现
#[derive(Clone)]
pub struct TagRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TagRepositoryImpl {
    /// 创建新的标签仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LabelLookup<Tag> for TagRepositoryImpl {
    async fn find_by_label(
        &self,
        label_key: &str,
        label: &str,
    ) -> Result<Option<Tag>, RepositoryError> {
        let column = label_column::<Tag, tag::Column>(label_key)?;
        let model = tag::Entity::find()
            .filter(column.eq(label))
            .order_by_asc(tag::Column::Id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn all(&self) -> Result<Vec<Tag>, RepositoryError> {
        let models = tag::Entity::find()
            .order_by_asc(tag::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

/// 将属性名解析为列，只接受实体可作为显示文本的属性
fn label_column<E, C>(label_key: &str) -> Result<C, RepositoryError>
where
    E: LabelEntity,
    C: ColumnTrait + std::str::FromStr,
{
    if E::transient(String::new()).attribute(label_key).is_none() {
        return Err(RepositoryError::UnknownColumn(label_key.to_string()));
    }
    label_key
        .parse::<C>()
        .map_err(|_| RepositoryError::UnknownColumn(label_key.to_string()))
}

impl From<category::Model> for Category {
    fn from(model: category::Model) -> Self {
        Self {
            id: Some(model.id),
            text: model.text,
        }
    }
}

impl From<tag::Model> for Tag {
    fn from(model: tag::Model) -> Self {
        Self {
            id: Some(model.id),
            text: model.text,
        }
    }
}
