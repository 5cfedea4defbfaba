// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::field_value::{AssignError, FieldMap, FieldValue};
use super::label::{Category, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 博客文章
///
/// 分类与标签在赋值时已解析为实体（已存在或新建），`id` 为 `None`
/// 表示文章尚未保存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<i32>,
    pub title: String,
    pub description: String,
    pub image: String,
    pub author: String,
    pub slug: String,
    pub content: String,
    pub lang: String,
    /// 是否开启评论
    pub comment: bool,
    pub is_draft: bool,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    /// 创建时间
    pub date: DateTime<Utc>,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            image: String::new(),
            author: String::new(),
            slug: String::new(),
            content: String::new(),
            lang: "en".to_string(),
            comment: true,
            is_draft: false,
            category: None,
            tags: Vec::new(),
            date: Utc::now(),
        }
    }
}

impl Post {
    /// 从表单数据构造新文章，创建时间取当前时间
    pub fn from_fields(fields: FieldMap) -> Result<Self, AssignError> {
        let mut post = Post::default();
        post.assign_all(fields)?;
        Ok(post)
    }

    /// 逐个写入表单字段
    pub fn assign_all(&mut self, fields: FieldMap) -> Result<(), AssignError> {
        for (key, value) in fields {
            self.assign(&key, value)?;
        }
        Ok(())
    }

    /// 按字段名写入单个字段，未知字段名或类型不符时返回错误
    pub fn assign(&mut self, key: &str, value: FieldValue) -> Result<(), AssignError> {
        match key {
            "title" => self.title = value.into_text(key)?,
            "description" => self.description = value.into_text(key)?,
            "image" => self.image = value.into_text(key)?,
            "author" => self.author = value.into_text(key)?,
            "slug" => self.slug = value.into_text(key)?,
            "content" => self.content = value.into_text(key)?,
            "lang" => self.lang = value.into_text(key)?,
            "comment" => self.comment = value.into_bool(key)?,
            "is_draft" => self.is_draft = value.into_bool(key)?,
            "category" => self.category = value.into_category(key)?,
            "tags" => self.tags = value.into_tags(key)?,
            _ => return Err(AssignError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    pub fn is_about(&self) -> bool {
        self.category.as_ref().is_some_and(Category::is_about)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::label::LabelEntity;

    #[test]
    fn test_assign_known_fields() {
        let mut post = Post::default();
        post.assign("title", FieldValue::Text("Hello".to_string()))
            .unwrap();
        post.assign("is_draft", FieldValue::Bool(true)).unwrap();
        post.assign(
            "category",
            FieldValue::Category(Some(Category::transient("Rust".to_string()))),
        )
        .unwrap();
        post.assign(
            "tags",
            FieldValue::Tags(vec![Tag::transient("axum".to_string())]),
        )
        .unwrap();

        assert_eq!(post.title, "Hello");
        assert!(post.is_draft);
        assert_eq!(post.category.unwrap().text, "Rust");
        assert_eq!(post.tags.len(), 1);
    }

    #[test]
    fn test_assign_rejects_unknown_field() {
        let mut post = Post::default();
        let err = post
            .assign("csrf_token", FieldValue::Text("abc".to_string()))
            .unwrap_err();
        assert_eq!(err, AssignError::UnknownField("csrf_token".to_string()));
    }

    #[test]
    fn test_assign_rejects_type_mismatch() {
        let mut post = Post::default();
        let err = post.assign("comment", FieldValue::Text("yes".to_string()));
        assert!(matches!(err, Err(AssignError::TypeMismatch { .. })));
        assert!(post.comment);
    }

    #[test]
    fn test_from_fields_builds_post() {
        let mut fields = FieldMap::new();
        fields.insert("title".to_string(), FieldValue::Text("T".to_string()));
        fields.insert("slug".to_string(), FieldValue::Text("t".to_string()));
        fields.insert(
            "category".to_string(),
            FieldValue::Category(Some(Category::transient("About".to_string()))),
        );

        let post = Post::from_fields(fields).unwrap();
        assert_eq!(post.id, None);
        assert_eq!(post.slug, "t");
        assert!(post.is_about());
    }
}
