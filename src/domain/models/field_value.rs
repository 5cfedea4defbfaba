// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::label::{Category, Tag};
use super::site_settings::SocialLink;
use std::collections::BTreeMap;
use thiserror::Error;

/// 表单字段名到字段值的映射，即表单的 `data`
pub type FieldMap = BTreeMap<String, FieldValue>;

/// 表单解析后的字段值
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Category(Option<Category>),
    Tags(Vec<Tag>),
    SocialLinks(Vec<SocialLink>),
}

/// 字段映射错误
#[derive(Error, Debug, PartialEq)]
pub enum AssignError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field {field} has an unexpected value type")]
    TypeMismatch { field: String },
}

impl FieldValue {
    pub fn into_text(self, field: &str) -> Result<String, AssignError> {
        match self {
            FieldValue::Text(value) => Ok(value),
            _ => Err(mismatch(field)),
        }
    }

    pub fn into_bool(self, field: &str) -> Result<bool, AssignError> {
        match self {
            FieldValue::Bool(value) => Ok(value),
            _ => Err(mismatch(field)),
        }
    }

    pub fn into_category(self, field: &str) -> Result<Option<Category>, AssignError> {
        match self {
            FieldValue::Category(value) => Ok(value),
            _ => Err(mismatch(field)),
        }
    }

    pub fn into_tags(self, field: &str) -> Result<Vec<Tag>, AssignError> {
        match self {
            FieldValue::Tags(value) => Ok(value),
            _ => Err(mismatch(field)),
        }
    }

    pub fn into_social_links(self, field: &str) -> Result<Vec<SocialLink>, AssignError> {
        match self {
            FieldValue::SocialLinks(value) => Ok(value),
            _ => Err(mismatch(field)),
        }
    }
}

fn mismatch(field: &str) -> AssignError {
    AssignError::TypeMismatch {
        field: field.to_string(),
    }
}
