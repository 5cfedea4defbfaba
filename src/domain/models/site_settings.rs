// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::field_value::{AssignError, FieldMap, FieldValue};
use serde::{Deserialize, Serialize};

/// 社交链接
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    /// FontAwesome 图标短名
    pub icon: String,
    pub link: String,
}

/// 站点设置
///
/// 作为一个整体持久化。表单之外的键保存在 `extra` 中，合并时原样保留。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub google_site_verification: String,
    #[serde(default)]
    pub sociallinks: Vec<SocialLink>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            avatar: String::new(),
            cover_url: String::new(),
            locale: default_locale(),
            google_site_verification: String::new(),
            sociallinks: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }
}

impl SiteSettings {
    /// 将表单数据合并进当前设置
    pub fn merge(&mut self, fields: FieldMap) -> Result<(), AssignError> {
        for (key, value) in fields {
            self.assign(&key, value)?;
        }
        Ok(())
    }

    /// 按字段名写入单个设置项，未知字段名或类型不符时返回错误
    pub fn assign(&mut self, key: &str, value: FieldValue) -> Result<(), AssignError> {
        match key {
            "name" => self.name = value.into_text(key)?,
            "description" => self.description = value.into_text(key)?,
            "avatar" => self.avatar = value.into_text(key)?,
            "cover_url" => self.cover_url = value.into_text(key)?,
            "locale" => self.locale = value.into_text(key)?,
            "google_site_verification" => {
                self.google_site_verification = value.into_text(key)?
            }
            "sociallinks" => self.sociallinks = value.into_social_links(key)?,
            _ => return Err(AssignError::UnknownField(key.to_string())),
        }
        Ok(())
    }
}
