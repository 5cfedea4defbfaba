// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 承载“关于”页面的分类名称，不参与常规文章列表
pub const ABOUT_CATEGORY: &str = "About";

/// 标签类实体
///
/// 由一个可读文本标识的共享实体（分类、标签）。`id` 为 `None` 表示该实体
/// 尚未持久化，由所属文章保存时级联写入。
pub trait LabelEntity: Clone + PartialEq + Send + Sync + 'static {
    /// 实体名称，用于日志
    const KIND: &'static str;

    /// 以给定文本构造一个未保存的实体
    fn transient(label: String) -> Self;

    /// 数据库标识，未保存时为 `None`
    fn id(&self) -> Option<i32>;

    /// 读取 `label_key` 指定的属性作为显示文本
    ///
    /// 未知属性返回 `None`
    fn attribute(&self, label_key: &str) -> Option<&str>;
}

/// 文章分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<i32>,
    pub text: String,
}

impl Category {
    pub fn is_about(&self) -> bool {
        self.text == ABOUT_CATEGORY
    }
}

impl LabelEntity for Category {
    const KIND: &'static str = "category";

    fn transient(label: String) -> Self {
        Self { id: None, text: label }
    }

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn attribute(&self, label_key: &str) -> Option<&str> {
        match label_key {
            "text" => Some(&self.text),
            _ => None,
        }
    }
}

/// 文章标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<i32>,
    pub text: String,
}

impl LabelEntity for Tag {
    const KIND: &'static str = "tag";

    fn transient(label: String) -> Self {
        Self { id: None, text: label }
    }

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn attribute(&self, label_key: &str) -> Option<&str> {
        match label_key {
            "text" => Some(&self.text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_label_has_no_id() {
        let category = Category::transient("Rust".to_string());
        assert_eq!(category.id(), None);
        assert_eq!(category.attribute("text"), Some("Rust"));
        assert_eq!(category.attribute("name"), None);
    }

    #[test]
    fn test_about_category_detection() {
        assert!(Category::transient(ABOUT_CATEGORY.to_string()).is_about());
        assert!(!Category::transient("about".to_string()).is_about());
    }
}
