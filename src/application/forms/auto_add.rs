// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 自动新增下拉字段
//!
//! 提交的是标签类实体的显示文本。解析时按文本查找已有实体，找不到则
//! 构造一个未保存的实体；新实体由保存所属文章时级联写入。

use super::field::{Choice, FieldKind, FieldView};
use super::form_data::FormData;
use crate::domain::models::label::LabelEntity;
use crate::domain::repositories::label_repository::LabelLookup;
use crate::domain::repositories::RepositoryError;
use std::collections::HashSet;
use tracing::debug;

/// 可用于渲染的实体选项：(ID, 显示文本, 是否选中)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelChoice {
    pub id: i32,
    pub label: String,
    pub selected: bool,
}

/// 查找已有实体，不存在时构造未保存的实体
async fn resolve<E: LabelEntity>(
    lookup: &dyn LabelLookup<E>,
    label_key: &str,
    label: &str,
) -> Result<E, RepositoryError> {
    match lookup.find_by_label(label_key, label).await? {
        Some(existing) => Ok(existing),
        None => {
            debug!("No {} labelled '{}', binding a new one", E::KIND, label);
            Ok(E::transient(label.to_string()))
        }
    }
}

fn display<'a, E: LabelEntity>(entity: &'a E, label_key: &str) -> &'a str {
    entity.attribute(label_key).unwrap_or_default()
}

/// 单选的自动新增字段
#[derive(Debug, Clone, PartialEq)]
pub struct AutoAddSelectField<E: LabelEntity> {
    name: &'static str,
    label: &'static str,
    label_key: &'static str,
    data: Option<E>,
}

impl<E: LabelEntity> AutoAddSelectField<E> {
    /// 创建字段
    ///
    /// * `label_key` - 用于查找和显示的实体属性名
    pub fn new(name: &'static str, label: &'static str, label_key: &'static str) -> Self {
        Self {
            name,
            label,
            label_key,
            data: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn data(&self) -> Option<&E> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, data: Option<E>) {
        self.data = data;
    }

    pub fn into_data(self) -> Option<E> {
        self.data
    }

    /// 解析提交的文本并立即绑定实体
    ///
    /// 未提交该字段时保留原值；提交空串表示不选择
    pub async fn process(
        &mut self,
        formdata: &FormData,
        lookup: &dyn LabelLookup<E>,
    ) -> Result<(), RepositoryError> {
        let Some(label) = formdata.get(self.name) else {
            return Ok(());
        };
        self.data = if label.is_empty() {
            None
        } else {
            Some(resolve(lookup, self.label_key, label).await?)
        };
        Ok(())
    }

    /// 解析给定文本并绑定，用于查询参数预填
    pub async fn bind_label(
        &mut self,
        label: &str,
        lookup: &dyn LabelLookup<E>,
    ) -> Result<(), RepositoryError> {
        self.data = Some(resolve(lookup, self.label_key, label).await?);
        Ok(())
    }

    /// 列出全部已有实体，与当前绑定值相等者标记为选中
    pub async fn iter_choices(
        &self,
        lookup: &dyn LabelLookup<E>,
    ) -> Result<Vec<LabelChoice>, RepositoryError> {
        let all = lookup.all().await?;
        Ok(all
            .iter()
            .filter_map(|entity| {
                entity.id().map(|id| LabelChoice {
                    id,
                    label: display(entity, self.label_key).to_string(),
                    selected: self.data.as_ref() == Some(entity),
                })
            })
            .collect())
    }

    pub async fn view(&self, lookup: &dyn LabelLookup<E>) -> Result<FieldView, RepositoryError> {
        let mut choices: Vec<Choice> = self
            .iter_choices(lookup)
            .await?
            .into_iter()
            .map(|c| Choice::new(c.label.clone(), c.label, c.selected))
            .collect();
        if let Some(pending) = self.data.as_ref().filter(|e| e.id().is_none()) {
            let text = display(pending, self.label_key);
            choices.push(Choice::new(text, text, true));
        }

        Ok(FieldView::new(
            self.name,
            self.label,
            FieldKind::AutoAddSelect {
                choices,
                multiple: false,
            },
        ))
    }
}

/// 多选的自动新增字段
#[derive(Debug, Clone, PartialEq)]
pub struct AutoAddMultiSelectField<E: LabelEntity> {
    name: &'static str,
    label: &'static str,
    label_key: &'static str,
    data: Vec<E>,
}

impl<E: LabelEntity> AutoAddMultiSelectField<E> {
    pub fn new(name: &'static str, label: &'static str, label_key: &'static str) -> Self {
        Self {
            name,
            label,
            label_key,
            data: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn data(&self) -> &[E] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<E>) {
        self.data = data;
    }

    pub fn into_data(self) -> Vec<E> {
        self.data
    }

    /// 逐个解析提交的文本
    ///
    /// 重复文本只解析一次，保留首次出现的顺序；空串被忽略。
    /// 未提交任何值时保留原值。
    pub async fn process(
        &mut self,
        formdata: &FormData,
        lookup: &dyn LabelLookup<E>,
    ) -> Result<(), RepositoryError> {
        let submitted = formdata.get_all(self.name);
        if submitted.is_empty() {
            return Ok(());
        }

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(submitted.len());
        for label in submitted {
            if label.is_empty() || !seen.insert(label) {
                continue;
            }
            resolved.push(resolve(lookup, self.label_key, label).await?);
        }
        self.data = resolved;
        Ok(())
    }

    /// 列出全部已有实体，包含在当前绑定值中的标记为选中
    pub async fn iter_choices(
        &self,
        lookup: &dyn LabelLookup<E>,
    ) -> Result<Vec<LabelChoice>, RepositoryError> {
        let all = lookup.all().await?;
        Ok(all
            .iter()
            .filter_map(|entity| {
                entity.id().map(|id| LabelChoice {
                    id,
                    label: display(entity, self.label_key).to_string(),
                    selected: self.data.contains(entity),
                })
            })
            .collect())
    }

    pub async fn view(&self, lookup: &dyn LabelLookup<E>) -> Result<FieldView, RepositoryError> {
        let mut choices: Vec<Choice> = self
            .iter_choices(lookup)
            .await?
            .into_iter()
            .map(|c| Choice::new(c.label.clone(), c.label, c.selected))
            .collect();
        for pending in self.data.iter().filter(|e| e.id().is_none()) {
            let text = display(pending, self.label_key);
            choices.push(Choice::new(text, text, true));
        }

        Ok(FieldView::new(
            self.name,
            self.label,
            FieldKind::AutoAddSelect {
                choices,
                multiple: true,
            },
        ))
    }
}
