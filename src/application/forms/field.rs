// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::form_data::FormData;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_CHOICE_MESSAGE: &str = "Not a valid choice.";

/// 下拉框选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// 字段种类，决定渲染方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text { value: String },
    Password,
    TextArea { value: String },
    Checkbox { checked: bool },
    Select { choices: Vec<Choice> },
    /// 自动新增下拉框，提交的是显示文本而非ID
    AutoAddSelect { choices: Vec<Choice>, multiple: bool },
    Hidden { value: String },
}

/// 供页面渲染的字段视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    /// 额外的 HTML 属性，如 `placeholder`、`data-role`
    pub attrs: Vec<(&'static str, String)>,
    pub required: bool,
    pub errors: Vec<String>,
}

impl FieldView {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            attrs: Vec::new(),
            required: false,
            errors: Vec::new(),
        }
    }

    pub fn text(name: &str, label: &str, value: &str) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Text {
                value: value.to_string(),
            },
        )
    }

    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// 附加该字段的校验错误
    pub fn errors_from(mut self, errors: &FormErrors) -> Self {
        self.errors = errors.get(&self.name).to_vec();
        self
    }
}

/// 按字段名收集的校验错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 将 `validator` 的结果转换为按字段名组织的错误
    ///
    /// 嵌套字段使用 `<列表名>-<序号>-<字段名>` 命名
    pub fn from_result(result: Result<(), ValidationErrors>) -> Self {
        let mut errors = Self::new();
        if let Err(e) = result {
            errors.collect(&e, "");
        }
        errors
    }

    fn collect(&mut self, errors: &ValidationErrors, prefix: &str) {
        for (field, kind) in errors.errors() {
            let name = format!("{}{}", prefix, field);
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        let message = error
                            .message
                            .as_deref()
                            .map(str::to_string)
                            .unwrap_or_else(|| error.code.to_string());
                        self.add(name.clone(), message);
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.collect(inner, &format!("{}-", name)),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect(inner, &format!("{}-{}-", name, index));
                    }
                }
            }
        }
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// 复选框按 HTML 语义解析：缺失、空串或 `false` 为未选中
pub fn checkbox(formdata: &FormData, name: &str) -> bool {
    formdata
        .get(name)
        .is_some_and(|value| !matches!(value, "" | "false"))
}

/// 提交了该字段时覆盖原值
pub fn overwrite_text(target: &mut String, formdata: &FormData, name: &str) {
    if let Some(value) = formdata.get(name) {
        *target = value.to_string();
    }
}

/// 根据固定选项列表生成选项
pub fn select_choices(options: &[(&str, &str)], current: &str) -> Vec<Choice> {
    options
        .iter()
        .map(|(value, label)| Choice::new(*value, *label, *value == current))
        .collect()
}

/// 供 `validator` 自定义校验使用：值必须是选项之一
pub fn check_choice(options: &[(&str, &str)], value: &str) -> Result<(), ValidationError> {
    if options.iter().any(|(v, _)| *v == value) {
        return Ok(());
    }
    let mut error = ValidationError::new("choice");
    error.message = Some(Cow::Borrowed(INVALID_CHOICE_MESSAGE));
    Err(error)
}
