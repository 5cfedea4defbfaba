// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 表单控件渲染
//!
//! 按字段种类选择渲染方式，额外属性（`placeholder`、`data-role` 等）
//! 原样附加到控件上。

use crate::application::forms::field::{Choice, FieldKind, FieldView};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// 渲染单个字段，包含标签与错误信息
pub fn render_field(field: &FieldView) -> String {
    let control = match &field.kind {
        FieldKind::Hidden { value } => {
            return format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                encode_double_quoted_attribute(&field.name),
                encode_double_quoted_attribute(value)
            );
        }
        FieldKind::Text { value } => format!(
            r#"<input type="text" id="{name}" name="{name}" value="{value}"{attrs}>"#,
            name = encode_double_quoted_attribute(&field.name),
            value = encode_double_quoted_attribute(value),
            attrs = extra_attrs(field),
        ),
        FieldKind::Password => format!(
            r#"<input type="password" id="{name}" name="{name}"{attrs}>"#,
            name = encode_double_quoted_attribute(&field.name),
            attrs = extra_attrs(field),
        ),
        FieldKind::TextArea { value } => format!(
            r#"<textarea id="{name}" name="{name}"{attrs}>{value}</textarea>"#,
            name = encode_double_quoted_attribute(&field.name),
            value = encode_text(value),
            attrs = extra_attrs(field),
        ),
        FieldKind::Checkbox { checked } => format!(
            r#"<input type="checkbox" id="{name}" name="{name}" value="y"{checked}{attrs}>"#,
            name = encode_double_quoted_attribute(&field.name),
            checked = if *checked { " checked" } else { "" },
            attrs = extra_attrs(field),
        ),
        FieldKind::Select { choices } => select(field, choices, false, false),
        // single-valued auto-add selects get a blank option for "no selection"
        FieldKind::AutoAddSelect { choices, multiple } => {
            select(field, choices, *multiple, !*multiple)
        }
    };

    let mut html = String::from(r#"<div class="field">"#);
    html.push_str(&format!(
        r#"<label for="{}">{}</label>"#,
        encode_double_quoted_attribute(&field.name),
        encode_text(&field.label)
    ));
    html.push_str(&control);
    if !field.errors.is_empty() {
        html.push_str(r#"<ul class="errors">"#);
        for error in &field.errors {
            html.push_str(&format!("<li>{}</li>", encode_text(error)));
        }
        html.push_str("</ul>");
    }
    html.push_str("</div>");
    html
}

fn select(field: &FieldView, choices: &[Choice], multiple: bool, blank: bool) -> String {
    let mut html = format!(
        r#"<select id="{name}" name="{name}"{multiple}{attrs}>"#,
        name = encode_double_quoted_attribute(&field.name),
        multiple = if multiple { " multiple" } else { "" },
        attrs = extra_attrs(field),
    );
    if blank {
        html.push_str(r#"<option value=""></option>"#);
    }
    for choice in choices {
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            encode_double_quoted_attribute(&choice.value),
            if choice.selected { " selected" } else { "" },
            encode_text(&choice.label)
        ));
    }
    html.push_str("</select>");
    html
}

fn extra_attrs(field: &FieldView) -> String {
    let mut attrs = String::new();
    if field.required {
        attrs.push_str(" required");
    }
    for (key, value) in &field.attrs {
        attrs.push_str(&format!(
            r#" {}="{}""#,
            key,
            encode_double_quoted_attribute(value)
        ));
    }
    attrs
}
