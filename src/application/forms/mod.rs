// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 表单模块
///
/// 多值表单数据的解析、字段视图与校验错误，以及四个表单定义：
/// 登录、文章、站点设置和修改密码。分类与标签通过自动新增字段
/// （auto_add）按文本查找或新建。
pub mod auto_add;
pub mod change_password;
pub mod field;
pub mod form_data;
pub mod login;
pub mod post;
pub mod settings;
