// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 文章（post）：博客文章及其分类、标签引用
/// - 标签类实体（label）：分类与标签
/// - 站点设置（site_settings）：作为整体持久化的站点配置
/// - 管理员（user）：唯一的后台账号
/// - 字段值（field_value）：表单数据到实体字段的显式映射
pub mod field_value;
pub mod label;
pub mod post;
pub mod site_settings;
pub mod user;
