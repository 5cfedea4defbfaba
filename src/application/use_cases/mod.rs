// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 每个用例实现一组完整的后台工作流，与 HTTP 无关：
/// 渲染页面，或在提交成功后返回跳转与提示消息
pub mod auth_use_case;
pub mod outcome;
pub mod post_use_case;
pub mod settings_use_case;
