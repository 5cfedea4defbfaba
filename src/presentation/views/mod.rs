// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 视图模块
///
/// 将用例返回的页面模型渲染为 HTML
pub mod pages;
pub mod widgets;
