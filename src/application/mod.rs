// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含表单定义与后台工作流用例
/// 该模块依赖领域层的仓库接口，不依赖具体的存储或 HTTP 实现
pub mod forms;
pub mod use_cases;
