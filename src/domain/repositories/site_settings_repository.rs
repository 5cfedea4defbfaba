// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::site_settings::SiteSettings;
use async_trait::async_trait;

/// 站点设置仓库特质
///
/// 处理器通过该接口显式读取当前站点设置
#[async_trait]
pub trait SiteSettingsRepository: Send + Sync {
    /// 读取站点设置，尚未保存过时返回默认值
    async fn load(&self) -> Result<SiteSettings, RepositoryError>;
    /// 整体保存站点设置
    async fn save(&self, settings: &SiteSettings) -> Result<(), RepositoryError>;
}
