// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use rand::{distr::Alphanumeric, Rng};
use serde::Deserialize;
use tracing::warn;

/// 随机会话密钥的长度
const GENERATED_SECRET_LEN: usize = 64;

/// 应用程序配置设置
///
/// 包含服务器、数据库、后台管理和会话等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 后台管理配置
    pub admin: AdminSettings,
    /// 会话配置
    pub session: SessionSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 后台管理配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    /// 尚无管理员记录时 `admin` 账号使用的初始密码
    pub default_password: String,
    /// 文章表单的默认语言
    pub default_lang: String,
    /// `cat` 查询参数未附带 `lang` 时使用的语言
    pub hint_language: String,
    /// 文章列表每页条数
    pub per_page: u64,
    /// 生成密码哈希时的 PBKDF2 迭代次数
    pub password_iterations: u32,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            default_password: "admin".to_string(),
            default_lang: "en".to_string(),
            hint_language: "zh".to_string(),
            per_page: 50,
            password_iterations: 260_000,
        }
    }
}

/// 会话配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// 会话 Cookie 签名密钥，未配置时启动时随机生成
    #[serde(default)]
    pub secret: String,
    /// 勾选“记住我”时 Cookie 的有效天数
    pub remember_days: i64,
    /// 会话的最长有效天数
    pub max_age_days: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secret: generate_secret(),
            remember_days: 365,
            max_age_days: 31,
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `BLOGADMIN__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let admin = AdminSettings::default();
        let session = SessionSettings::default();
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Default DB settings
            .set_default("database.url", "sqlite://blogadmin.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default admin settings
            .set_default("admin.default_password", admin.default_password)?
            .set_default("admin.default_lang", admin.default_lang)?
            .set_default("admin.hint_language", admin.hint_language)?
            .set_default("admin.per_page", admin.per_page)?
            .set_default("admin.password_iterations", admin.password_iterations)?
            // Default session settings
            .set_default("session.remember_days", session.remember_days)?
            .set_default("session.max_age_days", session.max_age_days)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("BLOGADMIN").separator("__"));

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        if settings.session.secret.is_empty() {
            warn!("No session secret configured, generated a random one; sessions will not survive a restart");
            settings.session.secret = generate_secret();
        }
        Ok(settings)
    }
}

/// 生成随机会话密钥
pub fn generate_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}
