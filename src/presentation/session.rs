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

use crate::config::settings::SessionSettings;
use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// 会话错误
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid session secret")]
    InvalidSecret,
}

/// 会话 Cookie 名称
pub const SESSION_COOKIE: &str = "blogadmin_session";

/// 会话签名器
///
/// Cookie 值为 `<用户ID>.<签发时间>.<签名>`，签名是前两段的
/// HMAC-SHA256，使用 base64url 编码
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
    settings: SessionSettings,
}

impl SessionSigner {
    pub fn new(settings: &SessionSettings) -> Result<Self, SessionError> {
        if settings.secret.is_empty() {
            return Err(SessionError::InvalidSecret);
        }
        let mac = HmacSha256::new_from_slice(settings.secret.as_bytes())
            .map_err(|_| SessionError::InvalidSecret)?;
        Ok(Self {
            mac,
            settings: settings.clone(),
        })
    }

    /// 生成会话值
    pub fn sign(&self, user_id: i32, issued_at: i64) -> String {
        let payload = format!("{}.{}", user_id, issued_at);
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{}.{}", payload, signature)
    }

    /// 校验会话值，返回用户ID
    ///
    /// 签名不符、格式错误或超过最长有效期时返回 `None`
    pub fn verify(&self, value: &str, now: i64) -> Option<i32> {
        let (payload, signature) = value.rsplit_once('.')?;
        let (user_id, issued_at) = payload.split_once('.')?;
        let user_id: i32 = user_id.parse().ok()?;
        let issued_at: i64 = issued_at.parse().ok()?;

        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let max_age = self.settings.max_age_days * 24 * 60 * 60;
        if issued_at > now || now - issued_at > max_age {
            return None;
        }
        Some(user_id)
    }

    /// 为已登录用户生成会话 Cookie
    ///
    /// 勾选“记住我”时设置 `Max-Age`，否则为浏览器会话 Cookie
    pub fn session_cookie(&self, user_id: i32, remember: bool) -> Cookie<'static> {
        let value = self.sign(user_id, Utc::now().timestamp());
        let mut cookie = Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        if remember {
            cookie = cookie.max_age(time::Duration::days(self.settings.remember_days));
        }
        cookie.build()
    }
}

/// 用于清除会话的 Cookie
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> SessionSigner {
        SessionSigner::new(&SessionSettings {
            secret: "test-secret".to_string(),
            ..SessionSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_sign_then_verify() {
        let signer = signer();
        let value = signer.sign(7, 1_000);
        assert_eq!(signer.verify(&value, 1_000 + 60), Some(7));
    }

    #[test]
    fn test_tampered_value_is_rejected() {
        let signer = signer();
        let value = signer.sign(7, 1_000);
        let forged = value.replacen("7.", "8.", 1);
        assert_eq!(signer.verify(&forged, 1_000), None);
        assert_eq!(signer.verify("garbage", 1_000), None);

        let other = SessionSigner::new(&SessionSettings {
            secret: "other".to_string(),
            ..SessionSettings::default()
        })
        .unwrap();
        assert_eq!(other.verify(&value, 1_000), None);
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let result = SessionSigner::new(&SessionSettings {
            secret: String::new(),
            ..SessionSettings::default()
        });
        assert!(matches!(result, Err(SessionError::InvalidSecret)));
    }

    #[test]
    fn test_default_secrets_do_not_verify_each_other() {
        let first = SessionSigner::new(&SessionSettings::default()).unwrap();
        let second = SessionSigner::new(&SessionSettings::default()).unwrap();
        let value = first.sign(1, 1_000);
        assert_eq!(first.verify(&value, 1_000), Some(1));
        assert_eq!(second.verify(&value, 1_000), None);
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let signer = signer();
        let value = signer.sign(1, 0);
        let limit = 31 * 24 * 60 * 60;
        assert_eq!(signer.verify(&value, limit), Some(1));
        assert_eq!(signer.verify(&value, limit + 1), None);
    }

    #[test]
    fn test_remember_sets_max_age() {
        let signer = signer();
        let long = signer.session_cookie(1, true);
        assert_eq!(long.max_age(), Some(time::Duration::days(365)));
        assert!(signer.session_cookie(1, false).max_age().is_none());
        assert_eq!(long.http_only(), Some(true));
    }
}
