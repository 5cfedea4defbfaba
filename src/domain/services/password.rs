// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use hmac::{Hmac, Mac};
use rand::{distr::Alphanumeric, Rng};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const METHOD: &str = "pbkdf2:sha256";
const SALT_LENGTH: usize = 16;

/// 密码哈希错误
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("invalid iteration count: {0}")]
    InvalidIterations(u32),
    #[error("invalid HMAC key")]
    InvalidKey,
}

/// 密码哈希器
///
/// 生成 `pbkdf2:sha256:<迭代次数>$<盐>$<十六进制摘要>` 格式的哈希
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// 使用随机盐对明文密码进行哈希
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if self.iterations == 0 {
            return Err(PasswordError::InvalidIterations(self.iterations));
        }
        let salt: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LENGTH)
            .map(char::from)
            .collect();
        let digest = pbkdf2_sha256(password.as_bytes(), salt.as_bytes(), self.iterations)?;
        Ok(format!(
            "{}:{}${}${}",
            METHOD,
            self.iterations,
            salt,
            hex::encode(digest)
        ))
    }
}

/// 校验明文密码与哈希是否匹配
///
/// 格式无法识别时返回 `false`
pub fn check_password_hash(pw_hash: &str, password: &str) -> bool {
    let mut parts = pw_hash.splitn(3, '$');
    let (Some(method), Some(salt), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Some(iterations) = method
        .strip_prefix(METHOD)
        .and_then(|rest| rest.strip_prefix(':'))
        .and_then(|n| n.parse::<u32>().ok())
    else {
        return false;
    };
    if iterations == 0 {
        return false;
    }
    let Ok(expected) = hex::decode(expected) else {
        return false;
    };
    match pbkdf2_sha256(password.as_bytes(), salt.as_bytes(), iterations) {
        Ok(actual) => actual.as_slice().ct_eq(expected.as_slice()).into(),
        Err(_) => false,
    }
}

// Single-block PBKDF2: SHA-256 output length equals the derived key length
fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; 32], PasswordError> {
    let prf = HmacSha256::new_from_slice(password).map_err(|_| PasswordError::InvalidKey)?;

    let mut mac = prf.clone();
    mac.update(salt);
    mac.update(&1u32.to_be_bytes());
    let mut block = mac.finalize().into_bytes();

    let mut derived = [0u8; 32];
    derived.copy_from_slice(&block);

    for _ in 1..iterations {
        let mut mac = prf.clone();
        mac.update(&block);
        block = mac.finalize().into_bytes();
        for (out, byte) in derived.iter_mut().zip(block.iter()) {
            *out ^= byte;
        }
    }

    Ok(derived)
}
