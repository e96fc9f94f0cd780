//! # パスワードのハッシュ化と照合
//!
//! 新しく保存するハッシュは Argon2id。既存ユーザーの行には bcrypt
//! （`$2a$` / `$2b$` / `$2y$`）が残っているため、照合は両方に対応する。
//!
//! 照合結果は一致・不一致の 2 値だけを返す。仮ハッシュ（`temp$...`）や
//! どちらとしても読めない値も不一致にし、エラーとしては扱わない。

use argon2::{
    Algorithm,
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    Version,
    password_hash::{PasswordHash as EncodedHash, SaltString, rand_core::OsRng},
};
use hygiene_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};
use hygiene_shared::event_log::error::{category, kind};

use crate::InfraError;

/// メモリ 64 MiB / 1 回 / 並列度 1（OWASP の Argon2id 推奨値）
const MEMORY_KIB: u32 = 64 * 1024;
const ITERATIONS: u32 = 1;
const PARALLELISM: u32 = 1;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// 存在しないユーザーでの照合に使う、上と同じパラメータの Argon2id ハッシュ
const DUMMY_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// パスワードのハッシュ化と照合
pub trait PasswordChecker: Send + Sync {
    fn verify(&self, password: &PlainPassword, hash: &PasswordHash) -> PasswordVerifyResult;

    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

    /// 結果を捨てる照合
    ///
    /// ユーザーが見つからないときもハッシュ計算の時間をかけ、応答時間で存在を推測させない。
    fn dummy_verify(&self, password: &PlainPassword) {
        let _ = self.verify(password, &PasswordHash::new(DUMMY_HASH));
    }
}

pub struct Argon2PasswordChecker {
    argon2: Argon2<'static>,
}

impl Argon2PasswordChecker {
    pub fn new() -> Self {
        // 定数の組み合わせは常に有効。万一失敗しても argon2 の既定値で動かす
        let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, None).unwrap_or_default();
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Argon2PasswordChecker {
    fn verify_argon2(&self, password: &PlainPassword, hash: &str) -> Result<bool, String> {
        let encoded = EncodedHash::new(hash).map_err(|e| e.to_string())?;
        Ok(self
            .argon2
            .verify_password(password.as_str().as_bytes(), &encoded)
            .is_ok())
    }
}

impl PasswordChecker for Argon2PasswordChecker {
    fn verify(&self, password: &PlainPassword, hash: &PasswordHash) -> PasswordVerifyResult {
        if hash.is_placeholder() {
            return PasswordVerifyResult::Mismatch;
        }

        let stored = hash.as_str();
        let result = if BCRYPT_PREFIXES.iter().any(|prefix| stored.starts_with(prefix)) {
            bcrypt::verify(password.as_str(), stored).map_err(|e| e.to_string())
        } else {
            self.verify_argon2(password, stored)
        };

        match result {
            Ok(matched) => matched.into(),
            Err(e) => {
                tracing::warn!(
                    error.category = category::INTERNAL,
                    error.kind = kind::PASSWORD_VERIFICATION,
                    "保存されているハッシュを解釈できません: {e}"
                );
                PasswordVerifyResult::Mismatch
            }
        }
    }

    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_str().as_bytes(), &salt)
            .map(|encoded| PasswordHash::new(encoded.to_string()))
            .map_err(|e| InfraError::unexpected(format!("ハッシュ生成に失敗しました: {e}")))
    }
}
