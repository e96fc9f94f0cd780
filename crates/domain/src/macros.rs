/// バックエンドが採番する UUID 主キーの Newtype を定義する
///
/// serde では素の UUID 文字列として読み書きする（`#[serde(transparent)]`）。
/// リクエスト入力からは `parse(field, value)` で作る。不正な値は
/// `"<field> must be a UUID"` の [`DomainError::Validation`](crate::DomainError) になり、
/// API では 400 として返る。
///
/// `new()` はモックリポジトリやテストでの採番用（UUID v7）。
///
/// ```rust
/// use hygiene_domain::org::OrgId;
///
/// let id = OrgId::parse("org_id", " 0193a5b0-7c1e-7000-8000-000000000001 ").unwrap();
/// assert_eq!(id.to_string(), "0193a5b0-7c1e-7000-8000-000000000001");
/// assert!(OrgId::parse("org_id", "acme").is_err());
/// assert!(OrgId::parse("org_id", "  ").is_err());
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// `field` はエラーメッセージに出すフィールド名
            pub fn parse(field: &str, value: &str) -> Result<Self, $crate::DomainError> {
                let value = $crate::macros::required(field, value)?;
                value.parse::<uuid::Uuid>().map(Self).map_err(|_| {
                    $crate::DomainError::Validation(format!("{field} must be a UUID"))
                })
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// trim 済みの必須文字列 Newtype を定義する
///
/// 空（空白のみを含む）なら `"<field> required"`。`lowercase: true` の型は
/// 保存前に小文字へそろえる（ユーザー名や組織コードの照合を大文字小文字で揺らさないため）。
macro_rules! define_required_text {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            field: $field:expr,
            lowercase: $lowercase:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl $Name {
            pub fn new(value: impl AsRef<str>) -> Result<Self, $crate::DomainError> {
                let value = $crate::macros::required($field, value.as_ref())?;
                Ok(Self(if $lowercase {
                    value.to_lowercase()
                } else {
                    value.to_string()
                }))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

/// trim して空でなければ返す
pub(crate) fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, crate::DomainError> {
    match value.trim() {
        "" => Err(crate::DomainError::Validation(format!("{field} required"))),
        trimmed => Ok(trimmed),
    }
}
