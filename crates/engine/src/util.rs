//! Internal helpers for input validation and query building.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every operation enforces the same invariants.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{DbErr, SqlErr, sea_query::LikeExpr};

use crate::{EngineError, ResultEngine};

/// Trim `value` and reject it when empty.
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Key used for case-insensitive name search.
pub(crate) fn normalize_name_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// `LIKE` pattern matching every value starting with `prefix`.
///
/// `%`, `_` and the escape character itself are matched literally.
pub(crate) fn prefix_pattern(prefix: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in normalize_name_key(prefix).chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('\\')
}

/// Whether the database rejected a write because of a unique key.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Map a unique violation to [`EngineError::ExistingKey`] with `message`.
pub(crate) fn map_unique_violation(err: DbErr, message: &str) -> EngineError {
    if is_unique_violation(&err) {
        EngineError::ExistingKey(message.to_string())
    } else {
        EngineError::Database(err)
    }
}

/// Hex color in the `#RRGGBB` form.
pub(crate) fn validate_color(value: &str) -> ResultEngine<String> {
    let value = value.trim();
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(EngineError::InvalidInput(format!(
            "invalid color '{value}': expected #RRGGBB"
        )));
    }
    Ok(value.to_uppercase())
}

/// Lowercase ASCII letters, digits, `-` and `_`.
pub(crate) fn validate_slug(value: &str) -> ResultEngine<String> {
    let value = value.trim();
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !valid {
        return Err(EngineError::InvalidInput(format!("invalid slug '{value}'")));
    }
    Ok(value.to_string())
}

pub(crate) fn hash_password(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::InvalidInput(format!("cannot hash password: {err}")))
}

/// A stored hash that does not parse never matches.
pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}
