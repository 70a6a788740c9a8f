//! Validation rules applied to item templates before they are persisted.

use super::error::DomainError;

/// Longest item name the game client renders without truncation.
pub const MAX_ITEM_NAME_CHARS: usize = 128;

/// Trim an item name and reject values the catalog would never list.
///
/// The catalog query excludes rows whose name is empty, so accepting one here
/// would create an item that silently never shows up.
pub fn normalize_item_name(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("name", "must not be empty"));
    }
    if trimmed.chars().count() > MAX_ITEM_NAME_CHARS {
        return Err(DomainError::validation(
            "name",
            format!("must be at most {MAX_ITEM_NAME_CHARS} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn ensure_item_id(id: i32) -> Result<i32, DomainError> {
    if id < 0 {
        return Err(DomainError::validation("id", "must not be negative"));
    }
    Ok(id)
}

pub fn ensure_power_require(value: i64) -> Result<i64, DomainError> {
    if value < 0 {
        return Err(DomainError::validation(
            "power_require",
            "must not be negative",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_names_are_trimmed() {
        assert_eq!(normalize_item_name("  Dragon Sword ").unwrap(), "Dragon Sword");
    }

    #[test]
    fn blank_item_names_are_rejected() {
        let err = normalize_item_name("   ").expect_err("blank name rejected");
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn overlong_item_names_are_rejected() {
        let name = "x".repeat(MAX_ITEM_NAME_CHARS + 1);
        assert!(normalize_item_name(&name).is_err());
        assert!(normalize_item_name(&"x".repeat(MAX_ITEM_NAME_CHARS)).is_ok());
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert!(ensure_item_id(-1).is_err());
        assert_eq!(ensure_item_id(0).unwrap(), 0);
    }

    #[test]
    fn negative_power_requirements_are_rejected() {
        let err = ensure_power_require(-5).expect_err("negative power rejected");
        assert_eq!(err.field(), Some("power_require"));
        assert_eq!(ensure_power_require(1_500).unwrap(), 1_500);
    }
}
