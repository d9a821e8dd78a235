use crate::utils::error::{CardError, Result};
use url::Url;

pub const HP_RANGE: (u16, u16) = (10, 340);
pub const DAMAGE_RANGE: (u16, u16) = (10, 150);

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CardError::Validation {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CardError::Validation {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CardError::Validation {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CardError::Validation {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CardError::Validation {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CardError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CardError::Validation {
        field: field_name.to_string(),
        value: String::new(),
        reason: "Value is required".to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CardError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CardError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 送出表單前的原生欄位限制：HP 必填、招式傷害範圍
///
/// 兩個招式都選了，第一招的傷害也變成必填
pub fn validate_submission(
    hit_points: u16,
    move1_damage: Option<u16>,
    move2_damage: Option<u16>,
    move1_required: bool,
    move2_required: bool,
) -> Result<()> {
    validate_range("hp", hit_points, HP_RANGE.0, HP_RANGE.1)?;
    validate_damage("move1_damage", move1_damage, move1_required)?;
    validate_damage("move2_damage", move2_damage, move2_required)?;
    Ok(())
}

fn validate_damage(field_name: &str, damage: Option<u16>, required: bool) -> Result<()> {
    if required {
        validate_required_field(field_name, &damage)?;
    }
    match damage {
        Some(value) => validate_range(field_name, value, DAMAGE_RANGE.0, DAMAGE_RANGE.1),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://pokeapi.co/api/v2").is_ok());
        assert!(validate_url("base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "pokeapi").is_err());
        assert!(validate_url("base_url", "ftp://pokeapi.co").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("hp", 60u16, 10, 340).is_ok());
        assert!(validate_range("hp", 5u16, 10, 340).is_err());
        assert!(validate_range("hp", 341u16, 10, 340).is_err());
    }

    #[test]
    fn test_validate_submission_requires_move2_damage() {
        assert!(validate_submission(60, Some(20), None, false, false).is_ok());
        assert!(validate_submission(60, None, None, false, false).is_ok());

        let err = validate_submission(60, Some(20), None, true, true).unwrap_err();
        match err {
            CardError::Validation { field, .. } => assert_eq!(field, "move2_damage"),
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(validate_submission(60, Some(20), Some(40), true, true).is_ok());
        assert!(validate_submission(60, Some(200), Some(40), true, true).is_err());
        assert!(validate_submission(0, None, None, false, false).is_err());
    }

    #[test]
    fn test_validate_submission_requires_move1_damage_with_two_moves() {
        let err = validate_submission(60, None, Some(30), true, true).unwrap_err();
        match err {
            CardError::Validation { field, reason, .. } => {
                assert_eq!(field, "move1_damage");
                assert_eq!(reason, "Value is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // 只有第一招時仍可留空
        assert!(validate_submission(60, None, None, false, false).is_ok());
    }
}
