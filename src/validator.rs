// src/validator.rs - Centralized validation module
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{MAX_SLOT, MIN_SLOT};

lazy_static! {
    static ref ZONE_NAME_REGEX: Regex = Regex::new(r"^[A-Z]{1,2}$").unwrap();
    static ref LOCATION_REGEX: Regex = Regex::new(r"^([A-Z]{1,2})-(\d{2})$").unwrap();
}

// ==================== FIELD VALIDATORS ====================

pub struct FieldValidator;

impl FieldValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err(format!("{} cannot be empty", field))
        } else {
            Ok(())
        }
    }

    /// Имя зоны: 1–2 латинские буквы, сравнение без учёта регистра
    pub fn zone_name(value: &str) -> Result<String, String> {
        let upper = value.trim().to_ascii_uppercase();
        if ZONE_NAME_REGEX.is_match(&upper) {
            Ok(upper)
        } else {
            Err(format!("Invalid zone name '{}'", value))
        }
    }

    /// Разбор "A-01" на (зона, номер). Номер всегда двузначный.
    pub fn location(value: &str) -> Result<(String, u8), String> {
        let upper = value.trim().to_ascii_uppercase();
        let caps = LOCATION_REGEX
            .captures(&upper)
            .ok_or_else(|| format!("Invalid location '{}'", value))?;

        let slot: u8 = caps[2]
            .parse()
            .map_err(|_| format!("Invalid slot in location '{}'", value))?;
        Self::slot(slot)?;

        Ok((caps[1].to_string(), slot))
    }

    pub fn slot(value: u8) -> Result<(), String> {
        Self::range(value, "slot", Some(MIN_SLOT), Some(MAX_SLOT))
    }

    /// Количество ячеек в зоне, как его вводит пользователь
    pub fn slot_count(value: u32) -> Result<u8, String> {
        Self::range(value, "slot count", Some(MIN_SLOT as u32), Some(MAX_SLOT as u32))?;
        Ok(value as u8)
    }

    pub fn range<T: PartialOrd + std::fmt::Display>(
        value: T,
        field: &str,
        min: Option<T>,
        max: Option<T>
    ) -> Result<(), String> {
        if let Some(min_val) = min {
            if value < min_val {
                return Err(format!("{} must be at least {}", field, min_val));
            }
        }

        if let Some(max_val) = max {
            if value > max_val {
                return Err(format!("{} must not exceed {}", field, max_val));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(FieldValidator::not_empty("X123", "barcode").is_ok());
        assert!(FieldValidator::not_empty("   ", "barcode").is_err());
        assert!(FieldValidator::not_empty("", "barcode").is_err());
    }

    #[test]
    fn test_zone_name() {
        assert_eq!(FieldValidator::zone_name("a").unwrap(), "A");
        assert_eq!(FieldValidator::zone_name("Ab").unwrap(), "AB");
        assert_eq!(FieldValidator::zone_name(" c ").unwrap(), "C");
        assert!(FieldValidator::zone_name("").is_err());
        assert!(FieldValidator::zone_name("ABC").is_err());
        assert!(FieldValidator::zone_name("A1").is_err());
        assert!(FieldValidator::zone_name("Я").is_err());
    }

    #[test]
    fn test_location() {
        assert_eq!(FieldValidator::location("A-01").unwrap(), ("A".to_string(), 1));
        assert_eq!(FieldValidator::location("bc-99").unwrap(), ("BC".to_string(), 99));
        assert!(FieldValidator::location("A-1").is_err());
        assert!(FieldValidator::location("A-00").is_err());
        assert!(FieldValidator::location("A01").is_err());
        assert!(FieldValidator::location("ABC-01").is_err());
    }

    #[test]
    fn test_slot_count() {
        assert_eq!(FieldValidator::slot_count(1).unwrap(), 1);
        assert_eq!(FieldValidator::slot_count(99).unwrap(), 99);
        assert!(FieldValidator::slot_count(0).is_err());
        assert!(FieldValidator::slot_count(100).is_err());
    }
}
