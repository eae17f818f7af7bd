// src/timestamp.rs
//! Форматирование времени для отображения и экспорта.
//!
//! Время хранится типизированно (`DateTime<Local>`), строка строится только при выводе.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ==================== СТИЛЬ ====================

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum TimestampStyle {
    /// Локаль ko-KR: "2024. 1. 15. 오후 3:04:05"
    #[default]
    Korean,
    /// "2024-01-15 15:04:05"
    Iso,
}

impl TimestampStyle {
    pub fn format<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String {
        match self {
            TimestampStyle::Korean => {
                let (is_pm, hour) = at.hour12();
                format!(
                    "{}. {}. {}. {} {}:{:02}:{:02}",
                    at.year(),
                    at.month(),
                    at.day(),
                    if is_pm { "오후" } else { "오전" },
                    hour,
                    at.minute(),
                    at.second()
                )
            }
            TimestampStyle::Iso => format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                at.year(),
                at.month(),
                at.day(),
                at.hour(),
                at.minute(),
                at.second()
            ),
        }
    }
}

// ==================== ТЕКУЩЕЕ ВРЕМЯ ====================

pub fn now() -> DateTime<Local> {
    Local::now()
}

pub fn now_formatted(style: TimestampStyle) -> String {
    style.format(&now())
}

// ==================== ТЕСТЫ ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_korean_afternoon() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 15, 4, 5).unwrap();
        assert_eq!(TimestampStyle::Korean.format(&at), "2024. 1. 15. 오후 3:04:05");
    }

    #[test]
    fn test_korean_midnight_and_noon() {
        let midnight = Utc.with_ymd_and_hms(2024, 12, 1, 0, 30, 0).unwrap();
        assert_eq!(TimestampStyle::Korean.format(&midnight), "2024. 12. 1. 오전 12:30:00");

        let noon = Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 9).unwrap();
        assert_eq!(TimestampStyle::Korean.format(&noon), "2024. 12. 1. 오후 12:00:09");
    }

    #[test]
    fn test_iso() {
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        let at = kst.with_ymd_and_hms(2024, 3, 7, 8, 9, 10).unwrap();
        assert_eq!(TimestampStyle::Iso.format(&at), "2024-03-07 08:09:10");
    }

    #[test]
    fn test_style_parse() {
        assert_eq!("ISO".parse::<TimestampStyle>().unwrap(), TimestampStyle::Iso);
        assert_eq!(TimestampStyle::default(), TimestampStyle::Korean);
        assert!(!now_formatted(TimestampStyle::Iso).is_empty());
    }
}
