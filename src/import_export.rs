// src/import_export.rs
//! Экспорт истории обработанных образцов (CSV и JSON).

use crate::error::StorageResult;
use crate::models::Item;
use crate::timestamp::TimestampStyle;

// ==================== CSV ====================

/// Колонки как в таблице истории: утилизированный образец показывает
/// "disposed" вместо ячейки и время утилизации вместо времени приёма
pub fn history_to_csv(items: &[Item], style: TimestampStyle) -> StorageResult<Vec<u8>> {
    let mut csv_data = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut csv_data);

        writer.write_record(["No", "Barcode", "Status", "Location", "Time"])?;

        for (index, item) in items.iter().enumerate() {
            let (location, time) = if item.is_stored() {
                (item.location.to_string(), style.format(&item.created_at))
            } else {
                (
                    "disposed".to_string(),
                    item.disposed_at
                        .as_ref()
                        .map(|at| style.format(at))
                        .unwrap_or_default(),
                )
            };

            writer.write_record([
                (index + 1).to_string(),
                item.barcode.clone(),
                item.status.to_string(),
                location,
                time,
            ])?;
        }

        writer.flush().map_err(csv::Error::from)?;
    }

    Ok(csv_data)
}

// ==================== JSON ====================

pub fn history_to_json(items: &[Item]) -> StorageResult<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::ItemRegistry;
    use chrono::{Local, TimeZone};

    fn sample_registry() -> ItemRegistry {
        let mut items = ItemRegistry::new();
        let stored_at = Local.with_ymd_and_hms(2024, 5, 2, 9, 15, 0).unwrap();
        let disposed_at = Local.with_ymd_and_hms(2024, 5, 3, 14, 0, 30).unwrap();

        let old = items
            .create_item_at("S-OLD", "A-02".parse().unwrap(), stored_at)
            .unwrap()
            .id;
        items
            .create_item_at("S-NEW, \"quoted\"", "C-11".parse().unwrap(), stored_at)
            .unwrap();
        items.dispose_items_at(&[old].into_iter().collect(), disposed_at);
        items
    }

    #[test]
    fn test_history_csv() {
        let items = sample_registry();
        let csv_bytes = history_to_csv(items.items(), TimestampStyle::Iso).unwrap();
        let text = String::from_utf8(csv_bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "No,Barcode,Status,Location,Time");
        assert_eq!(lines[1], "1,\"S-NEW, \"\"quoted\"\"\",stored,C-11,2024-05-02 09:15:00");
        assert_eq!(lines[2], "2,S-OLD,disposed,disposed,2024-05-03 14:00:30");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_history_csv_empty() {
        let text = String::from_utf8(history_to_csv(&[], TimestampStyle::Korean).unwrap()).unwrap();
        assert_eq!(text.trim(), "No,Barcode,Status,Location,Time");
    }

    #[test]
    fn test_history_json() {
        let items = sample_registry();
        let json = history_to_json(items.items()).unwrap();
        let parsed: Vec<Item> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].location.to_string(), "A-02");
        assert!(parsed[1].is_disposed());
    }
}
