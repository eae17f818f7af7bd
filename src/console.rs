// src/console.rs
//! Текстовые команды оператора для бинарника: разбор строки и выполнение.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::StorageResult;
use crate::models::{ItemId, Location, WorkMode};
use crate::workstation::Workstation;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid argument '{0}'")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneCommand {
    Add,
    Delete(String),
    Rename { old: String, new: String },
    Resize { zone: String, slot_count: u32 },
    Toggle(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mode(WorkMode),
    Locate(Location),
    Scan(String),
    List,
    Toggle(ItemId),
    SelectAll,
    Dispose,
    Zones,
    Zone(ZoneCommand),
    Stats,
    History(HistoryFormat),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  mode <storage|disposal>     switch work mode
  loc <A-01>                  select active location
  scan <barcode>              store a specimen at the active location
  list                        specimens stored at the active location
  toggle <id>                 select/unselect a specimen for disposal
  all                         toggle select-all at the active location
  dispose                     dispose selected specimens
  zones                       zone overview
  zone add                    add the next free zone
  zone delete <Z>             delete an empty zone
  zone rename <OLD> <NEW>     rename a zone and move its records
  zone resize <Z> <n>         change slot count (1-99)
  zone toggle <Z>             expand/collapse a zone
  stats                       processed/stored/disposed counters
  history [csv|json]          processing history
  help                        this text
  quit                        exit";

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let head = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();
        // Остаток строки после слова команды, без нормализации пробелов
        let rest = line
            .trim()
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim_start())
            .unwrap_or_default();

        let command = match head.as_str() {
            "mode" => {
                let raw = single(&args, "mode <storage|disposal>")?;
                Command::Mode(raw.parse().map_err(|_| invalid(raw))?)
            }
            "loc" => {
                let raw = single(&args, "loc <A-01>")?;
                Command::Locate(raw.to_uppercase().parse().map_err(|_| invalid(raw))?)
            }
            // Штрихкод может содержать пробелы
            "scan" => Command::Scan(rest.to_string()),
            "list" => Command::List,
            "toggle" => {
                let raw = single(&args, "toggle <id>")?;
                Command::Toggle(ItemId(raw.parse().map_err(|_| invalid(raw))?))
            }
            "all" => Command::SelectAll,
            "dispose" => Command::Dispose,
            "zones" => Command::Zones,
            "zone" => Command::Zone(parse_zone_command(&args)?),
            "stats" => Command::Stats,
            "history" => match args.as_slice() {
                [] => Command::History(HistoryFormat::Table),
                [format] if format.eq_ignore_ascii_case("csv") => Command::History(HistoryFormat::Csv),
                [format] if format.eq_ignore_ascii_case("json") => Command::History(HistoryFormat::Json),
                _ => return Err(ParseCommandError::Usage("history [csv|json]")),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn single<'a>(args: &[&'a str], usage: &'static str) -> Result<&'a str, ParseCommandError> {
    match args {
        [value] => Ok(*value),
        _ => Err(ParseCommandError::Usage(usage)),
    }
}

fn invalid(raw: &str) -> ParseCommandError {
    ParseCommandError::InvalidArgument(raw.to_string())
}

fn parse_zone_command(args: &[&str]) -> Result<ZoneCommand, ParseCommandError> {
    let sub = args.first().map(|s| s.to_lowercase()).unwrap_or_default();

    match (sub.as_str(), &args[args.len().min(1)..]) {
        ("add", []) => Ok(ZoneCommand::Add),
        ("delete", [zone]) => Ok(ZoneCommand::Delete(zone.to_string())),
        ("rename", [old, new]) => Ok(ZoneCommand::Rename {
            old: old.to_string(),
            new: new.to_string(),
        }),
        ("resize", [zone, count]) => Ok(ZoneCommand::Resize {
            zone: zone.to_string(),
            slot_count: count.parse().map_err(|_| invalid(count))?,
        }),
        ("toggle", [zone]) => Ok(ZoneCommand::Toggle(zone.to_string())),
        _ => Err(ParseCommandError::Usage(
            "zone add | delete <Z> | rename <OLD> <NEW> | resize <Z> <n> | toggle <Z>",
        )),
    }
}

// ==================== EXECUTION ====================

/// Выполняет команду и возвращает текст для вывода
pub fn execute(workstation: &mut Workstation, command: Command) -> String {
    match command {
        Command::Mode(mode) => {
            workstation.set_mode(mode);
            format!("Mode: {}", mode)
        }
        Command::Locate(location) => workstation
            .select_location(location)
            .map(|_| format!("Location: {}", workstation.active_location()))
            .unwrap_or_else(|err| err.to_string()),
        Command::Scan(barcode) => outcome(
            workstation,
            |ws| ws.submit_barcode(&barcode),
            |ws, id| {
                ws.items()
                    .get(id)
                    .map(|item| format!("Specimen {} stored at {}.", item.barcode, item.location))
                    .unwrap_or_default()
            },
        ),
        Command::List => render_location(workstation),
        Command::Toggle(id) => match workstation.toggle_item(id) {
            Ok(true) => format!("Selected #{} ({} selected)", id, workstation.selection().len()),
            Ok(false) => format!("Unselected #{} ({} selected)", id, workstation.selection().len()),
            Err(err) => err.to_string(),
        },
        Command::SelectAll => workstation
            .toggle_select_all()
            .map(|count| format!("{} selected", count))
            .unwrap_or_else(|err| err.to_string()),
        Command::Dispose => outcome(
            workstation,
            |ws| ws.dispose_selected(),
            |_, count| format!("{} specimen(s) disposed.", count),
        ),
        Command::Zones => render_zones(workstation),
        Command::Zone(zone) => execute_zone(workstation, zone),
        Command::Stats => {
            let stats = workstation.stats();
            format!(
                "Processed: {}  Stored: {}  Disposed: {}",
                stats.total_processed, stats.total_stored, stats.total_disposed
            )
        }
        Command::History(format) => render_history(workstation, format),
        Command::Help => HELP.to_string(),
        Command::Quit => "Bye".to_string(),
    }
}

fn execute_zone(workstation: &mut Workstation, command: ZoneCommand) -> String {
    match command {
        ZoneCommand::Add => outcome(
            workstation,
            |ws| ws.add_zone(),
            |_, name| format!("Zone {} added.", name),
        ),
        ZoneCommand::Delete(zone) => outcome(
            workstation,
            |ws| ws.delete_zone(&zone),
            |_, ()| format!("Zone {} deleted.", zone.trim().to_uppercase()),
        ),
        ZoneCommand::Rename { old, new } => outcome(
            workstation,
            |ws| ws.rename_zone(&old, &new),
            |_, renamed| {
                let old = old.trim().to_uppercase();
                if renamed.as_str() == old {
                    format!("Zone {} unchanged.", renamed)
                } else {
                    format!("Zone renamed from {} to {}.", old, renamed)
                }
            },
        ),
        ZoneCommand::Resize { zone, slot_count } => outcome(
            workstation,
            |ws| ws.resize_zone(&zone, slot_count),
            |_, old| {
                format!(
                    "Zone {} range changed from {} to {}.",
                    zone.trim().to_uppercase(),
                    old,
                    slot_count
                )
            },
        ),
        ZoneCommand::Toggle(zone) => match workstation.toggle_zone(&zone) {
            Ok(true) => format!("Zone {} expanded", zone.to_uppercase()),
            Ok(false) => format!("Zone {} collapsed", zone.to_uppercase()),
            Err(err) => err.to_string(),
        },
    }
}

/// Текст успеха строится по результату операции, ошибка выводится как есть
fn outcome<T, A, S>(workstation: &mut Workstation, action: A, success: S) -> String
where
    A: FnOnce(&mut Workstation) -> StorageResult<T>,
    S: FnOnce(&Workstation, T) -> String,
{
    match action(workstation) {
        Ok(value) => success(workstation, value),
        Err(err) => err.to_string(),
    }
}

// ==================== RENDERING ====================

fn render_location(workstation: &Workstation) -> String {
    let style = workstation.timestamp_style();
    let items = workstation.stored_here();
    let mut out = format!(
        "{} [{}] {} stored",
        workstation.active_location(),
        workstation.mode(),
        items.len()
    );

    for item in items {
        let mark = if workstation.selection().contains(item.id) { "[x]" } else { "[ ]" };
        let _ = write!(
            out,
            "\n  {} #{} {} {}",
            mark,
            item.id,
            item.barcode,
            style.format(&item.created_at)
        );
    }
    out
}

fn render_zones(workstation: &Workstation) -> String {
    let overview = workstation.zone_overview();
    let mut out = format!(
        "{} zone(s), {} location(s)",
        overview.total_zones, overview.total_locations
    );

    for zone in &overview.zones {
        let marker = if workstation.zones().is_expanded(&zone.zone) { "-" } else { "+" };
        let _ = write!(
            out,
            "\n  {} {} ({} slots) {} stored",
            marker, zone.range_label, zone.slot_count, zone.stored
        );
    }
    out
}

fn render_history(workstation: &Workstation, format: HistoryFormat) -> String {
    match format {
        HistoryFormat::Csv => workstation
            .export_csv()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_else(|err| err.to_string()),
        HistoryFormat::Json => workstation
            .export_json()
            .unwrap_or_else(|err| err.to_string()),
        HistoryFormat::Table => {
            let style = workstation.timestamp_style();
            let items = workstation.items().items();
            if items.is_empty() {
                return "No specimens processed yet".to_string();
            }

            let mut out = String::new();
            for (index, item) in items.iter().enumerate() {
                let (location, time) = match (item.is_stored(), item.disposed_at.as_ref()) {
                    (false, Some(at)) => ("disposed".to_string(), style.format(at)),
                    _ => (item.location.to_string(), style.format(&item.created_at)),
                };
                if index > 0 {
                    out.push('\n');
                }
                let _ = write!(
                    out,
                    "{:>4}  {:<20} {:<9} {:<9} {}",
                    index + 1,
                    item.barcode,
                    item.status,
                    location,
                    time
                );
            }
            out
        }
    }
}
