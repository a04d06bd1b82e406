//! Server record loading from a directory of config files
//!
//! Each `.conf` file in the directory holds `key: value` lines describing
//! servers. A record accumulates fields in any order and is emitted when its
//! `serverPort` line arrives. One malformed file skips that file only; a run
//! with zero valid records does not start.

use crate::error::{AppError, Result};
use crate::models::ServerRecord;
use std::path::Path;

/// Everything the loader found in one directory scan
#[derive(Debug)]
pub struct LoadOutcome {
    /// Records from all files that parsed cleanly, in filename order
    pub records: Vec<ServerRecord>,
    /// One warning per file that was skipped
    pub warnings: Vec<AppError>,
}

/// Scan a directory and collect server records from its `.conf` files.
///
/// Subdirectories and files with other extensions are ignored. A file that
/// fails to parse becomes a warning in the outcome; an unreadable directory
/// or an outcome with zero records is an error.
pub fn load_records(dir: &Path) -> Result<LoadOutcome> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| AppError::config(format!("cannot read directory {}: {}", dir.display(), e)))?;

    // read_dir order is platform-dependent, sort for a stable probe order
    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut outcome = LoadOutcome {
        records: Vec::new(),
        warnings: Vec::new(),
    };

    for path in paths {
        if path.is_dir() || path.extension().map_or(true, |ext| ext != "conf") {
            continue;
        }

        match parse_record_file(&path) {
            Ok(records) => outcome.records.extend(records),
            Err(e) => outcome.warnings.push(e),
        }
    }

    if outcome.records.is_empty() {
        return Err(AppError::config(format!(
            "no valid server records found in {}",
            dir.display()
        )));
    }

    Ok(outcome)
}

/// Parse one config file into server records.
///
/// Lines are `key: value`; blank lines and lines starting with `#` are
/// skipped, as are lines without a colon. Values may be wrapped in single or
/// double quotes. Known keys are `appName`, `serverID`, `serverIP` and
/// `serverPort`; unknown keys are ignored. Any unparsable number fails the
/// whole file.
pub fn parse_record_file(path: &Path) -> Result<Vec<ServerRecord>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::parse(format!("cannot read {}: {}", path.display(), e)))?;

    let mut records = Vec::new();
    let mut app_name = String::new();
    let mut server_id: u32 = 0;
    let mut server_host = String::new();

    for (line_no, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = match line.split_once(':') {
            Some(pair) => pair,
            None => continue,
        };
        let key = key.trim();
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');

        match key {
            "appName" => app_name = value.to_string(),
            "serverIP" => server_host = value.to_string(),
            "serverID" => {
                server_id = value.parse().map_err(|e| {
                    AppError::parse(format!(
                        "{}:{}: invalid serverID '{}': {}",
                        path.display(),
                        line_no + 1,
                        value,
                        e
                    ))
                })?;
            }
            "serverPort" => {
                let port: u16 = value.parse().map_err(|e| {
                    AppError::parse(format!(
                        "{}:{}: invalid serverPort '{}': {}",
                        path.display(),
                        line_no + 1,
                        value,
                        e
                    ))
                })?;
                if port == 0 {
                    return Err(AppError::parse(format!(
                        "{}:{}: serverPort must be between 1 and 65535",
                        path.display(),
                        line_no + 1
                    )));
                }
                if server_host.is_empty() {
                    return Err(AppError::parse(format!(
                        "{}:{}: record has no serverIP",
                        path.display(),
                        line_no + 1
                    )));
                }

                // serverPort closes the record block
                records.push(ServerRecord::new(
                    std::mem::take(&mut app_name),
                    server_id,
                    std::mem::take(&mut server_host),
                    port,
                ));
                server_id = 0;
            }
            _ => {}
        }
    }

    Ok(records)
}
