// CSV-backed measurement store for the data service
//
// One file per turbine (file stem = turbine id). The exports carry two
// header rows - column names, then units - combined here as "Name(Unit)"
// so the lookup columns become "Dat/Zeit", "Wind(m/s)" and
// "Leistung(kW)". Fields are semicolon-separated because the timestamp
// itself contains a comma.
use crate::domain::query::WIRE_TIME_FORMAT;
use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use csv::StringRecord;
use std::collections::HashMap;
use std::path::Path;

const TIMESTAMP_COLUMN: &str = "Dat/Zeit";
const WIND_SPEED_COLUMN: &str = "Wind(m/s)";
const POWER_COLUMN: &str = "Leistung(kW)";

/// A single row of a turbine export. The numeric fields stay raw
/// locale-formatted strings; they pass through to the wire untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub timestamp: NaiveDateTime,
    pub wind_speed: String,
    pub power: String,
}

#[derive(Debug)]
pub struct CsvTurbineStore {
    turbines: HashMap<String, Vec<MeasurementRecord>>,
}

impl CsvTurbineStore {
    /// Load every `*.csv` file in the data directory. Records are held
    /// in memory sorted by timestamp; the store is immutable afterwards.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut turbines = HashMap::new();
        let entries = std::fs::read_dir(data_dir)
            .with_context(|| format!("reading data directory {}", data_dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(turbine_id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let mut records = load_file(&path)
                .with_context(|| format!("loading turbine export {}", path.display()))?;
            records.sort_by_key(|r| r.timestamp);
            tracing::info!(turbine_id, rows = records.len(), "loaded turbine export");
            turbines.insert(turbine_id.to_string(), records);
        }
        Ok(Self { turbines })
    }

    pub fn turbine_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.turbines.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Records for one turbine within the inclusive time window, in
    /// timestamp order. Unknown turbines yield an empty slice, which the
    /// handlers report as 404 just like an empty range.
    pub fn records_in_range(
        &self,
        turbine_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<&MeasurementRecord> {
        self.turbines
            .get(turbine_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.timestamp >= start && r.timestamp <= end)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn load_file(path: &Path) -> Result<Vec<MeasurementRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = reader.records();
    let names = match rows.next() {
        Some(record) => record?,
        None => bail!("empty export file"),
    };
    let units = match rows.next() {
        Some(record) => record?,
        None => bail!("missing unit header row"),
    };
    let headers = combine_headers(&names, &units);

    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("missing column {name:?}"))
    };
    let timestamp_idx = column(TIMESTAMP_COLUMN)?;
    let wind_speed_idx = column(WIND_SPEED_COLUMN)?;
    let power_idx = column(POWER_COLUMN)?;

    let mut records = Vec::new();
    for (line, row) in rows.enumerate() {
        let row = row?;
        let field = |idx: usize| row.get(idx).unwrap_or_default().trim();
        match NaiveDateTime::parse_from_str(field(timestamp_idx), WIRE_TIME_FORMAT) {
            Ok(timestamp) => records.push(MeasurementRecord {
                timestamp,
                wind_speed: field(wind_speed_idx).to_string(),
                power: field(power_idx).to_string(),
            }),
            Err(err) => {
                tracing::warn!(line = line + 3, %err, "skipping row with unparseable timestamp");
            }
        }
    }
    Ok(records)
}

fn combine_headers(names: &StringRecord, units: &StringRecord) -> Vec<String> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let unit = units.get(idx).unwrap_or_default().trim();
            if unit.is_empty() {
                name.trim().to_string()
            } else {
                format!("{}({})", name.trim(), unit)
            }
        })
        .collect()
}
