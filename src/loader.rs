// CSV load + clean pipeline.
//
// Builds the immutable event table the aggregators work on. Cleaning policy
// (silent per-row exclusions, counted in the `LoadReport`):
// - rows with an unparseable date or a date before 1983 are dropped,
// - rows missing either coordinate are dropped (outside national territory),
// - rows whose region/province/cause code is outside the closed tables are
//   dropped,
// - a burned-area cell that fails numeric coercion stays `None` and the row
//   is kept; aggregations skip the null,
// - negative control/extinction times are clamped to zero.
use crate::error::DataError;
use crate::lookup;
use crate::types::{FireEvent, RawRow, Severity};
use crate::util::{parse_date_safe, parse_f64_safe, parse_i64_safe, parse_u8_safe};
use chrono::Datelike;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Oldest year considered reliable in the source dataset.
pub const MIN_YEAR: i32 = 1983;

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub parse_errors: usize,
    pub dropped_out_of_range: usize,
    pub dropped_no_coords: usize,
}

/// Load and clean the wildfire CSV. A missing file is fatal; per-row data
/// quality problems are counted and skipped.
pub fn load_fires(path: impl AsRef<Path>) -> Result<(Vec<FireEvent>, LoadReport), DataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::MissingSource(path.to_path_buf()));
    }
    let rdr = ReaderBuilder::new().flexible(true).from_reader(File::open(path)?);
    let (events, report) = clean_rows(rdr)?;
    info!(
        total = report.total_rows,
        kept = report.kept_rows,
        parse_errors = report.parse_errors,
        "loaded fire events from {}",
        path.display()
    );
    Ok((events, report))
}

fn clean_rows<R: Read>(mut rdr: csv::Reader<R>) -> Result<(Vec<FireEvent>, LoadReport), DataError> {
    let mut report = LoadReport::default();
    let mut events: Vec<FireEvent> = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                report.parse_errors += 1;
                continue;
            }
        };

        let Some(date) = parse_date_safe(row.date.as_deref()) else {
            report.parse_errors += 1;
            continue;
        };
        if date.year() < MIN_YEAR {
            report.dropped_out_of_range += 1;
            continue;
        }

        // Both coordinates or the row is out (records outside Spain).
        let (Some(latitude), Some(longitude)) = (
            parse_f64_safe(row.latitude.as_deref()),
            parse_f64_safe(row.longitude.as_deref()),
        ) else {
            report.dropped_no_coords += 1;
            continue;
        };

        let Some(region) = parse_u8_safe(row.region_code.as_deref()).and_then(lookup::community_name)
        else {
            report.parse_errors += 1;
            continue;
        };
        let Some(province) =
            parse_u8_safe(row.province_code.as_deref()).and_then(lookup::province_name)
        else {
            report.parse_errors += 1;
            continue;
        };
        let Some(cause) = parse_u8_safe(row.cause_code.as_deref()).and_then(lookup::cause_name)
        else {
            report.parse_errors += 1;
            continue;
        };

        // Failed coercion stays null; it is never silently zeroed.
        let burned_area = parse_f64_safe(row.burned_area.as_deref()).filter(|v| *v >= 0.0);

        events.push(FireEvent {
            date,
            year: date.year(),
            month: date.month(),
            iso_week: date.iso_week().week(),
            region,
            province,
            cause,
            burned_area,
            severity: burned_area.map(Severity::classify),
            latitude,
            longitude,
            control_time: parse_i64_safe(row.control_time.as_deref()).map(|v| v.max(0)),
            extinction_time: parse_i64_safe(row.extinction_time.as_deref()).map(|v| v.max(0)),
            municipality: row.municipality.unwrap_or_default().trim().to_string(),
            deaths: parse_i64_safe(row.deaths.as_deref()),
            injuries: parse_i64_safe(row.injuries.as_deref()),
            personnel: parse_i64_safe(row.personnel.as_deref()),
            vehicles: parse_i64_safe(row.vehicles.as_deref()),
            expenses: parse_f64_safe(row.expenses.as_deref()),
            losses: parse_f64_safe(row.losses.as_deref()),
        });
    }

    report.kept_rows = events.len();
    debug!(
        out_of_range = report.dropped_out_of_range,
        no_coords = report.dropped_no_coords,
        "row exclusions"
    );
    Ok((events, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "fecha,idcomunidad,idprovincia,municipio,causa,superficie,lat,lng,time_ctrl,time_ext,muertos,heridos,personal,medios,gastos,perdidas";

    fn load(rows: &[&str]) -> (Vec<FireEvent>, LoadReport) {
        let csv = format!("{}\n{}", HEADER, rows.join("\n"));
        let rdr = ReaderBuilder::new()
            .flexible(true)
            .from_reader(csv.as_bytes());
        clean_rows(rdr).unwrap()
    }

    #[test]
    fn keeps_a_fully_valid_row() {
        let (events, report) = load(&[
            "2020-07-15,3,27,Sarria,4,12.5,42.78,-7.41,60,120,0,0,25,3,1000.0,2000.0",
        ]);
        assert_eq!(report.kept_rows, 1);
        let ev = &events[0];
        assert_eq!(ev.region, "Galicia");
        assert_eq!(ev.province, "Lugo");
        assert_eq!(ev.cause, "Intencionado");
        assert_eq!(ev.burned_area, Some(12.5));
        assert_eq!(ev.severity, Some(Severity::Incendio));
        assert_eq!(ev.year, 2020);
        assert_eq!(ev.iso_week, 29);
        assert_eq!(ev.municipality, "Sarria");
    }

    #[test]
    fn drops_rows_before_min_year() {
        let (events, report) = load(&[
            "1975-06-01,3,27,X,1,5.0,42.0,-7.0,0,0,,,,,,",
            "1983-06-01,3,27,X,1,5.0,42.0,-7.0,0,0,,,,,,",
        ]);
        assert_eq!(events.len(), 1);
        assert_eq!(report.dropped_out_of_range, 1);
        assert_eq!(events[0].year, 1983);
    }

    #[test]
    fn drops_rows_missing_either_coordinate() {
        let (events, report) = load(&[
            "2020-06-01,3,27,X,1,5.0,,-7.0,0,0,,,,,,",
            "2020-06-01,3,27,X,1,5.0,42.0,,0,0,,,,,,",
        ]);
        assert!(events.is_empty());
        assert_eq!(report.dropped_no_coords, 2);
    }

    #[test]
    fn unparseable_area_propagates_as_null_not_zero() {
        let (events, report) = load(&[
            "2020-06-01,3,27,X,1,n/a,42.0,-7.0,0,0,,,,,,",
        ]);
        assert_eq!(report.kept_rows, 1);
        assert_eq!(events[0].burned_area, None);
        assert_eq!(events[0].severity, None);
    }

    #[test]
    fn negative_durations_are_clamped_to_zero() {
        let (events, _) = load(&[
            "2020-06-01,3,27,X,1,5.0,42.0,-7.0,-30,-1,,,,,,",
        ]);
        assert_eq!(events[0].control_time, Some(0));
        assert_eq!(events[0].extinction_time, Some(0));
    }

    #[test]
    fn unknown_codes_are_parse_errors() {
        let (events, report) = load(&[
            "2020-06-01,99,27,X,1,5.0,42.0,-7.0,0,0,,,,,,",
            "2020-06-01,3,99,X,1,5.0,42.0,-7.0,0,0,,,,,,",
            "2020-06-01,3,27,X,9,5.0,42.0,-7.0,0,0,,,,,,",
        ]);
        assert!(events.is_empty());
        assert_eq!(report.parse_errors, 3);
    }

    #[test]
    fn missing_source_is_fatal() {
        let err = load_fires("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, DataError::MissingSource(_)));
    }
}
