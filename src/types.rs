use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One raw CSV row, everything optional so that malformed cells surface as
/// `None` instead of failing the whole record during deserialization.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "fecha")]
    pub date: Option<String>,
    #[serde(rename = "idcomunidad")]
    pub region_code: Option<String>,
    #[serde(rename = "idprovincia")]
    pub province_code: Option<String>,
    #[serde(rename = "municipio")]
    pub municipality: Option<String>,
    #[serde(rename = "causa")]
    pub cause_code: Option<String>,
    #[serde(rename = "superficie")]
    pub burned_area: Option<String>,
    #[serde(rename = "lat")]
    pub latitude: Option<String>,
    #[serde(rename = "lng")]
    pub longitude: Option<String>,
    #[serde(rename = "time_ctrl")]
    pub control_time: Option<String>,
    #[serde(rename = "time_ext")]
    pub extinction_time: Option<String>,
    #[serde(rename = "muertos")]
    pub deaths: Option<String>,
    #[serde(rename = "heridos")]
    pub injuries: Option<String>,
    #[serde(rename = "personal")]
    pub personnel: Option<String>,
    #[serde(rename = "medios")]
    pub vehicles: Option<String>,
    #[serde(rename = "gastos")]
    pub expenses: Option<String>,
    #[serde(rename = "perdidas")]
    pub losses: Option<String>,
}

/// Severity band of a single fire by burned area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    #[serde(rename = "Conato (<1 ha)")]
    Conato,
    #[serde(rename = "Incendio (1–500 ha)")]
    Incendio,
    #[serde(rename = "Gran incendio (>500 ha)")]
    GranIncendio,
}

impl Severity {
    pub const CONATO_MAX_HA: f64 = 1.0;
    pub const GRANDE_MIN_HA: f64 = 500.0;

    pub fn classify(area_ha: f64) -> Severity {
        if area_ha <= Self::CONATO_MAX_HA {
            Severity::Conato
        } else if area_ha < Self::GRANDE_MIN_HA {
            Severity::Incendio
        } else {
            Severity::GranIncendio
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Conato => "Conato (<1 ha)",
            Severity::Incendio => "Incendio (1–500 ha)",
            Severity::GranIncendio => "Gran incendio (>500 ha)",
        }
    }
}

/// One cleaned wildfire record. Built once by the loader and never mutated;
/// every aggregation works on borrowed slices of these.
#[derive(Debug, Clone)]
pub struct FireEvent {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub iso_week: u32,
    /// Autonomous community display name (resolved from its code).
    pub region: &'static str,
    pub province: &'static str,
    pub cause: &'static str,
    /// Hectares; `None` when the source cell failed numeric coercion.
    /// Aggregations skip `None`, they never treat it as zero.
    pub burned_area: Option<f64>,
    pub severity: Option<Severity>,
    pub latitude: f64,
    pub longitude: f64,
    /// Minutes until control/extinction, clamped to >= 0 when present.
    pub control_time: Option<i64>,
    pub extinction_time: Option<i64>,
    pub municipality: String,
    // Operational pass-through fields, untouched by the core transforms.
    pub deaths: Option<i64>,
    pub injuries: Option<i64>,
    pub personnel: Option<i64>,
    pub vehicles: Option<i64>,
    pub expenses: Option<f64>,
    pub losses: Option<f64>,
}

impl FireEvent {
    pub fn new(date: NaiveDate, region: &'static str, province: &'static str, cause: &'static str) -> FireEvent {
        FireEvent {
            date,
            year: date.year(),
            month: date.month(),
            iso_week: date.iso_week().week(),
            region,
            province,
            cause,
            burned_area: None,
            severity: None,
            latitude: 0.0,
            longitude: 0.0,
            control_time: None,
            extinction_time: None,
            municipality: String::new(),
            deaths: None,
            injuries: None,
            personnel: None,
            vehicles: None,
            expenses: None,
            losses: None,
        }
    }
}

/// Three-way fire count trend, plus the no-comparison-possible sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    #[serde(rename = "Ascendente")]
    Rising,
    #[serde(rename = "Descendente")]
    Falling,
    #[serde(rename = "Estable")]
    Stable,
    #[serde(rename = "Sin datos previos")]
    NoPriorData,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Rising => "Ascendente",
            Trend::Falling => "Descendente",
            Trend::Stable => "Estable",
            Trend::NoPriorData => "Sin datos previos",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the regional ranking, ready for export or tabular preview.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RegionRow {
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub name: String,
    #[serde(rename = "AnnualMeanFires")]
    #[tabled(rename = "AnnualMeanFires")]
    pub annual_mean_count: f64,
    #[serde(rename = "AnnualMeanArea")]
    #[tabled(rename = "AnnualMeanArea")]
    pub annual_mean_area: f64,
    #[serde(rename = "PctOfTotalArea")]
    #[tabled(rename = "PctOfTotalArea")]
    pub pct_of_total: f64,
    #[serde(rename = "TotalArea")]
    #[tabled(rename = "TotalArea")]
    pub total_area: f64,
    #[serde(rename = "TotalFires")]
    #[tabled(rename = "TotalFires")]
    pub total_count: usize,
}

/// Which administrative level the regional ranking ended up using.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionScope {
    /// National view: top autonomous communities, percentages of the
    /// national total.
    Communities,
    /// Single-community view: its provinces, percentages of the
    /// community's own total.
    Provinces { community: String },
}

#[derive(Debug, Clone)]
pub struct RegionalSummary {
    pub scope: RegionScope,
    /// Sorted descending by annualized mean burned area, stable on ties.
    pub rows: Vec<RegionRow>,
    /// Mean of the annualized-area column over the reported rows; the
    /// renderer draws this as a reference line.
    pub mean_annual_area: f64,
}

/// One (year, cause) tuple of the cause-evolution breakdown.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CauseYearRow {
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Cause")]
    #[tabled(rename = "Cause")]
    pub cause: String,
    #[serde(rename = "Fires")]
    #[tabled(rename = "Fires")]
    pub count: usize,
    #[serde(rename = "Percentage")]
    #[tabled(rename = "Percentage")]
    pub percentage: f64,
}

/// Cause with its assigned stacking color, in display rank order.
#[derive(Debug, Clone)]
pub struct CauseStyle {
    pub cause: String,
    pub color: &'static str,
}

/// End-of-series annotation for the multi-year stacked chart.
#[derive(Debug, Clone)]
pub struct EndLabel {
    pub cause: String,
    pub color: &'static str,
    /// Cumulative midpoint of this cause's last-year band, in percent.
    pub y_pos: f64,
}

/// Inline segment of the single-year stacked bar.
#[derive(Debug, Clone)]
pub struct CauseSegment {
    pub cause: String,
    pub color: &'static str,
    pub percentage: f64,
    pub count: usize,
}

/// Consumer-facing shape of the cause-evolution result: same tuples, two
/// different chart layouts depending on the year span.
#[derive(Debug, Clone)]
pub enum CauseChartShape {
    MultiYear {
        years: Vec<i32>,
        end_labels: Vec<EndLabel>,
    },
    SingleYear {
        year: i32,
        segments: Vec<CauseSegment>,
    },
}

#[derive(Debug, Clone)]
pub struct CauseEvolution {
    /// Sorted by (year, cause name).
    pub rows: Vec<CauseYearRow>,
    /// Causes ranked by mean percentage descending, ties broken by first
    /// appearance in the input. Drives stacking order and colors.
    pub causes: Vec<CauseStyle>,
    pub shape: CauseChartShape,
}

/// Summed burned area per province, feeding the choropleth consumer.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ProvinceAreaRow {
    #[serde(rename = "Province")]
    #[tabled(rename = "Province")]
    pub province: String,
    #[serde(rename = "TotalArea")]
    #[tabled(rename = "TotalArea")]
    pub total_area: f64,
}

/// Marker data for one large fire, drawn over the focused community.
#[derive(Debug, Clone)]
pub struct FireMarker {
    pub latitude: f64,
    pub longitude: f64,
    /// Cause glyph from the fixed emoji table.
    pub glyph: &'static str,
    pub date: NaiveDate,
    pub municipality: String,
    pub area: f64,
    /// Text size hint: `ln(1 + area)^1.2`.
    pub size: f64,
}

/// Header KPI block of the dashboard.
#[derive(Debug, Serialize)]
pub struct KpiSummary {
    pub total_fires: usize,
    pub burned_area: String,
    /// Year with the largest summed burned area, `None` for an empty table.
    pub peak_year: Option<i32>,
    pub trend: Trend,
}

#[cfg(test)]
pub(crate) fn test_event(
    (y, m, d): (i32, u32, u32),
    region: &'static str,
    province: &'static str,
    cause: &'static str,
    area: Option<f64>,
) -> FireEvent {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let mut ev = FireEvent::new(date, region, province, cause);
    ev.burned_area = area;
    ev.severity = area.map(Severity::classify);
    ev.latitude = 40.4;
    ev.longitude = -3.7;
    ev
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_bands() {
        assert_eq!(Severity::classify(0.5), Severity::Conato);
        assert_eq!(Severity::classify(1.0), Severity::Conato);
        assert_eq!(Severity::classify(10.0), Severity::Incendio);
        assert_eq!(Severity::classify(499.9), Severity::Incendio);
        assert_eq!(Severity::classify(500.0), Severity::GranIncendio);
        assert_eq!(Severity::classify(5000.0), Severity::GranIncendio);
    }

    #[test]
    fn derived_calendar_fields() {
        // 2021-01-01 falls in ISO week 53 of 2020.
        let ev = test_event((2021, 1, 1), "Galicia", "Lugo", "Por rayo", Some(2.0));
        assert_eq!(ev.year, 2021);
        assert_eq!(ev.month, 1);
        assert_eq!(ev.iso_week, 53);
    }

    #[test]
    fn trend_labels_are_spanish() {
        assert_eq!(Trend::Rising.label(), "Ascendente");
        assert_eq!(Trend::NoPriorData.to_string(), "Sin datos previos");
        assert_eq!(
            serde_json::to_string(&Trend::Stable).unwrap(),
            "\"Estable\""
        );
    }
}
