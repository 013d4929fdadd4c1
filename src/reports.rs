// Statistical transforms over the cleaned event table: regional ranking,
// cause evolution, trend classification and the header KPI block.
//
// Every function here is a pure projection: empty or degenerate input maps
// to a sentinel value (`None` / `Trend::NoPriorData`), never an error.
use crate::lookup::{CAUSE_EMOJI, CAUSE_PALETTE};
use crate::types::{
    CauseChartShape, CauseEvolution, CauseSegment, CauseStyle, CauseYearRow, EndLabel, FireEvent,
    FireMarker, KpiSummary, ProvinceAreaRow, RegionRow, RegionScope, RegionalSummary, Severity,
    Trend,
};
use crate::util::{format_area, mean};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Relative change beyond which the fire count trend is no longer "stable".
pub const TREND_THRESHOLD: f64 = 0.05;
/// Window length, in months, for the single-year trend comparison.
const TREND_WINDOW_MONTHS: usize = 6;
/// Row cap for the national (communities) ranking.
const TOP_REGIONS: usize = 10;

#[derive(Default)]
struct RegionAcc {
    count: usize,
    area: f64,
}

/// Ranked regional summary of burned area and fire counts.
///
/// Groups by autonomous community, or by province when the input covers
/// exactly one community (percentages are then relative to that community's
/// own total, which is the grand total of the slice). Annualized means
/// divide by the number of distinct years present. Empty input -> `None`.
pub fn regional_summary(events: &[FireEvent]) -> Option<RegionalSummary> {
    if events.is_empty() {
        return None;
    }

    let n_years = distinct_years(events).len() as f64;
    let communities: HashSet<&str> = events.iter().map(|ev| ev.region).collect();
    let scope = if communities.len() == 1 {
        RegionScope::Provinces {
            community: communities.iter().next().copied().unwrap_or_default().to_string(),
        }
    } else {
        RegionScope::Communities
    };

    // Groups keep first-appearance order so exact ties stay deterministic
    // under the stable sort below.
    let mut order: Vec<&'static str> = Vec::new();
    let mut groups: HashMap<&'static str, RegionAcc> = HashMap::new();
    for ev in events {
        let key = match scope {
            RegionScope::Communities => ev.region,
            RegionScope::Provinces { .. } => ev.province,
        };
        let acc = groups.entry(key).or_insert_with(|| {
            order.push(key);
            RegionAcc::default()
        });
        acc.count += 1;
        if let Some(area) = ev.burned_area {
            acc.area += area;
        }
    }

    let grand_total: f64 = groups.values().map(|acc| acc.area).sum();
    let mut rows: Vec<RegionRow> = order
        .into_iter()
        .map(|name| {
            let acc = &groups[name];
            let pct = if grand_total > 0.0 {
                acc.area / grand_total * 100.0
            } else {
                0.0
            };
            RegionRow {
                name: name.to_string(),
                annual_mean_count: acc.count as f64 / n_years,
                annual_mean_area: acc.area / n_years,
                pct_of_total: pct,
                total_area: acc.area,
                total_count: acc.count,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.annual_mean_area
            .partial_cmp(&a.annual_mean_area)
            .unwrap_or(Ordering::Equal)
    });
    if matches!(scope, RegionScope::Communities) {
        rows.truncate(TOP_REGIONS);
    }

    let mean_annual_area = mean(&rows.iter().map(|r| r.annual_mean_area).collect::<Vec<_>>());
    Some(RegionalSummary {
        scope,
        rows,
        mean_annual_area,
    })
}

/// Yearly percentage breakdown of fire causes.
///
/// Causes are ranked by their mean percentage across the years they appear
/// in, descending, ties broken by first appearance; the rank drives both
/// the color assignment and the stacking/label order. Empty input -> `None`.
pub fn cause_evolution(events: &[FireEvent]) -> Option<CauseEvolution> {
    if events.is_empty() {
        return None;
    }

    let mut cause_order: Vec<&'static str> = Vec::new();
    let mut counts: HashMap<(i32, &'static str), usize> = HashMap::new();
    let mut year_totals: HashMap<i32, usize> = HashMap::new();
    for ev in events {
        if !cause_order.contains(&ev.cause) {
            cause_order.push(ev.cause);
        }
        *counts.entry((ev.year, ev.cause)).or_default() += 1;
        *year_totals.entry(ev.year).or_default() += 1;
    }

    let years = {
        let mut y: Vec<i32> = year_totals.keys().copied().collect();
        y.sort_unstable();
        y
    };

    let mut rows: Vec<CauseYearRow> = counts
        .iter()
        .map(|(&(year, cause), &count)| CauseYearRow {
            year,
            cause: cause.to_string(),
            count,
            percentage: count as f64 / year_totals[&year] as f64 * 100.0,
        })
        .collect();
    rows.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.cause.cmp(&b.cause)));

    // Mean percentage per cause over the years it actually appears in.
    let mut ranked: Vec<(&'static str, f64)> = cause_order
        .iter()
        .map(|&cause| {
            let pcts: Vec<f64> = years
                .iter()
                .filter_map(|&year| {
                    counts
                        .get(&(year, cause))
                        .map(|&c| c as f64 / year_totals[&year] as f64 * 100.0)
                })
                .collect();
            (cause, mean(&pcts))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let causes: Vec<CauseStyle> = ranked
        .iter()
        .enumerate()
        .map(|(i, &(cause, _))| CauseStyle {
            cause: cause.to_string(),
            color: CAUSE_PALETTE[i % CAUSE_PALETTE.len()],
        })
        .collect();

    let shape = if years.len() == 1 {
        let year = years[0];
        let segments = ranked
            .iter()
            .zip(&causes)
            .filter_map(|(&(cause, _), style)| {
                counts.get(&(year, cause)).map(|&count| CauseSegment {
                    cause: cause.to_string(),
                    color: style.color,
                    percentage: count as f64 / year_totals[&year] as f64 * 100.0,
                    count,
                })
            })
            .collect();
        CauseChartShape::SingleYear { year, segments }
    } else {
        // Label positions accumulate cause by cause over the last year's
        // contributions; a cause absent in the last year contributes zero,
        // not a gap.
        let last_year = *years.last().expect("years is non-empty");
        let mut cumulative = 0.0;
        let end_labels = ranked
            .iter()
            .zip(&causes)
            .map(|(&(cause, _), style)| {
                let contribution = counts
                    .get(&(last_year, cause))
                    .map(|&c| c as f64 / year_totals[&last_year] as f64 * 100.0)
                    .unwrap_or(0.0);
                let label = EndLabel {
                    cause: cause.to_string(),
                    color: style.color,
                    y_pos: cumulative + contribution / 2.0,
                };
                cumulative += contribution;
                label
            })
            .collect();
        CauseChartShape::MultiYear {
            years,
            end_labels,
        }
    };

    Some(CauseEvolution {
        rows,
        causes,
        shape,
    })
}

/// Classify the fire count trend.
///
/// With two or more distinct years, the latest year is compared against the
/// one before it. With a single year, the last six (year, month) buckets are
/// compared against the six preceding ones, degrading to smaller windows
/// when fewer buckets exist.
pub fn fire_trend(events: &[FireEvent]) -> Trend {
    let mut monthly: HashMap<(i32, u32), usize> = HashMap::new();
    for ev in events {
        *monthly.entry((ev.year, ev.month)).or_default() += 1;
    }
    let mut buckets: Vec<((i32, u32), usize)> = monthly.into_iter().collect();
    buckets.sort_unstable_by_key(|&(key, _)| key);

    let mut years: Vec<i32> = buckets.iter().map(|&((y, _), _)| y).collect();
    years.dedup();

    let (current, previous) = if years.len() >= 2 {
        let latest = years[years.len() - 1];
        let prior = years[years.len() - 2];
        let sum_for = |year: i32| -> f64 {
            buckets
                .iter()
                .filter(|&&((y, _), _)| y == year)
                .map(|&(_, n)| n as f64)
                .sum()
        };
        (sum_for(latest), sum_for(prior))
    } else {
        let start = buckets.len().saturating_sub(TREND_WINDOW_MONTHS * 2);
        let recent: Vec<f64> = buckets[start..].iter().map(|&(_, n)| n as f64).collect();
        let split = recent.len().saturating_sub(TREND_WINDOW_MONTHS);
        let current: f64 = recent[split..].iter().sum();
        let previous: f64 = recent[..recent.len().min(TREND_WINDOW_MONTHS)].iter().sum();
        (current, previous)
    };

    classify_trend(current, previous)
}

/// Threshold rule behind [`fire_trend`]; a heuristic, not a statistical
/// test.
pub fn classify_trend(current: f64, previous: f64) -> Trend {
    if previous == 0.0 {
        return Trend::NoPriorData;
    }
    let diff = (current - previous) / previous;
    if diff > TREND_THRESHOLD {
        Trend::Rising
    } else if diff < -TREND_THRESHOLD {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// Year with the largest summed burned area; earliest year wins exact ties.
pub fn peak_year(events: &[FireEvent]) -> Option<i32> {
    let mut totals: HashMap<i32, f64> = HashMap::new();
    for ev in events {
        if let Some(area) = ev.burned_area {
            *totals.entry(ev.year).or_default() += area;
        } else {
            totals.entry(ev.year).or_default();
        }
    }
    let mut years: Vec<i32> = totals.keys().copied().collect();
    years.sort_unstable();
    years
        .into_iter()
        .map(|y| (y, totals[&y]))
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(year, _)| year)
}

/// Total burned area of the slice as a compact label. Null areas are
/// skipped; an empty slice formats as zero.
pub fn format_total_area(events: &[FireEvent]) -> String {
    let total: f64 = events
        .iter()
        .filter_map(|ev| ev.burned_area)
        .fold(0.0, |acc, area| acc + area);
    format_area(total)
}

/// Summed burned area per province, in first-appearance order. This feeds
/// the choropleth consumer, which joins on province name.
pub fn province_area_totals(events: &[FireEvent]) -> Vec<ProvinceAreaRow> {
    let mut order: Vec<&'static str> = Vec::new();
    let mut totals: HashMap<&'static str, f64> = HashMap::new();
    for ev in events {
        let total = totals.entry(ev.province).or_insert_with(|| {
            order.push(ev.province);
            0.0
        });
        if let Some(area) = ev.burned_area {
            *total += area;
        }
    }
    order
        .into_iter()
        .map(|province| ProvinceAreaRow {
            province: province.to_string(),
            total_area: totals[province],
        })
        .collect()
}

/// Marker data for the large fires (>= 500 ha) of one community, with the
/// cause glyph and a log-scaled size hint for the map consumer.
pub fn large_fire_markers(events: &[FireEvent], community: &str) -> Vec<FireMarker> {
    events
        .iter()
        .filter(|ev| ev.region == community)
        .filter_map(|ev| {
            let area = ev.burned_area?;
            if area < Severity::GRANDE_MIN_HA {
                return None;
            }
            Some(FireMarker {
                latitude: ev.latitude,
                longitude: ev.longitude,
                glyph: CAUSE_EMOJI.get(ev.cause).copied().unwrap_or(" ? "),
                date: ev.date,
                municipality: ev.municipality.clone(),
                area,
                size: (1.0 + area).ln().powf(1.2),
            })
        })
        .collect()
}

/// Header KPI block for the dashboard.
pub fn kpi_summary(events: &[FireEvent]) -> KpiSummary {
    KpiSummary {
        total_fires: events.len(),
        burned_area: format_total_area(events),
        peak_year: peak_year(events),
        trend: fire_trend(events),
    }
}

fn distinct_years(events: &[FireEvent]) -> HashSet<i32> {
    events.iter().map(|ev| ev.year).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_event;
    use approx::assert_relative_eq;

    #[test]
    fn single_region_scenario_annualizes_over_distinct_years() {
        // Three rows, one region, two distinct years: mean area 15/2,
        // mean count 3/2, 100% of the total.
        let events = vec![
            test_event((2020, 6, 1), "Galicia", "Lugo", "Por rayo", Some(10.0)),
            test_event((2020, 7, 1), "Galicia", "Lugo", "Por rayo", Some(5.0)),
            test_event((2021, 8, 1), "Galicia", "Lugo", "Por rayo", Some(0.0)),
        ];
        let summary = regional_summary(&events).unwrap();
        assert_eq!(
            summary.scope,
            RegionScope::Provinces {
                community: "Galicia".to_string()
            }
        );
        assert_eq!(summary.rows.len(), 1);
        let row = &summary.rows[0];
        assert_eq!(row.name, "Lugo");
        assert_relative_eq!(row.annual_mean_area, 7.5);
        assert_relative_eq!(row.annual_mean_count, 1.5);
        assert_relative_eq!(row.pct_of_total, 100.0);
        assert_eq!(row.total_count, 3);
    }

    #[test]
    fn annualized_count_is_rows_over_years_exactly() {
        // 4 Galicia rows and 2 Andalucía rows across 2 years.
        let mut events = Vec::new();
        for month in 1..=4 {
            events.push(test_event((2020, month, 1), "Galicia", "Lugo", "Por rayo", Some(1.0)));
        }
        events.push(test_event((2021, 5, 1), "Andalucía", "Sevilla", "Por rayo", Some(100.0)));
        events.push(test_event((2021, 6, 1), "Andalucía", "Huelva", "Por rayo", Some(100.0)));
        let summary = regional_summary(&events).unwrap();
        assert_eq!(summary.scope, RegionScope::Communities);
        let galicia = summary.rows.iter().find(|r| r.name == "Galicia").unwrap();
        assert_relative_eq!(galicia.annual_mean_count, 4.0 / 2.0);
        let andalucia = summary.rows.iter().find(|r| r.name == "Andalucía").unwrap();
        assert_relative_eq!(andalucia.annual_mean_count, 2.0 / 2.0);
        // Andalucía leads the ranking on mean area.
        assert_eq!(summary.rows[0].name, "Andalucía");
    }

    #[test]
    fn national_ranking_keeps_top_ten() {
        let regions: [&'static str; 12] = [
            "Galicia",
            "Andalucía",
            "Cataluña",
            "Aragón",
            "Cantabria",
            "La Rioja",
            "Canarias",
            "Extremadura",
            "Illes Balears",
            "Ceuta",
            "Melilla",
            "País Vasco",
        ];
        let events: Vec<_> = regions
            .iter()
            .enumerate()
            .map(|(i, &region)| {
                test_event((2020, 6, 1), region, "Lugo", "Por rayo", Some((i + 1) as f64))
            })
            .collect();
        let summary = regional_summary(&events).unwrap();
        assert_eq!(summary.rows.len(), 10);
        // Largest area first.
        assert_eq!(summary.rows[0].name, "País Vasco");
    }

    #[test]
    fn null_areas_are_excluded_not_zeroed() {
        let events = vec![
            test_event((2020, 6, 1), "Galicia", "Lugo", "Por rayo", Some(10.0)),
            test_event((2020, 6, 2), "Galicia", "Lugo", "Por rayo", None),
        ];
        let summary = regional_summary(&events).unwrap();
        let row = &summary.rows[0];
        // Null row still counts as a fire but adds no area.
        assert_eq!(row.total_count, 2);
        assert_relative_eq!(row.total_area, 10.0);
    }

    #[test]
    fn empty_input_yields_sentinels_everywhere() {
        let events: Vec<crate::types::FireEvent> = Vec::new();
        assert!(regional_summary(&events).is_none());
        assert!(cause_evolution(&events).is_none());
        assert_eq!(fire_trend(&events), Trend::NoPriorData);
        assert_eq!(peak_year(&events), None);
        assert_eq!(format_total_area(&events), ">0.0K ha");
        let kpi = kpi_summary(&events);
        assert_eq!(kpi.total_fires, 0);
        assert_eq!(kpi.peak_year, None);
    }

    #[test]
    fn cause_percentages_close_to_100_per_year() {
        let mut events = Vec::new();
        for year in 2019..=2021 {
            for day in 1..=3 {
                events.push(test_event((year, 6, day), "Galicia", "Lugo", "Por rayo", Some(2.0)));
            }
            for day in 1..=2 {
                events.push(test_event((year, 7, day), "Galicia", "Lugo", "Intencionado", Some(2.0)));
            }
            events.push(test_event((year, 8, 1), "Galicia", "Lugo", "Negligencia", Some(2.0)));
        }
        let evo = cause_evolution(&events).unwrap();
        for year in 2019..=2021 {
            let total: f64 = evo
                .rows
                .iter()
                .filter(|r| r.year == year)
                .map(|r| r.percentage)
                .sum();
            assert_relative_eq!(total, 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn end_labels_sit_at_cumulative_midpoints() {
        // Two causes at 50% each for three years: labels at 25 and 75, in
        // first-appearance order since the means tie.
        let mut events = Vec::new();
        for year in 2019..=2021 {
            events.push(test_event((year, 6, 1), "Galicia", "Lugo", "Por rayo", Some(2.0)));
            events.push(test_event((year, 7, 1), "Galicia", "Lugo", "Intencionado", Some(2.0)));
        }
        let evo = cause_evolution(&events).unwrap();
        let CauseChartShape::MultiYear { end_labels, years } = &evo.shape else {
            panic!("expected multi-year shape");
        };
        assert_eq!(years, &vec![2019, 2020, 2021]);
        assert_eq!(end_labels.len(), 2);
        assert_eq!(end_labels[0].cause, "Por rayo");
        assert_relative_eq!(end_labels[0].y_pos, 25.0);
        assert_eq!(end_labels[1].cause, "Intencionado");
        assert_relative_eq!(end_labels[1].y_pos, 75.0);
    }

    #[test]
    fn cause_missing_from_final_year_contributes_zero_offset() {
        let events = vec![
            test_event((2019, 6, 1), "Galicia", "Lugo", "Por rayo", Some(2.0)),
            test_event((2019, 7, 1), "Galicia", "Lugo", "Negligencia", Some(2.0)),
            test_event((2020, 6, 1), "Galicia", "Lugo", "Por rayo", Some(2.0)),
        ];
        let evo = cause_evolution(&events).unwrap();
        let CauseChartShape::MultiYear { end_labels, .. } = &evo.shape else {
            panic!("expected multi-year shape");
        };
        // "Por rayo" covers the whole final year; "Negligencia" stacks
        // directly on top with no gap.
        assert_eq!(end_labels[0].cause, "Por rayo");
        assert_relative_eq!(end_labels[0].y_pos, 50.0);
        assert_eq!(end_labels[1].cause, "Negligencia");
        assert_relative_eq!(end_labels[1].y_pos, 100.0);
    }

    #[test]
    fn single_year_produces_bar_segments() {
        let events = vec![
            test_event((2020, 6, 1), "Galicia", "Lugo", "Por rayo", Some(2.0)),
            test_event((2020, 7, 1), "Galicia", "Lugo", "Por rayo", Some(2.0)),
            test_event((2020, 7, 2), "Galicia", "Lugo", "Intencionado", Some(2.0)),
            test_event((2020, 8, 1), "Galicia", "Lugo", "Intencionado", Some(2.0)),
        ];
        let evo = cause_evolution(&events).unwrap();
        let CauseChartShape::SingleYear { year, segments } = &evo.shape else {
            panic!("expected single-year shape");
        };
        assert_eq!(*year, 2020);
        assert_eq!(segments.len(), 2);
        assert_relative_eq!(segments[0].percentage, 50.0);
        assert_relative_eq!(segments[1].percentage, 50.0);
        assert_eq!(segments[0].count, 2);
    }

    #[test]
    fn cause_colors_cycle_the_palette_in_rank_order() {
        let mut events = Vec::new();
        // Six causes, one dominating, so ranks are unambiguous.
        let causes: [&'static str; 6] = [
            "Por rayo",
            "Negligencia",
            "Accidente",
            "Intencionado",
            "De origen desconocido",
            "Reproducido",
        ];
        for (i, &cause) in causes.iter().enumerate() {
            for day in 0..(6 - i) {
                events.push(test_event((2020, 6, (day + 1) as u32), "Galicia", "Lugo", cause, Some(2.0)));
            }
        }
        let evo = cause_evolution(&events).unwrap();
        assert_eq!(evo.causes.len(), 6);
        assert_eq!(evo.causes[0].cause, "Por rayo");
        assert_eq!(evo.causes[0].color, CAUSE_PALETTE[0]);
        assert_eq!(evo.causes[5].cause, "Reproducido");
        assert_eq!(evo.causes[5].color, CAUSE_PALETTE[5]);
    }

    #[test]
    fn trend_threshold_boundaries() {
        assert_eq!(classify_trend(106.0, 100.0), Trend::Rising);
        assert_eq!(classify_trend(104.0, 100.0), Trend::Stable);
        assert_eq!(classify_trend(105.0, 100.0), Trend::Stable);
        assert_eq!(classify_trend(94.0, 100.0), Trend::Falling);
        assert_eq!(classify_trend(96.0, 100.0), Trend::Stable);
        assert_eq!(classify_trend(42.0, 0.0), Trend::NoPriorData);
    }

    #[test]
    fn multi_year_trend_compares_last_two_years() {
        let mut events = Vec::new();
        for day in 1..=10 {
            events.push(test_event((2020, 6, day), "Galicia", "Lugo", "Por rayo", Some(1.0)));
        }
        for day in 1..=20 {
            events.push(test_event((2021, 6, day), "Galicia", "Lugo", "Por rayo", Some(1.0)));
        }
        assert_eq!(fire_trend(&events), Trend::Rising);
    }

    #[test]
    fn single_year_trend_uses_monthly_windows() {
        let mut events = Vec::new();
        // One fire per month Jan-Jun, two per month Jul-Dec.
        for month in 1..=6u32 {
            events.push(test_event((2020, month, 1), "Galicia", "Lugo", "Por rayo", Some(1.0)));
        }
        for month in 7..=12u32 {
            events.push(test_event((2020, month, 1), "Galicia", "Lugo", "Por rayo", Some(1.0)));
            events.push(test_event((2020, month, 2), "Galicia", "Lugo", "Por rayo", Some(1.0)));
        }
        assert_eq!(fire_trend(&events), Trend::Rising);
    }

    #[test]
    fn short_single_year_window_degrades_gracefully() {
        // Only three monthly buckets: both windows see the same rows.
        let events = vec![
            test_event((2020, 4, 1), "Galicia", "Lugo", "Por rayo", Some(1.0)),
            test_event((2020, 5, 1), "Galicia", "Lugo", "Por rayo", Some(1.0)),
            test_event((2020, 6, 1), "Galicia", "Lugo", "Por rayo", Some(1.0)),
        ];
        assert_eq!(fire_trend(&events), Trend::Stable);
    }

    #[test]
    fn peak_year_is_the_largest_area_year() {
        let events = vec![
            test_event((2020, 6, 1), "Galicia", "Lugo", "Por rayo", Some(10.0)),
            test_event((2020, 6, 2), "Galicia", "Lugo", "Por rayo", Some(5.0)),
            test_event((2021, 6, 1), "Galicia", "Lugo", "Por rayo", Some(0.0)),
        ];
        assert_eq!(peak_year(&events), Some(2020));
    }

    #[test]
    fn province_totals_skip_null_areas() {
        let events = vec![
            test_event((2020, 6, 1), "Galicia", "Lugo", "Por rayo", Some(10.0)),
            test_event((2020, 6, 2), "Galicia", "Lugo", "Por rayo", None),
            test_event((2020, 6, 3), "Galicia", "Ourense", "Por rayo", Some(3.0)),
        ];
        let totals = province_area_totals(&events);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].province, "Lugo");
        assert_relative_eq!(totals[0].total_area, 10.0);
        assert_relative_eq!(totals[1].total_area, 3.0);
    }

    #[test]
    fn large_fire_markers_filter_by_community_and_size() {
        let events = vec![
            test_event((2020, 6, 1), "Galicia", "Lugo", "Intencionado", Some(800.0)),
            test_event((2020, 6, 2), "Galicia", "Lugo", "Por rayo", Some(120.0)),
            test_event((2020, 6, 3), "Andalucía", "Sevilla", "Por rayo", Some(900.0)),
            test_event((2020, 6, 4), "Galicia", "Ourense", "Por rayo", None),
        ];
        let markers = large_fire_markers(&events, "Galicia");
        assert_eq!(markers.len(), 1);
        let marker = &markers[0];
        assert_relative_eq!(marker.area, 800.0);
        assert_eq!(marker.glyph, " 🔥 ");
        assert_relative_eq!(marker.size, (801.0_f64).ln().powf(1.2));
    }

    #[test]
    fn rerunning_aggregators_is_bit_identical() {
        let events = vec![
            test_event((2019, 6, 1), "Galicia", "Lugo", "Por rayo", Some(5.0)),
            test_event((2020, 7, 1), "Galicia", "Ourense", "Intencionado", Some(50.0)),
            test_event((2021, 8, 1), "Andalucía", "Sevilla", "Negligencia", None),
        ];
        let a = serde_json::to_string(&regional_summary(&events).unwrap().rows).unwrap();
        let b = serde_json::to_string(&regional_summary(&events).unwrap().rows).unwrap();
        assert_eq!(a, b);
        let a = serde_json::to_string(&cause_evolution(&events).unwrap().rows).unwrap();
        let b = serde_json::to_string(&cause_evolution(&events).unwrap().rows).unwrap();
        assert_eq!(a, b);
        assert_eq!(fire_trend(&events), fire_trend(&events));
    }

}
