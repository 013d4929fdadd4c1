// Entry point and high-level console flow.
//
// The binary is the outer consumer of the aggregation core:
// - Option [1] loads and cleans the fire CSV plus the province geometry,
//   printing diagnostics.
// - Option [2] optionally applies dashboard-style filters, then generates
//   every report, exports them, and prints previews.
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::Mutex;
use wildfire_stats::filter::FilterOptions;
use wildfire_stats::geometry::GeoIndex;
use wildfire_stats::types::{CauseChartShape, FireEvent, RegionScope};
use wildfire_stats::{density, loader, output, reports, util};

const FIRES_CSV: &str = "data/fires_all.csv";
const PROVINCES_GEOJSON: &str = "data/provincias_espana.geojson";

// Simple in-memory app state so we only load/clean the sources once but can
// generate reports multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        fires: None,
        geo: None,
    })
});

struct AppState {
    fires: Option<Vec<FireEvent>>,
    geo: Option<GeoIndex>,
}

/// Read a single line of input after printing the given prompt.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the report selection menu after
/// generating reports.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to Report Selection (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load the fire events and the province geometry.
fn handle_load() {
    let (fires, report) = match loader::load_fires(FIRES_CSV) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load fire data: {}\n", e);
            return;
        }
    };
    println!(
        "Processing dataset... ({} rows read, {} fire events kept)",
        util::format_int(report.total_rows as i64),
        util::format_int(report.kept_rows as i64)
    );
    println!(
        "Note: {} rows skipped due to parse/validation errors, {} before {}, {} without coordinates.",
        util::format_int(report.parse_errors as i64),
        util::format_int(report.dropped_out_of_range as i64),
        loader::MIN_YEAR,
        util::format_int(report.dropped_no_coords as i64)
    );

    let geo = match GeoIndex::load(PROVINCES_GEOJSON) {
        Ok(geo) => geo,
        Err(e) => {
            eprintln!("Failed to load geometry: {}\n", e);
            return;
        }
    };
    println!(
        "Geometry ready: {} provinces, {} communities.\n",
        geo.province_count(),
        geo.community_names().len()
    );

    let mut state = APP_STATE.lock().unwrap();
    state.fires = Some(fires);
    state.geo = Some(geo);
}

/// Interactive equivalent of the dashboard filter card: an optional year
/// range and an optional community, ANDed together.
fn prompt_filters() -> FilterOptions {
    let mut opts = FilterOptions::default();
    if read_line("Filter by year range? (Y/N): ").to_uppercase() == "Y" {
        let min = read_line("  From year: ").parse::<i32>();
        let max = read_line("  To year: ").parse::<i32>();
        if let (Ok(min), Ok(max)) = (min, max) {
            opts.year_range = Some((min, max));
        } else {
            println!("  Invalid year range, ignoring.");
        }
    }
    let region = read_line("Community filter (blank for all): ");
    if !region.is_empty() {
        opts.region = Some(region);
    }
    let causes = read_line("Cause filter, comma separated (blank for all): ");
    if !causes.is_empty() {
        opts.causes = Some(
            causes
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect::<HashSet<_>>(),
        );
    }
    opts
}

/// Handle option [2]: apply filters, generate all reports and exports.
fn handle_generate_reports() {
    let fires = {
        let state = APP_STATE.lock().unwrap();
        state.fires.clone()
    };
    let Some(fires) = fires else {
        println!("Error: No data loaded. Please load the dataset first (option 1).\n");
        return;
    };

    let opts = prompt_filters();
    let filtered = if opts.is_unrestricted() {
        fires
    } else {
        opts.apply(&fires)
    };
    println!(
        "\nGenerating reports over {} events...\n",
        util::format_int(filtered.len() as i64)
    );

    let kpi = reports::kpi_summary(&filtered);
    if let Err(e) = output::write_json("kpi_summary.json", &kpi) {
        eprintln!("Write error: {}", e);
    }
    println!("KPIs (kpi_summary.json):");
    println!(
        "  Total fires: {}  Burned area: {}  Peak year: {}  Trend: {}\n",
        util::format_int(kpi.total_fires as i64),
        kpi.burned_area,
        kpi.peak_year.map_or("N/A".to_string(), |y| y.to_string()),
        kpi.trend
    );

    println!("Report 1: Annual Mean Burned Area by Region");
    match reports::regional_summary(&filtered) {
        Some(summary) => {
            let scope_note = match &summary.scope {
                RegionScope::Communities => "(Top communities, % of national area)".to_string(),
                RegionScope::Provinces { community } => {
                    format!("(Provinces of {}, % of its area)", community)
                }
            };
            println!("{}", scope_note);
            output::preview_table_rows(&summary.rows, 5);
            println!(
                "Mean annual area over reported regions: {} ha/year",
                util::format_number(summary.mean_annual_area, 1)
            );
            if let Err(e) = output::write_csv("regional_summary.csv", &summary.rows) {
                eprintln!("Write error: {}", e);
            }
            println!("(Full table exported to regional_summary.csv)\n");
        }
        None => println!("(no data to display)\n"),
    }

    println!("Report 2: Evolution of Fire Causes");
    match reports::cause_evolution(&filtered) {
        Some(evo) => {
            output::preview_table_rows(&evo.rows, 6);
            match &evo.shape {
                CauseChartShape::MultiYear { years, end_labels } => println!(
                    "Stacked-area shape: {} years, {} end labels.",
                    years.len(),
                    end_labels.len()
                ),
                CauseChartShape::SingleYear { year, segments } => println!(
                    "Single-year bar shape: {} with {} segments.",
                    year,
                    segments.len()
                ),
            }
            if let Err(e) = output::write_csv("cause_evolution.csv", &evo.rows) {
                eprintln!("Write error: {}", e);
            }
            println!("(Full table exported to cause_evolution.csv)\n");
        }
        None => println!("(no data to display)\n"),
    }

    println!("Report 3: Seasonal Burned-Area Density");
    match density::seasonal_density(&filtered) {
        Some(surface) => {
            println!(
                "Density surface: {} weeks -> {} x {} matrix, {} polar points.\n",
                surface.weeks.len(),
                surface.matrix.len(),
                density::GRID_POINTS,
                util::format_int(surface.polar_points().len() as i64)
            );
        }
        None => println!("(insufficient data for the seasonal distribution)\n"),
    }

    let totals = reports::province_area_totals(&filtered);
    if let Err(e) = output::write_csv("province_totals.csv", &totals) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "Choropleth data: {} provinces exported to province_totals.csv.",
        totals.len()
    );

    if let Some(community) = &opts.region {
        let markers = reports::large_fire_markers(&filtered, community);
        println!(
            "Large-fire markers in {}: {}.",
            community,
            util::format_int(markers.len() as i64)
        );
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    loop {
        println!("Spanish Wildfire Statistics");
        println!("[1] Load the dataset");
        println!("[2] Generate Reports\n");
        match read_line("Enter choice: ").as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!();
                handle_generate_reports();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
