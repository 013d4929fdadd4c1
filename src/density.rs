// Seasonal burned-area density surface.
//
// For every ISO week with qualifying fires (> 20 ha) a 1D Gaussian kernel
// density estimate is computed over a fixed burned-area grid and scaled by
// the week's mean burned area, so high-magnitude weeks stand out. The
// scaling makes this a visualization surface, not a true probability
// density. Rows are doubled with midpoints to the next week (wrapping to
// the first week), and the whole matrix is square-root compressed.
use crate::lookup::MONTH_LABELS;
use crate::types::FireEvent;
use crate::util::{linspace, mean, percentile, sample_std};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use tracing::debug;

/// Only fires above this burned area feed the seasonal surface.
pub const AREA_THRESHOLD_HA: f64 = 20.0;
/// Number of burned-area grid points per row.
pub const GRID_POINTS: usize = 500;
/// Fewer distinct weeks than this cannot support the surface.
const MIN_WEEKS: usize = 3;
/// Grid upper bound: 99th percentile clamped into [100, 1000] ha.
const GRID_CEILING_HA: f64 = 1000.0;
const GRID_FLOOR_HA: f64 = 100.0;
/// Scott's rule bandwidth exponent for 1D data.
const SCOTT_EXPONENT: f64 = -0.2;

/// Computed density surface. `matrix` has `2 * weeks.len()` rows: even rows
/// are per-week estimates, odd rows are midpoints to the following week.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalDensity {
    /// Distinct qualifying ISO weeks, ascending.
    pub weeks: Vec<u32>,
    /// Burned-area grid, `GRID_POINTS` values from 0 to the clamped p99.
    pub grid: Vec<f64>,
    pub matrix: Vec<Vec<f64>>,
}

/// One sample of the polar remapping of the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarPoint {
    /// Row angle in degrees, rows equally spaced around a full circle.
    pub angle_deg: f64,
    /// Burned area (the grid value), used as radius.
    pub radius: f64,
    pub intensity: f64,
    /// Originating ISO week of the row.
    pub week: u32,
}

/// Build the seasonal density surface, or `None` when fewer than three
/// distinct weeks have qualifying fires.
pub fn seasonal_density(events: &[FireEvent]) -> Option<SeasonalDensity> {
    let mut by_week: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    let mut all_areas: Vec<f64> = Vec::new();
    for ev in events {
        if let Some(area) = ev.burned_area {
            if area > AREA_THRESHOLD_HA {
                by_week.entry(ev.iso_week).or_default().push(area);
                all_areas.push(area);
            }
        }
    }

    let n_weeks = by_week.len();
    if n_weeks < MIN_WEEKS {
        debug!(weeks = n_weeks, "insufficient weeks for density surface");
        return None;
    }

    let max_area = percentile(&all_areas, 99.0)
        .min(GRID_CEILING_HA)
        .max(GRID_FLOOR_HA);
    let grid = linspace(0.0, max_area, GRID_POINTS);
    let weeks: Vec<u32> = by_week.keys().copied().collect();
    let mut matrix = vec![vec![0.0_f64; GRID_POINTS]; 2 * n_weeks];

    for (i, samples) in by_week.values().enumerate() {
        let week_mean = mean(samples);
        if samples.len() > 1 {
            // Singular sample sets (zero variance) leave the row at zero.
            if let Some(densities) = gaussian_kde_row(samples, &grid) {
                for (j, d) in densities.into_iter().enumerate() {
                    matrix[2 * i][j] = d * week_mean;
                }
            }
        } else {
            // A single observation gets its full weight at the nearest
            // grid point instead of a degenerate estimate.
            let target = samples[0];
            let nearest = nearest_grid_index(&grid, target);
            matrix[2 * i][nearest] = week_mean;
        }
    }

    // Midpoint rows: element-wise average with the next week, wrapping
    // around to the first week after the last one.
    for i in 0..n_weeks {
        let next = (2 * i + 2) % (2 * n_weeks);
        let mid: Vec<f64> = (0..GRID_POINTS)
            .map(|j| (matrix[2 * i][j] + matrix[next][j]) / 2.0)
            .collect();
        matrix[2 * i + 1] = mid;
    }

    // Square-root compression for display, only when there is signal.
    if matrix.iter().flatten().any(|&v| v > 0.0) {
        for row in &mut matrix {
            for v in row.iter_mut() {
                *v = v.sqrt();
            }
        }
    }

    Some(SeasonalDensity {
        weeks,
        grid,
        matrix,
    })
}

impl SeasonalDensity {
    /// Y-axis labels of the cartesian surface: each week appears twice,
    /// once for its own row and once for the midpoint row.
    pub fn row_weeks(&self) -> Vec<u32> {
        self.weeks.iter().flat_map(|&w| [w, w]).collect()
    }

    /// Polar remapping of the identical matrix: each row maps to an equally
    /// spaced angle around the circle, each grid column to a radius.
    /// Emits exactly `rows * GRID_POINTS` points.
    pub fn polar_points(&self) -> Vec<PolarPoint> {
        let rows = self.matrix.len();
        let step = 360.0 / rows as f64;
        let mut points = Vec::with_capacity(rows * self.grid.len());
        for (i, row) in self.matrix.iter().enumerate() {
            let angle_deg = step * i as f64;
            let week = self.weeks[i / 2];
            for (j, &intensity) in row.iter().enumerate() {
                points.push(PolarPoint {
                    angle_deg,
                    radius: self.grid[j],
                    intensity,
                    week,
                });
            }
        }
        points
    }

    /// Angular tick positions for the polar consumer: twelve month labels
    /// equally spaced around the circle.
    pub fn month_ticks() -> Vec<(f64, &'static str)> {
        MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(i, &label)| (i as f64 * 360.0 / 12.0, label))
            .collect()
    }
}

fn nearest_grid_index(grid: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, &x) in grid.iter().enumerate() {
        let dist = (x - target).abs();
        if dist < best_dist {
            best_dist = dist;
            best = j;
        }
    }
    best
}

/// Gaussian KDE over `grid` with Scott's-rule bandwidth. Returns `None`
/// when the sample spread cannot support a bandwidth (zero variance).
fn gaussian_kde_row(samples: &[f64], grid: &[f64]) -> Option<Vec<f64>> {
    let n = samples.len() as f64;
    let sigma = sample_std(samples);
    if !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }
    let bandwidth = sigma * n.powf(SCOTT_EXPONENT);
    let norm = 1.0 / (n * bandwidth * (2.0 * PI).sqrt());
    Some(
        grid.iter()
            .map(|&x| {
                samples
                    .iter()
                    .map(|&xi| {
                        let z = (x - xi) / bandwidth;
                        (-0.5 * z * z).exp()
                    })
                    .sum::<f64>()
                    * norm
            })
            .collect(),
    )
}
