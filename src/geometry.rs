// Province boundary geometry for the map consumer.
//
// Loads the province GeoJSON once at startup, validates rings, computes
// planar centroids and dissolves provinces into per-CCAA centroids. The
// renderer only ever needs name-keyed centroid lookups plus the raw
// exterior rings for outline drawing; nothing here feeds the statistical
// transforms.
use crate::error::DataError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub lon: f64,
    pub lat: f64,
}

/// One province: exterior rings plus its own and its community's centroid.
#[derive(Debug, Clone)]
pub struct ProvinceGeometry {
    pub name: String,
    pub community: String,
    /// Exterior rings as closed (lon, lat) sequences.
    pub rings: Vec<Vec<(f64, f64)>>,
    pub centroid: Centroid,
    pub community_centroid: Centroid,
    area: f64,
}

/// Name-keyed geometry lookups at both administrative levels.
#[derive(Debug, Clone)]
pub struct GeoIndex {
    provinces: HashMap<String, ProvinceGeometry>,
    community_centroids: HashMap<String, Centroid>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: RawGeometry,
}

#[derive(Deserialize)]
struct FeatureProperties {
    #[serde(rename = "Texto_Alt")]
    name: String,
    #[serde(rename = "CCAA")]
    community: String,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
}

impl GeoIndex {
    /// Parse the province GeoJSON and build both lookup levels. A missing
    /// or geometrically empty source is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<GeoIndex, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::MissingSource(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let collection: FeatureCollection = serde_json::from_str(&raw)?;
        let index = Self::from_features(collection)?;
        info!(
            provinces = index.provinces.len(),
            communities = index.community_centroids.len(),
            "loaded geometry from {}",
            path.display()
        );
        Ok(index)
    }

    fn from_features(collection: FeatureCollection) -> Result<GeoIndex, DataError> {
        let mut provinces: HashMap<String, ProvinceGeometry> = HashMap::new();
        for feature in collection.features {
            let name = feature.properties.name;
            let rings = exterior_rings(feature.geometry);
            let Some((centroid, area)) = rings_centroid(&rings) else {
                warn!(province = %name, "dropping feature with degenerate geometry");
                continue;
            };
            provinces.insert(
                name.clone(),
                ProvinceGeometry {
                    name,
                    community: feature.properties.community,
                    rings,
                    centroid,
                    community_centroid: centroid, // refined below
                    area,
                },
            );
        }
        if provinces.is_empty() {
            return Err(DataError::Geometry(
                "no valid province features in source".to_string(),
            ));
        }

        // Dissolve: community centroid is the area-weighted mean of its
        // member province centroids.
        let mut acc: HashMap<String, (f64, f64, f64)> = HashMap::new();
        for prov in provinces.values() {
            let e = acc.entry(prov.community.clone()).or_insert((0.0, 0.0, 0.0));
            e.0 += prov.centroid.lon * prov.area;
            e.1 += prov.centroid.lat * prov.area;
            e.2 += prov.area;
        }
        let community_centroids: HashMap<String, Centroid> = acc
            .into_iter()
            .map(|(name, (lon, lat, area))| {
                (
                    name,
                    Centroid {
                        lon: lon / area,
                        lat: lat / area,
                    },
                )
            })
            .collect();
        for prov in provinces.values_mut() {
            if let Some(&c) = community_centroids.get(&prov.community) {
                prov.community_centroid = c;
            }
        }

        Ok(GeoIndex {
            provinces,
            community_centroids,
        })
    }

    pub fn province(&self, name: &str) -> Option<&ProvinceGeometry> {
        self.provinces.get(name)
    }

    pub fn community_centroid(&self, name: &str) -> Option<Centroid> {
        self.community_centroids.get(name).copied()
    }

    pub fn province_count(&self) -> usize {
        self.provinces.len()
    }

    /// Sorted community names, as offered in the dashboard's region picker.
    pub fn community_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.community_centroids.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Collect the exterior ring of every polygon, closing open rings and
/// dropping ones too small to bound an area.
fn exterior_rings(geometry: RawGeometry) -> Vec<Vec<(f64, f64)>> {
    let raw_rings: Vec<Vec<Vec<f64>>> = match geometry {
        RawGeometry::Polygon { mut coordinates } => {
            if coordinates.is_empty() {
                Vec::new()
            } else {
                vec![coordinates.swap_remove(0)]
            }
        }
        RawGeometry::MultiPolygon { coordinates } => coordinates
            .into_iter()
            .filter_map(|mut polygon| {
                if polygon.is_empty() {
                    None
                } else {
                    Some(polygon.swap_remove(0))
                }
            })
            .collect(),
    };

    raw_rings
        .into_iter()
        .filter_map(|ring| {
            let mut points: Vec<(f64, f64)> = ring
                .into_iter()
                .filter(|p| p.len() >= 2)
                .map(|p| (p[0], p[1]))
                .collect();
            if points.len() < 3 {
                return None;
            }
            if points.first() != points.last() {
                let first = points[0];
                points.push(first);
            }
            Some(points)
        })
        .collect()
}

/// Area-weighted centroid over a set of closed rings via the shoelace
/// formula. `None` when the total area degenerates to zero.
fn rings_centroid(rings: &[Vec<(f64, f64)>]) -> Option<(Centroid, f64)> {
    let mut total_area = 0.0;
    let mut lon_acc = 0.0;
    let mut lat_acc = 0.0;
    for ring in rings {
        let Some((c, area)) = ring_centroid(ring) else {
            continue;
        };
        lon_acc += c.lon * area;
        lat_acc += c.lat * area;
        total_area += area;
    }
    if total_area <= f64::EPSILON {
        return None;
    }
    Some((
        Centroid {
            lon: lon_acc / total_area,
            lat: lat_acc / total_area,
        },
        total_area,
    ))
}

fn ring_centroid(ring: &[(f64, f64)]) -> Option<(Centroid, f64)> {
    let mut signed_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for pair in ring.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let cross = x0 * y1 - x1 * y0;
        signed_area += cross;
        cx += (x0 + x1) * cross;
        cy += (y0 + y1) * cross;
    }
    signed_area /= 2.0;
    if signed_area.abs() <= f64::EPSILON {
        return None;
    }
    Some((
        Centroid {
            lon: cx / (6.0 * signed_area),
            lat: cy / (6.0 * signed_area),
        },
        signed_area.abs(),
    ))
}
