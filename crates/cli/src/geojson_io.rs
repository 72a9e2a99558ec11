//! GeoJSON adapters for crossing features
//!
//! Crossing lines and horseshoe quads arrive as (Multi)LineString features;
//! sampled output lines are written back with 3D positions.

use std::path::Path;

use anyhow::{bail, Context, Result};
use geo_types::{Coord, LineString};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use tracing::warn;

use hydroburn_core::vector::{LineZ, Point3};

/// Read all 2D line strings from a GeoJSON file
pub fn read_line_features(path: &Path) -> Result<Vec<LineString<f64>>> {
    let mut lines = Vec::new();
    for positions in read_line_positions(path)? {
        let coords: Vec<Coord<f64>> = positions
            .iter()
            .filter(|p| p.len() >= 2)
            .map(|p| Coord { x: p[0], y: p[1] })
            .collect();
        lines.push(LineString::from(coords));
    }
    Ok(lines)
}

/// Read 3D line strings from a GeoJSON file.
///
/// Every position must carry a z coordinate; these files are produced by
/// the sampling commands.
pub fn read_line_z_features(path: &Path) -> Result<Vec<LineZ>> {
    let mut lines = Vec::new();
    for positions in read_line_positions(path)? {
        let mut points = Vec::with_capacity(positions.len());
        for p in &positions {
            if p.len() < 3 {
                bail!(
                    "{}: line feature has a position without a z coordinate; \
                     run a sampling command first",
                    path.display()
                );
            }
            points.push(Point3::new(p[0], p[1], p[2]));
        }
        lines.push(LineZ::new(points));
    }
    Ok(lines)
}

/// Write 3D lines as a GeoJSON feature collection
pub fn write_line_z_features(path: &Path, lines: &[LineZ]) -> Result<()> {
    let features = lines
        .iter()
        .map(|line| {
            let positions = line
                .points()
                .iter()
                .map(|p| vec![p.x, p.y, p.z])
                .collect();
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::LineString(positions))),
                id: None,
                properties: None,
                foreign_members: None,
            }
        })
        .collect();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    std::fs::write(path, GeoJson::from(collection).to_string())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Raw line string position lists from any GeoJSON document shape
fn read_line_positions(path: &Path) -> Result<Vec<Vec<Vec<f64>>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let geojson: GeoJson = text
        .parse()
        .with_context(|| format!("{} is not valid GeoJSON", path.display()))?;

    let mut positions = Vec::new();
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                if let Some(geometry) = feature.geometry {
                    collect_line_positions(geometry.value, &mut positions);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = feature.geometry {
                collect_line_positions(geometry.value, &mut positions);
            }
        }
        GeoJson::Geometry(geometry) => collect_line_positions(geometry.value, &mut positions),
    }
    Ok(positions)
}

fn collect_line_positions(value: Value, out: &mut Vec<Vec<Vec<f64>>>) {
    match value {
        Value::LineString(positions) => out.push(positions),
        Value::MultiLineString(parts) => out.extend(parts),
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_line_positions(geometry.value, out);
            }
        }
        other => {
            warn!(geometry = other.type_name(), "skipping non-line geometry");
        }
    }
}
