pub mod catalog;
mod world;

pub use catalog::{Catalog, CatalogError, CatalogLoader, DatasetSource, LoadState};
pub use world::generate_simple_world;

use crate::map::{LineString, Lod, MapRenderer};
use anyhow::{Context, Result};
use geojson::{GeoJson, Geometry, Value};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Which renderer layer a GeoJSON file feeds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
    Coastline,
    Border,
}

/// Natural Earth files looked for in the data directory
const BASEMAP_FILES: [(&str, Layer, Lod); 6] = [
    ("ne_110m_coastline.json", Layer::Coastline, Lod::Low),
    ("ne_50m_coastline.json", Layer::Coastline, Lod::Medium),
    ("ne_10m_coastline.json", Layer::Coastline, Lod::High),
    ("ne_110m_borders.json", Layer::Border, Lod::Low),
    ("ne_50m_borders.json", Layer::Border, Lod::Medium),
    ("ne_10m_borders.json", Layer::Border, Lod::High),
];

/// Load every basemap file present in `data_dir`. Files parse in parallel;
/// one that fails is logged and skipped. Returns the number of files loaded.
pub fn load_basemap(renderer: &mut MapRenderer, data_dir: &Path) -> usize {
    let present: Vec<(PathBuf, Layer, Lod)> = BASEMAP_FILES
        .iter()
        .map(|(name, layer, lod)| (data_dir.join(name), *layer, *lod))
        .filter(|(path, _, _)| path.exists())
        .collect();

    let parsed: Vec<(Layer, Lod, Result<Vec<LineString>>)> = present
        .par_iter()
        .map(|(path, layer, lod)| (*layer, *lod, read_lines(path)))
        .collect();

    let mut loaded = 0;
    for ((path, _, _), (layer, lod, result)) in present.iter().zip(parsed) {
        match result {
            Ok(lines) => {
                info!(file = %path.display(), lines = lines.len(), "Loaded basemap layer");
                for line in lines {
                    match layer {
                        Layer::Coastline => renderer.add_coastline(line, lod),
                        Layer::Border => renderer.add_border(line, lod),
                    }
                }
                loaded += 1;
            }
            Err(e) => warn!(file = %path.display(), error = %e, "Failed to load basemap layer"),
        }
    }
    loaded
}

/// Read a GeoJSON file and flatten it to line strings
fn read_lines(path: &Path) -> Result<Vec<LineString>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("parsing {}", path.display()))?;
    let mut lines = Vec::new();
    collect_lines(&geojson, &mut |line| lines.push(line));
    Ok(lines)
}

/// Walk GeoJSON and hand every line-like ring to `add_line`
fn collect_lines<F>(geojson: &GeoJson, add_line: &mut F)
where
    F: FnMut(LineString),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    collect_geometry_lines(geometry, add_line);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                collect_geometry_lines(geometry, add_line);
            }
        }
        GeoJson::Geometry(geometry) => collect_geometry_lines(geometry, add_line),
    }
}

fn to_line(coords: &[Vec<f64>]) -> LineString {
    coords.iter().filter(|c| c.len() >= 2).map(|c| (c[0], c[1])).collect()
}

fn collect_geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(LineString),
{
    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => lines.iter().for_each(|l| add_line(to_line(l))),
        // Only exterior rings matter for an outline map
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                add_line(to_line(exterior));
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                if let Some(exterior) = rings.first() {
                    add_line(to_line(exterior));
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_geometry_lines(g, add_line);
            }
        }
        Value::Point(_) | Value::MultiPoint(_) => {}
    }
}
