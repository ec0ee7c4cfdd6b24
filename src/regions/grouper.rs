use std::collections::HashMap;

use crate::domain::{RegionFamily, WaterOverlays};
use crate::svg::path::tessellate_path;
use crate::svg::{MapGroup, RawShape};

/// Result of folding the document's groups into region families.
#[derive(Debug)]
pub struct GroupingResult {
    /// Labeled families, in document order.
    pub families: Vec<RegionFamily>,
    /// Primitives diverted out of land-marked groups.
    pub water_overlays: WaterOverlays,
    /// Families discovered before the label filter, for the run summary.
    pub discovered: usize,
}

/// Merge parsed groups into region families keyed by coastal-stripped
/// base title.
///
/// The first label found among a family's groups wins. Within a group
/// that carries a land marker, every water-marked primitive is diverted
/// to the overlay collection instead of the family. That rule is
/// deliberately per-group: a water-marked primitive in a group without a
/// land marker stays with its family.
pub fn build_families(groups: &[MapGroup], tolerance: f64, arc_segments: usize) -> GroupingResult {
    let mut families: Vec<RegionFamily> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut water_overlays = WaterOverlays::default();

    for group in groups {
        let base_key = strip_coastal_suffix(&group.title);
        let idx = match index.get(&base_key) {
            Some(&i) => i,
            None => {
                families.push(RegionFamily::new(base_key.clone()));
                index.insert(base_key, families.len() - 1);
                families.len() - 1
            }
        };

        let family = &mut families[idx];
        family.variants.push(group.title.clone());
        if family.label.is_none()
            && let Some(label) = &group.label
        {
            family.label = Some(label.clone());
        }

        let group_has_land = group.primitives.iter().any(|p| p.land);
        family.has_land_marker |= group_has_land;

        for prim in &group.primitives {
            let (points, is_polygon) = match &prim.shape {
                RawShape::Polygon(points) => (points.clone(), true),
                RawShape::Polyline(points) => (points.clone(), false),
                RawShape::Path(data) => match tessellate_path(data, tolerance, arc_segments) {
                    Some(points) => (points, false),
                    None => continue,
                },
            };

            if group_has_land && prim.water {
                water_overlays.push(points);
            } else if is_polygon {
                family.raw_polygons.push(points);
            } else {
                family.raw_polylines.push(points);
            }
        }
    }

    let discovered = families.len();
    families.retain(|f| f.label.is_some());

    GroupingResult {
        families,
        water_overlays,
        discovered,
    }
}

/// Strip a trailing parenthesized short code (1-3 alphanumerics, any
/// case) from a group title: `"Spain (nc)"` -> `"Spain"`.
fn strip_coastal_suffix(title: &str) -> String {
    let title = title.trim();

    if title.ends_with(')')
        && let Some(open) = title.rfind('(')
    {
        let inner = &title[open + 1..title.len() - 1];
        if (1..=3).contains(&inner.len()) && inner.chars().all(|c| c.is_ascii_alphanumeric()) {
            return title[..open].trim_end().to_string();
        }
    }

    title.to_string()
}
