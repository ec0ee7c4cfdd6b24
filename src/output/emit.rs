use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{WaterOverlays, region_id};
use crate::geometry::{Point, Scaler};
use crate::regions::ResolvedRegion;

/// Final build artifact: scaled rings keyed by region ID plus the scaled
/// water overlays. Assembled once per run, immutable afterwards.
#[derive(Debug, Serialize)]
pub struct OutputDocument {
    pub regions: BTreeMap<String, Vec<Point>>,
    pub water_overlays: Vec<Vec<Point>>,
}

/// Scale every resolved ring and overlay into target coordinates and
/// derive the public region IDs.
///
/// Families that normalized to the same base key were already merged by
/// the grouper; two *different* base keys colliding on one ID is a source
/// authoring problem, so the first ring is kept and a warning printed.
pub fn assemble(
    resolved: &[ResolvedRegion],
    overlays: &WaterOverlays,
    scaler: &Scaler,
) -> OutputDocument {
    let mut regions = BTreeMap::new();

    for region in resolved {
        let id = region_id(&region.label);
        if regions.contains_key(&id) {
            eprintln!("Warning: duplicate region id {}; keeping the first ring", id);
            continue;
        }
        regions.insert(id, scaler.scale_ring(&region.ring));
    }

    let water_overlays = overlays
        .shapes
        .iter()
        .map(|shape| scaler.scale_ring(shape))
        .collect();

    OutputDocument {
        regions,
        water_overlays,
    }
}

const MODULE_BANNER: &str = "// GENERATED FILE - produced by svg2map. Do not edit by hand.";

/// Write the generated ES module with the two exported constants the
/// renderer consumes.
pub fn write_module(path: &Path, document: &OutputDocument) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create module file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", MODULE_BANNER)?;
    writeln!(writer)?;
    writeln!(
        writer,
        "export const REGION_PATHS = {};",
        serde_json::to_string(&document.regions)?
    )?;
    writeln!(writer)?;
    writeln!(
        writer,
        "export const WATER_PATHS = {};",
        serde_json::to_string(&document.water_overlays)?
    )?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{build_families, resolve_families};
    use crate::svg::parse_groups;
    use std::fs;
    use tempfile::tempdir;

    fn reference_scaler() -> Scaler {
        Scaler::new((610.0, 560.0), (2000.0, 1400.0))
    }

    #[test]
    fn test_assemble_scales_and_names() {
        let resolved = vec![ResolvedRegion {
            label: "nwg".to_string(),
            ring: vec![
                Point::new(0.0, 0.0),
                Point::new(305.0, 0.0),
                Point::new(305.0, 280.0),
                Point::new(0.0, 0.0),
            ],
        }];

        let document = assemble(&resolved, &WaterOverlays::default(), &reference_scaler());
        let ring = document.regions.get("NRG").unwrap();
        assert_eq!(ring[2], Point::new(1000.0, 700.0));
    }

    #[test]
    fn test_assemble_duplicate_id_keeps_first() {
        let ring = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        let resolved = vec![
            ResolvedRegion {
                label: "Spa".to_string(),
                ring: ring.clone(),
            },
            ResolvedRegion {
                label: "SPA".to_string(),
                ring: vec![
                    Point::new(9.0, 9.0),
                    Point::new(10.0, 9.0),
                    Point::new(10.0, 10.0),
                    Point::new(9.0, 9.0),
                ],
            },
        ];

        let document = assemble(&resolved, &WaterOverlays::default(), &reference_scaler());
        assert_eq!(document.regions.len(), 1);
        assert_eq!(document.regions.get("SPA").unwrap()[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_write_module() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map-data.js");

        let document = OutputDocument {
            regions: BTreeMap::from([(
                "SPA".to_string(),
                vec![
                    Point::new(0.0, 0.0),
                    Point::new(1.0, 0.0),
                    Point::new(1.0, 1.0),
                    Point::new(0.0, 0.0),
                ],
            )]),
            water_overlays: vec![vec![Point::new(2.0, 2.0), Point::new(3.0, 3.0)]],
        };

        write_module(&path, &document).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("// GENERATED FILE"));
        assert!(contents.contains("export const REGION_PATHS = {\"SPA\":"));
        assert!(contents.contains("export const WATER_PATHS = ["));
        assert!(contents.contains("\"x\":1.0"));
    }

    #[test]
    fn test_end_to_end_coastal_merge() {
        let svg = r#"<svg viewBox="0 0 610 560">
            <g title="Spain (nc)">
                <text x="5" y="5">Spa</text>
                <polyline points="0,0 10,0 10,10"/>
            </g>
            <g title="Spain (sc)">
                <text x="5" y="5">Spa</text>
                <polyline points="10,10 0,10 0,0"/>
            </g>
        </svg>"#;

        let groups = parse_groups(svg).unwrap();
        let grouping = build_families(&groups, 0.5, 12);
        assert_eq!(grouping.discovered, 1);

        let resolved = resolve_families(&grouping.families, 0.5);
        assert_eq!(resolved.len(), 1);

        let document = assemble(&resolved, &grouping.water_overlays, &reference_scaler());
        assert_eq!(document.regions.len(), 1);

        let ring = document.regions.get("SPA").unwrap();
        assert!(ring.len() >= 5);
        assert_eq!(ring.first(), ring.last());
    }
}
