use crate::geometry::Point;

/// All raw geometry belonging to one logical map region, merged across
/// its coastal-variant groups, before ring resolution.
#[derive(Debug, Clone, Default)]
pub struct RegionFamily {
    /// Canonical identifier: the raw group title with any coastal-variant
    /// suffix stripped.
    pub base_key: String,
    /// Raw titles of every group merged into this family.
    pub variants: Vec<String>,
    /// First text label found among the family's groups. Families that
    /// never find one are decorative and get dropped.
    pub label: Option<String>,
    /// Closed point lists from explicit polygon declarations.
    pub raw_polygons: Vec<Vec<Point>>,
    /// Open or closed point lists from explicit strokes and tessellated
    /// paths.
    pub raw_polylines: Vec<Vec<Point>>,
    /// True when any primitive in the family carried a land marker.
    pub has_land_marker: bool,
}

impl RegionFamily {
    pub fn new(base_key: String) -> Self {
        Self {
            base_key,
            ..Default::default()
        }
    }
}

/// Known abbreviation corrections applied after uppercasing a label.
/// Literal table; must not grow by inference.
const ID_CORRECTIONS: &[(&str, &str)] = &[
    ("NWG", "NRG"),
    ("LYO", "GOL"),
    ("NAO", "NAT"),
    ("MAO", "MID"),
];

/// Derive the public region ID from a discovered label.
pub fn region_id(label: &str) -> String {
    let upper = label.trim().to_uppercase();
    for &(discovered, emitted) in ID_CORRECTIONS {
        if upper == discovered {
            return emitted.to_string();
        }
    }
    upper
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_id_corrections() {
        assert_eq!(region_id("nwg"), "NRG");
        assert_eq!(region_id("NWG"), "NRG");
        assert_eq!(region_id("Lyo"), "GOL");
        assert_eq!(region_id("NAO"), "NAT");
        assert_eq!(region_id("mao"), "MID");
    }

    #[test]
    fn test_region_id_passthrough() {
        assert_eq!(region_id("Bel"), "BEL");
        assert_eq!(region_id("STP"), "STP");
        assert_eq!(region_id(" spa "), "SPA");
    }
}
