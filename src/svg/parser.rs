use roxmltree::{Document, Node};
use thiserror::Error;

use crate::geometry::Point;

/// Document-level parse failures. Primitive-level problems (malformed
/// point lists, unsupported path commands) are not errors; those
/// primitives are silently skipped.
#[derive(Debug, Error)]
pub enum SvgMapError {
    #[error("failed to parse map document: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("expected an <svg> root element, found <{0}>")]
    NotSvg(String),
}

/// One raw vector primitive found inside a logical group, with its
/// land/water classification markers.
#[derive(Debug, Clone)]
pub struct RawPrimitive {
    pub shape: RawShape,
    pub land: bool,
    pub water: bool,
}

#[derive(Debug, Clone)]
pub enum RawShape {
    /// Explicit closed-shape point list.
    Polygon(Vec<Point>),
    /// Explicit stroke point list, open or closed.
    Polyline(Vec<Point>),
    /// Raw path-command string, tessellated later.
    Path(String),
}

/// A titled `<g>` element with its first text label and collected
/// primitives.
#[derive(Debug, Clone)]
pub struct MapGroup {
    pub title: String,
    pub label: Option<String>,
    pub primitives: Vec<RawPrimitive>,
}

/// Scan the document for logical groups.
///
/// A logical group is a `<g>` element carrying a title: a `title`
/// attribute, else a `<title>` child element, else an `id` attribute.
/// Untitled `<g>` elements are decoration and are skipped. Primitives
/// nested inside a different titled group belong to that group, not to
/// an outer one.
pub fn parse_groups(text: &str) -> Result<Vec<MapGroup>, SvgMapError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(SvgMapError::NotSvg(root.tag_name().name().to_string()));
    }

    let mut groups = Vec::new();
    for node in root.descendants().filter(|n| n.tag_name().name() == "g") {
        if let Some(title) = group_title(&node) {
            groups.push(scan_group(&node, title));
        }
    }
    Ok(groups)
}

fn group_title(group: &Node) -> Option<String> {
    if let Some(title) = group.attribute("title") {
        let title = title.trim();
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    for child in group.children() {
        if child.tag_name().name() == "title"
            && let Some(text) = child.text()
        {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    group
        .attribute("id")
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

fn scan_group(group: &Node, title: String) -> MapGroup {
    let mut label = None;
    let mut primitives = Vec::new();

    for node in group.descendants() {
        if !node.is_element() || node.id() == group.id() || !owned_by(group, &node) {
            continue;
        }

        match node.tag_name().name() {
            "polygon" => {
                if let Some(points) = node.attribute("points").and_then(parse_point_list)
                    && points.len() >= 3
                {
                    primitives.push(primitive(&node, RawShape::Polygon(points)));
                }
            }
            "polyline" => {
                if let Some(points) = node.attribute("points").and_then(parse_point_list)
                    && points.len() >= 2
                {
                    primitives.push(primitive(&node, RawShape::Polyline(points)));
                }
            }
            "path" => {
                if let Some(data) = node.attribute("d") {
                    primitives.push(primitive(&node, RawShape::Path(data.to_string())));
                }
            }
            "text" => {
                if label.is_none() {
                    let content: String = node
                        .descendants()
                        .filter(|n| n.is_text())
                        .filter_map(|n| n.text())
                        .collect();
                    let content = content.trim();
                    if !content.is_empty() {
                        label = Some(content.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    MapGroup {
        title,
        label,
        primitives,
    }
}

/// True when `node`'s nearest titled `<g>` ancestor is `group`.
fn owned_by(group: &Node, node: &Node) -> bool {
    for ancestor in node.ancestors().skip(1) {
        if ancestor.tag_name().name() == "g" && group_title(&ancestor).is_some() {
            return ancestor.id() == group.id();
        }
    }
    false
}

fn primitive(node: &Node, shape: RawShape) -> RawPrimitive {
    let mut land = false;
    let mut water = false;

    if let Some(class) = node.attribute("class") {
        for token in class.split_whitespace() {
            if token.eq_ignore_ascii_case("land") || token.eq_ignore_ascii_case("l") {
                land = true;
            }
            if token.eq_ignore_ascii_case("water") || token.eq_ignore_ascii_case("w") {
                water = true;
            }
        }
    }

    RawPrimitive { shape, land, water }
}

/// Parse a `points` attribute into a point list. Returns `None` on any
/// failed numeric parse or an odd coordinate count; the whole primitive
/// then contributes nothing.
fn parse_point_list(raw: &str) -> Option<Vec<Point>> {
    let mut numbers = Vec::new();
    for token in raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        numbers.push(token.parse::<f64>().ok()?);
    }

    if numbers.len() < 2 || numbers.len() % 2 != 0 {
        return None;
    }

    Some(
        numbers
            .chunks(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect(),
    )
}
