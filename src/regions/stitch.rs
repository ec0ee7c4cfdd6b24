use crate::domain::RegionFamily;
use crate::geometry::{Point, convex_hull, points_equal, ring_area};

/// A region whose ring resolution succeeded, still in source coordinates.
#[derive(Debug, Clone)]
pub struct ResolvedRegion {
    pub label: String,
    pub ring: Vec<Point>,
}

/// Resolve one best-effort ring per family. Families whose geometry is
/// unrecoverable are omitted; resolution never fails the run.
pub fn resolve_families(families: &[RegionFamily], tolerance: f64) -> Vec<ResolvedRegion> {
    let mut resolved = Vec::new();

    for family in families {
        let Some(label) = &family.label else { continue };
        if let Some(ring) = resolve_ring(family, tolerance) {
            resolved.push(ResolvedRegion {
                label: label.clone(),
                ring,
            });
        }
    }

    resolved
}

/// Resolve a single closed ring for a family, trying in order: largest
/// explicit polygon, greedy polyline stitching, convex-hull fallback.
/// Returns `None` when no geometry is recoverable at all.
pub fn resolve_ring(family: &RegionFamily, tolerance: f64) -> Option<Vec<Point>> {
    // Explicit polygon priority: the largest area wins, guarding against
    // tiny decorative closed shapes coexisting with the true outline.
    if let Some(best) = family
        .raw_polygons
        .iter()
        .max_by(|a, b| ring_area(a).total_cmp(&ring_area(b)))
    {
        return Some(close_ring(best.clone(), tolerance));
    }

    if !family.raw_polylines.is_empty() {
        let stitched = stitch_polylines(&family.raw_polylines, tolerance);
        if stitched.len() >= 3 {
            return Some(close_ring(stitched, tolerance));
        }
    }

    hull_fallback(family, tolerance)
}

/// Greedily join open polylines into one path by shared endpoints.
///
/// Candidates are tried longest-first; the longest seeds the ring. Every
/// successful splice restarts the scan from the first remaining
/// candidate. Greedy and non-backtracking: a join order that only a full
/// graph matching would find is not attempted, so a family whose pieces
/// never meet within tolerance stitches only a subset.
fn stitch_polylines(polylines: &[Vec<Point>], tolerance: f64) -> Vec<Point> {
    let mut candidates: Vec<Vec<Point>> = polylines.to_vec();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut ring = candidates.remove(0);

    loop {
        let mut progressed = false;

        for i in 0..candidates.len() {
            let head = ring[0];
            let tail = ring[ring.len() - 1];
            let first = candidates[i][0];
            let last = candidates[i][candidates[i].len() - 1];

            if points_equal(first, tail, tolerance) {
                let cand = candidates.remove(i);
                ring.extend(cand.into_iter().skip(1));
            } else if points_equal(last, tail, tolerance) {
                let cand = candidates.remove(i);
                ring.extend(cand.into_iter().rev().skip(1));
            } else if points_equal(last, head, tolerance) {
                let mut cand = candidates.remove(i);
                cand.pop();
                cand.extend(ring.iter().copied());
                ring = cand;
            } else if points_equal(first, head, tolerance) {
                let cand = candidates.remove(i);
                let mut reversed: Vec<Point> = cand.into_iter().rev().collect();
                reversed.pop();
                reversed.extend(ring.iter().copied());
                ring = reversed;
            } else {
                continue;
            }

            progressed = true;
            break;
        }

        if !progressed || candidates.is_empty() {
            break;
        }
    }

    ring
}

/// Append a copy of the first point unless the ring already closes
/// within tolerance.
fn close_ring(mut ring: Vec<Point>, tolerance: f64) -> Vec<Point> {
    if ring.len() >= 3 && !points_equal(ring[0], ring[ring.len() - 1], tolerance) {
        ring.push(ring[0]);
    }
    ring
}

/// Flatten every point the family has into one multiset and take its
/// convex hull. Discards concavities; used only when nothing better is
/// possible.
fn hull_fallback(family: &RegionFamily, tolerance: f64) -> Option<Vec<Point>> {
    let mut all: Vec<Point> = family.raw_polylines.iter().flatten().copied().collect();
    all.extend(family.raw_polygons.iter().flatten().copied());

    if all.len() < 3 {
        return None;
    }

    let hull = convex_hull(&all);
    if hull.len() < 3 {
        return None;
    }
    Some(close_ring(hull, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 0.5;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn family_with(polygons: Vec<Vec<Point>>, polylines: Vec<Vec<Point>>) -> RegionFamily {
        RegionFamily {
            base_key: "Test".to_string(),
            label: Some("Tst".to_string()),
            raw_polygons: polygons,
            raw_polylines: polylines,
            ..Default::default()
        }
    }

    #[test]
    fn test_largest_polygon_wins() {
        let small = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let large = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let family = family_with(vec![small, large.clone()], vec![]);

        let ring = resolve_ring(&family, TOL).unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[..4], large[..]);
        assert_eq!(ring[4], large[0]);
    }

    #[test]
    fn test_polygons_beat_polylines() {
        let polygon = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let polylines = vec![
            pts(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0), (0.0, 0.0)]),
            pts(&[(30.0, 30.0), (40.0, 40.0)]),
        ];
        let family = family_with(vec![polygon.clone()], polylines);

        let ring = resolve_ring(&family, TOL).unwrap();
        assert_eq!(ring[..3], polygon[..]);
    }

    #[test]
    fn test_already_closed_polyline_unchanged() {
        let closed = pts(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 0.0)]);
        let family = family_with(vec![], vec![closed.clone()]);

        let ring = resolve_ring(&family, TOL).unwrap();
        assert_eq!(ring, closed);
    }

    #[test]
    fn test_join_two_open_polylines() {
        let a = pts(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = pts(&[(1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let family = family_with(vec![], vec![a, b]);

        let ring = resolve_ring(&family, TOL).unwrap();
        assert_eq!(ring.len(), 4);
        assert!(points_equal(ring[0], ring[3], TOL));
        for expected in pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]) {
            assert!(ring.iter().any(|p| points_equal(*p, expected, 1e-9)));
        }
    }

    #[test]
    fn test_stitch_with_tolerance_noise() {
        // Endpoints differ by export noise below the 0.5 tolerance.
        let a = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let b = pts(&[(10.2, 0.1), (10.0, 10.0), (0.1, 0.2)]);
        let family = family_with(vec![], vec![a, b]);

        let ring = resolve_ring(&family, TOL).unwrap();
        assert!(ring.len() >= 4);
        assert!(points_equal(ring[0], ring[ring.len() - 1], TOL));
    }

    #[test]
    fn test_reversed_candidate_spliced() {
        let a = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        // Shares its *first* point with the ring's tail only after
        // reversal.
        let b = pts(&[(0.0, 10.0), (10.0, 10.0)]);
        let family = family_with(vec![], vec![a, b]);

        let ring = resolve_ring(&family, TOL).unwrap();
        assert!(ring.iter().any(|p| points_equal(*p, Point::new(0.0, 10.0), 1e-9)));
        assert!(points_equal(ring[0], ring[ring.len() - 1], TOL));
    }

    #[test]
    fn test_disconnected_pieces_stitch_subset() {
        let a = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let b = pts(&[(50.0, 50.0), (60.0, 50.0)]);
        let family = family_with(vec![], vec![a, b]);

        // The far-away piece cannot join; the seed is force-closed alone.
        let ring = resolve_ring(&family, TOL).unwrap();
        assert_eq!(ring.len(), 4);
        assert!(points_equal(ring[0], ring[3], TOL));
    }

    #[test]
    fn test_degenerate_stitch_falls_back_to_hull() {
        // A single two-point polyline cannot form a ring; the hull over
        // all points is also degenerate, so the family is omitted.
        let family = family_with(vec![], vec![pts(&[(0.0, 0.0), (10.0, 0.0)])]);
        assert!(resolve_ring(&family, TOL).is_none());
    }

    #[test]
    fn test_hull_fallback_over_scattered_points() {
        let family = family_with(
            vec![],
            vec![
                pts(&[(0.0, 0.0), (10.0, 0.0)]),
                pts(&[(20.0, 20.0), (0.0, 20.0)]),
            ],
        );

        // Pieces share no endpoints, stitching keeps the seed, which has
        // only two points after the scan: hull fallback covers all four.
        let ring = resolve_ring(&family, TOL);
        assert!(ring.is_some());
        let ring = ring.unwrap();
        assert!(ring.len() >= 4);
        assert!(points_equal(ring[0], ring[ring.len() - 1], TOL));
    }

    #[test]
    fn test_no_geometry_omitted() {
        let family = family_with(vec![], vec![]);
        assert!(resolve_ring(&family, TOL).is_none());
    }
}
