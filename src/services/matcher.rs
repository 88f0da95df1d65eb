//! Hole-diameter matching against a reference catalog.

use crate::error::{AcousticsError, Result};
use crate::models::{Catalog, HoleCorrespondence, HoleMeasurement, Match};

/// Finds every (hole, item) pair whose diameters differ by at most `tolerance` mm.
///
/// Matches come out in discovery order: holes ascending, and within a hole the
/// catalog's insertion order. No ranking is applied; use
/// [`best_matches_per_hole`] for that. A hole with no compatible item simply
/// contributes nothing.
///
/// # Errors
///
/// Returns `InvalidArgument` if `tolerance` is negative or NaN.
///
/// # Examples
///
/// ```
/// use dodecasim::models::{Catalog, HoleMeasurement, ReferenceItem};
/// use dodecasim::services::matcher::find_matches;
///
/// let holes = HoleMeasurement::new(vec![26.0, 21.5, 16.5]).unwrap();
/// let catalog = Catalog::from_items([
///     ReferenceItem::new("A", 26.2, 50.0),
///     ReferenceItem::new("B", 21.4, 70.0),
/// ])
/// .unwrap();
///
/// let matches = find_matches(&holes, &catalog, 0.3).unwrap();
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].item.name, "A");
/// ```
pub fn find_matches(
    measurements: &HoleMeasurement,
    catalog: &Catalog,
    tolerance: f64,
) -> Result<Vec<Match>> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(AcousticsError::invalid_argument(format!(
            "tolerance must be non-negative, got {tolerance}"
        )));
    }

    let mut matches = Vec::new();
    for (hole_index, hole_diameter) in measurements.iter() {
        for item in catalog.iter() {
            let diff = (hole_diameter - item.diameter_mm).abs();
            if diff <= tolerance {
                matches.push(Match {
                    hole_index,
                    hole_diameter,
                    item: item.clone(),
                    diff,
                });
            }
        }
    }

    tracing::debug!(
        "Matched {} holes against {} instruments: {} pairs within {} mm",
        measurements.len(),
        catalog.len(),
        matches.len(),
        tolerance
    );

    Ok(matches)
}

/// Groups matches by hole and sorts each group closest first.
///
/// Every hole in `measurements` gets an entry, including holes without any
/// candidate. The sort is stable, so equally close items keep catalog order.
pub fn best_matches_per_hole(
    matches: &[Match],
    measurements: &HoleMeasurement,
) -> Vec<HoleCorrespondence> {
    measurements
        .iter()
        .map(|(hole_index, hole_diameter)| {
            let mut candidates: Vec<Match> = matches
                .iter()
                .filter(|m| m.hole_index == hole_index)
                .cloned()
                .collect();
            candidates.sort_by(|a, b| a.diff.total_cmp(&b.diff));

            HoleCorrespondence {
                hole_index,
                hole_diameter,
                candidates,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReferenceItem;

    fn two_item_catalog() -> Catalog {
        Catalog::from_items([
            ReferenceItem::new("A", 26.2, 50.0),
            ReferenceItem::new("B", 21.4, 70.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_find_matches_example() {
        let holes = HoleMeasurement::new(vec![26.0, 21.5, 16.5]).unwrap();
        let matches = find_matches(&holes, &two_item_catalog(), 0.3).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].hole_index, 0);
        assert_eq!(matches[0].hole_diameter, 26.0);
        assert_eq!(matches[0].item.name, "A");
        assert!((matches[0].diff - 0.2).abs() < 1e-9);

        assert_eq!(matches[1].hole_index, 1);
        assert_eq!(matches[1].item.name, "B");
        assert!((matches[1].diff - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let holes = HoleMeasurement::new(vec![26.0]).unwrap();
        let catalog = Catalog::from_items([ReferenceItem::new("X", 25.5, 55.0)]).unwrap();

        let matches = find_matches(&holes, &catalog, 0.5).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].diff, 0.5);
    }

    #[test]
    fn test_zero_tolerance_requires_exact_diameter() {
        let holes = HoleMeasurement::new(vec![22.0, 21.0]).unwrap();
        let catalog = Catalog::from_items([
            ReferenceItem::new("EXACT", 22.0, 98.0),
            ReferenceItem::new("CLOSE", 21.5, 73.3),
        ])
        .unwrap();

        let matches = find_matches(&holes, &catalog, 0.0).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].hole_index, 0);
        assert_eq!(matches[0].item.name, "EXACT");
        assert_eq!(matches[0].diff, 0.0);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let holes = HoleMeasurement::new(vec![22.0]).unwrap();
        let result = find_matches(&holes, &two_item_catalog(), -0.1);
        assert!(matches!(
            result,
            Err(AcousticsError::InvalidArgument { .. })
        ));
        assert!(find_matches(&holes, &two_item_catalog(), f64::NAN).is_err());
    }

    #[test]
    fn test_discovery_order_is_hole_then_catalog() {
        let holes = HoleMeasurement::new(vec![17.0, 16.5]).unwrap();
        let catalog = Catalog::from_items([
            ReferenceItem::new("SHOFAR", 17.0, 85.0),
            ReferenceItem::new("HORN", 16.5, 110.0),
        ])
        .unwrap();

        let matches = find_matches(&holes, &catalog, 0.5).unwrap();
        let order: Vec<(usize, &str)> = matches
            .iter()
            .map(|m| (m.hole_index, m.item.name.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![(0, "SHOFAR"), (0, "HORN"), (1, "SHOFAR"), (1, "HORN")]
        );

        // Rerunning yields the identical ordering
        assert_eq!(find_matches(&holes, &catalog, 0.5).unwrap(), matches);
    }

    #[test]
    fn test_best_matches_per_hole_sorts_stably() {
        let holes = HoleMeasurement::new(vec![26.0, 16.5, 40.0]).unwrap();
        let catalog = Catalog::from_items([
            ReferenceItem::new("LONG", 25.5, 55.0),
            ReferenceItem::new("ETRUSCAN", 26.0, 48.5),
            ReferenceItem::new("WIDE", 26.5, 40.0),
            ReferenceItem::new("HORN", 16.5, 110.0),
        ])
        .unwrap();

        let matches = find_matches(&holes, &catalog, 0.5).unwrap();
        let groups = best_matches_per_hole(&matches, &holes);

        assert_eq!(groups.len(), 3);

        let names: Vec<&str> = groups[0]
            .candidates
            .iter()
            .map(|m| m.item.name.as_str())
            .collect();
        // LONG and WIDE tie at 0.5 and keep catalog order
        assert_eq!(names, vec!["ETRUSCAN", "LONG", "WIDE"]);
        assert_eq!(groups[0].best().unwrap().item.name, "ETRUSCAN");

        assert_eq!(groups[1].best().unwrap().item.name, "HORN");

        assert!(groups[2].candidates.is_empty());
        assert!(groups[2].best().is_none());
    }
}
