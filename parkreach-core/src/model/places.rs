//! Origins and destination groups

use geo::Point;
use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

/// Residential area centroid (block group or tract)
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    /// Area code, e.g. a Census GEOID
    pub id: String,
    /// Position in the planar frame of the street graph
    pub geometry: Point<f64>,
    /// Nearest street node, `None` if the origin could not be snapped
    pub node: Option<NodeIndex>,
}

/// One entrance or boundary point of a park
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationPoint {
    pub geometry: Point<f64>,
    pub node: Option<NodeIndex>,
}

/// All points sharing a park id, in the order they were read
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationGroup {
    pub id: String,
    pub points: Vec<DestinationPoint>,
}

impl DestinationGroup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            points: Vec::new(),
        }
    }
}

/// Groups points by park id
///
/// Groups keep the order in which their id first appears, and points keep
/// their input order within a group.
pub fn group_destinations(
    points: impl IntoIterator<Item = (String, DestinationPoint)>,
) -> Vec<DestinationGroup> {
    let mut groups: Vec<DestinationGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (id, point) in points {
        let position = *positions.entry(id.clone()).or_insert_with(|| {
            groups.push(DestinationGroup::new(id));
            groups.len() - 1
        });
        groups[position].points.push(point);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64) -> DestinationPoint {
        DestinationPoint {
            geometry: Point::new(x, 0.0),
            node: None,
        }
    }

    #[test]
    fn grouping_preserves_first_appearance_and_insertion_order() {
        let groups = group_destinations(vec![
            ("b".to_string(), point(1.0)),
            ("a".to_string(), point(2.0)),
            ("b".to_string(), point(3.0)),
            ("a".to_string(), point(4.0)),
            ("c".to_string(), point(5.0)),
        ]);

        let ids: Vec<_> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);

        let xs: Vec<_> = groups[0].points.iter().map(|p| p.geometry.x()).collect();
        assert_eq!(xs, [1.0, 3.0]);
        let xs: Vec<_> = groups[1].points.iter().map(|p| p.geometry.x()).collect();
        assert_eq!(xs, [2.0, 4.0]);
        assert_eq!(groups[2].points.len(), 1);
    }

    #[test]
    fn grouping_nothing_yields_no_groups() {
        assert!(group_destinations(Vec::new()).is_empty());
    }
}
