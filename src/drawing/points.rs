//! Ordered collection of user-placed points.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnPoint {
    pub id: PointId,
    pub position: Vec3,
}

/// Points in insertion order. Index 0 anchors loop closing, the last point is the tail.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: Vec<DrawnPoint>,
    next_id: u64,
}

impl PointSet {
    /// Append a point at `position`, returning its new id
    pub fn push(&mut self, position: Vec3) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.push(DrawnPoint { id, position });
        id
    }

    /// Remove a point by identity. Unknown ids are a no-op.
    pub fn remove(&mut self, id: PointId) -> Option<DrawnPoint> {
        let index = self.index_of(id)?;
        Some(self.points.remove(index))
    }

    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&DrawnPoint> {
        self.points.get(index)
    }

    #[cfg(test)]
    pub fn first(&self) -> Option<&DrawnPoint> {
        self.points.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawnPoint> {
        self.points.iter()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.points.iter().map(|p| p.position).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_set_default_empty() {
        let set = PointSet::default();
        assert!(set.is_empty());
        assert!(set.first().is_none());
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut set = PointSet::default();
        for i in 0..5 {
            set.push(Vec3::new(i as f32, 0.0, 0.0));
        }
        assert_eq!(set.len(), 5);
        let xs: Vec<f32> = set.positions().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_ids_are_unique_even_at_same_position() {
        let mut set = PointSet::default();
        let a = set.push(Vec3::ZERO);
        let b = set.push(Vec3::ZERO);
        assert_ne!(a, b);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut set = PointSet::default();
        let a = set.push(Vec3::ZERO);
        set.remove(a);
        let b = set.push(Vec3::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_shifts_indices() {
        let mut set = PointSet::default();
        let a = set.push(Vec3::X);
        let b = set.push(Vec3::Y);
        let c = set.push(Vec3::Z);

        let removed = set.remove(b).unwrap();
        assert_eq!(removed.position, Vec3::Y);
        assert_eq!(set.index_of(a), Some(0));
        assert_eq!(set.index_of(c), Some(1));
        assert!(!set.contains(b));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut set = PointSet::default();
        set.push(Vec3::ZERO);
        assert!(set.remove(PointId(42)).is_none());
        assert_eq!(set.len(), 1);
    }
}
