//! Decides what a resolved pick means for the current drawing.

use bevy::prelude::*;

use crate::interaction::{ConsumerId, PickedFeature};

use super::points::{PointId, PointSet};
use super::shape::ShapeState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickVerdict {
    /// Append a point at the picked position
    NewPoint(Vec3),
    /// The first point was hit: turn the line into a polygon
    CloseLoop,
    /// An existing point was hit. `index` is its position before this pick.
    RemovePoint { index: usize, id: PointId },
    /// A single feature that is not one of our points
    Ignore,
}

#[derive(Debug, Clone, Copy)]
pub struct PickResolutionPolicy {
    pub allow_polygon: bool,
}

impl PickResolutionPolicy {
    /// Resolve a pick into verdicts, applied in order by the session.
    ///
    /// Indices are taken from `points` as it stands before the pick. When several
    /// points are hit at once, the closed flag is tracked across the batch so a
    /// removal that reopens the loop is seen by later hits.
    pub fn resolve(
        &self,
        owner: ConsumerId,
        position: Vec3,
        features: &[PickedFeature],
        points: &PointSet,
        shape: &ShapeState,
    ) -> Vec<PickVerdict> {
        if features.is_empty() {
            return vec![PickVerdict::NewPoint(position)];
        }

        let tracked = |feature: &PickedFeature| match feature {
            PickedFeature::DrawnPoint { owner: o, point } if *o == owner && points.contains(*point) => {
                Some(*point)
            }
            _ => None,
        };

        // Picking backends occasionally report a lone feature that is not ours.
        // Unlike an empty pick, this is not a new point.
        if features.len() == 1 && tracked(&features[0]).is_none() {
            return vec![PickVerdict::Ignore];
        }

        let mut verdicts = Vec::new();
        let mut seen: Vec<PointId> = Vec::new();
        let mut closed = shape.is_closed();
        let mut remaining = points.len();

        for id in features.iter().filter_map(|f| tracked(f)) {
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);

            let Some(index) = points.index_of(id) else {
                continue;
            };

            if index == 0 && !closed && self.allow_polygon {
                verdicts.push(PickVerdict::CloseLoop);
                closed = true;
            } else {
                verdicts.push(PickVerdict::RemovePoint { index, id });
                remaining -= 1;
                if closed && remaining < 2 {
                    closed = false;
                }
            }
        }

        if verdicts.is_empty() {
            verdicts.push(PickVerdict::NewPoint(position));
        }
        verdicts
    }
}
