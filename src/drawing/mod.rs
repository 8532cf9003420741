//! Interactive drawing of points, lines and polygons on the map.
//!
//! A [`UserDrawing`] turns the picks it receives from the interaction-mode
//! stack into an ordered [`PointSet`]. The connecting line and, once the loop is
//! closed, the polygon are derived from that set every frame.
//!
//! ## Module Structure
//!
//! - [`points`] - The ordered point collection
//! - [`shape`] - Open line vs. closed polygon
//! - [`policy`] - What a pick means: new point, close loop, remove point
//! - [`prompt`] - Dialog message and button label
//! - [`observer`] - Listener trait and [`DrawingEvent`] message
//! - [`session`] - The [`UserDrawing`] component
//! - [`measure`] - Distance and area readout
//! - [`systems`] - ECS routing of picks, cancels and events
//! - [`rendering`] - Gizmo rendering

mod gizmo;
pub mod measure;
pub mod observer;
pub mod points;
pub mod policy;
pub mod prompt;
mod rendering;
pub mod session;
pub mod shape;
pub mod systems;


pub use measure::DistanceMeasurer;
pub use observer::{DrawingEvent, DrawingObserver};
pub use points::{DrawnPoint, PointId, PointSet};
pub use policy::{PickResolutionPolicy, PickVerdict};
pub use session::{DrawingError, DrawingPhase, UserDrawing, UserDrawingOptions};
pub use shape::{PolygonHierarchy, ShapeState};
pub use systems::{DrawingErrorReport, DrawingTool, FinishDrawingRequest, StartDrawingRequest};

use bevy::prelude::*;

use crate::interaction::PickSystems;

pub struct UserDrawingPlugin;

impl Plugin for UserDrawingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawingErrorReport>()
            .add_message::<StartDrawingRequest>()
            .add_message::<FinishDrawingRequest>()
            .add_message::<DrawingEvent>()
            .init_gizmo_group::<gizmo::DrawingGlowGizmoGroup>()
            .add_systems(Startup, gizmo::configure_drawing_gizmos)
            .add_systems(
                Update,
                (
                    systems::start_drawing,
                    // Cancels first so a pick resolving in the same frame cannot undo cleanup
                    systems::route_cancels,
                    systems::route_picks,
                    systems::finish_drawing,
                    systems::flush_drawing_events,
                    systems::update_draw_cursor,
                )
                    .chain()
                    .after(PickSystems),
            )
            .add_systems(Update, rendering::render_drawings);
    }
}
