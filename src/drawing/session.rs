//! The drawing controller: turns resolved picks into points, a line and a polygon.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bevy::prelude::*;

use crate::constants::DEFAULT_MESSAGE_HEADER;
use crate::interaction::{
    ConsumerId, DialogMessage, InteractionModeStack, ModeId, ModeRequest, PickedFeatures,
};

use super::observer::{DrawingEvent, DrawingObserver};
use super::points::PointSet;
use super::policy::{PickResolutionPolicy, PickVerdict};
use super::prompt;
use super::shape::{PolygonHierarchy, ShapeState};

static NEXT_CONSUMER_ID: AtomicU64 = AtomicU64::new(1);

/// Immutable per-drawing settings
#[derive(Debug, Clone, PartialEq)]
pub struct UserDrawingOptions {
    /// Heading of the prompt dialog while drawing
    pub message_header: String,
    /// Let the user click the first point to close the loop
    pub allow_polygon: bool,
}

impl Default for UserDrawingOptions {
    fn default() -> Self {
        Self {
            message_header: DEFAULT_MESSAGE_HEADER.to_string(),
            allow_polygon: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingPhase {
    #[default]
    Idle,
    Drawing,
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawingError {
    /// A collaborator the drawing needs is not available
    MissingHost(&'static str),
    /// Drawing state disagrees with itself. A bug, not a user error.
    InvariantViolation(String),
}

impl fmt::Display for DrawingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawingError::MissingHost(what) => write!(f, "{} is required for drawing", what),
            DrawingError::InvariantViolation(detail) => {
                write!(f, "Drawing state is inconsistent: {}", detail)
            }
        }
    }
}

impl std::error::Error for DrawingError {}

/// State of one drawing activity, from entering draw mode to cleanup. Never reused.
#[derive(Debug, Default)]
struct DrawingSession {
    points: PointSet,
    shape: ShapeState,
    active_mode: Option<ModeId>,
}

#[derive(Component)]
pub struct UserDrawing {
    consumer: ConsumerId,
    options: UserDrawingOptions,
    observers: Vec<Box<dyn DrawingObserver>>,
    session: Option<DrawingSession>,
    events: Vec<DrawingEvent>,
}

impl UserDrawing {
    pub fn new(options: UserDrawingOptions) -> Self {
        Self {
            consumer: ConsumerId(NEXT_CONSUMER_ID.fetch_add(1, Ordering::Relaxed)),
            options,
            observers: Vec::new(),
            session: None,
            events: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: impl DrawingObserver) -> Self {
        self.add_observer(observer);
        self
    }

    pub fn add_observer(&mut self, observer: impl DrawingObserver) {
        self.observers.push(Box::new(observer));
    }

    pub fn consumer(&self) -> ConsumerId {
        self.consumer
    }

    pub fn options(&self) -> &UserDrawingOptions {
        &self.options
    }

    pub fn phase(&self) -> DrawingPhase {
        match &self.session {
            None => DrawingPhase::Idle,
            Some(session) if session.shape.is_closed() => DrawingPhase::Closed,
            Some(_) => DrawingPhase::Drawing,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.shape.is_closed())
    }

    /// Points of the current session, `None` while idle
    pub fn points(&self) -> Option<&PointSet> {
        self.session.as_ref().map(|s| &s.points)
    }

    pub fn point_count(&self) -> usize {
        self.points().map_or(0, PointSet::len)
    }

    /// The single mode currently pushed on behalf of this drawing
    pub fn active_mode(&self) -> Option<ModeId> {
        self.session.as_ref().and_then(|s| s.active_mode)
    }

    pub fn polyline_positions(&self) -> Vec<Vec3> {
        self.session
            .as_ref()
            .map(|s| s.shape.polyline_positions(&s.points))
            .unwrap_or_default()
    }

    pub fn polygon(&self) -> Option<PolygonHierarchy> {
        self.session
            .as_ref()
            .and_then(|s| s.shape.polygon(&s.points))
    }

    pub fn dialog_message(&self) -> DialogMessage {
        let empty = DrawingSession::default();
        let session = self.session.as_ref().unwrap_or(&empty);
        let extra = self
            .observers
            .iter()
            .map(|o| o.dialog_message(&session.points, &session.shape));
        prompt::dialog_message(&self.options.message_header, extra, session.points.len())
    }

    pub fn button_label(&self) -> &'static str {
        prompt::button_label(self.point_count())
    }

    /// Start interpreting picks as drawing. Returns false if already drawing.
    pub fn enter_draw_mode(&mut self, stack: &mut impl InteractionModeStack) -> bool {
        // A finished polygon also counts: one drawing at a time
        if self.session.is_some() {
            return false;
        }

        self.session = Some(DrawingSession::default());
        self.arm(stack);
        self.events.push(DrawingEvent::Started {
            drawing: self.consumer,
        });
        info!("{:?} entered draw mode", self.consumer);
        true
    }

    /// Apply a resolved pick delivered for `mode`.
    ///
    /// Picks for a mode other than the active one, or arriving after cleanup,
    /// are discarded. After a positioned pick the drawing is always re-armed.
    pub fn handle_pick(
        &mut self,
        stack: &mut impl InteractionModeStack,
        mode: ModeId,
        picked: &PickedFeatures,
    ) -> Result<(), DrawingError> {
        let Some(session) = self.session.as_ref() else {
            debug!("{:?} discarding pick for {:?}: not drawing", self.consumer, mode);
            return Ok(());
        };
        if session.active_mode != Some(mode) {
            debug!("{:?} discarding stale pick for {:?}", self.consumer, mode);
            return Ok(());
        }
        let Some(position) = picked.pick_position else {
            return Ok(());
        };

        let policy = PickResolutionPolicy {
            allow_polygon: self.options.allow_polygon,
        };
        let verdicts = policy.resolve(
            self.consumer,
            position,
            &picked.features,
            &session.points,
            &session.shape,
        );

        for verdict in verdicts {
            self.apply(verdict);
        }

        self.rearm(stack);
        self.check_invariants()
    }

    /// Cancel signal from the stack for `mode`. Returns true if cleanup ran.
    pub fn cancel(&mut self, stack: &mut impl InteractionModeStack, mode: ModeId) -> bool {
        if self.active_mode() != Some(mode) {
            return false;
        }
        stack.remove(mode);
        self.clean_up();
        true
    }

    /// Programmatic abort; same cleanup as a cancel
    pub fn finish(&mut self, stack: &mut impl InteractionModeStack) {
        if let Some(mode) = self.active_mode() {
            stack.remove(mode);
        }
        if self.session.is_some() {
            self.clean_up();
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<DrawingEvent> {
        std::mem::take(&mut self.events)
    }

    fn apply(&mut self, verdict: PickVerdict) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match verdict {
            PickVerdict::NewPoint(position) => {
                session.points.push(position);
                debug!(
                    "{:?} added point {} at ({:.2}, {:.2}, {:.2})",
                    self.consumer,
                    session.points.len(),
                    position.x,
                    position.y,
                    position.z
                );
            }
            PickVerdict::CloseLoop => {
                if !session.shape.close() {
                    return;
                }
                debug!("{:?} closed loop with {} points", self.consumer, session.points.len());
            }
            PickVerdict::RemovePoint { index, id } => {
                if session.points.remove(id).is_none() {
                    return;
                }
                if session.shape.after_removal(session.points.len()) {
                    debug!("{:?} reverted polygon to line", self.consumer);
                }
                debug!("{:?} removed point at index {}", self.consumer, index);
            }
            PickVerdict::Ignore => return,
        }

        self.notify_points_changed();
    }

    fn notify_points_changed(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        for observer in self.observers.iter_mut() {
            observer.on_points_changed(&session.points, &session.shape);
        }
        self.events.push(DrawingEvent::PointsChanged {
            drawing: self.consumer,
            point_count: session.points.len(),
            closed: session.shape.is_closed(),
        });
    }

    fn arm(&mut self, stack: &mut impl InteractionModeStack) {
        let request = ModeRequest {
            owner: self.consumer,
            message: self.dialog_message(),
            button_text: self.button_label().to_string(),
        };
        let mode = stack.push(request);
        if let Some(session) = self.session.as_mut() {
            session.active_mode = Some(mode);
        }
    }

    /// Replace the consumed mode with a fresh one carrying an updated prompt
    fn rearm(&mut self, stack: &mut impl InteractionModeStack) {
        if let Some(old) = self.session.as_mut().and_then(|s| s.active_mode.take()) {
            stack.remove(old);
        }
        self.arm(stack);
    }

    fn clean_up(&mut self) {
        // Release all drawing state before anyone is told about it
        self.session = None;
        for observer in self.observers.iter_mut() {
            observer.on_clean_up();
        }
        self.events.push(DrawingEvent::CleanedUp {
            drawing: self.consumer,
        });
        info!("{:?} left draw mode", self.consumer);
    }

    fn check_invariants(&self) -> Result<(), DrawingError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        // Removals reopen the loop below two points, so an empty closed shape
        // means a mutation skipped that step
        if session.shape.is_closed() && session.points.is_empty() {
            let detail = "loop closed with no points".to_string();
            error!("{:?}: {}", self.consumer, detail);
            return Err(DrawingError::InvariantViolation(detail));
        }
        if session.active_mode.is_none() {
            let detail = "no interaction mode armed".to_string();
            error!("{:?}: {}", self.consumer, detail);
            return Err(DrawingError::InvariantViolation(detail));
        }
        Ok(())
    }
}
