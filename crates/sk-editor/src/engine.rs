//! Freehand drawing engine.
//!
//! A two-state machine, `Idle` and `Stroking`, driven by pointer events:
//!
//! | Event          | Idle                          | Stroking                          |
//! |----------------|-------------------------------|-----------------------------------|
//! | pointer-down   | begin stroke (tool armed)     | restart at the new point          |
//! | pointer-move   | —                             | render segment (tool armed)       |
//! | pointer-up     | —                             | end stroke, push history          |
//! | pointer-leave  | —                             | end stroke, push history          |
//!
//! History is only touched when a stroke ends, so undo works per stroke.

use crate::history::History;
use crate::input::InputEvent;
use sk_core::{StrokePoint, ToolConfig, ToolKind};
use sk_render::{StrokeStyle, Surface, SurfaceAdapter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Stroking,
}

/// Transient state of the stroke in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSession {
    pub last_point: StrokePoint,
    pub style: StrokeStyle,
}

#[derive(Debug, Default)]
pub struct DrawingEngine {
    session: Option<StrokeSession>,
}

impl DrawingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        if self.session.is_some() {
            StrokeState::Stroking
        } else {
            StrokeState::Idle
        }
    }

    pub fn is_stroking(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&StrokeSession> {
        self.session.as_ref()
    }

    /// Dispatch one pointer event. Returns whether the surface changed.
    pub fn handle<S: Surface>(
        &mut self,
        event: &InputEvent,
        tools: &ToolConfig,
        adapter: &mut SurfaceAdapter<S>,
        history: &mut History,
    ) -> bool {
        match event {
            InputEvent::PointerDown { .. } => {
                self.begin_stroke(event, tools, adapter);
                false
            }
            InputEvent::PointerMove { .. } => self.extend_stroke(event, tools, adapter),
            InputEvent::PointerUp | InputEvent::PointerLeave => self.end_stroke(adapter, history),
        }
    }

    /// Idle → Stroking. Ignored when no tool is armed or the surface has
    /// no rendering context.
    pub fn begin_stroke<S: Surface>(
        &mut self,
        event: &InputEvent,
        tools: &ToolConfig,
        adapter: &mut SurfaceAdapter<S>,
    ) -> bool {
        let Some(style) = StrokeStyle::for_tool(tools) else {
            return false;
        };
        let Some(surface) = adapter.surface_mut() else {
            return false;
        };
        let Some(point) = event.local_position(surface.client_rect()) else {
            return false;
        };

        surface.begin_path();
        surface.move_to(point);
        surface.set_stroke_style(&style);

        self.session = Some(StrokeSession {
            last_point: point,
            style,
        });
        log::debug!("stroke begin {:?} at ({:.1}, {:.1})", tools.tool, point.x, point.y);
        true
    }

    /// Stroking → Stroking. Renders the segment from the previous point
    /// straight away; round caps keep consecutive segments joined.
    pub fn extend_stroke<S: Surface>(
        &mut self,
        event: &InputEvent,
        tools: &ToolConfig,
        adapter: &mut SurfaceAdapter<S>,
    ) -> bool {
        if tools.tool == ToolKind::None {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(surface) = adapter.surface_mut() else {
            return false;
        };
        let Some(point) = event.local_position(surface.client_rect()) else {
            return false;
        };

        surface.set_stroke_style(&session.style);
        surface.begin_path();
        surface.move_to(session.last_point);
        surface.line_to(point);
        surface.stroke();

        log::trace!(
            "segment ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            session.last_point.x,
            session.last_point.y,
            point.x,
            point.y
        );
        session.last_point = point;
        true
    }

    /// Stroking → Idle. Records the resulting surface in `history`.
    /// Returns whether a history entry was pushed.
    pub fn end_stroke<S: Surface>(
        &mut self,
        adapter: &mut SurfaceAdapter<S>,
        history: &mut History,
    ) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        log::debug!("stroke end");
        history.push(adapter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use pretty_assertions::assert_eq;
    use sk_core::{Color, SketchConfig, SurfaceDimensions};
    use sk_render::RasterSurface;

    fn setup() -> (DrawingEngine, SurfaceAdapter<RasterSurface>, History) {
        let surface = RasterSurface::new(SurfaceDimensions::new(60, 40)).unwrap();
        let mut adapter = SurfaceAdapter::new(surface, &SketchConfig::default());
        adapter.clear();
        (DrawingEngine::new(), adapter, History::new(20))
    }

    fn pen() -> ToolConfig {
        ToolConfig {
            tool: ToolKind::Pen,
            color: Color::BLACK,
            pen_width: 4,
            eraser_width: 10,
        }
    }

    #[test]
    fn down_enters_stroking() {
        let (mut engine, mut adapter, _) = setup();
        assert_eq!(engine.state(), StrokeState::Idle);
        let down = InputEvent::from_pointer_down(5.0, 6.0);
        assert!(engine.begin_stroke(&down, &pen(), &mut adapter));
        assert_eq!(engine.state(), StrokeState::Stroking);
        assert_eq!(engine.session().unwrap().last_point, Point::new(5.0, 6.0));
    }

    #[test]
    fn down_without_tool_stays_idle() {
        let (mut engine, mut adapter, mut history) = setup();
        let tools = ToolConfig::default();
        engine.handle(&InputEvent::from_pointer_down(5.0, 6.0), &tools, &mut adapter, &mut history);
        assert_eq!(engine.state(), StrokeState::Idle);
    }

    #[test]
    fn move_renders_immediately() {
        let (mut engine, mut adapter, mut history) = setup();
        let tools = pen();
        engine.handle(
            &InputEvent::from_pointer_down(5.0, 20.0),
            &tools,
            &mut adapter,
            &mut history,
        );
        let changed = engine.handle(
            &InputEvent::from_pointer_move(50.0, 20.0),
            &tools,
            &mut adapter,
            &mut history,
        );
        assert!(changed);
        assert_eq!(adapter.surface().unwrap().pixel(30, 20), Some([0, 0, 0, 255]));
        assert_eq!(engine.session().unwrap().last_point, Point::new(50.0, 20.0));
        assert!(history.is_empty());
    }

    #[test]
    fn move_while_idle_is_noop() {
        let (mut engine, mut adapter, mut history) = setup();
        let before = adapter.snapshot().unwrap();
        engine.handle(
            &InputEvent::from_pointer_move(50.0, 20.0),
            &pen(),
            &mut adapter,
            &mut history,
        );
        assert_eq!(adapter.snapshot().unwrap(), before);
    }

    #[test]
    fn tool_disarmed_mid_stroke_stops_rendering() {
        let (mut engine, mut adapter, mut history) = setup();
        let mut tools = pen();
        engine.handle(
            &InputEvent::from_pointer_down(5.0, 20.0),
            &tools,
            &mut adapter,
            &mut history,
        );
        tools.tool = ToolKind::None;
        let before = adapter.snapshot().unwrap();
        let moved = InputEvent::from_pointer_move(50.0, 20.0);
        assert!(!engine.handle(&moved, &tools, &mut adapter, &mut history));
        assert_eq!(adapter.snapshot().unwrap(), before);
    }

    #[test]
    fn up_and_leave_end_stroke_once() {
        let (mut engine, mut adapter, mut history) = setup();
        let tools = pen();
        engine.handle(
            &InputEvent::from_pointer_down(5.0, 20.0),
            &tools,
            &mut adapter,
            &mut history,
        );
        engine.handle(
            &InputEvent::from_pointer_move(20.0, 20.0),
            &tools,
            &mut adapter,
            &mut history,
        );
        assert!(engine.handle(&InputEvent::PointerUp, &tools, &mut adapter, &mut history));
        assert!(!engine.handle(&InputEvent::PointerLeave, &tools, &mut adapter, &mut history));
        assert_eq!(engine.state(), StrokeState::Idle);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn client_offset_is_subtracted() {
        let surface = RasterSurface::new(SurfaceDimensions::new(60, 40))
            .unwrap()
            .with_client_origin(Point::new(100.0, 200.0));
        let mut adapter = SurfaceAdapter::new(surface, &SketchConfig::default());
        let mut engine = DrawingEngine::new();
        engine.begin_stroke(&InputEvent::from_pointer_down(110.0, 215.0), &pen(), &mut adapter);
        assert_eq!(engine.session().unwrap().last_point, Point::new(10.0, 15.0));
    }

    #[test]
    fn unavailable_surface_is_inert() {
        let mut adapter: SurfaceAdapter<RasterSurface> =
            SurfaceAdapter::unavailable(&SketchConfig::default());
        let mut engine = DrawingEngine::new();
        let mut history = History::new(20);
        let tools = pen();
        engine.handle(&InputEvent::from_pointer_down(5.0, 5.0), &tools, &mut adapter, &mut history);
        engine.handle(&InputEvent::from_pointer_move(9.0, 5.0), &tools, &mut adapter, &mut history);
        engine.handle(&InputEvent::PointerUp, &tools, &mut adapter, &mut history);
        assert_eq!(engine.state(), StrokeState::Idle);
        assert!(history.is_empty());
    }
}
