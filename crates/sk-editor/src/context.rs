//! The drawing session owned by the top-level screen.
//!
//! Holds the toolbar state, the surface adapter, the drawing engine and
//! the history side by side, and passes the adapter explicitly to each
//! component. All calls run to completion on the UI thread, so there is
//! exactly one writer at any time.

use crate::engine::DrawingEngine;
use crate::history::History;
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use sk_core::{Color, PALETTE, SketchConfig, SurfaceDimensions, ToolConfig, ToolKind};
use sk_render::{Surface, SurfaceAdapter};

pub struct SketchContext<S: Surface> {
    config: SketchConfig,
    tools: ToolConfig,
    adapter: SurfaceAdapter<S>,
    engine: DrawingEngine,
    history: History,
}

impl<S: Surface> SketchContext<S> {
    /// Mount a surface: size it to the container (clamped), paint the
    /// background, and record the blank state as the first history entry.
    ///
    /// `surface` is `None` when the host could not provide a rendering
    /// context; the session then ignores all drawing input.
    pub fn mount(surface: Option<S>, container: SurfaceDimensions, config: SketchConfig) -> Self {
        let adapter = match surface {
            Some(surface) => SurfaceAdapter::new(surface, &config),
            None => SurfaceAdapter::unavailable(&config),
        };
        let mut ctx = Self {
            tools: config.tool_config(),
            history: History::new(config.history_capacity()),
            engine: DrawingEngine::new(),
            adapter,
            config,
        };
        ctx.adapter.resize(container);
        ctx.adapter.clear();
        ctx.history.push(&ctx.adapter);
        log::info!(
            "sketch mounted at {} (history capacity {})",
            ctx.adapter.dimensions(),
            ctx.history.capacity()
        );
        ctx
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Feed one pointer event to the drawing engine. Returns whether the
    /// surface changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.engine
            .handle(event, &self.tools, &mut self.adapter, &mut self.history)
    }

    /// Container resized. An active stroke is ended (and recorded) first,
    /// since its path coordinates refer to the old surface.
    ///
    /// A surface mounted with zero area gets its blank entry on the first
    /// resize that gives it pixels.
    pub fn resize(&mut self, container: SurfaceDimensions) -> bool {
        if self.engine.is_stroking() {
            log::debug!("resize during stroke: ending stroke");
            self.engine.end_stroke(&mut self.adapter, &mut self.history);
        }
        let resized = self.adapter.resize(container);
        if resized && self.history.is_empty() && !self.adapter.dimensions().is_empty() {
            log::debug!("recording blank entry at {}", self.adapter.dimensions());
            self.history.push(&self.adapter);
        }
        resized
    }

    // ─── Commands ────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.adapter)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.adapter)
    }

    pub fn reset(&mut self) -> bool {
        self.history.reset(&mut self.adapter)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Resolve and apply a key event. Returns whether anything changed.
    pub fn handle_key(&mut self, key: &str, mods: Modifiers) -> bool {
        match ShortcutMap::resolve(key, mods) {
            Some(action) => self.apply_shortcut(action),
            None => false,
        }
    }

    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::ToolPen => self.set_tool(ToolKind::Pen),
            ShortcutAction::ToggleEraser => {
                self.tools.toggle_eraser();
                true
            }
            ShortcutAction::ToolNone => self.set_tool(ToolKind::None),
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Reset => self.reset(),
            ShortcutAction::ShrinkBrush => self.nudge_width(-1),
            ShortcutAction::GrowBrush => self.nudge_width(1),
            ShortcutAction::PaletteColor(i) => match PALETTE.get(i) {
                Some(color) => {
                    self.select_color(*color);
                    true
                }
                None => false,
            },
        }
    }

    // ─── Toolbar state ───────────────────────────────────────────────────

    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        let changed = self.tools.tool != tool;
        self.tools.tool = tool;
        changed
    }

    /// Pick a pen color; arms the pen.
    pub fn select_color(&mut self, color: Color) {
        self.tools.select_color(color);
    }

    pub fn toggle_eraser(&mut self) {
        self.tools.toggle_eraser();
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.tools.set_pen_width(width, self.config.pen_width_range);
    }

    pub fn set_eraser_width(&mut self, width: u32) {
        self.tools.set_eraser_width(width, self.config.eraser_width_range);
    }

    /// Step the active tool's width by `delta`, within its range.
    fn nudge_width(&mut self, delta: i64) -> bool {
        let step = |w: u32| (w as i64 + delta).clamp(0, u32::MAX as i64) as u32;
        let before = self.tools.clone();
        match self.tools.tool {
            ToolKind::Pen => self.set_pen_width(step(self.tools.pen_width)),
            ToolKind::Eraser => self.set_eraser_width(step(self.tools.eraser_width)),
            ToolKind::None => return false,
        }
        self.tools != before
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn engine(&self) -> &DrawingEngine {
        &self.engine
    }

    pub fn adapter(&self) -> &SurfaceAdapter<S> {
        &self.adapter
    }

    pub fn dimensions(&self) -> SurfaceDimensions {
        self.adapter.dimensions()
    }
}
