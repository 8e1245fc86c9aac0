//! WASM bridge for Sketch: drives a drawing session on an HTML canvas.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards pointer,
//! keyboard and resize events; everything else happens in Rust.

mod canvas2d;

use canvas2d::WebSurface;
use serde::Serialize;
use sk_core::{Color, PALETTE, SketchConfig, SurfaceDimensions, ToolKind};
use sk_editor::{InputEvent, Modifiers, SketchContext};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// The JS-facing drawing controller.
///
/// Owns the session (toolbar state, surface, engine, history). Every
/// method returns whether the UI needs to refresh its toolbar.
#[wasm_bindgen]
pub struct SketchCanvas {
    session: SketchContext<WebSurface>,
}

#[wasm_bindgen]
impl SketchCanvas {
    /// Mount on `canvas`. `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str) -> Self {
        console_setup();

        let config = parse_config(config_json);
        let fallback = SurfaceDimensions::new(canvas.width(), canvas.height());
        let surface = WebSurface::from_canvas(canvas);
        let container = surface
            .as_ref()
            .and_then(WebSurface::container_dimensions)
            .unwrap_or(fallback);

        Self {
            session: SketchContext::mount(surface, container, config),
        }
    }

    // ─── Layout ──────────────────────────────────────────────────────────

    /// Resize to an explicit container size in CSS pixels.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.session.resize(SurfaceDimensions::from_container(width, height))
    }

    /// Resize to the canvas's parent element (window `resize` handler).
    pub fn fit_container(&mut self) -> bool {
        let container = self
            .session
            .adapter()
            .surface()
            .and_then(WebSurface::container_dimensions);
        match container {
            Some(dims) => self.session.resize(dims),
            None => false,
        }
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    pub fn handle_pointer_down(&mut self, client_x: f64, client_y: f64) -> bool {
        self.session
            .handle_event(&InputEvent::from_pointer_down(client_x, client_y))
    }

    pub fn handle_pointer_move(&mut self, client_x: f64, client_y: f64) -> bool {
        self.session
            .handle_event(&InputEvent::from_pointer_move(client_x, client_y))
    }

    /// Returns true when the finished stroke was recorded.
    pub fn handle_pointer_up(&mut self) -> bool {
        self.session.handle_event(&InputEvent::PointerUp)
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.session.handle_event(&InputEvent::PointerLeave)
    }

    // ─── Commands ────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn reset(&mut self) -> bool {
        self.session.reset()
    }

    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    /// Handle a keyboard event. Returns true if anything changed.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.session.handle_key(key, mods)
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// `"pen"`, `"eraser"` or `"none"`; anything else disarms.
    pub fn set_tool(&mut self, name: &str) -> bool {
        self.session.set_tool(tool_from_name(name))
    }

    pub fn get_tool_name(&self) -> String {
        tool_kind_to_name(self.session.tools().tool).to_string()
    }

    /// Select a pen color by hex. Invalid hex is ignored.
    pub fn set_color(&mut self, hex: &str) -> bool {
        match Color::from_hex(hex) {
            Some(color) => {
                self.session.select_color(color);
                true
            }
            None => {
                log::warn!("ignoring invalid color {hex:?}");
                false
            }
        }
    }

    pub fn toggle_eraser(&mut self) {
        self.session.toggle_eraser();
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.session.set_pen_width(width);
    }

    pub fn set_eraser_width(&mut self, width: u32) {
        self.session.set_eraser_width(width);
    }

    /// Toolbar state as JSON, see [`ToolbarState`].
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(&ToolbarState::of(&self.session))
            .unwrap_or_else(|_| "{}".to_string())
    }
}

/// The swatch colors as a JSON array of hex strings.
#[wasm_bindgen]
pub fn palette_json() -> String {
    serde_json::to_string(&PALETTE).unwrap_or_else(|_| "[]".to_string())
}

// ─── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolbarState {
    tool: &'static str,
    color: Color,
    pen_width: u32,
    eraser_width: u32,
    can_undo: bool,
    can_redo: bool,
    history_len: usize,
    /// -1 when the history is empty.
    history_index: i64,
    width: u32,
    height: u32,
}

impl ToolbarState {
    fn of<S: sk_render::Surface>(session: &SketchContext<S>) -> Self {
        let tools = session.tools();
        let history = session.history();
        let dims = session.dimensions();
        Self {
            tool: tool_kind_to_name(tools.tool),
            color: tools.color,
            pen_width: tools.pen_width,
            eraser_width: tools.eraser_width,
            can_undo: session.can_undo(),
            can_redo: session.can_redo(),
            history_len: history.len(),
            history_index: history.cursor().map_or(-1, |c| c as i64),
            width: dims.width,
            height: dims.height,
        }
    }
}

fn parse_config(json: &str) -> SketchConfig {
    if json.trim().is_empty() {
        return SketchConfig::default();
    }
    serde_json::from_str(json).unwrap_or_else(|e| {
        log::warn!("invalid sketch config, using defaults: {e}");
        SketchConfig::default()
    })
}

fn tool_from_name(name: &str) -> ToolKind {
    match name {
        "pen" => ToolKind::Pen,
        "eraser" => ToolKind::Eraser,
        _ => ToolKind::None,
    }
}

fn tool_kind_to_name(kind: ToolKind) -> &'static str {
    match kind {
        ToolKind::Pen => "pen",
        ToolKind::Eraser => "eraser",
        ToolKind::None => "none",
    }
}

// ─── Panic hook and console logging ──────────────────────────────────────

fn console_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Sketch WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            if console_log::init_with_level(log::Level::Info).is_err() {
                web_sys::console::warn_1(&"Sketch: logger already installed".into());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sk_core::ToolConfig;
    use sk_render::RasterSurface;

    #[test]
    fn config_from_json() {
        let cfg = parse_config(r#"{"maxHistory": 50, "maxWidth": 1024}"#);
        assert_eq!(cfg.max_history, 50);
        assert_eq!(cfg.max_width, 1024);
        assert_eq!(cfg.max_height, 1500);
    }

    #[test]
    fn bad_config_falls_back() {
        assert_eq!(parse_config("{not json"), SketchConfig::default());
        assert_eq!(parse_config("  "), SketchConfig::default());
    }

    #[test]
    fn tool_names_roundtrip() {
        for kind in [ToolKind::Pen, ToolKind::Eraser, ToolKind::None] {
            assert_eq!(tool_from_name(tool_kind_to_name(kind)), kind);
        }
        assert_eq!(tool_from_name("lasso"), ToolKind::None);
    }

    #[test]
    fn toolbar_state_json() {
        let surface = RasterSurface::new(SurfaceDimensions::new(0, 0)).unwrap();
        let session = SketchContext::mount(
            Some(surface),
            SurfaceDimensions::new(40, 30),
            SketchConfig::default(),
        );
        let state = ToolbarState::of(&session);
        let json = serde_json::to_value(&state).unwrap();
        let defaults = ToolConfig::default();
        assert_eq!(json["tool"], "none");
        assert_eq!(json["color"], "#000000");
        assert_eq!(json["penWidth"], defaults.pen_width);
        assert_eq!(json["canUndo"], false);
        assert_eq!(json["historyLen"], 1);
        assert_eq!(json["historyIndex"], 0);
        assert_eq!(json["width"], 40);
    }

    #[test]
    fn palette_is_hex_list() {
        let colors: Vec<String> = serde_json::from_str(&palette_json()).unwrap();
        assert_eq!(colors.len(), 11);
        assert_eq!(colors[0], "#000000");
        assert_eq!(colors[10], "#FFA500");
    }
}
