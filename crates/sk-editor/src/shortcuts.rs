//! Keyboard shortcuts for the drawing toolbar.
//!
//! Keys follow `KeyboardEvent.key`. Undo, redo and reset need the command
//! modifier; tool, brush and palette keys work bare.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tools ──
    ToolPen,
    /// Eraser ↔ pen.
    ToggleEraser,
    /// Disarm: pointer input does nothing.
    ToolNone,

    // ── Edit ──
    Undo,
    Redo,
    /// Clear to blank (undoable).
    Reset,

    // ── Brush ──
    ShrinkBrush,
    GrowBrush,
    /// Pick palette swatch by zero-based index.
    PaletteColor(usize),
}

/// Key bindings for the sketch toolbar. `ctrl` and `meta` are
/// interchangeable, so Ctrl+Z and ⌘Z both undo.
pub struct ShortcutMap;

impl ShortcutMap {
    /// `None` when the combo is unbound. Alt is ignored.
    pub fn resolve(key: &str, mods: Modifiers) -> Option<ShortcutAction> {
        let cmd = mods.command();
        let shift = mods.shift;

        // ── Modifier combos first (most specific) ──
        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "Delete" | "Backspace" => Some(ShortcutAction::Reset),
                _ => None,
            };
        }

        // ── Single keys (shift-insensitive) ──
        match key {
            "p" | "P" => Some(ShortcutAction::ToolPen),
            "e" | "E" => Some(ShortcutAction::ToggleEraser),
            "Escape" => Some(ShortcutAction::ToolNone),
            "[" => Some(ShortcutAction::ShrinkBrush),
            "]" => Some(ShortcutAction::GrowBrush),
            "0" => Some(ShortcutAction::PaletteColor(9)),
            _ => match key.as_bytes() {
                [d @ b'1'..=b'9'] => Some(ShortcutAction::PaletteColor((d - b'1') as usize)),
                _ => None,
            },
        }
    }
}
