//! Input abstraction layer.
//!
//! Pointer events arrive in viewport (client) coordinates. The engine
//! translates them into surface-local coordinates using the surface's
//! bounding rectangle at the time of the event.

use kurbo::{Point, Rect};
use sk_core::StrokePoint;

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { client_x: f64, client_y: f64 },

    /// Pointer moved, pressed or not.
    PointerMove { client_x: f64, client_y: f64 },

    /// Pointer released.
    PointerUp,

    /// Pointer left the surface.
    PointerLeave,
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl or ⌘.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

impl InputEvent {
    pub fn from_pointer_down(client_x: f64, client_y: f64) -> Self {
        Self::PointerDown { client_x, client_y }
    }

    pub fn from_pointer_move(client_x: f64, client_y: f64) -> Self {
        Self::PointerMove { client_x, client_y }
    }

    /// Position in client coordinates, if this event carries one.
    pub fn client_position(&self) -> Option<Point> {
        match *self {
            Self::PointerDown { client_x, client_y } | Self::PointerMove { client_x, client_y } => {
                Some(Point::new(client_x, client_y))
            }
            Self::PointerUp | Self::PointerLeave => None,
        }
    }

    /// Position relative to a surface whose client bounds are `rect`.
    pub fn local_position(&self, rect: Rect) -> Option<StrokePoint> {
        self.client_position().map(|p| to_surface_local(p, rect))
    }
}

/// Subtract the surface's top-left corner from a client position.
pub fn to_surface_local(client: Point, rect: Rect) -> StrokePoint {
    Point::new(client.x - rect.x0, client.y - rect.y0)
}
