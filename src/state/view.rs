use crate::input::ScreenPos;
use crate::level::Vertex;

/// Maps screen pixels to world coordinates.
///
/// `world = origin + screen * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub origin: Vertex,
    /// World units per screen pixel
    pub scale: f64,
}

impl View {
    pub fn new(origin: Vertex, scale: f64) -> Self {
        Self { origin, scale }
    }

    pub fn screen_to_world(&self, pos: ScreenPos) -> Vertex {
        Vertex::new(
            self.origin.x + pos.x * self.scale,
            self.origin.y + pos.y * self.scale,
        )
    }

    /// Drag the canvas so that it follows the pointer from `from` to `to`
    pub fn pan(&mut self, from: ScreenPos, to: ScreenPos) {
        // the view moves opposite to the pointer so the canvas follows it
        self.origin.x += (from.x - to.x) * self.scale;
        self.origin.y += (from.y - to.y) * self.scale;
    }

    /// Change the scale, keeping the world point under `cursor` fixed
    pub fn zoom_at(&mut self, cursor: ScreenPos, scale: f64) {
        let anchor = self.screen_to_world(cursor);
        self.scale = scale;
        self.origin = Vertex::new(anchor.x - cursor.x * scale, anchor.y - cursor.y * scale);
    }
}
