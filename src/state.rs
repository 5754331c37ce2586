/// Bootstrap phase: scene construction waits for the font to finish loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Populated,
}

/// Viewport size in logical pixels
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Normalized pointer offset from the viewport center, in [-0.5, 0.5].
/// Tracked on every pointer move; nothing consumes it yet - reserved for
/// a camera parallax effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

/// Shared application state passed by reference into the tick, the resize
/// handler, and the population step. Single logical writer per tick slice.
#[derive(Debug)]
pub struct AppState {
    pub viewport: Viewport,
    pub cursor: Cursor,
    pub phase: Phase,
}

impl AppState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport { width, height },
            cursor: Cursor::default(),
            phase: Phase::Loading,
        }
    }

    /// Record a pointer position given in logical pixels
    pub fn track_cursor(&mut self, px: f32, py: f32) {
        self.cursor.x = px / self.viewport.width as f32 - 0.5;
        self.cursor.y = -(py / self.viewport.height as f32 - 0.5);
    }

    /// Record a viewport size change
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.width = width.max(1);
        self.viewport.height = height.max(1);
    }
}
