//! Letterboxed game-area scaling
//!
//! The game simulates on a 320x240 4:3 canvas. A window with a different
//! aspect ratio grows the game area along the longer axis rather than
//! stretching it.

/// Window and derived game-area geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoGeometry {
    pub window_width: i32,
    pub window_height: i32,
    pub game_width: i32,
    pub game_height: i32,
    pub width_scale: f32,
    pub height_scale: f32,
}

impl VideoGeometry {
    pub fn new(width: i32, height: i32) -> Self {
        let mut geometry = Self {
            window_width: 0,
            window_height: 0,
            game_width: 320,
            game_height: 240,
            width_scale: 1.0,
            height_scale: 1.0,
        };
        geometry.set_window_size(width, height);
        geometry
    }

    /// Recompute game dimensions and scale factors for a window size.
    pub fn set_window_size(&mut self, width: i32, height: i32) {
        self.window_width = width;
        self.window_height = height;
        if width * 3 > height * 4 {
            self.game_width = width * 3 * 320 / (height * 4);
            self.game_height = 240;
        } else {
            self.game_width = 320;
            self.game_height = height * 4 * 240 / (width * 3);
        }
        self.width_scale = width as f32 / self.game_width as f32;
        self.height_scale = height as f32 / self.game_height as f32;
    }
}
