/// Engine tunables. `Default` gives the stock 1024x768 view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Internal frame size in pixels; the window is opened at this logical size
    pub screen_width: usize,
    pub screen_height: usize,
    /// Cells moved per movement key press
    pub move_speed: f64,
    /// Radians turned per rotation key press
    pub rot_speed: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen_width: 1024,
            screen_height: 768,
            move_speed: 0.1,
            rot_speed: 0.05,
        }
    }
}

impl EngineConfig {
    pub fn with_screen(mut self, width: usize, height: usize) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }
}
