//! Spinner shown in the header while a search is in flight.

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Tick-driven spinner. It only animates while a request is running.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame if `active`, otherwise rewind.
    pub fn tick(&mut self, active: bool) {
        self.frame = if active {
            (self.frame + 1) % SPINNER_FRAMES.len()
        } else {
            0
        };
    }

    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }
}
