#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

/// Open/closed state of the chat panel. Last click wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    pub open: bool,
}

impl PanelState {
    /// Flip the panel and return the new open flag.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
