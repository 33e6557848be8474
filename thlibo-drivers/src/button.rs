//! Button debounce and edge detection
//!
//! A pure sample-fed edge detector, decoupled from any pin type: the
//! firmware's button task reads the GPIO and feeds one sample per poll
//! interval. An edge is a change between two consecutive samples, which
//! doubles as the debounce - a bounce shorter than the poll interval is
//! never observed.

/// Edge between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Released -> pressed
    Pressed,
    /// Pressed -> released
    Released,
}

/// Two-sample edge detector for one button
///
/// Poll at [`POLL_INTERVAL_MS`](DebouncedButton::POLL_INTERVAL_MS) for
/// the debounce behavior the mechanical buttons were calibrated against.
#[derive(Debug, Default)]
pub struct DebouncedButton {
    last: Option<bool>,
}

impl DebouncedButton {
    /// Recommended sample spacing
    pub const POLL_INTERVAL_MS: u32 = 10;

    /// Create a detector with no sample history
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample; returns the edge it completed, if any
    ///
    /// The first sample only seeds the history - a button held at boot
    /// does not fire a press.
    pub fn update(&mut self, pressed: bool) -> Option<Edge> {
        let edge = match self.last {
            Some(false) if pressed => Some(Edge::Pressed),
            Some(true) if !pressed => Some(Edge::Released),
            _ => None,
        };
        self.last = Some(pressed);
        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_fires_nothing() {
        let mut button = DebouncedButton::new();
        assert_eq!(button.update(true), None);
        assert_eq!(button.update(true), None);
    }

    #[test]
    fn test_press_then_release_edges() {
        let mut button = DebouncedButton::new();
        button.update(false);
        assert_eq!(button.update(true), Some(Edge::Pressed));
        assert_eq!(button.update(true), None);
        assert_eq!(button.update(false), Some(Edge::Released));
    }

    #[test]
    fn test_steady_state_is_quiet() {
        let mut button = DebouncedButton::new();
        button.update(false);
        for _ in 0..100 {
            assert_eq!(button.update(false), None);
        }
    }

    #[test]
    fn test_held_at_boot_releases_cleanly() {
        let mut button = DebouncedButton::new();
        button.update(true);
        // No phantom press was fired; the release edge still is
        assert_eq!(button.update(false), Some(Edge::Released));
    }
}
