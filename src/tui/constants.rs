//! TUI constants and configuration

use std::time::Duration;

// ============================================================================
// Layout Constants
// ============================================================================

/// Layout constraints for main UI sections
pub mod layout {
    use ratatui::layout::Constraint;

    pub const TITLE_HEIGHT: u16 = 3;
    pub const COUNTERS_HEIGHT: u16 = 5;
    pub const SUMMARY_HEIGHT: u16 = 3;
    pub const MIN_LOG_HEIGHT: u16 = 5;
    pub const FOOTER_HEIGHT: u16 = 3;

    pub fn main_sections() -> [Constraint; 5] {
        [
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(COUNTERS_HEIGHT),
            Constraint::Length(SUMMARY_HEIGHT),
            Constraint::Min(MIN_LOG_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ]
    }

    /// Four equal counter columns
    pub fn counter_columns() -> [Constraint; 4] {
        [Constraint::Ratio(1, 4); 4]
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// UI text styles
pub mod styles {
    use ratatui::style::Color;

    pub const LABEL: Color = Color::Gray;
    pub const VALUE_PRIMARY: Color = Color::Green;
    pub const VALUE_INFO: Color = Color::Cyan;
    pub const PLACEHOLDER: Color = Color::DarkGray;
    pub const BORDER_ACTIVE: Color = Color::Cyan;
    pub const BORDER_NORMAL: Color = Color::White;
}

/// Colors for the connection state indicator
pub mod status {
    use ratatui::style::Color;

    pub const CONNECTED: Color = Color::Green;
    pub const CONNECTING: Color = Color::Yellow;
    pub const RECONNECTING: Color = Color::Magenta;
    pub const DISCONNECTED: Color = Color::Red;
}

// ============================================================================
// Text Constants
// ============================================================================

/// UI text constants
pub mod text {
    pub const TITLE: &str = "Emoji Stats ";
    pub const SUBTITLE: &str = "- Live Index Counters";
    pub const PLACEHOLDER: &str = "···";
    pub const LOADING: &str = "Waiting for first snapshot...";
    pub const LOGS_TITLE: &str = "Logs";
    pub const HELP: &str = "q: quit  |  l: toggle logs";
}

// ============================================================================
// Timing
// ============================================================================

/// Redraw interval while counters are animating (~30 fps)
pub const ANIMATION_FRAME: Duration = Duration::from_millis(33);

/// Redraw interval when idle
pub const IDLE_FRAME: Duration = Duration::from_millis(250);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_sections_constraints() {
        let sections = layout::main_sections();
        assert_eq!(sections.len(), 5);
        assert!(matches!(
            sections[0],
            ratatui::layout::Constraint::Length(layout::TITLE_HEIGHT)
        ));
        assert!(matches!(sections[3], ratatui::layout::Constraint::Min(_)));
    }

    #[test]
    fn test_fixed_sections_fit_standard_terminal() {
        let total = layout::TITLE_HEIGHT
            + layout::COUNTERS_HEIGHT
            + layout::SUMMARY_HEIGHT
            + layout::MIN_LOG_HEIGHT
            + layout::FOOTER_HEIGHT;
        // margin=1 on all sides
        assert!(total + 2 <= 24, "Should fit in 24-line terminal");
    }

    #[test]
    fn test_animation_frame_faster_than_idle() {
        assert!(ANIMATION_FRAME < IDLE_FRAME);
        // Several frames fit into one 500ms transition
        let frames = crate::constants::animation::DURATION.as_millis() / ANIMATION_FRAME.as_millis();
        assert!(frames >= 10);
    }
}
