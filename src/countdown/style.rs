//! Styles for the countdown widget.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Colours and borders used by the countdown view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Heading above the input.
    pub title: Style,
    /// The `MM:SS` clock.
    pub clock: Style,
    /// A button that can be pressed.
    pub button: Style,
    /// A button whose action is currently unavailable.
    pub button_disabled: Style,
    /// The state line under the buttons.
    pub status: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let button = Style::new()
            .padding(0, 1, 0, 1)
            .border(lipgloss::rounded_border())
            .foreground(AdaptiveColor {
                Light: "#1A1A1A",
                Dark: "#DDDDDD",
            });

        Self {
            title: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#333333",
                Dark: "#EEEEEE",
            }),
            clock: Style::new().bold(true).padding(1, 4, 1, 4),
            button_disabled: button.clone().faint(true).foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            button,
            status: Style::new().faint(true),
        }
    }
}
