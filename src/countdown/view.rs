//! View rendering for the countdown widget.

use super::Model;
use crate::format::format_clock;
use lipgloss_extras::lipgloss;

impl Model {
    /// Renders the title, input, clock, buttons, state line and help bar.
    pub fn view(&self) -> String {
        let mut sections: Vec<String> = Vec::new();

        if !self.title.is_empty() {
            sections.push(self.styles.title.render(&self.title));
        }
        sections.push(self.input.view());

        sections.push(self.styles.clock.render(&format_clock(self.remaining())));

        sections.push(self.buttons_view());
        sections.push(self.styles.status.render(self.state().label()));
        sections.push(self.help.view(&self.key_map));

        let parts: Vec<&str> = sections.iter().map(String::as_str).collect();
        lipgloss::join_vertical(lipgloss::LEFT, &parts)
    }

    /// Renders the four buttons side by side, dimming those that cannot be
    /// pressed right now.
    pub fn buttons_view(&self) -> String {
        let buttons = self.buttons();
        let row = [
            ("Set Duration", buttons.set_duration),
            ("Start", buttons.start),
            ("Pause", buttons.pause),
            ("Reset", buttons.reset),
        ];

        let rendered: Vec<String> = row
            .iter()
            .map(|(label, enabled)| {
                let style = if *enabled {
                    &self.styles.button
                } else {
                    &self.styles.button_disabled
                };
                style.render(label)
            })
            .collect();

        let parts: Vec<&str> = rendered.iter().map(String::as_str).collect();
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineState;
    use crate::scheduler::TickMsg;

    fn plain(s: &str) -> String {
        lipgloss::strip_ansi(s)
    }

    #[test]
    fn test_view_shows_zero_clock_before_commit() {
        let m = Model::new();
        let view = plain(&m.view());
        assert!(view.contains("Countdown Timer"));
        assert!(view.contains("00:00"));
        assert!(view.contains("Enter duration (seconds)"));
        assert!(view.contains("idle"));
    }

    #[test]
    fn test_view_shows_committed_duration() {
        let mut m = Model::new();
        m.set_duration("90");
        m.commit();
        assert!(plain(&m.view()).contains("01:30"));
    }

    #[test]
    fn test_buttons_row_lists_all_buttons() {
        let view = plain(&Model::new().buttons_view());
        for label in ["Set Duration", "Start", "Pause", "Reset"] {
            assert!(view.contains(label), "missing {label}");
        }
        assert_eq!(view.lines().count(), 3);
    }

    #[test]
    fn test_finished_clock_uses_plain_clock_style() {
        let mut m = Model::new();
        m.set_duration("1");
        m.commit();
        m.start();
        let handle = m.engine().outstanding_tick().unwrap();
        m.update(Box::new(TickMsg::from(handle)));
        assert_eq!(m.state(), EngineState::Finished);

        let clock = m.styles.clock.render(&format_clock(0));
        assert!(m.view().contains(&clock));
    }

    #[test]
    fn test_empty_title_is_not_rendered() {
        let mut m = Model::new();
        m.title.clear();
        assert!(!plain(&m.view()).contains("Countdown Timer"));
    }
}
