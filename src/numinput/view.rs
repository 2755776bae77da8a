//! View rendering for the numeric input.

use super::model::Model;

impl Model {
    /// Renders the prompt followed by the text, or the placeholder when the
    /// text is empty. The cursor is drawn only while focused.
    pub fn view(&self) -> String {
        if self.value.is_empty() && !self.placeholder.is_empty() {
            return self.placeholder_view();
        }

        let mut v = String::new();
        let head: String = self.value[..self.pos].iter().collect();
        v.push_str(&self.text_style.render(&head));

        if self.focus {
            let under = self.value.get(self.pos).copied().unwrap_or(' ');
            v.push_str(&self.cursor_style.render(&under.to_string()));
            if self.pos + 1 < self.value.len() {
                let tail: String = self.value[self.pos + 1..].iter().collect();
                v.push_str(&self.text_style.render(&tail));
            }
        } else if self.pos < self.value.len() {
            let tail: String = self.value[self.pos..].iter().collect();
            v.push_str(&self.text_style.render(&tail));
        }

        format!("{}{}", self.prompt_style.render(&self.prompt), v)
    }

    pub(super) fn placeholder_view(&self) -> String {
        let mut chars = self.placeholder.chars();
        let mut v = String::new();

        if self.focus {
            if let Some(first) = chars.next() {
                v.push_str(&self.cursor_style.render(&first.to_string()));
            }
        }
        let rest: String = chars.collect();
        if !rest.is_empty() {
            v.push_str(&self.placeholder_style.render(&rest));
        }

        format!("{}{}", self.prompt_style.render(&self.prompt), v)
    }
}
