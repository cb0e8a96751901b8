//! Footer key hints.
//!
//! Format: `j/k scroll  PgUp/PgDn page  q quit`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "j/k", "PgUp/PgDn").
    pub key: String,
    /// The action description (e.g., "scroll", "quit").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Hints shown under the timeline.
pub fn default_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("j/k", "scroll"),
        KeyHint::new("PgUp/PgDn", "page"),
        KeyHint::new("q", "quit"),
    ]
}

/// Footer hints widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_style = Style::default().fg(self.theme.primary);
        let action_style = Style::default().fg(self.theme.muted);

        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(hint.key.clone(), key_style));
            spans.push(Span::styled(format!(" {}", hint.action), action_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_footer_layout() {
        let theme = Theme::monochrome();
        let hints = default_hints();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        FooterHints::new(&hints, &theme).render(area, &mut buf);
        assert_eq!(
            buffer_to_string(&buf).trim_end(),
            "j/k scroll  PgUp/PgDn page  q quit"
        );
    }

    #[test]
    fn test_empty_hints_render_nothing() {
        let theme = Theme::monochrome();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        FooterHints::new(&[], &theme).render(area, &mut buf);
        assert_eq!(buffer_to_string(&buf).trim(), "");
    }
}
