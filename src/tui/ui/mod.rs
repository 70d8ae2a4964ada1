//! UI module: View components for the TUI.

pub mod calculator;
pub mod history;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "BMI is a screening measure and does not replace professional medical evaluation.",
        Theme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// One-line feedback shown in place of the key hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub error: bool,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: true,
        }
    }
}

/// Footer line: the status if present, otherwise key hints.
pub(crate) fn render_footer(
    f: &mut Frame,
    area: Rect,
    status: Option<&Status>,
    hints: &[(&'static str, &'static str)],
) {
    let content = if let Some(status) = status {
        let style = if status.error {
            Theme::danger()
        } else {
            Theme::focused()
        };
        Line::from(vec![
            Span::styled(if status.error { "! " } else { "> " }, style),
            Span::styled(status.message.clone(), style),
        ])
    } else {
        Line::from(
            hints
                .iter()
                .flat_map(|(key, desc)| {
                    [
                        Span::styled(format!("[{key}] "), Theme::key_hint()),
                        Span::styled(format!("{desc} "), Theme::key_desc()),
                    ]
                })
                .collect::<Vec<_>>(),
        )
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
