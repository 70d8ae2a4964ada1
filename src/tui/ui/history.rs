//! History view: saved results, newest first.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{render_footer, Status};
use crate::domain::HistoryRecord;
use crate::tui::styles::Theme;

/// Selection within the history list.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryViewState {
    pub selected: usize,
}

impl HistoryViewState {
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside a list of `len` records.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Render the history screen.
pub fn render_history(
    f: &mut Frame,
    area: Rect,
    records: &[HistoryRecord],
    state: HistoryViewState,
    max_len: usize,
    status: Option<&Status>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // List
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("BMI History", Theme::title()),
        Span::styled(" │ ", Theme::text_muted()),
        Span::styled(
            format!("{} of {max_len} kept", records.len()),
            Theme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );
    f.render_widget(header, chunks[0]);

    render_list(f, chunks[1], records, state);

    render_footer(
        f,
        chunks[2],
        status,
        &[
            ("↑↓", "Select"),
            ("D", "Delete"),
            ("C", "Clear all"),
            ("Esc", "Back"),
        ],
    );
}

fn render_list(f: &mut Frame, area: Rect, records: &[HistoryRecord], state: HistoryViewState) {
    let block = Block::default()
        .title(Span::styled(" Saved Results ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if records.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No saved results yet. Calculate, then press [S] to save.",
            Theme::text_muted(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = records.iter().map(record_line).map(ListItem::new).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected())
        .highlight_symbol("› ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected.min(records.len() - 1)));

    f.render_stateful_widget(list, area, &mut list_state);
}

fn record_line(record: &HistoryRecord) -> Line<'_> {
    let band_style = Theme::band(record.band());

    Line::from(vec![
        Span::styled("▌ ", band_style),
        Span::styled(format!("{:<4}", record.result.description), band_style),
        Span::styled("  BMI ", Theme::text_muted()),
        Span::styled(format!("{:<6}", record.result.bmi), Theme::text()),
        Span::styled("  weight ", Theme::text_muted()),
        Span::styled(format!("{:<7}", format!("{}kg", record.result.weight)), Theme::text()),
        Span::styled("  height ", Theme::text_muted()),
        Span::styled(format!("{:<6}", record.result.height), Theme::text()),
        Span::styled(format!("  {}", record.date), Theme::text_secondary()),
    ])
}
