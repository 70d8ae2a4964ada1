//! Calculator view: measurement form and result panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::{render_footer, Status};
use crate::domain::BmiResult;
use crate::tui::styles::Theme;

/// Lowest and highest BMI shown on the result gauge.
const GAUGE_MIN_BMI: f64 = 10.0;
const GAUGE_MAX_BMI: f64 = 40.0;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
}

/// Calculator form state
#[derive(Debug, Clone)]
pub struct CalculatorFormState {
    pub fields: [FormField; 2],
    pub selected_field: usize,
}

impl Default for CalculatorFormState {
    fn default() -> Self {
        Self {
            fields: [
                FormField {
                    label: "Height",
                    hint: "cm",
                    value: String::new(),
                },
                FormField {
                    label: "Weight",
                    hint: "kg",
                    value: String::new(),
                },
            ],
            selected_field: 0,
        }
    }
}

impl CalculatorFormState {
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field. Only digits and one decimal
    /// point are accepted.
    pub fn input_char(&mut self, c: char) {
        let value = &mut self.fields[self.selected_field].value;
        if c.is_ascii_digit() || (c == '.' && !value.contains('.')) {
            value.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    #[must_use]
    pub fn height(&self) -> &str {
        &self.fields[0].value
    }

    #[must_use]
    pub fn weight(&self) -> &str {
        &self.fields[1].value
    }
}

/// Render the calculator screen.
pub fn render_calculator(
    f: &mut Frame,
    area: Rect,
    state: &CalculatorFormState,
    result: Option<&BmiResult>,
    saved_count: usize,
    status: Option<&Status>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], saved_count);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .margin(1)
        .split(chunks[1]);

    render_form(f, body[0], state);
    render_result(f, body[1], result);

    render_footer(
        f,
        chunks[2],
        status,
        &[
            ("↑↓", "Field"),
            ("Enter", "Calculate"),
            ("S", "Save"),
            ("H", "History"),
            ("Esc", "Reset"),
            ("Q", "Quit"),
        ],
    );
}

fn render_header(f: &mut Frame, area: Rect, saved_count: usize) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("BMI Calculator", Theme::title()),
        Span::styled(" │ ", Theme::text_muted()),
        Span::styled(
            format!("{saved_count} saved"),
            Theme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, state: &CalculatorFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    for (i, field) in state.fields.iter().enumerate() {
        let is_selected = i == state.selected_field;
        let (border_style, title_style) = if is_selected {
            (Theme::border_focused(), Theme::focused())
        } else {
            (Theme::border(), Theme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ({}) ", field.label, field.hint),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(format!("enter {}", field.label.to_lowercase()), Theme::text_muted())
        } else {
            Span::styled(field.value.as_str(), Theme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", Theme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_result(f: &mut Frame, area: Rect, result: Option<&BmiResult>) {
    let Some(result) = result else {
        let idle = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No result", Theme::text_secondary())),
            Line::from(""),
            Line::from(Span::styled(
                "Enter height and weight, then press [Enter]",
                Theme::text_muted(),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
        f.render_widget(idle, area);
        return;
    };

    let band = result.band();
    let band_style = Theme::band(band);

    let block = Block::default()
        .title(Span::styled(" Result ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(band_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Value and label
            Constraint::Length(3), // Gauge
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("BMI ", Theme::text_secondary()),
            Span::styled(result.bmi.as_str(), band_style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(result.description.as_str(), band_style),
            Span::styled(format!(" ({band})"), Theme::text_secondary()),
        ]),
        Line::from(Span::styled(
            format!("{} cm · {} kg", result.height, result.weight),
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(summary, chunks[0]);

    let ratio = result
        .value()
        .map_or(0.0, |v| ((v - GAUGE_MIN_BMI) / (GAUGE_MAX_BMI - GAUGE_MIN_BMI)).clamp(0.0, 1.0));

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(band_style)
        .ratio(ratio)
        .label(format!("{GAUGE_MIN_BMI:.0} ─ {} ─ {GAUGE_MAX_BMI:.0}", result.bmi));
    f.render_widget(gauge, chunks[1]);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("[R] ", Theme::key_hint()),
        Span::styled("Recalculate  ", Theme::key_desc()),
        Span::styled("[S] ", Theme::key_hint()),
        Span::styled("Save to history", Theme::key_desc()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(hint, chunks[2]);
}
