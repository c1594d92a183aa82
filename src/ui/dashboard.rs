use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

use crate::aggregator::Category;
use crate::model::horizon::Horizon;
use crate::view_model::cards::{Badge, BacktestCard, PredictionCard};
use crate::view_model::features::RankedFeature;
use crate::view_model::pivot::MetricsPivot;
use crate::view_model::trend::Trend;

use super::chart::STRATEGY_COLOR;

const ACCENT: Color = STRATEGY_COLOR;

pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Up => Color::Green,
        Trend::Down => Color::Red,
        Trend::Neutral => Color::Gray,
    }
}

fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
        Trend::Neutral => "─",
    }
}

fn card_block(title: String) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn left_rule() -> Block<'static> {
    Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn badge_line(badge: &Badge, label_width: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<width$}", badge.label, width = label_width),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            badge.value.clone(),
            Style::default()
                .fg(trend_color(badge.trend))
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn split_even(area: Rect, n: usize) -> Vec<Rect> {
    if n == 0 {
        return Vec::new();
    }
    let constraints: Vec<Constraint> = (0..n).map(|_| Constraint::Ratio(1, n as u32)).collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

pub struct PredictionPanel<'a> {
    cards: &'a [PredictionCard],
}

impl<'a> PredictionPanel<'a> {
    pub fn new(cards: &'a [PredictionCard]) -> Self {
        Self { cards }
    }
}

impl Widget for PredictionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card_block(" Predictions ".to_string());
        let inner = block.inner(area);
        block.render(area, buf);

        for (card, cell) in self.cards.iter().zip(split_even(inner, self.cards.len())) {
            match card {
                PredictionCard::Missing { horizon } => {
                    Paragraph::new(Line::from(Span::styled(
                        format!("No data for {}", horizon),
                        Style::default().fg(Color::DarkGray),
                    )))
                    .alignment(Alignment::Center)
                    .block(left_rule())
                    .render(cell, buf);
                }
                PredictionCard::Available {
                    horizon, direction, ..
                } => {
                    let mut lines = vec![Line::from(vec![
                        Span::styled(
                            format!("{} ", horizon.key().to_ascii_uppercase()),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            trend_arrow(*direction),
                            Style::default().fg(trend_color(*direction)),
                        ),
                    ])];
                    lines.extend(card.badges().into_iter().map(|b| badge_line(b, 15)));
                    Paragraph::new(lines)
                        .block(left_rule())
                        .render(cell, buf);
                }
            }
        }
    }
}

pub struct BacktestPanel<'a> {
    cards: &'a [BacktestCard],
}

impl<'a> BacktestPanel<'a> {
    pub fn new(cards: &'a [BacktestCard]) -> Self {
        Self { cards }
    }
}

impl Widget for BacktestPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card_block(" Backtest Performance ".to_string());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.cards.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "No backtest results",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        for (card, cell) in self.cards.iter().zip(split_even(inner, self.cards.len())) {
            let mut lines = vec![Line::from(Span::styled(
                card.horizon.key().to_ascii_uppercase(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ))];
            lines.extend(card.badges.iter().map(|b| badge_line(b, 10)));
            if let Some(period) = &card.test_period {
                lines.push(Line::from(Span::styled(
                    period.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Paragraph::new(lines)
                .block(left_rule())
                .render(cell, buf);
        }
    }
}

pub struct MetricsTablePanel<'a> {
    pivot: &'a MetricsPivot,
}

impl<'a> MetricsTablePanel<'a> {
    pub fn new(pivot: &'a MetricsPivot) -> Self {
        Self { pivot }
    }
}

impl Widget for MetricsTablePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
        let mut header = vec![Cell::from("Model")];
        for h in &self.pivot.horizons {
            let key = h.key().to_ascii_uppercase();
            header.push(Cell::from(format!("{} MAE", key)));
            header.push(Cell::from(format!("{} Dir Acc", key)));
        }

        let rows: Vec<Row> = self
            .pivot
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![Cell::from(row.model.display_name())
                    .style(Style::default().fg(Color::White))];
                for c in &row.cells {
                    cells.push(Cell::from(c.mae.clone()));
                    cells.push(Cell::from(c.directional_accuracy.clone()));
                }
                Row::new(cells).style(Style::default().fg(Color::Gray))
            })
            .collect();

        let mut widths = vec![Constraint::Length(14)];
        widths.extend(self.pivot.horizons.iter().flat_map(|_| {
            [Constraint::Length(10), Constraint::Length(12)]
        }));

        Table::new(rows, widths)
            .header(Row::new(header).style(header_style))
            .block(card_block(" Model Comparison ".to_string()))
            .render(area, buf);
    }
}

pub struct FeaturePanel<'a> {
    features: &'a [RankedFeature],
    horizon: Horizon,
}

impl<'a> FeaturePanel<'a> {
    pub fn new(features: &'a [RankedFeature], horizon: Horizon) -> Self {
        Self { features, horizon }
    }
}

impl Widget for FeaturePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card_block(format!(" Top Features - {}D ", self.horizon.days()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.features.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "No feature importance data",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        // name(15) + space + bar + space + score(6)
        let bar_width = inner.width.saturating_sub(15 + 1 + 1 + 6) as usize;
        let lines: Vec<Line> = self
            .features
            .iter()
            .map(|f| {
                let filled = ((f.relative * bar_width as f64).round() as usize).min(bar_width);
                Line::from(vec![
                    Span::styled(
                        format!("{:<15}", f.display_name),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(" "),
                    Span::styled("█".repeat(filled), Style::default().fg(ACCENT)),
                    Span::raw(" ".repeat(bar_width - filled + 1)),
                    Span::styled(f.score_text.clone(), Style::default().fg(Color::White)),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Full-screen message shown when no predictions are available.
pub struct EmptyState<'a> {
    pub message: &'a str,
    pub detail: &'a str,
}

impl Widget for EmptyState<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let top_pad = area.height.saturating_sub(4) / 2;
        let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
        lines.push(Line::from(Span::styled(
            self.message,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            self.detail,
            Style::default().fg(Color::DarkGray),
        )));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(card_block(" S&P 500 Forecasting ".to_string()))
            .render(area, buf);
    }
}

pub struct StatusBar<'a> {
    pub base_url: &'a str,
    pub horizon: Horizon,
    pub fetching: bool,
    pub last_updated: Option<&'a str>,
    pub degraded: &'a [Category],
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sync_status = if self.fetching {
            Span::styled("FETCHING", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(
                format!("updated {}", self.last_updated.unwrap_or("never")),
                Style::default().fg(Color::DarkGray),
            )
        };

        let source_status = if self.degraded.is_empty() {
            Span::styled("sources OK", Style::default().fg(Color::Green))
        } else {
            let names: Vec<&str> = self.degraded.iter().map(|c| c.name()).collect();
            Span::styled(
                format!("degraded: {}", names.join(",")),
                Style::default().fg(Color::Red),
            )
        };

        let line = Line::from(vec![
            Span::styled(
                " forecast-board ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.base_url, Style::default().fg(Color::Cyan)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("horizon {} ({})", self.horizon, self.horizon.label()),
                Style::default().fg(ACCENT),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            sync_status,
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            source_status,
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct LogPanel<'a> {
    messages: &'a [String],
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a [String]) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let max_lines = area.height.saturating_sub(2) as usize;
        let start = self.messages.len().saturating_sub(max_lines);
        let lines: Vec<Line> = self.messages[start..]
            .iter()
            .map(|m| Line::from(Span::styled(m.as_str(), Style::default().fg(Color::Gray))))
            .collect();

        let block = Block::default()
            .title(" System Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct KeybindBar;

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(" [Q]", Style::default().fg(Color::Yellow)),
            Span::styled("uit  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[R]", Style::default().fg(Color::Yellow)),
            Span::styled("efresh  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[1]", Style::default().fg(Color::Yellow)),
            Span::styled(" 1D  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[5]", Style::default().fg(Color::Yellow)),
            Span::styled(" 5D  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[2]", Style::default().fg(Color::Yellow)),
            Span::styled(" 20D  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
            Span::styled(" next horizon", Style::default().fg(Color::DarkGray)),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
