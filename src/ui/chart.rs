use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::model::equity::{EquityCurveSeries, EquityPoint};
use crate::model::horizon::Horizon;
use crate::view_model::equity::{format_axis_date, EquitySummary, PerformanceClass};
use crate::view_model::format::format_ratio;

pub const STRATEGY_COLOR: Color = Color::Rgb(255, 102, 0);
pub const BENCHMARK_COLOR: Color = Color::Rgb(74, 158, 255);

pub struct EquityChart<'a> {
    series: &'a EquityCurveSeries,
    summary: &'a EquitySummary,
    horizon: Horizon,
}

impl<'a> EquityChart<'a> {
    pub fn new(
        series: &'a EquityCurveSeries,
        summary: &'a EquitySummary,
        horizon: Horizon,
    ) -> Self {
        Self {
            series,
            summary,
            horizon,
        }
    }
}

/// Downsample `points` to at most `width` columns, keeping the last point.
fn visible_columns(points: &[EquityPoint], width: usize) -> Vec<&EquityPoint> {
    if width == 0 || points.is_empty() {
        return Vec::new();
    }
    if points.len() <= width {
        return points.iter().collect();
    }
    let step = points.len() as f64 / width as f64;
    let mut out: Vec<&EquityPoint> = (0..width)
        .map(|i| &points[((i as f64 * step) as usize).min(points.len() - 1)])
        .collect();
    if let Some(last) = out.last_mut() {
        *last = &points[points.len() - 1];
    }
    out
}

impl Widget for EquityChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Equity Curve - {}D Horizon ", self.horizon.days()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 10 {
            return;
        }

        if self.series.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y + inner.height / 2,
                "No equity curve data",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        // Top row: legend and final values. Bottom row: date axis.
        let outperf_color = match self.summary.class {
            PerformanceClass::Positive => Color::Green,
            PerformanceClass::Negative => Color::Red,
        };
        let legend = Line::from(vec![
            Span::styled("● Strategy ", Style::default().fg(STRATEGY_COLOR)),
            Span::styled(
                format!("{}x  ", self.summary.final_strategy_text),
                Style::default().fg(Color::White),
            ),
            Span::styled("● Benchmark (S&P 500) ", Style::default().fg(BENCHMARK_COLOR)),
            Span::styled(
                format!("{}x  ", self.summary.final_benchmark_text),
                Style::default().fg(Color::White),
            ),
            Span::styled("Outperf: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.summary.outperformance_text.clone(),
                Style::default().fg(outperf_color),
            ),
        ]);
        buf.set_line(inner.x, inner.y, &legend, inner.width);

        let label_width = 7u16;
        let plot = Rect {
            x: inner.x + label_width,
            y: inner.y + 1,
            width: inner.width.saturating_sub(label_width),
            height: inner.height.saturating_sub(2),
        };
        if plot.height < 1 || plot.width < 2 {
            return;
        }

        let visible = visible_columns(self.series.points(), plot.width as usize);
        let (min_v, max_v) = visible.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, p| {
            (
                acc.0.min(p.cumulative_strategy).min(p.cumulative_benchmark),
                acc.1.max(p.cumulative_strategy).max(p.cumulative_benchmark),
            )
        });
        let range = max_v - min_v;
        let range = if range < 1e-6 { 1.0 } else { range };
        let rows = plot.height as usize;

        let y_of = |v: f64| -> u16 {
            let normalized = ((v - min_v) / range).clamp(0.0, 1.0);
            let offset = ((normalized * (rows - 1) as f64).round() as usize).min(rows - 1);
            plot.y + (rows - 1 - offset) as u16
        };

        let benchmark_style = Style::default().fg(BENCHMARK_COLOR);
        let strategy_style = Style::default().fg(STRATEGY_COLOR);
        for (i, p) in visible.iter().enumerate() {
            let x = plot.x + i as u16;
            buf.set_string(x, y_of(p.cumulative_benchmark), "·", benchmark_style);
            buf.set_string(x, y_of(p.cumulative_strategy), "•", strategy_style);
        }

        buf.set_string(
            inner.x,
            plot.y,
            format_ratio(max_v),
            Style::default().fg(Color::DarkGray),
        );
        buf.set_string(
            inner.x,
            plot.y + plot.height - 1,
            format_ratio(min_v),
            Style::default().fg(Color::DarkGray),
        );

        let axis_y = inner.y + inner.height - 1;
        let first = format_axis_date(self.summary.first_date);
        let last = format_axis_date(self.summary.last_date);
        buf.set_string(plot.x, axis_y, &first, Style::default().fg(Color::DarkGray));
        let last_x = (plot.x + plot.width).saturating_sub(last.chars().count() as u16);
        if last_x > plot.x + first.chars().count() as u16 {
            buf.set_string(last_x, axis_y, &last, Style::default().fg(Color::DarkGray));
        }
    }
}
