//! Charts panel
//!
//! Draws the bar and line layouts on a braille canvas. Each terminal cell is
//! treated as `CELL_WIDTH` x `CELL_HEIGHT` layout units, so the fixed chart
//! margins come out as a few columns and rows.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Context, Line as CanvasLine, Points, Rectangle},
    widgets::Paragraph,
    Frame,
};

use crate::charts::geometry::Rect as PlotRect;
use crate::charts::{
    bar_layout, line_layout, BarChart, ChartKind, ChartLayout, LineChart, NO_DATA_MSG,
    TOO_SMALL_MSG,
};
use crate::tui::app::App;

use super::panel_block;

const CELL_WIDTH: f64 = 10.0;
const CELL_HEIGHT: f64 = 20.0;

const AXIS_COLOR: Color = Color::Gray;
const BAR_COLOR: Color = Color::Cyan;
const LINE_COLOR: Color = Color::Green;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = panel_block(app, " Charts ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    render_selector(frame, app.chart_kind, chunks[0]);

    let canvas_area = chunks[1];
    let width = f64::from(canvas_area.width) * CELL_WIDTH;
    let height = f64::from(canvas_area.height) * CELL_HEIGHT;

    match app.chart_kind {
        ChartKind::CategoryBar => match bar_layout(&app.category_rows, width, height) {
            ChartLayout::Ready(chart) => draw_bars(frame, canvas_area, &chart, width, height),
            other => render_message(frame, canvas_area, &other),
        },
        ChartKind::MonthlyLine => match line_layout(&app.monthly_rows, width, height) {
            ChartLayout::Ready(chart) => draw_line(frame, canvas_area, &chart, width, height),
            other => render_message(frame, canvas_area, &other),
        },
    }
}

fn render_selector(frame: &mut Frame, active: ChartKind, area: Rect) {
    let option = |kind: ChartKind, key: &'static str| {
        let style = if kind == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(Color::Yellow)),
            Span::styled(format!(" {} ", kind.selector_label()), style),
            Span::raw("  "),
        ]
    };

    let mut selector = option(ChartKind::CategoryBar, "b");
    selector.extend(option(ChartKind::MonthlyLine, "l"));

    let lines = vec![
        Line::from(selector),
        Line::styled(
            active.title(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_message<T>(frame: &mut Frame, area: Rect, layout: &ChartLayout<T>) {
    let message = match layout {
        ChartLayout::TooSmall => TOO_SMALL_MSG,
        _ => NO_DATA_MSG,
    };
    frame.render_widget(
        Paragraph::new(message)
            .centered()
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Layout space has y growing downward; the canvas has it growing upward
fn flip(height: f64, y: f64) -> f64 {
    height - y
}

fn draw_axes(ctx: &mut Context, plot: &PlotRect, height: f64, labels: (String, String)) {
    let bottom = flip(height, plot.bottom());
    let top = flip(height, plot.top());
    ctx.draw(&CanvasLine {
        x1: plot.left(),
        y1: bottom,
        x2: plot.right(),
        y2: bottom,
        color: AXIS_COLOR,
    });
    ctx.draw(&CanvasLine {
        x1: plot.left(),
        y1: bottom,
        x2: plot.left(),
        y2: top,
        color: AXIS_COLOR,
    });
    let (low, high) = labels;
    ctx.print(0.0, bottom, Span::styled(low, Style::default().fg(AXIS_COLOR)));
    ctx.print(0.0, top, Span::styled(high, Style::default().fg(AXIS_COLOR)));
}

/// Shorten an axis label to fit `units` of horizontal space
fn fit_label(label: &str, units: f64) -> String {
    let max_chars = (units / CELL_WIDTH).floor().max(1.0) as usize;
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        label.chars().take(max_chars).collect()
    }
}

fn draw_bars(frame: &mut Frame, area: Rect, chart: &BarChart, width: f64, height: f64) {
    let slot = chart.plot.width / chart.bars.len().max(1) as f64;
    let label_y = flip(height, chart.plot.bottom() + CELL_HEIGHT);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for bar in &chart.bars {
                ctx.draw(&Rectangle {
                    x: bar.rect.left(),
                    y: flip(height, bar.rect.bottom()),
                    width: bar.rect.width,
                    height: bar.rect.height,
                    color: BAR_COLOR,
                });
            }
            draw_axes(ctx, &chart.plot, height, chart.y_labels());
            ctx.layer();

            for bar in &chart.bars {
                let x = bar.rect.left();
                ctx.print(
                    x,
                    label_y,
                    Span::styled(fit_label(&bar.label, slot), Style::default().fg(Color::White)),
                );
                ctx.print(
                    x,
                    flip(height, bar.rect.top() - CELL_HEIGHT / 2.0),
                    Span::styled(
                        fit_label(&bar.value.to_string(), slot),
                        Style::default().fg(BAR_COLOR),
                    ),
                );
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_line(frame: &mut Frame, area: Rect, chart: &LineChart, width: f64, height: f64) {
    let coords: Vec<(f64, f64)> = chart
        .points
        .iter()
        .map(|p| (p.x, flip(height, p.y)))
        .collect();
    let label_y = flip(height, chart.plot.bottom() + CELL_HEIGHT);

    // "YYYY-MM" needs 8 columns; skip labels that would overlap
    let spacing = if chart.points.len() > 1 {
        chart.plot.width / (chart.points.len() - 1) as f64
    } else {
        chart.plot.width
    };
    let every = (8.0 * CELL_WIDTH / spacing).ceil().max(1.0) as usize;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for (a, b) in chart.segments() {
                ctx.draw(&CanvasLine {
                    x1: a.x,
                    y1: flip(height, a.y),
                    x2: b.x,
                    y2: flip(height, b.y),
                    color: LINE_COLOR,
                });
            }
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Yellow,
            });
            draw_axes(ctx, &chart.plot, height, chart.y_labels());
            ctx.layer();

            for (i, point) in chart.points.iter().enumerate() {
                if i % every == 0 {
                    ctx.print(
                        (point.x - 3.5 * CELL_WIDTH).max(0.0),
                        label_y,
                        Span::styled(point.label.clone(), Style::default().fg(Color::White)),
                    );
                }
            }
        });

    frame.render_widget(canvas, area);
}
