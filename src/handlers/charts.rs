//! Server-rendered SVG charts.
//!
//! Geometry comes from the chart services; this module only positions
//! legends, axes and labels and formats the numbers for display.

use askama::Template;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::config::Config;
use crate::error::AppResult;
use crate::filters::{format_amount, format_delta, format_share};
use crate::handlers::params::PeriodParams;
use crate::services::dashboard;
use crate::services::line_chart::{LineChart, LineSeries};
use crate::services::pie_chart::{fmt_coord, PieChart};
use crate::state::AppState;

const PIE_WIDTH: u32 = 480;
const PIE_HEIGHT: u32 = 200;
const LEGEND_X: f64 = 220.0;
const LEGEND_TOP: f64 = 20.0;
const LEGEND_ROW: f64 = 22.0;
const LEGEND_LABEL_OFFSET: f64 = 22.0;
const LEGEND_RIGHT_MARGIN: f64 = 10.0;

const LINE_WIDTH: f64 = 800.0;
const LINE_HEIGHT: f64 = 400.0;
const PAD_TOP: f64 = 40.0;
const PAD_RIGHT: f64 = 40.0;
const PAD_BOTTOM: f64 = 100.0;
const PAD_LEFT: f64 = 80.0;

pub struct LegendEntry {
    pub label: String,
    pub detail: String,
    pub color: String,
    pub y: String,
    pub swatch_y: String,
}

pub struct WedgeView {
    pub path: String,
    pub color: String,
    pub title: String,
}

#[derive(Template)]
#[template(path = "charts/pie.svg", escape = "html")]
pub struct PieTemplate {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub legend_x: String,
    pub label_x: String,
    pub detail_x: String,
    pub wedges: Vec<WedgeView>,
    pub legend: Vec<LegendEntry>,
}

impl PieTemplate {
    pub fn build(title: &str, chart: &PieChart, config: &Config) -> Self {
        let mut wedges = Vec::new();
        let mut legend = Vec::new();

        for (i, slice) in chart.slices().iter().enumerate() {
            let amount = format_amount(slice.value, &config.currency, &config.locale);
            let share = format_share(slice.percentage, &config.locale);
            let row_y = LEGEND_TOP + LEGEND_ROW * i as f64;

            wedges.push(WedgeView {
                path: slice.path.clone(),
                color: slice.color.clone(),
                title: format!("{}: {} ({})", slice.label, amount, share),
            });
            legend.push(LegendEntry {
                label: slice.label.clone(),
                detail: format!("{} · {}", amount, share),
                color: slice.color.clone(),
                y: fmt_coord(row_y + 12.0),
                swatch_y: fmt_coord(row_y),
            });
        }

        let rows = legend.len() as f64;
        let height = (LEGEND_TOP * 2.0 + LEGEND_ROW * rows).max(PIE_HEIGHT as f64) as u32;

        Self {
            title: title.to_string(),
            width: PIE_WIDTH,
            height,
            legend_x: fmt_coord(LEGEND_X),
            label_x: fmt_coord(LEGEND_X + LEGEND_LABEL_OFFSET),
            detail_x: fmt_coord(PIE_WIDTH as f64 - LEGEND_RIGHT_MARGIN),
            wedges,
            legend,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.wedges.is_empty()
    }
}

pub struct GridLine {
    pub y: String,
    pub label: String,
}

pub struct AxisLabel {
    pub x: String,
    pub y: String,
    pub text: String,
}

pub struct Marker {
    pub cx: String,
    pub cy: String,
    pub title: String,
}

pub struct SeriesView {
    pub name: String,
    pub color: String,
    pub points: String,
    pub markers: Vec<Marker>,
}

#[derive(Template)]
#[template(path = "charts/line.svg", escape = "html")]
pub struct LineTemplate {
    pub title: String,
    pub width: String,
    pub height: String,
    pub left: String,
    pub right: String,
    pub bottom: String,
    pub gridlines: Vec<GridLine>,
    pub labels: Vec<AxisLabel>,
    pub series: Vec<SeriesView>,
}

impl LineTemplate {
    pub fn build(title: &str, names: (&str, &str), chart: &LineChart, config: &Config) -> Self {
        let plot_w = LINE_WIDTH - PAD_LEFT - PAD_RIGHT;
        let plot_h = LINE_HEIGHT - PAD_TOP - PAD_BOTTOM;
        let to_x = |x: f64| PAD_LEFT + x * plot_w;
        let to_y = |y: f64| PAD_TOP + y * plot_h;
        let money = |v: f64| format_amount(v, &config.currency, &config.locale);

        let (gridlines, labels, series) = match chart.series() {
            None => (Vec::new(), Vec::new(), Vec::new()),
            Some(s) => {
                let gridlines = s
                    .gridlines()
                    .iter()
                    .map(|v| GridLine {
                        y: fmt_coord(to_y(s.y_position(*v))),
                        label: money(*v),
                    })
                    .collect();
                let labels = s
                    .axis
                    .iter()
                    .enumerate()
                    .map(|(i, text)| AxisLabel {
                        x: fmt_coord(to_x(s.x_position(i))),
                        y: fmt_coord(LINE_HEIGHT - PAD_BOTTOM + 16.0),
                        text: text.clone(),
                    })
                    .collect();
                let palette = &config.palette;
                let color_a = palette.first().cloned().unwrap_or_default();
                let color_b = palette
                    .get(1 % palette.len().max(1))
                    .cloned()
                    .unwrap_or_default();
                let series = vec![
                    series_view(s, names.0, color_a, &s.values_a, &to_x, &to_y, |i| {
                        format!("{} {}: {}", names.0, s.axis[i], money(s.values_a[i]))
                    }),
                    series_view(s, names.1, color_b, &s.values_b, &to_x, &to_y, |i| {
                        format!(
                            "{} {}: {} ({})",
                            names.1,
                            s.axis[i],
                            money(s.values_b[i]),
                            format_delta(s.deltas[i], &config.currency, &config.locale)
                        )
                    }),
                ];
                (gridlines, labels, series)
            }
        };

        Self {
            title: title.to_string(),
            width: fmt_coord(LINE_WIDTH),
            height: fmt_coord(LINE_HEIGHT),
            left: fmt_coord(PAD_LEFT),
            right: fmt_coord(LINE_WIDTH - PAD_RIGHT),
            bottom: fmt_coord(LINE_HEIGHT - PAD_BOTTOM),
            gridlines,
            labels,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

fn series_view(
    s: &LineSeries,
    name: &str,
    color: String,
    values: &[f64],
    to_x: &dyn Fn(f64) -> f64,
    to_y: &dyn Fn(f64) -> f64,
    title: impl Fn(usize) -> String,
) -> SeriesView {
    let markers: Vec<Marker> = values
        .iter()
        .enumerate()
        .map(|(i, v)| Marker {
            cx: fmt_coord(to_x(s.x_position(i))),
            cy: fmt_coord(to_y(s.y_position(*v))),
            title: title(i),
        })
        .collect();
    let points = markers
        .iter()
        .map(|m| format!("{},{}", m.cx, m.cy))
        .collect::<Vec<_>>()
        .join(" ");

    SeriesView {
        name: name.to_string(),
        color,
        points,
        markers,
    }
}

fn svg(body: String) -> Response {
    ([(header::CONTENT_TYPE, "image/svg+xml")], body).into_response()
}

pub async fn expense_pie(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<Response> {
    let (window, _) = params.resolve_window(state.today());
    let title = format!("Expenses, {}", window.label);
    let snapshot =
        dashboard::load_snapshot(state.provider.as_ref(), window, &state.config.palette).await?;
    let template = PieTemplate::build(&title, &snapshot.expense_chart, &state.config);
    Ok(svg(template.render()?))
}

pub async fn income_pie(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<Response> {
    let (window, _) = params.resolve_window(state.today());
    let title = format!("Income, {}", window.label);
    let snapshot =
        dashboard::load_snapshot(state.provider.as_ref(), window, &state.config.palette).await?;
    let template = PieTemplate::build(&title, &snapshot.income_chart, &state.config);
    Ok(svg(template.render()?))
}

/// Previous window against the selected one, expenses by category.
pub async fn comparison(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<Response> {
    let (window, _) = params.resolve_window(state.today());
    let cmp = dashboard::load_comparison(state.provider.as_ref(), window).await?;
    let title = format!("Expenses, {} vs {}", cmp.previous.label, cmp.current.label);
    let template = LineTemplate::build(
        &title,
        (&cmp.previous.label, &cmp.current.label),
        &cmp.chart,
        &state.config,
    );
    Ok(svg(template.render()?))
}
