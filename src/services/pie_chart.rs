//! Pie chart geometry: category amounts to ordered SVG wedges.
//!
//! Slices start at 12 o'clock (-90 degrees) and sweep clockwise in the
//! order the categories were received. Colors cycle through the palette.

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::filters::round_to;
use crate::models::CategoryAmounts;

const START_ANGLE_DEG: f64 = -90.0;
const FULL_CIRCLE_EPSILON: f64 = 1e-9;

/// Circle placement in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieLayout {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Default for PieLayout {
    fn default() -> Self {
        Self {
            cx: 100.0,
            cy: 100.0,
            radius: 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the total, rounded to one decimal. Rounded shares need not sum to 100.
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub path: String,
    pub color: String,
}

impl PieSlice {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "slices", rename_all = "snake_case")]
pub enum PieChart {
    NoData,
    Ready(Vec<PieSlice>),
}

impl PieChart {
    pub fn slices(&self) -> &[PieSlice] {
        match self {
            Self::NoData => &[],
            Self::Ready(slices) => slices,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Compute pie slices for `amounts` with the default layout.
pub fn compute(amounts: &CategoryAmounts, palette: &[String]) -> AppResult<PieChart> {
    compute_with_layout(amounts, palette, PieLayout::default())
}

pub fn compute_with_layout(
    amounts: &CategoryAmounts,
    palette: &[String],
    layout: PieLayout,
) -> AppResult<PieChart> {
    amounts.validate()?;

    let total = amounts.total();
    if amounts.is_empty() || total <= 0.0 {
        tracing::debug!(categories = amounts.len(), "No data for pie chart");
        return Ok(PieChart::NoData);
    }
    if palette.is_empty() {
        return Err(AppError::InvalidInput("color palette is empty".into()));
    }

    let mut cursor = START_ANGLE_DEG;
    let slices = amounts
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let sweep = value / total * 360.0;
            let start_angle = cursor;
            let end_angle = cursor + sweep;
            cursor = end_angle;

            PieSlice {
                label: label.to_string(),
                value,
                percentage: round_to(value / total * 100.0, 1),
                start_angle,
                end_angle,
                path: slice_path(&layout, start_angle, end_angle),
                color: palette[index % palette.len()].clone(),
            }
        })
        .collect();

    Ok(PieChart::Ready(slices))
}

/// SVG path for one wedge. A full 360 degree sweep would start and end on
/// the same point, so it is drawn as two half-circle arcs instead.
fn slice_path(layout: &PieLayout, start_angle: f64, end_angle: f64) -> String {
    let sweep = end_angle - start_angle;
    let PieLayout { cx, cy, radius: r } = *layout;

    if sweep >= 360.0 - FULL_CIRCLE_EPSILON {
        let (tx, ty) = point_on_circle(layout, start_angle);
        let (bx, by) = point_on_circle(layout, start_angle + 180.0);
        return format!(
            "M {} {} A {} {} 0 1 1 {} {} A {} {} 0 1 1 {} {} Z",
            fmt_coord(tx),
            fmt_coord(ty),
            fmt_coord(r),
            fmt_coord(r),
            fmt_coord(bx),
            fmt_coord(by),
            fmt_coord(r),
            fmt_coord(r),
            fmt_coord(tx),
            fmt_coord(ty),
        );
    }

    let (x1, y1) = point_on_circle(layout, start_angle);
    let (x2, y2) = point_on_circle(layout, end_angle);
    let large_arc = if sweep > 180.0 { 1 } else { 0 };

    format!(
        "M {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
        fmt_coord(cx),
        fmt_coord(cy),
        fmt_coord(x1),
        fmt_coord(y1),
        fmt_coord(r),
        fmt_coord(r),
        large_arc,
        fmt_coord(x2),
        fmt_coord(y2),
    )
}

fn point_on_circle(layout: &PieLayout, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (
        layout.cx + layout.radius * rad.cos(),
        layout.cy + layout.radius * rad.sin(),
    )
}

/// Four decimals, trailing zeros trimmed, never "-0".
pub(crate) fn fmt_coord(value: f64) -> String {
    let rounded = round_to(value, 4);
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{:.4}", rounded);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
