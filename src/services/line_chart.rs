//! Two-series comparison over a shared category axis.

use serde::Serialize;

use crate::error::AppResult;
use crate::models::CategoryAmounts;

/// Smallest vertical scale, so near-zero data does not blow up.
const MIN_SCALE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub axis: Vec<String>,
    pub values_a: Vec<f64>,
    pub values_b: Vec<f64>,
    /// `values_b - values_a`, sign preserved.
    pub deltas: Vec<f64>,
    pub max_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRow {
    pub category: String,
    pub value_a: f64,
    pub value_b: f64,
    pub delta: f64,
}

/// Normalized plot position: `x` and `y` in `[0, 1]`, `y = 0` at the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "series", rename_all = "snake_case")]
pub enum LineChart {
    NoData,
    Ready(LineSeries),
}

impl LineChart {
    pub fn series(&self) -> Option<&LineSeries> {
        match self {
            Self::NoData => None,
            Self::Ready(series) => Some(series),
        }
    }
}

/// Align `a` and `b` on one axis: `a`'s labels in order, then labels only
/// `b` has, in `b`'s order. Missing values are zero.
pub fn compute(a: &CategoryAmounts, b: &CategoryAmounts) -> AppResult<LineChart> {
    a.validate()?;
    b.validate()?;

    let mut axis: Vec<String> = a.labels().map(String::from).collect();
    axis.extend(b.labels().filter(|l| !a.contains(l)).map(String::from));

    if axis.is_empty() {
        return Ok(LineChart::NoData);
    }

    let values_a: Vec<f64> = axis.iter().map(|l| a.get(l).unwrap_or(0.0)).collect();
    let values_b: Vec<f64> = axis.iter().map(|l| b.get(l).unwrap_or(0.0)).collect();
    let deltas = values_a
        .iter()
        .zip(&values_b)
        .map(|(va, vb)| vb - va)
        .collect();

    let peak = values_a
        .iter()
        .chain(&values_b)
        .copied()
        .fold(MIN_SCALE, f64::max);
    let max_value = (peak / 100.0).ceil() * 100.0;

    tracing::debug!(categories = axis.len(), max_value, "Aligned line series");

    Ok(LineChart::Ready(LineSeries {
        axis,
        values_a,
        values_b,
        deltas,
        max_value,
    }))
}

impl LineSeries {
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    pub fn rows(&self) -> Vec<LineRow> {
        self.axis
            .iter()
            .enumerate()
            .map(|(i, category)| LineRow {
                category: category.clone(),
                value_a: self.values_a[i],
                value_b: self.values_b[i],
                delta: self.deltas[i],
            })
            .collect()
    }

    /// Horizontal position of axis entry `index`. A lone entry is centered.
    pub fn x_position(&self, index: usize) -> f64 {
        if self.len() <= 1 {
            0.5
        } else {
            index as f64 / (self.len() - 1) as f64
        }
    }

    pub fn y_position(&self, value: f64) -> f64 {
        1.0 - value / self.max_value
    }

    pub fn points_a(&self) -> Vec<PlotPoint> {
        self.points(&self.values_a)
    }

    pub fn points_b(&self) -> Vec<PlotPoint> {
        self.points(&self.values_b)
    }

    fn points(&self, values: &[f64]) -> Vec<PlotPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| PlotPoint {
                x: self.x_position(i),
                y: self.y_position(*v),
            })
            .collect()
    }

    /// Gridline values from zero to the scale maximum in quarters.
    pub fn gridlines(&self) -> [f64; 5] {
        let m = self.max_value;
        [0.0, m / 4.0, m / 2.0, m * 3.0 / 4.0, m]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn ready(chart: LineChart) -> LineSeries {
        match chart {
            LineChart::Ready(series) => series,
            LineChart::NoData => panic!("expected series"),
        }
    }

    #[test]
    fn test_union_axis_and_zero_fill() {
        let a = CategoryAmounts::from_pairs([("Food", 100.0)]);
        let b = CategoryAmounts::from_pairs([("Food", 80.0), ("Transport", 20.0)]);
        let s = ready(compute(&a, &b).unwrap());
        assert_eq!(s.axis, vec!["Food", "Transport"]);
        assert_eq!(s.values_a, vec![100.0, 0.0]);
        assert_eq!(s.values_b, vec![80.0, 20.0]);
        assert_eq!(s.deltas, vec![-20.0, 20.0]);
    }

    #[test]
    fn test_axis_order_a_first_then_b_only() {
        let a = CategoryAmounts::from_pairs([("x", 1.0), ("y", 1.0)]);
        let b = CategoryAmounts::from_pairs([("z", 1.0), ("y", 2.0), ("w", 1.0)]);
        let s = ready(compute(&a, &b).unwrap());
        assert_eq!(s.axis, vec!["x", "y", "z", "w"]);
        assert_eq!(s.values_a, vec![1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_both_empty_is_no_data() {
        let empty = CategoryAmounts::new();
        assert_eq!(compute(&empty, &empty).unwrap(), LineChart::NoData);
    }

    #[test]
    fn test_one_side_empty_still_renders() {
        let a = CategoryAmounts::new();
        let b = CategoryAmounts::from_pairs([("Gifts", 30.0)]);
        let s = ready(compute(&a, &b).unwrap());
        assert_eq!(s.values_a, vec![0.0]);
        assert_eq!(s.deltas, vec![30.0]);
    }

    #[test]
    fn test_scale_floor_and_rounding() {
        let small = ready(
            compute(
                &CategoryAmounts::from_pairs([("a", 3.0)]),
                &CategoryAmounts::new(),
            )
            .unwrap(),
        );
        assert_eq!(small.max_value, 100.0);

        let big = ready(
            compute(
                &CategoryAmounts::from_pairs([("a", 250.0)]),
                &CategoryAmounts::from_pairs([("a", 1201.0)]),
            )
            .unwrap(),
        );
        assert_eq!(big.max_value, 1300.0);
        assert_eq!(big.y_position(1300.0), 0.0);
        assert_eq!(big.y_position(0.0), 1.0);
    }

    #[test]
    fn test_single_category_is_centered() {
        let s = ready(
            compute(
                &CategoryAmounts::from_pairs([("only", 50.0)]),
                &CategoryAmounts::new(),
            )
            .unwrap(),
        );
        assert_eq!(s.points_a(), vec![PlotPoint { x: 0.5, y: 0.5 }]);
    }

    #[test]
    fn test_even_spacing() {
        let a = CategoryAmounts::from_pairs([("a", 0.0), ("b", 0.0), ("c", 0.0)]);
        let s = ready(compute(&a, &CategoryAmounts::new()).unwrap());
        let xs: Vec<f64> = s.points_b().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_rows_keep_delta_sign() {
        let a = CategoryAmounts::from_pairs([("Up", 10.0), ("Down", 40.0)]);
        let b = CategoryAmounts::from_pairs([("Up", 25.0), ("Down", 5.0)]);
        let rows = ready(compute(&a, &b).unwrap()).rows();
        assert_eq!(rows[0].delta, 15.0);
        assert_eq!(rows[1].delta, -35.0);
    }

    #[test]
    fn test_negative_input_rejected() {
        let a = CategoryAmounts::from_pairs([("a", -1.0)]);
        assert!(matches!(
            compute(&a, &CategoryAmounts::new()),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_gridlines() {
        let s = ready(
            compute(
                &CategoryAmounts::from_pairs([("a", 400.0)]),
                &CategoryAmounts::new(),
            )
            .unwrap(),
        );
        assert_eq!(s.gridlines(), [0.0, 100.0, 200.0, 300.0, 400.0]);
    }
}
