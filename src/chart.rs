//! Resolved description of the waiting-time figure.
//!
//! A [`Chart`] carries everything that ends up on the page (series
//! coordinates, labels, styles and decorations) as plain values.
//! Building one never touches Python; drawing happens in
//! [`crate::render`].

use crate::{
    record::Record,
    series::group_by_producer,
    style::{Style, StyleCycle},
};

pub const TITLE: &str = "Average waiting time";
pub const X_LABEL: &str = "Q";
pub const Y_LABEL: &str = "Time [us]";

/// Figure size in inches.
pub const FIGSIZE: (f64, f64) = (10., 6.);

/// One line of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub producer_count: i64,
    pub label: String,
    pub style: Style,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub size: (f64, f64),
    pub lines: Vec<Line>,
    pub legend: bool,
    pub grid: bool,
    pub integer_xticks: bool,
}

impl Chart {
    /// Group `records` by producer count and style each group with
    /// `styles`, in ascending producer count order.
    pub fn with_styles(records: &[Record], styles: StyleCycle) -> Chart {
        let lines = group_by_producer(records)
            .into_iter()
            .zip(styles)
            .map(|(series, style)| Line {
                producer_count: series.producer_count,
                label: series.label(),
                style,
                x: series.xs(),
                y: series.ys(),
            })
            .collect();
        Chart {
            title: TITLE,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            size: FIGSIZE,
            lines,
            legend: true,
            grid: true,
            integer_xticks: true,
        }
    }

    /// Legend entries, in drawing order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.label.as_str()).collect()
    }

    pub fn point_count(&self) -> usize {
        self.lines.iter().map(|l| l.x.len()).sum()
    }

    /// Smallest and largest x over all lines.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        range(self.lines.iter().flat_map(|l| l.x.iter().copied()))
    }

    /// Smallest and largest y over all lines.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        range(self.lines.iter().flat_map(|l| l.y.iter().copied()))
    }
}

impl From<&[Record]> for Chart {
    fn from(records: &[Record]) -> Chart {
        Chart::with_styles(records, StyleCycle::default())
    }
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record::parse_records, style::{COLORS, MARKERS}};

    #[test]
    fn two_producer_groups() {
        let records = parse_records("1 1 100\n1 2 150\n2 1 90\n2 2 130\n").unwrap();
        let chart = Chart::from(records.as_slice());
        assert_eq!(chart.legend_labels(), ["P=1", "P=2"]);
        assert_eq!(chart.lines[0].x, [1., 2.]);
        assert_eq!(chart.lines[0].y, [100., 150.]);
        assert_eq!(chart.lines[1].y, [90., 130.]);
        assert_eq!(chart.x_range(), Some((1., 2.)));
        assert_eq!(chart.y_range(), Some((90., 150.)));
        assert_eq!(chart.point_count(), 4);
    }

    #[test]
    fn decorations() {
        let records = parse_records("3 1 1").unwrap();
        let chart = Chart::from(records.as_slice());
        assert_eq!(chart.title, "Average waiting time");
        assert_eq!(chart.x_label, "Q");
        assert_eq!(chart.y_label, "Time [us]");
        assert_eq!(chart.size, (10., 6.));
        assert!(chart.legend && chart.grid && chart.integer_xticks);
    }

    #[test]
    fn styles_follow_key_order_not_input_order() {
        let records = parse_records("9 1 1\n2 1 1\n5 1 1\n").unwrap();
        let chart = Chart::from(records.as_slice());
        let got: Vec<_> = chart.lines.iter()
            .map(|l| (l.producer_count, l.style.marker, l.style.color))
            .collect();
        assert_eq!(got, [
            (2, MARKERS[0], COLORS[0]),
            (5, MARKERS[1], COLORS[1]),
            (9, MARKERS[2], COLORS[2]),
        ]);
    }

    #[test]
    fn more_groups_than_styles() {
        let text: String = (1..=12).map(|p| format!("{p} 1 1.0\n")).collect();
        let records = parse_records(&text).unwrap();
        let chart = Chart::from(records.as_slice());
        assert_eq!(chart.lines.len(), 12);
        assert_eq!(chart.lines[10].style, chart.lines[0].style);
        assert_eq!(chart.lines[11].style, chart.lines[1].style);
    }

    #[test]
    fn no_records() {
        let chart = Chart::from(&[] as &[Record]);
        assert!(chart.lines.is_empty());
        assert_eq!(chart.x_range(), None);
    }
}
