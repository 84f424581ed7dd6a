//! Marker and color cycles assigned round-robin to series.

/// Marker symbols, in assignment order.
pub const MARKERS: [&str; 10] = ["o", "s", "^", "d", "*", "x", "+", "v", "<", ">"];

/// Matplotlib's default color cycle (`tab10`).
pub const COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Visual attributes of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub marker: &'static str,
    pub color: &'static str,
}

/// Two independent cycles, one over markers and one over colors.
///
/// Each call to `next` advances both; a palette restarts from its
/// first entry once exhausted.  The iterator is infinite unless a
/// palette is empty, in which case it yields nothing.
#[derive(Debug, Clone)]
pub struct StyleCycle {
    markers: &'static [&'static str],
    colors: &'static [&'static str],
    next_marker: usize,
    next_color: usize,
}

impl StyleCycle {
    pub fn new(markers: &'static [&'static str], colors: &'static [&'static str]) -> Self {
        StyleCycle { markers, colors, next_marker: 0, next_color: 0 }
    }

    /// Style given to the `n`th series (0-based) of a fresh cycle.
    pub fn nth_style(&self, n: usize) -> Option<Style> {
        if self.markers.is_empty() || self.colors.is_empty() {
            return None;
        }
        Some(Style {
            marker: self.markers[n % self.markers.len()],
            color: self.colors[n % self.colors.len()],
        })
    }

    /// Start again from the first marker and color.
    pub fn restart(&mut self) {
        self.next_marker = 0;
        self.next_color = 0;
    }
}

impl Default for StyleCycle {
    fn default() -> Self {
        StyleCycle::new(&MARKERS, &COLORS)
    }
}

impl Iterator for StyleCycle {
    type Item = Style;

    fn next(&mut self) -> Option<Style> {
        if self.markers.is_empty() || self.colors.is_empty() {
            return None;
        }
        let style = Style {
            marker: self.markers[self.next_marker],
            color: self.colors[self.next_color],
        };
        self.next_marker = (self.next_marker + 1) % self.markers.len();
        self.next_color = (self.next_color + 1) % self.colors.len();
        Some(style)
    }
}
