//! Plot producer/consumer waiting-time measurements with [Matplotlib][].
//!
//! Usage
//! -----
//!
//! The input is a text file of `<producers> <consumers> <time>` rows.
//! Rows are grouped by producer count, each group becoming one line of
//! the chart (time versus consumer count), and the figure is saved as
//! `figure.pdf`:
//!
//! ```no_run
//! let path = waitplot::render("results.txt")?;
//! println!("Plot saved to {}", path.display());
//! # Ok::<(), waitplot::RenderError>(())
//! ```
//!
//! [Matplotlib]: https://matplotlib.org/

pub mod chart;
pub mod cli;
pub mod error;
pub mod pyplot;
pub mod record;
pub mod render;
pub mod series;
pub mod style;

pub use chart::Chart;
pub use error::{ErrorKind, RenderError};
pub use record::Record;
pub use render::{render, PlotRenderer, OUTPUT_FILE};
pub use series::Series;
pub use style::{Style, StyleCycle};
