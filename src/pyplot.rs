//! Thin binding to the [Matplotlib][] Python visualization library.
//!
//! Only the handful of calls needed to draw a line chart and save it
//! are exposed.  The interface stays close to Matplotlib's explicit
//! (object oriented) one: a [`Figure`] owns [`Axes`] on which data is
//! plotted.
//!
//! [Matplotlib]: https://matplotlib.org/

use std::path::Path;
use lazy_static::lazy_static;
use numpy::PyArray1;
use pyo3::{
    prelude::*,
    intern,
    exceptions::{PyFileNotFoundError, PyOSError, PyPermissionError},
    types::PyDict,
};

/// Possible errors of matplotlib functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    #[error("the matplotlib library has not been found; please install \
             it (see https://matplotlib.org/)")]
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    #[error("a path contains an element that is not a directory or \
             does not exist")]
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    #[error("permission denied to access or create the filesystem path")]
    PermissionError,
    /// Any other operating system error raised while writing a file
    /// (disk full, path is a directory,...).
    #[error("I/O error: {0}")]
    Io(PyErr),
    /// Other Python errors.
    #[error("Python error: {0}")]
    Python(#[from] PyErr),
}

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(Bound::unbind))
}}

lazy_static! {
    // Select a non-interactive backend before pyplot gets imported:
    // figures are only ever written to files.
    static ref PYPLOT: Result<Py<PyModule>, PyErr> = {
        Python::with_gil(|py| {
            let mpl = PyModule::import_bound(py, "matplotlib")?;
            mpl.call_method1(intern!(py, "use"), ("Agg",))?;
            PyModule::import_bound(py, "matplotlib.pyplot")
                .map(Bound::unbind)
        })
    };
    static ref TICKER: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.ticker")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}

/// Call the method `$m` of the Python object `$obj` with the
/// positional arguments `$args`, discarding the result.
macro_rules! meth {
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| {
            $obj.call_method1(py, intern!(py, stringify!($m)), $args)
                .map(|_| ())
                .map_err(Error::from)
        })
    };
}

/// Return `true` if matplotlib can be imported by the embedded
/// Python interpreter.
pub fn available() -> bool {
    PYPLOT.is_ok()
}

/// Number of figures currently registered with pyplot.
pub fn open_figures() -> Result<usize, Error> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| {
        let nums = pyplot.bind(py)
            .call_method0(intern!(py, "get_fignums"))?;
        Ok(nums.len()?)
    })
}

/// The top level container for all the plot elements.
///
/// The figure is registered with pyplot on creation and closed when
/// dropped, so no drawing state outlives the value.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

impl Figure {
    /// Return a new `Figure` of size `width` × `height` inches.
    pub fn new(width: f64, height: f64) -> Result<Figure, Error> {
        let pyplot = pymod!(PYPLOT)?;
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("figsize", (width, height))?;
            let fig = pyplot.bind(py)
                .getattr(intern!(py, "figure"))?
                .call((), Some(&kwargs))?;
            Ok(Figure { fig: fig.unbind() })
        })
    }

    /// Add a single set of axes covering the figure.
    pub fn subplots(&self) -> Result<Axes, Error> {
        Python::with_gil(|py| {
            let ax = self.fig.bind(py)
                .call_method0(intern!(py, "subplots"))?;
            Ok(Axes { ax: ax.unbind() })
        })
    }

    pub fn save(&self) -> Savefig<'_> {
        Savefig { fig: &self.fig, format: None }
    }
}

impl Drop for Figure {
    fn drop(&mut self) {
        // A figure can only exist once pyplot has been imported.
        let Ok(pyplot) = PYPLOT.as_ref() else { return };
        Python::with_gil(|py| {
            let fig = self.fig.clone_ref(py);
            if let Err(e) = pyplot.bind(py)
                .call_method1(intern!(py, "close"), (fig,)) {
                tracing::warn!(error = %e, "failed to close figure");
            }
        })
    }
}

pub struct Savefig<'a> {
    fig: &'a PyObject,
    format: Option<&'a str>,
}

impl<'a> Savefig<'a> {
    /// Set the file format ("pdf", "svg", "png",...).  When unset,
    /// Matplotlib infers it from the file extension.
    pub fn format(&mut self, format: &'a str) -> &mut Self {
        self.format = Some(format);
        self
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            if let Some(format) = self.format {
                kwargs.set_item("format", format)?;
            }
            self.fig.bind(py).call_method(
                intern!(py, "savefig"), (path.as_ref(),), Some(&kwargs)
            ).map_err(|e| {
                if e.is_instance_of::<PyFileNotFoundError>(py) {
                    Error::FileNotFoundError
                } else if e.is_instance_of::<PyPermissionError>(py) {
                    Error::PermissionError
                } else if e.is_instance_of::<PyOSError>(py) {
                    Error::Io(e)
                } else {
                    Error::Python(e)
                }
            })?;
            Ok(())
        })
    }
}

#[derive(Debug)]
pub struct Axes {
    ax: PyObject,
}

impl Axes {
    /// Plot `y` versus `x` as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use waitplot::pyplot::Figure;
    /// let fig = Figure::new(6.4, 4.8)?;
    /// let mut ax = fig.subplots()?;
    /// ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).marker("o").plot()?;
    /// fig.save().to_file("target/XY_plot.pdf")?;
    /// # Ok::<(), waitplot::pyplot::Error>(())
    /// ```
    // We mutably borrow `self` to reflect that the final `.plot()`
    // will mutate the underlying Python object.
    #[must_use]
    pub fn xy<'a>(&'a mut self, x: &'a [f64], y: &'a [f64]) -> XY<'a> {
        XY { axes: self, options: PlotOptions::new(), x, y }
    }

    pub fn set_title(&mut self, v: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_title, (v,))?;
        Ok(self)
    }

    pub fn set_xlabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlabel, (label,))?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylabel, (label,))?;
        Ok(self)
    }

    pub fn grid(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, grid, (true,))?;
        Ok(self)
    }

    pub fn legend(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, legend, ())?;
        Ok(self)
    }

    /// Only place x-axis ticks at integer positions
    /// (`MaxNLocator(integer=True)`).
    pub fn integer_xticks(&mut self) -> Result<&mut Self, Error> {
        let ticker = pymod!(TICKER)?;
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("integer", true)?;
            let locator = ticker.bind(py)
                .getattr(intern!(py, "MaxNLocator"))?
                .call((), Some(&kwargs))?;
            self.ax.bind(py)
                .getattr(intern!(py, "xaxis"))?
                .call_method1(intern!(py, "set_major_locator"), (locator,))?;
            Ok::<_, Error>(())
        })?;
        Ok(self)
    }

    /// Positions of the major ticks of the x-axis.
    pub fn xticks(&self) -> Result<Vec<f64>, Error> {
        Python::with_gil(|py| {
            let ticks = self.ax.bind(py)
                .call_method0(intern!(py, "get_xticks"))?
                .call_method0(intern!(py, "tolist"))?;
            Ok(ticks.extract()?)
        })
    }

    /// Labels of the artists that will appear in the legend.
    pub fn legend_labels(&self) -> Result<Vec<String>, Error> {
        Python::with_gil(|py| {
            let (_, labels): (PyObject, Vec<String>) = self.ax.bind(py)
                .call_method0(intern!(py, "get_legend_handles_labels"))?
                .extract()?;
            Ok(labels)
        })
    }

    /// Number of lines drawn on the axes.
    pub fn line_count(&self) -> Result<usize, Error> {
        Python::with_gil(|py| {
            let lines = self.ax.bind(py)
                .call_method0(intern!(py, "get_lines"))?;
            Ok(lines.len()?)
        })
    }
}

#[derive(Clone, Default)]
struct PlotOptions<'a> {
    label: &'a str,
    marker: Option<&'a str>,
    color: Option<&'a str>,
}

impl<'a> PlotOptions<'a> {
    fn new() -> PlotOptions<'static> {
        PlotOptions::default()
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if !self.label.is_empty() {
            kwargs.set_item("label", self.label)?;
        }
        if let Some(m) = self.marker {
            kwargs.set_item("marker", m)?;
        }
        if let Some(c) = self.color {
            kwargs.set_item("color", c)?;
        }
        Ok(kwargs)
    }
}

pub struct XY<'a> {
    axes: &'a Axes,
    options: PlotOptions<'a>,
    x: &'a [f64],
    y: &'a [f64],
}

impl<'a> XY<'a> {
    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.options.label = label;
        self
    }

    /// Matplotlib marker symbol ("o", "s", "^",...).
    #[must_use]
    pub fn marker(mut self, marker: &'a str) -> Self {
        self.options.marker = Some(marker);
        self
    }

    /// Any Matplotlib color specification ("#1f77b4", "red",...).
    #[must_use]
    pub fn color(mut self, color: &'a str) -> Self {
        self.options.color = Some(color);
        self
    }

    /// Plot the data with the options specified in [`XY`].
    pub fn plot(self) -> Result<(), Error> {
        Python::with_gil(|py| {
            let x = PyArray1::from_slice_bound(py, self.x);
            let y = PyArray1::from_slice_bound(py, self.y);
            let kwargs = self.options.kwargs(py)?;
            self.axes.ax.bind(py)
                .call_method(intern!(py, "plot"), (x, y), Some(&kwargs))?;
            Ok(())
        })
    }
}
