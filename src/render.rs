//! Data file to PDF pipeline: load, group, draw, save.

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{
    chart::Chart,
    error::{RenderError, Result, WriteFailure},
    pyplot::{self, Axes, Figure},
    record,
};

/// Name of the figure written by [`render`].
pub const OUTPUT_FILE: &str = "figure.pdf";

/// Renders measurement files into a PDF at a fixed location.
#[derive(Debug, Clone)]
pub struct PlotRenderer {
    output: PathBuf,
}

impl Default for PlotRenderer {
    /// Write `figure.pdf` in the current working directory.
    fn default() -> Self {
        PlotRenderer { output: PathBuf::from(OUTPUT_FILE) }
    }
}

impl PlotRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        PlotRenderer { output: output.into() }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Plot the measurements in `input` and return the path written.
    ///
    /// The input is fully parsed before Matplotlib is involved, so a
    /// malformed file never touches the output.
    pub fn render(&self, input: impl AsRef<Path>) -> Result<PathBuf> {
        let records = record::load(input.as_ref())?;
        let chart = Chart::from(records.as_slice());
        debug!(series = chart.lines.len(), points = chart.point_count(), "grouped");
        self.render_chart(&chart)?;
        info!(output = %self.output.display(), "figure saved");
        Ok(self.output.clone())
    }

    /// Draw `chart` and save it as PDF.  The figure is closed on
    /// every path out of this function.
    pub fn render_chart(&self, chart: &Chart) -> Result<()> {
        let fig = Figure::new(chart.size.0, chart.size.1)?;
        draw(chart, &fig)?;
        self.save(&fig)
    }

    // Save next to the destination then rename over it: a failed save
    // leaves any previous figure in place.
    fn save(&self, fig: &Figure) -> Result<()> {
        let write_error = |source: WriteFailure| RenderError::Write {
            path: self.output.clone(),
            source,
        };
        let dest = resolve_destination(&self.output);
        let tmp = staging_file(&dest).map_err(|e| write_error(e.into()))?;
        fig.save()
            .format("pdf")
            .to_file(tmp.path())
            .map_err(|e| write_error(e.into()))?;
        tmp.persist(&dest)
            .map_err(|e| write_error(e.error.into()))?;
        Ok(())
    }
}

/// Follow `output` if it is a symlink, so the link itself survives
/// the final rename.  Dangling links are replaced.
fn resolve_destination(output: &Path) -> PathBuf {
    match fs::symlink_metadata(output) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(output).unwrap_or_else(|_| output.to_path_buf())
        }
        _ => output.to_path_buf(),
    }
}

/// Empty temporary file in the directory of `dest`.  It takes the
/// permissions of `dest` when that exists, else those of a new regular
/// file under the process umask.
fn staging_file(dest: &Path) -> io::Result<NamedTempFile> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".figure-").suffix(".pdf");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;
    if let Ok(meta) = fs::metadata(dest) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    Ok(tmp)
}

/// Plot every line of `chart` on a fresh set of axes of `fig` and
/// apply the decorations.
pub fn draw(chart: &Chart, fig: &Figure) -> std::result::Result<Axes, pyplot::Error> {
    let mut ax = fig.subplots()?;
    for line in &chart.lines {
        ax.xy(&line.x, &line.y)
            .label(&line.label)
            .marker(line.style.marker)
            .color(line.style.color)
            .plot()?;
    }
    ax.set_xlabel(chart.x_label)?
        .set_ylabel(chart.y_label)?
        .set_title(chart.title)?;
    if chart.legend {
        ax.legend()?;
    }
    if chart.grid {
        ax.grid()?;
    }
    if chart.integer_xticks {
        ax.integer_xticks()?;
    }
    Ok(ax)
}

/// Plot `input` into `figure.pdf` in the current working directory.
pub fn render(input: impl AsRef<Path>) -> Result<PathBuf> {
    PlotRenderer::default().render(input)
}
