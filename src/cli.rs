//! Command line interface of `waitplot`.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "waitplot")]
#[command(version)]
#[command(about = "Plot data from a file and save as PDF", long_about = None)]
pub struct Cli {
    /// Input text file with 3 columns: prod_num, cons_num, time
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,
}
