use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "foia-vendor-risk",
    about = "Build a cross-jurisdiction vendor dataset from public procurement and debarment extracts, then derive risk analytics",
    version
)]
pub struct Cli {
    /// Data directory holding the USA/ and Uzbekistan/ source extracts
    #[arg(default_value = "Data")]
    pub data_dir: PathBuf,

    /// Directory the dataset and analytics artifacts are written to
    #[arg(short, long, default_value = "outputs", value_name = "DIR")]
    pub output: PathBuf,

    /// Config file [default: <DATA_DIR>/.foia-vendor-risk/config.toml, fallback ~/.config/foia-vendor-risk/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the configured high-value contract threshold
    #[arg(long, value_name = "AMOUNT")]
    pub threshold: Option<i64>,

    /// Show full analytics tables (not just the top rows)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}
