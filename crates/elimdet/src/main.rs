//! `elimdet-bench`: times the three determinant kernels over the default
//! size sweep and writes the report to `results.csv`.

use anyhow::{Context, Result};
use elimdet::{Harness, HarnessConfig};
use env_logger::Env;
use log::info;
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = HarnessConfig::default();
    config.validate().context("invalid default configuration")?;

    let path = &config.output_path;
    let file = File::create(path)
        .with_context(|| format!("cannot open {} for writing", path.display()))?;

    let harness = Harness::from_config(&config).context("failed to set up kernels")?;
    let report = harness.run(&config).context("sweep failed")?;

    report
        .write_csv(BufWriter::new(file))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {} rows to {}", report.rows().len(), path.display());
    Ok(())
}
