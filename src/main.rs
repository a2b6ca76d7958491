use anyhow::{Context, Result};
use iris_sqlite::{load_iris, SqliteWriter, WriterConfig};
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let config = WriterConfig::default();
    let dataset = load_iris().context("loading bundled iris dataset")?;
    let written = SqliteWriter::new(config.clone())
        .write(&dataset)
        .with_context(|| {
            format!(
                "writing table '{}' to {}",
                config.table_name,
                config.db_path.display()
            )
        })?;

    info!("done: {} rows in {}", written, config.db_path.display());
    Ok(())
}
