use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Sends log records to `path`, truncating it. The filter comes from `RUST_LOG`.
pub(crate) fn init_to_file(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    builder()
        .target(Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .try_init()
        .context("Failed to install logger")
}

pub(crate) fn init_to_stderr() -> anyhow::Result<()> {
    builder()
        .target(Target::Stderr)
        .try_init()
        .context("Failed to install logger")
}

fn builder() -> Builder {
    Builder::from_env(Env::default().default_filter_or("info"))
}
