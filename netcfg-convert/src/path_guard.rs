use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Fail when `output` resolves to the same file as `input`.
pub fn ensure_output_not_input(output: &Path, input: &Path) -> Result<()> {
    let out_norm = comparable_path(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;
    let in_norm = comparable_path(input)
        .with_context(|| format!("failed to resolve input path {}", input.display()))?;
    if out_norm == in_norm {
        bail!(
            "refusing to overwrite the input configuration: output {} is input {}",
            output.display(),
            input.display()
        );
    }
    Ok(())
}

fn comparable_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }
    // Not on disk yet: anchor relative paths at the working directory. `..`
    // segments stay unresolved.
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir().context("current_dir")?.join(path))
}
