//! Output sink for generated code.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Write generated text to `path`, or to stdout when no path is given.
pub fn write_output(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write output: {:?}", path))?;
            tracing::info!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_nested_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("src").join("types").join("pocketbase.ts");

        write_output("export interface Posts {}\n", Some(&path)).expect("write");
        let written = std::fs::read_to_string(&path).expect("read");
        assert_eq!(written, "export interface Posts {}\n");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("models.go");
        std::fs::write(&path, "stale").expect("write");

        write_output("package models\n", Some(&path)).expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "package models\n");
    }
}
