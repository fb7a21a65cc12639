pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Structured input for a command: `--input` file first, then piped stdin.
/// Returns None when neither is given so the caller can fall back to flags.
pub fn structured<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        tracing::debug!(path, "reading input file");
        return Ok(Some(file::read_input(path)?));
    }
    if let Some(data) = stdin::read_stdin()? {
        tracing::debug!("reading input from stdin");
        return Ok(Some(serde_json::from_value(data)?));
    }
    tracing::debug!("no structured input; using flags");
    Ok(None)
}
