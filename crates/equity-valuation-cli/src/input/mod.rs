pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a typed input from `--input <file>` or piped stdin, in that order.
/// `Ok(None)` means neither was given and the caller should fall back to flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_input_file(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}
