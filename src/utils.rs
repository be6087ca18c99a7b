use anyhow::{anyhow, Context, Result};
use serde_json::Value;

/// Network name of the local host, as reported by gethostname(2)
pub fn local_hostname() -> Result<String> {
    let name = nix::unistd::gethostname().context("Failed to read the local host name")?;

    name.into_string()
        .map_err(|raw| anyhow!("Host name is not valid UTF-8: {:?}", raw))
}

/// Render a metadata value the way it appears inside a flag.
///
/// - Missing or `null`: `None`
/// - Strings: verbatim, without quotes
/// - Booleans: `True` / `False`
/// - Numbers: their digits as written in the file
/// - Arrays and objects: compact JSON text
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::from("None"),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => String::from("True"),
        Some(Value::Bool(false)) => String::from("False"),
        Some(other) => other.to_string(),
    }
}

/// Human-readable name of a JSON value's type, for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
