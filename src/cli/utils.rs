use serde_json::{json, Map, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format.
/// Object fields in `data` are merged into the JSON envelope.
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = Map::new();
            response.insert("success".to_string(), json!(true));
            response.insert("message".to_string(), json!(message));

            match data {
                Some(Value::Object(fields)) => response.extend(fields),
                Some(other) => {
                    response.insert("data".to_string(), other);
                }
                None => {}
            }

            println!("{}", serde_json::to_string_pretty(&Value::Object(response))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print `key: value` lines for text output, skipping nulls
pub fn output_fields(output_format: &OutputFormat, fields: &[(&str, Value)]) {
    if let OutputFormat::Text = output_format {
        for (key, value) in fields {
            match value {
                Value::Null => {}
                Value::String(s) => println!("  {}: {}", key, s),
                other => println!("  {}: {}", key, other),
            }
        }
    }
}

/// Error envelope message from an API response body, if it has one
pub fn api_error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?.as_str()?;
    match body.get("code").and_then(Value::as_str) {
        Some(code) => Some(format!("{} ({})", error, code)),
        None => Some(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_api_error_envelope() {
        let body = json!({"success": false, "error": "Token expired", "code": "UNAUTHORIZED"});
        assert_eq!(
            api_error_message(&body).as_deref(),
            Some("Token expired (UNAUTHORIZED)")
        );
        assert_eq!(api_error_message(&json!({"success": true})), None);
    }
}
