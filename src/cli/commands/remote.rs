use anyhow::{anyhow, Context};
use serde_json::{json, Value};

use crate::cli::utils::{api_error_message, output_fields, output_success};
use crate::cli::OutputFormat;

fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

async fn read_body(response: reqwest::Response) -> anyhow::Result<(reqwest::StatusCode, Value)> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .with_context(|| format!("Server returned a non-JSON body (HTTP {})", status))?;
    Ok((status, body))
}

pub async fn health(url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let target = endpoint(url, "/health");
    let response = reqwest::get(&target)
        .await
        .with_context(|| format!("Failed to reach {}", target))?;
    let (status, body) = read_body(response).await?;

    if !status.is_success() {
        let message = api_error_message(&body).unwrap_or_else(|| status.to_string());
        return Err(anyhow!("Server at {} is unhealthy: {}", url, message));
    }

    output_success(&output_format, &format!("Server at {} is healthy", url), Some(body))
}

pub async fn whoami(url: &str, token: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let target = endpoint(url, "/api/auth/me");
    let response = reqwest::Client::new()
        .get(&target)
        .bearer_auth(token)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", target))?;
    let (status, body) = read_body(response).await?;

    if !status.is_success() {
        let message = api_error_message(&body).unwrap_or_else(|| status.to_string());
        return Err(anyhow!("Request rejected: {}", message));
    }

    let user = body.get("data").cloned().unwrap_or(Value::Null);
    output_success(&output_format, "Token is valid", Some(json!({ "user": user.clone() })))?;
    output_fields(
        &output_format,
        &[
            ("id", user.get("id").cloned().unwrap_or(Value::Null)),
            ("name", user.get("name").cloned().unwrap_or(Value::Null)),
            ("email", user.get("email").cloned().unwrap_or(Value::Null)),
            ("role", user.get("role").cloned().unwrap_or(Value::Null)),
        ],
    );
    Ok(())
}
