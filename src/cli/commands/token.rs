use anyhow::{bail, Context};
use serde_json::json;

use crate::auth::{generate_jwt, Claims, JwtSettings, Role};
use crate::cli::utils::{output_fields, output_success};
use crate::cli::OutputFormat;

fn parse_role(value: &str) -> anyhow::Result<Role> {
    match Role::parse(value) {
        Role::Unknown => bail!(
            "Unknown role '{}' (expected one of: {})",
            value,
            Role::ALL.map(Role::as_str).join(", ")
        ),
        role => Ok(role),
    }
}

pub fn handle(
    user_id: i64,
    role: &str,
    email: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let role = parse_role(role)?;
    let email = email.unwrap_or_else(|| format!("user{}@example.edu", user_id));

    let jwt = JwtSettings::from_config(&crate::config::config().security);
    let claims = Claims::new(user_id, email, role, jwt.expiry_hours);
    let token = generate_jwt(&claims, &jwt).context("Failed to mint token")?;

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            "Token generated",
            Some(json!({
                "token": token,
                "expires_in": jwt.expires_in_secs(),
                "user_id": user_id,
                "role": role,
            })),
        ),
        // Bare token so it can be captured with $(faculty token ...)
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}

pub fn rank(role: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let role = parse_role(role)?;
    let outranks: Vec<&str> = Role::ALL
        .into_iter()
        .filter(|other| role.outranks(*other))
        .map(Role::as_str)
        .collect();

    output_success(
        &output_format,
        &format!("{} has rank {}", role, role.rank()),
        Some(json!({ "role": role, "rank": role.rank(), "outranks": outranks })),
    )?;
    output_fields(&output_format, &[("outranks", json!(outranks.join(", ")))]);
    Ok(())
}
