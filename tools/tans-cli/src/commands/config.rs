//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use tans_commerce::config::generate_default_config;

use super::{ConfigArgs, ConfigCommand};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let store = &ctx.config.store;
    ctx.output.blank();
    ctx.output.info("[store]");
    ctx.output.kv("name", &store.name);
    ctx.output.kv("recipient_email", &store.recipient_email);
    ctx.output.kv("subject", &store.subject);
    ctx.output.kv("currency", store.currency.code());
    if let Some(path) = &store.catalog_path {
        ctx.output.kv("catalog_path", &path.display().to_string());
    }

    let email = &ctx.config.email;
    ctx.output.blank();
    ctx.output.info("[email]");
    ctx.output.kv("endpoint", &email.endpoint);
    ctx.output.kv("service_id", email.service_id.as_deref().unwrap_or("(unset)"));
    ctx.output.kv("template_id", email.template_id.as_deref().unwrap_or("(unset)"));
    ctx.output.kv("public_key", if email.public_key.is_some() { "(set)" } else { "(unset)" });
    ctx.output.kv("private_key", if email.private_key.is_some() { "(set)" } else { "(unset)" });
    ctx.output.kv("timeout_secs", &email.timeout_secs.to_string());

    let checkout = &ctx.config.checkout;
    ctx.output.blank();
    ctx.output.info("[checkout]");
    ctx.output.kv(
        "success_clear_delay_ms",
        &checkout.success_clear_delay_ms.to_string(),
    );
    ctx.output.kv("quota_resume_day", &checkout.quota_resume_day.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config(&ctx.config.store.name);
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    ctx.config.validate()?;

    let mut warnings: Vec<String> = Vec::new();
    if !ctx.config.email.is_configured() {
        warnings.push(
            "email.service_id, email.template_id and email.public_key are needed to send orders"
                .to_string(),
        );
    }
    if ctx.config.checkout.success_clear_delay_ms == 0 {
        warnings.push("checkout.success_clear_delay_ms is 0; the confirmation will not be visible".to_string());
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
