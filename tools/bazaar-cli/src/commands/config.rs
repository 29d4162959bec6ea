//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, LogFormat, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        return ctx.output.json(&ctx.config);
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let config = &ctx.config;

    ctx.output.blank();
    ctx.output.info("[storage]");
    ctx.output.kv("data_dir", &config.storage.data_dir);
    ctx.output.kv("cart_key", &config.storage.cart_key);

    ctx.output.blank();
    ctx.output.info("[catalog]");
    ctx.output
        .kv("path", config.catalog.path.as_deref().unwrap_or("(built-in)"));
    ctx.output.kv("featured_limit", &config.catalog.featured_limit.to_string());

    ctx.output.blank();
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", &config.pricing.currency);
    ctx.output.kv(
        "free_shipping_threshold_cents",
        &config.pricing.free_shipping_threshold_cents.to_string(),
    );
    ctx.output.kv("flat_shipping_cents", &config.pricing.flat_shipping_cents.to_string());
    ctx.output.kv("tax_rate_bps", &config.pricing.tax_rate_bps.to_string());

    ctx.output.blank();
    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level);
    let format = match config.logging.format {
        LogFormat::Human => "human",
        LogFormat::Json => "json",
    };
    ctx.output.kv("format", format);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.pricing.rules() {
        errors.push(format!("pricing: {e}"));
    }
    if ctx.config.pricing.flat_shipping_cents < 0 {
        errors.push("pricing.flat_shipping_cents must not be negative".to_string());
    }
    if ctx.config.pricing.free_shipping_threshold_cents <= 0 {
        warnings.push(
            "pricing.free_shipping_threshold_cents <= 0 makes shipping always free".to_string(),
        );
    }
    if ctx.config.storage.cart_key.is_empty() {
        errors.push("storage.cart_key is required".to_string());
    }
    if ctx.config.catalog.featured_limit == 0 {
        warnings.push("catalog.featured_limit is 0, `bazaar featured` shows nothing".to_string());
    }
    match ctx.catalog() {
        Ok(catalog) => ctx.output.debug(&format!(
            "catalog: {} products in {} categories",
            catalog.len(),
            catalog.list_categories().len()
        )),
        Err(e) => errors.push(format!("catalog: {e:#}")),
    }

    for warning in &warnings {
        ctx.output.warn(warning);
    }

    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        Ok(())
    } else {
        for error in &errors {
            ctx.output.error(error);
        }
        bail!("{} configuration error(s)", errors.len())
    }
}
