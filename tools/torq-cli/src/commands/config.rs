//! Configuration management commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use torq_cache::Cache;
use torq_commerce::checkout::validate_phone_number;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, PHONE_ENV_VAR};
use crate::context::{find_config_path, Context};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.info("");
    ctx.output.info("[contact]");
    match ctx.config.phone_number() {
        Some(number) => ctx.output.kv("phone_number", &number),
        None => ctx.output.kv("phone_number", "(not set)"),
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("dir", &ctx.storage_dir().display().to_string());

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output
        .kv("open_browser", &ctx.config.checkout.open_browser.to_string());
    ctx.output.kv("handoff_file", &ctx.config.checkout.handoff_file);

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match find_config_path(&ctx.cwd) {
        Some(path) => path,
        None => bail!("No config file found. Run `torq config init` to create one."),
    };

    let mut config = CliConfig::load(&config_path.to_string_lossy())?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("torq.toml");

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

    match ctx.config.phone_number() {
        Some(number) if !validate_phone_number(&number) => errors.push(format!(
            "contact.phone_number '{}' must contain 10 to 15 digits",
            number
        )),
        Some(_) => {}
        None => warnings.push(format!(
            "contact.phone_number is not set (nor {}); orders go to a placeholder number",
            PHONE_ENV_VAR
        )),
    }

    let storage_dir = ctx.storage_dir();
    if let Err(e) = Cache::open_dir(&storage_dir) {
        errors.push(format!(
            "storage.dir '{}' is not usable: {}",
            storage_dir.display(),
            e
        ));
    }

    if ctx.config.checkout.handoff_file.trim().is_empty() {
        errors.push("checkout.handoff_file must not be empty".to_string());
    } else {
        let handoff_path = ctx.resolve_path(&ctx.config.checkout.handoff_file);
        if !parent_exists(&handoff_path) {
            warnings.push(format!(
                "checkout.handoff_file directory does not exist: {}",
                handoff_path.display()
            ));
        }
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn parent_exists(path: &Path) -> bool {
    path.parent().map_or(true, |p| p.as_os_str().is_empty() || p.is_dir())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["contact", "phone_number"] => Ok(config
            .contact
            .phone_number
            .clone()
            .unwrap_or_else(|| "null".to_string())),
        ["storage", "dir"] => Ok(config
            .storage
            .dir
            .clone()
            .unwrap_or_else(|| "null".to_string())),
        ["checkout", "open_browser"] => Ok(config.checkout.open_browser.to_string()),
        ["checkout", "handoff_file"] => Ok(config.checkout.handoff_file.clone()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["contact", "phone_number"] => config.contact.phone_number = Some(value.to_string()),
        ["storage", "dir"] => config.storage.dir = Some(value.to_string()),
        ["checkout", "open_browser"] => config.checkout.open_browser = value.parse()?,
        ["checkout", "handoff_file"] => config.checkout.handoff_file = value.to_string(),
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_value() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "contact.phone_number", "5511912345678").unwrap();
        set_config_value(&mut config, "checkout.open_browser", "false").unwrap();

        assert_eq!(
            get_config_value(&config, "contact.phone_number").unwrap(),
            "5511912345678"
        );
        assert_eq!(get_config_value(&config, "checkout.open_browser").unwrap(), "false");
        assert_eq!(get_config_value(&config, "storage.dir").unwrap(), "null");
    }

    #[test]
    fn test_unknown_and_malformed_keys() {
        let mut config = CliConfig::default();
        assert!(get_config_value(&config, "contact").is_err());
        assert!(set_config_value(&mut config, "cart.items", "1").is_err());
        assert!(set_config_value(&mut config, "checkout.open_browser", "maybe").is_err());
    }

    #[test]
    fn test_parent_exists() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(parent_exists(&tmp.path().join("order.txt")));
        assert!(!parent_exists(&tmp.path().join("missing").join("order.txt")));
        assert!(parent_exists(Path::new("order.txt")));
    }
}
