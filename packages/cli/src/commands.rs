//! Subcommand implementations. Each returns the text to print on stdout.

use std::path::Path;

use anyhow::{bail, Context, Result};
use zomekit_core::{Bytes, Format};
use zomekit_serde::{json_to_value, value_to_json};
use zomekit_zome::{MemoryHost, Zome, ZomeConfig};

use crate::starter;

/// Read the configuration file, if any, and apply the format override.
pub fn load_config(path: Option<&Path>, format: Option<Format>) -> Result<ZomeConfig> {
    let mut config = match path {
        Some(path) => ZomeConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ZomeConfig::named("starter"),
    };
    if let Some(format) = format {
        config.format = format;
    }
    Ok(config)
}

fn build(config: ZomeConfig) -> Result<Zome> {
    starter::build(config).context("failed to build the starter zome")
}

/// Render the manifest.
pub fn manifest(config: ZomeConfig) -> Result<String> {
    let zome = build(config)?;
    Ok(zome.manifest().to_json()?)
}

/// Note appended to invocation failures.
const FRESH_HOST: &str = "each run starts from an empty in-memory host";

/// Run genesis and one invocation against a fresh in-memory host.
pub fn invoke(config: ZomeConfig, function: &str, args: &[String]) -> Result<String> {
    let zome = build(config)?;
    let Some(schema) = zome.function(function) else {
        bail!("no function named {} in zome {}", function, zome.name());
    };
    if args.len() != schema.params.len() {
        bail!(
            "{} takes {} arguments ({}), got {}",
            function,
            schema.params.len(),
            schema
                .params
                .iter()
                .map(|p| format!("{}: {}", p.name, p.schema))
                .collect::<Vec<_>>()
                .join(", "),
            args.len()
        );
    }

    let encoded = args
        .iter()
        .zip(&schema.params)
        .map(|(arg, param)| -> Result<Bytes> {
            let json: serde_json::Value = serde_json::from_str(arg)
                .with_context(|| format!("argument {} is not valid JSON", param.name))?;
            let value = json_to_value(json, &param.schema)
                .with_context(|| format!("argument {} is not a {}", param.name, param.schema))?;
            Ok(zome.codec().encode(&value))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut host = MemoryHost::new();
    zome.genesis(&mut host)?;
    let out = zome
        .invoke(&mut host, function, &encoded)
        .with_context(|| format!("{} failed ({})", function, FRESH_HOST))?;

    let result = zome
        .codec()
        .decode(&out, &schema.returns)
        .context("result does not match the declared return schema")?;
    Ok(serde_json::to_string_pretty(&value_to_json(&result))?)
}
