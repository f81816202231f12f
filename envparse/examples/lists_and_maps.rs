//! Example demonstrating the built-in `default` transformers for sequence
//! and mapping fields

use std::collections::HashMap;

use envparse::EnvParse;

#[derive(Debug, Default, EnvParse)]
struct Config {
    // Comma-separated list (no trimming, no escaping)
    #[env("name=APP_TAGS,parser=default")]
    tags: Vec<String>,

    // JSON object with loosely-typed values
    #[env("name=APP_LABELS,parser=default")]
    labels: HashMap<String, serde_json::Value>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_TAGS", "production,api,v2");
    std::env::set_var("APP_LABELS", r#"{"region":"eu-west","replicas":3}"#);

    let mut config = Config::default();
    config.populate()?;

    println!("Configuration loaded:");
    println!("  Tags: {:?}", config.tags);
    println!("  Labels: {:?}", config.labels);

    Ok(())
}
