//! Example demonstrating custom transformers registered by name

use std::collections::HashMap;

use envparse::{EnvParse, ParserRegistry};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct Endpoint {
    host: String,
    port: u16,
}

#[derive(Debug, Default, EnvParse)]
struct Config {
    // Comma-separated numbers via a custom transformer
    #[env("name=APP_PORTS,parser=ports")]
    ports: Vec<u16>,

    // Typed JSON decode of a list of objects
    #[env("name=APP_ENDPOINTS,parser=json")]
    endpoints: Vec<Endpoint>,

    // key=value pairs separated by semicolons
    #[env("name=APP_OVERRIDES,parser=pairs")]
    overrides: HashMap<String, String>,
}

fn main() -> anyhow::Result<()> {
    let mut registry = ParserRegistry::new();

    registry.register("ports", |raw: &str| -> anyhow::Result<Vec<u16>> {
        raw.split(',').map(|token| Ok(token.parse()?)).collect()
    });

    registry.register("json", |raw: &str| -> anyhow::Result<Vec<Endpoint>> {
        Ok(serde_json::from_str(raw)?)
    });

    registry.register(
        "pairs",
        |raw: &str| -> anyhow::Result<HashMap<String, String>> {
            raw.split(';')
                .map(|pair| {
                    let (key, value) = pair
                        .split_once('=')
                        .ok_or_else(|| anyhow::anyhow!("expected key=value, got {pair:?}"))?;
                    Ok((key.to_string(), value.to_string()))
                })
                .collect()
        },
    );

    std::env::set_var("APP_PORTS", "8080,8443");
    std::env::set_var(
        "APP_ENDPOINTS",
        r#"[{"host":"a.internal","port":9000},{"host":"b.internal","port":9001}]"#,
    );
    std::env::set_var("APP_OVERRIDES", "log_level=debug;timeout=30");

    let mut config = Config::default();
    config.populate_with(&registry)?;

    println!("Configuration loaded:");
    println!("  Ports: {:?}", config.ports);
    println!("  Endpoints: {:?}", config.endpoints);
    println!("  Overrides: {:?}", config.overrides);

    Ok(())
}
