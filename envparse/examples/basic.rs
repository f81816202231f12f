//! Basic example loading scalar fields from environment variables

use envparse::EnvParse;

#[derive(Debug, Default, EnvParse)]
struct Config {
    #[env("APP_NAME")]
    app_name: String,

    #[env("APP_PORT")]
    port: u16,

    #[env("APP_DEBUG")]
    debug: bool,

    #[env("APP_RATE_LIMIT")]
    rate_limit: f64,

    // Not annotated, stays at whatever the caller put in it
    request_count: u64,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("APP_PORT", "8080");
    std::env::set_var("APP_DEBUG", "true");
    std::env::set_var("APP_RATE_LIMIT", "99.5");

    let mut config = Config::default();
    config.populate()?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);
    println!("  Rate Limit: {}", config.rate_limit);
    println!("  Request Count: {}", config.request_count);

    Ok(())
}
