use bcslens_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage root, routes)
    let (_state, router) = bcslens_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    bcslens_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
