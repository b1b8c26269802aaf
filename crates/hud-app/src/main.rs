mod cli;
mod host;
mod logging;
mod lookup;

fn main() {
    let args = cli::parse();

    // Config is read before logging so its level can seed the filter.
    let loaded = hud_config::load_config(args.config.as_deref());
    let config_level = loaded.as_ref().ok().map(|c| c.logging.level.directive());

    // Logs go to stderr; stdout carries the output protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(logging::env_filter(args.log_level.as_deref(), config_level))
        .init();

    tracing::info!("hud v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        hud_config::HudConfig::default()
    });
    tracing::info!(
        origin = %config.host.origin,
        sources = config.surfaces.sources.len(),
        "Config loaded"
    );

    let lookup = lookup::build_lookup(&config.host);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {e}");
            return;
        }
    };

    if let Err(e) = runtime.block_on(host::run(config, lookup)) {
        tracing::error!("Host stopped: {e}");
    }
    tracing::info!("Shutdown complete");
}
