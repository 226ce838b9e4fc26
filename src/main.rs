use storefront::app;
use storefront::config::load_app_configuration;
use storefront::state::AppState;

// Stores are opened before the runtime starts: the blocking remote client
// must not be built inside an async context.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_app_configuration()?;
    let state = AppState::open(config)?;
    log::info!(
        "Loaded {} products for {}",
        state.inventory.len(),
        state.settings.get().store_name
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run(state))?;

    Ok(())
}
