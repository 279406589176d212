use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Bundled config for mobile builds (iOS/Android)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // .env wins during desktop development
    if dotenvy::dotenv().is_ok() {
        return;
    }

    deepeuc::config::apply_env_lines(BUNDLED_CONFIG);
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    deepeuc::config::apply_env_lines(BUNDLED_CONFIG);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
    {
        eprintln!("tracing already initialised: {err}");
    }
}

fn main() {
    load_dotenv();
    init_tracing();
    tracing::info!(endpoint = %deepeuc::config::Config::from_env().chat_endpoint(), "starting deepEUC");
    dioxus::launch(deepeuc::ui::App);
}
