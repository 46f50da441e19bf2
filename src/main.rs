use rocket::launch;

use spread_pnl::{config, web};

#[launch]
fn rocket() -> _ {
    env_logger::init();

    // Load configuration
    let config = config::Config::from_env()
        .expect("Failed to load configuration");

    log::info!(
        "Starting spread PnL service on {}:{} ({} / {} {})",
        config.bind_address,
        config.port,
        config.default_route.dex_a,
        config.default_route.dex_b,
        config.default_route.pair,
    );

    web::build_rocket(&config)
        .expect("Failed to initialize application state")
}
