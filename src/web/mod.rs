pub mod dto;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use rocket::fairing::AdHoc;
use rocket::{catchers, routes, Build, Rocket};

use crate::bootstrap::AppState;
use crate::config::Config;
use crate::web::routes::{default_catcher, estimate, estimate_json, form, health, route_catalog, samples};

/// Assemble the Rocket instance: shared state, API routes, JSON catcher and
/// the sample refresher, which starts on liftoff.
pub fn build_rocket(config: &Config) -> anyhow::Result<Rocket<Build>> {
    let app_state = Arc::new(AppState::new(config)?);

    let refresher = app_state.samples.clone();
    let every = Duration::from_secs(app_state.sample_refresh_secs);

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", config.bind_address.clone()));

    Ok(rocket::custom(figment)
        .manage(app_state)
        .mount("/", routes![estimate, estimate_json, form, route_catalog, samples, health])
        .register("/", catchers![default_catcher])
        .attach(AdHoc::on_liftoff("Sample refresher", move |_| {
            Box::pin(async move {
                tokio::spawn(refresher.run_refresher(every));
            })
        })))
}
