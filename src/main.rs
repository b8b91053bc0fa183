mod advisor;
mod config;
mod dashboard;
mod detection;
mod error;
mod market;
mod preferences;
mod web;

use actix_web::{App, HttpServer, web::Data};
use actix_files as fs;
use anyhow::Context as _;
use dotenv::dotenv;
use log::{info, error};
use std::sync::Mutex;
use std::collections::HashMap;
use tera::Tera;
use uuid::Uuid;

use advisor::{KeywordRouter, Session};
use config::Config;
use detection::ClassificationProvider;
use preferences::settings::Settings;
use preferences::{JsonFilePreferenceStore, PreferenceStore, LANGUAGE_KEY};
use web::routes;

// App state structure
struct AppState {
    tera: Tera,
    config: Config,
    router: KeywordRouter,
    sessions: Mutex<HashMap<Uuid, Session>>,
    detector: Box<dyn ClassificationProvider>,
    preferences: Box<dyn PreferenceStore>,
    settings: Mutex<Settings>,
}

impl AppState {
    fn new(tera: Tera, config: Config, preferences: Box<dyn PreferenceStore>) -> Self {
        let detector = config.classification_provider();

        // The stored language wins over the sample profile default
        let mut settings = Settings::default();
        if let Some(language) = preferences.get(LANGUAGE_KEY) {
            settings.preferences.language = language;
        }

        Self {
            tera,
            config,
            router: KeywordRouter::default(),
            sessions: Mutex::new(HashMap::new()),
            detector,
            preferences,
            settings: Mutex::new(settings),
        }
    }
}

fn load_templates(dir: &str) -> anyhow::Result<Tera> {
    let mut tera = Tera::new(&format!("{}/**/*", dir))
        .with_context(|| format!("failed to parse templates in {}", dir))?;
    tera.autoescape_on(vec![".html"]);
    Ok(tera)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Smart Crop Advisory web application");

    let config = Config::from_env();

    let store = match JsonFilePreferenceStore::open(&config.preferences_path) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load preferences: {}", e);
            std::process::exit(1);
        }
    };

    let tera = match load_templates(&config.templates_dir) {
        Ok(t) => t,
        Err(e) => {
            error!("Template parsing error: {:#}", e);
            std::process::exit(1);
        }
    };

    let bind = (config.host.clone(), config.port);
    let static_dir = config.static_dir.clone();

    let app_state = Data::new(AppState::new(tera, config, Box::new(store)));

    info!("Listening on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
            .service(fs::Files::new("/static", &static_dir))
    })
    .bind(bind)?
    .run()
    .await
}
