use actix_web::web;
use crate::web::handlers;

// Uploads up to 10 MiB; larger bodies are rejected by actix with 413.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/chat", web::post().to(handlers::chat))
            // Registered before the `{id}` routes so it is not parsed as a UUID
            .route("/chat/quick-questions", web::get().to(handlers::quick_questions))
            .route("/chat/{id}", web::get().to(handlers::get_session))
            .route("/chat/{id}", web::delete().to(handlers::close_session))
            .route("/chat/{id}/speech", web::post().to(handlers::toggle_speech))
            .route("/chat/{id}/speech/events", web::post().to(handlers::speech_event))
            .service(
                web::resource("/detect")
                    .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
                    .route(web::post().to(handlers::detect)),
            )
            .route("/market", web::get().to(handlers::market_prices))
            .route("/market/history", web::get().to(handlers::price_history))
            .route("/dashboard", web::get().to(handlers::dashboard_data))
            .route("/dashboard/recommendations", web::post().to(handlers::recommendations))
            .route("/dashboard/districts/{state}", web::get().to(handlers::districts))
            .route("/settings", web::get().to(handlers::get_settings))
            .route("/settings", web::put().to(handlers::update_settings))
            .route("/preferences", web::get().to(handlers::get_preferences))
            .route("/preferences/theme/toggle", web::post().to(handlers::toggle_theme))
            .route("/preferences/{key}", web::put().to(handlers::set_preference)),
    )
    .route("/", web::get().to(handlers::index))
    .route("/dashboard", web::get().to(handlers::dashboard_page))
    .route("/chatbot", web::get().to(handlers::chatbot_page))
    .route("/market", web::get().to(handlers::market_page))
    .route("/pest-detection", web::get().to(handlers::pest_detection_page))
    .route("/settings", web::get().to(handlers::settings_page))
    .route("/health", web::get().to(handlers::health_check));
}
