use std::collections::HashMap;
use std::sync::MutexGuard;

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::json;
use tera::Context;
use uuid::Uuid;

use crate::advisor::{language, Session, SessionError, Submission, QUICK_QUESTIONS};
use crate::dashboard::{self, AdvisoryForm, DashboardData};
use crate::detection::{self, UploadedImage};
use crate::error::AppError;
use crate::market::{self, MarketFilter, MARKET_DATA, PRICE_HISTORY};
use crate::preferences::settings::{Settings, PROFILE_STATES};
use crate::preferences::{self, LANGUAGE_KEY};
use crate::web::models::{
    ChatRequest, ChatResponse, MarketItem, MarketResponse, PreferenceUpdate, SessionSnapshot,
    SpeechEventRequest, SpeechRequest,
};
use crate::AppState;

#[derive(Debug, Serialize)]
struct NavItem {
    name: &'static str,
    href: &'static str,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem { name: "Home", href: "/" },
    NavItem { name: "Dashboard", href: "/dashboard" },
    NavItem { name: "Crop Advisory", href: "/chatbot" },
    NavItem { name: "Market Prices", href: "/market" },
    NavItem { name: "Pest Detection", href: "/pest-detection" },
    NavItem { name: "Settings", href: "/settings" },
];

// Shared page chrome: navigation, active link and theme
fn render(
    data: &AppState,
    template: &str,
    active: &str,
    mut context: Context,
) -> Result<HttpResponse, AppError> {
    let theme = preferences::current_theme(data.preferences.as_ref());
    context.insert("nav", NAV_ITEMS);
    context.insert("active", active);
    context.insert("theme", theme.as_str());
    let html = data.tera.render(template, &context).map_err(|e| {
        error!("Template error in {}: {}", template, e);
        AppError::from(e)
    })?;
    debug!("Navigated to page: {}", active);
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

fn lock_sessions(data: &AppState) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, AppError> {
    data.sessions.lock().map_err(|e| {
        error!("Failed to lock sessions mutex: {}", e);
        AppError::Internal("session store unavailable".to_string())
    })
}

fn lock_settings(data: &AppState) -> Result<MutexGuard<'_, Settings>, AppError> {
    data.settings.lock().map_err(|e| {
        error!("Failed to lock settings mutex: {}", e);
        AppError::Internal("settings unavailable".to_string())
    })
}

// Pages

pub async fn index(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render(&data, "index.html", "/", Context::new())
}

pub async fn dashboard_page(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut context = Context::new();
    let states: Vec<&str> = dashboard::STATE_DISTRICTS.iter().map(|(s, _)| *s).collect();
    context.insert("dashboard", &DashboardData::default());
    context.insert("weather", dashboard::WEATHER_FORECAST);
    context.insert("market_snapshot", dashboard::MARKET_SNAPSHOT);
    context.insert("states", &states);
    context.insert("soil_types", dashboard::SOIL_TYPES);
    context.insert("crops", dashboard::CROP_OPTIONS);
    render(&data, "dashboard.html", "/dashboard", context)
}

pub async fn chatbot_page(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let selected = data
        .preferences
        .get(LANGUAGE_KEY)
        .unwrap_or_else(|| language::DEFAULT_LANGUAGE.to_string());
    let mut context = Context::new();
    context.insert("languages", language::LANGUAGES);
    context.insert("selected_language", &selected);
    context.insert("quick_questions", QUICK_QUESTIONS);
    context.insert("welcome", crate::advisor::catalog::WELCOME_MESSAGE);
    render(&data, "chatbot.html", "/chatbot", context)
}

pub async fn market_page(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items: Vec<MarketItem> = MARKET_DATA.iter().copied().map(MarketItem::from).collect();
    let mut context = Context::new();
    context.insert("items", &items);
    context.insert("movers", &market::top_movers());
    context.insert("history", PRICE_HISTORY);
    context.insert("categories", market::CATEGORIES);
    render(&data, "market.html", "/market", context)
}

pub async fn pest_detection_page(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut context = Context::new();
    context.insert("common_pests", detection::common_pests());
    render(&data, "pest_detection.html", "/pest-detection", context)
}

pub async fn settings_page(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let settings = lock_settings(&data)?.clone();
    let mut context = Context::new();
    context.insert("initials", &settings.profile.initials());
    context.insert("settings", &settings);
    context.insert("languages", language::LANGUAGES);
    context.insert("states", PROFILE_STATES);
    render(&data, "settings.html", "/settings", context)
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat API

pub async fn chat(
    data: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let session_id = req.session_id.unwrap_or_else(Uuid::new_v4);

    info!("Chat request from session {}: {}", session_id, req.message);

    let submission = {
        let mut sessions = lock_sessions(&data)?;
        match sessions.get_mut(&session_id) {
            Some(session) => submit_to(session, &req)?,
            None => {
                // A new session is only kept once its first message is accepted
                let mut session = Session::with_id(session_id);
                let submission = submit_to(&mut session, &req)?;
                sessions.insert(session_id, session);
                submission
            }
        }
    };

    // The reply is completed on its own task so a dropped request cannot
    // leave the session waiting. The session lock is released during the delay.
    let ticket = submission.ticket;
    let task_data = data.clone();
    let reply = actix_web::rt::spawn(async move {
        let delay = task_data.config.reply_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let mut sessions = lock_sessions(&task_data)?;
        let reply = sessions
            .get_mut(&session_id)
            .and_then(|session| session.complete_reply(ticket, &task_data.router));
        Ok::<_, AppError>(reply)
    })
    .await
    .map_err(|e| {
        error!("Reply task for session {} failed: {}", session_id, e);
        AppError::Internal("reply task failed".to_string())
    })??;

    match reply {
        Some(reply) => {
            info!("Replied to session {} with '{}' advice", session_id, reply.tag);
            Ok(HttpResponse::Ok().json(ChatResponse {
                session_id,
                message: submission.message,
                reply: reply.message,
            }))
        }
        None => {
            warn!("Dropping reply for session {}: closed before it was ready", session_id);
            Err(AppError::NotFound(format!("session {} was closed", session_id)))
        }
    }
}

fn submit_to(session: &mut Session, req: &ChatRequest) -> Result<Submission, SessionError> {
    if let Some(code) = req.language.as_deref() {
        session.set_language(code)?;
    }
    session.submit(&req.message)
}

pub async fn quick_questions() -> impl Responder {
    HttpResponse::Ok().json(QUICK_QUESTIONS)
}

pub async fn get_session(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let sessions = lock_sessions(&data)?;
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {} not found", session_id)))?;
    Ok(HttpResponse::Ok().json(SessionSnapshot::from(session)))
}

pub async fn close_session(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let mut session = lock_sessions(&data)?
        .remove(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {} not found", session_id)))?;
    if let Some(message_id) = session.close() {
        debug!("Cancelled utterance {} for session {}", message_id, session_id);
    }
    info!("Closed session {}", session_id);
    Ok(HttpResponse::NoContent().finish())
}

pub async fn toggle_speech(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SpeechRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let mut sessions = lock_sessions(&data)?;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {} not found", session_id)))?;
    let command = session.toggle_speech(req.message_id)?;
    Ok(HttpResponse::Ok().json(command))
}

pub async fn speech_event(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SpeechEventRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let mut sessions = lock_sessions(&data)?;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {} not found", session_id)))?;
    debug!("Speech event {:?} for session {}", req.event, session_id);
    session.speech_event(req.event);
    Ok(HttpResponse::NoContent().finish())
}

// Pest detection

pub async fn detect(data: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    match UploadedImage::accept(content_type, &body) {
        Some(image) => {
            let analysis = detection::analyze(data.detector.as_ref(), &image);
            HttpResponse::Ok().json(analysis)
        }
        // Not an image: nothing to do
        None => HttpResponse::NoContent().finish(),
    }
}

// Market

pub async fn market_prices(filter: web::Query<MarketFilter>) -> impl Responder {
    let filter = filter.into_inner();
    debug!("Filtering market data: {:?}", filter);
    let items = filter.apply().into_iter().map(MarketItem::from).collect();
    HttpResponse::Ok().json(MarketResponse {
        items,
        movers: market::top_movers(),
    })
}

pub async fn price_history() -> impl Responder {
    HttpResponse::Ok().json(PRICE_HISTORY)
}

// Dashboard

pub async fn dashboard_data() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "dashboard": DashboardData::default(),
        "weather": dashboard::WEATHER_FORECAST,
        "marketSnapshot": dashboard::MARKET_SNAPSHOT,
    }))
}

pub async fn recommendations(
    data: web::Data<AppState>,
    form: web::Json<AdvisoryForm>,
) -> impl Responder {
    let Some(dashboard) = dashboard::recommend(&form) else {
        debug!("Ignoring incomplete advisory form: {:?}", form);
        return HttpResponse::NoContent().finish();
    };
    let delay = data.config.advisory_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    HttpResponse::Ok().json(dashboard)
}

pub async fn districts(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let state = path.into_inner();
    let districts = dashboard::districts(&state)
        .ok_or_else(|| AppError::NotFound(format!("unknown state: {}", state)))?;
    Ok(HttpResponse::Ok().json(districts))
}

// Settings & preferences

pub async fn get_settings(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let settings = lock_settings(&data)?.clone();
    Ok(HttpResponse::Ok().json(settings))
}

pub async fn update_settings(
    data: web::Data<AppState>,
    req: web::Json<Settings>,
) -> Result<HttpResponse, AppError> {
    let updated = req.into_inner();
    data.preferences.set(LANGUAGE_KEY, &updated.preferences.language)?;
    *lock_settings(&data)? = updated.clone();
    info!("Updated settings for {}", updated.profile.name);
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn get_preferences(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.preferences.all())
}

pub async fn set_preference(
    data: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<PreferenceUpdate>,
) -> Result<HttpResponse, AppError> {
    let key = path.into_inner();
    data.preferences.set(&key, &req.value)?;
    info!("Preference {} set to {}", key, req.value);
    Ok(HttpResponse::Ok().json(data.preferences.all()))
}

pub async fn toggle_theme(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let theme = preferences::toggle_theme(data.preferences.as_ref())?;
    Ok(HttpResponse::Ok().json(json!({ "theme": theme.as_str() })))
}
