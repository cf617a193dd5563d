use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::{tokio, State};
use serde_json::{json, Value};
use std::sync::Arc;

use super::gallery_view;
use crate::config::SiteConfig;
use crate::contact::{server_message, ContactError, ContactSubmission};
use crate::email::Mailer;
use crate::gallery::GalleryView;
use crate::media::{self, GalleryListing};

// ── Health ─────────────────────────────────────────────

#[get("/ping")]
pub fn ping() -> Json<Value> {
    Json(json!({
        "ok": true,
        "message": "Construcciones GUCA API en línea.",
    }))
}

// ── Gallery listing ────────────────────────────────────

#[get("/gallery")]
pub fn gallery(config: &State<SiteConfig>) -> Result<Json<GalleryListing>, (Status, Json<Value>)> {
    match media::list_gallery(&config.gallery_dir) {
        Ok(items) => Ok(Json(GalleryListing { items })),
        Err(e) => {
            log::error!("[gallery] {}", e);
            Err((
                Status::InternalServerError,
                Json(json!({"error": "No se pudo leer la galería."})),
            ))
        }
    }
}

// ── Projects ───────────────────────────────────────────

#[get("/projects?<sort>&<expanded>")]
pub fn projects(
    config: &State<SiteConfig>,
    sort: Option<&str>,
    expanded: Option<bool>,
) -> Json<GalleryView> {
    Json(gallery_view(config, sort, expanded))
}

// ── Contact relay ──────────────────────────────────────

#[post("/contact", format = "json", data = "<form>")]
pub async fn contact(
    mailer: &State<Arc<dyn Mailer>>,
    form: Result<Json<ContactSubmission>, json::Error<'_>>,
) -> (Status, Json<Value>) {
    let validated = match form {
        Ok(form) => form.validate(),
        Err(e) => {
            log::info!("[contact] Unreadable body: {:?}", e);
            Err(ContactError::MissingFields)
        }
    };
    let valid = match validated {
        Ok(v) => v,
        Err(e) => {
            log::info!("[contact] Rejected submission: {:?}", e);
            return (
                Status::BadRequest,
                Json(json!({"ok": false, "error": server_message(&e)})),
            );
        }
    };

    // SMTP is a blocking dialogue; keep it off the async workers
    let mail = valid.compose();
    let mailer = Arc::clone(mailer.inner());
    let sent = tokio::task::spawn_blocking(move || mailer.send(&mail))
        .await
        .unwrap_or_else(|e| Err(format!("Mail task failed: {}", e)));

    match sent {
        Ok(()) => {
            log::info!("[contact] Message from {} relayed", valid.email);
            (Status::Ok, Json(json!({"ok": true})))
        }
        Err(e) => {
            log::error!("[contact] Delivery failed for {}: {}", valid.email, e);
            (
                Status::InternalServerError,
                Json(json!({
                    "ok": false,
                    "error": server_message(&ContactError::Delivery(e)),
                })),
            )
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![ping, gallery, projects, contact]
}
