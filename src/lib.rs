#[macro_use]
extern crate rocket;

pub mod boot;
pub mod config;
pub mod contact;
pub mod email;
pub mod feed;
pub mod gallery;
pub mod media;
pub mod models;
pub mod prefs;
pub mod render;
pub mod routes;
pub mod scheduler;


use std::sync::Arc;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::fs::{FileServer, Options};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::response::status::NoContent;
use rocket::serde::json::Json;
use rocket::{tokio, Build, Orbit, Request, Rocket};
use serde_json::{json, Value};

use config::SiteConfig;
use email::Mailer;

/// Adds CORS headers to every response. The origin comes from `CORS_ORIGIN`.
pub struct Cors(pub String);

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info { name: "CORS Headers", kind: Kind::Response }
    }

    async fn on_response<'r>(&self, _req: &'r Request<'_>, res: &mut rocket::Response<'r>) {
        res.set_header(Header::new("Access-Control-Allow-Origin", self.0.clone()));
        res.set_header(Header::new("Access-Control-Allow-Methods", "GET, POST, OPTIONS"));
        res.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
    }
}

#[options("/<_..>")]
fn preflight() -> NoContent {
    NoContent
}

/// Verifies the mail transport once the server is up. Failures are logged,
/// never fatal: the site keeps serving and `/api/contact` reports 500.
pub struct SmtpCheck;

#[rocket::async_trait]
impl Fairing for SmtpCheck {
    fn info(&self) -> Info {
        Info { name: "SMTP Check", kind: Kind::Liftoff }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let mailer = match rocket.state::<Arc<dyn Mailer>>() {
            Some(m) => Arc::clone(m),
            None => return,
        };
        match tokio::task::spawn_blocking(move || mailer.verify()).await {
            Ok(Ok(())) => log::info!("[smtp] Transport ready"),
            Ok(Err(e)) => log::error!("[smtp] Transport check failed: {}", e),
            Err(e) => log::error!("[smtp] Transport check panicked: {}", e),
        }
    }
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html lang='es'><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Página no encontrada.</p><a href='/'>← Inicio</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html lang='es'><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Error interno del servidor.</p><a href='/'>← Inicio</a></body></html>".to_string())
}

#[catch(default)]
fn api_error(status: Status, _req: &Request) -> (Status, Json<Value>) {
    (status, Json(json!({"ok": false, "error": status.reason().unwrap_or("Error")})))
}

/// Assemble the server: static site at `/`, JSON API at `/api`.
pub fn build_rocket(config: SiteConfig, mailer: Arc<dyn Mailer>) -> Rocket<Build> {
    let figment = rocket::Config::figment().merge(("port", config.port));
    let static_files = FileServer::new(&config.site_root, Options::Index | Options::Missing);

    rocket::custom(figment)
        .attach(Cors(config.cors_origin.clone()))
        .attach(SmtpCheck)
        .manage(mailer)
        .mount("/", static_files)
        .mount("/", routes::public::routes())
        .mount("/", routes![preflight])
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
        .register("/api", catchers![api_error])
        .manage(config)
}
