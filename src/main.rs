use std::sync::Arc;

use guca_site::config::SiteConfig;
use guca_site::email::smtp::SmtpMailer;
use guca_site::email::{Mailer, Unconfigured};
use guca_site::{boot, build_rocket};

#[rocket::launch]
fn rocket() -> _ {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = SiteConfig::from_env();

    // Boot check: create the site root, warn about missing assets
    boot::run(&config);

    let mailer: Arc<dyn Mailer> =
        match SmtpMailer::new(&config.smtp, &config.contact_from, &config.contact_to) {
            Ok(m) => Arc::new(m),
            Err(e) => {
                log::warn!("[smtp] {}; contact form disabled", e);
                Arc::new(Unconfigured)
            }
        };

    log::info!("[boot] Serving {} on port {}", config.site_root.display(), config.port);
    build_rocket(config, mailer)
}
