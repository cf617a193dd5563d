use log::{error, info, warn};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BootReport {
    pub warnings: u32,
    pub errors: u32,
}

/// Inspect the site layout before launch. Creates the site root when
/// missing and warns about anything that will degrade a feature.
pub fn check(config: &SiteConfig) -> BootReport {
    info!("[boot] Site boot check starting...");
    let mut report = BootReport::default();

    // ── 1. Site root ───────────────────────────────────
    let root = config.site_root.as_path();
    if !root.exists() {
        match fs::create_dir_all(root) {
            Ok(_) => info!("[boot]   Created directory: {}", root.display()),
            Err(e) => {
                error!("[boot]   FAILED to create directory {}: {}", root.display(), e);
                report.errors += 1;
            }
        }
    }

    // ── 2. Gallery directory ───────────────────────────
    if !config.gallery_dir.is_dir() {
        warn!(
            "[boot]   Missing gallery directory: {} (/api/gallery will fail)",
            config.gallery_dir.display()
        );
        report.warnings += 1;
    }

    // ── 3. Projects feed ───────────────────────────────
    if !config.projects_file.is_file() {
        warn!(
            "[boot]   Missing projects file: {} (project grid will be empty)",
            config.projects_file.display()
        );
        report.warnings += 1;
    }

    // ── 4. Landing page ────────────────────────────────
    if !root.join("index.html").is_file() {
        warn!("[boot]   {} has no index.html", root.display());
        report.warnings += 1;
    }

    // ── 5. Mail transport ──────────────────────────────
    if config.smtp.host.is_empty() {
        warn!("[boot]   SMTP_HOST not set (contact form will fail to deliver)");
        report.warnings += 1;
    } else if config.contact_to.is_empty() || config.contact_from.is_empty() {
        warn!("[boot]   CONTACT_TO/CONTACT_FROM unresolved (set SMTP_USER or both explicitly)");
        report.warnings += 1;
    }

    // ── 6. Rocket.toml ─────────────────────────────────
    if !Path::new("Rocket.toml").exists() {
        info!("[boot]   Rocket.toml not found, using defaults");
    }

    report
}

/// Run the boot check and abort the process on errors.
pub fn run(config: &SiteConfig) {
    let report = check(config);

    if report.errors > 0 {
        error!(
            "[boot] Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        std::process::exit(1);
    }

    if report.warnings > 0 {
        warn!(
            "[boot] Boot check passed with {} warning(s). Some features may not work correctly.",
            report.warnings
        );
    } else {
        info!("[boot] Boot check passed. All systems go.");
    }
}
