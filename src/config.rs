use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DAILY_LIMIT: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS (465) when set, STARTTLS otherwise.
    pub secure: bool,
    pub username: String,
    pub password: String,
}

/// Process configuration, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub port: u16,
    pub site_root: PathBuf,
    pub gallery_dir: PathBuf,
    pub media_url_root: String,
    pub projects_file: PathBuf,
    pub smtp: SmtpConfig,
    pub contact_to: String,
    pub contact_from: String,
    pub cors_origin: String,
    pub contact_daily_limit: u32,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let get_or = |key: &str, def: &str| get(key).unwrap_or_else(|| def.to_string());

        let site_root = PathBuf::from(get_or("SITE_ROOT", "site"));
        let gallery_dir = get("GALLERY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| site_root.join("assets").join("Imagenes galería"));
        let projects_file = get("PROJECTS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| site_root.join("data").join("projects.json"));

        let smtp = SmtpConfig {
            host: get_or("SMTP_HOST", ""),
            port: get("SMTP_PORT").and_then(|v| v.parse().ok()).unwrap_or(587),
            secure: get("SMTP_SECURE").map(|v| v == "true").unwrap_or(false),
            username: get_or("SMTP_USER", ""),
            password: get_or("SMTP_PASS", ""),
        };

        SiteConfig {
            port: get("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            site_root,
            gallery_dir,
            media_url_root: get_or("MEDIA_URL_ROOT", "assets/Imagenes galería/"),
            projects_file,
            contact_to: get("CONTACT_TO").unwrap_or_else(|| smtp.username.clone()),
            contact_from: get("CONTACT_FROM").unwrap_or_else(|| smtp.username.clone()),
            smtp,
            cors_origin: get_or("CORS_ORIGIN", "*"),
            contact_daily_limit: get("CONTACT_DAILY_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DAILY_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> SiteConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SiteConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]);
        assert_eq!(c.port, 3000);
        assert_eq!(c.site_root, PathBuf::from("site"));
        assert_eq!(c.gallery_dir, PathBuf::from("site/assets/Imagenes galería"));
        assert_eq!(c.projects_file, PathBuf::from("site/data/projects.json"));
        assert_eq!(c.media_url_root, "assets/Imagenes galería/");
        assert_eq!(c.smtp.port, 587);
        assert!(!c.smtp.secure);
        assert_eq!(c.cors_origin, "*");
        assert_eq!(c.contact_daily_limit, 5);
    }

    #[test]
    fn test_contact_addresses_fall_back_to_smtp_user() {
        let c = config(&[("SMTP_USER", "web@guca.mx"), ("CONTACT_TO", "obras@guca.mx")]);
        assert_eq!(c.contact_to, "obras@guca.mx");
        assert_eq!(c.contact_from, "web@guca.mx");
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let c = config(&[
            ("PORT", "8080"),
            ("SITE_ROOT", "/srv/www"),
            ("SMTP_PORT", "nope"),
            ("SMTP_SECURE", "true"),
            ("CONTACT_DAILY_LIMIT", "  "),
        ]);
        assert_eq!(c.port, 8080);
        assert_eq!(c.projects_file, PathBuf::from("/srv/www/data/projects.json"));
        assert_eq!(c.smtp.port, 587);
        assert!(c.smtp.secure);
        assert_eq!(c.contact_daily_limit, 5);
    }
}
