//! Contact form as the visitor's browser runs it: local validation, the
//! advisory daily cap, then exactly one POST to the relay endpoint.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{ContactError, ContactSubmission, EMAIL_RE};
use crate::config::SiteConfig;
use crate::prefs::{PersistentSettings, Storage, CONTACT_STATS};

/// Two or more words of letters, Spanish accents included.
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ]+(?:\s+[A-Za-zÁÉÍÓÚÜÑáéíóúüñ]+)+$")
        .expect("valid name regex")
});

pub const DEFAULT_PHONE_COUNTRY: &str = "+52";
pub const PHONE_DIGITS: usize = 10;

/// Raw form fields.
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub phone_country: String,
    pub phone_number: String,
    pub project_type: String,
    pub message: String,
}

/// Local checks, in the order the form reports them.
pub fn validate(input: &ContactInput) -> Result<ContactSubmission, ContactError> {
    let name = input.name.trim();
    let email = input.email.trim();
    let phone_raw = input.phone_number.trim();
    let message = input.message.trim();

    if name.is_empty() || email.is_empty() || phone_raw.is_empty() || message.is_empty() {
        return Err(ContactError::MissingFields);
    }
    if !NAME_RE.is_match(name) {
        return Err(ContactError::InvalidName);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ContactError::InvalidEmail);
    }

    let digits: String = phone_raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != PHONE_DIGITS {
        return Err(ContactError::InvalidPhone);
    }

    let country = match input.phone_country.trim() {
        "" => DEFAULT_PHONE_COUNTRY,
        c => c,
    };

    Ok(ContactSubmission {
        name: name.to_string(),
        email: email.to_string(),
        phone: format!("{} {}", country, digits),
        project_type: input.project_type.trim().to_string(),
        message: message.to_string(),
    })
}

/// Delivers one submission to the relay endpoint.
pub trait ContactTransport {
    fn post(&self, submission: &ContactSubmission) -> Result<(), String>;
}

/// JSON POST over HTTP.
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;
        Ok(HttpTransport {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

impl ContactTransport for HttpTransport {
    fn post(&self, submission: &ContactSubmission) -> Result<(), String> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .map_err(|e| format!("Contact request failed: {}", e))?;

        let status = resp.status();
        let body: Value = resp.json().unwrap_or_default();
        if status.is_success() && body.get("ok").and_then(|v| v.as_bool()).unwrap_or(false) {
            return Ok(());
        }
        let error = body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
            .to_string();
        Err(format!("Contact endpoint returned {}: {}", status, error))
    }
}

/// The form controller. The counter only moves when the endpoint accepts.
pub struct ContactForm<'a, S: Storage, T: ContactTransport> {
    settings: &'a mut PersistentSettings<S>,
    transport: T,
    daily_limit: u32,
}

impl<'a, S: Storage, T: ContactTransport> ContactForm<'a, S, T> {
    pub fn new(settings: &'a mut PersistentSettings<S>, transport: T, daily_limit: u32) -> Self {
        ContactForm {
            settings,
            transport,
            daily_limit,
        }
    }

    /// Form capped at the site's configured `CONTACT_DAILY_LIMIT`.
    pub fn with_config(
        settings: &'a mut PersistentSettings<S>,
        transport: T,
        config: &SiteConfig,
    ) -> Self {
        Self::new(settings, transport, config.contact_daily_limit)
    }

    pub fn submit(&mut self, input: &ContactInput) -> Result<u32, ContactError> {
        self.submit_on(input, Utc::now().date_naive())
    }

    /// Returns how many submissions were accepted `today`, including this one.
    pub fn submit_on(&mut self, input: &ContactInput, today: NaiveDate) -> Result<u32, ContactError> {
        let submission = validate(input)?;

        let mut stats = self.settings.contact_stats(today);
        if stats.count >= self.daily_limit {
            log::info!("[contact] Daily limit of {} reached", self.daily_limit);
            return Err(ContactError::QuotaExceeded {
                limit: self.daily_limit,
            });
        }

        self.transport.post(&submission).map_err(|e| {
            log::error!("[contact] Submission failed: {}", e);
            ContactError::Delivery(e)
        })?;

        stats.count += 1;
        if let Err(e) = self.settings.set(&CONTACT_STATS, &stats) {
            log::warn!("[contact] Could not persist submission counter: {}", e);
        }
        Ok(stats.count)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
