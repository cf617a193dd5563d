pub mod client;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::render::html_escape;

pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const NOT_PROVIDED: &str = "No proporcionado";
const NOT_SPECIFIED: &str = "No especificado";

/// Why a contact attempt ended. Every variant is terminal for that attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    MissingFields,
    InvalidName,
    InvalidEmail,
    InvalidPhone,
    QuotaExceeded { limit: u32 },
    Delivery(String),
}

impl ContactError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFields | Self::InvalidName | Self::InvalidEmail | Self::InvalidPhone => {
                "validation"
            }
            Self::QuotaExceeded { .. } => "quota",
            Self::Delivery(_) => "delivery",
        }
    }
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Por favor completa los campos obligatorios."),
            Self::InvalidName => write!(f, "Escribe tu nombre y apellido usando solo letras."),
            Self::InvalidEmail => write!(f, "Escribe un correo electrónico válido."),
            Self::InvalidPhone => write!(f, "El teléfono debe tener 10 dígitos (solo números)."),
            Self::QuotaExceeded { limit } => write!(
                f,
                "Has alcanzado el límite de {} mensajes por hoy. \
                 Por favor inténtalo mañana o contáctanos por teléfono.",
                limit
            ),
            Self::Delivery(_) => write!(
                f,
                "No se pudo enviar el mensaje. Por favor inténtalo más tarde."
            ),
        }
    }
}

/// JSON body of `POST /api/contact`. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub message: String,
}

/// A submission that passed server-side validation, trimmed and defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub message: String,
}

/// Message ready for a mail transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMail {
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ContactSubmission {
    /// Server-side checks, independent of whatever the client verified.
    pub fn validate(&self) -> Result<ValidContact, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(ContactError::InvalidEmail);
        }

        let project_type = self.project_type.trim();
        Ok(ValidContact {
            name: name.to_string(),
            email: email.to_string(),
            phone: self.phone.trim().to_string(),
            project_type: if project_type.is_empty() {
                NOT_SPECIFIED.to_string()
            } else {
                project_type.to_string()
            },
            message: message.to_string(),
        })
    }
}

/// Server responses use the short messages of the relay endpoint.
pub fn server_message(err: &ContactError) -> &'static str {
    match err {
        ContactError::InvalidEmail => "Correo electrónico inválido.",
        ContactError::Delivery(_) => "Error interno al enviar el mensaje.",
        _ => "Campos obligatorios faltantes.",
    }
}

impl ValidContact {
    pub fn compose(&self) -> ContactMail {
        let phone = if self.phone.is_empty() {
            NOT_PROVIDED
        } else {
            self.phone.as_str()
        };

        let text = format!(
            "Nuevo mensaje desde el formulario de contacto:\n\n\
             Nombre: {}\n\
             Correo: {}\n\
             Teléfono: {}\n\
             Tipo de proyecto: {}\n\n\
             Mensaje:\n{}",
            self.name, self.email, phone, self.project_type, self.message
        );

        let html = format!(
            "<h2>Nuevo mensaje desde el sitio web</h2>\n\
             <p><strong>Nombre:</strong> {}</p>\n\
             <p><strong>Correo:</strong> {}</p>\n\
             <p><strong>Teléfono:</strong> {}</p>\n\
             <p><strong>Tipo de proyecto:</strong> {}</p>\n\
             <p><strong>Mensaje:</strong></p>\n\
             <p style=\"white-space:pre-line;\">{}</p>",
            html_escape(&self.name),
            html_escape(&self.email),
            html_escape(phone),
            html_escape(&self.project_type),
            html_escape(&self.message),
        );

        ContactMail {
            reply_to: self.email.clone(),
            subject: format!("Nuevo mensaje de contacto: {}", self.name),
            text,
            html,
        }
    }
}
