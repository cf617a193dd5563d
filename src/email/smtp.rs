use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::Mailer;
use crate::config::SmtpConfig;
use crate::contact::ContactMail;

pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, from: &str, to: &str) -> Result<Self, String> {
        if config.host.is_empty() {
            return Err("SMTP host not configured".into());
        }

        let builder = if config.secure {
            SmtpTransport::relay(&config.host)
        } else {
            SmtpTransport::starttls_relay(&config.host)
        }
        .map_err(|e| format!("SMTP relay error: {}", e))?
        .port(config.port);

        let builder = if config.username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
        };

        Ok(SmtpMailer {
            transport: builder.build(),
            from: from
                .parse()
                .map_err(|e| format!("Invalid from address: {}", e))?,
            to: to.parse().map_err(|e| format!("Invalid to address: {}", e))?,
        })
    }
}

/// Build the multipart (text + HTML) message for a contact mail.
pub fn build_message(from: &Mailbox, to: &Mailbox, mail: &ContactMail) -> Result<Message, String> {
    let mut builder = Message::builder()
        .from(from.clone())
        .to(to.clone())
        .subject(mail.subject.as_str());

    match mail.reply_to.parse::<Mailbox>() {
        Ok(reply_to) => builder = builder.reply_to(reply_to),
        Err(e) => log::warn!("[email] Skipping reply-to {}: {}", mail.reply_to, e),
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            mail.text.clone(),
            mail.html.clone(),
        ))
        .map_err(|e| format!("Failed to build email: {}", e))
}

impl Mailer for SmtpMailer {
    fn send(&self, mail: &ContactMail) -> Result<(), String> {
        let email = build_message(&self.from, &self.to, mail)?;
        self.transport
            .send(&email)
            .map_err(|e| format!("SMTP send error: {}", e))?;
        Ok(())
    }

    fn verify(&self) -> Result<(), String> {
        match self.transport.test_connection() {
            Ok(true) => Ok(()),
            Ok(false) => Err("SMTP server did not accept the connection".into()),
            Err(e) => Err(format!("SMTP connection error: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(reply_to: &str) -> ContactMail {
        ContactMail {
            reply_to: reply_to.into(),
            subject: "Nuevo mensaje de contacto: Ana".into(),
            text: "Nombre: Ana".into(),
            html: "<p>Nombre: Ana</p>".into(),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let from: Mailbox = "web@guca.mx".parse().unwrap();
        let to: Mailbox = "obras@guca.mx".parse().unwrap();
        let msg = build_message(&from, &to, &mail("ana@mail.com")).unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();
        assert!(raw.contains("From: web@guca.mx"));
        assert!(raw.contains("To: obras@guca.mx"));
        assert!(raw.contains("Reply-To: ana@mail.com"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[test]
    fn test_unparseable_reply_to_is_skipped() {
        let from: Mailbox = "web@guca.mx".parse().unwrap();
        let to: Mailbox = "obras@guca.mx".parse().unwrap();
        let msg = build_message(&from, &to, &mail("not an address")).unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();
        assert!(!raw.contains("Reply-To"));
    }

    #[test]
    fn test_missing_host_is_rejected() {
        let config = SmtpConfig::default();
        assert!(SmtpMailer::new(&config, "a@b.co", "c@d.co").is_err());
    }
}
