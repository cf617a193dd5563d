pub mod smtp;

use crate::contact::ContactMail;

/// Outbound mail for contact submissions. One attempt per call, no retry.
pub trait Mailer: Send + Sync {
    fn send(&self, mail: &ContactMail) -> Result<(), String>;

    /// Check that the transport is reachable and accepts our credentials.
    fn verify(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Stand-in used when no SMTP host is configured: every send fails.
pub struct Unconfigured;

impl Mailer for Unconfigured {
    fn send(&self, _mail: &ContactMail) -> Result<(), String> {
        Err("No email transport configured".into())
    }

    fn verify(&self) -> Result<(), String> {
        Err("SMTP_HOST is not set".into())
    }
}
