//! Contact-form email relay.
//!
//! One attempt per submission, synchronous with the request — no queue, no
//! retry. The caller decides what to show the visitor; this module only
//! reports whether the relay succeeded.

use crate::config::SmtpConfig;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("message build error: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// A contact-form submission as received from the visitor.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Relay a submission to the company inbox.
///
/// Reply-To is the visitor's address so replying in a mail client just works.
pub async fn send_contact(config: &SmtpConfig, submission: &ContactSubmission) -> Result<(), MailError> {
    let message = build_message(config, submission)?;
    transport(config)?.send(message).await?;
    Ok(())
}

fn build_message(config: &SmtpConfig, submission: &ContactSubmission) -> Result<Message, MailError> {
    let html_body = maud::html! {
        p { strong { "Name: " } (submission.name) }
        p { strong { "Email: " } (submission.email) }
        p {
            strong { "Message:" }
            br;
            @for line in submission.message.lines() {
                (line)
                br;
            }
        }
    }
    .into_string();

    Ok(Message::builder()
        .from(format!("Website Contact <{}>", config.from).parse()?)
        .reply_to(submission.email.parse()?)
        .to(config.company_email.parse()?)
        .subject(format!("New Contact Form Submission from {}", submission.name))
        .multipart(MultiPart::alternative_plain_html(
            submission.message.clone(),
            html_body,
        ))?)
}

/// Build the SMTP transport. `secure` selects implicit TLS (typically port
/// 465); otherwise STARTTLS on the configured port (typically 587).
fn transport(config: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    let builder = if config.secure {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
    };
    Ok(builder
        .port(config.port)
        .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            secure: false,
            user: "mailer@example.com".to_string(),
            pass: "hunter2".to_string(),
            from: "mailer@example.com".to_string(),
            company_email: "sales@example.com".to_string(),
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello\nthere".to_string(),
        }
    }

    #[test]
    fn message_builds_with_valid_addresses() {
        let message = build_message(&test_config(), &submission()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: New Contact Form Submission from Ada"));
        assert!(raw.contains("Reply-To: ada@example.com"));
        assert!(raw.contains("To: sales@example.com"));
    }

    #[test]
    fn invalid_visitor_address_is_a_mail_error() {
        let mut bad = submission();
        bad.email = "not an address".to_string();
        let result = build_message(&test_config(), &bad);
        assert!(matches!(result, Err(MailError::Address(_))));
    }

    #[test]
    fn message_html_part_escapes_content() {
        let mut sneaky = submission();
        sneaky.message = "<b>bold claim</b>".to_string();
        let message = build_message(&test_config(), &sneaky).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        // The HTML alternative carries the message escaped, not as markup
        assert!(raw.contains("&lt;b&gt;bold claim&lt;/b&gt;"));
    }

    #[test]
    fn transport_builds_for_both_tls_modes() {
        assert!(transport(&test_config()).is_ok());
        let mut wrapped = test_config();
        wrapped.secure = true;
        wrapped.port = 465;
        assert!(transport(&wrapped).is_ok());
    }
}
