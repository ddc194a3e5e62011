//! Email service for registration, review, and contact-form notifications.

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::path::Path;

use crate::{
    config::{Config, EmailTransportConfig},
    db::models::registrations::RegistrationStatus,
    errors::Error,
};

pub struct EmailService {
    transport: EmailTransport,
    from_email: String,
    from_name: String,
    reply_to: Option<String>,
    dashboard_url: String,
}

enum EmailTransport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

impl EmailService {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let email_config = &config.email;

        let transport = match &email_config.transport {
            EmailTransportConfig::Smtp {
                host,
                port,
                username,
                password,
                use_tls,
            } => {
                if !use_tls {
                    tracing::warn!("SMTP TLS is disabled - this is not recommended for production");
                }

                let smtp_builder = if *use_tls {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                } else {
                    Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host))
                }
                .map_err(|e| Error::Internal {
                    operation: format!("create SMTP transport: {e}"),
                })?
                .port(*port)
                .credentials(Credentials::new(username.clone(), password.clone()));

                EmailTransport::Smtp(smtp_builder.build())
            }
            EmailTransportConfig::File { path } => {
                // File transport for development/testing
                let emails_dir = Path::new(path);
                if !emails_dir.exists() {
                    std::fs::create_dir_all(emails_dir).map_err(|e| Error::Internal {
                        operation: format!("create emails directory: {e}"),
                    })?;
                }
                EmailTransport::File(AsyncFileTransport::<Tokio1Executor>::new(emails_dir))
            }
        };

        Ok(Self {
            transport,
            from_email: email_config.from_email.clone(),
            from_name: email_config.from_name.clone(),
            reply_to: email_config.reply_to.clone(),
            dashboard_url: config.dashboard_url.clone(),
        })
    }

    /// Confirmation to the registrant that their submission arrived.
    pub async fn send_registration_received(&self, to_email: &str, first_name: &str) -> Result<(), Error> {
        let body = self.create_registration_received_body(first_name);
        self.send_email(to_email, Some(first_name), "Training Registration Received", &body).await
    }

    /// Alert to the administrator with the registrant's details and a review link.
    pub async fn send_registration_alert(
        &self,
        to_email: &str,
        first_name: &str,
        last_name: &str,
        registrant_email: &str,
        phone: &str,
    ) -> Result<(), Error> {
        let body = self.create_registration_alert_body(first_name, last_name, registrant_email, phone);
        self.send_email(to_email, None, "New User Registration", &body).await
    }

    /// Outcome notification after an administrator changes a registration's status.
    pub async fn send_status_changed(&self, to_email: &str, first_name: &str, status: RegistrationStatus) -> Result<(), Error> {
        let subject = format!("Your Registration has been {status}");
        let body = self.create_status_changed_body(first_name, status);
        self.send_email(to_email, Some(first_name), &subject, &body).await
    }

    /// Contact-form submission forwarded to the configured receiver addresses.
    ///
    /// Reply-To is set to the submitter so receivers can answer directly.
    pub async fn send_contact_notification(&self, to_emails: &[String], name: &str, email: &str, message: &str) -> Result<(), Error> {
        let mut builder = Message::builder()
            .from(self.from_mailbox()?)
            .subject("New Contact Form Submission")
            .header(ContentType::TEXT_HTML);

        for to_email in to_emails {
            builder = builder.to(parse_mailbox(to_email, None)?);
        }
        if let Ok(reply_to) = parse_mailbox(email, Some(name)) {
            builder = builder.reply_to(reply_to);
        }

        let message = builder
            .body(self.create_contact_notification_body(name, email, message))
            .map_err(|e| Error::Internal {
                operation: format!("build email message: {e}"),
            })?;

        self.dispatch(message).await
    }

    /// Acknowledgment back to the contact-form submitter.
    pub async fn send_contact_ack(&self, to_email: &str, name: &str) -> Result<(), Error> {
        let body = self.create_contact_ack_body(name);
        self.send_email(to_email, Some(name), "Your Submission Was Received!", &body).await
    }

    async fn send_email(&self, to_email: &str, to_name: Option<&str>, subject: &str, body: &str) -> Result<(), Error> {
        let mut builder = Message::builder()
            .from(self.from_mailbox()?)
            .to(parse_mailbox(to_email, to_name)?)
            .subject(subject)
            .header(ContentType::TEXT_HTML);

        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to, None)?);
        }

        let message = builder.body(body.to_string()).map_err(|e| Error::Internal {
            operation: format!("build email message: {e}"),
        })?;

        self.dispatch(message).await
    }

    async fn dispatch(&self, message: Message) -> Result<(), Error> {
        match &self.transport {
            EmailTransport::Smtp(smtp) => {
                smtp.send(message).await.map_err(|e| Error::Internal {
                    operation: format!("send SMTP email: {e}"),
                })?;
            }
            EmailTransport::File(file) => {
                file.send(message).await.map_err(|e| Error::Internal {
                    operation: format!("send file email: {e}"),
                })?;
            }
        }

        Ok(())
    }

    fn from_mailbox(&self) -> Result<Mailbox, Error> {
        format!("{} <{}>", self.from_name, self.from_email)
            .parse::<Mailbox>()
            .map_err(|e| Error::Internal {
                operation: format!("parse from email: {e}"),
            })
    }

    fn create_registration_received_body(&self, first_name: &str) -> String {
        format!(
            "<h3>Dear {first_name},</h3>\
             <p>Your registration has been received! We will review your details and notify you of the approval status.</p>"
        )
    }

    fn create_registration_alert_body(&self, first_name: &str, last_name: &str, email: &str, phone: &str) -> String {
        format!(
            "<h3>New User Registration</h3>\
             <p>A new user has registered:</p>\
             <ul>\
               <li>Name: {first_name} {last_name}</li>\
               <li>Email: {email}</li>\
               <li>Phone: {phone}</li>\
             </ul>\
             <p><a href=\"{}/users\">Review &amp; Approve Users</a></p>",
            self.dashboard_url
        )
    }

    fn create_status_changed_body(&self, first_name: &str, status: RegistrationStatus) -> String {
        match status {
            RegistrationStatus::Approved => format!(
                "<h3>Congratulations {first_name},</h3>\
                 <p>Your registration has been approved! Further details will be sent soon.</p>"
            ),
            _ => format!(
                "<h3>Dear {first_name},</h3>\
                 <p>Unfortunately, your registration was not approved.</p>"
            ),
        }
    }

    fn create_contact_notification_body(&self, name: &str, email: &str, message: &str) -> String {
        format!(
            "<h3>You have received a new message</h3>\
             <ul>\
               <li>Name: {name}</li>\
               <li>Email: {email}</li>\
             </ul>\
             <p>{message}</p>"
        )
    }

    fn create_contact_ack_body(&self, name: &str) -> String {
        format!(
            "<h3>Hello {name},</h3>\
             <p>Thank you for contacting us. We have received your message and will get back to you soon.</p>"
        )
    }
}

fn parse_mailbox(email: &str, name: Option<&str>) -> Result<Mailbox, Error> {
    if let Some(name) = name {
        format!("{name} <{email}>")
    } else {
        email.to_string()
    }
    .parse::<Mailbox>()
    .map_err(|e| Error::Internal {
        operation: format!("parse recipient email: {e}"),
    })
}
