//! Outgoing notification mail over async SMTP.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use vivaah_common::submission::{
    events_display, Accommodation, Attendance, ContactSubmission, RsvpSubmission,
};

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    notify_to: Mailbox,
}

impl Mailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Mailer {
            transport,
            from: config.from.parse()?,
            notify_to: config.notify_to.parse()?,
        })
    }

    /// Owner notification for a contact-form message.
    pub async fn send_contact_notification(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), MailError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.notify_to.clone())
            .subject(format!("New contact message from {}", submission.name))
            .header(ContentType::TEXT_HTML)
            .body(contact_notification_body(submission))?;
        self.transport.send(email).await?;
        Ok(())
    }

    /// Owner notification for a new RSVP.
    pub async fn send_rsvp_notification(
        &self,
        submission: &RsvpSubmission,
    ) -> Result<(), MailError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.notify_to.clone())
            .subject(format!(
                "New RSVP: {} - {}",
                submission.name,
                submission.attendance.as_str().to_uppercase()
            ))
            .header(ContentType::TEXT_HTML)
            .body(rsvp_notification_body(submission))?;
        self.transport.send(email).await?;
        Ok(())
    }

    /// Confirmation to the guest who submitted the RSVP.
    pub async fn send_rsvp_confirmation(
        &self,
        submission: &RsvpSubmission,
    ) -> Result<(), MailError> {
        let to: Mailbox = submission.email.parse()?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("RSVP Confirmation - Bhavdeep & Ramandeep's Wedding")
            .header(ContentType::TEXT_HTML)
            .body(rsvp_confirmation_body(submission))?;
        self.transport.send(email).await?;
        Ok(())
    }
}

// ─── Message bodies ──────────────────────────────────────────────────────────

fn contact_notification_body(s: &ContactSubmission) -> String {
    format!(
        "<h2>New Contact Form Message</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Phone:</strong> {}</p>\
         <h3>Message</h3>\
         <p style=\"white-space: pre-wrap;\">{}</p>\
         <p><strong>Submitted:</strong> {}</p>",
        s.name,
        s.email,
        s.phone,
        s.message,
        s.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn rsvp_notification_body(s: &RsvpSubmission) -> String {
    let mut body = format!(
        "<h2>New Wedding RSVP Received</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Phone:</strong> {}</p>\
         <p><strong>Attendance:</strong> {}</p>",
        s.name,
        s.email,
        s.phone,
        s.attendance.as_str().to_uppercase(),
    );

    if s.attendance != Attendance::No {
        body.push_str(&format!(
            "<p><strong>Number of Guests:</strong> {}</p>\
             <p><strong>Events Attending:</strong> {}</p>",
            s.guest_count,
            events_display(&s.events),
        ));
        if !s.dietary_restrictions.is_empty() {
            body.push_str(&format!(
                "<p><strong>Dietary Restrictions:</strong> {}</p>",
                s.dietary_restrictions
            ));
        }
        if s.accommodation != Accommodation::No {
            body.push_str(&format!(
                "<p><strong>Accommodation Help:</strong> {}</p>",
                s.accommodation.as_str()
            ));
        }
        if !s.special_requests.is_empty() {
            body.push_str(&format!(
                "<p><strong>Special Requests:</strong> {}</p>",
                s.special_requests
            ));
        }
    }

    body.push_str(&format!(
        "<p><strong>Submitted:</strong> {}</p>",
        s.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    body
}

fn rsvp_confirmation_body(s: &RsvpSubmission) -> String {
    let status = match s.attendance {
        Attendance::Yes => {
            "<h3>We Can't Wait to See You!</h3>\
             <p>Thank you for being part of our celebration. We'll be in touch \
             with more details about the venue and timing.</p>"
        }
        Attendance::No => {
            "<h3>We'll Miss You</h3>\
             <p>We're sorry you can't make it, but we understand. We'll be \
             thinking of you on our special day!</p>"
        }
        Attendance::Maybe => {
            "<h3>Let Us Know Soon!</h3>\
             <p>No worries about being unsure. Please let us know your final \
             decision by October 1st, 2025, so we can plan accordingly.</p>"
        }
    };

    let details = if s.attendance != Attendance::No {
        format!(
            "<p><strong>Number of Guests:</strong> {}</p>\
             <p><strong>Events:</strong> {}</p>",
            s.guest_count,
            events_display(&s.events),
        )
    } else {
        String::new()
    };

    format!(
        "<h2>Thank You for Your RSVP!</h2>\
         <h3>Bhavdeep &amp; Ramandeep's Wedding</h3>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Attendance:</strong> {}</p>\
         {details}\
         {status}\
         <h3>Wedding Events</h3>\
         <p><strong>Haldi Ceremony</strong> - October 25, 2025</p>\
         <p><strong>Mehandi Ceremony</strong> - October 25, 2025</p>\
         <p><strong>Wedding Ceremony</strong> - October 26, 2025</p>\
         <p>With love and excitement,<br><strong>Bhavdeep &amp; Ramandeep</strong></p>",
        s.name,
        s.attendance.as_str().to_uppercase(),
    )
}
