use anyhow::{Context, Result};
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::mail::{MailConfig, TransportSecurity};
use crate::handlers::contact_dtos::MailSubmission;

/// SMTP dispatch for contact form submissions. The transport is built once
/// at startup and shared read-only across requests.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: MailConfig,
}

impl Mailer {
    pub fn from_env() -> Result<Self> {
        Self::new(MailConfig::from_env()?)
    }

    pub fn new(config: MailConfig) -> Result<Self> {
        let builder = match config.security {
            TransportSecurity::Implicit => {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            }
            TransportSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            }
        };
        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Mailer { transport, config })
    }

    /// Sends the submission to the configured inbox. The attachment, if
    /// any, goes out base64-encoded under its original filename and
    /// declared MIME type.
    pub async fn send_contact_form(&self, submission: &MailSubmission) -> Result<()> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .context("invalid from address")?;
        // the agency mails itself
        let to: Mailbox = self
            .config
            .from_email
            .parse()
            .context("invalid recipient address")?;

        let alternative = MultiPart::alternative_plain_html(
            render_plain_body(submission),
            render_html_body(submission),
        );
        let body = match &submission.attachment {
            Some(file) => {
                let content_type = ContentType::parse(&file.mime_type)
                    .context("invalid attachment content type")?;
                MultiPart::mixed()
                    .multipart(alternative)
                    .singlepart(Attachment::new(file.filename.clone()).body(file.content.clone(), content_type))
            }
            None => MultiPart::mixed().multipart(alternative),
        };

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(format!("New Contact Form: {}", submission.subject))
            .multipart(body)
            .context("failed to build email")?;

        self.transport
            .send(email)
            .await
            .context("smtp dispatch failed")?;
        tracing::info!("contact form mail dispatched");
        Ok(())
    }
}

/// Escapes a user-supplied value for embedding in the HTML body.
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_html_body(submission: &MailSubmission) -> String {
    let mut body = format!(
        "<h2>Contact Form Details</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>",
        escape_html(&submission.name),
        escape_html(&submission.email),
    );
    if let Some(phone) = &submission.phone {
        body.push_str(&format!("<p><strong>Phone:</strong> {}</p>", escape_html(phone)));
    }
    body.push_str(&format!(
        "<p><strong>Subject:</strong> {}</p>\
         <p><strong>Message:</strong><br>{}</p>",
        escape_html(&submission.subject),
        escape_html(&submission.message).replace('\n', "<br>"),
    ));
    if let Some(file) = &submission.attachment {
        body.push_str(&format!(
            "<p><strong>Attached File:</strong> {} ({})</p>",
            escape_html(&file.filename),
            format_file_size(file.size_bytes),
        ));
    }
    body
}

fn render_plain_body(submission: &MailSubmission) -> String {
    let mut body = format!(
        "Contact Form Details\n\nName: {}\nEmail: {}\n",
        submission.name, submission.email,
    );
    if let Some(phone) = &submission.phone {
        body.push_str(&format!("Phone: {}\n", phone));
    }
    body.push_str(&format!(
        "Subject: {}\nMessage:\n{}\n",
        submission.subject, submission.message,
    ));
    if let Some(file) = &submission.attachment {
        body.push_str(&format!(
            "Attached File: {} ({})\n",
            file.filename,
            format_file_size(file.size_bytes),
        ));
    }
    body
}

/// Formats a byte count in the largest unit up to GB, two decimals.
pub fn format_file_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::contact_dtos::UploadedFile;

    fn submission() -> MailSubmission {
        MailSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("5551234567".to_string()),
            subject: "Project inquiry".to_string(),
            message: "line one\nline two".to_string(),
            attachment: None,
        }
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0.00 B");
        assert_eq!(format_file_size(512), "512.00 B");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1_536_000), "1.46 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_html_body_escapes_user_fields() {
        let mut dirty = submission();
        dirty.name = "<script>alert(1)</script>".to_string();
        let body = render_html_body(&dirty);
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_html_body_converts_message_newlines() {
        let body = render_html_body(&submission());
        assert!(body.contains("line one<br>line two"));
    }

    #[test]
    fn test_attachment_annotation_carries_readable_size() {
        let mut with_file = submission();
        with_file.attachment = Some(UploadedFile {
            filename: "brief.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 1_536_000,
            content: Vec::new(),
        });
        let body = render_html_body(&with_file);
        assert!(body.contains("brief.pdf (1.46 MB)"));

        let plain = render_plain_body(&with_file);
        assert!(plain.contains("brief.pdf (1.46 MB)"));
    }

    #[test]
    fn test_plain_body_lists_all_fields() {
        let plain = render_plain_body(&submission());
        assert!(plain.contains("Name: Ada Lovelace"));
        assert!(plain.contains("Phone: 5551234567"));
        assert!(plain.contains("Subject: Project inquiry"));
    }
}
