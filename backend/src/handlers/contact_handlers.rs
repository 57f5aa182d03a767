use std::sync::Arc;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::handlers::contact_dtos::{ContactResponse, MailSubmission, UploadedFile};
use crate::AppState;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// Transport-level request ceiling: room for the 5 MiB attachment plus the
/// text fields and multipart framing. Uploads under this pass through so
/// the attachment size rule below is the one that rejects them.
pub const MAX_REQUEST_BYTES: usize = 8 * 1024 * 1024;

/// Validation-class failures. Returned to the caller as the JSON envelope,
/// always with HTTP 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} field is required")]
    MissingField(&'static str),
    #[error("invalid email format")]
    InvalidEmail,
    #[error("file upload incomplete")]
    UploadIncomplete,
    #[error("malformed form data")]
    MalformedForm,
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("file too large (max 5MB)")]
    FileTooLarge,
}

pub async fn send_contact(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<ContactResponse>) {
    let submission = match read_submission(&mut multipart).await {
        Ok(submission) => submission,
        Err(error) => return client_error(error),
    };

    if let Err(error) = validate_submission(&submission) {
        return client_error(error);
    }

    match state.mailer.send_contact_form(&submission).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ContactResponse::ok("Your message has been sent.")),
        ),
        Err(error) => {
            // full cause stays server-side
            tracing::error!("contact mail dispatch failed: {:#}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::failed("failed to send message".to_string())),
            )
        }
    }
}

/// Fallback for wrong-method requests on registered routes, so they get
/// the JSON envelope instead of an empty 405.
pub async fn method_not_allowed() -> (StatusCode, Json<ContactResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ContactResponse::failed("method not allowed".to_string())),
    )
}

fn client_error(error: ContactError) -> (StatusCode, Json<ContactResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ContactResponse::failed(error.to_string())),
    )
}

async fn read_submission(multipart: &mut Multipart) -> Result<MailSubmission, ContactError> {
    let mut submission = MailSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ContactError::MalformedForm)?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => submission.name = read_text(field).await?,
            "email" => submission.email = read_text(field).await?,
            "subject" => submission.subject = read_text(field).await?,
            "message" => submission.message = read_text(field).await?,
            "phone" => {
                let value = read_text(field).await?;
                if !value.trim().is_empty() {
                    submission.phone = Some(value);
                }
            }
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    // empty part from a form submitted without a file
                    continue;
                }
                let declared = field.content_type().map(str::to_string);
                let content = field
                    .bytes()
                    .await
                    .map_err(|_| ContactError::UploadIncomplete)?;
                let mime_type = declared.unwrap_or_else(|| {
                    mime_guess::from_path(&filename)
                        .first_or_octet_stream()
                        .to_string()
                });
                submission.attachment = Some(UploadedFile {
                    mime_type,
                    size_bytes: content.len(),
                    content: content.to_vec(),
                    filename,
                });
            }
            _ => {}
        }
    }

    Ok(submission)
}

// a transport error on a text field is not an upload failure
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ContactError> {
    field.text().await.map_err(|_| ContactError::MalformedForm)
}

/// Checks run in a fixed order and the first failure wins: required
/// fields, then email format, then attachment type before attachment size.
pub fn validate_submission(submission: &MailSubmission) -> Result<(), ContactError> {
    let required = [
        (&submission.name, "name"),
        (&submission.email, "email"),
        (&submission.subject, "subject"),
        (&submission.message, "message"),
    ];
    for (value, field) in required {
        if value.trim().is_empty() {
            return Err(ContactError::MissingField(field));
        }
    }

    if !EMAIL_RE.is_match(submission.email.trim()) {
        return Err(ContactError::InvalidEmail);
    }

    if let Some(file) = &submission.attachment {
        if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
            return Err(ContactError::UnsupportedType(file.mime_type.clone()));
        }
        if file.size_bytes > MAX_FILE_BYTES {
            return Err(ContactError::FileTooLarge);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> MailSubmission {
        MailSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            subject: "Project inquiry".to_string(),
            message: "hello".to_string(),
            attachment: None,
        }
    }

    fn attachment(mime_type: &str, size_bytes: usize) -> UploadedFile {
        UploadedFile {
            filename: "brief.pdf".to_string(),
            mime_type: mime_type.to_string(),
            size_bytes,
            content: Vec::new(),
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert_eq!(validate_submission(&submission()), Ok(()));
    }

    #[test]
    fn test_first_missing_field_is_named() {
        let mut bad = submission();
        bad.name = String::new();
        assert_eq!(validate_submission(&bad), Err(ContactError::MissingField("name")));
        assert_eq!(
            ContactError::MissingField("name").to_string(),
            "name field is required"
        );

        let mut bad = submission();
        bad.subject = "   ".to_string();
        assert_eq!(validate_submission(&bad), Err(ContactError::MissingField("subject")));
    }

    #[test]
    fn test_phone_is_optional() {
        let mut ok = submission();
        ok.phone = Some("5551234567".to_string());
        assert_eq!(validate_submission(&ok), Ok(()));
    }

    #[test]
    fn test_malformed_email_rejected() {
        let mut bad = submission();
        bad.email = "not-an-address".to_string();
        assert_eq!(validate_submission(&bad), Err(ContactError::InvalidEmail));
    }

    #[test]
    fn test_oversized_attachment_rejected() {
        let mut bad = submission();
        bad.attachment = Some(attachment("application/pdf", 6 * 1024 * 1024));
        assert_eq!(validate_submission(&bad), Err(ContactError::FileTooLarge));
    }

    #[test]
    fn test_attachment_at_limit_passes() {
        let mut ok = submission();
        ok.attachment = Some(attachment("application/pdf", MAX_FILE_BYTES));
        assert_eq!(validate_submission(&ok), Ok(()));
    }

    #[test]
    fn test_unsupported_type_rejected_before_size() {
        let mut bad = submission();
        // both checks would fail; type is reported first
        bad.attachment = Some(attachment("image/png", 6 * 1024 * 1024));
        assert_eq!(
            validate_submission(&bad),
            Err(ContactError::UnsupportedType("image/png".to_string()))
        );
    }

    #[test]
    fn test_docx_and_txt_are_allowed() {
        for mime_type in [
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "text/plain",
        ] {
            let mut ok = submission();
            ok.attachment = Some(attachment(mime_type, 1024));
            assert_eq!(validate_submission(&ok), Ok(()));
        }
    }
}
