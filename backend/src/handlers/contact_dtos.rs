use serde::Serialize;

/// One contact form submission. Lives for the duration of a single
/// request; nothing is stored.
#[derive(Debug, Default)]
pub struct MailSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub attachment: Option<UploadedFile>,
}

#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: usize,
    pub content: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactResponse {
    pub fn ok(message: &str) -> Self {
        ContactResponse {
            success: true,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        ContactResponse {
            success: false,
            message: None,
            error: Some(error),
        }
    }
}
