use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::uploaded_file::UploadedFile;

/// One quote request as submitted from the web form.
///
/// Every text field is free-form client input and may be absent; the
/// notification template substitutes fallback values. The submission is
/// request-scoped: it is built from the parsed multipart body, consumed to
/// compose the notification email, and dropped once the response is sent.
/// Accepted attachments stay on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub client_type: Option<String>,
    pub service_type: Option<String>,
    pub description: Option<String>,
    pub urgency: Option<String>,
    pub privacy_accepted: Option<String>,
    pub files: Vec<UploadedFile>,
}

impl QuoteSubmission {
    /// Build a submission from the text fields and accepted files of a
    /// parsed multipart form. Field names match the web form contract.
    pub fn from_form(mut fields: HashMap<String, String>, files: Vec<UploadedFile>) -> Self {
        QuoteSubmission {
            name: fields.remove("name"),
            email: fields.remove("email"),
            phone: fields.remove("phone"),
            client_type: fields.remove("clientType"),
            service_type: fields.remove("serviceType"),
            description: fields.remove("description"),
            urgency: fields.remove("urgency"),
            privacy_accepted: fields.remove("privacyAccepted"),
            files,
        }
    }
}
