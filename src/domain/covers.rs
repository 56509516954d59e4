/// MIME types accepted by the upload filter. Anything else is silently
/// dropped rather than rejected with an error.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// An incoming cover file: the declared content type and the raw bytes.
/// Contents are never inspected beyond the declared type.
#[derive(Debug, Clone)]
pub struct CoverUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CoverUpload {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn is_allowed(&self) -> bool {
        is_allowed_image_type(&self.content_type)
    }
}

pub fn is_allowed_image_type(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
}

/// Collision-resistant file name for a stored cover: a UUID plus an
/// extension derived from the MIME type. Never user-controlled.
pub fn generated_file_name(content_type: &str) -> String {
    format!("{}.{}", uuid::Uuid::new_v4(), extension_for(content_type))
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type.to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

/// Content type for serving a stored cover, derived from its extension.
pub fn content_type_for_file(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// Generated names are flat: no separators, no parent references. Anything
/// else cannot name a stored cover and must not reach the filesystem.
pub fn is_valid_file_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.contains('/')
        && !file_name.contains('\\')
        && !file_name.contains("..")
}
