use crate::multimedia::application::domain::entities::UploadedFile;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadPolicyViolation {
    #[error("File name is empty")]
    EmptyFileName,

    #[error("File name must not exceed {max} characters")]
    FileNameTooLong { max: usize },

    #[error("File is empty")]
    EmptyFile,

    #[error("File exceeds the {max_bytes} byte limit")]
    FileTooLarge { max_bytes: u64 },

    #[error("File type '{0}' is not allowed")]
    MimeTypeNotAllowed(String),

    #[error("Storage key is missing")]
    MissingObjectKey,
}

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub max_file_name_len: usize,
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: Self::DEFAULT_MAX_FILE_SIZE_BYTES,
            max_file_name_len: 255,
            allowed_mime_types: Self::DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl UploadPolicy {
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024; // 5MB
    pub const DEFAULT_ALLOWED_MIME_TYPES: &'static [&'static str] = &[
        "image/jpeg",
        "image/png",
        "image/webp",
        "application/pdf",
    ];

    /// `MEDIA_MAX_FILE_SIZE_BYTES` and a comma separated
    /// `MEDIA_ALLOWED_MIME_TYPES` override the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_file_size_bytes = std::env::var("MEDIA_MAX_FILE_SIZE_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_file_size_bytes);

        let allowed_mime_types = std::env::var("MEDIA_ALLOWED_MIME_TYPES")
            .ok()
            .map(|v| {
                v.split(',')
                    .map(|m| m.trim().to_ascii_lowercase())
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|types| !types.is_empty())
            .unwrap_or(defaults.allowed_mime_types);

        Self {
            max_file_size_bytes,
            allowed_mime_types,
            ..defaults
        }
    }

    pub fn validate(&self, file: &UploadedFile) -> Result<(), UploadPolicyViolation> {
        let name = file.original_name.trim();
        if name.is_empty() {
            return Err(UploadPolicyViolation::EmptyFileName);
        }
        if name.chars().count() > self.max_file_name_len {
            return Err(UploadPolicyViolation::FileNameTooLong {
                max: self.max_file_name_len,
            });
        }
        if file.object_key.trim().is_empty() {
            return Err(UploadPolicyViolation::MissingObjectKey);
        }
        if file.size_bytes == 0 {
            return Err(UploadPolicyViolation::EmptyFile);
        }
        if file.size_bytes > self.max_file_size_bytes {
            return Err(UploadPolicyViolation::FileTooLarge {
                max_bytes: self.max_file_size_bytes,
            });
        }

        let mime = file.mime_type.trim().to_ascii_lowercase();
        if !self.allowed_mime_types.iter().any(|allowed| *allowed == mime) {
            return Err(UploadPolicyViolation::MimeTypeNotAllowed(mime));
        }

        Ok(())
    }
}
