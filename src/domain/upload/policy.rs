use super::{
    entity::{FIRST_FILE_FIELD, ImageUpload, SECOND_FILE_FIELD, UploadParts, UploadRequest},
    errors::UploadError,
};
use std::collections::HashSet;

pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Immutable upload rules, built once from configuration.
///
/// Extensions are matched against the filename suffix only; the file content
/// is never inspected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    allowed_extensions: HashSet<String>,
}

impl UploadPolicy {
    /// Builds a policy from extension names. Names are trimmed, lower-cased and
    /// may carry a leading dot; blank entries are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Self { allowed_extensions }
    }

    pub fn allowed_extensions(&self) -> &HashSet<String> {
        &self.allowed_extensions
    }

    /// Returns true when the text after the last `.` of `filename`,
    /// lower-cased, is an allowed extension. Filenames without a dot never pass.
    pub fn allows(&self, filename: &str) -> bool {
        extension_of(filename).is_some_and(|ext| self.allowed_extensions.contains(&ext))
    }

    /// Checks presence first, then filenames, then extensions, so the reported
    /// error is the earliest failing rule.
    pub fn validate(&self, parts: UploadParts) -> Result<UploadRequest, UploadError> {
        let file_1 = parts.file_1.ok_or(UploadError::MissingFile(FIRST_FILE_FIELD))?;
        let file_2 = parts.file_2.ok_or(UploadError::MissingFile(SECOND_FILE_FIELD))?;

        if file_1.filename.is_empty() {
            return Err(UploadError::EmptyFilename(FIRST_FILE_FIELD));
        }
        if file_2.filename.is_empty() {
            return Err(UploadError::EmptyFilename(SECOND_FILE_FIELD));
        }

        self.check_extension(FIRST_FILE_FIELD, &file_1)?;
        self.check_extension(SECOND_FILE_FIELD, &file_2)?;

        Ok(UploadRequest { file_1, file_2 })
    }

    fn check_extension(&self, field: &'static str, upload: &ImageUpload) -> Result<(), UploadError> {
        if self.allows(&upload.filename) {
            Ok(())
        } else {
            Err(UploadError::DisallowedExtension {
                field,
                filename: upload.filename.clone(),
            })
        }
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS)
    }
}

/// Lower-cased text after the last `.`, or `None` when there is no dot.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}
