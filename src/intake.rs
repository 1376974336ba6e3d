use std::path::Path;

/// The media types accepted for statement uploads
///
/// Some platforms declare `.csv` files as `application/vnd.ms-excel`, so both
/// are accepted. The content is parsed as comma separated values either way.
pub const SUPPORTED_MEDIA_TYPES: [&str; 2] = ["text/csv", "application/vnd.ms-excel"];

/// Possible errors to occur while selecting a file
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("The file type `{0}` is not supported")]
    UnsupportedMediaType(MediaType),
    #[error("The file could not be read")]
    Io(#[from] std::io::Error),
}

/// The declared media type of a selected file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaType(String);

impl MediaType {
    pub fn new(media_type: impl Into<String>) -> Self {
        Self(media_type.into())
    }

    /// Guesses the media type from a file extension, the way a browser declares it
    pub fn from_extension(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Self::new("text/csv"),
            Some("xls") => Self::new("application/vnd.ms-excel"),
            _ => Self::new("application/octet-stream"),
        }
    }

    /// The media type without parameters, e.g. `text/csv` for `text/csv; charset=utf-8`
    pub fn essence(&self) -> &str {
        self.0
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// Whether files of this type are accepted for upload
    pub fn is_supported(&self) -> bool {
        let essence = self.essence();
        SUPPORTED_MEDIA_TYPES
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(essence))
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file picked by the user, held until it is previewed or replaced
#[derive(Clone, Debug)]
pub struct SelectedFile {
    name: String,
    media_type: MediaType,
    bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: MediaType, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type,
            bytes: bytes.into(),
        }
    }

    /// Reads a local file and declares its media type from the extension
    pub fn from_path(path: &Path) -> Result<Self, IntakeError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(name, MediaType::from_extension(path), bytes))
    }

    /// Replaces the declared media type
    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_media_types() {
        assert!(MediaType::new("text/csv").is_supported());
        assert!(MediaType::new("application/vnd.ms-excel").is_supported());
        assert!(MediaType::new("Text/CSV; charset=utf-8").is_supported());
    }

    #[test]
    fn unsupported_media_types() {
        assert!(!MediaType::new("application/pdf").is_supported());
        assert!(!MediaType::new("text/plain").is_supported());
        assert!(!MediaType::new("").is_supported());
        assert!(!MediaType::new(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        ).is_supported());
    }

    #[test]
    fn media_type_from_extension() {
        assert_eq!(MediaType::from_extension(Path::new("march.csv")), MediaType::new("text/csv"));
        assert_eq!(MediaType::from_extension(Path::new("MARCH.CSV")), MediaType::new("text/csv"));
        assert_eq!(
            MediaType::from_extension(Path::new("march.xls")),
            MediaType::new("application/vnd.ms-excel"),
        );
        assert_eq!(
            MediaType::from_extension(Path::new("march")),
            MediaType::new("application/octet-stream"),
        );
    }

    #[test]
    fn override_media_type() {
        let file = SelectedFile::new("statement.txt", MediaType::new("text/plain"), "a,b")
            .with_media_type(MediaType::new("text/csv"));
        assert!(file.media_type().is_supported());
        assert_eq!(file.bytes(), b"a,b");
    }
}
