//! File blobs handed to the composer

use std::fmt;

/// Largest file the composer accepts, for attachments and recipient files alike.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// An uploaded file: name, declared content type and raw bytes
#[derive(Clone, PartialEq, Eq)]
pub struct FileBlob {
    name: String,
    content_type: String,
    data: Vec<u8>,
}

impl FileBlob {
    /// Create a new file blob
    pub fn new(name: &str, content_type: &str, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            content_type: content_type.to_string(),
            data,
        }
    }

    /// Create a file blob, guessing the content type from the file name
    pub fn from_name(name: &str, data: Vec<u8>) -> Self {
        Self::new(name, guess_content_type(name), data)
    }

    /// The file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared content type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The file contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The file size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// The lowercased extension, without the dot
    pub fn extension(&self) -> Option<String> {
        let (stem, extension) = self.name.rsplit_once('.')?;

        if stem.is_empty() || extension.is_empty() {
            return None;
        }

        Some(extension.to_ascii_lowercase())
    }

    /// Whether the extension is one of `allowed`
    pub fn has_extension(&self, allowed: &[&str]) -> bool {
        self.extension()
            .is_some_and(|extension| allowed.contains(&extension.as_str()))
    }

    /// Whether the file fits within [`MAX_FILE_SIZE`]
    pub fn within_size_limit(&self) -> bool {
        self.size() <= MAX_FILE_SIZE
    }
}

impl fmt::Debug for FileBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileBlob")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

fn guess_content_type(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("zip") => "application/zip",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        let file = FileBlob::from_name("Report.PDF", vec![1, 2, 3]);

        assert_eq!(file.extension().as_deref(), Some("pdf"));
        assert_eq!(file.content_type(), "application/pdf");
        assert_eq!(file.size(), 3);
    }

    #[test]
    fn test_file_without_extension() {
        assert_eq!(FileBlob::from_name("README", vec![]).extension(), None);
        assert_eq!(FileBlob::from_name(".hidden", vec![]).extension(), None);
        assert_eq!(FileBlob::from_name("trailing.", vec![]).extension(), None);
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let exact = FileBlob::from_name("a.zip", vec![0; MAX_FILE_SIZE as usize]);
        let over = FileBlob::from_name("b.zip", vec![0; MAX_FILE_SIZE as usize + 1]);

        assert!(exact.within_size_limit());
        assert!(!over.within_size_limit());
    }

    #[test]
    fn test_debug_does_not_dump_contents() {
        let file = FileBlob::new("a.txt", "text/plain", b"secret".to_vec());

        assert!(!format!("{:?}", file).contains("115"));
    }
}
