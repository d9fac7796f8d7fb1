use std::fmt;
use std::io;
use std::path::Path;

use mime::Mime;

/// Upload limit enforced before a file leaves the machine.
pub const MAX_ATTACHMENT_BYTES: usize = 2 * 1024 * 1024;

/// Resume and leave documents must be PDF or Word files.
pub const SUPPORTED_DOCUMENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// File picked for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    content_type: Mime,
    bytes: Vec<u8>,
}

impl Attachment {
    /// Content type is guessed from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name).first_or_octet_stream();
        Self::with_content_type(file_name, content_type, bytes)
    }

    pub fn with_content_type(file_name: impl Into<String>, content_type: Mime, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Size and format check shared by resume and leave document uploads.
    pub(crate) fn document_problem(&self) -> Option<&'static str> {
        if self.len() > MAX_ATTACHMENT_BYTES {
            return Some("File too large (max 2MB)");
        }
        let essence = self.content_type.essence_str();
        if !SUPPORTED_DOCUMENT_TYPES.contains(&essence) {
            return Some("Unsupported file format");
        }
        None
    }
}

// File contents stay out of debug output and logs.
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type.essence_str())
            .field("len", &self.bytes.len())
            .finish()
    }
}
