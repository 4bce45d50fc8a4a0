use std::{
    convert::Infallible,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use assistant::config::DEFAULT_VECTOR_STORE_ID;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Please upload a PDF file only.")]
    NotPdf,
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Uploading CVs is not supported yet; add documents to vector store '{0}' directly.")]
    NotSupported(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

/// Accepts files that carry a `.pdf` extension and start with the PDF header.
pub fn validate_pdf(path: &Path) -> Result<PdfDocument, UploadError> {
    let has_pdf_extension = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !has_pdf_extension {
        return Err(UploadError::NotPdf);
    }

    let io_err = |source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    let size = file.metadata().map_err(io_err)?.len();

    let mut header = [0u8; 5];
    let read = file.read(&mut header).map_err(io_err)?;
    if &header[..read] != PDF_MAGIC {
        return Err(UploadError::NotPdf);
    }

    let file_name = path
        .file_name()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(PdfDocument {
        path: path.to_path_buf(),
        file_name,
        size,
    })
}

/// Document ingestion hook.
///
/// The assistant answers from a pre-populated vector store. Attaching new
/// files to it needs the upstream files and vector-store endpoints, which are
/// not wired up, so this reports the gap instead of pretending to succeed.
pub fn upload(document: &PdfDocument) -> Result<Infallible, UploadError> {
    tracing::info!(
        "Upload requested for '{}' ({} bytes)",
        document.file_name,
        document.size
    );
    Err(UploadError::NotSupported(DEFAULT_VECTOR_STORE_ID))
}

/// Validates and hands the file to [`upload`]; the outcome is always an error
/// until ingestion exists.
pub fn request_upload(path: &Path) -> UploadError {
    match validate_pdf(path).and_then(|document| upload(&document)) {
        Ok(never) => match never {},
        Err(e) => e,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cvchat-upload-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        File::create(&path).unwrap().write_all(contents).unwrap();
        path
    }

    #[test]
    fn accepts_pdf_with_header() {
        let path = temp_file("cv.PDF", b"%PDF-1.7\n...");

        let document = validate_pdf(&path).unwrap();

        assert_eq!("cv.PDF", document.file_name);
        assert_eq!(12, document.size);
    }

    #[test]
    fn rejects_other_extensions() {
        let path = temp_file("cv.docx", b"%PDF-1.7");

        assert!(matches!(validate_pdf(&path), Err(UploadError::NotPdf)));
    }

    #[test]
    fn rejects_pdf_extension_without_header() {
        let path = temp_file("cv.pdf", b"PK\x03\x04");

        assert!(matches!(validate_pdf(&path), Err(UploadError::NotPdf)));
    }

    #[test]
    fn reports_missing_file() {
        let path = std::env::temp_dir().join("cvchat-definitely-missing.pdf");

        assert!(matches!(validate_pdf(&path), Err(UploadError::Io { .. })));
    }

    #[test]
    fn upload_is_not_faked() {
        let path = temp_file("cv.pdf", b"%PDF-1.4");
        let document = validate_pdf(&path).unwrap();

        assert!(matches!(upload(&document), Err(UploadError::NotSupported(_))));
    }

    #[test]
    fn valid_pdf_request_reports_missing_ingestion() {
        let path = temp_file("resume.pdf", b"%PDF-1.5\n");

        let err = request_upload(&path);

        assert!(matches!(err, UploadError::NotSupported(_)), "{err}");
        assert!(!err.to_string().contains("uploaded successfully"));
    }

    #[test]
    fn non_pdf_request_reports_invalid_type() {
        let path = temp_file("resume.txt", b"plain text");

        assert!(matches!(request_upload(&path), UploadError::NotPdf));
    }
}
