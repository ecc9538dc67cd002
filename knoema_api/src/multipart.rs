//! Single-file `multipart/form-data` body for the upload endpoint.

use std::path::Path;

use rand::Rng;

use crate::Error;

/// Number of ASCII letters in a generated boundary.
pub const BOUNDARY_LEN: usize = 30;

const BOUNDARY_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const CRLF: &[u8] = b"\r\n";

/// A file read fully into memory, ready to be posted as the `file` form field.
///
/// The boundary is random per instance. It only needs to be unlikely to occur
/// inside the file, so `rand`'s thread-local generator is enough.
#[derive(Debug, Clone)]
pub struct FileContent {
    file_name: String,
    body: Vec<u8>,
    boundary: String,
}

impl FileContent {
    /// Reads `path` and picks a boundary from the thread-local generator.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_path_with_rng(path, &mut rand::thread_rng())
    }

    /// Reads `path` and picks a boundary from `rng`.
    ///
    /// The file handle is released before this returns.
    pub fn from_path_with_rng<R: Rng>(
        path: impl AsRef<Path>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let path = path.as_ref();
        let body = std::fs::read(path).map_err(|source| {
            tracing::error!("Failed to read upload source {}: {}", path.display(), source);
            Error::FileRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_bytes(file_name, body, rng))
    }

    pub fn from_bytes<R: Rng>(
        file_name: impl Into<String>,
        body: Vec<u8>,
        rng: &mut R,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            body,
            boundary: random_boundary(rng),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the `Content-Type` header of the upload request.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary=\"{}\"", self.boundary)
    }

    /// Encodes the form body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let disposition = format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"",
            self.file_name
        );
        let mut out = Vec::with_capacity(self.body.len() + disposition.len() + 2 * BOUNDARY_LEN + 16);
        out.extend_from_slice(b"--");
        out.extend_from_slice(self.boundary.as_bytes());
        out.extend_from_slice(CRLF);
        out.extend_from_slice(disposition.as_bytes());
        out.extend_from_slice(CRLF);
        out.extend_from_slice(CRLF);
        out.extend_from_slice(&self.body);
        out.extend_from_slice(CRLF);
        out.extend_from_slice(b"--");
        out.extend_from_slice(self.boundary.as_bytes());
        out.extend_from_slice(b"--");
        out.extend_from_slice(CRLF);
        out
    }
}

fn random_boundary<R: Rng>(rng: &mut R) -> String {
    (0..BOUNDARY_LEN)
        .map(|_| BOUNDARY_CHARS[rng.gen_range(0..BOUNDARY_CHARS.len())] as char)
        .collect()
}
