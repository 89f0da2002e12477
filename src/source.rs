//! Reading source SVGs, transparently inflating SVGZ.
//!
//! Gzip support is the `gzip` cargo feature. Without it a compressed source
//! yields [`SourceError::DecompressionUnavailable`] and callers serve the
//! original unscaled file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// `ID1 ID2 CM` of a deflate-compressed gzip member.
pub const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

/// Source read failures. None of these abort a render.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source `{0}` not found")]
    NotFound(PathBuf),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("source is gzip-compressed but decompression is not available")]
    DecompressionUnavailable,

    #[error("corrupt gzip stream: {0}")]
    Corrupt(String),
}

/// Fetches the raw bytes of a source document.
pub trait SourceReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>, SourceError>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone)]
pub struct FsSourceReader {
    /// Upper bound for inflated SVGZ content.
    pub max_decompressed: usize,
}

impl FsSourceReader {
    pub fn new(max_decompressed: usize) -> Self {
        Self { max_decompressed }
    }
}

impl SourceReader for FsSourceReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>, SourceError> {
        let raw = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
            _ => SourceError::Io(path.to_path_buf(), e),
        })?;
        decode(raw, self.max_decompressed)
    }
}

/// Check for the 3-byte gzip magic.
#[inline]
pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Pass plain documents through, inflate gzip ones.
pub fn decode(data: Vec<u8>, limit: usize) -> Result<Vec<u8>, SourceError> {
    if !is_gzip(&data) {
        return Ok(data);
    }
    gunzip(&data, limit)
}

#[cfg(not(feature = "gzip"))]
fn gunzip(_data: &[u8], _limit: usize) -> Result<Vec<u8>, SourceError> {
    Err(SourceError::DecompressionUnavailable)
}

#[cfg(feature = "gzip")]
fn gunzip(data: &[u8], limit: usize) -> Result<Vec<u8>, SourceError> {
    use miniz_oxide::inflate::decompress_to_vec_with_limit;

    const FHCRC: u8 = 0x02;
    const FEXTRA: u8 = 0x04;
    const FNAME: u8 = 0x08;
    const FCOMMENT: u8 = 0x10;
    const HEADER_LEN: usize = 10;
    const TRAILER_LEN: usize = 8;

    let corrupt = |msg: &str| SourceError::Corrupt(msg.to_string());

    if data.len() < HEADER_LEN + TRAILER_LEN {
        return Err(corrupt("truncated header"));
    }
    let flags = data[3];
    let mut pos = HEADER_LEN;

    if flags & FEXTRA != 0 {
        let len = data
            .get(pos..pos + 2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]) as usize)
            .ok_or_else(|| corrupt("truncated extra field"))?;
        pos += 2 + len;
    }
    for flag in [FNAME, FCOMMENT] {
        if flags & flag != 0 {
            let nul = data
                .get(pos..)
                .and_then(|rest| rest.iter().position(|&b| b == 0))
                .ok_or_else(|| corrupt("unterminated header string"))?;
            pos += nul + 1;
        }
    }
    if flags & FHCRC != 0 {
        pos += 2;
    }

    let body_end = data.len() - TRAILER_LEN;
    if pos > body_end {
        return Err(corrupt("header overruns stream"));
    }

    let inflated = decompress_to_vec_with_limit(&data[pos..body_end], limit)
        .map_err(|e| SourceError::Corrupt(format!("{e:?}")))?;

    let trailer = &data[body_end..];
    let crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let size = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);
    if crc32fast::hash(&inflated) != crc || inflated.len() as u32 != size {
        return Err(corrupt("checksum mismatch"));
    }

    Ok(inflated)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-assemble a gzip member around stored (uncompressed) deflate blocks.
    fn gzip_stored(payload: &[u8], name: Option<&str>) -> Vec<u8> {
        let mut out = vec![0x1f, 0x8b, 0x08, 0, 0, 0, 0, 0, 0, 0xff];
        if let Some(name) = name {
            out[3] |= 0x08;
            out.extend_from_slice(name.as_bytes());
            out.push(0);
        }
        // Single final stored block
        let len = payload.len() as u16;
        out.push(0x01);
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out
    }

    #[test]
    fn test_plain_document_passes_through() {
        let svg = b"<svg></svg>".to_vec();
        assert_eq!(decode(svg.clone(), 1024).unwrap(), svg);
    }

    #[test]
    fn test_is_gzip() {
        assert!(is_gzip(&[0x1f, 0x8b, 0x08, 0x00]));
        assert!(!is_gzip(&[0x1f, 0x8b]));
        assert!(!is_gzip(b"<svg"));
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_gunzip_stored_block() {
        let svg = b"<svg width=\"1\"><rect/></svg>";
        let gz = gzip_stored(svg, Some("a.svg"));
        assert_eq!(decode(gz, 1024).unwrap(), svg.to_vec());
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_gunzip_rejects_bad_checksum() {
        let mut gz = gzip_stored(b"<svg></svg>", None);
        let n = gz.len();
        gz[n - 8] ^= 0xff;
        assert!(matches!(decode(gz, 1024), Err(SourceError::Corrupt(_))));
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_gunzip_respects_limit() {
        let gz = gzip_stored(&[b'x'; 256], None);
        assert!(decode(gz, 16).is_err());
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_gunzip_truncated() {
        assert!(matches!(
            decode(vec![0x1f, 0x8b, 0x08, 0x00], 1024),
            Err(SourceError::Corrupt(_))
        ));
    }

    #[cfg(not(feature = "gzip"))]
    #[test]
    fn test_gzip_without_feature() {
        let gz = gzip_stored(b"<svg></svg>", None);
        assert!(matches!(
            decode(gz, 1024),
            Err(SourceError::DecompressionUnavailable)
        ));
    }

    #[test]
    fn test_fs_reader_not_found() {
        let reader = FsSourceReader::new(1024);
        let err = reader.read(Path::new("/nonexistent/file.svg")).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_fs_reader_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.svg");
        fs::write(&path, "<svg></svg>").unwrap();
        let reader = FsSourceReader::new(1024);
        assert_eq!(reader.read(&path).unwrap(), b"<svg></svg>".to_vec());
    }
}
