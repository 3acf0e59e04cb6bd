use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Base64 `data:` URI holding a rendered image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// MIME type, e.g. `image/png`
    pub mime: String,
    /// Decoded payload bytes
    pub data: Vec<u8>,
}

impl DataUri {
    /// Wrap raw bytes with their MIME type
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Parse `data:<mime>;base64,<payload>`
    ///
    /// Only base64 payloads are accepted; returns `None` for anything else.
    pub fn parse(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime = header.strip_suffix(";base64")?;
        let data = STANDARD.decode(payload.trim()).ok()?;
        Some(Self::new(mime, data))
    }

    /// Render as a URI string
    pub fn encode(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_bytes() {
        let uri = DataUri::new("image/png", vec![0x89, b'P', b'N', b'G']);
        assert_eq!(uri.encode(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_parse() {
        let uri = DataUri::parse("data:image/jpeg;base64,/9j/").unwrap();
        assert_eq!(uri.mime, "image/jpeg");
        assert_eq!(uri.data, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_parse_rejects_non_base64() {
        assert!(DataUri::parse("image/png;base64,AAAA").is_none());
        assert!(DataUri::parse("data:text/plain,hello").is_none());
        assert!(DataUri::parse("data:image/png;base64,@@@").is_none());
    }
}
