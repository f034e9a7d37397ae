//! Reading TMX documents from storage

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, TmxError};
use crate::model::Tmx;
use crate::schema::decode_element;
use crate::tree::parse_root;

/// Read and decode the TMX file at `path`
///
/// The whole file is loaded into memory before decoding. Nothing is
/// returned on failure: I/O problems come back as [`TmxError::Io`],
/// malformed or mis-nested markup as [`TmxError::Decode`].
///
/// # Example
///
/// ```no_run
/// let tmx = tmxio_core::read("memory.tmx")?;
/// for tu in &tmx.body.units {
///     println!("{:?}: {} variants", tu.tuid, tu.variants.len());
/// }
/// # Ok::<(), tmxio_core::TmxError>(())
/// ```
pub fn read(path: impl AsRef<Path>) -> Result<Tmx> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read TMX file");
    Tmx::parse(&bytes)
}

impl Tmx {
    /// Decode a TMX document held in memory
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let root = parse_root(xml)?;
        let tmx: Tmx = decode_element(root)?;
        debug!(
            version = tmx.version.as_deref().unwrap_or_default(),
            units = tmx.body.units.len(),
            "decoded TMX document"
        );
        Ok(tmx)
    }
}

impl FromStr for Tmx {
    type Err = TmxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tmx version="1.4">
  <header creationtool="tmxio" creationtoolversion="0.1" segtype="sentence"
          o-tmf="plain" adminlang="en" srclang="en" datatype="plaintext"/>
  <body>
    <tu tuid="1">
      <tuv xml:lang="en"><seg>Hello</seg></tuv>
      <tuv xml:lang="it"><seg>Ciao</seg></tuv>
    </tu>
  </body>
</tmx>"#;

    #[test]
    fn test_parse_minimal_document() {
        let tmx: Tmx = MINIMAL.parse().unwrap();
        assert_eq!(tmx.version.as_deref(), Some("1.4"));
        assert_eq!(tmx.header.creation_tool.as_deref(), Some("tmxio"));
        assert_eq!(tmx.header.o_tmf.as_deref(), Some("plain"));
        assert_eq!(tmx.header.creation_date, None);
        assert_eq!(tmx.body.units.len(), 1);
        assert_eq!(tmx.body.units[0].variants[1].seg.text(), "Ciao");
    }

    #[test]
    fn test_parse_missing_header_and_body() {
        let tmx = Tmx::parse(br#"<tmx version="1.4"/>"#).unwrap();
        assert_eq!(tmx.header, Default::default());
        assert!(tmx.body.units.is_empty());
    }

    #[test]
    fn test_parse_wrong_root() {
        let err = Tmx::parse(b"<xliff version=\"1.2\"/>").unwrap_err();
        assert!(matches!(
            err,
            TmxError::Decode(DecodeError::UnexpectedElement { expected: "tmx", .. })
        ));
    }

    #[test]
    fn test_parse_two_bodies() {
        let err = Tmx::parse(b"<tmx><header/><body/><body/></tmx>").unwrap_err();
        assert!(matches!(
            err,
            TmxError::Decode(DecodeError::DuplicateChild {
                parent: "tmx",
                child: "body"
            })
        ));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let err = Tmx::parse(b"<tmx><body><tu><tuv><seg>\xFF\xFE</seg></tuv></tu></body></tmx>")
            .unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_parse_deeply_nested_inline_markup() {
        let depth = 200_000;
        let mut xml = String::from("<tmx><body><tu><tuv><seg>a");
        xml.push_str(&"<hi>".repeat(depth));
        xml.push_str(&"</hi>".repeat(depth));
        xml.push_str("b</seg></tuv></tu></body></tmx>");

        let tmx = Tmx::parse(xml.as_bytes()).unwrap();
        let seg = &tmx.body.units[0].variants[0].seg;
        assert_eq!(seg.text(), "ab");
        assert_eq!(seg.content.len(), 2);
    }

    #[test]
    fn test_parse_keeps_crlf_in_segments() {
        let tmx = Tmx::parse(b"<tmx><body><tu><tuv><seg>a\r\nb</seg></tuv></tu></body></tmx>")
            .unwrap();
        assert_eq!(tmx.body.units[0].variants[0].seg.text(), "a\r\nb");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = Tmx::parse(MINIMAL.as_bytes()).unwrap();
        let second = Tmx::parse(MINIMAL.as_bytes()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read("definitely/not/here.tmx").unwrap_err();
        assert!(err.is_io());
        assert!(matches!(err, TmxError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
