//! TMX document model
//!
//! Plain value types mirroring the TMX element hierarchy:
//!
//! ```text
//! tmx
//! ├── header ── note*, prop*, ude* ── map*
//! └── body ──── tu* ── note*, prop*, tuv* ── seg, note*, prop*
//! ```
//!
//! Attributes are `Option<String>` so that an attribute missing from the
//! source stays distinguishable from one that is present but empty.
//! Repeated children are kept in document order.

use serde::{Deserialize, Serialize};

/// The `<tmx>` root element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tmx {
    /// Character data directly inside `<tmx>`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// TMX format version (`version`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Document-wide metadata
    #[serde(default)]
    pub header: Header,
    /// The translation units
    #[serde(default)]
    pub body: Body,
}

/// The `<header>` element, metadata for the whole document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Tool that created the document (`creationtool`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_tool: Option<String>,
    /// Version of the creation tool (`creationtoolversion`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_tool_version: Option<String>,
    /// Type of data contained, e.g. `plaintext` or `html` (`datatype`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Segmentation level: `block`, `paragraph`, `sentence` or `phrase` (`segtype`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seg_type: Option<String>,
    /// Default language for administrative text such as notes (`adminlang`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_lang: Option<String>,
    /// Source language of the units (`srclang`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_lang: Option<String>,
    /// Original translation memory format (`o-tmf`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_tmf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_id: Option<String>,
    /// Original encoding of the data (`o-encoding`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Prop>,
    /// User-defined encodings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub udes: Vec<Ude>,
}

/// The `<ude>` element, a user-defined encoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ude {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Name of the encoding (`name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Encoding the user-defined characters are based on (`base`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maps: Vec<Map>,
}

/// The `<map/>` element, one user-defined character
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Unicode code point, e.g. `#xF8FF` (`unicode`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode: Option<String>,
    /// Code point in the user-defined encoding (`code`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Entity name (`ent`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ent: Option<String>,
    /// Substitution text (`subst`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subst: Option<String>,
}

/// The `<body>` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Translation units in document order
    #[serde(default)]
    pub units: Vec<Tu>,
}

/// The `<tu>` element, one translation unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tu {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Unit identifier (`tuid`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Number of times the unit has been used (`usagecount`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_usage_date: Option<String>,
    /// Overrides the header source language (`srclang`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_tool_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_date: Option<String>,
    /// Overrides the header segmentation (`segtype`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seg_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_tmf: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Prop>,
    /// Language variants in document order
    #[serde(default)]
    pub variants: Vec<Tuv>,
}

/// The `<tuv>` element, the text of a unit in one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuv {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Language of the variant (`xml:lang`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_usage_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_tool_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_tmf: Option<String>,
    /// The segment text
    #[serde(default)]
    pub seg: Seg,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Prop>,
}

/// The `<seg>` element
///
/// All spacing and line breaks inside a segment are significant and kept
/// as-is. Inline markup (`<bpt>`, `<ept>`, `<it>`, `<ph>`, `<hi>`) is not
/// modeled yet: such elements are dropped and the text around them is kept
/// as separate runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seg {
    #[serde(default)]
    pub content: Vec<Inline>,
}

impl Seg {
    /// The segment text with all runs joined
    pub fn text(&self) -> String {
        self.content.iter().filter_map(Inline::as_text).collect()
    }

    /// Whether the segment carries no content at all
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(|inline| match inline {
            Inline::Text(text) => text.is_empty(),
        })
    }
}

/// A piece of segment content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Inline {
    /// A run of plain text
    Text(String),
}

impl Inline {
    /// The plain text carried by this piece, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Inline::Text(text) => Some(text),
        }
    }
}

/// The `<note>` element, a free-text comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_encoding: Option<String>,
}

/// The `<prop>` element, a tool-specific property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prop {
    #[serde(default)]
    pub text: String,
    /// What the property represents (`type`)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub prop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_encoding: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seg_text_joins_runs() {
        let seg = Seg {
            content: vec![
                Inline::Text("Press ".to_string()),
                Inline::Text(" to continue".to_string()),
            ],
        };
        assert_eq!(seg.text(), "Press  to continue");
        assert!(!seg.is_empty());
        assert!(Seg::default().is_empty());
    }

    #[test]
    fn test_seg_with_empty_run_is_empty() {
        let seg = Seg {
            content: vec![Inline::Text(String::new())],
        };
        assert!(seg.is_empty());
    }

    #[test]
    fn test_json_skips_absent_attributes() {
        let note = Note {
            text: "Checked".to_string(),
            lang: Some(String::new()),
            o_encoding: None,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "Checked", "lang": "" }));
    }

    #[test]
    fn test_json_inline_shape() {
        let json = serde_json::to_value(Inline::Text("Hi".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "text", "value": "Hi" }));
    }

    #[test]
    fn test_prop_type_field_name() {
        let prop = Prop {
            text: "Domain".to_string(),
            prop_type: Some("x-domain".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&prop).unwrap();
        assert!(json.contains(r#""type":"x-domain""#));
        let back: Prop = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prop);
    }
}
