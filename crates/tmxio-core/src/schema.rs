//! Markup-to-model mapping
//!
//! Each model type declares its tag, the attributes it reads and the child
//! elements it owns as plain tables. A single routine, [`decode_element`],
//! walks an [`Element`] against those tables, so every TMX name in the crate
//! is written down exactly once, here.

use crate::error::DecodeError;
use crate::model::{Body, Header, Inline, Map, Note, Prop, Seg, Tmx, Tu, Tuv, Ude};
use crate::tree::{Element, Node};

/// How many times a child element may appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Occurs {
    /// At most once; a second occurrence is an error
    Once,
    /// Any number of times, kept in order
    Many,
}

/// An attribute bound to an optional string field
pub(crate) struct Attr<T> {
    pub name: &'static str,
    pub slot: fn(&mut T) -> &mut Option<String>,
}

impl<T> Attr<T> {
    const fn new(name: &'static str, slot: fn(&mut T) -> &mut Option<String>) -> Self {
        Self { name, slot }
    }
}

type ChildDecoder<T> = fn(&mut T, Element) -> Result<(), DecodeError>;

/// A child element bound to a field
pub(crate) struct Child<T> {
    pub name: &'static str,
    pub occurs: Occurs,
    pub decode: ChildDecoder<T>,
}

impl<T> Child<T> {
    const fn once(name: &'static str, decode: ChildDecoder<T>) -> Self {
        Self {
            name,
            occurs: Occurs::Once,
            decode,
        }
    }

    const fn many(name: &'static str, decode: ChildDecoder<T>) -> Self {
        Self {
            name,
            occurs: Occurs::Many,
            decode,
        }
    }
}

/// Mapping between one TMX element and a model type
pub(crate) trait Schema: Default + 'static {
    /// Element name
    const TAG: &'static str;
    /// Attributes read into the model; others are ignored
    const ATTRIBUTES: &'static [Attr<Self>];
    /// Child elements read into the model; others are ignored
    const CHILDREN: &'static [Child<Self>] = &[];

    /// Receive one run of character data directly inside the element
    fn push_text(&mut self, text: String);
}

/// Decode `element` into `T` according to its tables
pub(crate) fn decode_element<T: Schema>(element: Element) -> Result<T, DecodeError> {
    if element.name != T::TAG {
        return Err(DecodeError::UnexpectedElement {
            expected: T::TAG,
            found: element.name,
        });
    }

    let mut value = T::default();

    for (name, text) in element.attributes {
        if let Some(attr) = T::ATTRIBUTES.iter().find(|a| a.name == name) {
            *(attr.slot)(&mut value) = Some(text);
        }
    }

    let mut seen: Vec<&'static str> = Vec::new();
    for node in element.children {
        match node {
            Node::Text(text) => value.push_text(text),
            Node::Element(child) => {
                let Some(spec) = T::CHILDREN.iter().find(|c| c.name == child.name) else {
                    continue;
                };
                if spec.occurs == Occurs::Once {
                    if seen.contains(&spec.name) {
                        return Err(DecodeError::DuplicateChild {
                            parent: T::TAG,
                            child: spec.name,
                        });
                    }
                    seen.push(spec.name);
                }
                (spec.decode)(&mut value, child)?;
            }
        }
    }

    Ok(value)
}

fn push_decoded<T: Schema>(items: &mut Vec<T>, element: Element) -> Result<(), DecodeError> {
    items.push(decode_element(element)?);
    Ok(())
}

fn set_decoded<T: Schema>(slot: &mut T, element: Element) -> Result<(), DecodeError> {
    *slot = decode_element(element)?;
    Ok(())
}

impl Schema for Tmx {
    const TAG: &'static str = "tmx";
    const ATTRIBUTES: &'static [Attr<Self>] = &[Attr::new("version", |tmx| &mut tmx.version)];
    const CHILDREN: &'static [Child<Self>] = &[
        Child::once("header", |tmx, e| set_decoded(&mut tmx.header, e)),
        Child::once("body", |tmx, e| set_decoded(&mut tmx.body, e)),
    ];

    fn push_text(&mut self, text: String) {
        self.text.push_str(&text);
    }
}

impl Schema for Header {
    const TAG: &'static str = "header";
    const ATTRIBUTES: &'static [Attr<Self>] = &[
        Attr::new("creationtool", |h| &mut h.creation_tool),
        Attr::new("creationtoolversion", |h| &mut h.creation_tool_version),
        Attr::new("datatype", |h| &mut h.data_type),
        Attr::new("segtype", |h| &mut h.seg_type),
        Attr::new("adminlang", |h| &mut h.admin_lang),
        Attr::new("srclang", |h| &mut h.src_lang),
        Attr::new("o-tmf", |h| &mut h.o_tmf),
        Attr::new("creationdate", |h| &mut h.creation_date),
        Attr::new("creationid", |h| &mut h.creation_id),
        Attr::new("changedate", |h| &mut h.change_date),
        Attr::new("changeid", |h| &mut h.change_id),
        Attr::new("o-encoding", |h| &mut h.o_encoding),
    ];
    const CHILDREN: &'static [Child<Self>] = &[
        Child::many("note", |h, e| push_decoded(&mut h.notes, e)),
        Child::many("prop", |h, e| push_decoded(&mut h.props, e)),
        Child::many("ude", |h, e| push_decoded(&mut h.udes, e)),
    ];

    fn push_text(&mut self, text: String) {
        self.text.push_str(&text);
    }
}

impl Schema for Ude {
    const TAG: &'static str = "ude";
    const ATTRIBUTES: &'static [Attr<Self>] = &[
        Attr::new("name", |u| &mut u.name),
        Attr::new("base", |u| &mut u.base),
    ];
    const CHILDREN: &'static [Child<Self>] =
        &[Child::many("map", |u, e| push_decoded(&mut u.maps, e))];

    fn push_text(&mut self, text: String) {
        self.text.push_str(&text);
    }
}

impl Schema for Map {
    const TAG: &'static str = "map";
    const ATTRIBUTES: &'static [Attr<Self>] = &[
        Attr::new("unicode", |m| &mut m.unicode),
        Attr::new("code", |m| &mut m.code),
        Attr::new("ent", |m| &mut m.ent),
        Attr::new("subst", |m| &mut m.subst),
    ];

    fn push_text(&mut self, text: String) {
        self.text.push_str(&text);
    }
}

impl Schema for Body {
    const TAG: &'static str = "body";
    const ATTRIBUTES: &'static [Attr<Self>] = &[];
    const CHILDREN: &'static [Child<Self>] =
        &[Child::many("tu", |b, e| push_decoded(&mut b.units, e))];

    fn push_text(&mut self, text: String) {
        self.text.push_str(&text);
    }
}

impl Schema for Tu {
    const TAG: &'static str = "tu";
    const ATTRIBUTES: &'static [Attr<Self>] = &[
        Attr::new("tuid", |tu| &mut tu.tuid),
        Attr::new("datatype", |tu| &mut tu.data_type),
        Attr::new("usagecount", |tu| &mut tu.usage_count),
        Attr::new("lastusagedate", |tu| &mut tu.last_usage_date),
        Attr::new("srclang", |tu| &mut tu.src_lang),
        Attr::new("o-encoding", |tu| &mut tu.o_encoding),
        Attr::new("creationtool", |tu| &mut tu.creation_tool),
        Attr::new("creationtoolversion", |tu| &mut tu.creation_tool_version),
        Attr::new("creationdate", |tu| &mut tu.creation_date),
        Attr::new("creationid", |tu| &mut tu.creation_id),
        Attr::new("changedate", |tu| &mut tu.change_date),
        Attr::new("segtype", |tu| &mut tu.seg_type),
        Attr::new("changeid", |tu| &mut tu.change_id),
        Attr::new("o-tmf", |tu| &mut tu.o_tmf),
    ];
    const CHILDREN: &'static [Child<Self>] = &[
        Child::many("note", |tu, e| push_decoded(&mut tu.notes, e)),
        Child::many("prop", |tu, e| push_decoded(&mut tu.props, e)),
        Child::many("tuv", |tu, e| push_decoded(&mut tu.variants, e)),
    ];

    fn push_text(&mut self, text: String) {
        self.text.push_str(&text);
    }
}

impl Schema for Tuv {
    const TAG: &'static str = "tuv";
    const ATTRIBUTES: &'static [Attr<Self>] = &[
        Attr::new("lang", |v| &mut v.lang),
        Attr::new("creationdate", |v| &mut v.creation_date),
        Attr::new("creationid", |v| &mut v.creation_id),
        Attr::new("changedate", |v| &mut v.change_date),
        Attr::new("changeid", |v| &mut v.change_id),
        Attr::new("o-encoding", |v| &mut v.o_encoding),
        Attr::new("datatype", |v| &mut v.data_type),
        Attr::new("usagecount", |v| &mut v.usage_count),
        Attr::new("lastusagedate", |v| &mut v.last_usage_date),
        Attr::new("creationtool", |v| &mut v.creation_tool),
        Attr::new("creationtoolversion", |v| &mut v.creation_tool_version),
        Attr::new("o-tmf", |v| &mut v.o_tmf),
    ];
    const CHILDREN: &'static [Child<Self>] = &[
        Child::once("seg", |v, e| set_decoded(&mut v.seg, e)),
        Child::many("note", |v, e| push_decoded(&mut v.notes, e)),
        Child::many("prop", |v, e| push_decoded(&mut v.props, e)),
    ];

    fn push_text(&mut self, text: String) {
        self.text.push_str(&text);
    }
}

impl Schema for Seg {
    const TAG: &'static str = "seg";
    const ATTRIBUTES: &'static [Attr<Self>] = &[];

    // bpt, ept, it, ph and hi have no entry yet and are dropped
    fn push_text(&mut self, text: String) {
        self.content.push(Inline::Text(text));
    }
}

impl Schema for Note {
    const TAG: &'static str = "note";
    const ATTRIBUTES: &'static [Attr<Self>] = &[
        Attr::new("lang", |n| &mut n.lang),
        Attr::new("o-encoding", |n| &mut n.o_encoding),
    ];

    fn push_text(&mut self, text: String) {
        self.text.push_str(&text);
    }
}

impl Schema for Prop {
    const TAG: &'static str = "prop";
    const ATTRIBUTES: &'static [Attr<Self>] = &[
        Attr::new("type", |p| &mut p.prop_type),
        Attr::new("lang", |p| &mut p.lang),
        Attr::new("o-encoding", |p| &mut p.o_encoding),
    ];

    fn push_text(&mut self, text: String) {
        self.text.push_str(&text);
    }
}
