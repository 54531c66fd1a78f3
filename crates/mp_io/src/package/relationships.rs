//! `.rels` parts.

use crate::package::xml_attr;

const NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: &'static str,
    /// Relative to the source part's directory.
    pub target: String,
}

#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Directory of the source part, e.g. `word/`; empty for package rels.
    base: String,
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn for_source_dir(base: &str) -> Self {
        Self { base: base.to_string(), rels: Vec::new() }
    }

    pub fn push(&mut self, id: impl Into<String>, rel_type: &'static str, target: impl Into<String>) {
        self.rels.push(Relationship { id: id.into(), rel_type, target: target.into() });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Zip entry name a relationship points at.
    pub fn resolve_target(&self, rel: &Relationship) -> String {
        format!("{}{}", self.base, rel.target)
    }

    pub fn to_xml(&self) -> String {
        let mut s = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Relationships xmlns=\"{NS}\">"
        );
        for r in &self.rels {
            s.push_str(&format!(
                "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>",
                xml_attr(&r.id),
                r.rel_type,
                xml_attr(&r.target)
            ));
        }
        s.push_str("</Relationships>");
        s
    }
}
