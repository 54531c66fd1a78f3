//! `[Content_Types].xml`: extension defaults plus per-part overrides.

use std::collections::BTreeMap;

use crate::package::xml_attr;

pub const PART_NAME: &str = "[Content_Types].xml";

const NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const CT_XML: &str = "application/xml";
pub const CT_MAIN_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    pub fn default_for(mut self, extension: &str, content_type: &str) -> Self {
        self.defaults.insert(extension.to_ascii_lowercase(), content_type.to_string());
        self
    }

    /// `part` is a zip entry name (no leading slash).
    pub fn override_for(mut self, part: &str, content_type: &str) -> Self {
        self.overrides.insert(format!("/{part}"), content_type.to_string());
        self
    }

    /// Content type a consumer would resolve for `part`.
    pub fn resolve(&self, part: &str) -> Option<&str> {
        if let Some(ct) = self.overrides.get(&format!("/{part}")) {
            return Some(ct.as_str());
        }
        let ext = part.rsplit_once('.')?.1.to_ascii_lowercase();
        self.defaults.get(&ext).map(String::as_str)
    }

    pub fn to_xml(&self) -> String {
        let mut s = format!("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Types xmlns=\"{NS}\">");
        for (ext, ct) in &self.defaults {
            s.push_str(&format!("<Default Extension=\"{}\" ContentType=\"{}\"/>", xml_attr(ext), xml_attr(ct)));
        }
        for (part, ct) in &self.overrides {
            s.push_str(&format!("<Override PartName=\"{}\" ContentType=\"{}\"/>", xml_attr(part), xml_attr(ct)));
        }
        s.push_str("</Types>");
        s
    }
}
