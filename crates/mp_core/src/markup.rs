//! Markup fragment sequence shared by the composer and the package assembler.
//!
//! The composer emits already-escaped WordprocessingML text plus image
//! placeholders keyed by logical identity. Only the assembler knows which
//! relationship id a key maps to, so images stay symbolic until assembly.

use crate::ids::VoterId;

/// English Metric Units per millimetre.
pub const EMU_PER_MM: u64 = 36_000;

/// Logical identity of an embedded image.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageKey {
    Organization,
    Voter(VoterId),
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKey::Organization => f.write_str("organization"),
            ImageKey::Voter(id) => write!(f, "voter:{id}"),
        }
    }
}

/// Square inline image placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub key: ImageKey,
    /// Edge length in EMU.
    pub extent_emu: u64,
}

impl ImageRef {
    pub fn square_mm(key: ImageKey, mm: u32) -> Self {
        Self { key, extent_emu: u64::from(mm) * EMU_PER_MM }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupFragment {
    /// Well-formed, already-escaped body XML.
    Xml(String),
    /// Inline drawing resolved by the assembler.
    Image(ImageRef),
}

impl MarkupFragment {
    pub fn xml(s: impl Into<String>) -> Self { MarkupFragment::Xml(s.into()) }
}

/// Ordered document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub fragments: Vec<MarkupFragment>,
}

impl Markup {
    pub fn new(fragments: Vec<MarkupFragment>) -> Self { Self { fragments } }

    /// Concatenate sections in order.
    pub fn from_sections<I>(sections: I) -> Self
    where
        I: IntoIterator<Item = Vec<MarkupFragment>>,
    {
        Self { fragments: sections.into_iter().flatten().collect() }
    }

    /// Every image placeholder, in document order (duplicates kept).
    pub fn image_refs(&self) -> impl Iterator<Item = &ImageRef> {
        self.fragments.iter().filter_map(|f| match f {
            MarkupFragment::Image(r) => Some(r),
            MarkupFragment::Xml(_) => None,
        })
    }

    /// Concatenated XML text, images omitted. Useful for inspection.
    pub fn text_xml(&self) -> String {
        self.fragments
            .iter()
            .filter_map(|f| match f {
                MarkupFragment::Xml(s) => Some(s.as_str()),
                MarkupFragment::Image(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_concatenate_in_order() {
        let m = Markup::from_sections([
            vec![MarkupFragment::xml("<w:p/>")],
            vec![MarkupFragment::Image(ImageRef::square_mm(ImageKey::Organization, 30))],
            vec![MarkupFragment::xml("<w:p></w:p>")],
        ]);
        assert_eq!(m.fragments.len(), 3);
        assert_eq!(m.image_refs().count(), 1);
        assert_eq!(m.text_xml(), "<w:p/><w:p></w:p>");
        assert_eq!(m.image_refs().next().unwrap().extent_emu, 1_080_000);
    }
}
