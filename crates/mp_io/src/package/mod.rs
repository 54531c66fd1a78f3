//! crates/mp_io/src/package/mod.rs
//! Package assembler: `Markup` + encoded images → DOCX (OPC zip) bytes.
//!
//! Relationship ids and media part names are assigned here and nowhere else:
//! organization → `rIdOrg` / `word/media/organization.png`,
//! voter with roster index n → `rIdVoter{n}` / `word/media/voter_{n}.png`.
//!
//! Package invariants are checked before the first byte is written; a failed
//! check never produces a partial archive.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use mp_core::{ImageKey, Markup, MarkupFragment, RasterImage, VoterId};

pub mod content_types;
pub mod document;
pub mod relationships;

use content_types::{ContentTypes, CT_MAIN_DOCUMENT, CT_RELATIONSHIPS, CT_XML};
use relationships::{Relationships, REL_IMAGE, REL_OFFICE_DOCUMENT};

/// MIME type of the finished archive.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

pub const ORGANIZATION_REL_ID: &str = "rIdOrg";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageError {
    #[error("markup references image {key} but no package part was supplied for it")]
    MissingRelationshipTarget { key: ImageKey },
    #[error("part {0} would be written twice")]
    DuplicatePart(String),
    #[error("relationship {id} targets {target}, which is not in the package")]
    DanglingRelationship { id: String, target: String },
    #[error("part {0} has no declared content type")]
    UndeclaredPart(String),
    #[error("zip: {0}")]
    Zip(String),
}

impl From<zip::result::ZipError> for PackageError {
    fn from(e: zip::result::ZipError) -> Self {
        PackageError::Zip(e.to_string())
    }
}

impl From<std::io::Error> for PackageError {
    fn from(e: std::io::Error) -> Self {
        PackageError::Zip(e.to_string())
    }
}

/// Escape for attribute values in package XML.
pub(crate) fn xml_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ---- image set ----

#[derive(Debug, Clone)]
struct VoterImage {
    index: usize,
    voter: VoterId,
    image: RasterImage,
}

/// Logical image identity → encoded image, organization first, then voters
/// in roster order.
#[derive(Debug, Clone)]
pub struct ImageSet {
    organization: RasterImage,
    voters: Vec<VoterImage>,
}

struct MediaEntry<'a> {
    key: ImageKey,
    rel_id: String,
    part: String,
    image: &'a RasterImage,
}

impl MediaEntry<'_> {
    fn file_name(&self) -> &str {
        self.part.rsplit('/').next().unwrap_or(&self.part)
    }
}

impl ImageSet {
    pub fn new(organization: RasterImage) -> Self {
        Self { organization, voters: Vec::new() }
    }

    /// `index` is the voter's 1-based roster index.
    pub fn push_voter(&mut self, index: usize, voter: VoterId, image: RasterImage) {
        self.voters.push(VoterImage { index, voter, image });
    }

    fn media(&self) -> Vec<MediaEntry<'_>> {
        let ext = RasterImage::EXTENSION;
        let mut out = vec![MediaEntry {
            key: ImageKey::Organization,
            rel_id: ORGANIZATION_REL_ID.to_string(),
            part: format!("word/media/organization.{ext}"),
            image: &self.organization,
        }];
        out.extend(self.voters.iter().map(|v| MediaEntry {
            key: ImageKey::Voter(v.voter.clone()),
            rel_id: format!("rIdVoter{}", v.index),
            part: format!("word/media/voter_{}.{ext}", v.index),
            image: &v.image,
        }));
        out
    }
}

// ---- assembly ----

/// Build the DOCX archive. Identical inputs give byte-identical output.
pub fn assemble(markup: &Markup, images: &ImageSet) -> Result<Vec<u8>, PackageError> {
    let media = images.media();
    let by_key: BTreeMap<&ImageKey, &MediaEntry<'_>> = media.iter().map(|m| (&m.key, m)).collect();

    let mut body = String::new();
    let mut doc_pr_id = 0u32;
    for fragment in &markup.fragments {
        match fragment {
            MarkupFragment::Xml(s) => body.push_str(s),
            MarkupFragment::Image(r) => {
                let Some(m) = by_key.get(&r.key) else {
                    tracing::error!(key = %r.key, "image referenced in markup has no package part");
                    return Err(PackageError::MissingRelationshipTarget { key: r.key.clone() });
                };
                doc_pr_id += 1;
                body.push_str(&document::inline_drawing(r, &m.rel_id, doc_pr_id, m.file_name()));
            }
        }
    }

    let mut package_rels = Relationships::for_source_dir("");
    package_rels.push("rId1", REL_OFFICE_DOCUMENT, DOCUMENT_PART);

    let mut document_rels = Relationships::for_source_dir("word/");
    for m in &media {
        let target = m.part.strip_prefix("word/").unwrap_or(&m.part);
        document_rels.push(m.rel_id.clone(), REL_IMAGE, target);
    }

    let content_types = ContentTypes::default()
        .default_for("rels", CT_RELATIONSHIPS)
        .default_for("xml", CT_XML)
        .default_for(RasterImage::EXTENSION, RasterImage::CONTENT_TYPE)
        .override_for(DOCUMENT_PART, CT_MAIN_DOCUMENT);

    let mut parts: Vec<(String, Vec<u8>)> = vec![
        (content_types::PART_NAME.to_string(), content_types.to_xml().into_bytes()),
        (PACKAGE_RELS_PART.to_string(), package_rels.to_xml().into_bytes()),
        (DOCUMENT_PART.to_string(), document::envelope(&body).into_bytes()),
        (DOCUMENT_RELS_PART.to_string(), document_rels.to_xml().into_bytes()),
    ];
    parts.extend(media.iter().map(|m| (m.part.clone(), m.image.png.clone())));

    check_invariants(&parts, &content_types, &[&package_rels, &document_rels])?;
    write_zip(&parts)
}

fn check_invariants(
    parts: &[(String, Vec<u8>)],
    content_types: &ContentTypes,
    rel_sets: &[&Relationships],
) -> Result<(), PackageError> {
    let mut names = BTreeSet::new();
    for (name, _) in parts {
        if !names.insert(name.as_str()) {
            return Err(PackageError::DuplicatePart(name.clone()));
        }
        if content_types.resolve(name).is_none() {
            return Err(PackageError::UndeclaredPart(name.clone()));
        }
    }
    for rels in rel_sets {
        for rel in rels.iter() {
            let target = rels.resolve_target(rel);
            if !names.contains(target.as_str()) {
                return Err(PackageError::DanglingRelationship { id: rel.id.clone(), target });
            }
        }
    }
    Ok(())
}

fn write_zip(parts: &[(String, Vec<u8>)]) -> Result<Vec<u8>, PackageError> {
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut zw = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in parts {
        zw.start_file(name.as_str(), options)?;
        zw.write_all(bytes)?;
        tracing::debug!(part = %name, bytes = bytes.len(), "part written");
    }
    Ok(zw.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::ImageRef;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    fn png(tag: u8) -> RasterImage {
        RasterImage { png: vec![0x89, b'P', b'N', b'G', tag], width_px: 8, height_px: 8 }
    }

    fn voter(id: &str) -> VoterId {
        VoterId::try_from(id).unwrap()
    }

    fn markup(voters: &[&str]) -> Markup {
        let mut f = vec![
            MarkupFragment::xml("<w:p><w:r><w:t>Протокол &amp; реестр</w:t></w:r></w:p><w:p>"),
            MarkupFragment::Image(ImageRef::square_mm(ImageKey::Organization, 30)),
            MarkupFragment::xml("</w:p>"),
        ];
        for v in voters {
            f.push(MarkupFragment::xml("<w:p>"));
            f.push(MarkupFragment::Image(ImageRef::square_mm(ImageKey::Voter(voter(v)), 20)));
            f.push(MarkupFragment::xml("</w:p>"));
        }
        Markup::new(f)
    }

    fn images(voters: &[&str]) -> ImageSet {
        let mut set = ImageSet::new(png(0));
        for (i, v) in voters.iter().enumerate() {
            set.push_voter(i + 1, voter(v), png(i as u8 + 1));
        }
        set
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut s = String::new();
        zip.by_name(name).unwrap().read_to_string(&mut s).unwrap();
        s
    }

    #[test]
    fn image_relationship_count_matches_voters_plus_one() {
        let bytes = assemble(&markup(&["v-1", "v-2", "v-3"]), &images(&["v-1", "v-2", "v-3"])).unwrap();
        let rels = read_part(&bytes, DOCUMENT_RELS_PART);
        assert_eq!(rels.matches(REL_IMAGE).count(), 4);
        assert!(rels.contains("Id=\"rIdOrg\" "));
        assert!(rels.contains("Id=\"rIdVoter3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"media/voter_3.png\""));

        let package_rels = read_part(&bytes, PACKAGE_RELS_PART);
        assert_eq!(package_rels.matches("<Relationship ").count(), 1);
        assert!(package_rels.contains(REL_OFFICE_DOCUMENT));
    }

    #[test]
    fn archive_lists_parts_in_fixed_order() {
        let bytes = assemble(&markup(&["v-1"]), &images(&["v-1"])).unwrap();
        let zip = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = zip.file_names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        let mut expected = vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/document.xml",
            "word/media/organization.png",
            "word/media/voter_1.png",
        ];
        expected.sort_unstable();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn document_declares_namespaces_and_embeds_by_rel_id() {
        let bytes = assemble(&markup(&["v-1"]), &images(&["v-1"])).unwrap();
        let doc = read_part(&bytes, DOCUMENT_PART);
        for ns in ["xmlns:w=", "xmlns:r=", "xmlns:wp=", "xmlns:a=", "xmlns:pic="] {
            assert!(doc.contains(ns), "missing {ns}");
        }
        assert!(doc.contains("r:embed=\"rIdOrg\""));
        assert!(doc.contains("r:embed=\"rIdVoter1\""));
        assert!(doc.contains("<wp:extent cx=\"1080000\" cy=\"1080000\"/>"));
        assert!(doc.contains("<w:pgSz w:w=\"11906\" w:h=\"16838\"/>"));
        assert!(doc.contains("Протокол &amp; реестр"));

        let ct = read_part(&bytes, content_types::PART_NAME);
        assert!(ct.contains("<Override PartName=\"/word/document.xml\""));
        assert!(ct.contains("<Default Extension=\"png\" ContentType=\"image/png\"/>"));
    }

    #[test]
    fn missing_image_is_refused() {
        let err = assemble(&markup(&["v-1", "v-2"]), &images(&["v-1"])).unwrap_err();
        assert_eq!(err, PackageError::MissingRelationshipTarget { key: ImageKey::Voter(voter("v-2")) });
    }

    #[test]
    fn colliding_roster_index_is_a_duplicate_part() {
        let mut set = ImageSet::new(png(0));
        set.push_voter(1, voter("v-1"), png(1));
        set.push_voter(1, voter("v-2"), png(2));
        let err = assemble(&markup(&["v-1", "v-2"]), &set).unwrap_err();
        assert_eq!(err, PackageError::DuplicatePart("word/media/voter_1.png".into()));
    }

    #[test]
    fn dangling_relationship_is_detected() {
        let mut rels = Relationships::for_source_dir("word/");
        rels.push("rIdX", REL_IMAGE, "media/ghost.png");
        let parts = vec![("word/document.xml".to_string(), Vec::new())];
        let ct = ContentTypes::default().default_for("xml", CT_XML);
        let err = check_invariants(&parts, &ct, &[&rels]).unwrap_err();
        assert_eq!(err, PackageError::DanglingRelationship { id: "rIdX".into(), target: "word/media/ghost.png".into() });
    }

    #[test]
    fn undeclared_part_is_detected() {
        let parts = vec![("word/media/logo.gif".to_string(), Vec::new())];
        let ct = ContentTypes::default().default_for("png", "image/png");
        let err = check_invariants(&parts, &ct, &[]).unwrap_err();
        assert_eq!(err, PackageError::UndeclaredPart("word/media/logo.gif".into()));
    }

    #[test]
    fn assembly_is_deterministic() {
        let a = assemble(&markup(&["v-1", "v-2"]), &images(&["v-1", "v-2"])).unwrap();
        let b = assemble(&markup(&["v-1", "v-2"]), &images(&["v-1", "v-2"])).unwrap();
        assert_eq!(a, b);
    }
}
