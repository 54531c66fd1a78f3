//! mp_pipeline: protocol synthesis surface
//! (validate → tally → roster → encode images → compose → assemble).
//! Math lives in `mp_algo`, markup in `mp_report`, bytes in `mp_io`; this crate
//! only orders the stages and maps their errors into one `SynthesisError`.
//! No retries: the first failure aborts the whole call.

#![forbid(unsafe_code)]

use std::fmt;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;

use mp_algo::{tally, QuorumSummary, Roster, RosterEntry};
use mp_core::{
    validate_input, validate_params, CoreError, ImageKey, SynthesisInput, SynthesisParams, VoterId,
};
use mp_identity::EncodeError;
use mp_io::{PackageError, DOCX_CONTENT_TYPE};
use mp_report::{ComposeInput, ItemResult};

pub mod encode_images;
pub mod file_name;

pub use file_name::protocol_file_name;

/// Whose identity image an error is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Organization,
    Voter { id: VoterId, name: String },
}

impl Subject {
    pub fn voter(e: &RosterEntry) -> Self {
        Subject::Voter { id: e.voter_id.clone(), name: e.display_name.clone() }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Organization => f.write_str("organization"),
            Subject::Voter { id, name } => write!(f, "voter {id} ({name})"),
        }
    }
}

/// Single error surface for a synthesis call.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("identity payload for {subject} does not fit a QR symbol: {source}")]
    PayloadTooLarge { subject: Subject, source: EncodeError },

    #[error("identity image for {subject} could not be encoded: {source}")]
    Encode { subject: Subject, source: EncodeError },

    #[error("markup references {key} but no image part exists for it")]
    MissingRelationshipTarget { key: ImageKey },

    #[error("package assembly failed: {0}")]
    Package(PackageError),

    #[error("snapshot could not be obtained: {0}")]
    UpstreamFetchFailed(String),

    #[error("encoder task failed: {0}")]
    Join(String),
}

impl SynthesisError {
    pub(crate) fn encode(subject: Subject, source: EncodeError) -> Self {
        match source {
            EncodeError::PayloadTooLarge { .. } => SynthesisError::PayloadTooLarge { subject, source },
            other => SynthesisError::Encode { subject, source: other },
        }
    }
}

impl From<PackageError> for SynthesisError {
    fn from(e: PackageError) -> Self {
        match e {
            PackageError::MissingRelationshipTarget { key } => SynthesisError::MissingRelationshipTarget { key },
            other => SynthesisError::Package(other),
        }
    }
}

/// Finished protocol, ready for the delivery adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentPackage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: &'static str,
    /// SHA-256 of `bytes`, lowercase hex.
    pub sha256: String,
}

impl fmt::Debug for DocumentPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentPackage")
            .field("bytes", &self.bytes.len())
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("sha256", &self.sha256)
            .finish()
    }
}

/// Synthesize with the current local time as the generation stamp.
pub async fn synthesize(input: &SynthesisInput, params: &SynthesisParams) -> Result<DocumentPackage, SynthesisError> {
    synthesize_at(input, params, chrono::Local::now().naive_local()).await
}

/// Synthesize with an explicit generation stamp (protocol year + footer).
pub async fn synthesize_at(
    input: &SynthesisInput,
    params: &SynthesisParams,
    generated_at: NaiveDateTime,
) -> Result<DocumentPackage, SynthesisError> {
    validate_input(input)?;
    validate_params(params)?;

    let meeting = &input.meeting;
    tracing::info!(meeting = %meeting.id, items = input.agenda.len(), "protocol synthesis started");

    let items = input
        .agenda_in_order()
        .into_iter()
        .map(|item| {
            tally(item)
                .map(|t| ItemResult { item, tally: t })
                .map_err(|_| CoreError::TallyOverflow { item: item.id.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let quorum = QuorumSummary::from_meeting(meeting);
    let roster = Roster::build(&input.roster, &input.votes_by_item);

    let images = encode_images::encode_all(meeting, &roster, params).await?;

    let markup = mp_report::compose(&ComposeInput {
        input,
        items: &items,
        quorum: &quorum,
        roster: &roster,
        params,
        generated_at,
    });
    let bytes = mp_io::assemble(&markup, &images)?;

    let file_name = protocol_file_name(meeting);
    let sha256 = mp_io::hasher::sha256_hex(&bytes);
    tracing::info!(
        meeting = %meeting.id,
        voters = roster.len(),
        bytes = bytes.len(),
        file = %file_name,
        "protocol synthesis finished"
    );

    Ok(DocumentPackage { bytes, file_name, content_type: DOCX_CONTENT_TYPE, sha256 })
}

/// Load a snapshot from disk, then synthesize. Loader failures surface as
/// `UpstreamFetchFailed`: the engine never saw a usable snapshot.
pub async fn synthesize_from_path(path: &Path, params: &SynthesisParams) -> Result<DocumentPackage, SynthesisError> {
    let input = mp_io::loader::load_input(path).map_err(|e| SynthesisError::UpstreamFetchFailed(e.to_string()))?;
    synthesize(&input, params).await
}
