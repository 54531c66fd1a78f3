//! Identity images for one synthesis: the organization plus one per unique
//! voter. Encodes are independent and run on the blocking pool, bounded by
//! `SynthesisParams::max_concurrent_encodes`; all must finish before assembly.

use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::Semaphore;

use mp_algo::Roster;
use mp_core::{MeetingSnapshot, QrParams, RasterImage, SynthesisParams};
use mp_identity::{encode, EncodeError, Payload};
use mp_io::ImageSet;

use crate::{Subject, SynthesisError};

pub async fn encode_all(
    meeting: &MeetingSnapshot,
    roster: &Roster,
    params: &SynthesisParams,
) -> Result<ImageSet, SynthesisError> {
    encode_all_with(meeting, roster, params, encode).await
}

async fn encode_all_with<E>(
    meeting: &MeetingSnapshot,
    roster: &Roster,
    params: &SynthesisParams,
    encoder: E,
) -> Result<ImageSet, SynthesisError>
where
    E: Fn(&Payload, &QrParams) -> Result<RasterImage, EncodeError> + Send + Sync + 'static,
{
    let encoder = Arc::new(encoder);
    let limit = Arc::new(Semaphore::new(params.max_concurrent_encodes.max(1)));

    let mut jobs = vec![(Subject::Organization, Payload::organization(&params.organization, meeting))];
    jobs.extend(roster.entries().iter().map(|e| (Subject::voter(e), Payload::voter(meeting, e))));

    let tasks = jobs.into_iter().map(|(subject, payload)| {
        let limit = limit.clone();
        let encoder = encoder.clone();
        let qr = params.qr.clone();
        async move {
            let _permit = limit.acquire_owned().await.map_err(|e| SynthesisError::Join(e.to_string()))?;
            let encoded = tokio::task::spawn_blocking(move || encoder(&payload, &qr))
                .await
                .map_err(|e| SynthesisError::Join(e.to_string()))?;
            let image = encoded.map_err(|source| SynthesisError::encode(subject.clone(), source))?;
            tracing::debug!(%subject, bytes = image.png.len(), side_px = image.width_px, "identity image encoded");
            Ok::<RasterImage, SynthesisError>(image)
        }
    });

    let mut encoded = try_join_all(tasks).await?.into_iter();
    let organization = encoded
        .next()
        .ok_or_else(|| SynthesisError::Join("organization image was not produced".into()))?;

    let mut set = ImageSet::new(organization);
    for (entry, image) in roster.entries().iter().zip(encoded) {
        set.push_voter(entry.index, entry.voter_id.clone(), image);
    }
    Ok(set)
}
