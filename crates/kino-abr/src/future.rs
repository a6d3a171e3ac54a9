//! Bitrate estimation from upcoming segments
//!
//! Each candidate track is measured over its own lookahead sequence. A
//! track that cannot be measured borrows the measurement of the track
//! whose nominal bitrate is closest to its own, scaled by the ratio of
//! the two nominal bitrates.

use crate::{
    average::{average_bitrate, scale_bitrate},
    types::{BitrateEstimate, Direction, Format, SegmentDescriptor},
    Error, Result,
};
use tracing::{debug, instrument, trace};

/// Estimate the bitrate of every track from its lookahead sequence.
///
/// `sequences[i]` holds the upcoming segments of the track in
/// `formats[i]`. Tracks without a measurable lookahead fall back to the
/// closest measured track by nominal bitrate; ties go to the lowest index.
#[instrument(skip(sequences, formats), fields(tracks = formats.len()))]
pub fn bitrates_using_future_info<S>(
    sequences: &[S],
    formats: &[Format],
    max_window_us: i64,
) -> Result<Vec<BitrateEstimate>>
where
    S: AsRef<[SegmentDescriptor]>,
{
    if sequences.len() != formats.len() {
        return Err(Error::LengthMismatch {
            sequences: sequences.len(),
            formats: formats.len(),
        });
    }

    let measured: Vec<BitrateEstimate> = sequences
        .iter()
        .map(|sequence| average_bitrate(sequence.as_ref(), max_window_us, Direction::Forward))
        .collect();

    let estimates = measured
        .iter()
        .enumerate()
        .map(|(index, estimate)| match estimate {
            Some(bps) => Some(*bps),
            None => estimate_from_closest(index, &measured, formats),
        })
        .collect::<Vec<_>>();

    debug!(
        measured = measured.iter().filter(|m| m.is_some()).count(),
        estimated = estimates.iter().filter(|e| e.is_some()).count(),
        "Future info bitrates computed"
    );

    Ok(estimates)
}

/// Scale the measurement of the closest measured track onto `index`.
///
/// Only direct measurements are considered, never other fallbacks.
fn estimate_from_closest(
    index: usize,
    measured: &[BitrateEstimate],
    formats: &[Format],
) -> BitrateEstimate {
    let target = formats[index].nominal_bitrate()?;

    let mut closest: Option<(u64, u64, usize)> = None;
    for (donor, (bps, format)) in measured.iter().zip(formats).enumerate() {
        if donor == index {
            continue;
        }
        let (Some(bps), Some(nominal)) = (*bps, format.nominal_bitrate()) else {
            continue;
        };
        if nominal == 0 {
            continue;
        }
        let distance = target.abs_diff(nominal);
        if closest.map_or(true, |(best, _, _)| distance < best) {
            closest = Some((distance, bps, donor));
        }
    }

    let (_, bps, donor) = closest?;
    let donor_nominal = formats[donor].nominal_bitrate()?;
    trace!(index, donor, "Borrowing measurement from closest track");
    scale_bitrate(bps, target, donor_nominal)
}
