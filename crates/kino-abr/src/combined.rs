//! Bitrate estimation from both lookahead and download history

use crate::{
    future::bitrates_using_future_info,
    past::bitrates_using_past_info,
    types::{BitrateEstimate, Format, HistoryEntry, SegmentDescriptor},
    Result,
};
use tracing::{debug, instrument};

/// Estimate bitrates from lookahead first, falling back to history.
///
/// A track's future estimate is replaced by its past estimate when the
/// future estimate is unknown, or when `use_nominal_as_lower_bound` is set
/// and the future estimate is below the format's nominal bitrate. An
/// unknown past estimate never replaces a known future one.
#[instrument(skip(formats, history, sequences), fields(tracks = formats.len()))]
pub fn bitrates_using_past_and_future_info<S>(
    formats: &[Format],
    history: &[HistoryEntry],
    max_past_window_us: i64,
    sequences: &[S],
    max_future_window_us: i64,
    use_nominal_as_lower_bound: bool,
) -> Result<Vec<BitrateEstimate>>
where
    S: AsRef<[SegmentDescriptor]>,
{
    let future = bitrates_using_future_info(sequences, formats, max_future_window_us)?;
    let past = bitrates_using_past_info(history, formats, max_past_window_us);

    let estimates: Vec<BitrateEstimate> = future
        .into_iter()
        .zip(past)
        .zip(formats)
        .map(|((future, past), format)| {
            let below_nominal = match (future, format.nominal_bitrate()) {
                (Some(bps), Some(nominal)) => use_nominal_as_lower_bound && bps < nominal,
                _ => false,
            };
            if (future.is_none() || below_nominal) && past.is_some() {
                past
            } else {
                future
            }
        })
        .collect();

    debug!(
        estimated = estimates.iter().filter(|e| e.is_some()).count(),
        "Past and future info bitrates computed"
    );

    Ok(estimates)
}
