//! Bitrate estimation from download history
//!
//! The most recently downloaded chunks reflect the current network at the
//! quality level in use. Their measured rate is projected onto every
//! candidate variant by the ratio of nominal bitrates.

use crate::{
    average::{average_bitrate, scale_bitrate},
    types::{BitrateEstimate, Direction, Format, HistoryEntry},
};
use tracing::{debug, instrument};

/// Estimate the bitrate of every format from the download history.
///
/// `history` is ordered oldest-first. Only the trailing run of entries
/// sharing the most recent entry's format is measured.
#[instrument(skip(history, formats), fields(history = history.len(), tracks = formats.len()))]
pub fn bitrates_using_past_info(
    history: &[HistoryEntry],
    formats: &[Format],
    max_window_us: i64,
) -> Vec<BitrateEstimate> {
    let Some(last) = history.last() else {
        return vec![None; formats.len()];
    };
    let reference = last.format();

    let run = trailing_run(history);
    let measured = average_bitrate(run, max_window_us, Direction::Backward);

    debug!(
        reference = %reference,
        run_len = run.len(),
        measured_bps = ?measured,
        "Past info reference measured"
    );

    formats
        .iter()
        .map(|format| {
            let measured = measured?;
            let reference_nominal = reference.nominal_bitrate()?;
            scale_bitrate(measured, format.nominal_bitrate()?, reference_nominal)
        })
        .collect()
}

/// Longest suffix of `history` whose entries share the last entry's format
pub fn trailing_run(history: &[HistoryEntry]) -> &[HistoryEntry] {
    let Some(last) = history.last() else {
        return history;
    };
    let start = history
        .iter()
        .rposition(|entry| entry.format() != last.format())
        .map_or(0, |index| index + 1);
    &history[start..]
}
