//! Windowed rate averaging over runs of media chunks
//!
//! Both the lookahead and the download-history estimators reduce to the
//! same question: how many bytes per second does a run of chunks carry,
//! looking at no more than a fixed span of media time? The chunk that
//! straddles the end of the window contributes only the fraction of its
//! bytes that falls inside it.

use crate::types::{BitrateEstimate, ChunkTiming, Direction};
use tracing::trace;

const BITS_PER_BYTE: f64 = 8.0;
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Bytes and media time collected from a run of chunks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateWindow {
    /// Accumulated bytes (fractional when a chunk was only partly included)
    pub bytes: f64,
    /// Accumulated media duration in microseconds
    pub duration_us: u64,
}

impl RateWindow {
    /// Average bitrate over the window, rounded to the nearest bit per second
    pub fn bitrate(&self) -> BitrateEstimate {
        if self.duration_us == 0 {
            return None;
        }
        let bps = self.bytes * BITS_PER_BYTE * MICROS_PER_SECOND / self.duration_us as f64;
        Some(bps.round() as u64)
    }
}

/// Collect bytes and duration from `chunks` in `direction`, capped at
/// `max_window_us` of media time.
///
/// Traversal stops at the first chunk of unknown length, so a run that
/// starts with one yields an empty window.
pub fn measure_window<C: ChunkTiming>(
    chunks: &[C],
    max_window_us: i64,
    direction: Direction,
) -> RateWindow {
    let Ok(max_window_us) = u64::try_from(max_window_us) else {
        return RateWindow::default();
    };
    match direction {
        Direction::Forward => accumulate(chunks.iter(), max_window_us),
        Direction::Backward => accumulate(chunks.iter().rev(), max_window_us),
    }
}

/// Average bitrate of `chunks` in bits per second over at most
/// `max_window_us` of media, traversed in `direction`.
///
/// Returns `None` when the window is not positive, the run is empty, or
/// the first traversed chunk has an unknown length.
pub fn average_bitrate<C: ChunkTiming>(
    chunks: &[C],
    max_window_us: i64,
    direction: Direction,
) -> BitrateEstimate {
    if max_window_us <= 0 || chunks.is_empty() {
        return None;
    }
    measure_window(chunks, max_window_us, direction).bitrate()
}

/// Scale `bps` by `numerator / denominator`, rounding to the nearest bit
/// per second. Returns `None` for a zero denominator.
pub fn scale_bitrate(bps: u64, numerator: u64, denominator: u64) -> BitrateEstimate {
    if denominator == 0 {
        return None;
    }
    let denominator = u128::from(denominator);
    let scaled = (u128::from(bps) * u128::from(numerator) + denominator / 2) / denominator;
    Some(u64::try_from(scaled).unwrap_or(u64::MAX))
}

fn accumulate<'a, C, I>(chunks: I, max_window_us: u64) -> RateWindow
where
    C: ChunkTiming + 'a,
    I: Iterator<Item = &'a C>,
{
    let mut window = RateWindow::default();
    if max_window_us == 0 {
        return window;
    }

    for chunk in chunks {
        let Some(length) = chunk.byte_length() else {
            trace!(
                collected_us = window.duration_us,
                "Chunk length unknown, stopping"
            );
            break;
        };
        let chunk_us = chunk.duration_us();
        if chunk_us == 0 {
            continue;
        }

        // duration_us never exceeds max_window_us
        if chunk_us > max_window_us - window.duration_us {
            let remaining_us = max_window_us - window.duration_us;
            window.bytes += length as f64 * remaining_us as f64 / chunk_us as f64;
            window.duration_us = max_window_us;
            trace!(
                chunk_us,
                remaining_us,
                "Window full, chunk included proportionally"
            );
            break;
        }

        window.bytes += length as f64;
        window.duration_us += chunk_us;
    }

    window
}
