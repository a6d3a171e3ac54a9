//! Kino ABR - Segment Bitrate Estimation for Kino
//!
//! This crate estimates the achievable delivery bitrate of every candidate
//! variant of a track, as input to an adaptive bitrate policy:
//! - Windowed, duration-capped rate averaging over runs of chunks
//! - Lookahead (future info) estimates with cross-track fallback
//! - Download history (past info) estimates projected onto each variant
//! - Combined estimates preferring lookahead and falling back to history
//!
//! Every estimate is `Option<u64>` bits per second; `None` means there was
//! not enough data, and is never reported as zero.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           Kino ABR                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │                    ┌──────────────────────┐                     │
//! │                    │   BitrateEstimator   │                     │
//! │                    └──────────┬───────────┘                     │
//! │                               │                                 │
//! │                    ┌──────────┴───────────┐                     │
//! │                    │  Past + Future Info  │                     │
//! │                    └─────┬──────────┬─────┘                     │
//! │                          │          │                           │
//! │             ┌────────────┴─┐      ┌─┴────────────┐              │
//! │             │ Future Info  │      │  Past Info   │              │
//! │             │ (lookahead)  │      │  (history)   │              │
//! │             └──────┬───────┘      └───────┬──────┘              │
//! │                    │                      │                     │
//! │                    └──────────┬───────────┘                     │
//! │                        ┌──────┴──────┐                          │
//! │                        │  Windowed   │                          │
//! │                        │  Averager   │                          │
//! │                        └─────────────┘                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use kino_abr::{BitrateEstimator, Format, SegmentDescriptor};
//!
//! let low = Format::with_bitrate(400_000);
//! let high = Format::with_bitrate(1_600_000);
//!
//! // 4s segments: the low track has a known size, the high one does not yet
//! let sequences = vec![
//!     vec![SegmentDescriptor::new(0, 4_000_000, Some(200_000)).unwrap()],
//!     vec![SegmentDescriptor::new(0, 4_000_000, None).unwrap()],
//! ];
//!
//! let estimator = BitrateEstimator::default();
//! let bitrates = estimator.future(&sequences, &[low, high]).unwrap();
//! assert_eq!(bitrates, vec![Some(400_000), Some(1_600_000)]);
//! ```

pub mod average;
pub mod combined;
pub mod config;
pub mod error;
pub mod estimator;
pub mod future;
pub mod past;
pub mod types;

pub use average::{average_bitrate, measure_window, scale_bitrate, RateWindow};
pub use combined::bitrates_using_past_and_future_info;
pub use config::EstimatorConfig;
pub use error::{Error, Result};
pub use estimator::BitrateEstimator;
pub use future::bitrates_using_future_info;
pub use past::{bitrates_using_past_info, trailing_run};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version; call once at startup
pub fn init() {
    tracing::info!(version = VERSION, "Kino ABR initialized");
}
