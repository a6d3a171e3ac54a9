//! Core types for Kino ABR estimation

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Estimated delivery bitrate in bits per second.
///
/// `None` means there was not enough data to produce an estimate. It is
/// never folded into zero: `Some(0)` is a valid (if unlikely) measurement.
pub type BitrateEstimate = Option<u64>;

/// Stable identity of a quality variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormatId(pub Uuid);

impl FormatId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FormatId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FormatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One quality rendition of a track.
///
/// Formats compare by identity: two formats created separately are
/// different even when they declare the same bitrate, while clones of one
/// format are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Format {
    id: FormatId,
    /// Declared bitrate in bits per second, if the manifest carries one
    nominal_bitrate: Option<u64>,
    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Format {
    /// Create a format with a fresh identity
    pub fn new(nominal_bitrate: Option<u64>) -> Self {
        Self {
            id: FormatId::new(),
            nominal_bitrate,
            label: None,
        }
    }

    /// Create a format declaring `bps` as its nominal bitrate
    pub fn with_bitrate(bps: u64) -> Self {
        Self::new(Some(bps))
    }

    /// Create a format whose nominal bitrate is not known
    pub fn without_bitrate() -> Self {
        Self::new(None)
    }

    /// Attach a human-readable label
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(&self) -> FormatId {
        self.id
    }

    pub fn nominal_bitrate(&self) -> Option<u64> {
        self.nominal_bitrate
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns true if `other` is the same variant (by identity)
    pub fn is_same_variant(&self, other: &Format) -> bool {
        self.id == other.id
    }
}

impl PartialEq for Format {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_variant(other)
    }
}

impl Eq for Format {}

impl Hash for Format {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.label, self.nominal_bitrate) {
            (Some(label), Some(bps)) => write!(f, "{} ({}bps)", label, bps),
            (Some(label), None) => write!(f, "{}", label),
            (None, Some(bps)) => write!(f, "{} ({}bps)", self.id, bps),
            (None, None) => write!(f, "{}", self.id),
        }
    }
}

/// Traversal order over a run of chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Chronological, starting at the earliest chunk
    Forward,
    /// Reverse chronological, starting at the most recent chunk
    Backward,
}

/// Timing and size of a media chunk, as seen by the rate averager
pub trait ChunkTiming {
    /// Media start time in microseconds
    fn start_us(&self) -> u64;

    /// Media end time in microseconds
    fn end_us(&self) -> u64;

    /// Chunk size in bytes, if known
    fn byte_length(&self) -> Option<u64>;

    /// Media duration in microseconds
    fn duration_us(&self) -> u64 {
        self.end_us().saturating_sub(self.start_us())
    }
}

fn check_timing(start_us: u64, end_us: u64) -> Result<()> {
    if end_us > start_us {
        Ok(())
    } else {
        Err(Error::InvalidChunkTiming { start_us, end_us })
    }
}

/// An upcoming segment from a track's lookahead sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SegmentRecord")]
pub struct SegmentDescriptor {
    start_us: u64,
    end_us: u64,
    byte_length: Option<u64>,
}

impl SegmentDescriptor {
    /// Create a segment descriptor; `end_us` must be after `start_us`
    pub fn new(start_us: u64, end_us: u64, byte_length: Option<u64>) -> Result<Self> {
        check_timing(start_us, end_us)?;
        Ok(Self {
            start_us,
            end_us,
            byte_length,
        })
    }
}

impl ChunkTiming for SegmentDescriptor {
    fn start_us(&self) -> u64 {
        self.start_us
    }

    fn end_us(&self) -> u64 {
        self.end_us
    }

    fn byte_length(&self) -> Option<u64> {
        self.byte_length
    }
}

#[derive(Deserialize)]
struct SegmentRecord {
    start_us: u64,
    end_us: u64,
    #[serde(default)]
    byte_length: Option<u64>,
}

impl TryFrom<SegmentRecord> for SegmentDescriptor {
    type Error = Error;

    fn try_from(record: SegmentRecord) -> Result<Self> {
        Self::new(record.start_us, record.end_us, record.byte_length)
    }
}

/// A downloaded chunk from the loader's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HistoryRecord")]
pub struct HistoryEntry {
    format: Format,
    start_us: u64,
    end_us: u64,
    byte_length: Option<u64>,
}

impl HistoryEntry {
    /// Create a history entry; `end_us` must be after `start_us`
    pub fn new(
        format: Format,
        start_us: u64,
        end_us: u64,
        byte_length: Option<u64>,
    ) -> Result<Self> {
        check_timing(start_us, end_us)?;
        Ok(Self {
            format,
            start_us,
            end_us,
            byte_length,
        })
    }

    /// Format the chunk was downloaded in
    pub fn format(&self) -> &Format {
        &self.format
    }
}

impl ChunkTiming for HistoryEntry {
    fn start_us(&self) -> u64 {
        self.start_us
    }

    fn end_us(&self) -> u64 {
        self.end_us
    }

    fn byte_length(&self) -> Option<u64> {
        self.byte_length
    }
}

#[derive(Deserialize)]
struct HistoryRecord {
    format: Format,
    start_us: u64,
    end_us: u64,
    #[serde(default)]
    byte_length: Option<u64>,
}

impl TryFrom<HistoryRecord> for HistoryEntry {
    type Error = Error;

    fn try_from(record: HistoryRecord) -> Result<Self> {
        Self::new(record.format, record.start_us, record.end_us, record.byte_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_identity() {
        let a = Format::with_bitrate(10);
        let b = Format::with_bitrate(10);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert!(a.is_same_variant(&a.clone().labeled("360p")));
    }

    #[test]
    fn test_format_display() {
        let format = Format::with_bitrate(800_000).labeled("360p");
        assert_eq!(format.to_string(), "360p (800000bps)");
        assert_eq!(Format::without_bitrate().labeled("audio").to_string(), "audio");
    }

    #[test]
    fn test_segment_rejects_empty_span() {
        assert!(SegmentDescriptor::new(5, 5, Some(10)).is_err());
        assert!(SegmentDescriptor::new(6, 5, Some(10)).is_err());

        let segment = SegmentDescriptor::new(5, 15, None).unwrap();
        assert_eq!(segment.duration_us(), 10);
        assert_eq!(segment.byte_length(), None);
    }

    #[test]
    fn test_history_entry_rejects_empty_span() {
        let err = HistoryEntry::new(Format::with_bitrate(10), 20, 10, Some(1)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CHUNK_TIMING");
    }

    #[test]
    fn test_segment_deserialize_validates() {
        let segment: SegmentDescriptor =
            serde_json::from_str(r#"{"start_us": 0, "end_us": 5000000, "byte_length": 10}"#)
                .unwrap();
        assert_eq!(segment.duration_us(), 5_000_000);
        assert_eq!(segment.byte_length(), Some(10));

        let unknown: SegmentDescriptor =
            serde_json::from_str(r#"{"start_us": 0, "end_us": 1}"#).unwrap();
        assert_eq!(unknown.byte_length(), None);

        let invalid = serde_json::from_str::<SegmentDescriptor>(r#"{"start_us": 3, "end_us": 1}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_history_entry_roundtrip_keeps_identity() {
        let format = Format::with_bitrate(10);
        let entry = HistoryEntry::new(format.clone(), 0, 10, Some(4)).unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.format(), &format);
        assert_eq!(parsed, entry);
    }
}
