//! Configured entry point for bitrate estimation

use crate::{
    combined::bitrates_using_past_and_future_info,
    config::EstimatorConfig,
    future::bitrates_using_future_info,
    past::bitrates_using_past_info,
    types::{BitrateEstimate, Format, HistoryEntry, SegmentDescriptor},
    Result,
};
use tracing::debug;

/// Bitrate estimator bound to one configuration.
///
/// Holds no state besides its configuration, so one instance can serve
/// any number of tracks and threads.
#[derive(Debug, Clone, Default)]
pub struct BitrateEstimator {
    config: EstimatorConfig,
}

impl BitrateEstimator {
    /// Create an estimator, rejecting out-of-range configuration
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            future_window_ms = config.max_future_window.as_millis() as u64,
            past_window_ms = config.max_past_window.as_millis() as u64,
            lower_bound = config.use_nominal_as_lower_bound,
            "Bitrate estimator configured"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Per-track estimates from lookahead sequences
    pub fn future<S>(&self, sequences: &[S], formats: &[Format]) -> Result<Vec<BitrateEstimate>>
    where
        S: AsRef<[SegmentDescriptor]>,
    {
        bitrates_using_future_info(sequences, formats, self.config.max_future_window_us())
    }

    /// Per-format estimates from download history
    pub fn past(&self, history: &[HistoryEntry], formats: &[Format]) -> Vec<BitrateEstimate> {
        bitrates_using_past_info(history, formats, self.config.max_past_window_us())
    }

    /// Per-track estimates from lookahead, falling back to history
    pub fn combined<S>(
        &self,
        formats: &[Format],
        history: &[HistoryEntry],
        sequences: &[S],
    ) -> Result<Vec<BitrateEstimate>>
    where
        S: AsRef<[SegmentDescriptor]>,
    {
        bitrates_using_past_and_future_info(
            formats,
            history,
            self.config.max_past_window_us(),
            sequences,
            self.config.max_future_window_us(),
            self.config.use_nominal_as_lower_bound,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SEC: u64 = 1_000_000;

    #[test]
    fn test_rejects_invalid_config() {
        let config = EstimatorConfig {
            max_past_window: Duration::MAX,
            ..Default::default()
        };
        assert!(BitrateEstimator::new(config).is_err());
    }

    #[test]
    fn test_uses_configured_windows() {
        let format = Format::with_bitrate(10);
        let sequences = vec![vec![
            SegmentDescriptor::new(0, 5 * SEC, Some(10)).unwrap(),
            SegmentDescriptor::new(5 * SEC, 15 * SEC, Some(1000)).unwrap(),
        ]];

        let wide = BitrateEstimator::default();
        assert_eq!(
            wide.future(&sequences, std::slice::from_ref(&format)).unwrap(),
            vec![Some(539)]
        );

        let narrow = BitrateEstimator::new(EstimatorConfig {
            max_future_window: Duration::from_secs(5),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(narrow.future(&sequences, &[format]).unwrap(), vec![Some(16)]);
    }

    #[test]
    fn test_estimator_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<BitrateEstimator>();
    }
}
