//! CLI command implementations

use crate::output::{format_estimates, EstimateRow};
use crate::scenario::{ResolvedScenario, Scenario};
use anyhow::Context;
use kino_abr::{BitrateEstimate, BitrateEstimator, EstimatorConfig};
use std::path::Path;
use tracing::{debug, info};

/// Load a scenario, applying a separate config file when given
async fn load(scenario: &Path, config: Option<&Path>) -> anyhow::Result<ResolvedScenario> {
    let json = tokio::fs::read_to_string(scenario)
        .await
        .with_context(|| format!("Failed to read scenario {}", scenario.display()))?;
    let mut resolved = Scenario::from_json(&json)?.resolve()?;

    if let Some(path) = config {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        resolved.config = EstimatorConfig::from_json(&json)
            .with_context(|| format!("Invalid config {}", path.display()))?;
    }

    debug!(
        variants = resolved.formats.len(),
        history = resolved.history.len(),
        "Scenario loaded"
    );
    Ok(resolved)
}

fn rows(scenario: &ResolvedScenario, estimates: &[BitrateEstimate]) -> Vec<EstimateRow> {
    scenario
        .names
        .iter()
        .zip(&scenario.formats)
        .zip(estimates)
        .map(|((name, format), estimate)| EstimateRow {
            variant: name.clone(),
            nominal_bps: format.nominal_bitrate(),
            estimate_bps: *estimate,
        })
        .collect()
}

/// Estimate from lookahead
pub async fn future(scenario: &Path, config: Option<&Path>, format: &str) -> anyhow::Result<()> {
    let scenario = load(scenario, config).await?;
    let estimator = BitrateEstimator::new(scenario.config.clone())?;

    let estimates = estimator.future(&scenario.sequences, &scenario.formats)?;
    info!(
        known = estimates.iter().filter(|e| e.is_some()).count(),
        "Future info estimated"
    );

    println!(
        "{}",
        format_estimates("Future info", &rows(&scenario, &estimates), format)
    );
    Ok(())
}

/// Estimate from download history
pub async fn past(scenario: &Path, config: Option<&Path>, format: &str) -> anyhow::Result<()> {
    let scenario = load(scenario, config).await?;
    let estimator = BitrateEstimator::new(scenario.config.clone())?;

    let estimates = estimator.past(&scenario.history, &scenario.formats);
    info!(
        known = estimates.iter().filter(|e| e.is_some()).count(),
        "Past info estimated"
    );

    println!(
        "{}",
        format_estimates("Past info", &rows(&scenario, &estimates), format)
    );
    Ok(())
}

/// Estimate from lookahead with history fallback
pub async fn combined(
    scenario: &Path,
    config: Option<&Path>,
    lower_bound: bool,
    format: &str,
) -> anyhow::Result<()> {
    let mut scenario = load(scenario, config).await?;
    if lower_bound {
        scenario.config.use_nominal_as_lower_bound = true;
    }
    let estimator = BitrateEstimator::new(scenario.config.clone())?;

    let estimates =
        estimator.combined(&scenario.formats, &scenario.history, &scenario.sequences)?;
    info!(
        known = estimates.iter().filter(|e| e.is_some()).count(),
        lower_bound = scenario.config.use_nominal_as_lower_bound,
        "Past and future info estimated"
    );

    println!(
        "{}",
        format_estimates("Past and future info", &rows(&scenario, &estimates), format)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/scenario.json"), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read scenario"));
    }

    #[test]
    fn test_rows_pair_names_and_estimates() {
        let scenario = Scenario::from_json(
            r#"{"formats": [{"name": "low", "bitrate": 10}, {"name": "high"}]}"#,
        )
        .unwrap()
        .resolve()
        .unwrap();

        let rows = rows(&scenario, &[Some(8), None]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].variant, "low");
        assert_eq!(rows[0].nominal_bps, Some(10));
        assert_eq!(rows[1].estimate_bps, None);
    }
}
