//! The emitted simulation record

use crate::error::{AppError, Result};
use crate::models::{Insights, RecordNumber, SimulationParams};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One simulation record, serialized with camelCase field names in this order.
///
/// Loading only checks JSON types, so a record read back from a file is
/// echoed exactly as it was written, fractions and timestamp text included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResults {
    pub block_count: RecordNumber,
    pub parallelism: RecordNumber,
    pub users: RecordNumber,
    pub tx_per_user: RecordNumber,
    pub p95_latency_ms: RecordNumber,
    pub utxo_lag_ms: RecordNumber,
    pub websocket_errors: RecordNumber,
    pub transaction_conflicts: RecordNumber,
    pub failed_jobs: RecordNumber,
    /// Generation time; simulated runs use [`format_timestamp`]
    pub timestamp: String,
}

/// Render a timestamp the way simulated records carry it, e.g. `2026-10-19T08:30:00.123456+00:00`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
}

impl SimulationResults {
    /// Recover the input parameters echoed in this record, when all four are integers
    pub fn params(&self) -> Option<SimulationParams> {
        Some(SimulationParams::new(
            self.block_count.as_i64()?,
            self.parallelism.as_i64()?,
            self.users.as_i64()?,
            self.tx_per_user.as_i64()?,
        ))
    }

    /// Parse a record previously emitted on stdout.
    ///
    /// Malformed JSON and schema mismatches (a missing field, a non-number
    /// metric, a non-string timestamp) are both parse errors, reported separately.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text.trim()).map_err(|e| {
            AppError::parse(format!("Unable to parse simulation JSON output: {}", e))
        })?;

        if !value.is_object() {
            return Err(AppError::parse("Simulation output schema invalid: expected a JSON object"));
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::parse(format!("Simulation output schema invalid: {}", e)))
    }
}

/// A record plus the optional analysis produced for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub results: SimulationResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
}

impl SimulationReport {
    pub fn new(results: SimulationResults) -> Self {
        Self {
            results,
            insights: None,
        }
    }

    pub fn with_insights(mut self, insights: Insights) -> Self {
        self.insights = Some(insights);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> SimulationResults {
        SimulationResults {
            block_count: 1000.into(),
            parallelism: 5.into(),
            users: 500.into(),
            tx_per_user: 20.into(),
            p95_latency_ms: 620.into(),
            utxo_lag_ms: 310.into(),
            websocket_errors: 7.into(),
            transaction_conflicts: 4.into(),
            failed_jobs: 15.into(),
            timestamp: format_timestamp(&Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()),
        }
    }

    fn record_with(field: &str, value: &str) -> String {
        let mut json = serde_json::to_value(sample()).unwrap();
        json[field] = serde_json::from_str(value).unwrap();
        json.to_string()
    }

    #[test]
    fn test_field_names_and_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let keys = [
            "\"blockCount\"",
            "\"parallelism\"",
            "\"users\"",
            "\"txPerUser\"",
            "\"p95LatencyMs\"",
            "\"utxoLagMs\"",
            "\"websocketErrors\"",
            "\"transactionConflicts\"",
            "\"failedJobs\"",
            "\"timestamp\"",
        ];

        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "fields out of order: {}", json);
    }

    #[test]
    fn test_field_types() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 10);

        for (key, field) in object {
            if key == "timestamp" {
                assert!(field.is_string());
            } else {
                assert!(field.is_i64(), "{} should be an integer", key);
            }
        }
    }

    #[test]
    fn test_timestamp_format() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["timestamp"], "2026-10-19T08:30:00.000000+00:00");
    }

    #[test]
    fn test_from_json_accepts_emitted_record() {
        let original = sample();
        let json = serde_json::to_string(&original).unwrap();
        let parsed = SimulationResults::from_json(&json).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.params(), Some(SimulationParams::new(1000, 5, 500, 20)));
    }

    #[test]
    fn test_from_json_keeps_timestamp_text() {
        for stamp in ["2026-10-19T10:30:00+02:00", "2026-01-01", "yesterday"] {
            let json = record_with("timestamp", &format!("\"{}\"", stamp));
            let parsed = SimulationResults::from_json(&json).unwrap();
            assert_eq!(parsed.timestamp, stamp);

            let echoed = serde_json::to_value(&parsed).unwrap();
            assert_eq!(echoed["timestamp"], stamp);
        }
    }

    #[test]
    fn test_from_json_accepts_any_number() {
        let parsed = SimulationResults::from_json(&record_with("p95LatencyMs", "300.5")).unwrap();
        assert_eq!(parsed.p95_latency_ms.to_string(), "300.5");
        assert!(serde_json::to_string(&parsed).unwrap().contains("\"p95LatencyMs\":300.5,"));

        let parsed = SimulationResults::from_json(&record_with("users", "-3")).unwrap();
        assert_eq!(parsed.users.as_i64(), Some(-3));

        // Echoed inputs that are not integers have no parameter set
        let parsed = SimulationResults::from_json(&record_with("blockCount", "1.5")).unwrap();
        assert_eq!(parsed.params(), None);
    }

    #[test]
    fn test_from_json_ignores_extra_fields() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["extra"] = serde_json::json!(true);
        assert_eq!(SimulationResults::from_json(&value.to_string()).unwrap(), sample());
    }

    #[test]
    fn test_from_json_rejects_invalid_json() {
        let err = SimulationResults::from_json("not json").unwrap_err();
        assert_eq!(err.category(), "PARSE");
        assert!(err.to_string().contains("Unable to parse simulation JSON output"));
    }

    #[test]
    fn test_from_json_rejects_schema_mismatch() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value.as_object_mut().unwrap().remove("failedJobs");
        let err = SimulationResults::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("Simulation output schema invalid"));

        assert!(SimulationResults::from_json(&record_with("users", "\"500\"")).is_err());
        assert!(SimulationResults::from_json(&record_with("utxoLagMs", "null")).is_err());
        assert!(SimulationResults::from_json(&record_with("timestamp", "12345")).is_err());

        let err = SimulationResults::from_json("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_report_envelope_skips_missing_insights() {
        let report = SimulationReport::new(sample());
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("results").is_some());
        assert!(value.get("insights").is_none());
    }
}
