//! Query parameter and time-series models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which family of metrics a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Performance,
    Availability,
}

impl MetricType {
    /// Value as it appears in query URLs and labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Availability => "availability",
        }
    }
}

/// Aggregation applied by the API across samples in each interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Avg,
    Max,
    Min,
    P50,
    P75,
    P90,
    P95,
    P99,
}

impl Aggregation {
    /// Value of the `agg` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Max => "max",
            Self::Min => "min",
            Self::P50 => "p50",
            Self::P75 => "p75",
            Self::P90 => "p90",
            Self::P95 => "p95",
            Self::P99 => "p99",
        }
    }
}

/// Half-open time window of a query, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            from: DateTime::UNIX_EPOCH,
            to: DateTime::UNIX_EPOCH,
        }
    }
}

/// One time-series query as issued by a host.
///
/// The serialized shape mirrors the JSON a host hands over per query; the
/// time range and point budget arrive out of band and are attached by the
/// host before execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Application the job belongs to.
    #[serde(rename = "appid", default)]
    pub app_id: String,
    /// Job whose series is requested.
    #[serde(rename = "jobid", default)]
    pub job_id: String,
    /// Metric family. Absent while the user is still composing the query.
    #[serde(rename = "metricType", default)]
    pub metric_type: Option<MetricType>,
    /// Optional aggregation, omitted from the URL when absent.
    #[serde(rename = "agg", default)]
    pub aggregation: Option<Aggregation>,
    /// Geographic filter. `None` and `"*"` both mean the global area.
    #[serde(default)]
    pub geo: Option<String>,
    /// ASN filter. `None` and `"*"` both mean no filter.
    #[serde(default)]
    pub asn: Option<String>,
    /// Query window.
    #[serde(skip)]
    pub range: TimeRange,
    /// Maximum number of points the caller can display.
    #[serde(skip)]
    pub max_data_points: usize,
}

impl QuerySpec {
    /// Whether the query is complete enough to execute.
    ///
    /// Application, job, metric type and aggregation must all be chosen.
    /// Hosts send partially filled queries while the user is editing; those
    /// resolve to an empty result instead of an error.
    pub fn is_executable(&self) -> bool {
        !self.app_id.is_empty()
            && !self.job_id.is_empty()
            && self.metric_type.is_some()
            && self.aggregation.is_some()
    }
}

/// One decoded sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Metric value for the queried job.
    pub value: f64,
}

/// Columnar time series, aligned by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    /// Timestamps in seconds since the Unix epoch, ascending.
    pub times: Vec<i64>,
    /// Values, one per timestamp.
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series from row-oriented points.
    pub fn from_points(points: impl IntoIterator<Item = DataPoint>) -> Self {
        let mut series = Self::default();
        for point in points {
            series.times.push(point.timestamp);
            series.values.push(point.value);
        }
        series
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_query() {
        let json = r#"{
            "appid": "a1",
            "jobid": "j1",
            "metricType": "performance",
            "agg": "p99",
            "geo": "US",
            "asn": "1299"
        }"#;
        let spec: QuerySpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.app_id, "a1");
        assert_eq!(spec.job_id, "j1");
        assert_eq!(spec.metric_type, Some(MetricType::Performance));
        assert_eq!(spec.aggregation, Some(Aggregation::P99));
        assert_eq!(spec.geo.as_deref(), Some("US"));
        assert_eq!(spec.asn.as_deref(), Some("1299"));
        assert!(spec.is_executable());
    }

    #[test]
    fn test_partial_query_is_not_executable() {
        let spec: QuerySpec = serde_json::from_str(r#"{"appid": "a1"}"#).unwrap();
        assert!(!spec.is_executable());

        let spec: QuerySpec =
            serde_json::from_str(r#"{"appid": "a1", "jobid": "j1"}"#).unwrap();
        assert!(!spec.is_executable(), "metric type still missing");

        let spec: QuerySpec = serde_json::from_str(
            r#"{"appid": "a1", "jobid": "j1", "metricType": "performance"}"#,
        )
        .unwrap();
        assert!(!spec.is_executable(), "aggregation still missing");
    }

    #[test]
    fn test_aggregation_param_values() {
        assert_eq!(Aggregation::P99.as_str(), "p99");
        assert_eq!(Aggregation::Avg.as_str(), "avg");
        let agg: Aggregation = serde_json::from_str(r#""p50""#).unwrap();
        assert_eq!(agg, Aggregation::P50);
    }

    #[test]
    fn test_time_series_from_points() {
        let series = TimeSeries::from_points([
            DataPoint {
                timestamp: 100,
                value: 1.5,
            },
            DataPoint {
                timestamp: 200,
                value: 2.5,
            },
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.times, vec![100, 200]);
        assert_eq!(series.values, vec![1.5, 2.5]);
        assert!(!series.is_empty());
    }
}
