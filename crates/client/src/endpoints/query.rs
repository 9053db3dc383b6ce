//! Time-series query endpoint.

use std::collections::HashMap;

use secrecy::SecretString;
use tracing::{debug, instrument};
use url::Url;

use crate::endpoints::{error_for_status, join_url, send_get};
use crate::error::{ClientError, Result};
use crate::models::query::{DataPoint, MetricType, QuerySpec, TimeSeries};

/// JSON field carrying the sample timestamp in each row.
const TIMESTAMP_FIELD: &str = "timestamp";

/// Build the time-series query URL for a spec.
///
/// Performance metrics go to `query/performance/time`, everything else to
/// `query/availability/time`. `start`, `end` and `jobs` are always present;
/// `agg` only when an aggregation was chosen. A missing or wildcard geo
/// selects the global area, and a wildcard ASN is dropped entirely.
pub fn build_query_url(endpoint: &str, spec: &QuerySpec) -> Result<Url> {
    let path = match spec.metric_type {
        Some(MetricType::Performance) => "query/performance/time",
        _ => "query/availability/time",
    };
    let mut url = join_url(endpoint, path)?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("start", &spec.range.from.timestamp().to_string())
            .append_pair("end", &spec.range.to.timestamp().to_string())
            .append_pair("jobs", &spec.job_id);

        if let Some(agg) = spec.aggregation {
            pairs.append_pair("agg", agg.as_str());
        }

        match spec.geo.as_deref() {
            None | Some("*") | Some("") => {
                pairs.append_pair("area", "GLOBAL");
            }
            Some(geo) => {
                pairs.append_pair("area", geo);
            }
        }

        if let Some(asn) = spec.asn.as_deref() {
            if !asn.is_empty() && asn != "*" {
                pairs.append_pair("asn", asn);
            }
        }
    }

    Ok(url)
}

/// Fetch the time series for an executable query.
///
/// The response is a JSON array of rows keyed by field name; each row holds
/// a `timestamp` plus one value column per job. Rows beyond the caller's
/// point budget are dropped from the front so the newest samples survive.
#[instrument(skip(client, api_key, spec), fields(job_id = %spec.job_id))]
pub async fn fetch_time_series(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &SecretString,
    spec: &QuerySpec,
) -> Result<TimeSeries> {
    let url = build_query_url(endpoint, spec)?;
    let response = send_get(client, &url, api_key).await?;

    let status = response.status();
    if status == reqwest::StatusCode::BAD_REQUEST {
        return Err(ClientError::DataRetrieval {
            url: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(error_for_status(response).await);
    }

    let rows: Vec<HashMap<String, f64>> = response
        .json()
        .await
        .map_err(|e| ClientError::MalformedResponse(format!("time series: {e}")))?;

    if rows.is_empty() {
        return Err(ClientError::NoDataFound);
    }

    let kept = window(&rows, spec.max_data_points);
    let mut points = Vec::with_capacity(kept.len());
    for row in kept {
        let timestamp = row.get(TIMESTAMP_FIELD).ok_or_else(|| {
            ClientError::MalformedResponse("time-series row without a timestamp".to_string())
        })?;
        let value = match row.get(spec.job_id.as_str()) {
            Some(v) => *v,
            None => {
                debug!(job_id = %spec.job_id, "row carries no value for job, recording 0");
                0.0
            }
        };
        points.push(DataPoint {
            timestamp: *timestamp as i64,
            value,
        });
    }

    Ok(TimeSeries::from_points(points))
}

/// Keep at most `max` trailing rows.
fn window<T>(rows: &[T], max: usize) -> &[T] {
    &rows[rows.len().saturating_sub(max)..]
}
