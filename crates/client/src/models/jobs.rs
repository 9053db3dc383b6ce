//! Job models.

use serde::{Deserialize, Serialize};

/// One job as returned by `GET {endpoint}apps/{appid}/jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    /// Opaque job identifier, unique within the account.
    #[serde(rename = "jobid")]
    pub job_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Whether the job is currently collecting data.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A job as held in a metadata snapshot.
#[derive(Debug, Clone)]
pub struct Job {
    /// Opaque job identifier.
    pub job_id: String,
    /// Display name.
    pub name: String,
}

impl From<JobRecord> for Job {
    fn from(record: JobRecord) -> Self {
        Self {
            job_id: record.job_id,
            name: record.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_job_record() {
        let json = r#"{"jobid": "j1", "name": "US East probe", "active": false}"#;
        let record: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.job_id, "j1");
        assert_eq!(record.name, "US East probe");
        assert!(!record.active);
    }

    #[test]
    fn test_job_from_record_drops_active_flag() {
        let record = JobRecord {
            job_id: "j2".into(),
            name: "EU probe".into(),
            active: true,
        };
        let job = Job::from(record);
        assert_eq!(job.job_id, "j2");
        assert_eq!(job.name, "EU probe");
    }
}
