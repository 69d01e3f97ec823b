//! Request and response shapes for the match endpoints.
//!
//! Every field is optional on the wire. Missing and `null` values collapse to
//! their defaults here so the ranking code never sees an absent value.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

/// One rankable record: a job posting or a candidate profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchItem {
    /// Echoed back verbatim; `null` when absent. Any JSON number is accepted.
    #[serde(default)]
    pub id: Option<Number>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// POST /match/jobs body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobMatchRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidate_profile: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<MatchItem>,
}

/// POST /match/candidates body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateMatchRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidates: Vec<MatchItem>,
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ────────────────────────────────────────────────────────────────────────────
// Responses
// ────────────────────────────────────────────────────────────────────────────

/// Which collection a request ranks. Decides the id field name in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTarget {
    Jobs,
    Candidates,
}

impl MatchTarget {
    pub fn label(self) -> &'static str {
        match self {
            MatchTarget::Jobs => "jobs",
            MatchTarget::Candidates => "candidates",
        }
    }
}

/// A single ranked item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchResult {
    Job {
        #[serde(rename = "jobId")]
        job_id: Option<Number>,
        score: f64,
    },
    Candidate {
        #[serde(rename = "candidateId")]
        candidate_id: Option<Number>,
        score: f64,
    },
}

impl MatchResult {
    pub fn new(target: MatchTarget, id: Option<Number>, score: f64) -> Self {
        match target {
            MatchTarget::Jobs => MatchResult::Job { job_id: id, score },
            MatchTarget::Candidates => MatchResult::Candidate {
                candidate_id: id,
                score,
            },
        }
    }

    #[cfg(test)]
    pub fn id(&self) -> Option<&Number> {
        match self {
            MatchResult::Job { job_id, .. } => job_id.as_ref(),
            MatchResult::Candidate { candidate_id, .. } => candidate_id.as_ref(),
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            MatchResult::Job { score, .. } | MatchResult::Candidate { score, .. } => *score,
        }
    }
}

/// Ranked results, descending by score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
}
