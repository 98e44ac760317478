use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainStatus {
    Secure,
    Tampered,
}

impl std::fmt::Display for ChainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainStatus::Secure => write!(f, "secure"),
            ChainStatus::Tampered => write!(f, "tampered"),
        }
    }
}

/// Which check a record failed during chain validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueReason {
    /// Stored hash differs from the hash of the stored fields
    HashMismatch,
    /// Stored `prev_hash` differs from the hash of the preceding record
    LinkMismatch,
    LinkAndHashMismatch,
    /// Stored fields can no longer be decoded or canonically encoded
    Unencodable,
}

impl IssueReason {
    pub fn from_checks(link_ok: bool, hash_ok: bool) -> Option<Self> {
        match (link_ok, hash_ok) {
            (true, true) => None,
            (true, false) => Some(IssueReason::HashMismatch),
            (false, true) => Some(IssueReason::LinkMismatch),
            (false, false) => Some(IssueReason::LinkAndHashMismatch),
        }
    }

    /// The stored hash was recomputed and did not match
    pub fn is_hash_failure(&self) -> bool {
        matches!(self, IssueReason::HashMismatch | IssueReason::LinkAndHashMismatch)
    }

    pub fn is_link_failure(&self) -> bool {
        matches!(self, IssueReason::LinkMismatch | IssueReason::LinkAndHashMismatch)
    }
}

impl std::fmt::Display for IssueReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueReason::HashMismatch => write!(f, "hash mismatch"),
            IssueReason::LinkMismatch => write!(f, "link mismatch"),
            IssueReason::LinkAndHashMismatch => write!(f, "link and hash mismatch"),
            IssueReason::Unencodable => write!(f, "unencodable record"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityIssue {
    pub record_id: Uuid,
    pub sequence: i64,
    pub reason: IssueReason,
}

/// Tamper report over the whole chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainReport {
    pub overall_status: ChainStatus,
    pub records_checked: usize,
    /// Stored hash of the last record, `None` for an empty chain
    pub tail_hash: Option<String>,
    pub issues: Vec<IntegrityIssue>,
}

impl ChainReport {
    pub fn new(records_checked: usize, tail_hash: Option<String>, issues: Vec<IntegrityIssue>) -> Self {
        let overall_status = if issues.is_empty() {
            ChainStatus::Secure
        } else {
            ChainStatus::Tampered
        };
        Self {
            overall_status,
            records_checked,
            tail_hash,
            issues,
        }
    }

    pub fn is_secure(&self) -> bool {
        self.overall_status == ChainStatus::Secure
    }

    pub fn issue_for(&self, record_id: Uuid) -> Option<&IntegrityIssue> {
        self.issues.iter().find(|issue| issue.record_id == record_id)
    }
}

/// Verification result for a single record, in the context of its chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVerification {
    pub record_id: Uuid,
    pub chain_status: ChainStatus,
    pub issue: Option<IntegrityIssue>,
}

impl RecordVerification {
    pub fn is_record_intact(&self) -> bool {
        self.issue.is_none()
    }
}
