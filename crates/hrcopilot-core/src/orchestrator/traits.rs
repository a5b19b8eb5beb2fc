//! External data collaborators consumed by the structured handlers.
//!
//! The surrounding application owns employee, leave, and recruitment records;
//! handlers see them only through these traits as plain aggregates. Every
//! accessor distinguishes "record not found" from "backend unavailable" so
//! the handler tier can downgrade either into a continue-to-next-tier signal.

use serde::{Deserialize, Serialize};

/// Failure modes of the external data accessors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,
    /// The backing store raised or timed out.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Aggregates returned by the accessors
// ---------------------------------------------------------------------------

/// One historical leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveEntry {
    pub start_date: String,
    pub end_date: String,
    pub leave_type: String,
    pub status: String,
    pub days: u32,
}

/// Yearly leave position for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveSummary {
    pub annual_quota: u32,
    pub used_days: u32,
    pub remaining_days: u32,
    #[serde(default)]
    pub recent: Vec<LeaveEntry>,
}

/// Employee profile as shown back to its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub full_name: String,
    #[serde(default)]
    pub badge_id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub job_position: Option<String>,
    #[serde(default)]
    pub joined: Option<String>,
}

/// One row of the employee roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub full_name: String,
    #[serde(default)]
    pub badge_id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub job_position: Option<String>,
}

/// Candidate count for one recruitment stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageCount {
    pub stage: String,
    pub count: u32,
}

/// One active recruitment with its candidate distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitmentDigest {
    pub job_position: String,
    #[serde(default)]
    pub department: Option<String>,
    pub total_candidates: u32,
    pub opened: String,
    #[serde(default)]
    pub stage_breakdown: Vec<StageCount>,
}

/// All active recruitments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitmentSummary {
    pub total_active: u32,
    #[serde(default)]
    pub recruitments: Vec<RecruitmentDigest>,
}

/// Applicant counts over the standard reporting windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantCounts {
    pub today: u32,
    pub this_week: u32,
    pub this_month: u32,
    #[serde(default)]
    pub stage_breakdown: Vec<StageCount>,
}

// ---------------------------------------------------------------------------
// Accessor traits
// ---------------------------------------------------------------------------

/// Employee master-data accessor.
pub trait WorkforceDirectory: Send + Sync {
    /// Profile for one employee by identity.
    fn profile(&self, identity: &str) -> Result<EmployeeProfile, DirectoryError>;

    /// Active roster, optionally restricted to one department.
    fn roster(&self, department: Option<&str>) -> Result<Vec<RosterEntry>, DirectoryError>;
}

/// Leave-record accessor.
pub trait LeaveLedger: Send + Sync {
    /// Current-year leave position for one employee.
    fn leave_summary(&self, identity: &str) -> Result<LeaveSummary, DirectoryError>;
}

/// Recruitment-record accessor.
pub trait RecruitmentBoard: Send + Sync {
    /// All currently active recruitments.
    fn active_recruitments(&self) -> Result<RecruitmentSummary, DirectoryError>;

    /// Applicant counts for today / this week / this month.
    fn applicant_counts(&self) -> Result<ApplicantCounts, DirectoryError>;
}

// ---------------------------------------------------------------------------
// Test doubles shared by handler and pipeline tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// In-memory collaborators with fixed HR data for pipeline tests.
    pub struct MockBackend {
        pub leave_available: bool,
    }

    impl Default for MockBackend {
        fn default() -> Self {
            Self {
                leave_available: true,
            }
        }
    }

    impl WorkforceDirectory for MockBackend {
        fn profile(&self, identity: &str) -> Result<EmployeeProfile, DirectoryError> {
            if identity == "missing" {
                return Err(DirectoryError::NotFound);
            }
            Ok(EmployeeProfile {
                full_name: "Budi Santoso".into(),
                badge_id: Some("EMP-001".into()),
                email: "budi@example.com".into(),
                phone: Some("0812000111".into()),
                department: Some("Engineering".into()),
                job_position: Some("Software Engineer".into()),
                joined: Some("01/02/2023".into()),
            })
        }

        fn roster(&self, department: Option<&str>) -> Result<Vec<RosterEntry>, DirectoryError> {
            let all = vec![
                RosterEntry {
                    full_name: "Budi Santoso".into(),
                    badge_id: Some("EMP-001".into()),
                    email: "budi@example.com".into(),
                    department: Some("Engineering".into()),
                    job_position: Some("Software Engineer".into()),
                },
                RosterEntry {
                    full_name: "Siti Rahma".into(),
                    badge_id: Some("EMP-002".into()),
                    email: "siti@example.com".into(),
                    department: Some("Finance".into()),
                    job_position: Some("Accountant".into()),
                },
            ];
            Ok(match department {
                Some(dept) => all
                    .into_iter()
                    .filter(|r| r.department.as_deref() == Some(dept))
                    .collect(),
                None => all,
            })
        }
    }

    impl LeaveLedger for MockBackend {
        fn leave_summary(&self, identity: &str) -> Result<LeaveSummary, DirectoryError> {
            if !self.leave_available {
                return Err(DirectoryError::Unavailable("ledger offline".into()));
            }
            if identity == "missing" {
                return Err(DirectoryError::NotFound);
            }
            Ok(LeaveSummary {
                annual_quota: 12,
                used_days: 3,
                remaining_days: 9,
                recent: vec![LeaveEntry {
                    start_date: "10/03/2025".into(),
                    end_date: "12/03/2025".into(),
                    leave_type: "Annual".into(),
                    status: "approved".into(),
                    days: 3,
                }],
            })
        }
    }

    impl RecruitmentBoard for MockBackend {
        fn active_recruitments(&self) -> Result<RecruitmentSummary, DirectoryError> {
            Ok(RecruitmentSummary {
                total_active: 1,
                recruitments: vec![RecruitmentDigest {
                    job_position: "Backend Engineer".into(),
                    department: Some("Engineering".into()),
                    total_candidates: 14,
                    opened: "01/07/2025".into(),
                    stage_breakdown: vec![
                        StageCount {
                            stage: "Applied".into(),
                            count: 10,
                        },
                        StageCount {
                            stage: "Interview".into(),
                            count: 4,
                        },
                    ],
                }],
            })
        }

        fn applicant_counts(&self) -> Result<ApplicantCounts, DirectoryError> {
            Ok(ApplicantCounts {
                today: 3,
                this_week: 11,
                this_month: 27,
                stage_breakdown: vec![StageCount {
                    stage: "Applied".into(),
                    count: 20,
                }],
            })
        }
    }
}
