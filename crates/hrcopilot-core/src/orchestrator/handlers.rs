//! Structured intent handlers.
//!
//! One handler per known intent, dispatched through a single match over the
//! `Intent` sum type. The access-policy check is always the first statement:
//! a denied requester causes no collaborator call and terminates the chain.
//! Collaborator failures (not found / unavailable) downgrade to `Continue`
//! so the controller can fall through to federated search.

use super::composer::{ApologyKind, ResponseComposer};
use super::intents::Intent;
use super::traits::{DirectoryError, LeaveLedger, RecruitmentBoard, WorkforceDirectory};
use crate::config::CopilotConfig;
use crate::knowledge::KnowledgeRouter;
use crate::shared::{ChatResponse, CopilotError, Requester, SourceTier};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// External data accessors injected by the surrounding application.
#[derive(Clone)]
pub struct Collaborators {
    pub directory: Arc<dyn WorkforceDirectory>,
    pub leave: Arc<dyn LeaveLedger>,
    pub recruitment: Arc<dyn RecruitmentBoard>,
}

/// Result of the handler tier.
pub enum HandlerOutcome {
    /// Terminal: the response is final (success or denial).
    Done(ChatResponse),
    /// No data for this requester; continue to federated search.
    Continue,
}

/// Downgrade a collaborator failure into the continue signal.
fn downgrade(intent: Intent, err: DirectoryError) -> HandlerOutcome {
    match &err {
        DirectoryError::NotFound => info!(
            target: "copilot::pipeline",
            intent = intent.as_str(),
            "handler found no data; continuing to federated search"
        ),
        DirectoryError::Unavailable(_) => warn!(
            target: "copilot::pipeline",
            intent = intent.as_str(),
            error = %CopilotError::Upstream(err.clone()),
            "upstream accessor unavailable; continuing to federated search"
        ),
    }
    HandlerOutcome::Continue
}

/// Dispatch the classified intent to its handler.
pub fn handle_intent(
    intent: Intent,
    text: &str,
    requester: &Requester,
    collaborators: &Collaborators,
    router: &KnowledgeRouter,
    composer: &ResponseComposer,
    config: &CopilotConfig,
) -> HandlerOutcome {
    // Authorization gate first: nothing is fetched for a denied requester.
    if !intent.access_policy().allows(requester.role) {
        info!(
            target: "copilot::pipeline",
            intent = intent.as_str(),
            error = %CopilotError::AccessDenied(requester.role.as_str()),
            "access-gated intent denied"
        );
        let text = composer.apology(ApologyKind::NoAccess, &requester.identity);
        return HandlerOutcome::Done(ChatResponse::failure(text, SourceTier::Handler));
    }

    match intent {
        Intent::LeaveBalance => leave_balance(requester, collaborators, config),
        Intent::HiringProcess => hiring_process(collaborators),
        Intent::ApplicantCount => applicant_count(collaborators),
        Intent::EmployeeInfo => employee_info(requester, collaborators),
        Intent::EmployeeList => employee_list(requester, collaborators),
        Intent::PayrollInquiry => payroll_inquiry(requester),
        Intent::AttendanceCheck => attendance_check(requester),
        Intent::PerformanceReview => performance_review(requester),
        Intent::CompanyPolicy => company_policy(text, requester, router),
        Intent::TrainingSchedule => training_schedule(requester),
        Intent::Greeting => greeting(requester, composer),
        Intent::Help => help(requester),
    }
}

fn leave_balance(
    requester: &Requester,
    collaborators: &Collaborators,
    config: &CopilotConfig,
) -> HandlerOutcome {
    let summary = match collaborators.leave.leave_summary(&requester.identity) {
        Ok(summary) => summary,
        Err(err) => return downgrade(Intent::LeaveBalance, err),
    };
    let quota = if summary.annual_quota > 0 {
        summary.annual_quota
    } else {
        config.annual_leave_quota
    };
    let remaining = summary.remaining_days;
    let text = format!(
        "Halo {}! Jatah tahunan: {} hari, sudah digunakan: {} hari, sisa cuti: {} hari.",
        requester.display_name, quota, summary.used_days, remaining
    );
    let data = json!({
        "employee_name": requester.display_name,
        "annual_quota": quota,
        "used": summary.used_days,
        "remaining": remaining,
        "recent_history": summary.recent,
    });
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn hiring_process(collaborators: &Collaborators) -> HandlerOutcome {
    let summary = match collaborators.recruitment.active_recruitments() {
        Ok(summary) => summary,
        Err(err) => return downgrade(Intent::HiringProcess, err),
    };
    if summary.total_active == 0 {
        return HandlerOutcome::Continue;
    }
    let text = format!(
        "Berikut informasi proses hiring yang sedang aktif ({} rekrutmen).",
        summary.total_active
    );
    let data = json!({
        "total_active_recruitments": summary.total_active,
        "recruitments": summary.recruitments,
    });
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn applicant_count(collaborators: &Collaborators) -> HandlerOutcome {
    let counts = match collaborators.recruitment.applicant_counts() {
        Ok(counts) => counts,
        Err(err) => return downgrade(Intent::ApplicantCount, err),
    };
    let text = format!(
        "Statistik pelamar: hari ini: {}, minggu ini: {}, bulan ini: {}.",
        counts.today, counts.this_week, counts.this_month
    );
    let data = json!({
        "today": counts.today,
        "week": counts.this_week,
        "month": counts.this_month,
        "stage_breakdown": counts.stage_breakdown,
    });
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn employee_info(requester: &Requester, collaborators: &Collaborators) -> HandlerOutcome {
    let profile = match collaborators.directory.profile(&requester.identity) {
        Ok(profile) => profile,
        Err(err) => return downgrade(Intent::EmployeeInfo, err),
    };
    let text = format!("Berikut informasi profil Anda, {}:", profile.full_name);
    let data = serde_json::to_value(&profile).unwrap_or_else(|_| json!({}));
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn employee_list(requester: &Requester, collaborators: &Collaborators) -> HandlerOutcome {
    // Staff see the whole roster; everyone else only their own department.
    let (scope, limited) = if requester.role.is_staff() {
        (None, false)
    } else {
        let profile = match collaborators.directory.profile(&requester.identity) {
            Ok(profile) => profile,
            Err(err) => return downgrade(Intent::EmployeeList, err),
        };
        match profile.department {
            Some(dept) => (Some(dept), true),
            None => return HandlerOutcome::Continue,
        }
    };
    let roster = match collaborators.directory.roster(scope.as_deref()) {
        Ok(roster) => roster,
        Err(err) => return downgrade(Intent::EmployeeList, err),
    };
    if roster.is_empty() {
        return HandlerOutcome::Continue;
    }
    let text = match &scope {
        Some(dept) => format!("Berikut daftar rekan kerja di departemen {}:", dept),
        None => "Berikut daftar karyawan aktif:".to_string(),
    };
    let total_count = roster.len();
    let data = json!({
        "employees": roster,
        "total_count": total_count,
        "limited_view": limited,
    });
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn payroll_inquiry(requester: &Requester) -> HandlerOutcome {
    let text = format!(
        "Halo {}! Untuk detail gaji dan slip gaji, silakan akses portal karyawan. \
         Informasi yang tersedia meliputi gaji pokok, tunjangan, potongan, dan rincian pajak.",
        requester.display_name
    );
    let data = json!({
        "available_info": [
            "Slip gaji bulanan",
            "Rincian tunjangan",
            "Potongan pajak dan BPJS",
            "Bonus dan insentif",
        ],
        "contact_hr": "Hubungi HR untuk informasi detail",
    });
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn attendance_check(requester: &Requester) -> HandlerOutcome {
    let text = format!(
        "Halo {}! Catatan kehadiran detail tersedia di sistem attendance: jam masuk, \
         jam pulang, dan total jam kerja.",
        requester.display_name
    );
    let data = json!({
        "available_info": [
            "Jam masuk dan pulang harian",
            "Rekap kehadiran bulanan",
            "Keterlambatan dan pulang awal",
            "Jam lembur",
        ],
    });
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn performance_review(requester: &Requester) -> HandlerOutcome {
    let text = format!(
        "Halo {}! Informasi evaluasi kinerja dapat diakses melalui sistem Performance \
         Management.",
        requester.display_name
    );
    let data = json!({
        "available_features": [
            "Self assessment",
            "Goal setting dan tracking",
            "Feedback dari atasan",
            "Riwayat evaluasi",
        ],
        "next_review": "Hubungi atasan atau HR untuk jadwal review berikutnya",
    });
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn company_policy(text: &str, requester: &Requester, router: &KnowledgeRouter) -> HandlerOutcome {
    // Prefer the knowledge sources: a policy question often has a curated
    // answer already.
    if let Some(hit) = router.top_hit(text) {
        let reply = format!("Halo {}! {}", requester.display_name, hit.body);
        let data = json!({
            "source": hit.source_id,
            "category": hit.category,
            "path": hit.path,
        });
        return HandlerOutcome::Done(ChatResponse::ok(reply, SourceTier::Handler).with_data(data));
    }

    let handbook_terms = ["buku saku", "handbook", "buku panduan", "buku pegawai"];
    let lowered = text.to_lowercase();
    if handbook_terms.iter().any(|t| lowered.contains(t)) {
        let reply = format!(
            "Halo {}! Untuk employee handbook, silakan hubungi HR department. Buku saku \
             berisi panduan lengkap kebijakan perusahaan dan prosedur kerja.",
            requester.display_name
        );
        let data = json!({
            "handbook_specific": true,
            "contact": "Hubungi HR untuk mendapatkan salinan terbaru",
        });
        return HandlerOutcome::Done(ChatResponse::ok(reply, SourceTier::Handler).with_data(data));
    }

    let reply = format!(
        "Halo {}! Berikut kategori kebijakan perusahaan yang tersedia:",
        requester.display_name
    );
    let data = json!({
        "policies": [
            {"category": "Kebijakan Cuti", "items": ["Cuti tahunan", "Cuti sakit", "Cuti melahirkan"]},
            {"category": "Kebijakan Kehadiran", "items": ["Jam kerja", "Keterlambatan", "Work from home"]},
            {"category": "Kode Etik", "items": ["Perilaku profesional", "Komunikasi", "Integritas"]},
            {"category": "Kebijakan IT", "items": ["Penggunaan komputer", "Data security", "Password policy"]},
        ],
        "handbook_specific": false,
    });
    HandlerOutcome::Done(ChatResponse::ok(reply, SourceTier::Handler).with_data(data))
}

fn training_schedule(requester: &Requester) -> HandlerOutcome {
    let text = format!(
        "Halo {}! Berikut program pelatihan yang tersedia:",
        requester.display_name
    );
    let data = json!({
        "training_programs": [
            {"title": "Leadership Development", "type": "Management Training", "duration": "2 hari"},
            {"title": "Digital Skills Workshop", "type": "Technical Training", "duration": "1 hari"},
            {"title": "Communication Skills", "type": "Soft Skills", "duration": "4 jam"},
            {"title": "Safety Training", "type": "Mandatory", "duration": "2 jam"},
        ],
        "enrollment_info": "Untuk mendaftar, hubungi HR atau akses learning management system",
    });
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn greeting(requester: &Requester, composer: &ResponseComposer) -> HandlerOutcome {
    use chrono::Timelike;
    let hour = chrono::Local::now().hour();
    let text = composer.greeting(requester, hour);
    let data = json!({
        "available_commands": [
            "Cek sisa cuti saya",
            "Informasi gaji dan payroll",
            "Kebijakan perusahaan",
            "Jadwal training tersedia",
        ],
    });
    HandlerOutcome::Done(ChatResponse::ok(text, SourceTier::Handler).with_data(data))
}

fn help(requester: &Requester) -> HandlerOutcome {
    let mut options = vec![
        "Cek sisa cuti - ketik: 'cek sisa cuti saya'".to_string(),
        "Kebijakan perusahaan - ketik: 'kebijakan perusahaan'".to_string(),
        "Jadwal training - ketik: 'jadwal training'".to_string(),
    ];
    if requester.role.is_staff() {
        options.push("Info proses hiring - ketik: 'status hiring'".to_string());
        options.push("Jumlah pelamar - ketik: 'berapa jumlah pelamar'".to_string());
    }
    let data = json!({
        "help_options": options,
        "is_staff": requester.role.is_staff(),
    });
    HandlerOutcome::Done(
        ChatResponse::ok("Berikut adalah hal-hal yang bisa saya bantu:", SourceTier::Handler)
            .with_data(data),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::traits::mock::MockBackend;
    use crate::shared::Role;

    fn setup() -> (Collaborators, KnowledgeRouter, ResponseComposer, CopilotConfig) {
        let backend = Arc::new(MockBackend::default());
        let collaborators = Collaborators {
            directory: backend.clone(),
            leave: backend.clone(),
            recruitment: backend,
        };
        (
            collaborators,
            KnowledgeRouter::with_default_sources(2),
            ResponseComposer::new(7, 5),
            CopilotConfig::default(),
        )
    }

    fn employee() -> Requester {
        Requester::new("emp-1", "Budi Santoso", Role::Employee)
    }

    fn admin() -> Requester {
        Requester::new("adm-1", "Ani Wijaya", Role::Admin)
    }

    #[test]
    fn test_leave_balance_reports_remaining() {
        let (collab, router, composer, config) = setup();
        let outcome = handle_intent(
            Intent::LeaveBalance,
            "cek sisa cuti saya",
            &employee(),
            &collab,
            &router,
            &composer,
            &config,
        );
        match outcome {
            HandlerOutcome::Done(resp) => {
                assert!(resp.success);
                assert_eq!(resp.source_tier, SourceTier::Handler);
                assert_eq!(resp.data.unwrap()["remaining"], 9);
            }
            HandlerOutcome::Continue => panic!("expected a terminal response"),
        }
    }

    #[test]
    fn test_gated_intent_denied_without_data() {
        let (collab, router, composer, config) = setup();
        let outcome = handle_intent(
            Intent::ApplicantCount,
            "berapa jumlah pelamar",
            &employee(),
            &collab,
            &router,
            &composer,
            &config,
        );
        match outcome {
            HandlerOutcome::Done(resp) => {
                assert!(!resp.success);
                assert_eq!(resp.source_tier, SourceTier::Handler);
                assert!(resp.data.is_none());
            }
            HandlerOutcome::Continue => panic!("denial must be terminal"),
        }
    }

    #[test]
    fn test_gated_intent_allowed_for_staff() {
        let (collab, router, composer, config) = setup();
        let outcome = handle_intent(
            Intent::ApplicantCount,
            "berapa jumlah pelamar",
            &admin(),
            &collab,
            &router,
            &composer,
            &config,
        );
        match outcome {
            HandlerOutcome::Done(resp) => {
                assert!(resp.success);
                let data = resp.data.unwrap();
                assert_eq!(data["today"], 3);
                assert_eq!(data["month"], 27);
            }
            HandlerOutcome::Continue => panic!("expected data for staff"),
        }
    }

    #[test]
    fn test_missing_record_continues_to_search() {
        let (collab, router, composer, config) = setup();
        let ghost = Requester::new("missing", "Ghost", Role::Employee);
        let outcome = handle_intent(
            Intent::LeaveBalance,
            "cek cuti",
            &ghost,
            &collab,
            &router,
            &composer,
            &config,
        );
        assert!(matches!(outcome, HandlerOutcome::Continue));
    }

    #[test]
    fn test_unavailable_backend_continues_to_search() {
        let (mut collab, router, composer, config) = setup();
        collab.leave = Arc::new(MockBackend {
            leave_available: false,
        });
        let outcome = handle_intent(
            Intent::LeaveBalance,
            "cek cuti",
            &employee(),
            &collab,
            &router,
            &composer,
            &config,
        );
        assert!(matches!(outcome, HandlerOutcome::Continue));
    }

    #[test]
    fn test_employee_list_is_department_scoped_for_non_staff() {
        let (collab, router, composer, config) = setup();
        let outcome = handle_intent(
            Intent::EmployeeList,
            "daftar karyawan",
            &employee(),
            &collab,
            &router,
            &composer,
            &config,
        );
        match outcome {
            HandlerOutcome::Done(resp) => {
                let data = resp.data.unwrap();
                assert_eq!(data["limited_view"], true);
                assert_eq!(data["total_count"], 1);
            }
            HandlerOutcome::Continue => panic!("expected a scoped roster"),
        }
    }

    #[test]
    fn test_company_policy_prefers_knowledge_hit() {
        let (collab, router, composer, config) = setup();
        let outcome = handle_intent(
            Intent::CompanyPolicy,
            "apa kebijakan work from home?",
            &employee(),
            &collab,
            &router,
            &composer,
            &config,
        );
        match outcome {
            HandlerOutcome::Done(resp) => {
                assert!(resp.success);
                let data = resp.data.unwrap();
                assert!(data.get("source").is_some());
            }
            HandlerOutcome::Continue => panic!("expected an answer"),
        }
    }
}
