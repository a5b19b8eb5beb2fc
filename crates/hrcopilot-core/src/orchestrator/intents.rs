//! Intent taxonomy and keyword classifier.
//!
//! Intents are a closed sum type: each variant carries its bilingual keyword
//! phrases and its access policy, and dispatches through a single table in
//! `handlers` instead of string comparison chains. Classification scores each
//! intent by the summed token count of every phrase found in the text, so a
//! multi-word phrase outweighs a single word. Ties break by lexical order of
//! the intent name, which is deterministic regardless of iteration order.

use crate::shared::Role;

/// Access policy attached to an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any authenticated requester.
    Everyone,
    /// HR or admin only.
    StaffOnly,
}

impl AccessPolicy {
    #[inline]
    pub fn allows(&self, role: Role) -> bool {
        match self {
            AccessPolicy::Everyone => true,
            AccessPolicy::StaffOnly => role.is_staff(),
        }
    }
}

/// The closed set of requests the copilot answers with a structured handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    LeaveBalance,
    HiringProcess,
    ApplicantCount,
    EmployeeInfo,
    EmployeeList,
    PayrollInquiry,
    AttendanceCheck,
    PerformanceReview,
    CompanyPolicy,
    TrainingSchedule,
    Greeting,
    Help,
}

impl Intent {
    /// Every known intent, in declaration order.
    pub const ALL: [Intent; 12] = [
        Intent::LeaveBalance,
        Intent::HiringProcess,
        Intent::ApplicantCount,
        Intent::EmployeeInfo,
        Intent::EmployeeList,
        Intent::PayrollInquiry,
        Intent::AttendanceCheck,
        Intent::PerformanceReview,
        Intent::CompanyPolicy,
        Intent::TrainingSchedule,
        Intent::Greeting,
        Intent::Help,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::LeaveBalance => "leave_balance",
            Intent::HiringProcess => "hiring_process",
            Intent::ApplicantCount => "applicant_count",
            Intent::EmployeeInfo => "employee_info",
            Intent::EmployeeList => "employee_list",
            Intent::PayrollInquiry => "payroll_inquiry",
            Intent::AttendanceCheck => "attendance_check",
            Intent::PerformanceReview => "performance_review",
            Intent::CompanyPolicy => "company_policy",
            Intent::TrainingSchedule => "training_schedule",
            Intent::Greeting => "greeting",
            Intent::Help => "help",
        }
    }

    /// Parse an intent name (e.g. from the generative classifier's output).
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Intent::ALL.iter().copied().find(|i| i.as_str() == s)
    }

    /// All intent names, for the generative classifier prompt.
    pub fn names() -> Vec<&'static str> {
        Intent::ALL.iter().map(|i| i.as_str()).collect()
    }

    pub fn access_policy(&self) -> AccessPolicy {
        match self {
            Intent::HiringProcess | Intent::ApplicantCount => AccessPolicy::StaffOnly,
            _ => AccessPolicy::Everyone,
        }
    }

    /// Keyword phrases recognized for this intent (Indonesian and English).
    pub fn keyword_phrases(&self) -> &'static [&'static str] {
        match self {
            Intent::LeaveBalance => &[
                "cuti", "leave", "sisa cuti", "remaining leave", "annual leave", "vacation",
                "liburan", "jatah cuti", "leave quota", "berapa cuti", "how many leave",
                "cek cuti", "cuti tersisa", "days off", "hari libur", "time off", "izin cuti",
                "status cuti", "mengajukan cuti", "apply leave", "request leave", "ajukan cuti",
            ],
            Intent::HiringProcess => &[
                "hiring", "recruitment", "proses hiring", "rekrutmen", "interview", "wawancara",
                "job opening", "lowongan", "vacancy", "posisi kosong", "recruitment status",
                "status rekrutmen", "hiring status", "jadwal wawancara", "progress kandidat",
                "selection process", "proses seleksi",
            ],
            Intent::ApplicantCount => &[
                "pelamar", "applicant", "jumlah pelamar", "total applicant", "kandidat",
                "total kandidat", "berapa pelamar", "how many applicants", "statistik pelamar",
                "candidate count", "jumlah kandidat", "lamaran masuk", "new applications",
                "aplikasi baru",
            ],
            Intent::EmployeeInfo => &[
                "profil", "profile", "data karyawan", "employee data", "info karyawan",
                "employee info", "informasi pribadi", "biodata", "kontak", "alamat", "address",
                "nomor telepon", "departemen", "jabatan", "job title", "id karyawan", "atasan",
                "supervisor", "siapa atasan", "who is my supervisor", "my manager",
            ],
            Intent::EmployeeList => &[
                "list karyawan", "employee list", "daftar karyawan", "staff list",
                "daftar staff", "employee directory", "direktori karyawan", "team members",
                "anggota tim", "semua karyawan", "siapa saja karyawan", "nama karyawan",
                "tampilkan karyawan", "struktur organisasi", "daftar kontak",
            ],
            Intent::PayrollInquiry => &[
                "gaji", "salary", "payroll", "slip gaji", "pay slip", "payslip", "penghasilan",
                "take home pay", "gaji bersih", "potongan", "tunjangan", "bonus", "lembur",
                "pajak", "bpjs", "asuransi", "pensiun",
            ],
            Intent::AttendanceCheck => &[
                "absen", "attendance", "kehadiran", "clock in", "clock out", "masuk kerja",
                "pulang kerja", "jam kerja", "working hours", "terlambat", "jam lembur",
                "jadwal kerja", "shift", "catatan kehadiran", "timesheet",
            ],
            Intent::PerformanceReview => &[
                "performance", "kinerja", "evaluasi", "evaluation", "review", "penilaian",
                "assessment", "appraisal", "rating", "umpan balik", "pencapaian", "kpi",
                "key performance indicator",
            ],
            Intent::CompanyPolicy => &[
                "policy", "kebijakan", "peraturan", "regulation", "aturan", "sop", "prosedur",
                "procedure", "guideline", "code of conduct", "kode etik", "aturan perusahaan",
                "handbook", "buku panduan", "compliance", "kepatuhan", "buku saku",
                "employee handbook", "buku pegawai", "buku karyawan", "keamanan informasi",
                "data protection", "perlindungan data", "work from home", "wfh",
                "kerja dari rumah", "remote work",
            ],
            Intent::TrainingSchedule => &[
                "training", "pelatihan", "course", "kursus", "workshop", "seminar",
                "pembelajaran", "pengembangan", "sertifikasi", "jadwal training",
                "training schedule", "learning path",
            ],
            Intent::Greeting => &[
                "halo", "hello", "hi ", "hey", "selamat pagi", "selamat siang", "selamat sore",
                "selamat malam", "good morning", "good afternoon", "good evening", "hai",
            ],
            Intent::Help => &[
                "help", "bantuan", "apa yang bisa", "what can you do", "how to", "bagaimana",
                "panduan", "instruksi", "perintah", "fitur", "menu", "pilihan", "dukungan",
            ],
        }
    }

    /// Score the lowercased text against one intent: summed whitespace-token
    /// count of every phrase contained in the text.
    fn score(&self, message: &str) -> usize {
        self.keyword_phrases()
            .iter()
            .filter(|phrase| message.contains(*phrase))
            .map(|phrase| phrase.split_whitespace().count())
            .sum()
    }

    /// Keyword classification: highest nonzero score wins; ties break by
    /// lexical order of the intent name. Empty or whitespace-only text
    /// short-circuits to `None` without scoring.
    pub fn classify(text: &str) -> Option<Intent> {
        let message = text.trim().to_lowercase();
        if message.is_empty() {
            return None;
        }
        let mut best: Option<(Intent, usize)> = None;
        for intent in Intent::ALL {
            let score = intent.score(&message);
            if score == 0 {
                continue;
            }
            best = match best {
                None => Some((intent, score)),
                Some((current, current_score)) => {
                    if score > current_score
                        || (score == current_score && intent.as_str() < current.as_str())
                    {
                        Some((intent, score))
                    } else {
                        Some((current, current_score))
                    }
                }
            };
        }
        best.map(|(intent, _)| intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_phrase_resolves_its_intent() {
        assert_eq!(Intent::classify("cek sisa cuti saya"), Some(Intent::LeaveBalance));
        assert_eq!(Intent::classify("berapa jumlah pelamar"), Some(Intent::ApplicantCount));
        assert_eq!(Intent::classify("jadwal training bulan depan"), Some(Intent::TrainingSchedule));
        assert_eq!(Intent::classify("apa kebijakan wfh?"), Some(Intent::CompanyPolicy));
    }

    #[test]
    fn test_empty_input_short_circuits() {
        assert_eq!(Intent::classify(""), None);
        assert_eq!(Intent::classify("   \t  "), None);
    }

    #[test]
    fn test_no_overlap_is_unknown() {
        assert_eq!(Intent::classify("xyzabc nonsense query"), None);
    }

    #[test]
    fn test_multi_word_phrase_outweighs_single_word() {
        // "slip gaji" (2 tokens) plus "gaji" (1) beats a lone single-token hit
        // from another intent.
        assert_eq!(Intent::classify("tolong slip gaji saya"), Some(Intent::PayrollInquiry));
    }

    #[test]
    fn test_tie_breaks_lexically() {
        // "evaluasi" scores 1 for performance_review, "absen" scores 1 for
        // attendance_check; equal scores resolve to the lexically smaller
        // name: attendance_check < performance_review.
        assert_eq!(
            Intent::classify("evaluasi absen"),
            Some(Intent::AttendanceCheck)
        );
    }

    #[test]
    fn test_intent_name_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::from_str(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::from_str("unknown"), None);
    }

    #[test]
    fn test_access_policies() {
        assert_eq!(Intent::ApplicantCount.access_policy(), AccessPolicy::StaffOnly);
        assert_eq!(Intent::HiringProcess.access_policy(), AccessPolicy::StaffOnly);
        assert_eq!(Intent::LeaveBalance.access_policy(), AccessPolicy::Everyone);
        assert!(!AccessPolicy::StaffOnly.allows(Role::Employee));
        assert!(AccessPolicy::StaffOnly.allows(Role::Hr));
    }
}
