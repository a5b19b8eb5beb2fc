//! Response composer: phrase variation, personalization, and suggestions.
//!
//! Variation is randomized but deterministic: the same `(seed, salt)` pair
//! always picks the same variant, so tests are stable and a deployment can
//! still avoid verbatim-repeated phrasing by salting with per-request data.
//! The composer only ever touches `text` and `suggestions`, never `data`.

use super::intents::Intent;
use crate::shared::{ChatResponse, Requester};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

static WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+").expect("static regex"));

/// Apology flavor for failed responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApologyKind {
    NotFound,
    Error,
    NoAccess,
}

const APOLOGIES_NOT_FOUND: &[&str] = &[
    "Maaf, saya tidak menemukan informasi yang Anda cari.",
    "Mohon maaf, data yang diminta tidak tersedia saat ini.",
    "Maaf, saya belum bisa menemukan data yang Anda butuhkan.",
];

const APOLOGIES_ERROR: &[&str] = &[
    "Maaf, terjadi kesalahan teknis. Silakan coba lagi.",
    "Mohon maaf, ada gangguan sistem. Coba beberapa saat lagi.",
    "Maaf atas ketidaknyamanan, sistem sedang bermasalah.",
];

const APOLOGIES_NO_ACCESS: &[&str] = &[
    "Maaf, Anda tidak memiliki akses untuk informasi ini.",
    "Mohon maaf, data ini hanya tersedia untuk level tertentu.",
    "Maaf, Anda perlu otorisasi khusus untuk data ini.",
];

const CLARIFICATIONS: &[&str] = &[
    "Bisa diperjelas maksud pertanyaan Anda?",
    "Mohon dijelaskan lebih detail apa yang Anda butuhkan.",
    "Tolong spesifikkan informasi apa yang dicari.",
];

const TRANSITIONS: &[&str] = &[
    "Ada lagi yang bisa saya bantu?",
    "Apakah ada pertanyaan lain?",
    "Silakan jika ada hal lain yang perlu dibantu.",
];

const GREETINGS_MORNING: &[&str] = &[
    "Selamat pagi! Semoga hari Anda menyenangkan.",
    "Selamat pagi! Siap membantu Anda hari ini.",
];
const GREETINGS_AFTERNOON: &[&str] = &[
    "Selamat siang! Ada yang bisa dibantu?",
    "Selamat siang! Saya siap membantu Anda.",
];
const GREETINGS_EVENING: &[&str] = &[
    "Selamat sore! Masih semangat bekerja?",
    "Selamat sore! Saya di sini untuk membantu.",
];
const GREETINGS_GENERAL: &[&str] = &[
    "Halo! Saya HR Assistant, siap membantu Anda.",
    "Hai! Ada yang bisa saya bantu terkait HR?",
];

const GENERAL_SUGGESTIONS: &[&str] = &[
    "Cek sisa cuti tahunan",
    "Informasi gaji dan tunjangan",
    "Program pelatihan tersedia",
    "Kebijakan perusahaan",
    "Rekap kehadiran",
];

/// Keyword → related topic suggestions, used for light sniffing of
/// unresolved queries. Bilingual keys match the lowercased input.
const SUGGESTION_MAP: &[(&str, &[&str])] = &[
    ("salary", &["Informasi gaji dan tunjangan", "Slip gaji bulanan"]),
    ("gaji", &["Informasi gaji dan tunjangan", "Slip gaji bulanan"]),
    ("leave", &["Sisa cuti tahunan", "Pengajuan cuti"]),
    ("cuti", &["Sisa cuti tahunan", "Kebijakan cuti"]),
    ("training", &["Program pelatihan tersedia", "Jadwal training"]),
    ("pelatihan", &["Program pelatihan tersedia", "Sertifikasi karyawan"]),
    ("performance", &["Evaluasi kinerja", "Target dan KPI"]),
    ("kinerja", &["Evaluasi kinerja", "Feedback performance"]),
    ("policy", &["Kebijakan perusahaan", "Prosedur HR"]),
    ("kebijakan", &["Kebijakan perusahaan", "Aturan kerja"]),
    ("attendance", &["Rekap absensi", "Jam kerja"]),
    ("absen", &["Rekap absensi", "Lembur dan overtime"]),
    ("career", &["Jalur karir", "Pengembangan karir"]),
    ("karir", &["Jalur karir", "Promosi"]),
    ("benefit", &["Tunjangan karyawan", "Asuransi kesehatan"]),
    ("tunjangan", &["Tunjangan karyawan", "Fasilitas perusahaan"]),
];

fn intent_intros(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::LeaveBalance => &[
            "Berikut informasi saldo cuti Anda:",
            "Ini dia data cuti yang Anda miliki:",
            "Informasi cuti terkini untuk Anda:",
        ],
        Intent::EmployeeInfo => &[
            "Berikut profil lengkap Anda:",
            "Data karyawan Anda adalah sebagai berikut:",
        ],
        Intent::PayrollInquiry => &[
            "Mengenai informasi gaji dan payroll:",
            "Untuk informasi gaji dan tunjangan:",
        ],
        Intent::AttendanceCheck => &[
            "Informasi kehadiran Anda:",
            "Berikut catatan kehadiran Anda:",
        ],
        Intent::CompanyPolicy => &[
            "Berikut kebijakan perusahaan yang berlaku:",
            "Informasi mengenai policy perusahaan:",
        ],
        _ => &[],
    }
}

fn intent_followups(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::LeaveBalance => &["Ajukan cuti baru", "Kebijakan cuti perusahaan"],
        Intent::PayrollInquiry => &["Slip gaji bulanan", "Komponen tunjangan"],
        Intent::HiringProcess | Intent::ApplicantCount => {
            &["Statistik pelamar", "Status rekrutmen aktif"]
        }
        Intent::TrainingSchedule => &["Sertifikasi karyawan", "Learning path"],
        _ => &[],
    }
}

/// Deterministic phrase-pool picker and suggestion builder.
pub struct ResponseComposer {
    seed: u64,
    max_suggestions: usize,
}

impl ResponseComposer {
    pub fn new(seed: u64, max_suggestions: usize) -> Self {
        Self {
            seed,
            max_suggestions: max_suggestions.max(1),
        }
    }

    /// Pick one variant from a pool; stable for equal `(seed, salt)`.
    fn pick<'a>(&self, pool: &[&'a str], salt: &str) -> &'a str {
        debug_assert!(!pool.is_empty());
        let mut hasher = DefaultHasher::new();
        salt.hash(&mut hasher);
        let mut rng = StdRng::seed_from_u64(self.seed ^ hasher.finish());
        pool[rng.gen_range(0..pool.len())]
    }

    /// Contextual greeting for the given local hour.
    pub fn greeting(&self, requester: &Requester, hour: u32) -> String {
        let pool = match hour {
            5..=11 => GREETINGS_MORNING,
            12..=16 => GREETINGS_AFTERNOON,
            17..=20 => GREETINGS_EVENING,
            _ => GREETINGS_GENERAL,
        };
        let base = self.pick(pool, &requester.identity);
        format!("{} {}", base, "Saya HR Assistant, siap membantu Anda dengan pertanyaan seputar HR.")
    }

    pub fn apology(&self, kind: ApologyKind, salt: &str) -> &'static str {
        let pool = match kind {
            ApologyKind::NotFound => APOLOGIES_NOT_FOUND,
            ApologyKind::Error => APOLOGIES_ERROR,
            ApologyKind::NoAccess => APOLOGIES_NO_ACCESS,
        };
        self.pick(pool, salt)
    }

    /// Fixed clarification for empty/whitespace-only input.
    pub fn clarification(&self, salt: &str) -> &'static str {
        self.pick(CLARIFICATIONS, salt)
    }

    pub fn transition(&self, salt: &str) -> &'static str {
        self.pick(TRANSITIONS, salt)
    }

    /// Post-process a tier's response: prepend an intro variation on success,
    /// guarantee non-empty suggestions. `data` is never altered.
    pub fn decorate(
        &self,
        mut response: ChatResponse,
        intent: Option<Intent>,
        requester: &Requester,
    ) -> ChatResponse {
        if response.success {
            if let Some(intent) = intent {
                let intros = intent_intros(intent);
                if !intros.is_empty() {
                    let intro = self.pick(intros, &format!("{}:{}", intent.as_str(), requester.identity));
                    response.text = format!("{} {}", intro, response.text);
                }
            }
        }
        if response.suggestions.is_empty() {
            let followups = intent.map(intent_followups).unwrap_or(&[]);
            let mut suggestions: Vec<String> =
                followups.iter().map(|s| s.to_string()).collect();
            suggestions.push(self.transition(&requester.identity).to_string());
            suggestions.truncate(self.max_suggestions);
            response.suggestions = suggestions;
        }
        response
    }

    /// Light keyword sniffing over the original text: related topic
    /// suggestions, at most `max_suggestions`, never empty.
    pub fn sniff_suggestions(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut suggestions: Vec<String> = Vec::new();
        for word in WORDS.find_iter(&lowered) {
            for (keyword, related) in SUGGESTION_MAP {
                if word.as_str().contains(keyword) {
                    for s in related.iter() {
                        if !suggestions.iter().any(|existing| existing == s) {
                            suggestions.push(s.to_string());
                        }
                    }
                }
            }
        }
        if suggestions.is_empty() {
            suggestions = GENERAL_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
        }
        suggestions.truncate(self.max_suggestions);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Role, SourceTier};

    fn requester() -> Requester {
        Requester::new("emp-1", "Budi", Role::Employee)
    }

    #[test]
    fn test_same_seed_and_salt_is_stable() {
        let a = ResponseComposer::new(7, 5);
        let b = ResponseComposer::new(7, 5);
        assert_eq!(
            a.apology(ApologyKind::NotFound, "salt"),
            b.apology(ApologyKind::NotFound, "salt")
        );
        assert_eq!(a.clarification("x"), b.clarification("x"));
    }

    #[test]
    fn test_decorate_adds_intro_and_suggestions_on_success() {
        let composer = ResponseComposer::new(7, 5);
        let resp = ChatResponse::ok("Sisa cuti Anda 9 hari.", SourceTier::Handler);
        let decorated = composer.decorate(resp, Some(Intent::LeaveBalance), &requester());
        assert!(decorated.text.len() > "Sisa cuti Anda 9 hari.".len());
        assert!(!decorated.suggestions.is_empty());
        assert!(decorated.suggestions.len() <= 5);
    }

    #[test]
    fn test_decorate_leaves_failure_text_alone() {
        let composer = ResponseComposer::new(7, 5);
        let denial = ChatResponse::failure("Maaf, akses ditolak.", SourceTier::Handler);
        let decorated = composer.decorate(denial, Some(Intent::ApplicantCount), &requester());
        assert!(decorated.text.starts_with("Maaf, akses ditolak."));
        assert!(decorated.data.is_none());
    }

    #[test]
    fn test_sniffed_suggestions_are_topical_and_bounded() {
        let composer = ResponseComposer::new(7, 5);
        let sniffed = composer.sniff_suggestions("ada pertanyaan soal gaji dan training");
        assert!(sniffed.iter().any(|s| s.contains("gaji")));
        assert!(sniffed.iter().any(|s| s.contains("pelatihan") || s.contains("training")));
        assert!(sniffed.len() <= 5);

        let generic = composer.sniff_suggestions("xyzabc nonsense query");
        assert!(!generic.is_empty());
        assert!(generic.len() <= 5);
    }

    #[test]
    fn test_greeting_buckets() {
        let composer = ResponseComposer::new(7, 5);
        let morning = composer.greeting(&requester(), 8);
        assert!(morning.starts_with("Selamat pagi"));
        let night = composer.greeting(&requester(), 23);
        assert!(night.contains("HR Assistant"));
    }
}
