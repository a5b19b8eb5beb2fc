//! Built-in seed content for the knowledge sources.
//!
//! The knowledge text is static external data: it is loaded once at startup
//! and never mutated afterwards. Deployments can construct sources from their
//! own JSON instead; these defaults keep the pipeline usable out of the box
//! and give the tests realistic content.

use super::faq::FaqEntry;
use serde_json::{json, Value};

/// Curated FAQ entries (highest-trust source).
pub fn faq_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry {
            id: "leave_annual_quota".into(),
            category: "leave".into(),
            question: "Berapa jatah cuti tahunan saya?".into(),
            answer: "Jatah cuti tahunan standar adalah 12 hari kerja per tahun. Sisa cuti dapat \
                     dicek melalui perintah 'cek sisa cuti saya'."
                .into(),
            keywords: vec!["jatah cuti".into(), "annual leave".into(), "quota".into()],
        },
        FaqEntry {
            id: "leave_application".into(),
            category: "leave".into(),
            question: "Bagaimana cara mengajukan cuti?".into(),
            answer: "Ajukan cuti melalui portal karyawan minimal 3 hari sebelum tanggal cuti, \
                     lalu tunggu persetujuan atasan langsung Anda."
                .into(),
            keywords: vec!["mengajukan cuti".into(), "apply leave".into(), "pengajuan".into()],
        },
        FaqEntry {
            id: "payslip_access".into(),
            category: "payroll".into(),
            question: "Di mana saya bisa melihat slip gaji?".into(),
            answer: "Slip gaji bulanan dapat diunduh dari portal karyawan pada menu Payroll \
                     setiap tanggal 28."
                .into(),
            keywords: vec!["slip gaji".into(), "payslip".into(), "gaji".into()],
        },
        FaqEntry {
            id: "wfh_policy".into(),
            category: "policy".into(),
            question: "Apa kebijakan work from home perusahaan?".into(),
            answer: "Karyawan dapat bekerja dari rumah maksimal 2 hari per minggu dengan \
                     persetujuan atasan. Pastikan tetap dapat dihubungi selama jam kerja."
                .into(),
            keywords: vec!["wfh".into(), "work from home".into(), "remote".into()],
        },
        FaqEntry {
            id: "overtime_compensation".into(),
            category: "payroll".into(),
            question: "Bagaimana perhitungan lembur?".into(),
            answer: "Lembur dihitung 1,5x upah per jam untuk hari kerja dan 2x untuk hari libur, \
                     sesuai persetujuan lembur tertulis."
                .into(),
            keywords: vec!["lembur".into(), "overtime".into()],
        },
        FaqEntry {
            id: "resignation_notice".into(),
            category: "lifecycle".into(),
            question: "Berapa lama notice period untuk resign?".into(),
            answer: "Notice period minimal 1 bulan untuk staff dan 2 bulan untuk level manager, \
                     dihitung sejak surat pengunduran diri diterima HR."
                .into(),
            keywords: vec!["resign".into(), "resignation".into(), "notice period".into()],
        },
    ]
}

/// HR domain reference data (compensation, performance, org structure).
pub fn hr_domain_data() -> Value {
    json!({
        "compensation_benefits": {
            "salary_components": {
                "base_salary": "Gaji pokok dibayarkan setiap tanggal 28 melalui transfer bank.",
                "allowances": ["Tunjangan transportasi", "Tunjangan makan", "Tunjangan komunikasi"],
                "deductions": "Potongan meliputi pajak penghasilan (PPh 21), BPJS Kesehatan, dan BPJS Ketenagakerjaan."
            },
            "insurance": {
                "health": "BPJS Kesehatan dan asuransi swasta menanggung karyawan beserta keluarga inti.",
                "employment": "BPJS Ketenagakerjaan mencakup jaminan hari tua dan jaminan kecelakaan kerja."
            }
        },
        "performance_management": {
            "review_cycle": "Evaluasi kinerja dilakukan dua kali setahun: mid-year review dan annual review.",
            "criteria": "Penilaian berdasarkan goal achievement, kompetensi, perilaku, dan inovasi.",
            "process": [
                "Self assessment oleh karyawan",
                "Penilaian oleh atasan langsung",
                "Review meeting dan pembuatan development plan"
            ]
        },
        "organizational_structure": {
            "reporting_line": "Setiap karyawan memiliki satu atasan langsung; struktur organisasi tersedia di portal.",
            "departments": "Departemen utama: Engineering, Sales, Finance, Human Resources, Operations."
        }
    })
}

/// Compliance and regulatory guidance.
pub fn compliance_data() -> Value {
    json!({
        "working_hours": {
            "standard": "Jam kerja standar adalah 40 jam per minggu, Senin sampai Jumat pukul 09.00-18.00.",
            "overtime_rules": "Lembur wajib mendapat persetujuan tertulis dan mengikuti batas maksimal 14 jam per minggu."
        },
        "data_protection": {
            "personal_data": "Data pribadi karyawan hanya diakses oleh HR dan diproses sesuai peraturan perlindungan data.",
            "confidentiality": "Informasi gaji dan penilaian kinerja bersifat rahasia."
        },
        "leave_regulation": {
            "statutory_minimum": "Cuti tahunan minimal 12 hari kerja setelah 12 bulan masa kerja berturut-turut.",
            "maternity": "Cuti melahirkan 3 bulan dengan gaji penuh sesuai undang-undang ketenagakerjaan."
        }
    })
}

/// Industry best practices.
pub fn best_practices_data() -> Value {
    json!({
        "onboarding": {
            "first_week": "Minggu pertama difokuskan pada orientasi, pengenalan tim, dan setup akses sistem.",
            "buddy_program": "Setiap karyawan baru didampingi buddy selama 3 bulan pertama."
        },
        "feedback_culture": {
            "one_on_one": "One-on-one meeting dengan atasan dilakukan minimal dua minggu sekali.",
            "continuous_feedback": "Umpan balik diberikan sepanjang tahun, bukan hanya saat review."
        },
        "career_development": {
            "learning_budget": "Setiap karyawan memiliki anggaran pelatihan tahunan untuk kursus dan sertifikasi.",
            "promotion_path": "Jalur promosi dievaluasi saat annual review berdasarkan kinerja dan kesiapan."
        }
    })
}

/// Employee lifecycle procedures.
pub fn lifecycle_data() -> Value {
    json!({
        "probation": {
            "duration": "Masa percobaan berlangsung 3 bulan sejak tanggal bergabung.",
            "evaluation": "Evaluasi akhir masa percobaan menentukan pengangkatan sebagai karyawan tetap."
        },
        "transfer": {
            "internal_mobility": "Perpindahan antar departemen dapat diajukan setelah 12 bulan di posisi saat ini.",
            "process": ["Diskusi dengan atasan", "Persetujuan kedua departemen", "Serah terima pekerjaan"]
        },
        "resignation": {
            "steps": [
                "Submit surat pengunduran diri ke atasan dan HR",
                "Handover seluruh pekerjaan dan project",
                "Pengembalian aset perusahaan",
                "Exit interview dengan HR",
                "Final settlement dan surat keterangan kerja"
            ],
            "notice_period": "Minimal 1 bulan untuk staff, 2 bulan untuk manager."
        }
    })
}

/// Advanced HR scenario playbooks.
pub fn scenario_data() -> Value {
    json!({
        "grievance_handling": {
            "reporting": "Keluhan dapat disampaikan ke HR secara langsung atau melalui kanal whistleblowing anonim.",
            "investigation": "Setiap laporan ditindaklanjuti maksimal 5 hari kerja dengan menjaga kerahasiaan pelapor."
        },
        "remote_work_scenarios": {
            "equipment": "Perusahaan menyediakan laptop; kebutuhan peralatan tambahan diajukan ke IT support.",
            "communication": "Tim remote wajib mengikuti daily standup dan menjaga status ketersediaan."
        },
        "crisis_management": {
            "emergency_contact": "Perbarui kontak darurat Anda di portal karyawan setiap ada perubahan.",
            "business_continuity": "Saat gangguan operasional, koordinasi mengikuti rantai komando departemen."
        }
    })
}
