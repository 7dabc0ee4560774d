//! User-facing text for the form.
//!
//! Only the interface is translated. Prompts sent to the model are always
//! English.

use clap::ValueEnum;

use super::params::Field;

/// Language of the interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en", alias = "english")]
    English,
    #[value(name = "id", alias = "indonesian")]
    Indonesian,
}

impl Language {
    pub fn texts(self) -> &'static Texts {
        match self {
            Language::English => &ENGLISH,
            Language::Indonesian => &INDONESIAN,
        }
    }
}

pub struct Texts {
    pub subtitle: &'static str,
    pub form_title: &'static str,
    field_labels: [&'static str; 5],
    placeholders: [&'static str; 5],
    subject_helper: &'static str,
    pub aspect_ratio_title: &'static str,
    pub generate_button: &'static str,
    pub generating_button: &'static str,
    pub result_title: &'static str,
    pub download_hint: &'static str,
    pub painting: &'static str,
    pub painting_detail: &'static str,
    pub failed_title: &'static str,
    pub preview_unavailable: &'static str,
    pub empty_hint: &'static str,
    pub prompt_title: &'static str,
    pub copy_hint: &'static str,
    pub subject_required: &'static str,
    pub generating_status: &'static str,
    pub image_generated: &'static str,
    pub prompt_copied: &'static str,
    pub copy_failed: &'static str,
    pub saved: &'static str,
    pub download_failed: &'static str,
    pub no_api_key: &'static str,
    pub ready: &'static str,
    pub help_move: &'static str,
    pub help_suggestion: &'static str,
    pub help_next_field: &'static str,
    pub help_ratio: &'static str,
    pub help_generate: &'static str,
    pub help_generate_enter: &'static str,
    pub help_copy: &'static str,
    pub help_download: &'static str,
    pub help_quit: &'static str,
}

impl Texts {
    /// Label shown on the form
    pub fn field_label(&self, field: Field) -> &'static str {
        self.field_labels[field.index()]
    }

    pub fn placeholder(&self, field: Field) -> &'static str {
        self.placeholders[field.index()]
    }

    pub fn helper_text(&self, field: Field) -> Option<&'static str> {
        (field == Field::Subject).then_some(self.subject_helper)
    }
}

static ENGLISH: Texts = Texts {
    subtitle: "Fill in the structured details below; they become a ready-to-use prompt and an image.",
    form_title: " Image Parameters ",
    field_labels: [
        "1. Main Subject",
        "2. Visual Style",
        "3. Lighting",
        "4. Dominant Colors",
        "5. Additional Details",
    ],
    placeholders: [
        "e.g. An astronaut cat sitting on the moon...",
        "Pick a style or type your own...",
        "Pick a lighting mood or type your own...",
        "Red & Gold, Pastel...",
        "Glowing dust particles, blurred background...",
    ],
    subject_helper: "Describe what you want to see at the center of the image.",
    aspect_ratio_title: "6. Aspect Ratio",
    generate_button: "✨ Generate Image Now",
    generating_button: "Generating...",
    result_title: " Result ",
    download_hint: "[Ctrl+S] Download ",
    painting: "AI is painting your imagination...",
    painting_detail: "This may take a few seconds depending on complexity.",
    failed_title: "Image generation failed",
    preview_unavailable: "Image ready (preview unavailable). Press Ctrl+S to download it.",
    empty_hint: "Fill in the form on the left and press \"Generate\" to see the magic.",
    prompt_title: " READY-TO-USE PROMPT (ENGLISH) ",
    copy_hint: "[Ctrl+Y] Copy ",
    subject_required: "Please fill in the 'Main Subject' field first.",
    generating_status: "Generating...",
    image_generated: "Image generated",
    prompt_copied: "Prompt copied to clipboard!",
    copy_failed: "Copy failed",
    saved: "Saved",
    download_failed: "Download failed",
    no_api_key: "No API key configured (set GEMINI_API_KEY)",
    ready: "Ready",
    help_move: "Tab/↑↓: Move",
    help_suggestion: "Alt+1-6: Suggestion",
    help_next_field: "Enter: Next field",
    help_ratio: "←→ or 1-5: Change ratio",
    help_generate: "Ctrl+G: Generate",
    help_generate_enter: "Enter: Generate",
    help_copy: "Ctrl+Y: Copy prompt",
    help_download: "Ctrl+S: Download",
    help_quit: "Esc: Quit",
};

static INDONESIAN: Texts = Texts {
    subtitle: "Buat gambar menakjubkan dengan mengisi detail terstruktur di bawah ini.",
    form_title: " Parameter Gambar ",
    field_labels: [
        "1. Subjek Utama",
        "2. Gaya Visual",
        "3. Pencahayaan",
        "4. Warna Dominan",
        "5. Detail Tambahan",
    ],
    placeholders: [
        "Contoh: Seekor kucing astronot duduk di bulan...",
        "Pilih gaya atau ketik sendiri...",
        "Pilih suasana cahaya atau ketik sendiri...",
        "Merah & Emas, Pastel...",
        "Partikel debu bercahaya, latar belakang kabur...",
    ],
    subject_helper: "Deskripsikan apa yang ingin Anda lihat di tengah gambar.",
    aspect_ratio_title: "6. Format Rasio",
    generate_button: "✨ Buat Gambar Sekarang",
    generating_button: "Sedang Membuat...",
    result_title: " Hasil Generasi ",
    download_hint: "[Ctrl+S] Unduh ",
    painting: "AI sedang melukis imajinasi Anda...",
    painting_detail: "Ini mungkin memakan waktu beberapa detik tergantung kompleksitas.",
    failed_title: "Gagal Membuat Gambar",
    preview_unavailable: "Gambar siap (pratinjau tidak tersedia). Tekan Ctrl+S untuk mengunduh.",
    empty_hint: "Isi formulir di sebelah kiri dan tekan \"Buat Gambar\" untuk melihat keajaiban.",
    prompt_title: " PROMPT SIAP PAKAI (ENGLISH) ",
    copy_hint: "[Ctrl+Y] Salin ",
    subject_required: "Mohon isi 'Subjek Utama' terlebih dahulu.",
    generating_status: "Sedang membuat gambar...",
    image_generated: "Gambar berhasil dibuat",
    prompt_copied: "Prompt disalin ke clipboard!",
    copy_failed: "Gagal menyalin",
    saved: "Tersimpan",
    download_failed: "Gagal mengunduh",
    no_api_key: "API key belum diatur (set GEMINI_API_KEY)",
    ready: "Siap",
    help_move: "Tab/↑↓: Pindah",
    help_suggestion: "Alt+1-6: Saran",
    help_next_field: "Enter: Kolom berikutnya",
    help_ratio: "←→ atau 1-5: Ganti rasio",
    help_generate: "Ctrl+G: Buat",
    help_generate_enter: "Enter: Buat",
    help_copy: "Ctrl+Y: Salin prompt",
    help_download: "Ctrl+S: Unduh",
    help_quit: "Esc: Keluar",
};
