use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single mood or life entry. Both collections share this row shape;
/// which table a record lives in is decided by its [`Kind`].
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub status: Status,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "record_status")]
pub enum Status {
    Pending,
    Completed,
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

impl Status {
    /// Exact-match parse; the API accepts only the two canonical spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Pending" => Some(Self::Pending),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

/// Which of the two parallel record families a request targets.
/// Deserialized straight from the `:kind` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Mood,
    Life,
}

impl Kind {
    pub fn spec(&self) -> &'static KindSpec {
        match self {
            Kind::Mood => &MOOD_SPEC,
            Kind::Life => &LIFE_SPEC,
        }
    }
}

/// Per-kind descriptor: table, allowed categories, date floor and the
/// localized validation messages. One generic service reads this instead
/// of two copy-pasted controllers.
#[derive(Debug)]
pub struct KindSpec {
    pub label: &'static str,
    pub table: &'static str,
    pub categories: [&'static str; 3],
    /// How many days before today a record date may still fall on.
    pub floor_days_back: i64,
    pub messages: Messages,
}

impl KindSpec {
    /// Earliest acceptable record date for write operations.
    pub fn date_floor(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.floor_days_back)
    }
}

/// User-facing validation messages, keyed by field and rule.
#[derive(Debug)]
pub struct Messages {
    pub title_required: &'static str,
    pub title_min: &'static str,
    pub title_max: &'static str,
    pub category_required: &'static str,
    pub category_invalid: &'static str,
    pub status_required: &'static str,
    pub status_invalid: &'static str,
    pub date_required: &'static str,
    pub date_floor: &'static str,
}

static MOOD_SPEC: KindSpec = KindSpec {
    label: "mood",
    table: "moods",
    categories: ["Senang", "Sedih", "Stress"],
    // Mood entries may be logged for yesterday as well.
    floor_days_back: 1,
    messages: Messages {
        title_required: "Judul harus diisi, jangan lupa kasih nama mood kamu!",
        title_min: "Judul minimal harus 3 karakter",
        title_max: "Judul maksimal 255 karakter",
        category_required: "Kategori wajib diisi. Pilihan yang valid: Senang, Sedih, Stress.",
        category_invalid: "Kategori tidak valid. Pilihan yang tersedia hanya: Senang, Sedih, Stress.",
        status_required: "Status wajib diisi. Jangan lupa pilih Completed atau Pending.",
        status_invalid: "Status tidak valid. Gunakan Completed atau Pending saja.",
        date_required: "Tanggal harus diisi. Jangan sampai kosong ya!",
        date_floor: "Tanggal harus hari ini atau lebih baru.",
    },
};

static LIFE_SPEC: KindSpec = KindSpec {
    label: "life",
    table: "lifes",
    categories: ["Pribadi", "Kerja", "Belajar"],
    floor_days_back: 0,
    messages: Messages {
        title_required: "Judul harus diisi, jangan kosong!",
        title_min: "Judul minimal harus 3 karakter",
        title_max: "Judul maksimal 255 karakter",
        category_required: "Kategori wajib diisi. Pilihan yang valid: Pribadi, Kerja, Belajar.",
        category_invalid: "Kategori tidak valid. Pilihan yang tersedia hanya: Pribadi, Kerja, Belajar.",
        status_required: "Status wajib diisi. Jangan lupa pilih Completed atau Pending.",
        status_invalid: "Status tidak valid. Gunakan Completed atau Pending saja.",
        date_required: "Tanggal harus diisi. Jangan sampai kosong ya!",
        date_floor: "Tanggal harus hari ini atau lebih baru.",
    },
};

/// Raw create/replace body. Everything is optional at the wire level;
/// the validator decides what is actually required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPayload {
    pub title: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
}

/// PUT /api/:kind/:id/status body.
#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: Option<String>,
}
