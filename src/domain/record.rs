//! Saved history records.

use serde::{Deserialize, Serialize};

use super::bmi::{Band, BmiResult};

/// Display format for record timestamps (local time).
pub const DATE_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

/// A saved calculation: the result plus a unique id and a display date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The calculation this record captures
    #[serde(flatten)]
    pub result: BmiResult,

    /// Unique identifier
    pub id: String,

    /// Display-formatted local timestamp
    pub date: String,
}

impl HistoryRecord {
    /// Create a record stamped with a fresh id and the current local time.
    #[must_use]
    pub fn new(result: BmiResult) -> Self {
        Self {
            result,
            id: uuid_v4(),
            date: chrono::Local::now().format(DATE_FORMAT).to_string(),
        }
    }

    /// Create a record with an explicit id and date.
    #[must_use]
    pub fn with_id(result: BmiResult, id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            result,
            id: id.into(),
            date: date.into(),
        }
    }

    /// Classification band of the saved result.
    #[must_use]
    pub fn band(&self) -> Band {
        self.result.band()
    }
}

/// Generate a random UUID v4 string from a CSPRNG seeded with OS entropy.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}
