//! Display readiness sources.
//!
//! The splash veil is removed only once every source has reported in. Each
//! source is tracked independently and may arrive in any order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadinessSource {
    /// Font assets loaded.
    Fonts,
    /// Theme preference loaded (or defaulted).
    Theme,
    /// Bootstrap finished, session state determined.
    App,
}

impl ReadinessSource {
    pub const ALL: [ReadinessSource; 3] = [
        ReadinessSource::Fonts,
        ReadinessSource::Theme,
        ReadinessSource::App,
    ];

    pub const fn bit(self) -> u8 {
        match self {
            ReadinessSource::Fonts => 0b001,
            ReadinessSource::Theme => 0b010,
            ReadinessSource::App => 0b100,
        }
    }

    pub const ALL_BITS: u8 = 0b111;
}
