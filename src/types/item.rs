use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identity of a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amount in whole rubles.
pub type Price = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseTier {
    Wav,
    Stems,
    Exclusive,
}

impl LicenseTier {
    pub const ALL: [LicenseTier; 3] = [
        LicenseTier::Wav,
        LicenseTier::Stems,
        LicenseTier::Exclusive,
    ];

    /// Short label used on price rows and cart lines.
    pub fn label(self) -> &'static str {
        match self {
            LicenseTier::Wav => "WAV",
            LicenseTier::Stems => "STEMS",
            LicenseTier::Exclusive => "EXCLUSIVE",
        }
    }
}

impl fmt::Display for LicenseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-tier prices of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Licenses {
    pub wav: Price,
    pub stems: Price,
    pub exclusive: Price,
}

impl Licenses {
    pub fn price(&self, tier: LicenseTier) -> Price {
        match tier {
            LicenseTier::Wav => self.wav,
            LicenseTier::Stems => self.stems,
            LicenseTier::Exclusive => self.exclusive,
        }
    }
}

/// Display metadata for a license tier. Has no effect on pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseInfo {
    pub tier: LicenseTier,
    pub name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub bpm: u32,
    /// Catalog duration label (`m:ss`), not measured from audio.
    pub duration: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Media URI handed to the playback backend, if the item has a preview.
    #[serde(default)]
    pub preview_uri: Option<String>,
    pub licenses: Licenses,
}

impl Item {
    /// Base price: what a plain "add to cart" charges.
    pub fn base_price(&self) -> Price {
        self.licenses.wav
    }

    pub fn price(&self, tier: LicenseTier) -> Price {
        self.licenses.price(tier)
    }
}
