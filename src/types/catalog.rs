use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, StoreError};
use crate::ops::time_format::parse_duration_label;
use crate::types::item::{Item, ItemId, LicenseInfo, LicenseTier, Licenses};

static LICENSE_TYPES: [LicenseInfo; 3] = [
    LicenseInfo {
        tier: LicenseTier::Wav,
        name: "WAV License",
        description: "Standard license for commercial use",
        features: &[
            "High quality WAV",
            "Up to 10,000 copies",
            "Radio broadcasting",
            "Internet streaming",
        ],
    },
    LicenseInfo {
        tier: LicenseTier::Stems,
        name: "STEMS License",
        description: "Separated tracks for full control",
        features: &[
            "Every element separately",
            "Full mix",
            "Unlimited copies",
            "Commercial use",
        ],
    },
    LicenseInfo {
        tier: LicenseTier::Exclusive,
        name: "EXCLUSIVE License",
        description: "Exclusive rights to the track",
        features: &[
            "Only you can use it",
            "All formats included",
            "Unlimited rights",
            "Copyright transfer",
        ],
    },
];

/// Tier metadata in display order.
pub fn license_types() -> &'static [LicenseInfo] {
    &LICENSE_TYPES
}

/// Immutable list of items available in the store.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and malformed entries.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let catalog = Catalog { items };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Load a catalog from a JSON array of items.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} catalog items from {}",
            catalog.items.len(),
            path.display()
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(StoreError::InvalidCatalog("catalog has no items".into()));
        }
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(StoreError::InvalidCatalog(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
            if item.bpm == 0 {
                return Err(StoreError::InvalidCatalog(format!(
                    "item {} has zero bpm",
                    item.id
                )));
            }
            if parse_duration_label(&item.duration).is_none() {
                return Err(StoreError::InvalidCatalog(format!(
                    "item {} has malformed duration {:?}",
                    item.id, item.duration
                )));
            }
        }
        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Resolves relative cover paths against `dir`. Covers missing on disk
    /// are dropped so the view shows no artwork instead of a broken image.
    /// URIs and absolute paths are left alone.
    pub fn with_cover_dir(mut self, dir: &Path) -> Self {
        for item in &mut self.items {
            let Some(image) = item.image.take() else {
                continue;
            };
            if image.contains("://") || Path::new(&image).is_absolute() {
                item.image = Some(image);
                continue;
            }
            match std::fs::canonicalize(dir.join(&image)) {
                Ok(path) => item.image = Some(path.display().to_string()),
                Err(_) => log::debug!(
                    "No cover {image} for item {} in {}",
                    item.id,
                    dir.display()
                ),
            }
        }
        self
    }
}

impl Default for Catalog {
    /// The built-in storefront catalog. Cover paths are relative to the
    /// configured cover directory, see `with_cover_dir`.
    fn default() -> Self {
        const DARK: &str = "5a69f4f0-8da3-4989-b1e1-4bac6e5262d9.jpg";
        const STREET: &str = "bce528bf-c271-4b88-a602-d5363e4e0321.jpg";
        const NEON: &str = "3b92e4aa-1817-4b89-a504-29785005b172.jpg";

        let beat = |id: u32,
                    title: &str,
                    genre: &str,
                    bpm: u32,
                    duration: &str,
                    tags: [&str; 3],
                    wav: u64,
                    cover: &str| Item {
            id: ItemId(id),
            title: title.to_string(),
            artist: "ПRCR".to_string(),
            genre: genre.to_string(),
            bpm,
            duration: duration.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: Some(cover.to_string()),
            preview_uri: None,
            licenses: Licenses {
                wav,
                stems: wav * 3,
                exclusive: wav * 10,
            },
        };

        Catalog {
            items: vec![
                beat(
                    1,
                    "Dark Vibes",
                    "Trap",
                    140,
                    "3:42",
                    ["Dark", "Trap", "Hard"],
                    2500,
                    DARK,
                ),
                beat(
                    2,
                    "Street Dreams",
                    "Hip-Hop",
                    85,
                    "4:15",
                    ["Hip-Hop", "Melodic", "Boom-Bap"],
                    3000,
                    STREET,
                ),
                beat(
                    3,
                    "Neon Nights",
                    "Electronic",
                    128,
                    "3:28",
                    ["Electronic", "Synthwave", "Ambient"],
                    2000,
                    NEON,
                ),
                beat(
                    4,
                    "Urban Flow",
                    "Trap",
                    150,
                    "3:55",
                    ["Trap", "Urban", "Bass"],
                    2800,
                    DARK,
                ),
                beat(
                    5,
                    "Midnight Groove",
                    "R&B",
                    95,
                    "4:32",
                    ["R&B", "Smooth", "Groove"],
                    3500,
                    STREET,
                ),
                beat(
                    6,
                    "Future Bass",
                    "Electronic",
                    135,
                    "3:18",
                    ["Electronic", "Future", "Bass"],
                    2200,
                    NEON,
                ),
            ],
        }
    }
}
