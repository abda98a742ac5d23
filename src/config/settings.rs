#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// How long a computed result stays fresh without an explicit
    /// invalidation.
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Normalized result set written by the ingestion layer.
    pub snapshot_path: String,
    /// Derived stats/awards bundle written by the process command.
    pub derived_path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            snapshot_path: "results.json".to_string(),
            derived_path: "derived.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub cache: CacheSettings,
    pub store: StoreSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// Passed explicitly (dependency injection) rather than read from a global;
// thresholds of the achievement catalogue are contract values and live in
// the catalogue itself, not here.
