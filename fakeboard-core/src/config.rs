use serde::{Deserialize, Serialize};

use fakeboard_io::store::MAX_STORE_VERSION;

/// How the board validates device ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Rejects only `id > count`. `id == count` gets through the check and
    /// fails at the roster lookup instead.
    #[default]
    Inclusive,
    /// Rejects `id >= count`.
    Strict,
}

impl IdPolicy {
    pub fn accepts(self, id: u32, count: u32) -> bool {
        match self {
            IdPolicy::Inclusive => id <= count,
            IdPolicy::Strict => id < count,
        }
    }
}

/// Construction-time board parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Version handed to the store. Anything above 3 fails initialization.
    pub store_version: i32,
    pub id_policy: IdPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            store_version: MAX_STORE_VERSION,
            id_policy: IdPolicy::Inclusive,
        }
    }
}

impl BoardConfig {
    pub fn with_version(store_version: i32) -> Self {
        Self { store_version, ..Self::default() }
    }
}
