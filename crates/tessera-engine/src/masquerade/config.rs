use super::mask::Masquerade;
use super::preset::Preset;

/// Environment variable holding an extensions hash to masquerade as.
pub const HASH_VAR: &str = "TESSERA_MSQRD_HASH";
/// Environment variable naming a masquerade preset.
pub const PRESET_VAR: &str = "TESSERA_MSQRD_PRESET";

/// Where a masquerade comes from. A hash takes precedence over a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasqueradeConfig {
    pub hash: Option<String>,
    pub preset: Option<String>,
}

impl MasqueradeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key| lookup(key).filter(|v: &String| !v.trim().is_empty());
        Self {
            hash: get(HASH_VAR),
            preset: get(PRESET_VAR),
        }
    }

    /// Resolves the configured masquerade. Invalid configuration is logged
    /// and yields `None`, leaving the context unrestricted.
    pub fn resolve(&self, presets: &[Preset]) -> Option<Masquerade> {
        if let Some(h) = &self.hash {
            if self.preset.is_some() {
                log::warn!("both {HASH_VAR} and {PRESET_VAR} are set; using the hash");
            }
            return Masquerade::from_hash(h)
                .map_err(|err| log::warn!("ignoring masquerade hash {h:?}: {err}"))
                .ok();
        }

        let identifier = self.preset.as_deref()?;
        Masquerade::from_preset(identifier, presets)
            .map_err(|err| log::warn!("ignoring masquerade preset {identifier:?}: {err}"))
            .ok()
    }
}
