use serde::{Deserialize, Serialize};

use super::error::MasqueradeError;

const BUILTIN: &str = include_str!("presets.json");

/// A named masquerade configuration, as stored in a presets file.
///
/// When `extensions_hash` is set it fully describes the supported extensions
/// and the two lists are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub identifier: String,
    pub backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions_to_strive: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions_to_conceal: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions_to_undefine: Vec<String>,
}

impl Preset {
    /// Parses a JSON array of presets.
    pub fn parse_list(json: &str) -> Result<Vec<Preset>, MasqueradeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Presets compiled into the crate.
    pub fn builtin() -> Vec<Preset> {
        // The bundled file is covered by tests; a parse failure here is a
        // packaging bug, not a runtime condition.
        Self::parse_list(BUILTIN).unwrap_or_else(|err| {
            log::error!("bundled masquerade presets are invalid: {err}");
            Vec::new()
        })
    }

    pub fn find<'p>(presets: &'p [Preset], identifier: &str) -> Option<&'p Preset> {
        presets.iter().find(|p| p.identifier == identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_caps::{hash, Backend, Extension};

    #[test]
    fn builtin_presets_parse() {
        let presets = Preset::parse_list(BUILTIN).unwrap();
        assert!(presets.len() >= 5);
        for p in &presets {
            p.backend.parse::<Backend>().unwrap();
            Extension::parse_all(&p.extensions_to_strive).unwrap();
            Extension::parse_all(&p.extensions_to_conceal).unwrap();
            if let Some(h) = &p.extensions_hash {
                let (backend, _) = hash::decode(h).unwrap();
                assert_eq!(backend.name(), p.backend);
            }
        }
    }

    #[test]
    fn builtin_identifiers_are_unique() {
        let presets = Preset::builtin();
        for (i, p) in presets.iter().enumerate() {
            assert!(presets[i + 1..].iter().all(|q| q.identifier != p.identifier));
        }
    }

    #[test]
    fn optional_fields_default() {
        let presets =
            Preset::parse_list(r#"[{ "identifier": "x", "backend": "webgl2" }]"#).unwrap();
        assert_eq!(presets[0].extensions_hash, None);
        assert!(presets[0].extensions_to_strive.is_empty());
        assert!(presets[0].functions_to_undefine.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Preset::parse_list("[{").unwrap_err();
        assert!(matches!(err, MasqueradeError::Parse(_)));
    }

    #[test]
    fn find_by_identifier() {
        let presets = Preset::builtin();
        assert!(Preset::find(&presets, "webgl2-bare").is_some());
        assert!(Preset::find(&presets, "nope").is_none());
    }
}
