use tessera_caps::{hash, Backend, Extension};

use super::config::MasqueradeConfig;
use super::error::MasqueradeError;
use super::preset::Preset;

type Result<T> = std::result::Result<T, MasqueradeError>;

/// Artificial restriction of the capabilities a context reports.
///
/// A masquerade fixes the backend and names the extensions to conceal; it
/// never adds capabilities the device lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masquerade {
    backend: Backend,
    strive: Vec<Extension>,
    conceal: Vec<Extension>,
    functions_to_undefine: Vec<String>,
}

impl Masquerade {
    /// Supports exactly the hashed extensions and conceals the rest of the
    /// backend's list.
    pub fn from_hash(hash: &str) -> Result<Self> {
        let (backend, strive) = hash::decode(hash)?;
        let conceal = hash::complement(backend, &strive);
        Ok(Self {
            backend,
            strive,
            conceal,
            functions_to_undefine: Vec::new(),
        })
    }

    pub fn from_preset(identifier: &str, presets: &[Preset]) -> Result<Self> {
        let preset = Preset::find(presets, identifier)
            .ok_or_else(|| MasqueradeError::UnknownPreset(identifier.to_string()))?;

        let mut mask = match &preset.extensions_hash {
            Some(h) => {
                if !preset.extensions_to_strive.is_empty()
                    || !preset.extensions_to_conceal.is_empty()
                {
                    log::warn!(
                        "masquerade preset {identifier:?} has an extensions hash; \
                         its strive/conceal lists are ignored"
                    );
                }
                let mask = Self::from_hash(h)?;
                if mask.backend.name() != preset.backend {
                    log::warn!(
                        "masquerade preset {identifier:?} declares backend {:?} but its hash \
                         encodes {}; using the hash",
                        preset.backend,
                        mask.backend
                    );
                }
                mask
            }
            None => {
                let backend: Backend = preset.backend.parse()?;
                let strive = Extension::parse_all(&preset.extensions_to_strive)?;
                let mut conceal = Extension::parse_all(&preset.extensions_to_conceal)?;
                if conceal.is_empty() && !strive.is_empty() {
                    conceal = hash::complement(backend, &strive);
                }
                Self {
                    backend,
                    strive,
                    conceal,
                    functions_to_undefine: Vec::new(),
                }
            }
        };

        mask.functions_to_undefine = preset.functions_to_undefine.clone();
        log::info!("masquerading as preset {identifier:?} ({})", mask.backend);
        Ok(mask)
    }

    /// Masquerade configured through `TESSERA_MSQRD_HASH` or
    /// `TESSERA_MSQRD_PRESET`, resolved against the bundled presets.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        MasqueradeConfig::from_lookup(lookup).resolve(&Preset::builtin())
    }

    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn extensions_to_strive(&self) -> &[Extension] {
        &self.strive
    }

    pub fn extensions_to_conceal(&self) -> &[Extension] {
        &self.conceal
    }

    pub fn functions_to_undefine(&self) -> &[String] {
        &self.functions_to_undefine
    }

    #[inline]
    pub fn conceals(&self, extension: Extension) -> bool {
        self.conceal.contains(&extension)
    }

    pub fn undefines(&self, function: &str) -> bool {
        self.functions_to_undefine.iter().any(|f| f == function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Extension::*;

    fn presets(json: &str) -> Vec<Preset> {
        Preset::parse_list(json).unwrap()
    }

    #[test]
    fn from_hash_conceals_complement() {
        let h = hash::encode(Backend::WebGl2, &[ExtColorBufferFloat, WebglLoseContext]);
        let mask = Masquerade::from_hash(&h).unwrap();
        assert_eq!(mask.backend(), Backend::WebGl2);
        assert_eq!(mask.extensions_to_strive(), &[ExtColorBufferFloat, WebglLoseContext]);
        assert!(mask.conceals(ExtDisjointTimerQueryWebgl2));
        assert!(!mask.conceals(ExtColorBufferFloat));
        assert_eq!(
            mask.extensions_to_conceal().len(),
            Extension::for_backend(Backend::WebGl2).len() - 2
        );
    }

    #[test]
    fn from_hash_rejects_garbage() {
        assert!(matches!(
            Masquerade::from_hash("1!"),
            Err(MasqueradeError::Hash(_))
        ));
    }

    #[test]
    fn hash_preset_overrides_lists() {
        let p = presets(
            r#"[{
                "identifier": "h",
                "backend": "webgl1",
                "extensionsHash": "100000",
                "extensionsToStrive": ["EXT_sRGB"],
                "functionsToUndefine": ["drawBuffers"]
            }]"#,
        );
        let mask = Masquerade::from_preset("h", &p).unwrap();
        assert!(mask.extensions_to_strive().is_empty());
        assert!(mask.conceals(ExtSrgb));
        assert!(mask.undefines("drawBuffers"));
        assert!(!mask.undefines("drawArrays"));
    }

    #[test]
    fn strive_only_preset_conceals_the_rest() {
        let p = presets(
            r#"[{ "identifier": "s", "backend": "webgl1", "extensionsToStrive": ["ANGLE_instanced_arrays"] }]"#,
        );
        let mask = Masquerade::from_preset("s", &p).unwrap();
        assert!(!mask.conceals(AngleInstancedArrays));
        assert!(mask.conceals(OesVertexArrayObject));
    }

    #[test]
    fn conceal_only_preset() {
        let p = presets(
            r#"[{ "identifier": "c", "backend": "webgl2", "extensionsToConceal": ["WEBGL_lose_context"] }]"#,
        );
        let mask = Masquerade::from_preset("c", &p).unwrap();
        assert_eq!(mask.extensions_to_conceal(), &[WebglLoseContext]);
        assert!(mask.extensions_to_strive().is_empty());
    }

    #[test]
    fn unknown_preset_and_names() {
        let p = presets(
            r#"[{ "identifier": "bad", "backend": "webgl3" },
                { "identifier": "ext", "backend": "webgl1", "extensionsToConceal": ["EXT_nope"] }]"#,
        );
        assert!(matches!(
            Masquerade::from_preset("missing", &p),
            Err(MasqueradeError::UnknownPreset(_))
        ));
        assert!(matches!(
            Masquerade::from_preset("bad", &p),
            Err(MasqueradeError::Hash(_))
        ));
        assert!(matches!(
            Masquerade::from_preset("ext", &p),
            Err(MasqueradeError::Hash(_))
        ));
    }

    #[test]
    fn hash_backend_beats_declared_backend() {
        let p = presets(
            r#"[{ "identifier": "mixed", "backend": "webgl2", "extensionsHash": "100000" }]"#,
        );
        let mask = Masquerade::from_preset("mixed", &p).unwrap();
        assert_eq!(mask.backend(), Backend::WebGl1);
        assert_eq!(
            mask.extensions_to_conceal(),
            Extension::for_backend(Backend::WebGl1)
        );
    }

    #[test]
    fn from_lookup_uses_builtin_presets() {
        use crate::masquerade::{HASH_VAR, PRESET_VAR};

        let mask = Masquerade::from_lookup(|key| {
            (key == PRESET_VAR).then(|| "webgl2-bare".to_string())
        })
        .unwrap();
        assert_eq!(mask.backend(), Backend::WebGl2);
        assert!(mask.extensions_to_strive().is_empty());

        let mask = Masquerade::from_lookup(|key| {
            (key == HASH_VAR).then(|| hash::encode(Backend::WebGl1, &[ExtSrgb]))
        })
        .unwrap();
        assert_eq!(mask.extensions_to_strive(), &[ExtSrgb]);

        assert!(Masquerade::from_lookup(|_| None).is_none());
    }

    #[test]
    fn every_builtin_preset_resolves() {
        let p = Preset::builtin();
        for preset in &p {
            let mask = Masquerade::from_preset(&preset.identifier, &p).unwrap();
            assert_eq!(mask.backend().name(), preset.backend);
        }
    }
}
