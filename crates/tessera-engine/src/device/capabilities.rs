use tessera_caps::{hash, Backend, Extension};

use crate::masquerade::Masquerade;

/// wgpu features backing extensions that are not universally available.
pub fn extension_features() -> wgpu::Features {
    wgpu::Features::TEXTURE_COMPRESSION_ASTC
        | wgpu::Features::TEXTURE_COMPRESSION_ETC2
        | wgpu::Features::TEXTURE_COMPRESSION_BC
        | wgpu::Features::TIMESTAMP_QUERY
        | wgpu::Features::FLOAT32_FILTERABLE
}

/// Extensions of `backend`'s list that a device with `features` provides.
///
/// Extensions without a wgpu counterpart gate (atc, pvrtc) are never
/// reported; the rest are core functionality on every wgpu device.
pub fn probe_extensions(backend: Backend, features: wgpu::Features) -> Vec<Extension> {
    Extension::for_backend(backend)
        .iter()
        .copied()
        .filter(|&ext| provided(ext, features))
        .collect()
}

fn provided(ext: Extension, features: wgpu::Features) -> bool {
    use Extension::*;
    match ext {
        WebglCompressedTextureAstc => features.contains(wgpu::Features::TEXTURE_COMPRESSION_ASTC),
        WebglCompressedTextureEtc | WebglCompressedTextureEtc1 => {
            features.contains(wgpu::Features::TEXTURE_COMPRESSION_ETC2)
        }
        WebglCompressedTextureS3tc | WebglCompressedTextureS3tcSrgb => {
            features.contains(wgpu::Features::TEXTURE_COMPRESSION_BC)
        }
        WebglCompressedTextureAtc | WebglCompressedTexturePvrtc => false,
        ExtDisjointTimerQuery | ExtDisjointTimerQueryWebgl2 => {
            features.contains(wgpu::Features::TIMESTAMP_QUERY)
        }
        OesTextureFloatLinear => features.contains(wgpu::Features::FLOAT32_FILTERABLE),
        _ => true,
    }
}

/// Capability view of a context: the effective backend and which extensions
/// it reports, after applying an optional masquerade.
#[derive(Debug, Clone)]
pub struct Capabilities {
    backend: Backend,
    provided: Vec<Extension>,
    masquerade: Option<Masquerade>,
}

impl Capabilities {
    /// A masquerade's backend overrides `requested`.
    pub fn new(requested: Backend, features: wgpu::Features, masquerade: Option<Masquerade>) -> Self {
        let backend = masquerade.as_ref().map_or(requested, Masquerade::backend);
        let provided = probe_extensions(backend, features);
        Self {
            backend,
            provided,
            masquerade,
        }
    }

    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn supports(&self, ext: Extension) -> bool {
        self.provided.contains(&ext)
            && !self.masquerade.as_ref().is_some_and(|m| m.conceals(ext))
    }

    /// Reported extensions, in the backend list's order.
    pub fn extensions(&self) -> Vec<Extension> {
        self.provided
            .iter()
            .copied()
            .filter(|&e| self.supports(e))
            .collect()
    }

    /// Extensions the device provides but the masquerade conceals.
    pub fn concealed(&self) -> Vec<Extension> {
        self.provided
            .iter()
            .copied()
            .filter(|&e| !self.supports(e))
            .collect()
    }

    /// Extensions hash of the reported set; reproduces this configuration
    /// when used as a masquerade.
    pub fn hash(&self) -> String {
        hash::encode(self.backend, &self.extensions())
    }

    pub fn function_concealed(&self, name: &str) -> bool {
        self.masquerade.as_ref().is_some_and(|m| m.undefines(name))
    }

    pub fn masquerade(&self) -> Option<&Masquerade> {
        self.masquerade.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masquerade::Preset;
    use Extension::*;

    #[test]
    fn probe_stays_within_backend_list() {
        for b in Backend::ALL {
            let all = probe_extensions(b, wgpu::Features::all());
            assert!(all.iter().all(|e| Extension::for_backend(b).contains(e)));
        }
    }

    #[test]
    fn probe_follows_features() {
        let none = probe_extensions(Backend::WebGl2, wgpu::Features::empty());
        assert!(!none.contains(&WebglCompressedTextureS3tc));
        assert!(!none.contains(&ExtDisjointTimerQueryWebgl2));
        assert!(none.contains(&ExtColorBufferFloat));

        let bc = probe_extensions(Backend::WebGl2, wgpu::Features::TEXTURE_COMPRESSION_BC);
        assert!(bc.contains(&WebglCompressedTextureS3tc));
        assert!(bc.contains(&WebglCompressedTextureS3tcSrgb));
        assert!(!bc.contains(&WebglCompressedTextureAstc));
    }

    #[test]
    fn atc_and_pvrtc_are_never_provided() {
        let all = probe_extensions(Backend::WebGl1, wgpu::Features::all());
        assert!(!all.contains(&WebglCompressedTextureAtc));
        assert!(!all.contains(&WebglCompressedTexturePvrtc));
    }

    #[test]
    fn unmasked_reports_everything_provided() {
        let caps = Capabilities::new(Backend::WebGl1, extension_features(), None);
        assert_eq!(caps.backend(), Backend::WebGl1);
        assert_eq!(caps.extensions(), probe_extensions(Backend::WebGl1, extension_features()));
        assert!(caps.concealed().is_empty());
        assert!(!caps.function_concealed("bindVertexArray"));
    }

    #[test]
    fn masquerade_overrides_backend_and_conceals() {
        let mask = Masquerade::from_hash(&hash::encode(Backend::WebGl1, &[OesVertexArrayObject]))
            .unwrap();
        let caps = Capabilities::new(Backend::WebGl2, wgpu::Features::all(), Some(mask));
        assert_eq!(caps.backend(), Backend::WebGl1);
        assert_eq!(caps.extensions(), vec![OesVertexArrayObject]);
        assert!(!caps.supports(AngleInstancedArrays));
        assert!(caps.concealed().contains(&AngleInstancedArrays));
    }

    #[test]
    fn masquerade_never_adds_capabilities() {
        let mask = Masquerade::from_hash(&hash::encode(
            Backend::WebGl2,
            &[WebglCompressedTextureAstc, WebglLoseContext],
        ))
        .unwrap();
        let caps = Capabilities::new(Backend::WebGl2, wgpu::Features::empty(), Some(mask));
        assert_eq!(caps.extensions(), vec![WebglLoseContext]);
    }

    #[test]
    fn hash_reproduces_configuration() {
        let presets = Preset::builtin();
        let mask = Masquerade::from_preset("webgl2-no-timer-queries", &presets).unwrap();
        let caps = Capabilities::new(Backend::WebGl2, wgpu::Features::all(), Some(mask));
        let again = Capabilities::new(
            Backend::WebGl1,
            wgpu::Features::all(),
            Some(Masquerade::from_hash(&caps.hash()).unwrap()),
        );
        assert_eq!(again.backend(), Backend::WebGl2);
        assert_eq!(again.extensions(), caps.extensions());
        assert!(!again.supports(ExtDisjointTimerQueryWebgl2));
    }

    #[test]
    fn function_concealment_follows_preset() {
        let presets = Preset::builtin();
        let mask = Masquerade::from_preset("webgl1-no-vertex-arrays", &presets).unwrap();
        let caps = Capabilities::new(Backend::WebGl2, wgpu::Features::empty(), Some(mask));
        assert!(caps.function_concealed("createVertexArray"));
        assert!(!caps.supports(OesVertexArrayObject));
    }
}
