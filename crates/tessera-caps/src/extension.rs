//! Known optional capabilities and the tables that order them.

use core::fmt;
use core::str::FromStr;

use crate::backend::Backend;
use crate::error::HashError;

/// An optional capability whose availability is queried rather than assumed.
///
/// Each variant carries the canonical extension name returned by
/// [`Extension::name`]; parsing accepts exactly that name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Extension {
    AngleInstancedArrays,
    ExtBlendMinmax,
    ExtColorBufferFloat,
    ExtColorBufferHalfFloat,
    ExtDisjointTimerQuery,
    ExtDisjointTimerQueryWebgl2,
    ExtFragDepth,
    ExtSrgb,
    ExtShaderTextureLod,
    ExtTextureFilterAnisotropic,
    OesElementIndexUint,
    OesStandardDerivatives,
    OesTextureFloat,
    OesTextureFloatLinear,
    OesTextureHalfFloat,
    OesTextureHalfFloatLinear,
    OesVertexArrayObject,
    WebglColorBufferFloat,
    WebglCompressedTextureAstc,
    WebglCompressedTextureAtc,
    WebglCompressedTextureEtc,
    WebglCompressedTextureEtc1,
    WebglCompressedTexturePvrtc,
    WebglCompressedTextureS3tc,
    WebglCompressedTextureS3tcSrgb,
    WebglDebugRendererInfo,
    WebglDebugShaders,
    WebglDepthTexture,
    WebglDrawBuffers,
    WebglLoseContext,
}

use Extension::*;

impl Extension {
    /// Every known extension, in catalog order.
    pub const ALL: &'static [Extension] = CATALOG_V0;

    pub const fn name(self) -> &'static str {
        match self {
            AngleInstancedArrays => "ANGLE_instanced_arrays",
            ExtBlendMinmax => "EXT_blend_minmax",
            ExtColorBufferFloat => "EXT_color_buffer_float",
            ExtColorBufferHalfFloat => "EXT_color_buffer_half_float",
            ExtDisjointTimerQuery => "EXT_disjoint_timer_query",
            ExtDisjointTimerQueryWebgl2 => "EXT_disjoint_timer_query_webgl2",
            ExtFragDepth => "EXT_frag_depth",
            ExtSrgb => "EXT_sRGB",
            ExtShaderTextureLod => "EXT_shader_texture_lod",
            ExtTextureFilterAnisotropic => "EXT_texture_filter_anisotropic",
            OesElementIndexUint => "OES_element_index_uint",
            OesStandardDerivatives => "OES_standard_derivatives",
            OesTextureFloat => "OES_texture_float",
            OesTextureFloatLinear => "OES_texture_float_linear",
            OesTextureHalfFloat => "OES_texture_half_float",
            OesTextureHalfFloatLinear => "OES_texture_half_float_linear",
            OesVertexArrayObject => "OES_vertex_array_object",
            WebglColorBufferFloat => "WEBGL_color_buffer_float",
            WebglCompressedTextureAstc => "WEBGL_compressed_texture_astc",
            WebglCompressedTextureAtc => "WEBGL_compressed_texture_atc",
            WebglCompressedTextureEtc => "WEBGL_compressed_texture_etc",
            WebglCompressedTextureEtc1 => "WEBGL_compressed_texture_etc1",
            WebglCompressedTexturePvrtc => "WEBGL_compressed_texture_pvrtc",
            WebglCompressedTextureS3tc => "WEBGL_compressed_texture_s3tc",
            WebglCompressedTextureS3tcSrgb => "WEBGL_compressed_texture_s3tc_srgb",
            WebglDebugRendererInfo => "WEBGL_debug_renderer_info",
            WebglDebugShaders => "WEBGL_debug_shaders",
            WebglDepthTexture => "WEBGL_depth_texture",
            WebglDrawBuffers => "WEBGL_draw_buffers",
            WebglLoseContext => "WEBGL_lose_context",
        }
    }

    /// Returns the extensions `backend` can expose at all.
    pub fn for_backend(backend: Backend) -> &'static [Extension] {
        match backend {
            Backend::WebGl1 => WEBGL1_EXTENSIONS,
            Backend::WebGl2 => WEBGL2_EXTENSIONS,
        }
    }

    /// Parses a list of canonical names, failing on the first unknown one.
    pub fn parse_all<I, S>(names: I) -> Result<Vec<Extension>, HashError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Extension {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| HashError::UnknownExtension(s.to_string()))
    }
}

// ── Hash catalogs ─────────────────────────────────────────────────────────
//
// Published catalogs are frozen: changing the order or length of an existing
// version invalidates every stored hash. Add a new version instead.

/// Newest catalog version; always used for encoding.
pub const LATEST_VERSION: u8 = 0;

const CATALOG_V0: &[Extension] = &[
    AngleInstancedArrays,
    ExtBlendMinmax,
    ExtColorBufferFloat,
    ExtColorBufferHalfFloat,
    ExtDisjointTimerQuery,
    ExtDisjointTimerQueryWebgl2,
    ExtFragDepth,
    ExtSrgb,
    ExtShaderTextureLod,
    ExtTextureFilterAnisotropic,
    OesElementIndexUint,
    OesStandardDerivatives,
    OesTextureFloat,
    OesTextureFloatLinear,
    OesTextureHalfFloat,
    OesTextureHalfFloatLinear,
    OesVertexArrayObject,
    WebglColorBufferFloat,
    WebglCompressedTextureAstc,
    WebglCompressedTextureAtc,
    WebglCompressedTextureEtc,
    WebglCompressedTextureEtc1,
    WebglCompressedTexturePvrtc,
    WebglCompressedTextureS3tc,
    WebglCompressedTextureS3tcSrgb,
    WebglDebugRendererInfo,
    WebglDebugShaders,
    WebglDepthTexture,
    WebglDrawBuffers,
    WebglLoseContext,
];

/// Returns the ordered catalog published under `version`.
pub const fn catalog(version: u8) -> Option<&'static [Extension]> {
    match version {
        0 => Some(CATALOG_V0),
        _ => None,
    }
}

// ── Per-backend lists ─────────────────────────────────────────────────────

/// Extensions a WebGL 1 style backend may expose.
pub const WEBGL1_EXTENSIONS: &[Extension] = &[
    AngleInstancedArrays,
    ExtBlendMinmax,
    ExtColorBufferHalfFloat,
    ExtDisjointTimerQuery,
    ExtFragDepth,
    ExtSrgb,
    ExtShaderTextureLod,
    ExtTextureFilterAnisotropic,
    OesElementIndexUint,
    OesStandardDerivatives,
    OesTextureFloat,
    OesTextureFloatLinear,
    OesTextureHalfFloat,
    OesTextureHalfFloatLinear,
    OesVertexArrayObject,
    WebglColorBufferFloat,
    WebglCompressedTextureAstc,
    WebglCompressedTextureAtc,
    WebglCompressedTextureEtc,
    WebglCompressedTextureEtc1,
    WebglCompressedTexturePvrtc,
    WebglCompressedTextureS3tc,
    WebglCompressedTextureS3tcSrgb,
    WebglDebugRendererInfo,
    WebglDebugShaders,
    WebglDepthTexture,
    WebglDrawBuffers,
    WebglLoseContext,
];

/// Extensions a WebGL 2 style backend may expose. Most WebGL 1 extensions
/// are core functionality there.
pub const WEBGL2_EXTENSIONS: &[Extension] = &[
    ExtColorBufferFloat,
    ExtDisjointTimerQueryWebgl2,
    ExtTextureFilterAnisotropic,
    OesTextureFloatLinear,
    WebglCompressedTextureAstc,
    WebglCompressedTextureAtc,
    WebglCompressedTextureEtc,
    WebglCompressedTextureEtc1,
    WebglCompressedTexturePvrtc,
    WebglCompressedTextureS3tc,
    WebglCompressedTextureS3tcSrgb,
    WebglDebugRendererInfo,
    WebglDebugShaders,
    WebglLoseContext,
];
