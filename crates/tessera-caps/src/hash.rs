//! Compact encoding of a backend kind plus a set of supported extensions.
//!
//! Layout: one header symbol `(version << 3) | (backend_index + 1)`, followed
//! by one symbol per six catalog entries. Within a body symbol the first
//! catalog entry of the group maps to the most significant bit.

use crate::backend::Backend;
use crate::base64::{decode64, encode64};
use crate::error::{HashError, Result};
use crate::extension::{catalog, Extension, LATEST_VERSION};

const GROUP: usize = 6;
const MAX_VERSION: u8 = 0b111;

const _: () = assert!(
    LATEST_VERSION <= MAX_VERSION && catalog(LATEST_VERSION).is_some(),
    "LATEST_VERSION must name a published 3-bit catalog"
);

/// Number of symbols a hash over a catalog of `catalog_len` entries takes.
#[inline]
pub const fn hash_len(catalog_len: usize) -> usize {
    1 + catalog_len.div_ceil(GROUP)
}

/// Encodes `supported` for `backend` against the latest catalog.
///
/// Extensions that are not part of the catalog are ignored. The body is
/// always emitted in full, so the empty set encodes to a zero-filled body.
pub fn encode(backend: Backend, supported: &[Extension]) -> String {
    // Checked at compile time above; every group is masked to six bits.
    let cat = catalog(LATEST_VERSION).unwrap_or(&[]);
    let encoded = encode_with(LATEST_VERSION, backend, cat, supported);
    debug_assert!(encoded.is_ok(), "encoding against the latest catalog failed: {encoded:?}");
    encoded.unwrap_or_default()
}

/// String-typed variant of [`encode`] for configuration and CLI layers.
pub fn encode_named<S: AsRef<str>>(backend: &str, supported: &[S]) -> Result<String> {
    let backend: Backend = backend.parse()?;
    let supported = Extension::parse_all(supported)?;
    Ok(encode(backend, &supported))
}

/// Decodes a hash into its backend and the supported extensions, in catalog
/// order.
pub fn decode(hash: &str) -> Result<(Backend, Vec<Extension>)> {
    decode_with(hash, catalog)
}

/// Returns every extension `backend` can expose that is not in `supported`,
/// in the backend list's order.
pub fn complement(backend: Backend, supported: &[Extension]) -> Vec<Extension> {
    Extension::for_backend(backend)
        .iter()
        .copied()
        .filter(|e| !supported.contains(e))
        .collect()
}

pub(crate) fn encode_with<E: PartialEq>(
    version: u8,
    backend: Backend,
    catalog: &[E],
    supported: &[E],
) -> Result<String> {
    if version > MAX_VERSION {
        return Err(HashError::UnknownVersion(version));
    }

    let mut hash = String::with_capacity(hash_len(catalog.len()));
    hash.push(encode64((version << 3) | (backend.index() + 1))?);

    for group in catalog.chunks(GROUP) {
        let mut bits = 0u8;
        for (i, entry) in group.iter().enumerate() {
            if supported.contains(entry) {
                bits |= 0b100000 >> i;
            }
        }
        hash.push(encode64(bits)?);
    }

    Ok(hash)
}

pub(crate) fn decode_with<'c, E, F>(hash: &str, lookup: F) -> Result<(Backend, Vec<E>)>
where
    E: Copy + 'c,
    F: FnOnce(u8) -> Option<&'c [E]>,
{
    let mut symbols = hash.chars();
    let header = decode64(symbols.next().ok_or(HashError::Empty)?)?;

    let version = header >> 3;
    let backend_field = header & 0b111;
    let backend = backend_field
        .checked_sub(1)
        .and_then(Backend::from_index)
        .ok_or(HashError::BackendIndexOutOfRange(backend_field))?;

    let catalog = lookup(version).ok_or(HashError::UnknownVersion(version))?;

    let actual = hash.chars().count();
    if actual == 1 {
        // Header-only hashes were written for the empty set by earlier
        // encoders; keep reading them.
        return Ok((backend, Vec::new()));
    }
    let expected = hash_len(catalog.len());
    if actual != expected {
        return Err(HashError::WrongLength {
            version,
            expected,
            actual,
        });
    }

    let mut supported = Vec::new();
    for (group, symbol) in catalog.chunks(GROUP).zip(symbols) {
        let bits = decode64(symbol)?;
        for (i, &entry) in group.iter().enumerate() {
            if bits & (0b100000 >> i) != 0 {
                supported.push(entry);
            }
        }
    }

    Ok((backend, supported))
}
