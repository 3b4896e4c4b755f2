use core::fmt;
use core::str::FromStr;

use crate::error::HashError;

/// Major API flavor a context runs on.
///
/// The declaration order is part of the hash format: the header stores the
/// zero-based position in [`Backend::ALL`] plus one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Backend {
    WebGl1,
    WebGl2,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::WebGl1, Backend::WebGl2];

    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Backend::WebGl1 => 0,
            Backend::WebGl2 => 1,
        }
    }

    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Backend::WebGl1 => "webgl1",
            Backend::WebGl2 => "webgl2",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| HashError::UnknownBackend(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for b in Backend::ALL {
            assert_eq!(Backend::from_index(b.index()), Some(b));
        }
        assert_eq!(Backend::from_index(2), None);
    }

    #[test]
    fn parses_names() {
        assert_eq!("webgl1".parse::<Backend>().unwrap(), Backend::WebGl1);
        assert_eq!("webgl2".parse::<Backend>().unwrap(), Backend::WebGl2);
        assert_eq!(
            "webgl3".parse::<Backend>().unwrap_err(),
            HashError::UnknownBackend("webgl3".into())
        );
    }
}
