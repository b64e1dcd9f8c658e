//! BLAKE2 backend configuration (overrides + auto selection).
//!
//! The SIMD and portable BLAKE2 kernels are interchangeable byte-for-byte.
//! This module decides which one the registry instantiates:
//! - `Auto` picks SIMD where `blake2*_simd` has vector kernels, portable elsewhere
//! - the choice can be forced with `DIGESTKIT_BLAKE2_FORCE` or programmatically

/// Environment variable read by [`Config::from_env`].
pub const BLAKE2_FORCE_ENV: &str = "DIGESTKIT_BLAKE2_FORCE";

/// Forced backend selection for BLAKE2b/BLAKE2s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Blake2Force {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Force the portable scalar implementation.
  Portable,
  /// Force the `blake2b_simd` / `blake2s_simd` implementation.
  Simd,
}

impl Blake2Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Simd => "simd",
    }
  }

  /// Parse an override value. Case-insensitive; surrounding whitespace is ignored.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("scalar") {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("simd") || value.eq_ignore_ascii_case("native") {
      return Some(Self::Simd);
    }
    None
  }
}

/// Backend actually used after resolving [`Blake2Force::Auto`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Blake2Backend {
  Portable,
  Simd,
}

impl Blake2Backend {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::Simd => "simd",
    }
  }
}

/// Full backend configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Config {
  /// Requested force mode (env/programmatic).
  pub requested: Blake2Force,
}

impl Config {
  #[inline]
  #[must_use]
  pub const fn new(requested: Blake2Force) -> Self {
    Self { requested }
  }

  /// Backend selected for this configuration.
  #[inline]
  #[must_use]
  pub const fn blake2_backend(self) -> Blake2Backend {
    match self.requested {
      Blake2Force::Portable => Blake2Backend::Portable,
      Blake2Force::Simd => Blake2Backend::Simd,
      Blake2Force::Auto => auto_backend(),
    }
  }

  /// Configuration read from [`BLAKE2_FORCE_ENV`], cached for the process lifetime.
  ///
  /// An empty value counts as unset; an unrecognized one logs a warning. Both
  /// fall back to [`Blake2Force::Auto`].
  #[cfg(feature = "std")]
  #[must_use]
  pub fn from_env() -> Self {
    use std::sync::OnceLock;
    static CONFIG: OnceLock<Config> = OnceLock::new();
    *CONFIG.get_or_init(|| {
      let config = Self::new(read_env_force());
      log::debug!(
        "blake2 backend: requested={} effective={}",
        config.requested.as_str(),
        config.blake2_backend().as_str()
      );
      config
    })
  }
}

#[cfg(feature = "std")]
fn read_env_force() -> Blake2Force {
  force_from(std::env::var(BLAKE2_FORCE_ENV).ok().as_deref())
}

/// Requested mode for a raw override value.
///
/// Unset, empty, and whitespace-only values mean [`Blake2Force::Auto`]
/// silently; anything else unrecognized falls back to `Auto` with a warning.
#[cfg(any(feature = "std", test))]
fn force_from(value: Option<&str>) -> Blake2Force {
  let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
    return Blake2Force::Auto;
  };
  Blake2Force::parse(value).unwrap_or_else(|| {
    log::warn!("ignoring unrecognized {BLAKE2_FORCE_ENV}={value:?}; using auto");
    Blake2Force::Auto
  })
}

#[inline]
#[must_use]
const fn auto_backend() -> Blake2Backend {
  if cfg!(any(target_arch = "x86_64", target_arch = "x86")) {
    Blake2Backend::Simd
  } else {
    Blake2Backend::Portable
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_accepts_aliases() {
    assert_eq!(Blake2Force::parse("AUTO"), Some(Blake2Force::Auto));
    assert_eq!(Blake2Force::parse(" portable "), Some(Blake2Force::Portable));
    assert_eq!(Blake2Force::parse("scalar"), Some(Blake2Force::Portable));
    assert_eq!(Blake2Force::parse("Native"), Some(Blake2Force::Simd));
    assert_eq!(Blake2Force::parse("simd"), Some(Blake2Force::Simd));
    assert_eq!(Blake2Force::parse("avx2"), None);
  }

  #[test]
  fn override_values_fall_back_to_auto() {
    assert_eq!(force_from(None), Blake2Force::Auto);
    assert_eq!(force_from(Some("")), Blake2Force::Auto);
    assert_eq!(force_from(Some("   ")), Blake2Force::Auto);
    assert_eq!(force_from(Some("bogus")), Blake2Force::Auto);
    assert_eq!(force_from(Some(" Scalar ")), Blake2Force::Portable);
    assert_eq!(force_from(Some("native")), Blake2Force::Simd);
    assert_eq!(force_from(Some("auto")), Blake2Force::Auto);
  }

  #[test]
  fn forced_modes_are_respected() {
    assert_eq!(
      Config::new(Blake2Force::Portable).blake2_backend(),
      Blake2Backend::Portable
    );
    assert_eq!(Config::new(Blake2Force::Simd).blake2_backend(), Blake2Backend::Simd);
  }

  #[test]
  fn auto_follows_target() {
    let expected = if cfg!(any(target_arch = "x86_64", target_arch = "x86")) {
      Blake2Backend::Simd
    } else {
      Blake2Backend::Portable
    };
    assert_eq!(Config::default().blake2_backend(), expected);
  }

  #[test]
  fn as_str_round_trips_through_parse() {
    for force in [Blake2Force::Auto, Blake2Force::Portable, Blake2Force::Simd] {
      assert_eq!(Blake2Force::parse(force.as_str()), Some(force));
    }
  }
}
