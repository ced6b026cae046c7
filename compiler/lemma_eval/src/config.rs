//! Evaluation configuration.

use lemma_ir::{NumericContext, MAX_PRECISION};

/// Default significant digits for real arithmetic.
pub const DEFAULT_PRECISION: u32 = 20;

/// Default limit on nested evaluation frames.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Per-session evaluation settings.
///
/// Runtime primitives (`Precision`, `MaxEvalDepth`, `SetExactBits`,
/// `Secure`) adjust these through `Environment::config_mut`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Significant decimal digits of real results.
    pub precision: u32,
    /// Exact results wider than this many bits are demoted to reals.
    pub max_exact_bits: Option<u64>,
    /// Maximum nested evaluation frames.
    pub max_depth: usize,
    /// Refuse primitives with side effects.
    pub secure: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            precision: DEFAULT_PRECISION,
            max_exact_bits: None,
            max_depth: DEFAULT_MAX_DEPTH,
            secure: false,
        }
    }
}

impl EvalConfig {
    /// Clamped to `1..=MAX_PRECISION`.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision.clamp(1, MAX_PRECISION);
        self
    }

    #[must_use]
    pub fn with_max_exact_bits(mut self, bits: Option<u64>) -> Self {
        self.max_exact_bits = bits;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Defaults overridden by `LEMMA_PRECISION`, `LEMMA_MAX_DEPTH` and
    /// `LEMMA_SECURE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the
    /// `LEMMA_*` keys. Unparseable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = EvalConfig::default();
        if let Some(precision) = parse_var::<u32>(&lookup, "LEMMA_PRECISION") {
            if (1..=MAX_PRECISION).contains(&precision) {
                config.precision = precision;
            } else {
                tracing::warn!(precision, max = MAX_PRECISION, "ignoring out-of-range LEMMA_PRECISION");
            }
        }
        if let Some(depth) = parse_var(&lookup, "LEMMA_MAX_DEPTH") {
            config.max_depth = depth;
        }
        if let Some(raw) = lookup("LEMMA_SECURE") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.secure = true,
                "0" | "false" | "no" | "off" => config.secure = false,
                other => tracing::warn!(value = other, "ignoring invalid LEMMA_SECURE"),
            }
        }
        config
    }

    /// Numeric context for arithmetic under this configuration.
    pub fn numeric(&self) -> NumericContext {
        NumericContext::new(self.precision).with_max_exact_bits(self.max_exact_bits)
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid configuration value");
            None
        }
    }
}
