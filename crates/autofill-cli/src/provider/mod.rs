//! Machine-translation providers.

mod deepl;

pub use deepl::DeepLProvider;

use std::fmt;
use thiserror::Error;

/// Errors raised by a translation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// The request never got an answer (DNS, TLS, timeout...).
    #[error("request failed: {0}")]
    Transport(String),
    /// The answer could not be decoded.
    #[error("unexpected response: {0}")]
    Malformed(String),
    /// The answer does not line up with the submitted texts.
    #[error("expected {expected} translation(s), received {received}")]
    LengthMismatch { expected: usize, received: usize },
}

/// Character quota of the provider account.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize)]
pub struct Usage {
    pub character_count: u64,
    pub character_limit: u64,
}

impl Usage {
    /// Share of the quota used, in percent rounded to two decimals.
    pub fn percentage(&self) -> f64 {
        if self.character_limit == 0 {
            return 0.0;
        }
        let ratio = self.character_count as f64 / self.character_limit as f64 * 100.0;
        (ratio * 100.0).round() / 100.0
    }
}

/// `1,234 / 500,000 characters (0.25%)`
impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} characters ({:.2}%)",
            group_thousands(self.character_count),
            group_thousands(self.character_limit),
            self.percentage()
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// A service that translates texts in batches.
pub trait TranslationProvider {
    /// Name used in review notes.
    fn name(&self) -> &str;

    /// Translate `texts`, returning the translations in the same order.
    fn translate_batch(
        &self,
        texts: &[&str],
        source_locale: &str,
        target_locale: &str,
    ) -> Result<Vec<String>, ProviderError>;

    /// Current character quota.
    fn usage(&self) -> Result<Usage, ProviderError>;
}
