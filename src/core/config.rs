use serde::{Deserialize, Serialize};

use super::error::ConvertError;
use super::messages::{Language, primary_subtag};

/// Settings shared by every conversion a converter performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Locale of finding messages (e.g. "de-AT").
    pub display_locale: String,
    /// Locale of the produced document; decides the document language.
    pub content_locale: String,
    /// Apply the additional E-RECHNUNG.GV.AT checks (order reference,
    /// payment method and delivery are mandatory).
    pub strict_erb: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            display_locale: "de-AT".into(),
            content_locale: "de-AT".into(),
            strict_erb: false,
        }
    }
}

impl ConverterConfig {
    /// Language finding messages are rendered in.
    pub fn display_language(&self) -> Language {
        Language::from_locale(&self.display_locale)
    }

    /// ISO 639-2 code of the content locale, if it is one the target format knows.
    pub fn document_language(&self) -> Option<&'static str> {
        let tag = primary_subtag(&self.content_locale)?.to_ascii_lowercase();
        ISO_639_2
            .iter()
            .find(|(two, _)| *two == tag)
            .map(|(_, three)| *three)
    }
}

/// ISO 639-1 to ISO 639-2/B for the languages used on Austrian invoices.
const ISO_639_2: &[(&str, &str)] = &[
    ("cs", "cze"),
    ("de", "ger"),
    ("en", "eng"),
    ("es", "spa"),
    ("fr", "fre"),
    ("hr", "hrv"),
    ("hu", "hun"),
    ("it", "ita"),
    ("nl", "dut"),
    ("pl", "pol"),
    ("sk", "slo"),
    ("sl", "slv"),
];

/// Builder for [`ConverterConfig`].
///
/// # Example
///
/// ```
/// use ebiconv::core::ConverterConfigBuilder;
///
/// let config = ConverterConfigBuilder::new()
///     .display_locale("en-GB")
///     .strict_erb(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.content_locale, "de-AT");
/// assert_eq!(config.document_language(), Some("ger"));
/// ```
#[derive(Debug, Default)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locale of finding messages.
    pub fn display_locale(mut self, locale: impl Into<String>) -> Self {
        self.config.display_locale = locale.into();
        self
    }

    /// Set the locale of the produced document.
    pub fn content_locale(mut self, locale: impl Into<String>) -> Self {
        self.config.content_locale = locale.into();
        self
    }

    /// Enable or disable the E-RECHNUNG.GV.AT checks.
    pub fn strict_erb(mut self, strict: bool) -> Self {
        self.config.strict_erb = strict;
        self
    }

    /// Build the configuration.
    ///
    /// Fails if a locale has no usable language subtag (2 or 3 ASCII letters).
    pub fn build(self) -> Result<ConverterConfig, ConvertError> {
        for (name, locale) in [
            ("display_locale", &self.config.display_locale),
            ("content_locale", &self.config.content_locale),
        ] {
            let valid = primary_subtag(locale)
                .is_some_and(|tag| (2..=3).contains(&tag.len()) && tag.chars().all(|c| c.is_ascii_alphabetic()));
            if !valid {
                return Err(ConvertError::Config(format!("{name} '{locale}' is not a valid locale")));
            }
        }
        Ok(self.config)
    }
}
