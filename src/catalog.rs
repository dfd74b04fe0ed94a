//! Language catalog: the fixed table of languages a round can be drawn from.
//!
//! The built-in table is created once on first access through a `OnceLock`
//! singleton and stays immutable for the lifetime of the process. Tests and
//! callers that need a smaller table build their own with
//! [`LanguageCatalog::new`].

use serde::Serialize;
use std::sync::OnceLock;

/// One language the quiz can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    /// English name shown on the flag button (e.g., "Czech")
    pub name: &'static str,

    /// BCP-47 tag used to pick the synthesized voice (e.g., "cs-CZ")
    pub locale_code: &'static str,

    /// Phrase spoken aloud when this language is the correct answer
    pub phrase: &'static str,

    /// Identifier of the flag image for this language
    pub flag_id: &'static str,
}

impl Language {
    /// Primary language subtag of the locale, lowercased ("cs-CZ" -> "cs").
    pub fn primary_subtag(&self) -> String {
        self.locale_code
            .split('-')
            .next()
            .unwrap_or(self.locale_code)
            .to_ascii_lowercase()
    }
}

/// An ordered collection of languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

/// Global catalog instance (initialized lazily)
static CATALOG: OnceLock<LanguageCatalog> = OnceLock::new();

impl LanguageCatalog {
    /// Get the built-in catalog.
    pub fn get() -> &'static LanguageCatalog {
        CATALOG.get_or_init(|| LanguageCatalog {
            languages: default_languages(),
        })
    }

    /// Build a catalog from an explicit list of languages.
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Find a language by its exact BCP-47 locale code.
    pub fn get_by_locale(&self, locale_code: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|lang| lang.locale_code == locale_code)
    }

    /// Find a language by name, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|lang| lang.name.eq_ignore_ascii_case(name))
    }
}

fn default_languages() -> Vec<Language> {
    vec![
        Language {
            name: "Czech",
            locale_code: "cs-CZ",
            phrase: "Učení je celoživotní výkon.",
            flag_id: "czechFlag",
        },
        Language {
            name: "Danish",
            locale_code: "da-DK",
            phrase: "Læring er en livslang stræben.",
            flag_id: "denmarkFlag",
        },
        Language {
            name: "German",
            locale_code: "de-DE",
            phrase: "Lernen ist eine lebenslange Reise.",
            flag_id: "germanyFlag",
        },
        Language {
            name: "Spanish",
            locale_code: "es-ES",
            phrase: "El aprendizaje es una búsqueda que dura toda la vida.",
            flag_id: "spainFlag",
        },
        Language {
            name: "French",
            locale_code: "fr-FR",
            phrase: "L'apprentissage est une longue quête de la vie.",
            flag_id: "franceFlag",
        },
        Language {
            name: "Polish",
            locale_code: "pl-PL",
            phrase: "Uczenie się przez całe życie pościg.",
            flag_id: "polandFlag",
        },
        Language {
            name: "English",
            locale_code: "en-US",
            phrase: "Learning is a life long pursuit.",
            flag_id: "unitedStatesFlag",
        },
        Language {
            name: "Portuguese",
            locale_code: "pt-BR",
            phrase: "A aprendizagem é um longa busca que dura toda a vida.",
            flag_id: "brazilFlag",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ==================== Singleton Tests ====================

    #[test]
    fn test_get_returns_singleton() {
        let catalog1 = LanguageCatalog::get();
        let catalog2 = LanguageCatalog::get();

        assert!(std::ptr::eq(catalog1, catalog2));
    }

    #[test]
    fn test_default_catalog_has_eight_languages() {
        let catalog = LanguageCatalog::get();
        assert_eq!(catalog.len(), 8);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_default_catalog_order() {
        let names: Vec<_> = LanguageCatalog::get()
            .languages()
            .iter()
            .map(|lang| lang.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "Czech",
                "Danish",
                "German",
                "Spanish",
                "French",
                "Polish",
                "English",
                "Portuguese"
            ]
        );
    }

    #[test]
    fn test_default_catalog_entries_are_unique() {
        let catalog = LanguageCatalog::get();
        let locales: HashSet<_> = catalog.languages().iter().map(|l| l.locale_code).collect();
        let flags: HashSet<_> = catalog.languages().iter().map(|l| l.flag_id).collect();

        assert_eq!(locales.len(), catalog.len());
        assert_eq!(flags.len(), catalog.len());
    }

    #[test]
    fn test_default_catalog_entries_are_filled_in() {
        for lang in LanguageCatalog::get().languages() {
            assert!(!lang.name.is_empty());
            assert!(!lang.phrase.is_empty());
            assert!(!lang.flag_id.is_empty());
            assert!(lang.locale_code.contains('-'), "{} is not a region tag", lang.locale_code);
        }
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_get_by_locale() {
        let danish = LanguageCatalog::get().get_by_locale("da-DK").unwrap();
        assert_eq!(danish.name, "Danish");
        assert_eq!(danish.flag_id, "denmarkFlag");
    }

    #[test]
    fn test_get_by_locale_nonexistent() {
        assert!(LanguageCatalog::get().get_by_locale("ja-JP").is_none());
        assert!(LanguageCatalog::get().get_by_locale("da").is_none());
    }

    #[test]
    fn test_get_by_name_ignores_case() {
        let catalog = LanguageCatalog::get();
        assert_eq!(catalog.get_by_name("german").unwrap().locale_code, "de-DE");
        assert_eq!(catalog.get_by_name("GERMAN").unwrap().locale_code, "de-DE");
        assert!(catalog.get_by_name("Klingon").is_none());
    }

    // ==================== Language Tests ====================

    #[test]
    fn test_primary_subtag() {
        let catalog = LanguageCatalog::get();
        assert_eq!(catalog.get_by_name("Portuguese").unwrap().primary_subtag(), "pt");
        assert_eq!(catalog.get_by_name("English").unwrap().primary_subtag(), "en");
    }

    #[test]
    fn test_language_serialization() {
        let czech = LanguageCatalog::get().languages()[0];
        let json = serde_json::to_string(&czech).expect("Should serialize");

        assert!(json.contains("\"name\":\"Czech\""));
        assert!(json.contains("\"locale_code\":\"cs-CZ\""));
        assert!(json.contains("\"flag_id\":\"czechFlag\""));
    }

    #[test]
    fn test_custom_catalog() {
        let all = LanguageCatalog::get().languages();
        let catalog = LanguageCatalog::new(all[..2].to_vec());

        assert_eq!(catalog.len(), 2);
        assert!(catalog.get_by_name("German").is_none());
        assert!(LanguageCatalog::new(Vec::new()).is_empty());
    }
}
