//! Translation lookup.
//!
//! A pure two-level mapping: language code → message key → string. Lookups
//! fall back to the default language, then to the key itself. The literal
//! key only ever reaches the user when even the default table lacks it, and
//! that case is logged.

use std::collections::HashMap;

use strum::{AsRefStr, Display, EnumIter};

use crate::preference::DEFAULT_LANGUAGE;

/// Message keys surfaced by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum MessageKey {
    ErrorCountryDates,
    ErrorBuildReport,
    ErrorBuildCancelled,
    ErrorDownload,
    ErrorHistorySave,
    ErrorHistoryUpdate,
    ErrorSettingsSave,
    ErrorUnsupportedLanguage,
    ErrorPreviewUnavailable,
    Collecting,
    Processing,
    Summarizing,
    Ready,
    Downloading,
    MockDownload,
    SettingsSaved,
}

/// Translation collaborator.
pub trait Translator: Send + Sync {
    fn translate(&self, language: &str, key: &str) -> String;

    fn message(&self, language: &str, key: MessageKey) -> String {
        self.translate(language, key.as_ref())
    }
}

const EN: &[(&str, &str)] = &[
    ("errorCountryDates", "Please pick a country and valid dates."),
    ("errorBuildReport", "Could not build report. Please try again."),
    ("errorBuildCancelled", "Report build was cancelled."),
    ("errorDownload", "Download failed. Please try again."),
    ("errorHistorySave", "The report was built but could not be saved to history."),
    ("errorHistoryUpdate", "Could not update report history. Please try again."),
    ("errorSettingsSave", "Settings could not be saved. Please try again."),
    ("errorUnsupportedLanguage", "That language is not supported."),
    ("errorPreviewUnavailable", "Build or open a report before previewing."),
    ("collecting", "Collecting Data"),
    ("processing", "Processing"),
    ("summarizing", "Summarizing"),
    ("ready", "Ready"),
    ("downloading", "Downloading"),
    ("mockDownload", "This is a mock download"),
    ("settingsSaved", "Settings saved successfully!"),
];

const ES: &[(&str, &str)] = &[
    ("errorCountryDates", "Por favor selecciona un país y fechas válidas."),
    ("errorBuildReport", "No se pudo generar el informe. Inténtalo de nuevo."),
    ("errorDownload", "Error en la descarga. Inténtalo de nuevo."),
    ("collecting", "Recopilando Datos"),
    ("processing", "Procesando"),
    ("summarizing", "Resumiendo"),
    ("ready", "Listo"),
    ("downloading", "Descargando"),
    ("mockDownload", "Esta es una descarga simulada"),
    ("settingsSaved", "¡Configuración guardada exitosamente!"),
];

const FR: &[(&str, &str)] = &[
    ("errorCountryDates", "Veuillez sélectionner un pays et des dates valides."),
    ("errorBuildReport", "Impossible de générer le rapport. Veuillez réessayer."),
    ("errorDownload", "Échec du téléchargement. Veuillez réessayer."),
    ("collecting", "Collecte des Données"),
    ("processing", "Traitement"),
    ("summarizing", "Résumé"),
    ("ready", "Prêt"),
    ("downloading", "Téléchargement"),
    ("mockDownload", "Ceci est un téléchargement simulé"),
    ("settingsSaved", "Paramètres enregistrés avec succès !"),
];

const AR: &[(&str, &str)] = &[
    ("errorCountryDates", "يرجى اختيار بلد وتواريخ صحيحة"),
    ("errorBuildReport", "لا يمكن إنشاء التقرير"),
    ("errorDownload", "فشل التحميل"),
    ("collecting", "جمع البيانات"),
    ("processing", "المعالجة"),
    ("summarizing", "التلخيص"),
    ("ready", "جاهز"),
    ("downloading", "جاري التحميل"),
    ("mockDownload", "هذا تحميل وهمي"),
    ("settingsSaved", "تم حفظ الإعدادات بنجاح!"),
];

/// Built-in translation table.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    tables: HashMap<&'static str, HashMap<&'static str, &'static str>>,
    default_language: String,
}

impl TranslationTable {
    /// Creates the table shipped with the application, defaulting to English.
    pub fn builtin() -> Self {
        let tables = [("en", EN), ("es", ES), ("fr", FR), ("ar", AR)]
            .into_iter()
            .map(|(code, entries)| (code, entries.iter().copied().collect()))
            .collect();
        Self {
            tables,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&'static str> {
        self.tables.get(language).and_then(|table| table.get(key)).copied()
    }
}

impl Default for TranslationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Translator for TranslationTable {
    fn translate(&self, language: &str, key: &str) -> String {
        if let Some(text) = self.lookup(language, key) {
            return text.to_string();
        }
        if let Some(text) = self.lookup(&self.default_language, key) {
            return text.to_string();
        }
        tracing::debug!(language, key, "[I18n] Missing translation, surfacing key");
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_message_key_has_an_english_entry() {
        let table = TranslationTable::builtin();
        for key in MessageKey::iter() {
            assert_ne!(table.message("en", key), key.as_ref(), "missing {key}");
        }
    }

    #[test]
    fn test_requested_language_wins() {
        let table = TranslationTable::builtin();
        assert_eq!(table.message("fr", MessageKey::Ready), "Prêt");
    }

    #[test]
    fn test_falls_back_to_english_for_missing_key() {
        let table = TranslationTable::builtin();
        assert_eq!(
            table.message("es", MessageKey::ErrorBuildCancelled),
            "Report build was cancelled."
        );
    }

    #[test]
    fn test_falls_back_to_english_for_unknown_language() {
        let table = TranslationTable::builtin();
        assert_eq!(table.message("de", MessageKey::Processing), "Processing");
    }

    #[test]
    fn test_unknown_key_surfaces_key() {
        let table = TranslationTable::builtin();
        assert_eq!(table.translate("en", "noSuchKey"), "noSuchKey");
    }
}
