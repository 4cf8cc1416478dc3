use crate::{
    error::Result,
    i18n::{Locale, Translator},
    prefs::{PreferenceStorage, LANG_KEY},
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Owns the active interface language.
///
/// Every assignment, the initial one included, pushes the language into the
/// translator and persists it under the `"lang"` key as one unit; there is no
/// path where the locale changes without both effects firing.
pub struct LocaleStore {
    locale: Locale,
    translator: Arc<Translator>,
    prefs: Arc<dyn PreferenceStorage>,
    changes: watch::Sender<Locale>,
}

impl LocaleStore {
    /// Reads the persisted preference (default English when absent or
    /// unreadable) and immediately applies it
    pub fn new(translator: Arc<Translator>, prefs: Arc<dyn PreferenceStorage>) -> Result<Self> {
        let persisted = prefs.load(LANG_KEY)?;
        let locale = persisted
            .as_deref()
            .and_then(Locale::parse)
            .unwrap_or(Locale::DEFAULT);

        let (changes, _) = watch::channel(locale);
        let mut store = Self {
            locale,
            translator,
            prefs,
            changes,
        };
        store.apply(locale)?;
        Ok(store)
    }

    /// The active locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns a receiver notified on every locale assignment
    pub fn subscribe(&self) -> watch::Receiver<Locale> {
        self.changes.subscribe()
    }

    /// Assigns the locale; re-fires propagation and persistence even when
    /// the value is unchanged
    pub fn set_locale(&mut self, locale: Locale) -> Result<()> {
        self.apply(locale)
    }

    fn apply(&mut self, locale: Locale) -> Result<()> {
        debug!(locale = %locale, "applying locale");
        self.locale = locale;
        self.translator.set_language(locale);
        self.prefs.save(LANG_KEY, locale.as_str())?;
        self.changes.send_replace(locale);
        Ok(())
    }
}
