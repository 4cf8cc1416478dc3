use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    str::FromStr,
    sync::RwLock,
};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Pl,
}

/// Ordered list of supported locales, for the header's language buttons
pub const SUPPORTED_LOCALES: [Locale; 2] = [Locale::En, Locale::Pl];

impl Locale {
    pub const DEFAULT: Locale = Locale::En;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pl => "pl",
        }
    }

    /// Lenient parse: case-insensitive, tolerates region tags ("pl-PL")
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "pl" => Some(Self::Pl),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = crate::error::HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::error::HelpdeskError::UnsupportedLocale(s.to_string()))
    }
}

fn catalog(locale: Locale) -> HashMap<&'static str, &'static str> {
    match locale {
        Locale::En => HashMap::from([
            ("app.title", "Support Tickets"),
            ("tickets.loading", "Loading..."),
            ("tickets.error", "Something went wrong"),
            ("tickets.filter.all", "All statuses"),
            ("ticket.status.new", "New"),
            ("ticket.status.in_progress", "In Progress"),
            ("ticket.status.closed", "Closed"),
            ("ticket.priority.low", "Low"),
            ("ticket.priority.medium", "Medium"),
            ("ticket.priority.high", "High"),
            ("ticket.update_status", "Update status"),
            ("header.locale.en", "EN"),
            ("header.locale.pl", "PL"),
        ]),
        Locale::Pl => HashMap::from([
            ("app.title", "Zgłoszenia serwisowe"),
            ("tickets.loading", "Ładowanie..."),
            ("tickets.error", "Coś poszło nie tak"),
            ("tickets.filter.all", "Wszystkie statusy"),
            ("ticket.status.new", "Nowe"),
            ("ticket.status.in_progress", "W toku"),
            ("ticket.status.closed", "Zamknięte"),
            ("ticket.priority.low", "Niski"),
            ("ticket.priority.medium", "Średni"),
            ("ticket.priority.high", "Wysoki"),
            ("ticket.update_status", "Zmień status"),
            ("header.locale.en", "EN"),
            ("header.locale.pl", "PL"),
        ]),
    }
}

/// Text-rendering layer: message catalogs plus the active language.
///
/// Shared as `Arc<Translator>` between the locale store (which writes the
/// language) and views (which read labels). Lookups fall back to English and
/// then to the key itself, so a missing translation never panics a render.
pub struct Translator {
    active: RwLock<Locale>,
    catalogs: HashMap<Locale, HashMap<&'static str, &'static str>>,
}

impl Translator {
    pub fn new() -> Self {
        Self {
            active: RwLock::new(Locale::DEFAULT),
            catalogs: SUPPORTED_LOCALES
                .into_iter()
                .map(|locale| (locale, catalog(locale)))
                .collect(),
        }
    }

    /// The currently active language
    pub fn language(&self) -> Locale {
        *self.active.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Switches the active language for all subsequent lookups
    pub fn set_language(&self, locale: Locale) {
        *self.active.write().unwrap_or_else(|e| e.into_inner()) = locale;
    }

    /// Resolves a message key in the active catalog, falling back to
    /// English, then to the key itself
    pub fn translate(&self, key: &str) -> String {
        let active = self.language();
        self.catalogs
            .get(&active)
            .and_then(|c| c.get(key))
            .or_else(|| self.catalogs.get(&Locale::En).and_then(|c| c.get(key)))
            .map(|s| (*s).to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
