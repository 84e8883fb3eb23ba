//! The canonical application table.
//!
//! One immutable table shared by the open and close rule groups of the
//! classifier and by the open/close action providers, so trigger phrases,
//! launch specs, and kill targets cannot drift apart.

/// How an application is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// Program candidates, tried in order until one spawns.
    Programs(&'static [&'static str]),
    /// URL handed to the platform opener.
    Url(&'static str),
    /// Well-known user directory handed to the platform opener.
    UserDir(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct AppEntry {
    /// Canonical key, the `param` carried inside an `Intent`.
    pub key: &'static str,
    /// Human-readable name used in responses ("Opened Notepad.").
    pub display: &'static str,
    /// Trigger phrases matched by substring containment, scanned in order.
    pub phrases: &'static [&'static str],
    pub launch: Launch,
    /// Process names handed to the platform kill command on close.
    pub process_names: &'static [&'static str],
}

/// Scanned in this order by the classifier; first entry with a matching
/// phrase wins, so earlier entries shadow later ones.
pub const APP_TABLE: &[AppEntry] = &[
    AppEntry {
        key: "notepad",
        display: "Notepad",
        phrases: &["notepad"],
        launch: Launch::Programs(&["notepad.exe", "notepad", "gedit", "kate"]),
        process_names: &["notepad.exe", "notepad", "gedit"],
    },
    AppEntry {
        key: "calc",
        display: "Calc",
        phrases: &["calculator", "calc"],
        launch: Launch::Programs(&["calc.exe", "gnome-calculator", "kcalc"]),
        process_names: &["calc.exe", "gnome-calculator", "kcalc"],
    },
    AppEntry {
        key: "browser",
        display: "Browser",
        phrases: &["browser", "chrome", "edge"],
        launch: Launch::Url("https://www.google.com"),
        process_names: &["chrome", "msedge", "firefox"],
    },
    AppEntry {
        key: "vscode",
        display: "VS Code",
        phrases: &["vs code", "vscode", "visual studio code"],
        launch: Launch::Programs(&["code"]),
        process_names: &["code"],
    },
    AppEntry {
        key: "explorer",
        display: "Explorer",
        phrases: &["explorer", "file manager"],
        launch: Launch::Programs(&["explorer.exe", "nautilus", "dolphin"]),
        process_names: &["explorer.exe", "nautilus", "dolphin"],
    },
    AppEntry {
        key: "youtube",
        display: "YouTube",
        phrases: &["youtube"],
        launch: Launch::Url("https://www.youtube.com"),
        process_names: &[],
    },
    AppEntry {
        key: "downloads",
        display: "Downloads",
        phrases: &["downloads"],
        launch: Launch::UserDir("Downloads"),
        process_names: &[],
    },
    AppEntry {
        key: "documents",
        display: "Documents",
        phrases: &["documents"],
        launch: Launch::UserDir("Documents"),
        process_names: &[],
    },
    AppEntry {
        key: "whatsapp",
        display: "WhatsApp",
        phrases: &["whatsapp", "whats app"],
        launch: Launch::Url("https://web.whatsapp.com"),
        process_names: &["WhatsApp"],
    },
    AppEntry {
        key: "word",
        display: "Word",
        phrases: &["word"],
        launch: Launch::Programs(&["winword.exe", "winword"]),
        process_names: &["winword.exe"],
    },
    AppEntry {
        key: "excel",
        display: "Excel",
        phrases: &["excel"],
        launch: Launch::Programs(&["excel.exe", "excel"]),
        process_names: &["excel.exe"],
    },
    AppEntry {
        key: "powerpoint",
        display: "PowerPoint",
        phrases: &["powerpoint", "power point"],
        launch: Launch::Programs(&["powerpnt.exe", "powerpnt"]),
        process_names: &["powerpnt.exe"],
    },
];

/// Table-order scan: first entry with any phrase contained in `text` wins.
/// `text` is expected to be normalized (lowercase) already.
pub fn match_phrase(text: &str) -> Option<&'static AppEntry> {
    APP_TABLE
        .iter()
        .find(|entry| entry.phrases.iter().any(|p| text.contains(p)))
}

pub fn by_key(key: &str) -> Option<&'static AppEntry> {
    APP_TABLE.iter().find(|entry| entry.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keys_unique() {
        for (i, a) in APP_TABLE.iter().enumerate() {
            for b in &APP_TABLE[i + 1..] {
                assert_ne!(a.key, b.key, "duplicate app key");
            }
        }
    }

    #[test]
    fn test_table_entries_well_formed() {
        for entry in APP_TABLE {
            assert!(!entry.key.is_empty());
            assert!(!entry.display.is_empty());
            assert!(!entry.phrases.is_empty(), "{} has no phrases", entry.key);
            assert_eq!(entry.key, entry.key.to_lowercase());
            for phrase in entry.phrases {
                assert_eq!(*phrase, phrase.to_lowercase());
            }
        }
    }

    #[test]
    fn test_match_phrase_finds_notepad() {
        let entry = match_phrase("open notepad please").unwrap();
        assert_eq!(entry.key, "notepad");
    }

    #[test]
    fn test_match_phrase_calculator_synonym() {
        let entry = match_phrase("open calculator").unwrap();
        assert_eq!(entry.key, "calc");
        assert_eq!(entry.display, "Calc");
    }

    #[test]
    fn test_match_phrase_table_order_wins() {
        // "notepad" precedes "word" in the table; a text containing both
        // resolves to the earlier entry.
        let entry = match_phrase("open notepad and word").unwrap();
        assert_eq!(entry.key, "notepad");
    }

    #[test]
    fn test_match_phrase_no_match() {
        assert!(match_phrase("open the pod bay doors").is_none());
    }

    #[test]
    fn test_by_key_round_trip() {
        for entry in APP_TABLE {
            assert_eq!(by_key(entry.key).unwrap().key, entry.key);
        }
        assert!(by_key("winamp").is_none());
    }
}
