const EN: &[(&str, &str)] = &[
    ("all", "All"),
    ("history", "History"),
    ("keywordSearch", "Search by keyword"),
    ("addCollection", "Add collection"),
    ("removeCollection", "Remove collection"),
];

const JA: &[(&str, &str)] = &[
    ("all", "すべて"),
    ("history", "履歴"),
    ("keywordSearch", "キーワード検索"),
    ("addCollection", "コレクションを追加"),
    ("removeCollection", "コレクションを削除"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// Unknown language codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        let lowered = code.trim().to_ascii_lowercase();
        match lowered.split(['-', '_']).next() {
            Some("ja") => Self::Ja,
            _ => Self::En,
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::En => EN,
            Self::Ja => JA,
        }
    }
}

/// Display strings for tab names and static UI keys. User collection names
/// have no entry and are shown as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Labels {
    language: Language,
}

impl Labels {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn for_code(code: &str) -> Self {
        Self::new(Language::from_code(code))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn label(&self, key: &str) -> String {
        lookup(self.language.table(), key)
            .or_else(|| lookup(EN, key))
            .unwrap_or(key)
            .to_string()
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, text)| *text)
}
