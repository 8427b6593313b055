//! Cyrillic transliteration and wrong-keyboard-layout recovery.

use std::collections::HashMap;
use std::fmt;

use crate::domain::text::{translate_chars, ucfirst};

const CYRILLIC: &str = "абвгдезийклмнопрстуфхъыэі";
const LATIN: &str = "abvgdeziyklmnoprstufh'iei";

const DIGRAPHS: &[(char, &str)] = &[
    ('ж', "zh"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "shch"),
    ('ь', ""),
    ('ю', "yu"),
    ('я', "ya"),
    ('ї', "yi"),
    ('є', "ie"),
    ('ё', "yo"),
    ('х', "kh"),
];

/// Transliteration flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Russian,
    /// `и` reads as `y`.
    Ukrainian,
}

impl Variant {
    fn overrides(self) -> &'static [(char, &'static str)] {
        match self {
            Variant::Russian => &[],
            Variant::Ukrainian => &[('и', "y")],
        }
    }
}

fn upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Transliterate Cyrillic text to Latin.
pub fn translit(s: &str, variant: Variant) -> String {
    translit_with(s, variant.overrides())
}

/// Transliterate with extra lowercase mappings; uppercase forms are derived.
pub fn translit_with(s: &str, overrides: &[(char, &str)]) -> String {
    let mut table: HashMap<char, String> = HashMap::new();
    for (c, l) in CYRILLIC.chars().zip(LATIN.chars()) {
        table.insert(c, l.to_string());
        table.insert(upper(c), l.to_ascii_uppercase().to_string());
    }
    for (c, latin) in DIGRAPHS.iter().chain(overrides) {
        table.insert(*c, latin.to_string());
        table.insert(upper(*c), ucfirst(latin));
    }

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match table.get(&c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// Keyboard layouts known to [`switch_keyboard`]; all share one key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    En,
    Ru,
    Uk,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::En, Layout::Ru, Layout::Uk];

    pub fn symbols(self) -> &'static str {
        match self {
            Layout::En => {
                "abcdefghijklmnopqrstuvwxyz[];',.ABCDEFGHIJKLMNOPQRSTUVWXYZ{}:\"<>`~@#$^&"
            }
            Layout::Ru => {
                "фисвуапршолдьтщзйкыегмцчняхъжэбюФИСВУАПРШОЛДЬТЩЗЙКЫЕГМЦЧНЯХЪЖЭБЮёЁ\"№;:?"
            }
            Layout::Uk => {
                "фисвуапршолдьтщзйкіегмцчняхїжєбюФИСВУАПРШОЛДЬТЩЗЙКІЕГМЦЧНЯХЇЖЄБЮ'₴\"№;:?"
            }
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::En => "en",
            Layout::Ru => "ru",
            Layout::Uk => "uk",
        };
        f.write_str(name)
    }
}

/// Layout with the most symbols of `s`; earlier layouts win ties, `En` by default.
pub fn detect_layout(s: &str) -> Layout {
    let mut best = Layout::En;
    let mut max = 0;
    for layout in Layout::ALL {
        let symbols = layout.symbols();
        let count = s.chars().filter(|&c| symbols.contains(c)).count();
        if count > max {
            best = layout;
            max = count;
        }
    }
    best
}

/// Re-type `s` as if it had been entered in each other layout.
///
/// Results identical to the input or to an earlier result are skipped, so
/// `ghbdtn` yields just `привет` (Russian and Ukrainian agree).
pub fn switch_keyboard(s: &str) -> Vec<String> {
    let current = detect_layout(s);
    let mut results: Vec<String> = Vec::new();
    for layout in Layout::ALL {
        if layout == current {
            continue;
        }
        let retyped = translate_chars(s, current.symbols(), layout.symbols());
        if retyped != s && !results.contains(&retyped) {
            results.push(retyped);
        }
    }
    results
}
