//! Random identifiers.

use rand::Rng;
use uuid::Uuid;

use crate::domain::base::CANONICAL_ALPHABET;

/// 32 lowercase hex characters.
pub fn uid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Random code of `length` symbols.
///
/// Symbols come from `letters` when given, otherwise from the canonical
/// alphabet followed by `extra`.
pub fn gen_letter_code(length: usize, extra: Option<&str>, letters: Option<&str>) -> String {
    let pool: Vec<char> = match letters.filter(|l| !l.is_empty()) {
        Some(letters) => letters.chars().collect(),
        None => CANONICAL_ALPHABET
            .chars()
            .chain(extra.unwrap_or_default().chars())
            .collect(),
    };

    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| pool[rng.gen_range(0..pool.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_uid_when_generating_then_returns_32_hex_chars() {
        let id = uid();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn given_custom_letters_when_generating_code_then_uses_only_them() {
        let code = gen_letter_code(64, None, Some("xy"));
        assert_eq!(code.chars().count(), 64);
        assert!(code.chars().all(|c| c == 'x' || c == 'y'));
    }

    #[test]
    fn given_extra_letters_when_generating_code_then_pool_includes_canonical() {
        let code = gen_letter_code(200, Some("-_"), None);
        assert!(code
            .chars()
            .all(|c| CANONICAL_ALPHABET.contains(c) || c == '-' || c == '_'));
    }
}
