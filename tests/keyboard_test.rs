//! Integration tests for transliteration and keyboard layout switching.

use rstest::rstest;

use vvkit::domain::keyboard::{detect_layout, switch_keyboard, translit, translit_with, Layout, Variant};

#[rstest]
#[case("привет", Variant::Russian, "privet")]
#[case("привіт", Variant::Ukrainian, "pryvit")]
#[case("Щука", Variant::Russian, "Shchuka")]
#[case("Жизнь", Variant::Russian, "Zhizn")]
#[case("хлеб", Variant::Russian, "khleb")]
#[case("abc 123", Variant::Russian, "abc 123")]
fn given_cyrillic_when_transliterating_then_returns_latin(
    #[case] input: &str,
    #[case] variant: Variant,
    #[case] expected: &str,
) {
    assert_eq!(translit(input, variant), expected);
}

#[test]
fn given_override_when_transliterating_then_override_wins_in_both_cases() {
    assert_eq!(translit_with("Юля", &[('ю', "ju")]), "Julya");
}

#[test]
fn given_digraph_output_when_transliterating_then_not_translated_again() {
    // "ш" -> "sh"; the produced "s" and "h" stay Latin
    assert_eq!(translit("шшш", Variant::Russian), "shshsh");
}

#[rstest]
#[case("hello", Layout::En)]
#[case("", Layout::En)]
#[case("руддщ", Layout::Ru)]
#[case("її", Layout::Uk)]
fn given_text_when_detecting_layout_then_picks_majority(
    #[case] input: &str,
    #[case] expected: Layout,
) {
    assert_eq!(detect_layout(input), expected);
}

#[test]
fn given_latin_typed_russian_when_switching_then_single_candidate() {
    assert_eq!(switch_keyboard("ghbdtn"), ["привет"]);
}

#[test]
fn given_russian_typed_latin_when_switching_then_recovers_english() {
    assert_eq!(switch_keyboard("руддщ"), ["hello"]);
}

#[test]
fn given_letters_that_differ_between_cyrillic_layouts_when_switching_then_both_returned() {
    // `s` sits where Russian has `ы` and Ukrainian has `і`
    assert_eq!(switch_keyboard("s"), ["ы", "і"]);
}

#[test]
fn given_layout_when_displaying_then_short_code() {
    let names: Vec<String> = Layout::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(names, ["en", "ru", "uk"]);
}
