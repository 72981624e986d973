// crates/cogitate-logic/tests/fallacy_categories.rs
// ============================================================================
// Module: Fallacy Category and Example Tests
// Description: Tests that every category falls in the three-way taxonomy
//              and that each example is drawn from the analyzed text.
// ============================================================================
//! ## Overview
//! `DetectedFallacy::category` must be one of `"formal"`, `"informal"`, or
//! `"statistical"`, and `DetectedFallacy::example` must be an excerpt of the
//! text actually passed to `detect_fallacies`, not a fixed canned string
//! independent of the input.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use cogitate_logic::DetectedFallacy;
use cogitate_logic::detect_fallacies;

fn find<'a>(fallacies: &'a [DetectedFallacy], fallacy_type: &str) -> &'a DetectedFallacy {
    fallacies
        .iter()
        .find(|f| f.fallacy_type == fallacy_type)
        .unwrap_or_else(|| panic!("no {fallacy_type} detected"))
}

#[test]
fn formal_fallacies_are_categorized_formal() {
    let text = "if it rains then the ground is wet. the ground is wet. therefore it rains.";
    let fallacies = detect_fallacies(text);
    assert_eq!(find(&fallacies, "affirming_the_consequent").category, "formal");
}

#[test]
fn statistical_fallacies_are_categorized_statistical_not_informal() {
    let text = "look at all the successful founders who dropped out, so college must not matter.";
    let fallacies = detect_fallacies(text);
    assert_eq!(find(&fallacies, "survivorship_bias").category, "statistical");
}

#[test]
fn informal_fallacies_are_categorized_informal() {
    let text = "you can't trust his argument, he's a known liar.";
    let fallacies = detect_fallacies(text);
    assert_eq!(find(&fallacies, "ad_hominem").category, "informal");
}

#[test]
fn every_detected_category_is_one_of_the_three_known_values() {
    let text = "either we cut spending entirely or the company goes bankrupt. \
                you can't trust him, he's a known liar. \
                look at all the successful founders who dropped out.";
    let fallacies = detect_fallacies(text);
    assert!(!fallacies.is_empty());
    for fallacy in &fallacies {
        assert!(
            matches!(fallacy.category.as_str(), "formal" | "informal" | "statistical"),
            "unexpected category {:?} on {}",
            fallacy.category,
            fallacy.fallacy_type
        );
    }
}

#[test]
fn the_example_is_an_excerpt_of_the_analyzed_text_not_a_canned_string() {
    let text = "you can't trust his argument about the budget, he's a known liar who cheated before.";
    let fallacies = detect_fallacies(text);
    let ad_hominem = find(&fallacies, "ad_hominem");
    assert!(
        text.contains(ad_hominem.example.trim_matches(|c| c == '\u{2026}' || c == ' ')),
        "example {:?} is not drawn from the input text",
        ad_hominem.example
    );
}

#[test]
fn two_inputs_triggering_the_same_fallacy_type_produce_different_examples() {
    let first = detect_fallacies("you can't trust his argument, he's a known liar.");
    let second = detect_fallacies("you can't trust her proposal, she's a known con artist and a liar.");
    let first_example = find(&first, "ad_hominem").example.clone();
    let second_example = find(&second, "ad_hominem").example.clone();
    assert_ne!(first_example, second_example);
}
