// cogitate-logic/src/fallacy_detector.rs
// ============================================================================
// Module: Fallacy Detection
// Description: The twenty-one-type fallacy catalog behind DetectFallacies.
// Purpose: Scan free-form text for known formal and informal fallacy
//          patterns, independent of ValidateThought's narrower inline checks.
// Dependencies: crate::normalize
// ============================================================================

//! ## Overview
//! Each detector is a bounded pattern match over lowercased sentences, not a
//! general argument parser. [`detect_fallacies`] runs every detector and
//! returns every match found, in catalog order; a passage can trip more than
//! one.

use serde::Deserialize;
use serde::Serialize;

use crate::normalize::canonical;
use crate::normalize::is_negated;
use crate::normalize::parse_all;
use crate::normalize::split_conditional;
use crate::normalize::strip_negation;

/// One fallacy instance found in a passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedFallacy {
    /// Catalog name, e.g. `"affirming_the_consequent"`.
    pub fallacy_type: String,
    /// `"formal"`, `"informal"`, or `"statistical"`.
    pub category: String,
    /// The sentence the match was found in.
    pub location: String,
    /// Why this pattern is fallacious.
    pub explanation: String,
    /// A short illustrative example of the pattern.
    pub example: String,
    /// How to repair or avoid the fallacy.
    pub correction: String,
    /// Heuristic confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Splits lowercased text into trimmed, non-empty sentences.
fn sentences(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(['.', '!', '?', ';', '\n'])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// True if a sentence opens with a conclusion marker ("so", "therefore", "thus", "hence").
fn has_conclusion_marker(sentence: &str) -> bool {
    sentence.starts_with("so ")
        || sentence.starts_with("therefore")
        || sentence.starts_with("thus")
        || sentence.starts_with("hence")
        || sentence.contains(" therefore ")
}

/// Removes a leading conclusion marker, returning the bare claim.
fn strip_conclusion_marker(sentence: &str) -> String {
    for marker in ["therefore, ", "therefore ", "thus, ", "thus ", "hence, ", "hence ", "so "] {
        if let Some(rest) = sentence.strip_prefix(marker) {
            return rest.trim().to_string();
        }
    }
    sentence.trim().to_string()
}

/// Extracts ~30 chars before and ~70 chars after `keyword`'s first
/// case-insensitive occurrence in `text`, ellipsis-bracketing whichever
/// ends were trimmed away.
fn extract_example(text: &str, keyword: &str) -> String {
    const CHARS_BEFORE: usize = 30;
    const CHARS_AFTER: usize = 70;

    if keyword.is_empty() {
        return text.trim().to_string();
    }
    let lower_text = text.to_lowercase();
    let lower_keyword = keyword.to_lowercase();
    let Some(start_byte) = lower_text.find(&lower_keyword) else {
        return text.trim().to_string();
    };
    let end_byte = start_byte + lower_keyword.len();

    let window_start = floor_char_boundary(text, start_byte.saturating_sub(CHARS_BEFORE));
    let window_end = ceil_char_boundary(text, (end_byte + CHARS_AFTER).min(text.len()));

    let mut example = String::new();
    if window_start > 0 {
        example.push('…');
    }
    example.push_str(text[window_start..window_end].trim());
    if window_end < text.len() {
        example.push('…');
    }
    example
}

/// Walks left from `idx` to the nearest UTF-8 char boundary.
fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Walks right from `idx` to the nearest UTF-8 char boundary.
fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

/// Runs every fallacy detector against `text` and returns every match found.
#[must_use]
pub fn detect_fallacies(text: &str) -> Vec<DetectedFallacy> {
    let lower = text.to_lowercase();
    let sents = sentences(text);

    let mut found = Vec::new();
    found.extend(affirming_the_consequent(text, &sents));
    found.extend(denying_the_antecedent(text, &sents));
    found.extend(undistributed_middle(text, &sents));
    found.extend(illicit_distribution(text, &sents));
    found.extend(ad_hominem(text, &lower, &sents));
    found.extend(straw_man(text, &sents));
    found.extend(appeal_to_authority(text, &lower, &sents));
    found.extend(appeal_to_emotion(text, &sents));
    found.extend(slippery_slope(text, &lower, &sents));
    found.extend(false_dilemma(text, &lower, &sents));
    found.extend(red_herring(text, &lower, &sents));
    found.extend(hasty_generalization(text, &lower, &sents));
    found.extend(circular_reasoning(text, &lower, &sents));
    found.extend(appeal_to_ignorance(text, &lower, &sents));
    found.extend(genetic_fallacy(text, &lower, &sents));
    found.extend(no_true_scotsman(text, &lower, &sents));
    found.extend(composition_division(text, &lower, &sents));
    found.extend(post_hoc(text, &lower, &sents));
    found.extend(base_rate_neglect(text, &lower, &sents));
    found.extend(texas_sharpshooter(text, &lower, &sents));
    found.extend(survivorship_bias(text, &lower, &sents));
    found
}

/// Builds a `DetectedFallacy` from its fields.
fn make(
    fallacy_type: &str,
    category: &str,
    location: &str,
    explanation: &str,
    example: &str,
    correction: &str,
    confidence: f64,
) -> DetectedFallacy {
    DetectedFallacy {
        fallacy_type: fallacy_type.to_string(),
        category: category.to_string(),
        location: location.to_string(),
        explanation: explanation.to_string(),
        example: example.to_string(),
        correction: correction.to_string(),
        confidence,
    }
}

// ============================================================================
// SECTION: Formal Fallacies
// ============================================================================

/// Flags asserting a conditional's consequent and concluding its antecedent.
fn affirming_the_consequent(text: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let conditional_sentence = sents.iter().find_map(|s| split_conditional(s).map(|c| (s, c)));
    let (cond_sentence, cond) = conditional_sentence?;
    let conclusion_sentence = sents.iter().find(|s| has_conclusion_marker(s))?;
    let concluded = canonical(&strip_conclusion_marker(conclusion_sentence));
    let asserts_consequent = sents
        .iter()
        .any(|s| !std::ptr::eq(s, cond_sentence) && !std::ptr::eq(s, conclusion_sentence) && canonical(s).contains(&cond.consequent));
    if asserts_consequent && concluded.contains(&cond.antecedent) && !is_negated(conclusion_sentence) {
        return Some(make(
            "affirming_the_consequent",
            "formal",
            cond_sentence,
            "Asserting the consequent of a conditional and concluding the antecedent does not follow; other causes of the consequent may exist.",
            &extract_example(text, &cond.consequent),
            "Show the antecedent is the only possible cause, or weaken the conclusion to a possibility.",
            0.6,
        ));
    }
    None
}

/// Flags denying a conditional's antecedent and concluding its consequent is false.
fn denying_the_antecedent(text: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let conditional_sentence = sents.iter().find_map(|s| split_conditional(s).map(|c| (s, c)));
    let (cond_sentence, cond) = conditional_sentence?;
    let conclusion_sentence = sents.iter().find(|s| has_conclusion_marker(s))?;
    let concluded = strip_conclusion_marker(conclusion_sentence);
    let denies_antecedent = sents.iter().any(|s| {
        !std::ptr::eq(s, cond_sentence)
            && !std::ptr::eq(s, conclusion_sentence)
            && is_negated(s)
            && canonical(&strip_negation(s)).contains(&cond.antecedent)
    });
    if denies_antecedent && is_negated(&concluded) && canonical(&strip_negation(&concluded)).contains(&cond.consequent) {
        return Some(make(
            "denying_the_antecedent",
            "formal",
            cond_sentence,
            "Denying the antecedent of a conditional and concluding the consequent is false does not follow.",
            &extract_example(text, &cond.antecedent),
            "Sprinklers or other causes could still make the ground wet; the conclusion needs its own support.",
            0.6,
        ));
    }
    None
}

/// Flags two "all X are M" premises used to conclude a relation between the Xs.
fn undistributed_middle(text: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let universals: Vec<(String, String)> = sents.iter().filter_map(|s| parse_all(s)).collect();
    for i in 0..universals.len() {
        for j in 0..universals.len() {
            if i == j {
                continue;
            }
            let (subject_a, predicate_a) = &universals[i];
            let (subject_b, predicate_b) = &universals[j];
            if predicate_a == predicate_b && subject_a != subject_b {
                let conclusion_sentence = sents.iter().find(|s| has_conclusion_marker(s))?;
                let concluded = parse_all(&strip_conclusion_marker(conclusion_sentence))?;
                if &concluded.0 == subject_a && &concluded.1 == subject_b
                    || &concluded.0 == subject_b && &concluded.1 == subject_a
                {
                    return Some(make(
                        "undistributed_middle",
                        "formal",
                        conclusion_sentence,
                        "Two categories that share a predicate are not thereby related to each other; the middle term was never distributed.",
                        &extract_example(text, predicate_a),
                        "Find a premise that actually relates the two subject categories directly.",
                        0.55,
                    ));
                }
            }
        }
    }
    None
}

/// Flags reversing "all A are B" into "all B are A".
fn illicit_distribution(text: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let (premise_subject, premise_predicate) = sents.iter().find_map(parse_all)?;
    let conclusion_sentence = sents.iter().find(|s| has_conclusion_marker(s))?;
    let (concluded_subject, concluded_predicate) = parse_all(&strip_conclusion_marker(conclusion_sentence))?;
    if concluded_subject == premise_predicate && concluded_predicate == premise_subject {
        return Some(make(
            "illicit_distribution",
            "formal",
            conclusion_sentence,
            "A universal affirmative does not distribute its predicate; reversing \"all A are B\" into \"all B are A\" is not valid.",
            &extract_example(text, &premise_predicate),
            "At most conclude \"some B are A\", or find independent support for the reversed claim.",
            0.6,
        ));
    }
    None
}

// ============================================================================
// SECTION: Informal Fallacies
// ============================================================================

/// Flags dismissing an argument by attacking the arguer's character.
fn ad_hominem(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    const INSULTS: &[&str] = &["idiot", "liar", "hypocrite", "fool", "incompetent", "moron"];
    let markers = ["his argument", "her argument", "their argument", "you're just", "coming from"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| INSULTS.iter().any(|w| s.contains(w)))?;
    let insult = INSULTS.iter().find(|w| sentence.contains(**w))?;
    Some(make(
        "ad_hominem",
        "informal",
        sentence,
        "Attacking the arguer's character instead of the argument does not show the argument is wrong.",
        &extract_example(text, insult),
        "Address the claims or evidence directly, not the person making them.",
        0.55,
    ))
}

/// Flags restating a position in a distorted, easier-to-attack form.
fn straw_man(text: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["so you're saying", "so you think", "what you really mean is", "in other words you want"];
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "straw_man",
        "informal",
        sentence,
        "Restating an opponent's position in an exaggerated or distorted form makes it easier to attack than the real claim.",
        &extract_example(text, marker),
        "Quote or paraphrase the original position faithfully before responding to it.",
        0.5,
    ))
}

/// Flags citing an authority outside their field as if that settles the claim.
fn appeal_to_authority(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["a celebrity said", "an expert said", "because a famous", "trust me, i'm", "a famous person believes"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "appeal_to_authority",
        "informal",
        sentence,
        "An authority's opinion outside their field of expertise is not evidence for a claim.",
        &extract_example(text, marker),
        "Cite evidence or domain experts whose expertise actually covers the claim.",
        0.5,
    ))
}

/// Flags substituting an emotional appeal for evidence.
fn appeal_to_emotion(text: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["think of the children", "how would you feel if", "imagine the suffering", "if you had any compassion"];
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "appeal_to_emotion",
        "informal",
        sentence,
        "Provoking an emotional reaction is not the same as providing evidence for a claim.",
        &extract_example(text, marker),
        "Separate the emotional appeal from the factual claim and evaluate the claim on its evidence.",
        0.5,
    ))
}

/// Flags an unsupported chain of escalating consequences.
fn slippery_slope(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["will eventually lead to", "next thing you know", "before long we'll", "it's a slippery slope"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "slippery_slope",
        "informal",
        sentence,
        "Asserting a chain of escalating consequences without showing each step actually follows is unsupported.",
        &extract_example(text, marker),
        "Justify each link in the causal chain, or drop the later steps from the argument.",
        0.5,
    ))
}

/// Flags presenting only two options when more exist.
fn false_dilemma(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let has_either_or = lower.contains("either") && lower.contains(" or ");
    let has_binary = lower.contains("you're either") || lower.contains("there are only two");
    if !(has_either_or || has_binary) {
        return None;
    }
    let acknowledges_more = lower.contains("other option") || lower.contains("alternatively") || lower.contains("could also");
    if acknowledges_more {
        return None;
    }
    let sentence = sents.iter().find(|s| s.contains("either") || s.contains("only two"))?;
    let keyword = if sentence.contains("either") { "either" } else { "only two" };
    Some(make(
        "false_dilemma",
        "informal",
        sentence,
        "Presenting only two options when more exist hides the actual range of choices.",
        &extract_example(text, keyword),
        "List the other options that exist between the two extremes presented.",
        0.5,
    ))
}

/// Flags introducing an unrelated topic to distract from the argument.
fn red_herring(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["but what about", "speaking of which", "that reminds me", "anyway, more importantly"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "red_herring",
        "informal",
        sentence,
        "Introducing an unrelated topic distracts from the argument rather than addressing it.",
        &extract_example(text, marker),
        "Stay on the original claim; address the distraction separately if it matters.",
        0.45,
    ))
}

/// Flags generalizing from a sample too small to support the conclusion.
fn hasty_generalization(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["i met one", "i know a guy who", "one time", "every single"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "hasty_generalization",
        "informal",
        sentence,
        "Drawing a broad conclusion from a sample too small to support it overstates the evidence.",
        &extract_example(text, marker),
        "Gather a representative sample before generalizing, or narrow the conclusion to the sample observed.",
        0.5,
    ))
}

/// Flags a conclusion that restates its own premise.
fn circular_reasoning(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let (conclusion, premise) = lower.split_once(" because ")?;
    let conclusion_c = canonical(conclusion);
    let premise_c = canonical(premise);
    if conclusion_c.is_empty() || premise_c.is_empty() {
        return None;
    }
    let conclusion_words: Vec<&str> = conclusion_c.split_whitespace().collect();
    let premise_words: Vec<&str> = premise_c.split_whitespace().collect();
    let shared = conclusion_words.iter().filter(|w| premise_words.contains(w)).count();
    let smaller = conclusion_words.len().min(premise_words.len()).max(1);
    #[allow(clippy::cast_precision_loss, reason = "word counts are small enough to round-trip through f64 exactly")]
    let overlap = shared as f64 / smaller as f64;
    if overlap < 0.6 {
        return None;
    }
    let sentence = sents.iter().find(|s| s.contains(" because "))?;
    Some(make(
        "circular_reasoning",
        "informal",
        sentence,
        "The conclusion is restated as its own premise, so no independent support is actually given.",
        &extract_example(text, "because"),
        "Provide a premise that does not already assume the conclusion.",
        0.6,
    ))
}

/// Flags treating a lack of disproof as proof.
fn appeal_to_ignorance(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["no one has proven", "nobody has disproven", "has never been disproven", "no evidence it's false"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "appeal_to_ignorance",
        "informal",
        sentence,
        "Lack of evidence against a claim is not evidence for it.",
        &extract_example(text, marker),
        "Seek positive evidence for the claim rather than relying on the absence of counter-evidence.",
        0.5,
    ))
}

/// Flags judging a claim by its origin rather than its merits.
fn genetic_fallacy(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["it came from", "given where it originated", "considering its origins", "was invented by"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "genetic_fallacy",
        "informal",
        sentence,
        "Judging a claim by its origin rather than its present merits ignores the actual argument or evidence.",
        &extract_example(text, marker),
        "Evaluate the claim on the evidence available now, independent of its source.",
        0.45,
    ))
}

/// Flags redefining a category after the fact to exclude counterexamples.
fn no_true_scotsman(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["no true", "no real", "not a true", "not a real"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "no_true_scotsman",
        "informal",
        sentence,
        "Redefining a category to exclude counterexamples after the fact protects a generalization from ever being falsified.",
        &extract_example(text, marker),
        "Define the category up front and let counterexamples count against the generalization.",
        0.5,
    ))
}

/// Flags inferring a whole's properties from its parts, or vice versa.
fn composition_division(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["so the whole", "so the team as a whole", "so the group must", "each part is", "every member is"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "composition_division",
        "informal",
        sentence,
        "What is true of the parts need not be true of the whole, and vice versa.",
        &extract_example(text, marker),
        "Assess the whole and its parts separately; team performance depends on more than individual skill.",
        0.45,
    ))
}

/// Flags inferring causation from mere succession in time.
fn post_hoc(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["right after", "immediately after", "as soon as", "ever since we started"];
    if !markers.iter().any(|m| lower.contains(m)) || !lower.contains("caused") && !lower.contains("because of") {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "post_hoc_ergo_propter_hoc",
        "informal",
        sentence,
        "One event following another does not show the first caused the second.",
        &extract_example(text, marker),
        "Rule out other explanations and look for a mechanism before attributing causation.",
        0.5,
    ))
}

/// Flags ignoring a condition's prevalence when interpreting a test result.
fn base_rate_neglect(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["the test is 99% accurate", "it's rare, but", "even though it's uncommon"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "base_rate_neglect",
        "statistical",
        sentence,
        "A test's accuracy alone is misleading when the underlying condition is rare; the base rate changes what a positive result actually means.",
        &extract_example(text, marker),
        "Combine the test's accuracy with the condition's actual prevalence before drawing a conclusion.",
        0.45,
    ))
}

/// Flags fitting a narrative to a pattern noticed only after the fact.
fn texas_sharpshooter(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["after looking at the data we noticed", "once we saw the pattern", "in hindsight the cluster"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "texas_sharpshooter",
        "statistical",
        sentence,
        "Picking out a pattern after the fact, without a prediction made in advance, fits noise to a story.",
        &extract_example(text, marker),
        "Test the pattern against new, independent data rather than the data that suggested it.",
        0.45,
    ))
}

/// Flags drawing conclusions only from cases that survived or succeeded.
fn survivorship_bias(text: &str, lower: &str, sents: &[String]) -> Option<DetectedFallacy> {
    let markers = ["look at all the successful", "every successful founder", "the ones who made it"];
    if !markers.iter().any(|m| lower.contains(m)) {
        return None;
    }
    let sentence = sents.iter().find(|s| markers.iter().any(|m| s.contains(m)))?;
    let marker = markers.iter().find(|m| sentence.contains(**m))?;
    Some(make(
        "survivorship_bias",
        "statistical",
        sentence,
        "Drawing conclusions only from the cases that survived or succeeded ignores the far larger set that failed the same way.",
        &extract_example(text, marker),
        "Account for the dropouts who did not succeed before drawing a conclusion about the pattern.",
        0.5,
    ))
}

#[cfg(test)]
mod tests {
    use super::detect_fallacies;

    fn has(text: &str, fallacy_type: &str) -> bool {
        detect_fallacies(text).iter().any(|f| f.fallacy_type == fallacy_type)
    }

    #[test]
    fn detects_affirming_the_consequent() {
        assert!(has(
            "if it rains then the ground is wet. the ground is wet. therefore it rains.",
            "affirming_the_consequent"
        ));
    }

    #[test]
    fn detects_denying_the_antecedent() {
        assert!(has(
            "if it rains then the ground is wet. it is not the case that it rains. therefore it is not the case that the ground is wet.",
            "denying_the_antecedent"
        ));
    }

    #[test]
    fn detects_undistributed_middle() {
        assert!(has(
            "all fish are swimmers. all dolphins are swimmers. therefore all dolphins are fish.",
            "undistributed_middle"
        ));
    }

    #[test]
    fn detects_ad_hominem() {
        assert!(has("you can't trust his argument, he's a known liar.", "ad_hominem"));
    }

    #[test]
    fn detects_false_dilemma() {
        assert!(has("either we cut spending entirely or the company goes bankrupt.", "false_dilemma"));
    }

    #[test]
    fn detects_circular_reasoning() {
        assert!(has("the law is just because it is a just law.", "circular_reasoning"));
    }

    #[test]
    fn detects_slippery_slope() {
        assert!(has(
            "if we allow this exception it will eventually lead to total chaos.",
            "slippery_slope"
        ));
    }

    #[test]
    fn detects_survivorship_bias() {
        assert!(has(
            "look at all the successful founders who dropped out, so college must not matter.",
            "survivorship_bias"
        ));
    }

    #[test]
    fn well_formed_text_triggers_nothing() {
        assert!(detect_fallacies("the sky is blue and the grass is green.").is_empty());
    }
}
