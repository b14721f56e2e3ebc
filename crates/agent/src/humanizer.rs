//! C8's final pass: a probabilistic, seedable humanizer that imitates the
//! small imperfections of a person typing on a phone. Runs after the
//! self-corrector has already approved a reply, so it only ever touches
//! text that's already been judged safe and in-character.

use rand::seq::SliceRandom;
use rand::Rng;

pub const FILLER_PROBABILITY: f64 = 0.20;
pub const ELLIPSIS_PROBABILITY: f64 = 0.15;
pub const DUPLICATE_WORD_PROBABILITY: f64 = 0.10;

const FILLERS: &[&str] = &["Hmm, ", "Arre, ", "Wait, ", "Umm, ", "Achha, "];
const ELLIPSES: &[&str] = &["...", "..", ".... "];

/// Applies the fixed filler/ellipsis/duplicate-word probabilities to
/// `text` using `rng`.
pub fn humanize(text: &str, rng: &mut impl Rng) -> String {
    humanize_with_rates(
        text,
        rng,
        FILLER_PROBABILITY,
        ELLIPSIS_PROBABILITY,
        DUPLICATE_WORD_PROBABILITY,
    )
}

fn humanize_with_rates(
    text: &str,
    rng: &mut impl Rng,
    filler_rate: f64,
    ellipsis_rate: f64,
    duplicate_rate: f64,
) -> String {
    let mut out = text.to_string();

    if rng.gen_bool(filler_rate) {
        if let Some(filler) = FILLERS.choose(rng) {
            out = format!("{filler}{out}");
        }
    }

    if rng.gen_bool(duplicate_rate) {
        out = duplicate_middle_word(&out, rng);
    }

    if rng.gen_bool(ellipsis_rate) {
        if let Some(tail) = ELLIPSES.choose(rng) {
            out.push_str(tail);
        }
    }

    out
}

/// Duplicates one word away from the edges so the reply reads like a
/// stumble rather than a stutter at the start or a repeat at the end.
fn duplicate_middle_word(text: &str, rng: &mut impl Rng) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 3 {
        return text.to_string();
    }
    let idx = rng.gen_range(1..words.len() - 1);
    let mut out = Vec::with_capacity(words.len() + 1);
    out.extend_from_slice(&words[..=idx]);
    out.push(words[idx]);
    out.extend_from_slice(&words[idx + 1..]);
    out.join(" ")
}

/// Reverses a humanizer pass well enough for tests to recover the
/// underlying pool phrase regardless of which transforms fired.
#[cfg(test)]
pub(crate) fn strip_for_test(text: &str) -> String {
    let mut stripped = text;
    for filler in FILLERS {
        if let Some(rest) = stripped.strip_prefix(filler) {
            stripped = rest;
            break;
        }
    }

    let mut stripped = stripped.to_string();
    for tail in ELLIPSES {
        if let Some(rest) = stripped.strip_suffix(tail) {
            stripped = rest.to_string();
            break;
        }
    }

    let words: Vec<&str> = stripped.split_whitespace().collect();
    let mut deduped: Vec<&str> = Vec::with_capacity(words.len());
    for word in words {
        if deduped.last() != Some(&word) {
            deduped.push(word);
        }
    }
    deduped.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_rates_leave_text_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = humanize_with_rates("send the otp now please", &mut rng, 0.0, 0.0, 0.0);
        assert_eq!(result, "send the otp now please");
    }

    #[test]
    fn full_rates_apply_every_transform() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = "send the otp now please";
        let result = humanize_with_rates(original, &mut rng, 1.0, 1.0, 1.0);
        assert!(FILLERS.iter().any(|f| result.starts_with(f)));
        assert!(ELLIPSES.iter().any(|e| result.ends_with(e)));
        assert!(result.split_whitespace().count() > original.split_whitespace().count());
    }

    #[test]
    fn duplicate_word_is_a_no_op_on_short_text() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = duplicate_middle_word("hi there", &mut rng);
        assert_eq!(result, "hi there");
    }

    #[test]
    fn strip_for_test_recovers_original_phrase() {
        let mut rng = StdRng::seed_from_u64(42);
        let original = "please wait a moment sir";
        let transformed = humanize_with_rates(original, &mut rng, 1.0, 1.0, 1.0);
        assert_eq!(strip_for_test(&transformed), original);
    }

    #[test]
    fn default_rates_are_the_documented_constants() {
        assert_eq!(FILLER_PROBABILITY, 0.20);
        assert_eq!(ELLIPSIS_PROBABILITY, 0.15);
        assert_eq!(DUPLICATE_WORD_PROBABILITY, 0.10);
    }
}
