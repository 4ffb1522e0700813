//! Feedback classification: exact matches first, then leftover multiset matches.

use super::super::{CELL_COUNT, Digit, Feedback, GuessFeedback};
use tracing::{instrument, trace};

/// Classifies each guessed cell against the secret.
///
/// Pass 1 labels every positional match [`Feedback::Exact`] and consumes that
/// secret cell. Pass 2 walks the remaining guess cells in order and, for each,
/// consumes the lowest-index unconsumed secret cell holding the same digit,
/// labelling it [`Feedback::Present`]; cells with no such match are
/// [`Feedback::Absent`]. A digit therefore earns at most as many hits as it
/// has occurrences in the secret.
#[instrument(level = "debug")]
pub fn classify_guess(guess: &[Digit; CELL_COUNT], secret: &[Digit; CELL_COUNT]) -> GuessFeedback {
    let mut labels = [Feedback::Absent; CELL_COUNT];
    let mut consumed = [false; CELL_COUNT];

    for (index, (g, s)) in guess.iter().zip(secret).enumerate() {
        if g == s {
            labels[index] = Feedback::Exact;
            consumed[index] = true;
        }
    }

    for (index, digit) in guess.iter().enumerate() {
        if labels[index].is_exact() {
            continue;
        }
        let matched = secret
            .iter()
            .zip(consumed.iter())
            .position(|(candidate, used)| !used && candidate == digit);
        if let Some(slot) = matched {
            consumed[slot] = true;
            labels[index] = Feedback::Present;
        }
    }

    trace!(?labels, "Guess classified");
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(values: [u8; CELL_COUNT]) -> [Digit; CELL_COUNT] {
        values.map(|v| Digit::new(v).expect("test digit"))
    }

    const SECRET: [u8; CELL_COUNT] = [2, 1, 1, 3, 3, 2, 8, 9];

    use Feedback::{Absent as A, Exact as E, Present as P};

    #[test]
    fn test_identical_guess_all_exact() {
        let labels = classify_guess(&digits(SECRET), &digits(SECRET));
        assert_eq!(labels, [E; CELL_COUNT]);
    }

    #[test]
    fn test_shifted_digits_all_present() {
        let labels = classify_guess(&digits([1, 2, 3, 1, 2, 3, 9, 8]), &digits(SECRET));
        assert_eq!(labels, [P; CELL_COUNT]);
    }

    #[test]
    fn test_disjoint_digits_all_absent() {
        let labels = classify_guess(&digits([4, 5, 6, 7, 4, 5, 6, 7]), &digits(SECRET));
        assert_eq!(labels, [A; CELL_COUNT]);
    }

    #[test]
    fn test_extra_duplicate_is_absent() {
        // Secret holds two 1s; the guess holds three.
        let labels = classify_guess(&digits([1, 1, 1, 2, 3, 2, 5, 7]), &digits(SECRET));
        assert_eq!(labels, [A, E, E, P, E, E, A, A]);
    }

    #[test]
    fn test_exact_consumes_before_present_scan() {
        // Guess position 0 would take the only 9 if present-matching ran
        // first; the exact match at position 7 must win it instead.
        let secret = digits([1, 1, 1, 1, 1, 1, 1, 9]);
        let labels = classify_guess(&digits([9, 2, 2, 2, 2, 2, 2, 9]), &secret);
        assert_eq!(labels[7], E);
        assert_eq!(labels[0], A);
    }

    #[test]
    fn test_present_consumes_lowest_index_first() {
        let secret = digits([5, 5, 1, 1, 1, 1, 1, 1]);
        let labels = classify_guess(&digits([2, 2, 5, 5, 5, 2, 2, 2]), &secret);
        assert_eq!(labels, [A, A, P, P, A, A, A, A]);
    }

    #[test]
    fn test_hits_never_exceed_secret_multiplicity() {
        let secret = digits(SECRET);
        let guesses = [
            [1, 1, 1, 1, 1, 1, 1, 1],
            [2, 2, 2, 2, 2, 2, 2, 2],
            [3, 1, 2, 3, 1, 2, 3, 1],
            [9, 9, 8, 8, 2, 2, 1, 1],
        ];
        for raw in guesses {
            let guess = digits(raw);
            let labels = classify_guess(&guess, &secret);
            for digit in Digit::all() {
                let hits = guess
                    .iter()
                    .zip(labels)
                    .filter(|(d, label)| **d == digit && label.is_hit())
                    .count();
                let occurrences = secret.iter().filter(|d| **d == digit).count();
                assert!(hits <= occurrences, "digit {digit} over-counted in {raw:?}");
            }
        }
    }

    #[test]
    fn test_positional_match_always_exact() {
        let secret = digits(SECRET);
        let guess = digits([2, 2, 2, 2, 3, 3, 3, 3]);
        let labels = classify_guess(&guess, &secret);
        for index in 0..CELL_COUNT {
            if guess[index] == secret[index] {
                assert_eq!(labels[index], E);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let guess = digits([3, 1, 2, 3, 1, 2, 3, 1]);
        let secret = digits(SECRET);
        assert_eq!(classify_guess(&guess, &secret), classify_guess(&guess, &secret));
    }
}
