//! Short code generation.
//!
//! Codes are drawn from a confusable-free alphabet so they survive being
//! read aloud or copied by hand. Uniqueness is not guaranteed here; callers
//! retry against the storage-level unique constraint.

/// Alphabet without the confusable symbols 0, O, 1, I and L.
///
/// 31 symbols; draws are rejection-sampled so every symbol is equally
/// likely.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Shortest code ever produced.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest code ever produced.
pub const MAX_CODE_LENGTH: usize = 8;

/// Generates a random short code of 6 to 8 characters.
///
/// The length is drawn uniformly per call, then each character is drawn
/// uniformly from [`CODE_ALPHABET`] using `getrandom` entropy. An 8
/// character code carries close to 40 bits, enough that collisions stay
/// rare until the table is far beyond realistic size.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let length = random_length();

    (0..length)
        .map(|_| CODE_ALPHABET[random_symbol_index()] as char)
        .collect()
}

/// Returns true when `code` has the exact shape this generator produces.
pub fn is_valid_code(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
        && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

/// Draws a length in [6, 8] without modulo bias.
///
/// 3 does not divide 256, so bytes of 255 are rejected and redrawn. The
/// remaining 255 values split evenly across the three lengths.
fn random_length() -> usize {
    loop {
        let mut byte = [0u8; 1];
        getrandom::fill(&mut byte).expect("Failed to generate random bytes");
        if byte[0] != 255 {
            return MIN_CODE_LENGTH + usize::from(byte[0]) % 3;
        }
    }
}

/// Draws an alphabet index in [0, 31) without modulo bias.
///
/// 248 is the largest multiple of 31 below 256, so bytes of 248..=255 are
/// rejected and redrawn; the remaining values split evenly across the 31
/// symbols.
fn random_symbol_index() -> usize {
    loop {
        let mut byte = [0u8; 1];
        getrandom::fill(&mut byte).expect("Failed to generate random bytes");
        if byte[0] < 248 {
            return usize::from(byte[0]) % CODE_ALPHABET.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_not_empty() {
        let code = generate_code();
        assert!(!code.is_empty());
    }

    #[test]
    fn test_generate_code_length_in_range() {
        for _ in 0..1000 {
            let code = generate_code();
            assert!(
                (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len()),
                "unexpected length {} for {code}",
                code.len()
            );
        }
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        for _ in 0..1000 {
            let code = generate_code();
            assert!(
                code.bytes().all(|b| CODE_ALPHABET.contains(&b)),
                "unexpected character in {code}"
            );
        }
    }

    #[test]
    fn test_generate_code_never_emits_confusables() {
        for _ in 0..1000 {
            let code = generate_code();
            assert!(!code.contains(['0', 'O', '1', 'I', 'L', 'l']));
        }
    }

    #[test]
    fn test_generate_code_produces_all_lengths() {
        let lengths: HashSet<usize> = (0..1000).map(|_| generate_code().len()).collect();
        assert_eq!(lengths.len(), 3);
    }

    #[test]
    fn test_generate_code_unique_at_scale() {
        let mut codes = HashSet::new();

        for _ in 0..10_000 {
            codes.insert(generate_code());
        }

        // A handful of birthday collisions among the 6-char codes is
        // statistically possible; more than that means a broken generator.
        assert!(codes.len() >= 9_995, "only {} unique codes", codes.len());
    }

    #[test]
    fn test_draws_against_recording_store_never_duplicate() {
        // Callers retry against an exists check; with one, 10k issued codes
        // contain no duplicates.
        let mut issued = HashSet::new();

        for _ in 0..10_000 {
            let code = loop {
                let candidate = generate_code();
                if !issued.contains(&candidate) {
                    break candidate;
                }
            };
            assert!(issued.insert(code));
        }

        assert_eq!(issued.len(), 10_000);
    }

    #[test]
    fn test_symbol_draw_is_uniform() {
        let draws = 310_000;
        let mut counts = [0usize; 31];
        for _ in 0..draws {
            counts[random_symbol_index()] += 1;
        }

        // ~10k expected per symbol; 800 is about eight standard deviations,
        // far past random noise but well inside what a modulo-biased draw
        // (9/248 for the low symbols) would produce.
        let expected = draws / CODE_ALPHABET.len();
        for (i, &count) in counts.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < 800,
                "symbol {} drawn {} times, expected ~{}",
                CODE_ALPHABET[i] as char,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code(&generate_code()));
        assert!(is_valid_code("ABC234"));
        assert!(!is_valid_code("ABC23"));
        assert!(!is_valid_code("ABC234567"));
        assert!(!is_valid_code("ABC10O"));
        assert!(!is_valid_code("abc234"));
    }
}
