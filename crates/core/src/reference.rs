//! Booking reference-code generation.
//!
//! Reference codes are short human-readable identifiers printed on receipts
//! and quoted in support conversations. They are not security tokens.

use rand::Rng;

/// Length of a generated reference code.
pub const REFERENCE_CODE_LEN: usize = 10;

/// Characters used in reference codes. Excludes 0/O and 1/I to avoid
/// transcription mistakes.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate a random reference code, e.g. `"K7PQ2WXMRT"`.
pub fn generate_reference_code() -> String {
    let mut rng = rand::rng();
    (0..REFERENCE_CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_expected_length_and_alphabet() {
        let code = generate_reference_code();
        assert_eq!(code.len(), REFERENCE_CODE_LEN);
        assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn codes_are_not_constant() {
        // Collision over a handful of draws is astronomically unlikely.
        let a = generate_reference_code();
        let b = generate_reference_code();
        let c = generate_reference_code();
        assert!(a != b || b != c);
    }
}
