//! Short token generation.
//!
//! A token is the first [`CODE_LENGTH`] characters of the hyphenated text
//! form of a random UUID v4, i.e. eight lowercase hex digits. Tokens are
//! not checked for collisions.

use uuid::Uuid;

/// Number of characters kept from the UUID.
pub const CODE_LENGTH: usize = 8;

/// Generates a short token from a fresh random UUID.
///
/// # Examples
///
/// ```
/// use tinylink::utils::code_generator::generate_code;
///
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// ```
pub fn generate_code() -> String {
    let mut code = Uuid::new_v4().hyphenated().to_string();
    code.truncate(CODE_LENGTH);
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_length() {
        for _ in 0..100 {
            assert_eq!(generate_code().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_generate_code_alphabet() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c) || c == '-'),
                "unexpected character in {code}"
            );
        }
    }

    #[test]
    fn test_generate_code_varies() {
        let codes: HashSet<String> = (0..100).map(|_| generate_code()).collect();
        // 32 random bits per token; a handful of repeats in 100 draws would be
        // astronomically unlikely.
        assert!(codes.len() > 95);
    }
}
