//! Utilities for generating passwords.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::charset::Charset;
use crate::{Error, ErrorRepr, Secret};

/// The longest password we are willing to generate.
pub const MAX_LENGTH: usize = 128;

/// Generate a password of `length` characters drawn from `charset`, using the operating system's
/// secure random source.
pub fn generate(length: usize, charset: &Charset) -> Result<Secret, Error> {
    generate_random_password(&mut OsRng, charset, length)
}

/// Generate a simple, impossible-to-guess password by just randomly sampling the given charset.
///
/// Every character is drawn independently and uniformly. Failures of the random source are
/// returned as-is; nothing is retried.
pub fn generate_random_password<R>(
    rng: &mut R,
    charset: &Charset,
    length: usize,
) -> Result<Secret, Error>
where
    R: RngCore + CryptoRng,
{
    if length == 0 || length > MAX_LENGTH {
        return Err(ErrorRepr::InvalidLength {
            length,
            max: MAX_LENGTH,
        }
        .into());
    }
    if charset.is_empty() {
        return Err(ErrorRepr::EmptyCharset.into());
    }

    let alphabet = charset.as_chars();
    let mut secret = String::with_capacity(length);
    for _ in 0..length {
        let idx = uniform_index(rng, alphabet.len()).map_err(ErrorRepr::RandomSource)?;
        secret.push(alphabet[idx]);
    }
    debug!(length, charset_size = alphabet.len(), "generated password");
    Ok(Secret::from(secret))
}

/// Draw an index in `0..bound` without modulo bias.
///
/// Words at or above the largest multiple of `bound` are rejected and redrawn, so every residue is
/// equally likely. `bound` must be non-zero.
fn uniform_index<R: RngCore + ?Sized>(rng: &mut R, bound: usize) -> Result<usize, rand::Error> {
    let bound = bound as u64;
    let limit = u64::MAX - u64::MAX % bound;
    loop {
        let mut word = [0u8; 8];
        rng.try_fill_bytes(&mut word)?;
        let value = u64::from_le_bytes(word);
        if value < limit {
            return Ok((value % bound) as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::ErrorKind;

    /// A random source that has run dry.
    struct BrokenSource;

    impl RngCore for BrokenSource {
        fn next_u32(&mut self) -> u32 {
            unreachable!("only try_fill_bytes is used")
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!("only try_fill_bytes is used")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("only try_fill_bytes is used")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for BrokenSource {}

    #[test]
    fn output_has_requested_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let charset = Charset::build(true, true, true);
        for length in [1, 12, 64, MAX_LENGTH] {
            let secret = generate_random_password(&mut rng, &charset, length).unwrap();
            assert_eq!(secret.char_len(), length);
            assert!(secret.as_str().chars().all(|ch| charset.contains(ch)));
        }
    }

    #[test]
    fn multibyte_custom_charset() {
        let mut rng = StdRng::seed_from_u64(1);
        let charset = Charset::custom("äöü€");
        let secret = generate_random_password(&mut rng, &charset, 20).unwrap();
        assert_eq!(secret.char_len(), 20);
        assert!(secret.as_str().chars().all(|ch| charset.contains(ch)));
    }

    #[test]
    fn zero_length_is_rejected() {
        let err = generate(0, &Charset::custom("abc")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn overlong_request_is_rejected() {
        let err = generate(MAX_LENGTH + 1, &Charset::custom("abc")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn empty_charset_is_rejected() {
        let err = generate(12, &Charset::custom("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyCharset);
    }

    #[test]
    fn random_source_failure_is_propagated() {
        let err = generate_random_password(&mut BrokenSource, &Charset::custom("ab"), 4)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RandomSource);
    }

    #[test]
    fn repeated_generation_differs() {
        let charset = Charset::build(true, true, false);
        let first = generate(32, &charset).unwrap();
        let second = generate(32, &charset).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn draws_cover_the_whole_charset() {
        let mut rng = StdRng::seed_from_u64(42);
        let charset = Charset::custom("xyz");
        let mut counts = [0usize; 3];
        for _ in 0..30 {
            let secret = generate_random_password(&mut rng, &charset, 100).unwrap();
            for ch in secret.as_str().chars() {
                counts[(ch as u8 - b'x') as usize] += 1;
            }
        }
        // 3000 draws; each bucket expects 1000.
        for count in counts {
            assert!((850..1150).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn single_character_charset() {
        let secret = generate(5, &Charset::custom("q")).unwrap();
        assert_eq!(secret.as_str(), "qqqqq");
    }

    #[test]
    fn secret_debug_is_opaque() {
        let secret = generate(16, &Charset::custom("s")).unwrap();
        assert!(!format!("{secret:?}").contains("ssss"));
    }
}
