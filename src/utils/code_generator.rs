//! Short code generation.
//!
//! Codes are random bytes encoded as URL-safe base64 without padding
//! (`A-Z`, `a-z`, `0-9`, `-`, `_`) and cut to the requested length.

use base64::Engine as _;
use rand::RngCore;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 7;

/// Source of candidate short codes.
///
/// The registrar only asks for candidates; uniqueness is decided by the store.
pub trait CodeGenerator: Send + Sync {
    /// Returns a candidate code of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Generator backed by the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        generate_code(length)
    }
}

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(7);
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut buffer = vec![0u8; bytes_for(length)];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    encode(&buffer, length)
}

/// Generates a short code drawing entropy from `rng`.
pub fn generate_code_with<R: RngCore + ?Sized>(rng: &mut R, length: usize) -> String {
    let mut buffer = vec![0u8; bytes_for(length)];
    rng.fill_bytes(&mut buffer);
    encode(&buffer, length)
}

/// Number of random bytes whose base64 form has at least `length` characters.
fn bytes_for(length: usize) -> usize {
    (length * 3).div_ceil(4)
}

fn encode(bytes: &[u8], length: usize) -> String {
    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);
    code.truncate(length);
    code
}
