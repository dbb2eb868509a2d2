//! Validation of user-supplied custom aliases.

/// Maximum length of a custom alias, in characters.
pub const MAX_ALIAS_LENGTH: usize = 10;

/// Punctuation allowed in custom aliases besides ASCII letters and digits.
pub const ALIAS_SPECIAL_CHARS: &str = "!@#$%&*-_?";

/// Codes claimed by static routes; a mapping under one of them could never
/// be reached through `GET /{code}`.
pub const RESERVED_CODES: &[&str] = &["api", "health", "shorten"];

/// Reasons a custom alias is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAlias {
    #[error("Custom short code must not be empty")]
    Empty,

    #[error("Custom short code must be 1 to 10 characters long, got {0}")]
    TooLong(usize),

    #[error(
        "Custom short code contains {0:?}; only letters, digits and !@#$%&*-_? are allowed"
    )]
    DisallowedCharacter(char),

    #[error("Custom short code '{0}' is reserved")]
    Reserved(String),
}

/// Returns true if `c` may appear in a custom alias.
pub fn is_alias_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ALIAS_SPECIAL_CHARS.contains(c)
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 1-10 characters
/// - Allowed characters: ASCII letters, digits and `!@#$%&*-_?`
/// - Whitespace is never allowed
///
/// # Errors
///
/// Returns the first [`InvalidAlias`] rule the alias breaks.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_alias("my-link!").is_ok());
/// assert!(validate_alias("has space").is_err());
/// assert!(validate_alias("elevenchars").is_err());
/// ```
pub fn validate_alias(alias: &str) -> Result<(), InvalidAlias> {
    if alias.is_empty() {
        return Err(InvalidAlias::Empty);
    }

    if let Some(bad) = alias.chars().find(|c| !is_alias_char(*c)) {
        return Err(InvalidAlias::DisallowedCharacter(bad));
    }

    // Only ASCII is left, so bytes == chars.
    if alias.len() > MAX_ALIAS_LENGTH {
        return Err(InvalidAlias::TooLong(alias.len()));
    }

    Ok(())
}

/// Returns true if `code` collides with a static route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Rejects aliases that collide with a static route.
///
/// Kept apart from [`validate_alias`] so that typing a longer alias through
/// [`AliasInput`] is never blocked by a reserved prefix.
pub fn ensure_not_reserved(alias: &str) -> Result<(), InvalidAlias> {
    if is_reserved(alias) {
        return Err(InvalidAlias::Reserved(alias.to_string()));
    }
    Ok(())
}

/// Edit buffer for interactively typed aliases.
///
/// Every edit is validated as a whole. An invalid edit is rejected and the
/// buffer keeps its last valid value, so it never holds a partially invalid
/// alias. Clearing the field is always accepted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AliasInput {
    value: String,
}

impl AliasInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an edit, replacing the whole value.
    ///
    /// # Errors
    ///
    /// Returns why the candidate was rejected; the current value is unchanged.
    pub fn edit(&mut self, candidate: &str) -> Result<(), InvalidAlias> {
        if candidate.is_empty() {
            self.value.clear();
            return Ok(());
        }

        validate_alias(candidate)?;
        self.value = candidate.to_string();
        Ok(())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The alias to register, or `None` when the field is empty.
    pub fn into_alias(self) -> Option<String> {
        (!self.value.is_empty()).then_some(self.value)
    }
}
