const MIN_LEN: usize = 3;
const MAX_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    #[error("username required")]
    Required,
    #[error("username too short (min 3)")]
    TooShort,
    #[error("username too long (max 20)")]
    TooLong,
    #[error("username: a-z 0-9 _ only")]
    InvalidChars,
}

/// Lowercases and drops whitespace and anything outside `[a-z0-9_]`.
pub fn normalize_username(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

pub fn validate_username(name: &str) -> Result<(), UsernameError> {
    if name.is_empty() {
        return Err(UsernameError::Required);
    }
    if name.chars().count() < MIN_LEN {
        return Err(UsernameError::TooShort);
    }
    if name.chars().count() > MAX_LEN {
        return Err(UsernameError::TooLong);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(UsernameError::InvalidChars);
    }
    Ok(())
}

pub fn parse_username(raw: &str) -> Result<String, UsernameError> {
    let name = normalize_username(raw);
    validate_username(&name)?;
    Ok(name)
}
