use std::fmt;

/// Password policy rules, in the order they are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    TooShort,
    MissingLetter,
    MissingDigit,
    MissingSpecial,
}

impl PasswordRule {
    /// Machine-readable rule name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort => "length",
            Self::MissingLetter => "letter",
            Self::MissingDigit => "digit",
            Self::MissingSpecial => "special",
        }
    }
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::TooShort => "password is too short: must be at least 8 characters long",
            Self::MissingLetter => "password must include at least one letter",
            Self::MissingDigit => "password must include at least one number",
            Self::MissingSpecial => "password must include at least one special character",
        };
        f.write_str(message)
    }
}
