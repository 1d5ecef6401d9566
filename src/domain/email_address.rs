use validator::validate_email;

/// Matches the width of the `users.email` column.
const MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<EmailAddress, String> {
        let s = s.trim().to_string();
        if s.chars().count() > MAX_LENGTH {
            return Err(format!(
                "{} is longer than {} characters.",
                s, MAX_LENGTH
            ));
        }
        if validate_email(s.as_str()) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid email address.", s))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
