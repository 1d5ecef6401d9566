use unicode_segmentation::UnicodeSegmentation;

/// Matches the width of the `users.name` column.
const MAX_LENGTH: usize = 100;
const FORBIDDEN_CHARACTERS: [char; 9] = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];

#[derive(Debug, Clone)]
pub struct UserName(String);

impl UserName {
    pub fn parse(s: String) -> Result<UserName, String> {
        let s = s.trim().to_string();
        let is_empty = s.is_empty();
        let is_too_long =
            s.graphemes(true).count() > MAX_LENGTH || s.chars().count() > MAX_LENGTH;
        let contains_forbidden_characters = s.chars().any(|g| FORBIDDEN_CHARACTERS.contains(&g));

        if is_empty || is_too_long || contains_forbidden_characters {
            Err(format!("{} is not a valid user name.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
