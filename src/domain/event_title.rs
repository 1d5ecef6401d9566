use unicode_segmentation::UnicodeSegmentation;

/// Matches the width of the `events.title` column, which Postgres counts
/// in characters.
const MAX_LENGTH: usize = 255;

#[derive(Debug, Clone)]
pub struct EventTitle(String);

impl EventTitle {
    pub fn parse(s: String) -> Result<EventTitle, String> {
        let s = s.trim().to_string();
        if s.is_empty() {
            return Err("The event title cannot be blank.".into());
        }
        if s.graphemes(true).count() > MAX_LENGTH || s.chars().count() > MAX_LENGTH {
            return Err(format!(
                "The event title is longer than {} characters.",
                MAX_LENGTH
            ));
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for EventTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
