use chrono::NaiveDate;

const FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDate(NaiveDate);

impl EventDate {
    pub fn parse(s: &str) -> Result<EventDate, String> {
        NaiveDate::parse_from_str(s.trim(), FORMAT)
            .map(Self)
            .map_err(|_| format!("{} is not a valid date, expected YYYY-MM-DD.", s))
    }

    pub fn into_inner(self) -> NaiveDate {
        self.0
    }
}
