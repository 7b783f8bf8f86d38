use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum FilingStatus {
    #[default]
    Single,
    Married,
    HeadOfHousehold,
}

impl FilingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
            Self::HeadOfHousehold => "head-of-household",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Married => "Married Filing Jointly",
            Self::HeadOfHousehold => "Head of Household",
        }
    }

    /// Accepts the kebab-case name or the usual short code, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "s" => Some(Self::Single),
            "married" | "mfj" => Some(Self::Married),
            "head-of-household" | "head_of_household" | "hoh" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }
}

impl TryFrom<String> for FilingStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| {
            format!("unknown filing status '{value}', expected single, married or head-of-household")
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_names_and_codes() {
        assert_eq!(FilingStatus::parse("single"), Some(FilingStatus::Single));
        assert_eq!(FilingStatus::parse("MFJ"), Some(FilingStatus::Married));
        assert_eq!(FilingStatus::parse(" hoh "), Some(FilingStatus::HeadOfHousehold));
        assert_eq!(
            FilingStatus::parse("Head-Of-Household"),
            Some(FilingStatus::HeadOfHousehold)
        );
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert_eq!(FilingStatus::parse("widow"), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for status in [
            FilingStatus::Single,
            FilingStatus::Married,
            FilingStatus::HeadOfHousehold,
        ] {
            assert_eq!(FilingStatus::parse(status.as_str()), Some(status));
        }
    }
}
