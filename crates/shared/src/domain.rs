use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! token_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

token_newtype!(CourseCode);
token_newtype!(ProgramId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    PreMed,
    PreLaw,
    PreGrad,
    PreMba,
}

impl Track {
    pub const ALL: [Track; 4] = [Track::PreMed, Track::PreLaw, Track::PreGrad, Track::PreMba];

    pub fn as_str(self) -> &'static str {
        match self {
            Track::PreMed => "pre-med",
            Track::PreLaw => "pre-law",
            Track::PreGrad => "pre-grad",
            Track::PreMba => "pre-mba",
        }
    }

    /// Title-cased label, e.g. `pre-med` renders as `Pre Med`.
    pub fn label(self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Track {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Track::ALL
            .into_iter()
            .find(|track| track.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownTrack(raw.to_string()))
    }
}

/// Semester credit load requested from the advisor, bounded to what the
/// form slider allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CreditsTarget(u8);

impl CreditsTarget {
    pub const MIN: u8 = 12;
    pub const MAX: u8 = 21;

    pub fn new(credits: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&credits) {
            Ok(Self(credits))
        } else {
            Err(DomainError::CreditsOutOfRange {
                value: credits.into(),
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for CreditsTarget {
    fn default() -> Self {
        Self(15)
    }
}

impl TryFrom<u8> for CreditsTarget {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CreditsTarget> for u8 {
    fn from(value: CreditsTarget) -> Self {
        value.0
    }
}

impl FromStr for CreditsTarget {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCredits(raw.to_string()))?;
        let value = u8::try_from(value).map_err(|_| DomainError::CreditsOutOfRange {
            value,
            min: Self::MIN,
            max: Self::MAX,
        })?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_round_trips_through_kebab_case() {
        let json = serde_json::to_string(&Track::PreMba).expect("serialize");
        assert_eq!(json, "\"pre-mba\"");
        let parsed: Track = serde_json::from_str("\"pre-law\"").expect("deserialize");
        assert_eq!(parsed, Track::PreLaw);
    }

    #[test]
    fn track_labels_are_title_cased() {
        assert_eq!(Track::PreMed.label(), "Pre Med");
        assert_eq!(Track::PreMba.label(), "Pre Mba");
    }

    #[test]
    fn track_parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(" Pre-Grad ".parse::<Track>().expect("parse"), Track::PreGrad);
        assert!(matches!(
            "pre-dental".parse::<Track>(),
            Err(DomainError::UnknownTrack(_))
        ));
    }

    #[test]
    fn credits_target_enforces_slider_bounds() {
        assert!(CreditsTarget::new(11).is_err());
        assert_eq!(CreditsTarget::new(12).expect("min").get(), 12);
        assert_eq!(CreditsTarget::new(21).expect("max").get(), 21);
        assert!(CreditsTarget::new(22).is_err());
        assert_eq!(CreditsTarget::default().get(), 15);
    }

    #[test]
    fn credits_target_parses_and_rejects_garbage() {
        assert_eq!("18".parse::<CreditsTarget>().expect("parse").get(), 18);
        assert!(matches!(
            "many".parse::<CreditsTarget>(),
            Err(DomainError::InvalidCredits(_))
        ));
        assert!(matches!(
            "-3".parse::<CreditsTarget>(),
            Err(DomainError::CreditsOutOfRange { value: -3, .. })
        ));
    }

    #[test]
    fn credits_target_deserialize_is_range_checked() {
        assert!(serde_json::from_str::<CreditsTarget>("30").is_err());
        let ok: CreditsTarget = serde_json::from_str("15").expect("deserialize");
        assert_eq!(serde_json::to_string(&ok).expect("serialize"), "15");
    }

    #[test]
    fn course_code_serializes_as_bare_string() {
        let code = CourseCode::from("CHEM121");
        assert_eq!(serde_json::to_string(&code).expect("serialize"), "\"CHEM121\"");
    }
}
