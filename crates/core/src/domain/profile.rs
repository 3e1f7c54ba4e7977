use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub const DEFAULT_AGE: u32 = 25;
pub const MIN_REGISTRATION_AGE: u32 = 13;
pub const MAX_REGISTRATION_AGE: u32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Other,
}

impl Gender {
    /// Lenient parse: anything that is not male or female is `Other`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "man" => Self::Male,
            "female" | "f" | "woman" => Self::Female,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgeBracket {
    Teens,
    Twenties,
    Thirties,
    Forties,
}

impl AgeBracket {
    pub fn from_age(age: u32) -> Self {
        if age < 20 {
            Self::Teens
        } else if age < 30 {
            Self::Twenties
        } else if age < 40 {
            Self::Thirties
        } else {
            Self::Forties
        }
    }

    pub fn is_thirties_or_older(&self) -> bool {
        matches!(self, Self::Thirties | Self::Forties)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDemographic {
    pub gender: Gender,
    pub age: u32,
}

impl Default for UserDemographic {
    fn default() -> Self {
        Self { gender: Gender::Other, age: DEFAULT_AGE }
    }
}

impl UserDemographic {
    pub fn new(gender: Gender, age: u32) -> Self {
        Self { gender, age }
    }

    pub fn age_bracket(&self) -> AgeBracket {
        AgeBracket::from_age(self.age)
    }
}

/// Registration profile as stored under the `userProfile` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub gender: Gender,
    pub age: u32,
}

impl UserProfile {
    pub fn validate_for_registration(&self) -> Result<(), DomainError> {
        if !(MIN_REGISTRATION_AGE..=MAX_REGISTRATION_AGE).contains(&self.age) {
            return Err(DomainError::InvalidProfile(format!(
                "age must be between {MIN_REGISTRATION_AGE} and {MAX_REGISTRATION_AGE}, got {}",
                self.age
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl UserPreferences {
    /// Profile values win over preference values; missing fields fall back to
    /// `other` and the default age.
    pub fn demographic(&self, profile: Option<&UserProfile>) -> UserDemographic {
        let gender = profile.map(|profile| profile.gender).or(self.gender).unwrap_or_default();
        let age = profile
            .map(|profile| profile.age)
            .or(self.age)
            .filter(|age| *age > 0)
            .unwrap_or(DEFAULT_AGE);
        UserDemographic { gender, age }
    }

    pub fn style(&self) -> Option<&str> {
        self.selected_style.as_deref().map(str::trim).filter(|style| !style.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{AgeBracket, Gender, UserDemographic, UserPreferences, UserProfile};
    use crate::errors::DomainError;

    #[test]
    fn age_brackets_follow_decades() {
        assert_eq!(AgeBracket::from_age(13), AgeBracket::Teens);
        assert_eq!(AgeBracket::from_age(19), AgeBracket::Teens);
        assert_eq!(AgeBracket::from_age(20), AgeBracket::Twenties);
        assert_eq!(AgeBracket::from_age(29), AgeBracket::Twenties);
        assert_eq!(AgeBracket::from_age(30), AgeBracket::Thirties);
        assert_eq!(AgeBracket::from_age(40), AgeBracket::Forties);
        assert_eq!(AgeBracket::from_age(250), AgeBracket::Forties);
    }

    #[test]
    fn unknown_gender_degrades_to_other() {
        assert_eq!(Gender::parse_lenient("Female"), Gender::Female);
        assert_eq!(Gender::parse_lenient("robot"), Gender::Other);

        let parsed: Gender = serde_json::from_str("\"nonbinary\"").expect("lenient serde");
        assert_eq!(parsed, Gender::Other);
    }

    #[test]
    fn profile_values_override_preferences() {
        let preferences = UserPreferences {
            selected_style: Some("street".to_string()),
            gender: Some(Gender::Male),
            age: Some(19),
        };
        let profile = UserProfile { nickname: None, gender: Gender::Female, age: 33 };

        assert_eq!(
            preferences.demographic(Some(&profile)),
            UserDemographic::new(Gender::Female, 33)
        );
        assert_eq!(preferences.demographic(None), UserDemographic::new(Gender::Male, 19));
        assert_eq!(UserPreferences::default().demographic(None), UserDemographic::default());
    }

    #[test]
    fn blank_style_counts_as_unselected() {
        let preferences =
            UserPreferences { selected_style: Some("  ".to_string()), ..UserPreferences::default() };
        assert_eq!(preferences.style(), None);
    }

    #[test]
    fn registration_age_is_bounded() {
        let young = UserProfile { nickname: None, gender: Gender::Other, age: 12 };
        assert!(matches!(young.validate_for_registration(), Err(DomainError::InvalidProfile(_))));

        let adult = UserProfile { nickname: Some("mika".to_string()), gender: Gender::Female, age: 100 };
        assert!(adult.validate_for_registration().is_ok());
    }
}
