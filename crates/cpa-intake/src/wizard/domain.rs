use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reason the prospect gives for reaching out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    #[default]
    PersonalTaxes,
    BusinessTaxes,
    TaxPlanning,
    LifeEvent,
    ExploringServices,
    NotSure,
}

impl Situation {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::PersonalTaxes,
            Self::BusinessTaxes,
            Self::TaxPlanning,
            Self::LifeEvent,
            Self::ExploringServices,
            Self::NotSure,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::PersonalTaxes => "personal_taxes",
            Self::BusinessTaxes => "business_taxes",
            Self::TaxPlanning => "tax_planning",
            Self::LifeEvent => "life_event",
            Self::ExploringServices => "exploring_services",
            Self::NotSure => "not_sure",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalTaxes => "Looking for help with personal or family taxes",
            Self::BusinessTaxes => "Need guidance on business or self-employment taxes",
            Self::TaxPlanning => "Exploring tax planning or year-end strategies",
            Self::LifeEvent => {
                "Dealing with a recent life event that may affect taxes (for myself or a family member)"
            }
            Self::ExploringServices => "Other / just exploring CPA services",
            Self::NotSure => "Not sure yet \u{2013} want to discuss options",
        }
    }
}

/// How soon the prospect hopes to get started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    #[default]
    Immediately,
    WithinSixMonths,
    GatheringInformation,
    FutureReference,
}

impl Timeline {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Immediately,
            Self::WithinSixMonths,
            Self::GatheringInformation,
            Self::FutureReference,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Immediately => "immediately",
            Self::WithinSixMonths => "within_six_months",
            Self::GatheringInformation => "gathering_information",
            Self::FutureReference => "future_reference",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediately => "Immediately / within the next 30 days",
            Self::WithinSixMonths => "Within the next 3\u{2013}6 months",
            Self::GatheringInformation => "No firm timeline yet \u{2013} gathering information",
            Self::FutureReference => "Just researching for future reference",
        }
    }
}

/// Preferred channel for discussing next steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPreference {
    #[default]
    Email,
    PhoneCall,
    VideoCall,
    NoPreference,
}

impl ContactPreference {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Email,
            Self::PhoneCall,
            Self::VideoCall,
            Self::NoPreference,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::PhoneCall => "phone_call",
            Self::VideoCall => "video_call",
            Self::NoPreference => "no_preference",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::PhoneCall => "Phone call",
            Self::VideoCall => "Video call (Zoom/Teams)",
            Self::NoPreference => "No preference",
        }
    }
}

/// Error returned when a wire key does not name a known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! keyed_from_str {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let needle = value.trim();
                <$ty>::ordered()
                    .into_iter()
                    .find(|option| option.key() == needle)
                    .ok_or_else(|| UnknownOption {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

keyed_from_str!(Situation, "situation");
keyed_from_str!(Timeline, "timeline");
keyed_from_str!(ContactPreference, "contact preference");

/// Self-assessed complexity on a 1 (very straightforward) to 5 (quite involved) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Complexity(u8);

impl Complexity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, InvalidComplexity> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(InvalidComplexity(level))
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }
}

impl Default for Complexity {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Complexity {
    type Error = InvalidComplexity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Complexity> for u8 {
    fn from(value: Complexity) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("complexity must be between 1 and 5, got {0}")]
pub struct InvalidComplexity(pub u8);

/// Answers collected on the first screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneralAnswers {
    pub situation: Situation,
    pub timeline: Timeline,
    pub complexity: Complexity,
}

/// Raw second-screen input, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailsForm {
    #[serde(default)]
    pub main_concern: String,
    #[serde(default)]
    pub contact_pref: ContactPreference,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub interest_confirm: bool,
}

/// Second-screen answers after normalization. Only built once interest is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailAnswers {
    pub main_concern: Option<String>,
    pub contact_pref: ContactPreference,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub interest_confirm: bool,
}

impl DetailAnswers {
    /// Normalizes a confirmed form. Returns `None` when the confirmation box is unchecked.
    pub fn from_form(form: &DetailsForm) -> Option<Self> {
        if !form.interest_confirm {
            return None;
        }

        Some(Self {
            main_concern: non_blank(&form.main_concern).map(|_| form.main_concern.clone()),
            contact_pref: form.contact_pref,
            email: non_blank(&form.email).map(str::to_string),
            phone: non_blank(&form.phone).map(str::to_string),
            interest_confirm: true,
        })
    }

    pub fn to_form(&self) -> DetailsForm {
        DetailsForm {
            main_concern: self.main_concern.clone().unwrap_or_default(),
            contact_pref: self.contact_pref,
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            interest_confirm: self.interest_confirm,
        }
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Accumulated answers for one session, filled in as each step is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseDraft {
    pub general: Option<GeneralAnswers>,
    pub details: Option<DetailAnswers>,
}

impl ResponseDraft {
    pub fn complete(&self) -> Option<ResponseRecord> {
        let general = self.general?;
        let details = self.details.clone()?;
        Some(ResponseRecord::from_parts(general, details))
    }
}

/// Complete response record: both steps submitted and interest confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub situation: Situation,
    pub timeline: Timeline,
    pub complexity: Complexity,
    pub main_concern: Option<String>,
    pub contact_pref: ContactPreference,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub interest_confirm: bool,
}

impl ResponseRecord {
    pub fn from_parts(general: GeneralAnswers, details: DetailAnswers) -> Self {
        Self {
            situation: general.situation,
            timeline: general.timeline,
            complexity: general.complexity,
            main_concern: details.main_concern,
            contact_pref: details.contact_pref,
            email: details.email,
            phone: details.phone,
            interest_confirm: details.interest_confirm,
        }
    }
}
