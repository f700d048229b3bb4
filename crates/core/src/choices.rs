//! Fixed choice sets for lead fields.
//!
//! Each field gets exactly one enum carrying its stored code and display
//! label. The validator, the stores, the CSV codec and the HTTP layer all
//! refer to these types instead of repeating literal lists.

use serde::{Deserialize, Serialize};

/// A value that is not one of a field's known codes.
///
/// The display form doubles as the validator's error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field}: {value}")]
pub struct UnknownChoice {
    pub field: &'static str,
    pub value: String,
}

/// A `{ code, label }` pair for clients that render choice lists.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceOption {
    pub code: &'static str,
    pub label: &'static str,
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $variant:ident => ($code:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable field name used in error messages.
            pub const FIELD: &'static str = $field;

            /// Stored code (database, CSV, JSON).
            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Display label.
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Exact, case-sensitive lookup by code.
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// All `{ code, label }` pairs, in display order.
            pub fn options() -> Vec<ChoiceOption> {
                Self::ALL
                    .iter()
                    .map(|c| ChoiceOption { code: c.code(), label: c.label() })
                    .collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_code(s).ok_or_else(|| UnknownChoice {
                    field: $field,
                    value: s.to_string(),
                })
            }
        }
    };
}

choice_enum! {
    /// Cities the sales team covers.
    City, "city" {
        Mumbai => ("mumbai", "Mumbai"),
        Delhi => ("delhi", "Delhi"),
        Bangalore => ("bangalore", "Bangalore"),
        Pune => ("pune", "Pune"),
        Hyderabad => ("hyderabad", "Hyderabad"),
    }
}

choice_enum! {
    PropertyType, "property type" {
        Apartment => ("apartment", "Apartment"),
        Villa => ("villa", "Villa"),
        Plot => ("plot", "Plot"),
        Commercial => ("commercial", "Commercial"),
    }
}

choice_enum! {
    /// Bedroom-hall-kitchen count. Only meaningful for apartments and villas.
    Bhk, "BHK" {
        One => ("1bhk", "1 BHK"),
        Two => ("2bhk", "2 BHK"),
        Three => ("3bhk", "3 BHK"),
        Four => ("4bhk", "4 BHK"),
        FivePlus => ("5bhk", "5+ BHK"),
    }
}

choice_enum! {
    Purpose, "purpose" {
        Buy => ("buy", "Buy"),
        Rent => ("rent", "Rent"),
        Investment => ("investment", "Investment"),
    }
}

choice_enum! {
    Timeline, "timeline" {
        Immediate => ("immediate", "Immediate"),
        OneMonth => ("1month", "Within 1 Month"),
        ThreeMonths => ("3months", "Within 3 Months"),
        SixMonths => ("6months", "Within 6 Months"),
        OneYear => ("1year", "Within 1 Year"),
    }
}

choice_enum! {
    /// Where the lead came from.
    Source, "source" {
        Website => ("website", "Website"),
        Referral => ("referral", "Referral"),
        SocialMedia => ("social_media", "Social Media"),
        Advertisement => ("advertisement", "Advertisement"),
        WalkIn => ("walk_in", "Walk In"),
    }
}

choice_enum! {
    /// Sales-pipeline stage.
    Status, "status" {
        New => ("new", "New"),
        Contacted => ("contacted", "Contacted"),
        Qualified => ("qualified", "Qualified"),
        Converted => ("converted", "Converted"),
        Lost => ("lost", "Lost"),
    }
}

impl PropertyType {
    /// Apartments and villas must carry a BHK value.
    pub fn requires_bhk(&self) -> bool {
        matches!(self, Self::Apartment | Self::Villa)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::New
    }
}

impl Status {
    /// Lenient parse: unknown or missing codes fall back to [`Status::New`].
    ///
    /// Status is the one choice field that never fails validation.
    pub fn from_code_or_default(code: Option<&str>) -> Self {
        code.and_then(Self::from_code).unwrap_or_default()
    }
}

/// Every choice list keyed by field name, for the `/choices` endpoint.
pub fn all_options() -> Vec<(&'static str, Vec<ChoiceOption>)> {
    vec![
        ("city", City::options()),
        ("property_type", PropertyType::options()),
        ("bhk", Bhk::options()),
        ("purpose", Purpose::options()),
        ("timeline", Timeline::options()),
        ("source", Source::options()),
        ("status", Status::options()),
    ]
}
