use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is what gets stored and what goes over the wire.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(AppointmentStatus {
    Scheduled => "Scheduled",
    Completed => "Completed",
    Cancelled => "Cancelled",
});

str_enum!(Gender {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

str_enum!(BloodGroup {
    APositive => "A+",
    ANegative => "A-",
    BPositive => "B+",
    BNegative => "B-",
    OPositive => "O+",
    ONegative => "O-",
    AbPositive => "AB+",
    AbNegative => "AB-",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn appointment_status_round_trip() {
        for variant in AppointmentStatus::ALL {
            assert_eq!(AppointmentStatus::from_str(variant.as_str()).unwrap(), *variant);
        }
        assert_eq!(AppointmentStatus::ALL.len(), 3);
    }

    #[test]
    fn blood_group_uses_clinical_notation() {
        assert_eq!(BloodGroup::AbNegative.as_str(), "AB-");
        assert_eq!(BloodGroup::from_str("O+").unwrap(), BloodGroup::OPositive);
        let json = serde_json::to_string(&BloodGroup::BPositive).unwrap();
        assert_eq!(json, "\"B+\"");
    }

    #[test]
    fn status_deserializes_from_display_string() {
        let status: AppointmentStatus = serde_json::from_str("\"Cancelled\"").unwrap();
        assert_eq!(status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(AppointmentStatus::from_str("scheduled").is_err());
        assert!(Gender::from_str("").is_err());
        assert!(BloodGroup::from_str("C+").is_err());
    }
}
