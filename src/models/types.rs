//! Core value types shared by all cohort models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-valued indicator: a survey answer that is yes, no, or not recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriState {
    /// Answered yes
    True,
    /// Answered no
    False,
    /// Not recorded, not applicable, or unreadable
    #[default]
    Unknown,
}

impl TriState {
    /// Whether a definite answer is present
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether the answer is a definite yes
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Convert to an optional boolean
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unknown, Self::from)
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "yes"),
            Self::False => write!(f, "no"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Source study a subject record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatasetTag {
    /// Primary cohort; wins identifier conflicts
    Cded,
    /// Secondary cohort
    Cpd,
}

impl DatasetTag {
    /// Lowercase tag as written to the output table
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cded => "cded",
            Self::Cpd => "cpd",
        }
    }

    /// Column holding the subject identifier in this dataset's raw table
    #[must_use]
    pub const fn id_column(self) -> &'static str {
        match self {
            Self::Cded => "SUBJECT_ID",
            Self::Cpd => "PATIENT_ID",
        }
    }
}

impl fmt::Display for DatasetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cded => write!(f, "CDED"),
            Self::Cpd => write!(f, "CPD"),
        }
    }
}

/// Destination category for a routed signal file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    /// Subject has no qualifying symptom
    Healthy,
    /// Subject has at least one qualifying symptom
    Neuropathy,
}

impl Bucket {
    /// Bucket for a neuropathy label
    #[must_use]
    pub const fn from_label(neuropathy: bool) -> Self {
        if neuropathy {
            Self::Neuropathy
        } else {
            Self::Healthy
        }
    }

    /// Directory name conventionally used for the bucket
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Neuropathy => "neuropathy",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
