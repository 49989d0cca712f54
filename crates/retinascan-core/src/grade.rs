//! The five-point diabetic-retinopathy grading scale.
//!
//! The remote classifier reports grades as label strings ("No DR", "Mild",
//! "Moderate", "Severe", "Proliferative DR"); stored records carry the
//! numeric grade 0-4. Both mappings are total: unknown labels and
//! out-of-range numbers decode to [`Grade::NoDr`].

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Severity grade on the international DR scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    NoDr,
    Mild,
    Moderate,
    Severe,
    Proliferative,
}

/// All grades in scale order.
pub const ALL_GRADES: [Grade; 5] = [
    Grade::NoDr,
    Grade::Mild,
    Grade::Moderate,
    Grade::Severe,
    Grade::Proliferative,
];

impl Grade {
    /// Map a classifier label string to a grade.
    ///
    /// Matches the classifier's label set exactly; any unrecognised label
    /// maps to [`Grade::NoDr`].
    pub fn from_label(label: &str) -> Grade {
        match label {
            "No DR" => Grade::NoDr,
            "Mild" => Grade::Mild,
            "Moderate" => Grade::Moderate,
            "Severe" => Grade::Severe,
            "Proliferative DR" => Grade::Proliferative,
            _ => Grade::NoDr,
        }
    }

    /// Decode a numeric grade. Out-of-range values map to [`Grade::NoDr`].
    pub fn from_number(n: u8) -> Grade {
        match n {
            1 => Grade::Mild,
            2 => Grade::Moderate,
            3 => Grade::Severe,
            4 => Grade::Proliferative,
            _ => Grade::NoDr,
        }
    }

    /// Numeric grade 0-4, as persisted in result records.
    pub fn number(self) -> u8 {
        match self {
            Grade::NoDr => 0,
            Grade::Mild => 1,
            Grade::Moderate => 2,
            Grade::Severe => 3,
            Grade::Proliferative => 4,
        }
    }

    /// The label string used by the classifier.
    pub fn wire_label(self) -> &'static str {
        match self {
            Grade::NoDr => "No DR",
            Grade::Mild => "Mild",
            Grade::Moderate => "Moderate",
            Grade::Severe => "Severe",
            Grade::Proliferative => "Proliferative DR",
        }
    }

    /// The label shown to clinicians (NPDR grades spelled out).
    pub fn clinical_label(self) -> &'static str {
        match self {
            Grade::NoDr => "No DR",
            Grade::Mild => "Mild NPDR",
            Grade::Moderate => "Moderate NPDR",
            Grade::Severe => "Severe NPDR",
            Grade::Proliferative => "Proliferative DR",
        }
    }

    /// Clinical finding summary for the grade.
    pub fn description(self) -> &'static str {
        match self {
            Grade::NoDr => "No visible signs of diabetic retinopathy",
            Grade::Mild => "Presence of microaneurysms only",
            Grade::Moderate => "More than just microaneurysms but less than severe NPDR",
            Grade::Severe => {
                "Any of: >20 hemorrhages in each quadrant, venous beading in \
                 \u{2265}2 quadrants, or intraretinal microvascular abnormalities"
            }
            Grade::Proliferative => "Neovascularization and/or vitreous/preretinal hemorrhage",
        }
    }

    /// Screening recommendation for the grade.
    pub fn recommendation(self) -> &'static str {
        match self {
            Grade::NoDr => "Routine annual screening recommended",
            Grade::Mild => "Monitor for progression",
            Grade::Moderate => "Regular monitoring advised",
            Grade::Severe => "Referral to ophthalmology recommended",
            Grade::Proliferative => "Urgent referral to ophthalmology required",
        }
    }

    /// Recommended follow-up interval.
    pub fn follow_up(self) -> &'static str {
        match self {
            Grade::NoDr => "12 months",
            Grade::Mild => "9-12 months",
            Grade::Moderate => "6-9 months",
            Grade::Severe => "3-4 months",
            Grade::Proliferative => "Immediate",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.clinical_label())
    }
}

// Persisted records store the grade as a bare integer, so the enum
// serialises as its numeric value rather than a variant name.
impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        Ok(Grade::from_number(n))
    }
}
