//! Handling profiles per produce quality grade

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;

/// Produce quality grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
}

impl FromStr for Grade {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            _ => Err(Error::InvalidInput(format!(
                "Unknown produce grade '{s}', expected A, B or C"
            ))),
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
        };
        f.write_str(s)
    }
}

/// How produce of a given grade is handled in transit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeSegregation {
    pub grade: Grade,
    /// 1 is shipped first
    pub priority: u8,
    pub handling: &'static str,
    pub storage: &'static str,
    pub packaging: &'static str,
    pub route: &'static str,
    /// Display colour as a hex string
    pub color: &'static str,
    pub description: &'static str,
}

pub fn segregation(grade: Grade) -> GradeSegregation {
    match grade {
        Grade::A => GradeSegregation {
            grade,
            priority: 1,
            handling: "Premium Cold Chain",
            storage: "Climate Controlled",
            packaging: "Vacuum Sealed",
            route: "Express Highway",
            color: "#10B981",
            description: "Premium grade - Direct express delivery with cold chain",
        },
        Grade::B => GradeSegregation {
            grade,
            priority: 2,
            handling: "Standard Refrigerated",
            storage: "Cool Storage",
            packaging: "Standard Crate",
            route: "Standard Route",
            color: "#F59E0B",
            description: "Good grade - Standard refrigerated transport",
        },
        Grade::C => GradeSegregation {
            grade,
            priority: 3,
            handling: "Basic Transport",
            storage: "Ambient",
            packaging: "Bulk Bags",
            route: "Economy Route",
            color: "#EF4444",
            description: "Standard grade - Economy bulk transport",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grades() {
        assert_eq!("A".parse::<Grade>().unwrap(), Grade::A);
        assert_eq!(" b ".parse::<Grade>().unwrap(), Grade::B);
        assert_eq!("c".parse::<Grade>().unwrap(), Grade::C);
    }

    #[test]
    fn test_unknown_grade_rejected() {
        for bad in ["D", "", "AA", "premium"] {
            let err = bad.parse::<Grade>().unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn test_profiles() {
        let a = segregation(Grade::A);
        assert_eq!(a.priority, 1);
        assert_eq!(a.handling, "Premium Cold Chain");
        assert_eq!(a.color, "#10B981");

        let b = segregation(Grade::B);
        assert_eq!(b.storage, "Cool Storage");
        assert_eq!(b.color, "#F59E0B");

        let c = segregation(Grade::C);
        assert_eq!(c.packaging, "Bulk Bags");
        assert_eq!(c.route, "Economy Route");
        assert_eq!(c.color, "#EF4444");
    }

    #[test]
    fn test_priorities_follow_grade_order() {
        let priorities: Vec<u8> = [Grade::A, Grade::B, Grade::C]
            .into_iter()
            .map(|g| segregation(g).priority)
            .collect();
        assert_eq!(priorities, vec![1, 2, 3]);
    }
}
