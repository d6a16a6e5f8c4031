use std::fmt;
use std::str::FromStr;

/// Letter grades on the ten-point scale, in the order the grade picker lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    Ex,
    Aa,
    Ab,
    Bb,
    Bc,
    Cc,
    Cd,
    Dd,
    De,
    Ee,
    Ff,
}

impl Grade {
    pub const ALL: [Grade; 11] = [
        Grade::Ex,
        Grade::Aa,
        Grade::Ab,
        Grade::Bb,
        Grade::Bc,
        Grade::Cc,
        Grade::Cd,
        Grade::Dd,
        Grade::De,
        Grade::Ee,
        Grade::Ff,
    ];

    pub fn points(self) -> f64 {
        match self {
            Grade::Ex => 10.0,
            Grade::Aa => 9.0,
            Grade::Ab => 8.5,
            Grade::Bb => 8.0,
            Grade::Bc => 7.5,
            Grade::Cc => 7.0,
            Grade::Cd => 6.5,
            Grade::Dd => 6.0,
            Grade::De => 5.5,
            Grade::Ee => 5.0,
            Grade::Ff => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Ex => "EX",
            Grade::Aa => "AA",
            Grade::Ab => "AB",
            Grade::Bb => "BB",
            Grade::Bc => "BC",
            Grade::Cc => "CC",
            Grade::Cd => "CD",
            Grade::Dd => "DD",
            Grade::De => "DE",
            Grade::Ee => "EE",
            Grade::Ff => "FF",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grade label: {0:?}")]
pub struct UnknownGrade(pub String);

impl FromStr for Grade {
    type Err = UnknownGrade;

    /// Labels are matched exactly; the picker only ever sends upper-case codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}
