//! Closed enumeration of spiral families and their names.

use std::fmt;
use std::str::FromStr;

use crate::error::GeomError;

/// Named spiral families. `Custom` carries a caller-supplied radius function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpiralFamily {
    Ellipse,
    Logarithmic,
    Archimedean,
    Hyperbolic,
    Fermat,
    Lituus,
    Clothoid,
    Fibonacci,
    Theodorus,
    Involute,
    Custom,
}

impl SpiralFamily {
    pub const ALL: [SpiralFamily; 11] = [
        SpiralFamily::Ellipse,
        SpiralFamily::Logarithmic,
        SpiralFamily::Archimedean,
        SpiralFamily::Hyperbolic,
        SpiralFamily::Fermat,
        SpiralFamily::Lituus,
        SpiralFamily::Clothoid,
        SpiralFamily::Fibonacci,
        SpiralFamily::Theodorus,
        SpiralFamily::Involute,
        SpiralFamily::Custom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpiralFamily::Ellipse => "Ellipse",
            SpiralFamily::Logarithmic => "Logarithmic",
            SpiralFamily::Archimedean => "Archimedean",
            SpiralFamily::Hyperbolic => "Hyperbolic",
            SpiralFamily::Fermat => "Fermat",
            SpiralFamily::Lituus => "Lituus",
            SpiralFamily::Clothoid => "Clothoid",
            SpiralFamily::Fibonacci => "Fibonacci",
            SpiralFamily::Theodorus => "Theodorus",
            SpiralFamily::Involute => "Involute",
            SpiralFamily::Custom => "Custom",
        }
    }

    /// Reserved names with no polar closed form `r(φ)`.
    ///
    /// - Clothoid: position is a pair of Fresnel integrals of arc length.
    /// - Theodorus: built from discrete right triangles.
    /// - Involute: its polar angle is `t - atan t`, not the parameter itself.
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            SpiralFamily::Clothoid | SpiralFamily::Theodorus | SpiralFamily::Involute
        )
    }

    /// Exact, case-sensitive lookup; `None` for names outside the enumeration.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for SpiralFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpiralFamily {
    type Err = GeomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| GeomError::config(format!("unknown spiral family '{s}'")))
    }
}
