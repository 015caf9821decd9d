//! Easing curves.
//!
//! Named after the GreenSock power family: `powerN` is a polynomial of degree
//! `N + 1`, so `power2.out` is `1 - (1 - t)³`. The string forms
//! (`"power2.out"`, `"power1.inOut"`, `"linear"`) are what config files use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ViewerError;

const MAX_POWER: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    In(u8),
    Out(u8),
    InOut(u8),
}

impl Ease {
    /// GreenSock's default ease.
    pub const POWER1_OUT: Ease = Ease::Out(1);
    pub const POWER2_OUT: Ease = Ease::Out(2);

    /// Maps linear progress `t` to eased progress. `t` is clamped to `[0, 1]`;
    /// both endpoints map to themselves exactly.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::In(power) => t.powi(i32::from(power) + 1),
            Ease::Out(power) => 1.0 - (1.0 - t).powi(i32::from(power) + 1),
            Ease::InOut(power) => {
                let exp = i32::from(power) + 1;
                if t < 0.5 {
                    (2.0 * t).powi(exp) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                }
            }
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::POWER1_OUT
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => f.write_str("linear"),
            Ease::In(p) => write!(f, "power{p}.in"),
            Ease::Out(p) => write!(f, "power{p}.out"),
            Ease::InOut(p) => write!(f, "power{p}.inOut"),
        }
    }
}

impl FromStr for Ease {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ViewerError::InvalidEase(s.to_string());

        let lower = s.trim().to_ascii_lowercase();
        if matches!(lower.as_str(), "linear" | "none" | "power0") {
            return Ok(Ease::Linear);
        }

        let rest = lower.strip_prefix("power").ok_or_else(invalid)?;
        let (digits, kind) = rest.split_once('.').unwrap_or((rest, "out"));
        let power: u8 = digits.parse().map_err(|_| invalid())?;
        if power == 0 {
            return Ok(Ease::Linear);
        }
        if power > MAX_POWER {
            return Err(invalid());
        }

        match kind {
            "in" => Ok(Ease::In(power)),
            "out" => Ok(Ease::Out(power)),
            "inout" => Ok(Ease::InOut(power)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = ViewerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}
