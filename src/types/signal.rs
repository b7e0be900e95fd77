use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SignalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MomentumCategory {
    Bullish,
    Bearish,
    Indecision,
}

impl MomentumCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentumCategory::Bullish => "Bullish",
            MomentumCategory::Bearish => "Bearish",
            MomentumCategory::Indecision => "Indecision",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MomentumDirection {
    Reversal,
    Continuation,
    None,
}

impl MomentumDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentumDirection::Reversal => "Reversal",
            MomentumDirection::Continuation => "Continuation",
            MomentumDirection::None => "None",
        }
    }
}

/// Monthly momentum label, written to the corpus as `"{category} {direction}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Momentum {
    pub category: MomentumCategory,
    pub direction: MomentumDirection,
}

impl Momentum {
    pub fn new(category: MomentumCategory, direction: MomentumDirection) -> Self {
        Self {
            category,
            direction,
        }
    }

    pub fn indecision() -> Self {
        Self::new(MomentumCategory::Indecision, MomentumDirection::None)
    }
}

impl fmt::Display for Momentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category.as_str(), self.direction.as_str())
    }
}

impl FromStr for Momentum {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let category = match parts.next() {
            Some("Bullish") => MomentumCategory::Bullish,
            Some("Bearish") => MomentumCategory::Bearish,
            Some("Indecision") => MomentumCategory::Indecision,
            _ => return Err(SignalError::DegenerateInput(format!("Unknown momentum label: {}", s))),
        };
        let direction = match parts.next() {
            Some("Reversal") => MomentumDirection::Reversal,
            Some("Continuation") => MomentumDirection::Continuation,
            Some("None") => MomentumDirection::None,
            _ => return Err(SignalError::DegenerateInput(format!("Unknown momentum label: {}", s))),
        };
        if parts.next().is_some() {
            return Err(SignalError::DegenerateInput(format!("Unknown momentum label: {}", s)));
        }
        Ok(Self::new(category, direction))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityMeasure {
    High,
    Medium,
    Low,
}

impl VolatilityMeasure {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityMeasure::High => "High",
            VolatilityMeasure::Medium => "Medium",
            VolatilityMeasure::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityCategory {
    Implied,
    Historical,
}

impl VolatilityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityCategory::Implied => "Implied",
            VolatilityCategory::Historical => "Historical",
        }
    }
}

/// Monthly volatility label, written to the corpus as `"{measure} {category}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Volatility {
    pub measure: VolatilityMeasure,
    pub category: VolatilityCategory,
}

impl Volatility {
    pub fn new(measure: VolatilityMeasure, category: VolatilityCategory) -> Self {
        Self { measure, category }
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.measure.as_str(), self.category.as_str())
    }
}

impl FromStr for Volatility {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let measure = match parts.next() {
            Some("High") => VolatilityMeasure::High,
            Some("Medium") => VolatilityMeasure::Medium,
            Some("Low") => VolatilityMeasure::Low,
            _ => return Err(SignalError::DegenerateInput(format!("Unknown volatility label: {}", s))),
        };
        let category = match parts.next() {
            Some("Implied") => VolatilityCategory::Implied,
            Some("Historical") => VolatilityCategory::Historical,
            _ => return Err(SignalError::DegenerateInput(format!("Unknown volatility label: {}", s))),
        };
        if parts.next().is_some() {
            return Err(SignalError::DegenerateInput(format!("Unknown volatility label: {}", s)));
        }
        Ok(Self::new(measure, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_momentum_label_text() {
        let momentum = Momentum::new(MomentumCategory::Bearish, MomentumDirection::Reversal);
        assert_eq!(momentum.to_string(), "Bearish Reversal");
        assert_eq!(Momentum::indecision().to_string(), "Indecision None");
        assert_eq!(Momentum::from_str("Bearish Reversal").unwrap(), momentum);
        assert!(Momentum::from_str("Sideways None").is_err());
        assert!(Momentum::from_str("Bullish").is_err());
    }

    #[test]
    fn test_volatility_label_text() {
        let volatility = Volatility::new(VolatilityMeasure::High, VolatilityCategory::Implied);
        assert_eq!(volatility.to_string(), "High Implied");
        assert_eq!(Volatility::from_str("Low Historical").unwrap().measure, VolatilityMeasure::Low);
        assert!(Volatility::from_str("High Implied extra").is_err());
    }
}
