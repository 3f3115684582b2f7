//! Player decisions: the categorical input to a simulation run.
//!
//! Serialized spellings match what the setup screen submits
//! (`socialMedia`, `Basic`, ...). Parsing is case-insensitive so the
//! runner can accept `--marketing socialmedia`.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generates Display/FromStr and an `ALL` table for a decision enum.
/// The first string of each arm is the canonical wire spelling.
macro_rules! decision_enum {
    ($name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = SimError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| SimError::InvalidDecision {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ProjectType {
    Tech,
    Finance,
    Marketing,
}

decision_enum!(ProjectType, "project type", {
    Tech => "tech",
    Finance => "finance",
    Marketing => "marketing",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BudgetLevel {
    Low,
    Medium,
    High,
}

decision_enum!(BudgetLevel, "budget", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MarketingStrategy {
    SocialMedia,
    Traditional,
    Influencer,
}

decision_enum!(MarketingStrategy, "marketing strategy", {
    SocialMedia => "socialMedia",
    Traditional => "traditional",
    Influencer => "influencer",
});

/// Carried on the record and shown in comparisons; does not feed scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComplexityLevel {
    Basic,
    Intermediate,
    Advanced,
}

decision_enum!(ComplexityLevel, "complexity level", {
    Basic => "Basic",
    Intermediate => "Intermediate",
    Advanced => "Advanced",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CybersecurityLevel {
    Basic,
    Advanced,
    Enterprise,
}

decision_enum!(CybersecurityLevel, "cybersecurity level", {
    Basic => "basic",
    Advanced => "advanced",
    Enterprise => "enterprise",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AiIntegrationLevel {
    None,
    Basic,
    Advanced,
}

decision_enum!(AiIntegrationLevel, "AI integration level", {
    None => "none",
    Basic => "basic",
    Advanced => "advanced",
});

/// The full set of choices submitted for one run. Immutable once submitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Decisions {
    pub project_type: ProjectType,
    pub budget: BudgetLevel,
    pub marketing: MarketingStrategy,
    pub complexity_level: ComplexityLevel,
    pub cybersecurity: CybersecurityLevel,
    pub ai_integration: AiIntegrationLevel,
}

impl Default for Decisions {
    /// The setup screen's initial selection.
    fn default() -> Self {
        Self {
            project_type: ProjectType::Tech,
            budget: BudgetLevel::Medium,
            marketing: MarketingStrategy::SocialMedia,
            complexity_level: ComplexityLevel::Intermediate,
            cybersecurity: CybersecurityLevel::Advanced,
            ai_integration: AiIntegrationLevel::Basic,
        }
    }
}

impl Decisions {
    /// Every possible combination, in a stable order. 729 entries.
    pub fn all_combinations() -> Vec<Decisions> {
        let mut out = Vec::new();
        for &project_type in ProjectType::ALL {
            for &budget in BudgetLevel::ALL {
                for &marketing in MarketingStrategy::ALL {
                    for &complexity_level in ComplexityLevel::ALL {
                        for &cybersecurity in CybersecurityLevel::ALL {
                            for &ai_integration in AiIntegrationLevel::ALL {
                                out.push(Decisions {
                                    project_type,
                                    budget,
                                    marketing,
                                    complexity_level,
                                    cybersecurity,
                                    ai_integration,
                                });
                            }
                        }
                    }
                }
            }
        }
        out
    }

    /// One-line label used by the runner and comparison insights.
    pub fn summary(&self) -> String {
        format!(
            "{} project, {} budget, {} marketing, {} security, {} AI",
            self.project_type, self.budget, self.marketing, self.cybersecurity, self.ai_integration
        )
    }
}
