//! Entity schemas, one collection each.
//!
//! Optional fields keep their defaults when absent and are stored as `null` when
//! explicitly sent as `null`.

use chrono::{DateTime, Utc};
use pickline::document::Document;
use serde::{Deserialize, Serialize};

use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "home_win")]
    HomeWin,
    #[serde(rename = "away_win")]
    AwayWin,
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "over_2_5")]
    Over2_5,
    #[serde(rename = "under_2_5")]
    Under2_5,
    #[serde(rename = "both_teams_score")]
    BothTeamsScore,
    #[serde(rename = "home_asian")]
    HomeAsian,
    #[serde(rename = "away_asian")]
    AwayAsian,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Won,
    Lost,
    Void,
}

/// A published pick for one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub league: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Caller-supplied; uniqueness is not enforced.
    pub match_id: String,
    pub home_team: String,
    pub away_team: String,
    /// Kickoff as an ISO-8601 string. Date filters prefix-match this text.
    pub kickoff_iso: String,
    pub pick: Pick,
    /// Decimal odds, strictly above 1.0.
    pub odds: f64,
    /// 1 to 100 inclusive.
    pub confidence: i64,
    #[serde(default)]
    pub risk: Risk,
    #[serde(default)]
    pub xg_home: Option<f64>,
    #[serde(default)]
    pub xg_away: Option<f64>,
    #[serde(default)]
    pub injuries: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub head_to_head: Option<String>,
    #[serde(default)]
    pub recent_form: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Status,
}

impl Document for Prediction {
    fn collection_name() -> &'static str {
        "prediction"
    }
}

impl Validate for Prediction {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if !(self.odds > 1.0) {
            errors.push("odds", "must be greater than 1.0");
        }
        if !(1..=100).contains(&self.confidence) {
            errors.push("confidence", "must be between 1 and 100");
        }
        for (field, xg) in [("xg_home", self.xg_home), ("xg_away", self.xg_away)] {
            if xg.is_some_and(|xg| !(xg >= 0.0)) {
                errors.push(field, "must be greater than or equal to 0");
            }
        }

        errors.into_result()
    }
}

fn default_author() -> Option<String> {
    Some("Analyst Team".to_string())
}

fn default_language() -> Option<String> {
    Some("en".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    /// URL key; uniqueness is not enforced.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default = "default_author")]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default = "default_language")]
    pub language: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Document for Blog {
    fn collection_name() -> &'static str {
        "blog"
    }
}

impl Validate for Blog {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub message: String,
    /// URL to a verified bet slip image.
    #[serde(default)]
    pub slip_image: Option<String>,
    #[serde(default = "default_true")]
    pub verified: bool,
}

impl Document for Testimonial {
    fn collection_name() -> &'static str {
        "testimonial"
    }
}

impl Validate for Testimonial {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

fn default_source() -> Option<String> {
    Some("landing".to_string())
}

fn default_locale() -> Option<String> {
    Some("en".to_string())
}

/// Newsletter signup. The email is stored exactly as sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub email: String,
    #[serde(default = "default_source")]
    pub source: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: Option<String>,
}

impl Document for Subscription {
    fn collection_name() -> &'static str {
        "subscription"
    }
}

impl Validate for Subscription {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

fn default_topic() -> Option<String> {
    Some("general".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default = "default_topic")]
    pub topic: Option<String>,
}

impl Document for Contact {
    fn collection_name() -> &'static str {
        "contact"
    }
}

impl Validate for Contact {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanCode {
    Free,
    Starter,
    Pro,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub code: PlanCode,
    pub name: String,
    pub monthly_price: f64,
    pub yearly_price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Omitted from output when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Document for Plan {
    fn collection_name() -> &'static str {
        "plan"
    }
}

impl Validate for Plan {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegalSlug {
    Terms,
    Privacy,
    ResponsibleBetting,
}

impl LegalSlug {
    pub const ALL: [LegalSlug; 3] = [
        LegalSlug::Terms,
        LegalSlug::Privacy,
        LegalSlug::ResponsibleBetting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LegalSlug::Terms => "terms",
            LegalSlug::Privacy => "privacy",
            LegalSlug::ResponsibleBetting => "responsible-betting",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Legal {
    pub slug: LegalSlug,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document for Legal {
    fn collection_name() -> &'static str {
        "legal"
    }
}

impl Validate for Legal {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
