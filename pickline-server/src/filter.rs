//! Query-string parameters for the list endpoints and their translation into
//! store filters.

use pickline::prelude::Filter;
use serde::Deserialize;

fn default_prediction_limit() -> usize {
    20
}

fn default_blog_limit() -> usize {
    6
}

fn default_testimonial_limit() -> usize {
    10
}

/// `GET /predictions` parameters. Every filter is optional; a supplied bound of
/// `0` is a real bound.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionParams {
    pub league: Option<String>,
    /// Prefix of `kickoff_iso`, e.g. `2024-03-05`.
    pub date: Option<String>,
    pub min_odds: Option<f64>,
    pub max_odds: Option<f64>,
    pub min_conf: Option<i64>,
    pub max_conf: Option<i64>,
    #[serde(default = "default_prediction_limit")]
    pub limit: usize,
}

impl Default for PredictionParams {
    fn default() -> Self {
        Self {
            league: None,
            date: None,
            min_odds: None,
            max_odds: None,
            min_conf: None,
            max_conf: None,
            limit: default_prediction_limit(),
        }
    }
}

impl PredictionParams {
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::all();

        if let Some(league) = non_empty(&self.league) {
            filter = filter.eq("league", league);
        }
        if let Some(date) = non_empty(&self.date) {
            filter = filter.starts_with("kickoff_iso", date);
        }

        filter
            .range("confidence", self.min_conf, self.max_conf)
            .range("odds", self.min_odds, self.max_odds)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogParams {
    #[serde(default = "default_blog_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestimonialParams {
    #[serde(default = "default_testimonial_limit")]
    pub limit: usize,
}
