//! Review data model.
//!
//! A review belongs to the user who posted it and names the restaurant it
//! is about. One review per (user, restaurant) pair; reviews are immutable
//! once posted, so the API exposes create and read only.

use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::FieldViolations;

static REVIEW_RE: OnceLock<Regex> = OnceLock::new();
static RATING_RE: OnceLock<Regex> = OnceLock::new();

fn review_regex() -> &'static Regex {
    REVIEW_RE.get_or_init(|| {
        Regex::new("^[A-Za-z-' ,.]+$")
            .unwrap_or_else(|error| panic!("review regex failed to compile: {error}"))
    })
}

fn rating_regex() -> &'static Regex {
    RATING_RE.get_or_init(|| {
        Regex::new("^[0-5]$")
            .unwrap_or_else(|error| panic!("rating regex failed to compile: {error}"))
    })
}

const REVIEW_MIN: usize = 1;
const REVIEW_MAX: usize = 300;

/// Restaurant review posted by a user.
///
/// Equality and hashing are keyed by the (userId, restaurantId) pair, the
/// domain-unique key, not by the generated id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Review {
    /// Generated identifier; absent until the record is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Id of the user posting the review; must reference an existing user.
    pub user_id: Option<i64>,
    /// Id of the restaurant the review is about.
    pub restaurant_id: Option<i64>,
    #[schema(example = "Great food")]
    pub review: String,
    /// Single digit 0–5, carried as a string.
    #[schema(example = "4")]
    pub rating: String,
}

impl Review {
    /// Build an unpersisted review from its fields.
    pub fn new(
        user_id: i64,
        restaurant_id: i64,
        review: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id: Some(user_id),
            restaurant_id: Some(restaurant_id),
            review: review.into(),
            rating: rating.into(),
        }
    }

    /// Attach a persisted identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Check every field constraint, collecting the complete reasons map.
    pub fn validate(&self) -> Result<(), FieldViolations> {
        let mut violations = FieldViolations::new();
        if self.user_id.is_none() {
            violations.push("userId", "The user id is required");
        }
        if self.restaurant_id.is_none() {
            violations.push("restaurantId", "The restaurant id is required");
        }
        let length = self.review.chars().count();
        if !(REVIEW_MIN..=REVIEW_MAX).contains(&length) {
            violations.push(
                "review",
                format!("The review must be between {REVIEW_MIN} and {REVIEW_MAX} characters"),
            );
        } else if !review_regex().is_match(&self.review) {
            violations.push("review", "Please use a text without numbers or specials");
        }
        if !rating_regex().is_match(&self.rating) {
            violations.push("rating", "Please use a number between 0 and 5");
        }
        violations.into_result()
    }
}

impl PartialEq for Review {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id && self.restaurant_id == other.restaurant_id
    }
}

impl Eq for Review {}

impl Hash for Review {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user_id.hash(state);
        self.restaurant_id.hash(state);
    }
}
