use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::sync::{Identified, Record};

/// Star rating, 1 through 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A row of the `reviews` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Review {
    pub id: String,
    pub company_id: String,
    #[schema(value_type = u8, minimum = 1, maximum = 5, example = 5)]
    pub rating: Rating,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub author_name: String,
    #[serde(default = "Utc::now", deserialize_with = "crate::nullable::or_now")]
    pub created_at: DateTime<Utc>,
    /// Unapproved reviews never reach the public profile.
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub is_approved: bool,
}

impl Record for Review {
    const TABLE: &'static str = "reviews";
}

impl Identified for Review {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Aggregate over approved reviews only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ReviewSummary {
    /// Mean rating; 0.0 when there are no approved reviews.
    #[schema(example = 4.5)]
    pub average: f64,
    pub count: usize,
    /// Approved reviews per star, index 0 holding one-star reviews.
    #[schema(value_type = Vec<usize>)]
    pub distribution: [usize; 5],
}

impl ReviewSummary {
    pub fn of(reviews: &[Review]) -> Self {
        let mut distribution = [0usize; 5];
        let mut total = 0u64;
        let mut count = 0usize;
        for review in reviews.iter().filter(|r| r.is_approved) {
            let stars = review.rating.get();
            distribution[usize::from(stars - 1)] += 1;
            total += u64::from(stars);
            count += 1;
        }
        let average = if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        };
        Self {
            average,
            count,
            distribution,
        }
    }
}

/// Approved reviews, newest first.
pub fn public_reviews(reviews: &[Review]) -> Vec<Review> {
    let mut visible: Vec<Review> = reviews.iter().filter(|r| r.is_approved).cloned().collect();
    visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    visible
}
