//! Donation recommendations from the external scoring service.

use std::sync::Arc;
use std::time::Duration;

use aaharsetu_common::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use validator::Validate;

/// Location and need of the asking NGO.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(length(min = 1, message = "Food type is required"))]
    pub food_type: String,

    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,
}

/// Donation-like record returned by the scorer.
///
/// Only `distance_km` is interpreted; every other field is passed through.
/// A record without a distance ranks behind every measured one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDonation {
    #[serde(default = "unknown_distance")]
    pub distance_km: f64,

    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

const fn unknown_distance() -> f64 {
    f64::INFINITY
}

/// Scores donations for a query.
#[async_trait]
pub trait DonationScorer: Send + Sync {
    async fn score(&self, query: &RecommendQuery) -> AppResult<Vec<ScoredDonation>>;
}

/// Scorer reached over HTTP at `{base_url}/recommend`.
#[derive(Clone)]
pub struct HttpDonationScorer {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpDonationScorer {
    /// Create a scorer client with a bounded request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DonationScorer for HttpDonationScorer {
    async fn score(&self, query: &RecommendQuery) -> AppResult<Vec<ScoredDonation>> {
        let url = format!("{}/recommend", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Scorer unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Scorer returned {}",
                response.status()
            )));
        }

        response
            .json::<Vec<ScoredDonation>>()
            .await
            .map_err(|e| AppError::ExternalService(format!("Malformed scorer response: {e}")))
    }
}

/// Recommendation service.
#[derive(Clone)]
pub struct RecommendationService {
    scorer: Arc<dyn DonationScorer>,
}

impl RecommendationService {
    /// Create a new recommendation service.
    #[must_use]
    pub fn new(scorer: Arc<dyn DonationScorer>) -> Self {
        Self { scorer }
    }

    /// Ask the scorer for matches, nearest first.
    pub async fn recommend(&self, query: RecommendQuery) -> AppResult<Vec<ScoredDonation>> {
        query.validate()?;

        let mut results = self.scorer.score(&query).await.inspect_err(|e| {
            warn!(error = %e, "Recommendation lookup failed");
        })?;
        results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        debug!(count = results.len(), food_type = %query.food_type, "Recommendations ranked");
        Ok(results)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct FixedScorer(Vec<f64>);

    #[async_trait]
    impl DonationScorer for FixedScorer {
        async fn score(&self, _query: &RecommendQuery) -> AppResult<Vec<ScoredDonation>> {
            Ok(self
                .0
                .iter()
                .enumerate()
                .map(|(i, d)| ScoredDonation {
                    distance_km: *d,
                    fields: serde_json::Map::from_iter([(
                        "title".to_string(),
                        serde_json::json!(format!("donation {i}")),
                    )]),
                })
                .collect())
        }
    }

    struct DownScorer;

    #[async_trait]
    impl DonationScorer for DownScorer {
        async fn score(&self, _query: &RecommendQuery) -> AppResult<Vec<ScoredDonation>> {
            Err(AppError::ExternalService("connection refused".to_string()))
        }
    }

    fn query() -> RecommendQuery {
        RecommendQuery {
            latitude: 19.07,
            longitude: 72.87,
            food_type: "veg".to_string(),
            quantity: 40,
        }
    }

    #[tokio::test]
    async fn test_results_sorted_by_distance() {
        let service = RecommendationService::new(Arc::new(FixedScorer(vec![7.5, 1.2, 3.0])));

        let results = service.recommend(query()).await.unwrap();
        let distances: Vec<f64> = results.iter().map(|r| r.distance_km).collect();

        assert_eq!(distances, vec![1.2, 3.0, 7.5]);
        assert_eq!(results[0].fields["title"], "donation 1");
    }

    #[tokio::test]
    async fn test_scorer_failure_is_upstream_error() {
        let service = RecommendationService::new(Arc::new(DownScorer));

        assert!(matches!(
            service.recommend(query()).await,
            Err(AppError::ExternalService(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_query_rejected_before_scoring() {
        let service = RecommendationService::new(Arc::new(DownScorer));
        let mut q = query();
        q.food_type = String::new();

        assert!(matches!(
            service.recommend(q).await,
            Err(AppError::Validation(_))
        ));
    }

    struct RawScorer(serde_json::Value);

    #[async_trait]
    impl DonationScorer for RawScorer {
        async fn score(&self, _query: &RecommendQuery) -> AppResult<Vec<ScoredDonation>> {
            Ok(serde_json::from_value(self.0.clone()).unwrap())
        }
    }

    #[tokio::test]
    async fn test_missing_distance_ranks_last() {
        let service = RecommendationService::new(Arc::new(RawScorer(serde_json::json!([
            {"title": "Unplaced"},
            {"title": "Far", "distance_km": 12.0},
            {"title": "Near", "distance_km": 0.4},
        ]))));

        let results = service.recommend(query()).await.unwrap();
        let titles: Vec<&str> = results
            .iter()
            .map(|r| r.fields["title"].as_str().unwrap())
            .collect();

        assert_eq!(titles, vec!["Near", "Far", "Unplaced"]);
        assert!(results[2].distance_km.is_infinite());
    }

    #[test]
    fn test_scored_donation_passes_fields_through() {
        let raw = serde_json::json!({"title": "Idli", "quantity": 12, "distance_km": 2.5});
        let scored: ScoredDonation = serde_json::from_value(raw).unwrap();

        assert_eq!(scored.distance_km, 2.5);
        assert_eq!(scored.fields["title"], "Idli");

        let back = serde_json::to_value(&scored).unwrap();
        assert_eq!(back["quantity"], 12);
    }
}
