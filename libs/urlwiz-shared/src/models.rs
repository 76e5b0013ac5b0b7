use serde::{Deserialize, Serialize};

/// A fully revealed domain candidate as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub rank: u32,
    pub url: String,
    pub link: String,
    #[serde(default)]
    pub pageviews: Option<i64>,
    #[serde(default)]
    pub valuation: Option<f64>,
    #[serde(default)]
    pub monthly_parking_revenue: Option<f64>,
    #[serde(default)]
    pub is_adult: Option<bool>,
    #[serde(default)]
    pub auction_type: Option<String>,
    #[serde(default)]
    pub auction_end_time: Option<String>,
    #[serde(default)]
    pub auction_end_time_epoch: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub number_of_bids: Option<i64>,
    #[serde(default)]
    pub domain_age: Option<i64>,
    pub score: f64,
}

/// Redacted placeholder for a listing the caller has not paid to reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skeleton {
    pub rank: u32,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub pageviews: Option<i64>,
    #[serde(default)]
    pub valuation: Option<f64>,
    pub score: f64,
}

/// Aggregate for one search request.
///
/// All fields default when absent: the collection endpoint only fills in
/// `uuid`, `summary` and `isExample`, and a failed create comes back without
/// a `uuid` at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainSearchResult {
    pub domains: Vec<Listing>,
    pub skeletons: Vec<Skeleton>,
    pub uuid: String,
    pub total_domains: u32,
    pub is_unlocked: bool,
    pub prompt: String,
    pub summary: Option<String>,
    pub is_example: bool,
}

impl DomainSearchResult {
    /// Number of rows still behind the paywall.
    pub fn hidden_count(&self) -> usize {
        if self.is_unlocked {
            0
        } else {
            self.skeletons.len()
        }
    }

    /// The backend assigns the uuid before scoring finishes; until then the
    /// result has neither rows nor a summary.
    pub fn is_pending(&self) -> bool {
        self.total_domains == 0
            && self.domains.is_empty()
            && self.skeletons.is_empty()
            && self.summary.as_deref().is_none_or(|s| s.trim().is_empty())
    }

    /// Checks the row-count and contiguous-rank invariants of a result.
    pub fn is_consistent(&self) -> bool {
        let total = self.total_domains as usize;
        if self.is_unlocked {
            if !self.skeletons.is_empty() || self.domains.len() != total {
                return false;
            }
        } else if self.domains.len() + self.skeletons.len() != total {
            return false;
        }

        let mut ranks: Vec<u32> = self
            .skeletons
            .iter()
            .map(|s| s.rank)
            .chain(self.domains.iter().map(|d| d.rank))
            .collect();
        ranks.sort_unstable();
        ranks.iter().copied().eq(1..=self.total_domains)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSearchRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRequest {
    pub name: String,
    pub email: String,
}

/// Reply to an unlock request; `url` is the external checkout page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnlockResponse {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleSummary {
    pub uuid: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleFlagUpdate {
    pub is_example: bool,
}
