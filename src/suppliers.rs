//! Supplier catalogue: listing, filtering, profile updates, and reviews

use std::sync::{Arc, Mutex};

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::Error;
use crate::graphql::GraphQlRequest;
use crate::operations;

/// The requesting user's own review of a supplier, as annotated by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReview {
    /// Star rating, 1 to 5
    pub rating: u8,
}

/// An energy provider offering a per-kWh rate and a minimum consumption threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// The supplier id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Contact email; not returned by every operation
    #[serde(default)]
    pub email: Option<String>,

    /// Logo URL
    #[serde(default)]
    pub logo: Option<String>,

    /// State the supplier operates from
    #[serde(default)]
    pub state_origin: Option<String>,

    /// Price per kWh
    #[serde(rename = "cost_per_kWh")]
    pub cost_per_kwh: f64,

    /// Minimum monthly consumption the supplier accepts, in kWh
    #[serde(rename = "min_kWh_limit")]
    pub min_kwh_limit: f64,

    /// Number of clients currently served
    pub total_clients: i64,

    /// Aggregated star rating; absent until the first review lands
    #[serde(default)]
    pub avg_rating: Option<f64>,

    /// The requesting user's own review, when one exists
    #[serde(rename = "userReview", default)]
    pub user_review: Option<UserReview>,
}

/// Filter and pagination arguments for the supplier catalogue
///
/// Pages are 1-based; `min_kwh` is an inclusive lower bound on the
/// supplier's `min_kWh_limit`.
#[derive(Debug, Clone)]
pub struct SupplierFilter {
    /// Inclusive lower bound on minimum consumption
    pub min_kwh: f64,

    /// 1-based page number
    pub page: u32,

    /// Page size
    pub limit: u32,

    /// Requesting user id, for review annotation
    pub user_id: Option<String>,
}

impl Default for SupplierFilter {
    fn default() -> Self {
        Self {
            min_kwh: 0.0,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            user_id: None,
        }
    }
}

impl SupplierFilter {
    /// Set the minimum-consumption bound
    pub fn with_min_kwh(mut self, value: f64) -> Self {
        self.min_kwh = value;
        self
    }

    /// Set the page, clamped to 1
    pub fn with_page(mut self, value: u32) -> Self {
        self.page = value.max(1);
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, value: u32) -> Self {
        self.limit = value;
        self
    }

    /// Set the requesting user id
    pub fn with_user_id(mut self, value: impl Into<String>) -> Self {
        self.user_id = Some(value.into());
        self
    }
}

/// Editable fields of a supplier profile, for the `updateSupplier` mutation
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSupplierInput {
    /// New price per kWh
    #[serde(rename = "cost_per_kWh", skip_serializing_if = "Option::is_none")]
    pub cost_per_kwh: Option<f64>,

    /// New minimum consumption threshold
    #[serde(rename = "min_kWh_limit", skip_serializing_if = "Option::is_none")]
    pub min_kwh_limit: Option<f64>,

    /// New client count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_clients: Option<i64>,

    /// New state of origin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_origin: Option<String>,

    /// New logo URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A stored review, as returned by the `createReview` mutation
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    /// The review id
    pub id: i64,

    /// The reviewing user
    pub user_id: String,

    /// The reviewed supplier
    pub supplier_id: i64,

    /// Star rating, 1 to 5
    pub rating: u8,

    /// Creation time
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,

    /// Last-overwrite time; re-submitting replaces the previous rating
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize)]
struct CreateReviewInput<'a> {
    user_id: &'a str,
    supplier_id: i64,
    rating: u8,
}

/// Client for the supplier catalogue and review operations
#[derive(Clone)]
pub struct SuppliersClient {
    url: String,
    client: Client,
    session: Arc<Mutex<Option<Session>>>,
}

impl SuppliersClient {
    pub(crate) fn new(url: &str, client: Client, session: Arc<Mutex<Option<Session>>>) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn bearer(&self) -> Option<String> {
        let session = self.session.lock().unwrap();
        session.as_ref().map(|s| s.token.clone())
    }

    fn request<'a>(&'a self, document: &'a str) -> GraphQlRequest<'a> {
        let request = GraphQlRequest::new(&self.client, &self.url, document);
        match self.bearer() {
            Some(token) => request.bearer_auth(&token),
            None => request,
        }
    }

    /// List one catalogue page matching the filter
    pub async fn list(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>, Error> {
        self.request(operations::GET_SUPPLIERS)
            .variable("minKwh", filter.min_kwh)?
            .variable("page", filter.page)?
            .variable("limit", filter.limit)?
            .variable("user_id", filter.user_id.as_deref())?
            .execute("suppliers")
            .await
    }

    /// Fetch one supplier by id
    pub async fn get_by_id(&self, id: i64) -> Result<Supplier, Error> {
        self.request(operations::GET_SUPPLIER_DETAILS)
            .variable("id", id)?
            .execute("getSupplierById")
            .await
    }

    /// Update a supplier's own profile
    pub async fn update(&self, id: i64, input: &UpdateSupplierInput) -> Result<Supplier, Error> {
        self.request(operations::UPDATE_SUPPLIER)
            .variable("id", id)?
            .variable("input", input)?
            .execute("updateSupplier")
            .await
    }

    /// Submit a star rating for a supplier
    ///
    /// The API keeps one review per (user, supplier) pair; re-submitting
    /// overwrites the previous rating.
    pub async fn rate(&self, user_id: &str, supplier_id: i64, rating: u8) -> Result<Review, Error> {
        if !(1..=5).contains(&rating) {
            return Err(Error::invalid_input(format!(
                "rating must be between 1 and 5, got {}",
                rating
            )));
        }

        let input = CreateReviewInput {
            user_id,
            supplier_id,
            rating,
        };

        self.request(operations::CREATE_REVIEW)
            .variable("createReviewInput", &input)?
            .execute("createReview")
            .await
    }
}
