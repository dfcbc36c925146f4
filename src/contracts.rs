//! Contract lifecycle: listing, signing, and deactivation

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::error::Error;
use crate::graphql::GraphQlRequest;
use crate::operations;

/// The binding relationship between one user and one supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// The contract id
    pub id: i64,

    /// The supplying party
    pub supplier_id: i64,

    /// The supplier's display name; not returned by every operation
    #[serde(default)]
    pub supplier_name: Option<String>,

    /// The consuming party
    pub user_id: String,

    /// The user's display name; not returned by every operation
    #[serde(default)]
    pub user_name: Option<String>,

    /// Whether the contract is in force; deactivation flips this, never deletes
    #[serde(rename = "isActive")]
    pub is_active: bool,

    /// Agreed price per kWh
    #[serde(rename = "cost_per_kWh")]
    pub cost_per_kwh: f64,

    /// Agreed monthly consumption in kWh
    #[serde(rename = "user_kWh_month")]
    pub user_kwh_month: f64,

    /// Creation time as epoch milliseconds, carried as a string on the wire
    pub created_at: String,
}

impl Contract {
    /// Monthly cost: consumption times unit price, rounded to 2 decimals
    pub fn monthly_total(&self) -> f64 {
        (self.user_kwh_month * self.cost_per_kwh * 100.0).round() / 100.0
    }

    /// Monthly cost rendered with exactly 2 decimals, e.g. `112.50`
    pub fn monthly_total_display(&self) -> String {
        format!("{:.2}", self.monthly_total())
    }

    /// Creation date rendered as `DD/MM/YYYY`; `None` if the timestamp is garbage
    pub fn created_at_display(&self) -> Option<String> {
        let millis: i64 = self.created_at.trim().parse().ok()?;
        let date = Utc.timestamp_millis_opt(millis).single()?;
        Some(date.format("%d/%m/%Y").to_string())
    }
}

/// Pick the active contract out of a contract list
///
/// The API is expected to keep at most one contract active per user; this
/// checks the flag instead of trusting list order.
pub fn find_active_contract(contracts: &[Contract]) -> Option<&Contract> {
    contracts.iter().find(|c| c.is_active)
}

#[derive(Serialize)]
struct CreateContractInput<'a> {
    user_id: &'a str,
    supplier_id: i64,
    #[serde(rename = "user_kWh_month")]
    user_kwh_month: f64,
}

/// Client for contract queries and mutations
#[derive(Clone)]
pub struct ContractsClient {
    url: String,
    client: Client,
    session: Arc<Mutex<Option<Session>>>,
}

impl ContractsClient {
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

    /// List every contract held by one user
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Contract>, Error> {
        self.request(operations::GET_CONTRACTS_BY_USER_ID)
            .variable("user_id", user_id)?
            .execute("getAllContractsByUserId")
            .await
    }

    /// List one page of contracts against a supplier
    pub async fn list_by_supplier(
        &self,
        supplier_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Contract>, Error> {
        self.request(operations::GET_CONTRACTS_BY_SUPPLIER_ID)
            .variable("supplier_id", supplier_id)?
            .variable("page", page.max(1))?
            .variable("limit", limit)?
            .execute("getAllContractsBySupplierId")
            .await
    }

    /// Sign a contract between a user and a supplier
    ///
    /// Rejects a non-finite or non-positive monthly consumption before any
    /// request is built.
    pub async fn create(
        &self,
        user_id: &str,
        supplier_id: i64,
        user_kwh_month: f64,
    ) -> Result<Contract, Error> {
        if !user_kwh_month.is_finite() || user_kwh_month <= 0.0 {
            return Err(Error::invalid_input(format!(
                "monthly consumption must be a positive number of kWh, got {}",
                user_kwh_month
            )));
        }

        let input = CreateContractInput {
            user_id,
            supplier_id,
            user_kwh_month,
        };

        self.request(operations::CREATE_CONTRACT)
            .variable("input", &input)?
            .execute("createContract")
            .await
    }

    /// Deactivate a contract by id
    pub async fn deactivate(&self, id: i64) -> Result<Contract, Error> {
        self.request(operations::DEACTIVATE_CONTRACT)
            .variable("id", id)?
            .execute("deactivateContract")
            .await
    }
}
