//! The consumer dashboard: catalogue browsing, contracts, ratings

use std::collections::HashMap;

use tracing::error;

use crate::auth::{AuthClient, Role, Session};
use crate::contracts::{find_active_contract, Contract, ContractsClient};
use crate::error::Error;
use crate::suppliers::{Supplier, SupplierFilter, SuppliersClient};
use crate::Clarke;

/// Workflow state for the consumer dashboard
///
/// Holds one catalogue page, the user's active contract, and the star
/// rating displayed per supplier. Ratings and contract deactivation are
/// optimistic: the local value is applied immediately and reverted if the
/// API call fails.
pub struct UserDashboard {
    session: Session,
    auth: AuthClient,
    suppliers: SuppliersClient,
    contracts: ContractsClient,

    page: u32,
    limit: u32,
    min_kwh: f64,
    catalogue: Vec<Supplier>,
    last_page_len: Option<usize>,

    active_contract: Option<Contract>,
    ratings: HashMap<i64, u8>,
}

impl UserDashboard {
    /// Build the dashboard for a user session
    ///
    /// A supplier session is rejected here rather than when the API refuses
    /// the first query.
    pub fn new(clarke: &Clarke, session: Session) -> Result<Self, Error> {
        if session.role != Role::User {
            return Err(Error::not_authenticated(
                "the user dashboard requires a session with role `user`",
            ));
        }

        Ok(Self {
            auth: clarke.auth().clone(),
            suppliers: clarke.suppliers(),
            contracts: clarke.contracts(),
            page: 1,
            limit: clarke.options.page_size,
            min_kwh: 0.0,
            catalogue: Vec::new(),
            last_page_len: None,
            active_contract: None,
            ratings: HashMap::new(),
            session,
        })
    }

    /// The session this dashboard was built from
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The current 1-based catalogue page
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The current minimum-consumption filter
    pub fn min_kwh(&self) -> f64 {
        self.min_kwh
    }

    /// The loaded catalogue page
    pub fn catalogue(&self) -> &[Supplier] {
        &self.catalogue
    }

    /// The user's active contract, if any
    pub fn active_contract(&self) -> Option<&Contract> {
        self.active_contract.as_ref()
    }

    /// Whether the sign-contract action is available
    pub fn can_sign(&self) -> bool {
        self.active_contract.is_none()
    }

    /// Whether a next catalogue page may exist (last fetch was a full page)
    pub fn can_go_next(&self) -> bool {
        self.last_page_len == Some(self.limit as usize)
    }

    /// Whether a previous catalogue page exists
    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    /// The stars currently shown for a supplier, optimistic values included
    pub fn displayed_rating(&self, supplier_id: i64) -> Option<u8> {
        self.ratings.get(&supplier_id).copied()
    }

    /// Load both the catalogue page and the user's contracts
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.refresh_catalogue().await?;
        self.refresh_contracts().await
    }

    async fn refresh_catalogue(&mut self) -> Result<(), Error> {
        let filter = SupplierFilter::default()
            .with_min_kwh(self.min_kwh)
            .with_page(self.page)
            .with_limit(self.limit)
            .with_user_id(self.session.id.clone());

        let page = self.suppliers.list(&filter).await?;

        self.last_page_len = Some(page.len());
        self.ratings = page
            .iter()
            .filter_map(|s| s.user_review.as_ref().map(|r| (s.id, r.rating)))
            .collect();
        self.catalogue = page;
        Ok(())
    }

    async fn refresh_contracts(&mut self) -> Result<(), Error> {
        let list = self.contracts.list_by_user(&self.session.id).await?;
        self.active_contract = find_active_contract(&list).cloned();
        Ok(())
    }

    /// Apply a new minimum-consumption filter and reload from page 1
    pub async fn search(&mut self, min_kwh: f64) -> Result<(), Error> {
        if !min_kwh.is_finite() || min_kwh < 0.0 {
            return Err(Error::invalid_input(format!(
                "minimum consumption filter must be zero or positive, got {}",
                min_kwh
            )));
        }

        self.min_kwh = min_kwh;
        self.page = 1;
        self.refresh_catalogue().await
    }

    /// Advance to the next catalogue page
    ///
    /// Returns `false` without fetching when the last page was short, the
    /// last-page heuristic. The page number is rolled back if the fetch fails.
    pub async fn next_page(&mut self) -> Result<bool, Error> {
        if !self.can_go_next() {
            return Ok(false);
        }

        self.page += 1;
        if let Err(e) = self.refresh_catalogue().await {
            self.page -= 1;
            return Err(e);
        }
        Ok(true)
    }

    /// Go back one catalogue page, clamped at page 1
    pub async fn previous_page(&mut self) -> Result<bool, Error> {
        if !self.can_go_previous() {
            return Ok(false);
        }

        self.page -= 1;
        if let Err(e) = self.refresh_catalogue().await {
            self.page += 1;
            return Err(e);
        }
        Ok(true)
    }

    /// Sign a contract with a supplier
    ///
    /// Rejected locally, with no network call, while a contract is already
    /// active. Rapid repeated submissions are serialized by the exclusive
    /// receiver: a second call cannot start until the first has resolved
    /// and updated the panel. The contract list is refetched on success so
    /// the panel reflects the API's state.
    pub async fn sign_contract(&mut self, supplier_id: i64, kwh: f64) -> Result<Contract, Error> {
        if self.active_contract.is_some() {
            return Err(Error::invalid_input(
                "a contract is already active; deactivate it first",
            ));
        }

        let contract = self
            .contracts
            .create(&self.session.id, supplier_id, kwh)
            .await?;
        self.refresh_contracts().await?;
        Ok(contract)
    }

    /// Deactivate the active contract
    ///
    /// The panel is cleared optimistically; on failure the contract is put
    /// back and the error propagated. On success the canonical state is
    /// re-derived from a contract refetch.
    pub async fn deactivate_contract(&mut self) -> Result<(), Error> {
        let snapshot = match self.active_contract.take() {
            Some(contract) => contract,
            None => return Err(Error::invalid_input("no active contract to deactivate")),
        };

        if let Err(e) = self.contracts.deactivate(snapshot.id).await {
            error!(contract_id = snapshot.id, error = %e, "contract deactivation failed, restoring panel");
            self.active_contract = Some(snapshot);
            return Err(e);
        }

        self.refresh_contracts().await
    }

    /// Rate a supplier, 1 to 5 stars
    ///
    /// The displayed stars update immediately and only for this supplier;
    /// a failed submission reverts them.
    pub async fn rate_supplier(&mut self, supplier_id: i64, stars: u8) -> Result<(), Error> {
        if !(1..=5).contains(&stars) {
            return Err(Error::invalid_input(format!(
                "rating must be between 1 and 5, got {}",
                stars
            )));
        }

        let previous = self.ratings.insert(supplier_id, stars);

        if let Err(e) = self.suppliers.rate(&self.session.id, supplier_id, stars).await {
            error!(supplier_id, stars, error = %e, "review submission failed, reverting stars");
            match previous {
                Some(value) => {
                    self.ratings.insert(supplier_id, value);
                }
                None => {
                    self.ratings.remove(&supplier_id);
                }
            }
            return Err(e);
        }

        Ok(())
    }

    /// Clear the session; subsequent loads see no data from this account
    pub fn logout(self) -> Result<(), Error> {
        self.auth.sign_out()
    }
}
