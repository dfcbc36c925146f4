//! The supplier dashboard: own profile and contract book

use tracing::error;

use crate::auth::{AuthClient, Role, Session};
use crate::contracts::{Contract, ContractsClient};
use crate::error::Error;
use crate::suppliers::{Supplier, SuppliersClient, UpdateSupplierInput};
use crate::Clarke;

/// The editable slice of a supplier profile
///
/// Pre-filled from the last loaded profile; edits live here until saved.
/// Cancelling leaves typed values in place, matching the original screen.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    /// Price per kWh
    pub cost_per_kwh: f64,

    /// Minimum monthly consumption accepted, in kWh
    pub min_kwh_limit: f64,

    /// Number of clients served
    pub total_clients: i64,

    /// State of origin
    pub state_origin: Option<String>,

    /// Logo URL
    pub logo: Option<String>,
}

impl From<&Supplier> for EditForm {
    fn from(supplier: &Supplier) -> Self {
        Self {
            cost_per_kwh: supplier.cost_per_kwh,
            min_kwh_limit: supplier.min_kwh_limit,
            total_clients: supplier.total_clients,
            state_origin: supplier.state_origin.clone(),
            logo: supplier.logo.clone(),
        }
    }
}

/// Workflow state for the supplier dashboard
pub struct SupplierDashboard {
    session: Session,
    supplier_id: i64,
    auth: AuthClient,
    suppliers: SuppliersClient,
    contracts: ContractsClient,

    profile: Option<Supplier>,
    editing: bool,
    form: Option<EditForm>,

    page: u32,
    limit: u32,
    contract_page: Vec<Contract>,
    last_page_len: Option<usize>,
}

impl SupplierDashboard {
    /// Build the dashboard for a supplier session
    pub fn new(clarke: &Clarke, session: Session) -> Result<Self, Error> {
        if session.role != Role::Supplier {
            return Err(Error::not_authenticated(
                "the supplier dashboard requires a session with role `supplier`",
            ));
        }

        let supplier_id = session.id.parse::<i64>().map_err(|_| {
            Error::invalid_input(format!("session id `{}` is not a supplier id", session.id))
        })?;

        Ok(Self {
            supplier_id,
            auth: clarke.auth().clone(),
            suppliers: clarke.suppliers(),
            contracts: clarke.contracts(),
            profile: None,
            editing: false,
            form: None,
            page: 1,
            limit: clarke.options.page_size,
            contract_page: Vec::new(),
            last_page_len: None,
            session,
        })
    }

    /// The session this dashboard was built from
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The last loaded profile, if any
    pub fn profile(&self) -> Option<&Supplier> {
        self.profile.as_ref()
    }

    /// Whether the edit view is showing
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The edit form, once a profile has been loaded
    pub fn form(&self) -> Option<&EditForm> {
        self.form.as_ref()
    }

    /// Mutable access to the edit form while editing
    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        if self.editing {
            self.form.as_mut()
        } else {
            None
        }
    }

    /// The current 1-based contract page
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The loaded contract page
    pub fn contract_page(&self) -> &[Contract] {
        &self.contract_page
    }

    /// Whether a next contract page may exist (last fetch was a full page)
    pub fn can_go_next(&self) -> bool {
        self.last_page_len == Some(self.limit as usize)
    }

    /// Whether a previous contract page exists
    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    /// Load the own profile and the current contract page
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.refresh_profile().await?;
        self.refresh_contracts().await
    }

    async fn refresh_profile(&mut self) -> Result<(), Error> {
        let profile = self.suppliers.get_by_id(self.supplier_id).await?;
        self.form = Some(EditForm::from(&profile));
        self.profile = Some(profile);
        Ok(())
    }

    async fn refresh_contracts(&mut self) -> Result<(), Error> {
        let page = self
            .contracts
            .list_by_supplier(self.supplier_id, self.page, self.limit)
            .await?;
        self.last_page_len = Some(page.len());
        self.contract_page = page;
        Ok(())
    }

    /// Switch to the edit view; the form holds the last loaded profile values
    pub fn begin_edit(&mut self) -> Result<(), Error> {
        if self.form.is_none() {
            return Err(Error::invalid_input(
                "profile not loaded yet; call refresh first",
            ));
        }
        self.editing = true;
        Ok(())
    }

    /// Return to the read view, keeping whatever was typed in the form
    pub fn cancel_edit(&mut self) {
        self.editing = false;
    }

    /// Submit the full editable field set
    ///
    /// On success both the profile and the contract page are refreshed and
    /// the view returns to read mode. On failure the edit view stays up with
    /// the typed values intact.
    pub async fn save(&mut self) -> Result<(), Error> {
        let form = match &self.form {
            Some(form) => form.clone(),
            None => return Err(Error::invalid_input("nothing to save")),
        };

        let input = UpdateSupplierInput {
            cost_per_kwh: Some(form.cost_per_kwh),
            min_kwh_limit: Some(form.min_kwh_limit),
            total_clients: Some(form.total_clients),
            state_origin: form.state_origin,
            logo: form.logo,
        };

        if let Err(e) = self.suppliers.update(self.supplier_id, &input).await {
            error!(supplier_id = self.supplier_id, error = %e, "profile update failed");
            return Err(e);
        }

        self.refresh().await?;
        self.editing = false;
        Ok(())
    }

    /// Advance to the next contract page; short pages mean we are at the end
    pub async fn next_page(&mut self) -> Result<bool, Error> {
        if !self.can_go_next() {
            return Ok(false);
        }

        self.page += 1;
        if let Err(e) = self.refresh_contracts().await {
            self.page -= 1;
            return Err(e);
        }
        Ok(true)
    }

    /// Go back one contract page, clamped at page 1
    pub async fn previous_page(&mut self) -> Result<bool, Error> {
        if !self.can_go_previous() {
            return Ok(false);
        }

        self.page -= 1;
        if let Err(e) = self.refresh_contracts().await {
            self.page += 1;
            return Err(e);
        }
        Ok(true)
    }

    /// Clear the session
    pub fn logout(self) -> Result<(), Error> {
        self.auth.sign_out()
    }
}
