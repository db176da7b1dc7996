//! Client state machine for the customers screen.
//!
//! # Design
//! `CustomerSession` owns everything the screen shows: the cached list, the
//! search box and its result, the add/edit form, the form mode, and the
//! delete awaiting confirmation. Each operation issues at most one mutation
//! followed by one list refresh, all through the session's `Transport`.
//!
//! Failures never escape as panics. Every operation returns its error for
//! the caller to inspect and also records what the user should see: a
//! [`Notice`] for alerts, or a [`SearchMessage`] for the inline search line.
//! On failure the state is left as it was before the call.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::CustomerClient;
use crate::error::{ApiError, SessionError, TransportError, ValidationError};
use crate::form::{CustomerForm, FormMode};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Customer, CustomerId, CustomerInput};

/// Alert-style message raised by a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoadFailed,
    MissingRequiredFields,
    UpdateNeedsSelection,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        "Error"
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::LoadFailed => "Could not load customers",
            Notice::MissingRequiredFields => "Name and tax ID are required",
            Notice::UpdateNeedsSelection => "Select a customer and fill in name and tax ID",
            Notice::CreateFailed => "Could not add customer",
            Notice::UpdateFailed => "Could not update customer",
            Notice::DeleteFailed => "Could not delete customer",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// Inline message shown under the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMessage {
    MissingId,
    NotFound,
    Failed,
}

impl fmt::Display for SearchMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMessage::MissingId => "Enter an ID to search.",
            SearchMessage::NotFound => "Customer not found.",
            SearchMessage::Failed => "Error while searching for customer.",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub found: Option<Customer>,
    pub message: Option<SearchMessage>,
}

/// A delete waiting for the user's yes/no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub id: CustomerId,
}

impl DeleteConfirmation {
    pub fn title(&self) -> &'static str {
        "Confirm deletion"
    }

    pub fn message(&self) -> &'static str {
        "Do you really want to delete this customer?"
    }
}

/// Shared view of the "refreshing" flag, for a spinner that polls while a
/// user-requested reload runs.
#[derive(Debug, Clone, Default)]
pub struct RefreshIndicator(Arc<AtomicBool>);

impl RefreshIndicator {
    pub fn is_refreshing(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, refreshing: bool) {
        self.0.store(refreshing, Ordering::Release);
    }
}

pub struct CustomerSession<T> {
    client: CustomerClient,
    transport: T,
    customers: Vec<Customer>,
    refreshing: RefreshIndicator,
    search: SearchState,
    form: CustomerForm,
    mode: FormMode,
    pending_delete: Option<CustomerId>,
    notices: Vec<Notice>,
}

impl<T: Transport> CustomerSession<T> {
    pub fn new(client: CustomerClient, transport: T) -> Self {
        Self {
            client,
            transport,
            customers: Vec::new(),
            refreshing: RefreshIndicator::default(),
            search: SearchState::default(),
            form: CustomerForm::default(),
            mode: FormMode::Creating,
            pending_delete: None,
            notices: Vec::new(),
        }
    }

    pub fn client(&self) -> &CustomerClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The local cache, as of the last successful list.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.is_refreshing()
    }

    pub fn refresh_indicator(&self) -> RefreshIndicator {
        self.refreshing.clone()
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn search_query(&self) -> &str {
        &self.search.query
    }

    pub fn found(&self) -> Option<&Customer> {
        self.search.found.as_ref()
    }

    pub fn search_message(&self) -> Option<SearchMessage> {
        self.search.message
    }

    pub fn form(&self) -> &CustomerForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CustomerForm {
        &mut self.form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    pub fn pending_delete(&self) -> Option<&CustomerId> {
        self.pending_delete.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand the queued notices to the view.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Look a record up in what is already on screen: the found card first,
    /// then the list.
    pub fn find_cached(&self, id: &CustomerId) -> Option<&Customer> {
        self.search
            .found
            .as_ref()
            .filter(|customer| customer.id.as_ref() == Some(id))
            .or_else(|| {
                self.customers
                    .iter()
                    .find(|customer| customer.id.as_ref() == Some(id))
            })
    }

    // -----------------------------------------------------------------------
    // List
    // -----------------------------------------------------------------------

    /// Replace the cache with the remote collection. On failure the cache is
    /// kept and a notice is queued.
    pub fn load_customers(&mut self) -> Result<usize, SessionError> {
        match self.fetch_customers() {
            Ok(customers) => {
                debug!(count = customers.len(), "customer list loaded");
                self.customers = customers;
                Ok(self.customers.len())
            }
            Err(err) => {
                warn!(error = %err, "could not load customers");
                self.notices.push(Notice::LoadFailed);
                Err(err)
            }
        }
    }

    /// User-requested reload; `is_refreshing` is set while it runs.
    pub fn refresh(&mut self) -> Result<usize, SessionError> {
        self.refreshing.set(true);
        let result = self.load_customers();
        self.refreshing.set(false);
        result
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Editing the search box drops any previous search message.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search.query = query.into();
        self.search.message = None;
    }

    /// Look up the customer whose id is in the search box.
    pub fn search(&mut self) -> Result<Customer, SessionError> {
        self.search.found = None;
        self.search.message = None;

        let id = CustomerId::new(self.search.query.trim());
        if id.as_str().is_empty() {
            self.search.message = Some(SearchMessage::MissingId);
            return Err(ValidationError::MissingSearchId.into());
        }

        match self.fetch_customer(&id) {
            Ok(customer) => {
                self.search.found = Some(customer.clone());
                Ok(customer)
            }
            Err(err) => {
                let message = match err {
                    SessionError::Api(ApiError::NotFound) => SearchMessage::NotFound,
                    _ => SearchMessage::Failed,
                };
                debug!(%id, error = %err, "search failed");
                self.search.message = Some(message);
                Err(err)
            }
        }
    }

    pub fn search_for(&mut self, query: impl Into<String>) -> Result<Customer, SessionError> {
        self.set_search_query(query);
        self.search()
    }

    pub fn clear_search(&mut self) {
        self.search = SearchState::default();
    }

    // -----------------------------------------------------------------------
    // Form
    // -----------------------------------------------------------------------

    /// Load a record into the form. A record without an id cannot be
    /// edited; the form is left alone.
    pub fn start_edit(&mut self, customer: &Customer) -> Result<(), SessionError> {
        let Some(id) = customer.id.clone() else {
            return Err(ValidationError::MissingRecordId.into());
        };
        self.mode = FormMode::Editing(id);
        self.form = CustomerForm::from_customer(customer);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.mode = FormMode::Creating;
        self.form.clear();
    }

    /// Create or update depending on the form mode.
    pub fn submit(&mut self) -> Result<(), SessionError> {
        if self.mode.is_editing() {
            self.update()
        } else {
            self.create()
        }
    }

    pub fn create(&mut self) -> Result<(), SessionError> {
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.notices.push(Notice::MissingRequiredFields);
                return Err(err.into());
            }
        };

        if let Err(err) = self.post_customer(&input) {
            warn!(error = %err, "could not add customer");
            self.notices.push(Notice::CreateFailed);
            return Err(err);
        }

        info!(name = %input.name, "customer added");
        self.form.clear();
        self.reload_after_mutation();
        Ok(())
    }

    pub fn update(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.mode.editing_id().cloned() else {
            self.notices.push(Notice::UpdateNeedsSelection);
            return Err(ValidationError::NoCustomerSelected.into());
        };
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.notices.push(Notice::UpdateNeedsSelection);
                return Err(err.into());
            }
        };

        if let Err(err) = self.put_customer(&id, &input) {
            warn!(%id, error = %err, "could not update customer");
            self.notices.push(Notice::UpdateFailed);
            return Err(err);
        }

        info!(%id, "customer updated");
        self.mode = FormMode::Creating;
        self.form.clear();
        self.reload_after_mutation();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Stage a delete. Nothing is sent until [`Self::confirm_delete`].
    pub fn request_delete(&mut self, id: CustomerId) -> DeleteConfirmation {
        self.pending_delete = Some(id.clone());
        DeleteConfirmation { id }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.pending_delete.take() else {
            return Err(ValidationError::NoPendingDelete.into());
        };

        if let Err(err) = self.remove_customer(&id) {
            warn!(%id, error = %err, "could not delete customer");
            self.notices.push(Notice::DeleteFailed);
            return Err(err);
        }

        info!(%id, "customer deleted");
        if self
            .search
            .found
            .as_ref()
            .is_some_and(|found| found.id.as_ref() == Some(&id))
        {
            self.search.found = None;
            self.search.query.clear();
        }
        if self.mode.editing_id() == Some(&id) {
            self.mode = FormMode::Creating;
            self.form.clear();
        }
        self.reload_after_mutation();
        Ok(())
    }

    /// Stage a delete, ask `confirm`, then send or drop it. Returns whether
    /// the delete went through.
    pub fn delete_with<F>(&mut self, id: CustomerId, confirm: F) -> Result<bool, SessionError>
    where
        F: FnOnce(&DeleteConfirmation) -> bool,
    {
        let confirmation = self.request_delete(id);
        if !confirm(&confirmation) {
            self.cancel_delete();
            return Ok(false);
        }
        self.confirm_delete().map(|()| true)
    }

    // -----------------------------------------------------------------------
    // Round-trips
    // -----------------------------------------------------------------------

    /// List failures queue their own notice, so the mutation still counts
    /// as successful.
    fn reload_after_mutation(&mut self) {
        let _ = self.load_customers();
    }

    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, "response received");
        Ok(response)
    }

    fn fetch_customers(&mut self) -> Result<Vec<Customer>, SessionError> {
        let request = self.client.build_list_customers();
        let response = self.send(request)?;
        Ok(self.client.parse_list_customers(response)?)
    }

    fn fetch_customer(&mut self, id: &CustomerId) -> Result<Customer, SessionError> {
        let request = self.client.build_get_customer(id);
        let response = self.send(request)?;
        Ok(self.client.parse_get_customer(response)?)
    }

    fn post_customer(&mut self, input: &CustomerInput) -> Result<(), SessionError> {
        let request = self.client.build_create_customer(input)?;
        let response = self.send(request)?;
        Ok(self.client.parse_create_customer(response)?)
    }

    fn put_customer(&mut self, id: &CustomerId, input: &CustomerInput) -> Result<(), SessionError> {
        let request = self.client.build_update_customer(id, input)?;
        let response = self.send(request)?;
        Ok(self.client.parse_update_customer(response)?)
    }

    fn remove_customer(&mut self, id: &CustomerId) -> Result<(), SessionError> {
        let request = self.client.build_delete_customer(id);
        let response = self.send(request)?;
        Ok(self.client.parse_delete_customer(response)?)
    }
}
