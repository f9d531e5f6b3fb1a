//! # CRUD Controller
//!
//! One generic controller drives every resource screen. It owns the screen's state:
//!
//! - the **form**: a [`RecordForm`] for creating or editing one record
//! - the **selected key**: which record update/delete target, set by the caller
//! - the **collection**: the last successfully loaded records, replaced wholesale
//! - the **status**: the current [`Phase`] and the last operation's error message
//!
//! Every operation returns an [`Outcome`]. Failures never propagate as errors past the
//! controller: they come back as an [`ErrorMessage`], which is also kept in the status for
//! views to render. A successful operation clears it.
//!
//! Status changes are published on a `watch` channel, so a view can show a spinner while
//! an operation is in flight:
//!
//! ```rust,ignore
//! let mut status = controller.subscribe();
//! tokio::spawn(async move {
//!     while status.changed().await.is_ok() {
//!         render(&*status.borrow());
//!     }
//! });
//! controller.load_all().await?;
//! ```

use crate::clients::ResourceClient;
use crate::framework::{ClientError, ErrorMessage, Record, RecordForm, Resource, Transport};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Result of a controller operation.
pub type Outcome<T> = Result<T, ErrorMessage>;

/// What the controller is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Submitting,
}

/// Observable controller status. An error is layered on `Idle`, it is not a phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerStatus {
    pub phase: Phase,
    pub error_message: Option<ErrorMessage>,
}

/// Keeps one resource screen in sync with the backend.
pub struct CrudController<K: Resource> {
    client: ResourceClient<K>,
    form: RecordForm<K>,
    collection: Vec<Record<K>>,
    selected_key: Option<String>,
    status: watch::Sender<ControllerStatus>,
}

impl<K: Resource> CrudController<K> {
    pub fn new(client: ResourceClient<K>) -> Self {
        let (status, _) = watch::channel(ControllerStatus::default());
        Self {
            client,
            form: RecordForm::new(),
            collection: Vec::new(),
            selected_key: None,
            status,
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::new(ResourceClient::new(transport))
    }

    // --- State accessors ---

    pub fn form(&self) -> &RecordForm<K> {
        &self.form
    }

    /// Mutable form access for view edits.
    pub fn form_mut(&mut self) -> &mut RecordForm<K> {
        &mut self.form
    }

    /// Records from the last successful load.
    pub fn collection(&self) -> &[Record<K>] {
        &self.collection
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected_key.as_deref()
    }

    /// Targets a record for a later update or delete.
    pub fn select(&mut self, key: impl Into<String>) {
        self.selected_key = Some(key.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected_key = None;
    }

    pub fn phase(&self) -> Phase {
        self.status.borrow().phase
    }

    pub fn error_message(&self) -> Option<ErrorMessage> {
        self.status.borrow().error_message.clone()
    }

    pub fn status(&self) -> ControllerStatus {
        self.status.borrow().clone()
    }

    /// Receives every status change from now on.
    pub fn subscribe(&self) -> watch::Receiver<ControllerStatus> {
        self.status.subscribe()
    }

    pub fn client(&self) -> &ResourceClient<K> {
        &self.client
    }

    // --- Operations ---

    /// Fetches the collection and replaces the cached one. A failed load keeps the old
    /// cache. Returns the number of records loaded.
    pub async fn load_all(&mut self) -> Outcome<usize> {
        self.begin(Phase::Loading);
        let result = self.client.list_all().await;
        let records = self.finish("load_all", result)?;
        self.collection = records;
        info!(kind = K::NAME, size = self.collection.len(), "Collection loaded");
        Ok(self.collection.len())
    }

    /// Creates a record from `snapshot`.
    ///
    /// The form is cleared once the backend confirms. On failure it is restored to
    /// `snapshot`, so nothing the user typed is lost.
    pub async fn add(&mut self, snapshot: Record<K>) -> Outcome<()> {
        self.begin(Phase::Submitting);
        let result = self.client.create(&snapshot).await;
        match self.finish("add", result) {
            Ok(_) => {
                self.form.reset();
                info!(kind = K::NAME, key = ?snapshot.key(), "Record created");
                Ok(())
            }
            Err(message) => {
                self.form.load(&snapshot);
                Err(message)
            }
        }
    }

    /// Sends the non-empty, non-key fields of `snapshot` to record `key`. Fields left empty
    /// keep their stored values.
    ///
    /// Neither the form nor the collection changes; reload to observe the update.
    pub async fn update(&mut self, key: &str, snapshot: &Record<K>) -> Outcome<()> {
        self.begin(Phase::Submitting);
        let result = self.client.update(key, snapshot).await;
        self.finish("update", result)?;
        info!(kind = K::NAME, key, "Record updated");
        Ok(())
    }

    /// Deletes record `key`. The collection keeps its entry until the next load.
    pub async fn remove(&mut self, key: &str) -> Outcome<()> {
        self.begin(Phase::Submitting);
        let result = self.client.delete(key).await;
        self.finish("remove", result)?;
        info!(kind = K::NAME, key, "Record deleted");
        Ok(())
    }

    /// Fetches record `key` and loads it into the form.
    ///
    /// Every declared field is copied. Fields the backend left out or sent as `null`
    /// become empty; falsy values such as `0` or `false` are kept.
    pub async fn hydrate_form(&mut self, key: &str) -> Outcome<()> {
        self.begin(Phase::Loading);
        let result = self.client.get_one(key).await;
        let record = self.finish("hydrate_form", result)?;
        self.form.load(&record);
        Ok(())
    }

    /// Sets every form field to the empty sentinel. Collection and status are untouched.
    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    /// [`update`](Self::update) the selected record with the current form.
    pub async fn update_selected(&mut self) -> Outcome<()> {
        let key = self.require_selection()?;
        let snapshot = self.form.snapshot();
        self.update(&key, &snapshot).await
    }

    /// [`remove`](Self::remove) the selected record.
    pub async fn remove_selected(&mut self) -> Outcome<()> {
        let key = self.require_selection()?;
        self.remove(&key).await
    }

    fn require_selection(&self) -> Outcome<String> {
        self.selected_key
            .clone()
            .ok_or_else(|| ErrorMessage::Other(format!("No {} selected", K::NAME)))
    }

    // --- Status bookkeeping ---

    fn begin(&self, phase: Phase) {
        self.status.send_modify(|status| status.phase = phase);
    }

    /// Returns to `Idle` and records the outcome of `operation`.
    fn finish<T>(&self, operation: &'static str, result: Result<T, ClientError>) -> Outcome<T> {
        let outcome = result.map_err(|e| {
            warn!(kind = K::NAME, operation, error = %e, "Operation failed");
            ErrorMessage::from(&e)
        });
        let error_message = outcome.as_ref().err().cloned();
        self.status.send_modify(|status| {
            status.phase = Phase::Idle;
            status.error_message = error_message;
        });
        outcome
    }
}
