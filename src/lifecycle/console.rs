use super::config::{parse_base_url, BackendConfig, ConfigError, ConsoleConfig};
use crate::clients::HttpTransport;
use crate::controller::{CrudController, TransactionSubmitter};
use crate::framework::Transport;
use crate::ledger::LedgerActor;
use crate::model::{Bookroom, Cancelroom, Client, Durationcomplete, Hotel, Order, Room};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Every screen of the console, wired to one backend.
///
/// `HotelConsole` is responsible for:
/// - **Wiring**: one [`Transport`] shared by all controllers and submitters
/// - **Backend startup**: spawning the in-memory ledger when configured
/// - **Shutdown**: closing the ledger once the controllers are gone
///
/// # Example
///
/// ```ignore
/// let mut console = HotelConsole::connect(&ConsoleConfig::from_env()?)?;
///
/// console.clients.load_all().await?;
/// console.clients.hydrate_form("C1").await?;
///
/// console.shutdown().await?;
/// ```
pub struct HotelConsole {
    pub hotels: CrudController<Hotel>,
    pub clients: CrudController<Client>,
    pub rooms: CrudController<Room>,
    pub orders: CrudController<Order>,

    pub bookings: TransactionSubmitter<Bookroom>,
    pub cancellations: TransactionSubmitter<Cancelroom>,
    pub completions: TransactionSubmitter<Durationcomplete>,

    /// Backend tasks owned by the console (the in-memory ledger).
    handles: Vec<JoinHandle<()>>,
}

impl HotelConsole {
    /// Builds every controller on top of `transport`.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            hotels: CrudController::with_transport(transport.clone()),
            clients: CrudController::with_transport(transport.clone()),
            rooms: CrudController::with_transport(transport.clone()),
            orders: CrudController::with_transport(transport.clone()),
            bookings: TransactionSubmitter::with_transport(transport.clone()),
            cancellations: TransactionSubmitter::with_transport(transport.clone()),
            completions: TransactionSubmitter::with_transport(transport),
            handles: Vec::new(),
        }
    }

    /// Spawns an empty in-memory ledger serving every kind and connects to it.
    pub fn in_memory(channel_capacity: usize) -> Self {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("tx_{}", counter.fetch_add(1, Ordering::SeqCst));

        let (mut ledger, handle) = LedgerActor::new(channel_capacity, next_id);
        ledger
            .register_resource::<Hotel>()
            .register_resource::<Client>()
            .register_resource::<Room>()
            .register_resource::<Order>()
            .register_transaction::<Bookroom>()
            .register_transaction::<Cancelroom>()
            .register_transaction::<Durationcomplete>();
        let ledger_handle = tokio::spawn(ledger.run());

        let mut console = Self::with_transport(Arc::new(handle));
        console.handles.push(ledger_handle);
        console
    }

    /// Builds the console for the configured backend.
    pub fn connect(config: &ConsoleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        match &config.backend {
            BackendConfig::Rest { base_url } => {
                let transport = HttpTransport::new(parse_base_url(base_url)?);
                info!(%base_url, "Connecting to REST backend");
                Ok(Self::with_transport(Arc::new(transport)))
            }
            BackendConfig::InMemory => {
                info!(capacity = config.channel_capacity, "Starting in-memory ledger");
                Ok(Self::in_memory(config.channel_capacity))
            }
        }
    }

    /// Drops every controller, which closes the transport, and waits for owned backend
    /// tasks to finish.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every task stopped cleanly
    /// - `Err(String)` if a task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down console...");
        let Self {
            hotels,
            clients,
            rooms,
            orders,
            bookings,
            cancellations,
            completions,
            handles,
        } = self;

        // Dropping the last transport reference closes the ledger's channel.
        drop((hotels, clients, rooms, orders));
        drop((bookings, cancellations, completions));

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Backend task failed: {:?}", e);
                return Err(format!("Backend task failed: {:?}", e));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
