//! # Hotel Console Demo
//!
//! Walks one client record through its whole lifecycle, then books a room:
//! 1. Create a client from the form and load the collection.
//! 2. Hydrate the form from the backend, edit it and update the record.
//! 3. Delete the record and watch the next hydrate fail with a normalized message.
//! 4. Submit a `Bookroom` transaction.
//!
//! Set `HOTEL_CONSOLE_BACKEND=memory` to run without a REST server.

use hotel_console::lifecycle::{setup_tracing, ConsoleConfig, HotelConsole};
use hotel_console::model::{BookroomField, ClientField};
use serde_json::json;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ConsoleConfig::from_env().map_err(|e| e.to_string())?;
    info!(backend = ?config.backend, "Starting hotel console");
    let mut console = HotelConsole::connect(&config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("client_lifecycle");
    async {
        let clients = &mut console.clients;
        let form = clients.form_mut();
        form.set_value(ClientField::Id, "C1");
        form.set_value(ClientField::Firstname, "Jo");
        form.set_value(ClientField::Lastname, "Doe");
        form.set_value(ClientField::Balance, 0_i64);
        form.set_value(ClientField::PhoneNo, "555-0100");
        form.set_value(
            ClientField::Address,
            json!({ "country": "US", "city": "Springfield", "streetaddress": "1 Main St" }),
        );
        form.set_value(ClientField::Birthdetails, json!({ "Dob": "1990-01-01" }));

        let snapshot = clients.form().snapshot();
        if let Err(message) = clients.add(snapshot).await {
            error!(%message, "Could not create client");
            return;
        }
        match clients.load_all().await {
            Ok(size) => info!(size, "Clients loaded"),
            Err(message) => error!(%message, "Could not load clients"),
        }

        clients.select("C1");
        if let Err(message) = clients.hydrate_form("C1").await {
            error!(%message, "Could not load client");
            return;
        }
        clients.form_mut().set_value(ClientField::Firstname, "Jon");
        match clients.update_selected().await {
            Ok(()) => info!("Client renamed"),
            Err(message) => error!(%message, "Could not update client"),
        }

        match clients.remove_selected().await {
            Ok(()) => info!("Client deleted"),
            Err(message) => error!(%message, "Could not delete client"),
        }
        clients.clear_selection();
        clients.reset_form();
        if let Err(message) = clients.hydrate_form("C1").await {
            info!(%message, "Deleted client is gone");
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("booking");
    async {
        let form = console.bookings.form_mut();
        form.set_value(BookroomField::Id, "B1");
        form.set_value(BookroomField::Hotel, "Ritz");
        form.set_value(BookroomField::Client, "C2");
        form.set_value(BookroomField::From, "2024-05-01");
        form.set_value(BookroomField::To, "2024-05-03");
        form.set_value(BookroomField::NoOfDays, 2_i64);

        match console.bookings.submit_form().await {
            Ok(echo) => info!(%echo, "Room booked"),
            Err(message) => error!(%message, "Booking failed"),
        }
    }
    .instrument(span)
    .await;

    console.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
