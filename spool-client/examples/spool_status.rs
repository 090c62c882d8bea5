// spool-client/examples/spool_status.rs
// Print selected spools and the print gate of a running OctoPrint

use spool_client::{ClientConfig, connect};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::load();
    tracing::info!("Querying SpoolManager at {}", config.base_url);

    let adapter = connect(&config)?;

    for (slot, label) in adapter.material_labels().iter().enumerate() {
        match label {
            Some(label) => println!("tool {slot}: {label}"),
            None => println!("tool {slot}: (no spool)"),
        }
    }

    for (slot, spool) in adapter.spool_details().iter().enumerate() {
        if let Some(spool) = spool {
            println!("tool {slot}: {}", serde_json::to_string(spool)?);
        }
    }

    match adapter.check_print_allowed() {
        Ok(decision) => println!("allowed_to_print: {}", decision.as_value()),
        Err(e) => tracing::error!("Print gate failed: {}", e),
    }

    Ok(())
}
