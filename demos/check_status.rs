use std::io;

use messente::{ClientConfig, MessenteClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::from_env()?;
    let message_id = std::env::var("MESSENTE_MESSAGE_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MESSENTE_MESSAGE_ID environment variable is required",
        )
    })?;

    let client = MessenteClient::from_config(config)?;
    match client.get_status_of(message_id).await {
        Ok(status) => println!("status: {status} ({:?})", status.known()),
        Err(err) if err.is_retryable() => println!("not ready yet: {err}"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
