use std::io;

use messente::{ClientConfig, MessenteClient, SendSms};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::from_env()?;
    let to = std::env::var("MESSENTE_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MESSENTE_TO environment variable is required",
        )
    })?;
    let text = std::env::var("MESSENTE_TEXT")
        .unwrap_or_else(|_| "Hello from the messente demo.".to_owned());

    let mut request = SendSms::new(text, to);
    if let Ok(from) = std::env::var("MESSENTE_FROM") {
        request = request.from(from);
    }

    let client = MessenteClient::from_config(config)?;
    let id = client.send(request).await?;
    println!("message id: {id}");

    Ok(())
}
