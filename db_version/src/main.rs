//! Tiny connectivity probe: prints the Postgres server version for the
//! scheduling database. Handy when the calendar comes up empty and the
//! first question is whether the service can reach the database at all.

use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::Config;

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::new();
    config.host(&env_or("DB_HOST", "localhost"));
    config.port(env_or("DB_PORT", "5432").parse()?);
    config.dbname(&env_or("DB_NAME", "workshop"));
    config.user(&env_or("DB_USER", "workshop"));
    config.password(&env_or("DB_PASSWORD", "workshop"));
    config.ssl_mode(tokio_postgres::config::SslMode::Prefer);

    // Managed hosts often present certs the local trust store rejects.
    let tls_connector = TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .build()?;
    let connector = MakeTlsConnector::new(tls_connector);

    let (client, connection) = config.connect(connector).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("connection error: {}", e);
        }
    });

    let row = client.query_one("SELECT version()", &[]).await?;
    let version: String = row.get(0);
    println!("{}", version);

    Ok(())
}
