use crate::sql::base::error::ConnectorError;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{
    Client, Config, NoTls, Socket,
    config::SslMode,
    tls::{MakeTlsConnect, TlsConnect},
};
use tracing::{error, warn};

/// Startup option pinning the session time zone.
///
/// `timestamp` columns are decoded as UTC wall-clock values and keyset
/// parameters are bound as `timestamptz`; both only agree when the session
/// converts between them in UTC.
pub(crate) const SESSION_TIME_ZONE: &str = "-c TimeZone=UTC";

/// Parses `url` and appends the session options every connection needs,
/// keeping any `options` the URL already carries.
pub(crate) fn session_config(url: &str) -> Result<Config, ConnectorError> {
    let mut config = url
        .parse::<Config>()
        .map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;

    let options = match config.get_options() {
        Some(existing) if !existing.trim().is_empty() => {
            format!("{} {SESSION_TIME_ZONE}", existing.trim())
        }
        _ => SESSION_TIME_ZONE.to_string(),
    };
    config.options(&options);
    Ok(config)
}

pub(crate) async fn connect_client(url: &str) -> Result<Client, ConnectorError> {
    let config = session_config(url)?;

    match config.get_ssl_mode() {
        SslMode::Disable => connect(&config, NoTls).await,
        SslMode::Prefer => match connect(&config, native_tls()?).await {
            Ok(client) => Ok(client),
            Err(error) => {
                warn!(%error, "Postgres TLS handshake failed, retrying without TLS");
                connect(&config, NoTls).await
            }
        },
        _ => connect(&config, native_tls()?).await,
    }
}

fn native_tls() -> Result<MakeTlsConnector, ConnectorError> {
    Ok(MakeTlsConnector::new(TlsConnector::builder().build()?))
}

/// Opens a session and drives its connection on a background task.
async fn connect<T>(config: &Config, tls: T) -> Result<Client, ConnectorError>
where
    T: MakeTlsConnect<Socket>,
    T::Stream: Send + 'static,
    T::TlsConnect: Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    let (client, connection) = config.connect(tls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection closed with an error");
        }
    });
    Ok(client)
}
