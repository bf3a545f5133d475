use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

const USER_AGENT: &str = concat!("perugo/", env!("CARGO_PKG_VERSION"));

/// Process-wide HTTP client shared by every upstream provider
///
/// Speech and synthesis calls can take tens of seconds, so the request
/// timeout is generous while idle connections are recycled quickly.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized on first use
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(90))
                .connect_timeout(Duration::from_secs(10))
                .pool_idle_timeout(Some(Duration::from_secs(5)))
                .tcp_nodelay(true)
                .build()
                .expect("Failed to build upstream HTTP client")
        })
        .clone()
}
