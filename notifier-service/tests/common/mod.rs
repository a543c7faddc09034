use notifier_service::config::NotifierConfig;
use notifier_service::services::{init_metrics, ResponseEncoding};
use notifier_service::startup::Application;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(ResponseEncoding::Json).await
    }

    pub async fn spawn_with(encoding: ResponseEncoding) -> Self {
        init_metrics().expect("Failed to initialize metrics");

        // Use random port for testing (port 0)
        let mut config = NotifierConfig::default();
        config.common.port = 0;
        config.response.encoding = encoding;

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}

pub fn is_lower_hex(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
