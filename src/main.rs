use portfolio_api::configuration::get_configuration;
use portfolio_api::create_app;
use portfolio_api::errors::Error;
use portfolio_api::telemetry::init_subscriber;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::str::FromStr;
use tokio::net::TcpListener;
use tracing::info;

fn bind_address(host: &str, port: u16) -> Result<SocketAddr, Error> {
    let host = IpAddr::from_str(host)?;
    Ok(SocketAddr::from((host, port)))
}

#[tokio::main]
async fn main() {
    let configuration = get_configuration().expect("Failed to read configuration");
    init_subscriber(&configuration.application.log_level);
    let addr = bind_address(
        &configuration.application.host,
        configuration.application.port,
    )
    .expect("Failed to create socket address");
    let (app, _) = create_app(&configuration).expect("Failed to start server");
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    info!(%addr, "listening");
    axum::serve(listener, app).await.unwrap();
}
