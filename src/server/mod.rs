pub mod api;

use crate::cli::Args;
use self::api::{ create_router, AppState };
use log::info;
use std::error::Error;
use std::net::SocketAddr;

pub struct Server {
    addr: String,
    state: AppState,
    args: Args,
}

impl Server {
    pub fn new(addr: String, state: AppState, args: Args) -> Self {
        Self { addr, state, args }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        let app = create_router(self.state.clone());

        match (self.args.enable_tls, &self.args.tls_cert_path, &self.args.tls_key_path) {
            (true, Some(cert_path), Some(key_path)) => {
                info!(
                    "TLS enabled. Loading certificate from '{}' and key from '{}'",
                    cert_path,
                    key_path
                );
                let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                    cert_path,
                    key_path
                ).await?;

                info!("Starting HTTPS server on: https://{}", addr);
                axum_server::bind_rustls(addr, tls_config).serve(app.into_make_service()).await?;
            }
            (true, _, _) => {
                return Err("TLS enabled without both --tls-cert-path and --tls-key-path".into());
            }
            (false, _, _) => {
                let listener = tokio::net::TcpListener
                    ::bind(addr).await
                    .map_err(|e| format!("Failed to bind HTTP server to {}: {}", addr, e))?;
                info!("Starting HTTP server on: http://{}", addr);
                axum::serve(listener, app.into_make_service()).await?;
            }
        }

        Ok(())
    }
}
