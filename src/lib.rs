pub mod charts;
pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod relay;
pub mod server;

use cli::Args;
use config::prompt::load_system_instruction;
use llm::chat::new_client as new_chat_client;
use log::{ info, warn };
use relay::CompletionRelay;
use server::api::AppState;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat Base URL: {}", args.chat_base_url);
    info!("Chat Model: {}", args.chat_model);
    info!("Temperature: {}", args.chat_temperature);
    info!("Max Tokens: {}", args.chat_max_tokens);
    info!("System Prompt: {}", args.system_prompt_path.as_deref().unwrap_or("built-in"));
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let llm_config = args.llm_config();
    if llm_config.api_key.is_none() {
        warn!("GROQ_API_KEY is not set; every chat request will receive the fallback response");
    }

    let system_instruction = load_system_instruction(args.system_prompt_path.as_deref())?;
    let client = new_chat_client(&llm_config)?;
    let relay = CompletionRelay::new(client, system_instruction);

    let server = Server::new(args.server_addr.clone(), AppState::new(relay), args);
    server.run().await?;

    Ok(())
}
