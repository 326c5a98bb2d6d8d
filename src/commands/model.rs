//! # Model Commands
//!
//! Show the active model and switch between providers.

use anyhow::Result;

use crate::api::chat::SwitchModelRequest;
use crate::commands::{api_error_exit, connect, guard_route, print_json};
use crate::errors::display_success;
use crate::exit_codes::*;
use crate::router;

/// Execute `model info`
pub async fn info(json: bool) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::RAG_QA_PATH) {
        return Ok(code);
    }

    let info = match client.model_info().await {
        Ok(info) => info,
        Err(e) => return Ok(api_error_exit(&e)),
    };

    if json {
        return print_json(&info);
    }

    println!("Provider:    {}", info.provider.as_deref().unwrap_or("unknown"));
    println!("Model:       {}", info.model.as_deref().unwrap_or("unknown"));
    if let Some(temperature) = info.temperature {
        println!("Temperature: {}", temperature);
    }
    if !info.available_providers.is_empty() {
        println!("Available:   {}", info.available_providers.join(", "));
    }

    Ok(EXIT_SUCCESS)
}

/// Execute `model switch`
///
/// # Arguments
///
/// * `provider` - Provider to activate (e.g., "deepseek", "qwen")
/// * `temperature` - Sampling temperature (0.0-2.0); unset keeps the
///   server's current value
pub async fn switch(provider: String, temperature: Option<f64>) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::RAG_QA_PATH) {
        return Ok(code);
    }

    let request = SwitchModelRequest {
        provider,
        temperature,
    };

    match client.switch_model(&request).await {
        Ok(response) => {
            match response.message {
                Some(message) => display_success(&message),
                None => display_success(&format!(
                    "Switched provider to {}",
                    response.provider.as_deref().unwrap_or(&request.provider)
                )),
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}
