//! Utility binary for verifying the Gemini credential and connectivity
//! This is a utility binary, not part of the main application

use gemini_playground::config::{Config, API_KEY_VAR};
use gemini_playground::gemini::GeminiClient;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Checking Gemini API access...\n");

    // Test 1: Credential
    println!("1. Checking for {} ...", API_KEY_VAR);
    let config = match Config::load() {
        Ok(config) => {
            println!(
                "   ✓ {} is set (length: {} chars)",
                API_KEY_VAR,
                config.gemini.api_key.len()
            );
            config
        }
        Err(e) => {
            eprintln!("   ✗ {}", e);
            eprintln!("   Export it: export {}=\"your-key\"", API_KEY_VAR);
            eprintln!("   Or add it to a .env file in the working directory");
            return Err(e.into());
        }
    };

    // Test 2: Client
    println!("\n2. Building client...");
    let client = GeminiClient::new(&config.gemini)?;
    println!("   ✓ Model: {}", client.model());
    println!("   ✓ Embedding model: {}", client.embedding_model());
    println!("   ✓ Base URL: {}", config.gemini.base_url);

    // Test 3: Text completion
    let prompt = env::args()
        .nth(1)
        .unwrap_or_else(|| "What is 2+2? Answer in one sentence.".to_string());
    println!("\n3. Executing test query...");
    println!("   Query: '{}'", prompt);
    match client.generate_text(&prompt).await {
        Ok(response) => {
            println!("   ✓ Response received:");
            println!("   {}", response.trim());
        }
        Err(e) => {
            eprintln!("   ✗ Query failed: {}", e);
            eprintln!("\n   Troubleshooting:");
            eprintln!("   - Check the key is valid for the Generative Language API");
            eprintln!("   - Check GEMINI_MODEL names a model available to the key");
            return Err(e.into());
        }
    }

    // Test 4: Embedding
    println!("\n4. Requesting an embedding...");
    match client.embed_text(&prompt).await {
        Ok(values) => println!("   ✓ Embedding with {} dimensions", values.len()),
        Err(e) => {
            eprintln!("   ✗ Embedding failed: {}", e);
            return Err(e.into());
        }
    }

    println!("\n✓ All checks completed!");
    Ok(())
}
