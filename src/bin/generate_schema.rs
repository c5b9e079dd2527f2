//! Schema generator for the English coach API.
//!
//! This binary writes `api_schema.json` with the request and response body
//! schemas of every endpoint, for frontends that validate payloads before
//! calling API Gateway.

use english_coach::schema::endpoints;
use serde_json::Value;
use std::fs;

const OUTPUT_FILE: &str = "api_schema.json";

fn main() {
    let endpoints: Vec<Value> = endpoints().iter().map(|e| e.to_json()).collect();

    let json = serde_json::to_string_pretty(&endpoints).unwrap_or_else(|e| {
        eprintln!("Failed to serialize schema: {e}");
        std::process::exit(1);
    });

    fs::write(OUTPUT_FILE, json).unwrap_or_else(|e| {
        eprintln!("Failed to write {OUTPUT_FILE}: {e}");
        std::process::exit(1);
    });

    println!("✅ Generated {OUTPUT_FILE} with {} endpoint(s)", endpoints.len());
}
