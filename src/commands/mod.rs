pub mod config_cmd;
pub mod generate;
pub mod health;
pub mod interactive;

use crate::error::{AlertgenError, Result};
use crate::output;

pub const EXAMPLE_MESSAGES: &[&str] = &[
    "Alert me when there are more than 10 people in the garden",
    "If a car stays in the driveway for more than 5 minutes, send an alert",
    "Notify me if someone enters zone A and then moves to zone B",
];

/// Blank or whitespace-only input never reaches the service.
pub fn validate_message(message: &str) -> Result<&str> {
    if message.trim().is_empty() {
        Err(AlertgenError::EmptyInput)
    } else {
        Ok(message)
    }
}

pub fn print_examples() {
    output::print_heading("Try these example messages:");
    for example in EXAMPLE_MESSAGES {
        println!("  - {example}");
    }
}
