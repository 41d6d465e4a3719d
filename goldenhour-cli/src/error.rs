//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use goldenhour::api::ApiError;
use goldenhour::service::ServiceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid command-line input
    InvalidInput(String),
    /// Dispatch service error
    Service(ServiceError),
    /// No active emergency session for a command that needs one
    NoActiveSession,
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Service(ServiceError::Api(ApiError::Http(_))) => {
                eprintln!();
                eprintln!("Could not reach the dispatch backend. Make sure:");
                eprintln!("  1. The backend is running");
                eprintln!("  2. GOLDENHOUR_BACKEND_URL points at it (default: http://localhost:8000)");
            }
            CliError::NoActiveSession => {
                eprintln!();
                eprintln!("Submit an emergency first: goldenhour submit --help");
                eprintln!("Or pass one explicitly: goldenhour watch --emergency-id <ID>");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Service(e) => write!(f, "{}", e),
            CliError::NoActiveSession => write!(f, "No active emergency session"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Service(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::Service(e)
    }
}
