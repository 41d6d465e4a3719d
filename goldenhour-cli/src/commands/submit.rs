//! Submit command - post an emergency to the triage endpoint.

use clap::Args;

use goldenhour::api::{TriageRequest, Vitals};
use goldenhour::geo::Coordinate;
use goldenhour::session::Session;

use crate::error::CliError;

use super::watch::watch_session;

/// Arguments for the submit command.
#[derive(Args)]
pub struct SubmitArgs {
    /// Patient name
    #[arg(long)]
    pub name: String,

    /// Patient age in years
    #[arg(long)]
    pub age: u32,

    /// Patient gender
    #[arg(long)]
    pub gender: String,

    /// Contact phone number
    #[arg(long)]
    pub contact: String,

    /// Comma-separated symptom description
    #[arg(long)]
    pub symptoms: String,

    /// Blood pressure, e.g. 140/90
    #[arg(long)]
    pub blood_pressure: String,

    /// Heart rate in beats per minute
    #[arg(long)]
    pub heart_rate: u32,

    /// Blood oxygen saturation in percent
    #[arg(long)]
    pub oxygen_level: u32,

    /// Emergency latitude in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Emergency longitude in decimal degrees
    #[arg(long)]
    pub lng: f64,

    /// Submit only; do not fall into watch mode
    #[arg(long)]
    pub no_watch: bool,
}

/// Run the submit command.
pub async fn run(args: SubmitArgs) -> Result<(), CliError> {
    let location = Coordinate::from_parts(Some(args.lat), Some(args.lng))
        .filter(Coordinate::in_range)
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "location ({}, {}) is not a valid coordinate",
                args.lat, args.lng
            ))
        })?;

    let request = TriageRequest {
        patient_name: args.name,
        age: args.age,
        gender: args.gender,
        contact: args.contact,
        symptoms: args.symptoms,
        vitals: Vitals {
            blood_pressure: args.blood_pressure,
            heart_rate: args.heart_rate,
            oxygen_level: args.oxygen_level,
        },
        location,
    };

    let service = super::service()?;
    let response = service.submit(&request).await?;

    println!("Emergency submitted: {}", response.emergency_id);
    if let Some(severity) = &response.severity {
        println!("  Severity:  {}", severity);
    }
    if let Some(specialty) = &response.recommended_specialty {
        println!("  Specialty: {}", specialty);
    }
    if let Some(minutes) = response.estimated_response_time {
        println!("  Est. response: {} min", minutes);
    }

    if args.no_watch {
        return Ok(());
    }

    watch_session(&service, Session::new(response.emergency_id)).await
}
