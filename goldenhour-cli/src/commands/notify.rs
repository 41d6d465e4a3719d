//! Notify command - tell a hospital about the active emergency.

use clap::Args;

use goldenhour::session::Session;

use crate::error::CliError;

/// Arguments for the notify command.
#[derive(Args)]
pub struct NotifyArgs {
    /// Hospital to notify
    #[arg(long)]
    pub hospital_id: String,

    /// Emergency id (defaults to the stored session)
    #[arg(long)]
    pub emergency_id: Option<String>,
}

/// Run the notify command.
pub async fn run(args: NotifyArgs) -> Result<(), CliError> {
    let service = super::service()?;

    let session = match args.emergency_id {
        Some(id) => Session::new(id),
        None => service.resume()?.ok_or(CliError::NoActiveSession)?,
    };

    let receipt = service.notify(&session, &args.hospital_id).await?;

    if receipt.success {
        println!(
            "Hospital {} notified about emergency {}",
            args.hospital_id, session.emergency_id
        );
        if let Some(confirmation) = receipt.confirmation_id {
            println!("  Confirmation: {}", confirmation);
        }
    } else {
        println!(
            "Backend did not confirm the notification{}",
            receipt
                .message
                .map(|m| format!(": {}", m))
                .unwrap_or_default()
        );
    }

    Ok(())
}
