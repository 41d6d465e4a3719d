//! Watch command - follow an emergency's dispatch progress.

use clap::Args;

use goldenhour::api::{DispatchApi, HospitalSummary};
use goldenhour::service::DispatchService;
use goldenhour::session::Session;
use goldenhour::status::StatusEvent;

use crate::error::CliError;

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Emergency id to watch (defaults to the stored session)
    #[arg(long)]
    pub emergency_id: Option<String>,
}

/// Run the watch command.
pub async fn run(args: WatchArgs) -> Result<(), CliError> {
    let service = super::service()?;

    let session = match args.emergency_id {
        Some(id) => Session::new(id),
        None => service.resume()?.ok_or(CliError::NoActiveSession)?,
    };

    watch_session(&service, session).await
}

/// Follow an emergency until assignment completes or Ctrl-C.
pub async fn watch_session<C: DispatchApi + 'static>(
    service: &DispatchService<C>,
    session: Session,
) -> Result<(), CliError> {
    println!(
        "Watching emergency {} (Ctrl-C to stop)",
        session.emergency_id
    );

    let mut handle = service.watch(session);

    // Watch receivers are cheap clones; keeping locals avoids borrowing the
    // handle mutably in more than one select arm.
    let mut ambulance = handle.ambulance.clone();
    let mut hospitals = handle.hospitals.clone();

    loop {
        tokio::select! {
            event = handle.events.recv() => match event {
                Some(StatusEvent::Update(status)) => {
                    println!("Status: {:?}", status.status);
                }
                Some(StatusEvent::Failed(e)) => {
                    eprintln!("Status check failed: {}", e);
                }
                Some(StatusEvent::Assigned(status)) => {
                    match &status.hospital {
                        Some(hospital) => print_assigned(hospital),
                        None => println!(
                            "Hospital assigned: {}",
                            status.assigned_hospital.as_deref().unwrap_or("(unknown)")
                        ),
                    }
                    break;
                }
                None => break,
            },
            changed = ambulance.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(fix) = ambulance.borrow_and_update().as_ref() {
                    println!("Ambulance at {:.4}, {:.4}", fix.lat, fix.lng);
                }
            }
            changed = hospitals.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(list) = hospitals.borrow_and_update().as_ref() {
                    print_hospitals(list);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("Stopping watch");
                break;
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

fn print_assigned(hospital: &HospitalSummary) {
    println!("Hospital assigned: {}", hospital.name);
    if let Some(address) = &hospital.address {
        println!("  Address:  {}", address);
    }
    if let Some(distance) = hospital.distance {
        println!("  Distance: {} km", distance);
    }
    if let Some(eta) = hospital.eta {
        println!("  ETA:      {} min", eta);
    }
}

fn print_hospitals(hospitals: &[HospitalSummary]) {
    println!("Nearby hospitals ({}):", hospitals.len());
    for hospital in hospitals {
        let distance = hospital
            .distance
            .map(|d| format!("{} km", d))
            .unwrap_or_else(|| "-".to_string());
        let marker = if hospital.is_recommended { " *" } else { "" };
        println!("  {:<28} {}{}", hospital.name, distance, marker);
    }
}
