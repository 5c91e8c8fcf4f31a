//! Lists public sensors around the stored location.
//!
//! Reads credentials from the configuration file (default location, or the
//! path given as the first argument), logs in, and prints every device with
//! its current readings.
//!
//! Run with: `RUST_LOG=narodmon=debug cargo run --example public_sensors -- config.ini`

use std::path::PathBuf;

use narodmon::model::DeviceList;
use narodmon::ConfigFile;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ConfigFile::load_from(&PathBuf::from(path))?,
        None => ConfigFile::load()?,
    };
    let client = config.build_client()?;

    tracing::info!(fingerprint = client.identity().fingerprint(), "Client ready");

    let login = std::env::var("NARODMON_LOGIN").ok();
    let password = std::env::var("NARODMON_PASSWORD").ok();
    if let (Some(login), Some(password)) = (login, password) {
        println!("{}", client.login(&login, &password)?);
    }

    println!("{}", client.sensor_init()?);

    let response = client.public_sensors(&[1, 2, 3], Some(50), None, None)?;
    for device in DeviceList::from_value(&response)?.devices {
        println!("{}\t{}", device.id, device.name);
        for sensor in device.sensors {
            println!(
                "\t{}\t{}\t{} {}",
                sensor.id, sensor.name, sensor.value, sensor.unit
            );
        }
        println!();
    }

    println!("{}", client.logout()?);
    Ok(())
}
