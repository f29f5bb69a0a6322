//! Foreground run with console reporting.
//!
//! Supervises a shell loop that ticks once a second, lets it run for a few
//! seconds, then stops it through a stop command that removes the loop's
//! flag file.
//!
//! Run with: `cargo run --example console_run`

use std::sync::Arc;
use std::time::Duration;

use servisor::{Config, ConsoleReporter, ServiceDescriptor, Supervisor};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let flag = std::env::temp_dir().join("servisor-console-demo.flag");
    std::fs::write(&flag, b"")?;
    let flag = flag.to_string_lossy().into_owned();

    let descriptor = ServiceDescriptor {
        name: "ticker".into(),
        executable: "sh".into(),
        start_arguments: vec![
            "-c".into(),
            format!("while [ -e '{flag}' ]; do echo tick; sleep 1; done"),
        ],
        stop_executable: "rm".into(),
        stop_arguments: vec!["-f".into(), flag],
        ..ServiceDescriptor::default()
    };

    let reporter = Arc::new(ConsoleReporter::new("ticker"));
    let sup = Supervisor::new(descriptor, Config::default(), reporter);

    sup.start().await?;
    tokio::time::sleep(Duration::from_secs(5)).await;
    sup.stop().await?;
    Ok(())
}
