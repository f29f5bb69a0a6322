//! Crash-loop demonstration.
//!
//! The managed process exits immediately with code 1, so the supervisor
//! burns through its restart budget and `start()` fails with the last exit
//! code. Timings are shortened so the demo finishes quickly.
//!
//! Run with: `cargo run --example flaky_child`

use std::sync::Arc;
use std::time::Duration;

use servisor::{Config, ConsoleReporter, ServiceDescriptor, Supervisor};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let descriptor = ServiceDescriptor {
        name: "flaky".into(),
        executable: "sh".into(),
        start_arguments: vec!["-c".into(), "echo boom; exit 1".into()],
        ..ServiceDescriptor::default()
    };

    let cfg = Config {
        retry_delay: Duration::from_millis(500),
        healthy_threshold: Duration::from_millis(250),
        ..Config::default()
    };

    let reporter = Arc::new(ConsoleReporter::new("flaky"));
    let sup = Supervisor::new(descriptor, cfg, reporter);

    match sup.start().await {
        Ok(()) => println!("unexpectedly started"),
        Err(err) => println!("start failed as expected: {err}"),
    }
}
