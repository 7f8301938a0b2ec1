//! Three lakes, three species, stdout commentary.
//!
//! Run with:
//! ```text
//! cargo run --example lakes --features logging
//! ```
//! Stop with Ctrl-C; in-flight animals finish their visit before exit.

use std::sync::Arc;

use waterhole::{LogWriter, Observe, SimConfig, Simulation};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = SimConfig::default();
    println!(
        "waterhole: {} lakes {:?}, Ctrl-C to stop",
        cfg.lakes.len(),
        cfg.lakes
    );

    let observers: Vec<Arc<dyn Observe>> = vec![Arc::new(LogWriter)];
    let sim = Simulation::new(cfg, observers)?;
    sim.run().await?;

    println!("waterhole: drained, goodbye");
    Ok(())
}
