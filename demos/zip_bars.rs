//! Example stepping nine bars of different lengths in lockstep.
//!
//! Run with `RUST_LOG=loading_bars=debug` to see the group's log events on stderr.

use color_eyre::Result;
use indicatif::HumanDuration;
use loading_bars::BarGroup;
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let started = Instant::now();
    let group = BarGroup::builder()
        .on_complete(|bar| tracing::info!(name = %bar.name, "Bar completed"))
        .build()?;

    let mut bars = Vec::new();
    for i in 1..=9 {
        bars.push(group.add_bar(format!("task {i}"), i * 100)?);
    }

    let members: Vec<_> = bars.iter().collect();
    for (tick, positions) in group.group(&members)?.enumerate() {
        positions?;
        if tick % 100 == 0 {
            group.log(format!("tick {tick}"))?;
        }
        thread::sleep(Duration::from_millis(5));
    }

    let elapsed = HumanDuration(started.elapsed()).to_string();
    group.log_parts(["finished in", elapsed.as_str()], " ")?;
    group.finish()?;
    Ok(())
}
