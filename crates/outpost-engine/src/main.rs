//! Engine binary for the Outpost colony simulation.
//!
//! Wires the simulation core to the external decision server and drives
//! the fixed-rate tick loop. Responses are dispatched in completion
//! order, which may differ from request-issue order; the clock's
//! reference-counted pause keeps simulated time consistent regardless.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Build the starting colony and overlay `outpost-config.json`
//! 3. Probe the decision server's health endpoint
//! 4. Queue an opening decision for every colonist
//! 5. Run the tick loop until interrupted

mod client;
mod error;
mod world;

use std::time::Duration;

use futures::StreamExt as _;
use futures::stream::FuturesUnordered;
use outpost_core::{Simulation, instruction_request, world_state};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::client::DecisionClient;

/// Real-time length of one engine tick.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Simulated minutes between fire-and-forget state pushes.
const STATE_PUSH_MINUTES: u64 = 5;

/// Decision server base URL when `OUTPOST_SERVER_URL` is unset.
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("outpost-engine starting");

    let server_url =
        std::env::var("OUTPOST_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_owned());
    let client = DecisionClient::new(server_url.clone())?;
    info!(server = %server_url, "decision client created");

    let mut sim = world::build_colony()?;
    world::apply_initial_state(&mut sim);

    if client.health().await {
        info!("decision server is healthy");
    } else {
        warn!("decision server health probe failed, continuing anyway");
    }

    // Every colonist opens with a decision request.
    let names: Vec<String> = sim.characters().names().map(ToOwned::to_owned).collect();
    for name in names {
        sim.queue_decision(&name);
    }

    run_loop(&mut sim, &client).await;

    info!(
        game_time = %sim.clock().game_time(),
        "outpost-engine shutdown complete"
    );
    Ok(())
}

/// The tick loop. Runs until Ctrl-C.
async fn run_loop(sim: &mut Simulation, client: &DecisionClient) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    // Outstanding decision exchanges, yielded in completion order.
    let mut inflight = FuturesUnordered::new();
    let mut last_push_minute = 0_u64;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                sim.advance_tick();

                // Movement interpolation is out of scope for the core;
                // pathfinding resolves within the same tick it was asked.
                for request in sim.take_move_requests() {
                    sim.complete_move(&request.character, true);
                }

                for name in sim.take_decision_requests() {
                    let payload = instruction_request(sim, &name);
                    let client = client.clone();
                    inflight.push(async move {
                        let result = client.get_instruction(&payload).await;
                        (name, result)
                    });
                }

                let minute = sim.clock().total_minutes();
                if minute >= last_push_minute.saturating_add(STATE_PUSH_MINUTES) {
                    last_push_minute = minute;
                    let payload = world_state(sim);
                    let client = client.clone();
                    tokio::spawn(async move {
                        client.push_game_state(&payload).await;
                    });
                }
            }
            Some((name, result)) = inflight.next() => {
                match result {
                    Ok(command) => {
                        // A response naming the wrong character is handled
                        // inside apply_decision: nothing runs and the
                        // requester is re-queued.
                        sim.apply_decision(&name, &command);
                    }
                    Err(err) => {
                        warn!(character = %name, %err, "decision request failed, retrying");
                        sim.abort_decision(&name);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, stopping tick loop");
                break;
            }
        }
    }
}
