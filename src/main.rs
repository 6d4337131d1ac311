//! Souls Runner headless driver
//!
//! Plays one run with a simple autopilot and prints the result as JSON.
//!
//! Usage: `souls-runner [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::process::ExitCode;

    use souls_runner::sim::{RunState, TickInput, tick};
    use souls_runner::{SoulBank, Tuning, UpgradeTable};

    /// Five minutes at 60 ticks per second
    const MAX_TICKS: u64 = 60 * 60 * 5;
    const DEFAULT_SEED: u64 = 0x5EED;

    /// How far past the player's leading edge to look for ground
    const LOOKAHEAD: f32 = 24.0;
    const SWING_REACH: f32 = 70.0;
    const ARROW_ALERT: f32 = 120.0;

    /// Idle/demo mode: run right, hop gaps, swing at skeletons, block arrows
    fn autopilot(state: &RunState) -> TickInput {
        let player = &state.player;
        let me = player.rect();
        let center = me.center();

        let probe_x = me.right() + LOOKAHEAD;
        let ground_ahead = state.platforms.iter().any(|p| {
            p.left() <= probe_x && probe_x <= p.right() && (p.top() - me.bottom()).abs() < 1.0
        });

        let enemy_close = state.enemies.iter().any(|e| {
            let c = e.rect().center();
            (c.x - center.x).abs() < SWING_REACH && (c.y - center.y).abs() < me.height
        });

        let arrow_incoming = state.arrows.iter().any(|a| {
            let r = a.rect();
            let dx = r.center().x - center.x;
            let closing = dx.signum() != a.body.vel.x.signum();
            closing && dx.abs() < ARROW_ALERT && r.bottom() > me.top() && r.top() < me.bottom()
        });

        TickInput {
            horizontal: if arrow_incoming { 0 } else { 1 },
            jump: player.on_ground && !ground_ahead,
            attack: enemy_close,
            start_block: arrow_incoming,
            stop_block: !arrow_incoming,
        }
    }

    fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Tuning::from_json(&json)?)
    }

    pub fn run() -> ExitCode {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(arg) => match arg.parse::<u64>() {
                Ok(seed) => seed,
                Err(e) => {
                    log::error!("Invalid seed {:?}: {}", arg, e);
                    return ExitCode::FAILURE;
                }
            },
            None => DEFAULT_SEED,
        };
        let tuning = match args.next() {
            Some(path) => match load_tuning(&path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Failed to load tuning from {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            },
            None => Tuning::default(),
        };

        let table = UpgradeTable::default();
        let mut bank = SoulBank::new();
        let mut state = RunState::with_tuning(seed, bank.stats(&table), tuning);

        let mut outcome = None;
        while outcome.is_none() && state.time_ticks < MAX_TICKS {
            let input = autopilot(&state);
            outcome = tick(&mut state, &input);
        }

        let finished = outcome.is_some();
        let outcome = outcome.unwrap_or_else(|| state.outcome());
        bank.deposit(outcome.score);

        let report = serde_json::json!({
            "seed": seed,
            "finished": finished,
            "outcome": outcome,
            "health_left": state.player.health,
            "bank": &bank,
            "next_costs": souls_runner::UpgradeKind::ALL
                .iter()
                .map(|&kind| (kind.label(), bank.next_cost(kind, &table)))
                .collect::<std::collections::BTreeMap<_, _>>(),
        });
        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to serialize report: {}", e);
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless driver is native only
}
