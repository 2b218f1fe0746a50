//! Slime Grove headless runner
//!
//! Drives the simulation with a scripted walk-and-attack routine and logs what
//! happened. The browser build wires the same `tick` to requestAnimationFrame
//! and real keyboard events.
//!
//! Usage: `slime-grove [tuning.json] [collision_map.json]`

use slime_grove::renderer;
use slime_grove::sim::{
    CollisionMap, Direction, GameEvent, GamePhase, GameState, Key, MapError, TickInput, tick,
};
use slime_grove::{GameError, Tuning};

/// Frames to simulate (one minute at 60 Hz)
const FRAMES: u32 = 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Slime Grove (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let map = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded collision map from {}", path);
            CollisionMap::from_json(&json)?
        }
        None => demo_map()?,
    };

    let mut state = GameState::new(tuning, &map);
    log::info!("Game initialized with seed: {}", state.tuning.seed);

    let mut input = TickInput::new();
    for frame in 0..FRAMES {
        script(frame, &mut input);
        tick(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::EnemyDefeated { enemy_id, .. } => {
                    log::info!("Frame {}: slime {} defeated", frame, enemy_id)
                }
                GameEvent::VanishCompleted { .. } => {
                    log::info!("Frame {}: score {}", frame, state.score())
                }
                GameEvent::EnemySpawned { .. } => {}
            }
        }

        if state.phase == GamePhase::Halted {
            log::error!("Loop halted at frame {}", frame);
            break;
        }
    }

    let draw_calls = renderer::frame(&state).len();
    log::info!(
        "Finished {} ticks: score {}, {} slimes alive, {} draw commands in last frame",
        state.time_ticks,
        state.score(),
        state.enemies.len(),
        draw_calls
    );
    Ok(())
}

/// Walled arena with a few pillars, in map cells
fn demo_map() -> Result<CollisionMap, MapError> {
    const COLUMNS: usize = 70;
    const ROWS: usize = 40;
    const WALL: u32 = slime_grove::consts::SOLID_CELL;

    let mut rows = vec![vec![0u32; COLUMNS]; ROWS];
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let border = i == 0 || j == 0 || i == ROWS - 1 || j == COLUMNS - 1;
            let pillar = i % 9 == 4 && j % 11 == 5;
            if border || pillar {
                *cell = WALL;
            }
        }
    }
    CollisionMap::from_rows(rows)
}

/// Scripted input: wander around the spawn area, swinging now and then
fn script(frame: u32, input: &mut TickInput) {
    const STEPS: [Direction; 4] = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];
    const LEG: u32 = 180;

    let leg = frame / LEG;
    let dir = STEPS[(leg as usize) % STEPS.len()];
    let within = frame % LEG;

    if within == 0 {
        for d in Direction::ALL {
            input.release(Key::Dir(d));
        }
        input.press(Key::Dir(dir));
    }

    // Last third of every leg: stop and attack
    if within == LEG * 2 / 3 {
        input.press(Key::Action);
    }
    if within == LEG - 1 {
        input.release(Key::Action);
    }
}
