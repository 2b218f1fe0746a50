//! Per-frame simulation tick
//!
//! Two cadences share one tick. Collision gating, combat and scrolling run on
//! every call so controls stay responsive. Animation frames and slime AI only
//! advance once the refresh counter passes its threshold, which keeps the
//! sprites readable regardless of how fast the host calls in.

use super::enemy::resolve_contacts;
use super::input::{Direction, TickInput};
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game by one host frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::Halted {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    // Entities alive now are the ones that scroll this frame
    let frontier = state.peek_next_id();

    if state.refresh_counter > state.tuning.refresh_threshold {
        state.refresh_counter = 0;
        update_entities(state, input);
    } else {
        state.refresh_counter += 1;
    }

    if state.enemies.len() < state.tuning.enemy_population {
        let id = state.spawn_enemy();
        state.events.push(GameEvent::EnemySpawned { id });
    }

    state.player.face(input);
    let lookahead = state.tuning.lookahead;
    if state
        .player
        .check_collision(input, &state.obstacles, &state.enemies, lookahead)
    {
        log::trace!("Step blocked facing {:?}", state.player.facing);
    }

    let defeated = resolve_contacts(&mut state.player, &mut state.enemies, input, &state.tuning);
    for idx in defeated {
        let enemy_id = state.enemies[idx].id;
        let effect_id = state.spawn_vanish(idx);
        state.events.push(GameEvent::EnemyDefeated { enemy_id, effect_id });
    }
    state.player.check_attack_mode(input);

    state.compact();

    if state.player.moving {
        let speed = state.tuning.game_speed;
        for dir in Direction::ALL {
            if input.steering(dir) {
                // Camera follows the player: the world slides the other way
                state.translate_world(-dir.unit() * speed, frontier);
            }
        }
    }

    if let Err(fault) = state.verify() {
        state.halt(&fault);
    }
}

/// Throttled animation and AI step for every entity
fn update_entities(state: &mut GameState, input: &TickInput) {
    state.player.update(input);

    let speed = state.tuning.game_speed;
    for enemy in &mut state.enemies {
        enemy.update(speed);
    }

    let mut completed = Vec::new();
    for effect in &mut state.vanishing {
        if effect.update() {
            completed.push(effect.id);
        }
    }
    for id in completed {
        state.add_score(1);
        state.events.push(GameEvent::VanishCompleted { id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::aabb::Aabb;
    use crate::sim::enemy::{Enemy, WanderState};
    use crate::sim::input::Key;
    use crate::sim::obstacles::{CollisionMap, Obstacle};
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Open map; slimes come only from `add_slime`, replacements spawn far away
    fn quiet_state() -> GameState {
        let tuning = Tuning {
            enemy_population: 0,
            spawn_offset: 100_000.0,
            ..Default::default()
        };
        let map = CollisionMap::from_rows(vec![vec![0; 8]; 8]).unwrap();
        GameState::new(tuning, &map)
    }

    /// Place a slime with its center at `center` and raise the cap to match
    fn add_slime(state: &mut GameState, center: Vec2) -> u32 {
        state.tuning.enemy_population += 1;
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, center - Vec2::splat(SLIME_SIZE / 2.0), 15.0));
        id
    }

    /// Ticks until the next throttled update has fired
    fn run_one_update(state: &mut GameState, input: &TickInput) {
        let ticks = state.tuning.refresh_threshold + 2 - state.refresh_counter;
        for _ in 0..ticks {
            tick(state, input);
        }
    }

    #[test]
    fn test_throttle_fires_on_ninth_call() {
        let mut state = quiet_state();
        let input = TickInput::new();
        for _ in 0..8 {
            tick(&mut state, &input);
            assert_eq!(state.player.frame_x, 0);
        }
        assert_eq!(state.refresh_counter, 8);
        tick(&mut state, &input);
        assert_eq!(state.player.frame_x, 1);
        assert_eq!(state.refresh_counter, 0);
    }

    #[test]
    fn test_population_capped() {
        let map = CollisionMap::from_rows(vec![vec![0; 4]; 4]).unwrap();
        let mut state = GameState::new(Tuning::default(), &map);
        let input = TickInput::new();
        for i in 0..200 {
            tick(&mut state, &input);
            assert!(state.enemies.len() <= ENEMY_POPULATION);
            if i >= 4 {
                assert_eq!(state.enemies.len(), ENEMY_POPULATION);
            }
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_spawn_one_per_tick() {
        let map = CollisionMap::from_rows(vec![vec![0; 4]; 4]).unwrap();
        let mut state = GameState::new(Tuning::default(), &map);
        tick(&mut state, &TickInput::new());
        assert_eq!(state.enemies.len(), 1);
        assert!(matches!(state.events[0], GameEvent::EnemySpawned { .. }));
    }

    #[test]
    fn test_holding_left_scrolls_world_right() {
        let mut state = quiet_state();
        state.obstacles.push(Obstacle {
            bounds: Aabb::new(0.0, 0.0, CELL_SIZE, CELL_SIZE),
        });
        add_slime(&mut state, Vec2::new(100.0, 100.0));
        let bg = state.background.pos;
        let fg = state.foreground.pos;
        let wall = state.obstacles[0].bounds.pos;
        let slime = state.enemies[0].bounds.pos;
        let player = state.player.bounds;

        let input = TickInput::new().with(Key::Dir(Direction::Left));
        tick(&mut state, &input);

        let shift = Vec2::new(GAME_SPEED, 0.0);
        assert!(state.player.moving);
        assert_eq!(state.background.pos, bg + shift);
        assert_eq!(state.foreground.pos, fg + shift);
        assert_eq!(state.obstacles[0].bounds.pos, wall + shift);
        assert_eq!(state.enemies[0].bounds.pos, slime + shift);
        assert_eq!(state.player.bounds, player);
    }

    #[test]
    fn test_held_but_not_last_direction_does_not_scroll() {
        let mut state = quiet_state();
        let bg = state.background.pos;
        let mut input = TickInput::new()
            .with(Key::Dir(Direction::Up))
            .with(Key::Dir(Direction::Right));
        input.release(Key::Dir(Direction::Right));
        tick(&mut state, &input);
        assert_eq!(state.background.pos, bg);
    }

    #[test]
    fn test_wall_stops_scrolling_until_clear() {
        let mut state = quiet_state();
        // Feet box spans y 462..488; this wall's bottom edge is at 462
        state.obstacles.push(Obstacle {
            bounds: Aabb::new(776.0, 414.0, CELL_SIZE, CELL_SIZE),
        });
        let bg = state.background.pos;

        let up = TickInput::new().with(Key::Dir(Direction::Up));
        tick(&mut state, &up);
        assert!(!state.player.moving);
        assert_eq!(state.background.pos, bg);

        // Step away, then come back: the path is clear for exactly one tick
        let down = TickInput::new().with(Key::Dir(Direction::Down));
        tick(&mut state, &down);
        assert!(state.player.moving);
        assert_eq!(state.background.pos, bg - Vec2::new(0.0, GAME_SPEED));
        tick(&mut state, &up);
        assert!(state.player.moving);
        tick(&mut state, &up);
        assert!(!state.player.moving);
    }

    #[test]
    fn test_attack_pins_player() {
        let mut state = quiet_state();
        let bg = state.background.pos;
        let input = TickInput::new().with(Key::Dir(Direction::Left)).with(Key::Action);
        tick(&mut state, &input);
        assert!(state.player.attack);
        assert!(!state.player.moving);
        assert_eq!(state.background.pos, bg);
    }

    #[test]
    fn test_attack_row_tracks_key_on_update_ticks() {
        let mut state = quiet_state();
        let idle = TickInput::new();
        for _ in 0..8 {
            tick(&mut state, &idle);
        }

        // Update lands on the press
        let swing = TickInput::new().with(Key::Dir(Direction::Up)).with(Key::Action);
        tick(&mut state, &swing);
        assert_eq!(state.refresh_counter, 0);
        assert!(state.player.attack);
        assert_eq!(state.player.frame_y, 11);
        assert_eq!(state.player.max_frame_x, PLAYER_ATTACK_MAX_FRAME);

        for _ in 0..8 {
            tick(&mut state, &swing);
        }

        // Update lands on the release; still pinned from the swing, so idle
        let mut released = swing.clone();
        released.release(Key::Action);
        tick(&mut state, &released);
        assert_eq!(state.refresh_counter, 0);
        assert!(!state.player.attack);
        assert_eq!(state.player.frame_y, 4);
        assert_eq!(state.player.max_frame_x, PLAYER_MAX_FRAME);
    }

    #[test]
    fn test_attack_up_defeats_slime_same_tick() {
        let mut state = quiet_state();
        let center = state.player.bounds.center();
        let slime_center = center - Vec2::new(0.0, 50.0);
        let slime_id = add_slime(&mut state, slime_center);
        let slime_box = state.enemies[0].bounds;

        let input = TickInput::new().with(Key::Dir(Direction::Up)).with(Key::Action);
        tick(&mut state, &input);

        assert!(state.enemies.is_empty());
        assert_eq!(state.vanishing.len(), 1);
        assert_eq!(state.vanishing[0].bounds, slime_box);
        assert!(state.player.collision_alert);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyDefeated { enemy_id, .. } if *enemy_id == slime_id
        )));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_vanish_scores_once_after_animation() {
        let mut state = quiet_state();
        let center = state.player.bounds.center();
        add_slime(&mut state, center - Vec2::new(0.0, 50.0));
        let attack = TickInput::new().with(Key::Dir(Direction::Up)).with(Key::Action);
        tick(&mut state, &attack);
        assert_eq!(state.vanishing.len(), 1);

        let idle = TickInput::new();
        for _ in 0..VANISH_MAX_FRAME {
            run_one_update(&mut state, &idle);
            assert_eq!(state.vanishing.len(), 1);
            assert_eq!(state.score(), 0);
        }
        run_one_update(&mut state, &idle);
        assert!(state.vanishing.is_empty());
        assert_eq!(state.score(), 1);

        for _ in 0..5 {
            run_one_update(&mut state, &idle);
        }
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_two_defeats_score_two() {
        let mut state = quiet_state();
        let anchor = crate::sim::collision::feet_anchor(&state.player.bounds);
        add_slime(&mut state, anchor + Vec2::new(-30.0, 10.0));
        add_slime(&mut state, anchor + Vec2::new(30.0, 10.0));

        let attack = TickInput::new().with(Key::Dir(Direction::Down)).with(Key::Action);
        tick(&mut state, &attack);
        assert!(state.enemies.is_empty());
        assert_eq!(state.vanishing.len(), 2);

        let idle = TickInput::new();
        for _ in 0..20 {
            run_one_update(&mut state, &idle);
        }
        assert_eq!(state.score(), 2);
        assert!(state.vanishing.is_empty());
    }

    #[test]
    fn test_new_effect_does_not_scroll_on_its_first_tick() {
        let mut state = quiet_state();
        let center = state.player.bounds.center();
        add_slime(&mut state, center + Vec2::new(40.0, 10.0));
        let slime_box = state.enemies[0].bounds;

        // Attack to the right while the slime is in reach; attacking pins the
        // player so nothing scrolls this tick anyway
        let input = TickInput::new().with(Key::Dir(Direction::Right)).with(Key::Action);
        tick(&mut state, &input);
        assert_eq!(state.vanishing[0].bounds, slime_box);

        // Walk left: the effect now scrolls with the world
        let walk = TickInput::new().with(Key::Dir(Direction::Left));
        tick(&mut state, &walk);
        assert_eq!(
            state.vanishing[0].bounds.pos,
            slime_box.pos + Vec2::new(GAME_SPEED, 0.0)
        );
    }

    #[test]
    fn test_touching_slime_stops_wandering() {
        let mut state = quiet_state();
        let anchor = crate::sim::collision::feet_anchor(&state.player.bounds);
        add_slime(&mut state, anchor + Vec2::new(200.0, 0.0));
        state.enemies[0].wander = WanderState::WanderLeft;
        tick(&mut state, &TickInput::new());
        assert_eq!(state.enemies[0].wander, WanderState::WanderLeft);
        assert!(!state.player.collision_alert);

        state.enemies[0].bounds.pos.x -= 150.0;
        tick(&mut state, &TickInput::new());
        assert_eq!(state.enemies[0].wander, WanderState::Idle);
        assert!(state.player.collision_alert);
    }

    #[test]
    fn test_slime_blocks_walking_into_it() {
        let mut state = quiet_state();
        // Slime box x 718..782 ends where the feet box (x 782..818) begins
        add_slime(&mut state, Vec2::new(750.0, 472.0));
        let bg = state.background.pos;

        let left = TickInput::new().with(Key::Dir(Direction::Left));
        tick(&mut state, &left);
        assert!(!state.player.moving);
        assert_eq!(state.background.pos, bg);
    }

    #[test]
    fn test_halted_state_ignores_ticks() {
        let mut state = quiet_state();
        // Cap stays zero, so this slime is a population fault
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, Vec2::ZERO, 15.0));
        tick(&mut state, &TickInput::new());
        assert_eq!(state.phase, GamePhase::Halted);
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::new());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_determinism() {
        let map = CollisionMap::from_rows(vec![vec![0; 4]; 4]).unwrap();
        let mut a = GameState::new(Tuning::default(), &map);
        let mut b = GameState::new(Tuning::default(), &map);
        let inputs = [
            TickInput::new().with(Key::Dir(Direction::Right)),
            TickInput::new().with(Key::Dir(Direction::Down)),
            TickInput::new().with(Key::Action),
            TickInput::new(),
        ];
        for i in 0..400 {
            let input = &inputs[(i / 50) % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.bounds, eb.bounds);
            assert_eq!(ea.wander, eb.wander);
        }
        assert_eq!(a.background.pos, b.background.pos);
        assert_eq!(a.score(), b.score());
    }
}
