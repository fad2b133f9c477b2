//! Multi-frame scenarios driven through the public `tick` entry point

use evade::WorldConfig;
use evade::config::EnemySpawn;
use evade::sim::{
    BoundingBox, Fixed, GameEvent, GameState, Position, PowerupKind, TickInput, tick,
};

const IDLE: TickInput = TickInput {
    up: false,
    down: false,
    left: false,
    right: false,
    a_pressed: false,
    b_pressed: false,
    idle_mode: false,
};

/// A single enemy of speed 1 at `(x, y)`, no automatic powerup spawns
fn world_with_enemy(x: i32, y: i32) -> WorldConfig {
    let mut config = WorldConfig::default();
    config.enemies = vec![EnemySpawn::new(x, y, Fixed::ONE)];
    config.powerups.spawn_interval = 100_000;
    config
}

fn empty_world() -> WorldConfig {
    let mut config = world_with_enemy(0, 0);
    config.enemies.clear();
    config
}

#[test]
fn test_catch_resets_score_and_restarts_player() {
    // Boxes first overlap on frame 6, after five scored frames
    let mut state = GameState::new(world_with_enemy(57, 22));
    for _ in 0..5 {
        let result = tick(&mut state, &IDLE);
        assert!(!result.caught);
    }
    assert_eq!(state.score.score(), 5);

    let result = tick(&mut state, &IDLE);
    assert!(result.caught);
    assert!(result.events.contains(&GameEvent::PlayerCaught { enemy_id: 1 }));
    assert!(matches!(
        result.events[0],
        GameEvent::EnemyTeleported { enemy_id: 1, .. }
    ));
    assert_eq!(result.score, 1);
    assert!(state.score.high_score() >= 5);
    assert_eq!(state.player.position(), Position::from_ints(44, 22));

    let enemy = &state.enemies[0];
    assert!(
        enemy
            .bounding_box()
            .contained_in(&state.config.screen.bounds())
    );
}

#[test]
fn test_invincible_player_is_not_reset() {
    let mut state = GameState::new(world_with_enemy(57, 22));
    state.player.apply_powerup(PowerupKind::Invincibility);
    for _ in 0..5 {
        tick(&mut state, &IDLE);
    }

    let result = tick(&mut state, &IDLE);
    assert!(!result.caught);
    assert_eq!(result.score, 6);
    assert!(
        result
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyTeleported { enemy_id: 1, .. }))
    );
    assert!(
        !result
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerCaught { .. }))
    );
}

#[test]
fn test_player_box_follows_restart() {
    let mut config = world_with_enemy(10, 22);
    config.restart_position = Position::from_ints(-60, -40);
    let mut state = GameState::new(config);
    let hold_left = TickInput {
        left: true,
        ..IDLE
    };

    let mut caught = false;
    for _ in 0..30 {
        if tick(&mut state, &hold_left).caught {
            caught = true;
            break;
        }
        let player = &state.player;
        assert_eq!(
            player.bounding_box(),
            BoundingBox::new(player.position(), player.size())
        );
    }
    assert!(caught);

    let restart = Position::from_ints(-60, -40);
    assert_eq!(state.player.position(), restart);
    assert_eq!(
        state.player.bounding_box(),
        BoundingBox::new(restart, state.player.size())
    );
}

#[test]
fn test_new_high_score_reported_once_after_catch() {
    let mut state = GameState::new(world_with_enemy(57, 22));
    for _ in 0..6 {
        tick(&mut state, &IDLE);
    }
    assert_eq!(state.score.high_score(), 5);
    // Park the enemy far away so it cannot catch again
    state.enemies[0].set_position(Position::from_ints(-110, -70));

    let mut reported = Vec::new();
    for _ in 0..20 {
        let result = tick(&mut state, &IDLE);
        for event in result.events {
            if let GameEvent::NewHighScore { score } = event {
                reported.push(score);
            }
        }
    }
    assert_eq!(reported, vec![6]);
    assert_eq!(state.score.high_score(), 21);
}

#[test]
fn test_uncollected_powerup_expires() {
    let mut state = GameState::new(empty_world());
    let id = state.add_powerup(PowerupKind::SpeedBoost, Position::from_ints(-100, 60));
    let lifetime = state.config.powerups.lifetime;

    for _ in 1..lifetime {
        let result = tick(&mut state, &IDLE);
        assert!(result.events.is_empty());
    }
    assert_eq!(state.powerups.len(), 1);

    let result = tick(&mut state, &IDLE);
    assert_eq!(result.events, vec![GameEvent::PowerupExpired { id }]);
    assert!(state.powerups.is_empty());
}

#[test]
fn test_collected_effect_wears_off() {
    let mut state = GameState::new(empty_world());
    let id = state.add_powerup(PowerupKind::SpeedBoost, Position::from_ints(44, 22));

    let result = tick(&mut state, &IDLE);
    assert_eq!(
        result.events,
        vec![GameEvent::PowerupCollected {
            id,
            kind: PowerupKind::SpeedBoost
        }]
    );
    assert_eq!(state.player.speed(), state.player.base_speed() * 2);

    for _ in 0..299 {
        tick(&mut state, &IDLE);
    }
    assert!(state.player.has_powerup());
    assert_eq!(state.player.powerup_timer(), 1);

    let result = tick(&mut state, &IDLE);
    assert!(result.events.contains(&GameEvent::PowerupEnded));
    assert!(!state.player.has_powerup());
    assert_eq!(state.player.speed(), state.player.base_speed());
}

#[test]
fn test_one_pickup_per_frame() {
    let mut state = GameState::new(empty_world());
    let first = state.add_powerup(PowerupKind::Invincibility, Position::from_ints(44, 22));
    let second = state.add_powerup(PowerupKind::SpeedBoost, Position::from_ints(45, 22));

    let result = tick(&mut state, &IDLE);
    assert!(result.events.contains(&GameEvent::PowerupCollected {
        id: first,
        kind: PowerupKind::Invincibility
    }));
    assert!(state.player.is_invincible());
    assert_eq!(state.powerups.len(), 1);

    // The second pickup overwrites the first effect
    let result = tick(&mut state, &IDLE);
    assert!(result.events.contains(&GameEvent::PowerupCollected {
        id: second,
        kind: PowerupKind::SpeedBoost
    }));
    assert!(!state.player.is_invincible());
    assert_eq!(state.player.powerup_timer(), state.config.powerup_duration);
    assert!(state.powerups.is_empty());
}

#[test]
fn test_spawner_respects_capacity() {
    let mut config = empty_world();
    config.powerups.spawn_interval = 10;
    config.powerups.lifetime = 100_000;
    // Keep the player in a corner so spawns are rarely collected
    config.player_spawn = Position::from_ints(-116, -76);
    let mut state = GameState::new(config);

    let mut spawned = 0;
    for _ in 0..200 {
        let result = tick(&mut state, &IDLE);
        spawned += result
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PowerupSpawned { .. }))
            .count();
        assert!(state.powerups.len() <= state.config.powerups.capacity);
    }
    assert!(spawned >= state.config.powerups.capacity);
}

#[test]
fn test_odd_sized_player_stays_on_screen() {
    let mut config = empty_world();
    config.entity_size = evade::sim::Size::new(9, 9);
    let mut state = GameState::new(config);
    let screen = state.config.screen.bounds();
    let down_right = TickInput {
        down: true,
        right: true,
        ..IDLE
    };

    for _ in 0..200 {
        tick(&mut state, &down_right);
        assert!(state.player.bounding_box().contained_in(&screen));
    }
    assert_eq!(state.player.bounding_box().right(), screen.right());
    assert_eq!(state.player.bounding_box().bottom(), screen.bottom());
}

#[test]
fn test_large_screen_keeps_distant_enemies_apart() {
    let mut config = empty_world();
    config.screen = evade::config::Screen {
        width: 1600,
        height: 1600,
    };
    config.enemies = vec![
        EnemySpawn::new(-350, -350, Fixed::ONE),
        EnemySpawn::new(350, 350, Fixed::ONE),
    ];
    config.validate().unwrap();
    let mut state = GameState::new(config);

    let idle = TickInput {
        idle_mode: true,
        ..IDLE
    };
    for _ in 0..10 {
        tick(&mut state, &idle);
    }
    // Pursuit only: one unit per axis per frame, no separation push
    assert_eq!(state.enemies[0].position(), Position::from_ints(-340, -340));
    assert_eq!(state.enemies[1].position(), Position::from_ints(340, 340));
}
