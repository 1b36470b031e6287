use flappy_term::consts::*;
use flappy_term::sim::{Collision, Command, GameEvent, GamePhase, GameWorld};

#[test]
fn activate_from_ready_starts_with_a_kick() {
    let mut world = GameWorld::new(0);
    world.apply(Command::Activate);
    assert_eq!(world.phase, GamePhase::Playing);
    assert!((world.flyer.velocity + 4.6).abs() < 1e-6);
}

#[test]
fn touching_the_ground_ends_the_run() {
    let mut world = GameWorld::new(0);
    world.apply(Command::Activate);
    world.drain_events();
    world.flyer.y = 360.0;
    world.flyer.velocity = 0.0;
    // Past frame 0 so nothing spawns
    world.frames = 1;
    world.tick();

    assert_eq!(world.phase, GamePhase::Over);
    assert_eq!(world.flyer.y, 356.0);
    assert_eq!(
        world.drain_events(),
        vec![GameEvent::GameOver {
            score: 0,
            cause: Collision::Ground,
        }]
    );
}

#[test]
fn first_obstacle_scores_after_186_moves() {
    let mut world = GameWorld::new(17);
    world.apply(Command::Activate);

    let mut cleared_on = None;
    for tick in 0..200 {
        // Hold the flyer in the gap of the first obstacle
        if let Some(first) = world.obstacles.iter().next() {
            world.flyer.y = first.gap_top() + OBSTACLE_GAP / 2.0;
        }
        world.flyer.velocity = 0.0;
        world.tick();
        assert_eq!(world.phase, GamePhase::Playing, "tick {tick}");

        if world.score.value() == 1 {
            cleared_on = Some(tick);
            break;
        }
    }
    // Spawned and moved on tick 0, so the 186th move happens on tick 185
    assert_eq!(cleared_on, Some(185));
    assert!(world
        .drain_events()
        .contains(&GameEvent::Scored { score: 1 }));
}

#[test]
fn restart_only_from_game_over() {
    let mut world = GameWorld::new(2);
    world.apply(Command::Activate);
    world.apply(Command::Restart);
    assert_eq!(world.phase, GamePhase::Playing);

    while world.phase == GamePhase::Playing {
        world.tick();
    }
    world.apply(Command::Restart);
    assert_eq!(world.phase, GamePhase::Ready);
}
