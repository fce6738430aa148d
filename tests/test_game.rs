mod common;

use game_plane::config::{ConfigError, GameConfig};
use game_plane::entities::*;
use game_plane::game::GameView;
use game_plane::input::{TouchAction, TouchEvent};
use game_plane::render::Dialog;

use common::{ManualClock, RecordingRenderer};

fn seeded_view() -> GameView {
    GameView::new(GameConfig { seed: Some(7), ..GameConfig::default() }).unwrap()
}

fn started() -> (GameView, RecordingRenderer, ManualClock) {
    let mut game = seeded_view();
    let mut renderer = RecordingRenderer::new();
    game.start(&mut renderer);
    (game, renderer, ManualClock::at(0))
}

fn tap_at(game: &mut GameView, renderer: &mut RecordingRenderer, x: f32, y: f32, down: u64) {
    game.on_touch_event(TouchEvent::new(TouchAction::Down, x, y, down), renderer);
    game.on_touch_event(TouchEvent::new(TouchAction::Up, x, y, down + 50), renderer);
}

/// Put an enemy on the aircraft so the next frame ends the game.
fn crash(game: &mut GameView, renderer: &mut RecordingRenderer, clock: &ManualClock) {
    let field = game.battlefield_mut().expect("running game");
    let (x, y) = (field.aircraft.x(), field.aircraft.y());
    field.sprites.push(
        Sprite::auto(SpriteKind::Enemy(EnemyKind::Small), Size::new(30.0, 20.0), 2.0)
            .at(x + 5.0, y + 10.0),
    );
    game.on_draw(renderer, clock);
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn new_view_is_inert() {
    let mut game = seeded_view();
    let mut renderer = RecordingRenderer::new();
    assert_eq!(game.status(), GameStatus::Destroyed);
    assert_eq!(game.frame(), 0);
    assert_eq!(game.score(), 0);

    game.on_touch_event(TouchEvent::new(TouchAction::Down, 1.0, 1.0, 0), &mut renderer);
    game.on_draw(&mut renderer, &ManualClock::at(0));
    assert!(renderer.sprites.is_empty());
    assert!(renderer.huds.is_empty());
    assert_eq!(renderer.redraws, 0);
}

#[test]
fn start_loads_every_resource_once() {
    let (game, renderer, _) = started();
    assert_eq!(renderer.loads, ResourceId::ALL.to_vec());
    assert_eq!(game.status(), GameStatus::Started);
    assert_eq!(renderer.redraws, 1);
}

#[test]
fn thirty_quiet_frames_spawn_once() {
    let (mut game, mut renderer, clock) = started();
    for _ in 0..30 {
        game.on_draw(&mut renderer, &clock);
    }
    assert_eq!(game.frame(), 30);
    assert_eq!(game.score(), 0);
    assert_eq!(game.status(), GameStatus::Started);

    let field = game.battlefield().unwrap();
    let spawned = field
        .sprites
        .iter()
        .chain(field.pending.iter())
        .filter(|s| s.kind.is_enemy() || s.kind.is_award())
        .count();
    assert_eq!(spawned, 1);
}

#[test]
fn started_frames_draw_and_request_more() {
    let (mut game, mut renderer, clock) = started();
    renderer.clear_frame();
    game.on_draw(&mut renderer, &clock);
    assert_eq!(renderer.huds.len(), 1);
    assert_eq!(renderer.redraws, 1);
    assert!(renderer
        .sprites
        .iter()
        .any(|(kind, _)| *kind == SpriteKind::CombatAircraft));
}

#[test]
fn collision_ends_the_game_and_freezes_sprites() {
    let (mut game, mut renderer, clock) = started();
    game.on_draw(&mut renderer, &clock);
    crash(&mut game, &mut renderer, &clock);
    assert_eq!(game.status(), GameStatus::Over);

    let frame = game.frame();
    let positions: Vec<f32> = game.battlefield().unwrap().sprites.iter().map(|s| s.y).collect();

    renderer.clear_frame();
    game.on_draw(&mut renderer, &clock);
    game.on_draw(&mut renderer, &clock);

    assert_eq!(game.frame(), frame);
    let after: Vec<f32> = game.battlefield().unwrap().sprites.iter().map(|s| s.y).collect();
    assert_eq!(positions, after);
    assert_eq!(renderer.dialogs, vec![Dialog::Restart, Dialog::Restart]);
    assert!(renderer.sprites.is_empty());
}

#[test]
fn pause_and_resume_by_tapping() {
    let (mut game, mut renderer, clock) = started();
    game.on_draw(&mut renderer, &clock);

    // Tap the pause button.
    tap_at(&mut game, &mut renderer, 10.0, 10.0, 1000);
    clock.set(1100);
    game.on_draw(&mut renderer, &clock);
    assert_eq!(game.status(), GameStatus::Started, "tap not yet confirmed");
    clock.set(1400);
    game.on_draw(&mut renderer, &clock);
    assert_eq!(game.status(), GameStatus::Paused);

    let frame = game.frame();
    renderer.clear_frame();
    game.on_draw(&mut renderer, &clock);
    assert_eq!(game.frame(), frame);
    assert_eq!(renderer.dialogs, vec![Dialog::Continue]);
    assert_eq!(renderer.redraws, 0);

    // Tap Continue.
    renderer.clear_frame();
    tap_at(&mut game, &mut renderer, 150.0, 320.0, 2000);
    assert!(renderer.redraws > 0);
    clock.set(2100);
    game.on_draw(&mut renderer, &clock);
    assert_eq!(game.status(), GameStatus::Paused);
    assert!(renderer.redraws > 0, "keeps polling until the tap is confirmed");
    clock.set(2400);
    game.on_draw(&mut renderer, &clock);
    assert_eq!(game.status(), GameStatus::Started);
    assert_eq!(game.frame(), frame + 1);
}

#[test]
fn taps_outside_buttons_do_nothing() {
    let (mut game, mut renderer, clock) = started();
    game.on_draw(&mut renderer, &clock);
    tap_at(&mut game, &mut renderer, 300.0, 600.0, 1000);
    clock.set(1400);
    game.on_draw(&mut renderer, &clock);
    assert_eq!(game.status(), GameStatus::Started);
}

#[test]
fn drag_moves_the_aircraft() {
    let (mut game, mut renderer, clock) = started();
    game.on_draw(&mut renderer, &clock);

    game.on_touch_event(TouchEvent::new(TouchAction::Down, 240.0, 970.0, 0), &mut renderer);
    game.on_touch_event(TouchEvent::new(TouchAction::Move, 100.0, 500.0, 300), &mut renderer);
    clock.set(300);
    game.on_draw(&mut renderer, &clock);

    let centre = game.battlefield().unwrap().aircraft.body.center();
    assert_eq!(centre, Point::new(100.0, 500.0));
}

#[test]
fn double_tap_drops_a_bomb() {
    let (mut game, mut renderer, clock) = started();
    game.on_draw(&mut renderer, &clock);
    {
        let field = game.battlefield_mut().unwrap();
        field.aircraft.collect(AwardKind::Bomb, 140);
        field.sprites.push(
            Sprite::auto(SpriteKind::Enemy(EnemyKind::Small), Size::new(30.0, 20.0), 2.0)
                .at(50.0, 100.0),
        );
    }

    tap_at(&mut game, &mut renderer, 300.0, 600.0, 0);
    tap_at(&mut game, &mut renderer, 300.0, 600.0, 150);
    clock.set(260);
    game.on_draw(&mut renderer, &clock);

    assert_eq!(game.score(), 1000);
    let field = game.battlefield().unwrap();
    assert_eq!(field.aircraft.bomb_count(), 0);
    assert!(field.sprites.iter().any(|s| s.kind == SpriteKind::Explosion));
    assert!(field.alive_enemies().all(|e| e.y < 0.0));
    assert_eq!(game.input().last_single_click_time(), None);
}

#[test]
fn restart_resets_everything_but_resources() {
    let (mut game, mut renderer, clock) = started();
    game.on_draw(&mut renderer, &clock);
    {
        let field = game.battlefield_mut().unwrap();
        field.score = 5000;
        field.aircraft.collect(AwardKind::Bomb, 140);
        field.aircraft.collect(AwardKind::Bullet, 140);
    }
    crash(&mut game, &mut renderer, &clock);
    game.on_draw(&mut renderer, &clock);
    assert_eq!(game.status(), GameStatus::Over);
    assert_eq!(game.score(), 5000);

    tap_at(&mut game, &mut renderer, 150.0, 320.0, 1000);
    clock.set(1400);
    game.on_draw(&mut renderer, &clock);

    assert_eq!(game.status(), GameStatus::Started);
    assert_eq!(game.frame(), 1);
    assert_eq!(game.score(), 0);
    let field = game.battlefield().unwrap();
    assert_eq!(field.aircraft.bomb_count(), 0);
    assert!(!field.aircraft.is_upgraded());
    assert!(!field.aircraft.is_destroyed());
    assert_eq!(renderer.loads.len(), ResourceId::ALL.len());
}

#[test]
fn restart_and_resume_only_from_their_states() {
    let (mut game, mut renderer, clock) = started();
    game.on_draw(&mut renderer, &clock);
    let frame = game.frame();

    game.restart(&mut renderer);
    assert_eq!(game.status(), GameStatus::Started);
    assert_eq!(game.frame(), frame);

    game.resume(&mut renderer);
    assert_eq!(game.status(), GameStatus::Started);

    game.pause();
    game.pause();
    assert_eq!(game.status(), GameStatus::Paused);
    game.resume(&mut renderer);
    assert_eq!(game.status(), GameStatus::Started);
}

#[test]
fn destroy_is_terminal_until_next_start() {
    let (mut game, mut renderer, clock) = started();
    game.on_draw(&mut renderer, &clock);
    game.destroy();
    assert_eq!(game.status(), GameStatus::Destroyed);
    assert!(game.battlefield().is_none());

    game.pause();
    game.resume(&mut renderer);
    game.restart(&mut renderer);
    assert_eq!(game.status(), GameStatus::Destroyed);

    renderer.clear_frame();
    game.on_draw(&mut renderer, &clock);
    assert!(renderer.huds.is_empty());

    game.start(&mut renderer);
    assert_eq!(game.status(), GameStatus::Started);
    assert_eq!(game.frame(), 0);
    assert_eq!(renderer.loads.len(), 2 * ResourceId::ALL.len());
}

#[test]
fn tap_pending_at_destroy_does_not_reach_the_next_game() {
    let (mut game, mut renderer, clock) = started();
    game.on_draw(&mut renderer, &clock);

    // Tap the pause button, but tear down before it is confirmed.
    tap_at(&mut game, &mut renderer, 10.0, 10.0, 0);
    clock.set(100);
    game.on_draw(&mut renderer, &clock);
    assert_eq!(game.input().pending_deadline(), Some(350));

    game.destroy();
    assert_eq!(game.input().pending_deadline(), None);

    game.start(&mut renderer);
    clock.set(400);
    game.on_draw(&mut renderer, &clock);
    assert_eq!(game.status(), GameStatus::Started);
    assert_eq!(game.frame(), 1);
}

#[test]
fn invalid_config_is_refused_up_front() {
    for config in [
        GameConfig { fire_interval: 0, ..GameConfig::default() },
        GameConfig { spawn_interval: 0, ..GameConfig::default() },
        GameConfig { boost_chance: 1.5, ..GameConfig::default() },
    ] {
        assert!(matches!(GameView::new(config), Err(ConfigError::Invalid(_))));
    }
}
