/// Per-frame simulation: spawning, motion, collisions and scoring.
///
/// Everything operates on a `Battlefield` in place.  Randomness comes only
/// through the injected `rng`, so a seeded RNG replays a game exactly.

use rand::Rng;
use tracing::debug;

use crate::aircraft::CombatAircraft;
use crate::config::GameConfig;
use crate::entities::{
    AwardKind, BulletColor, EnemyKind, Point, Rect, Size, Sprite, SpriteKind,
};
use crate::render::ResourceTable;

// ── Spawn table ──────────────────────────────────────────────────────────────

use crate::entities::EnemyKind::{Big as B, Middle as M, Small as S};

/// Uniformly sampled on every enemy spawn: 11 small, 8 middle, 1 big.
const ENEMY_TABLE: [EnemyKind; 20] = [
    S, S, S, S, S, M, S, S, M, S, S, S, S, M, M, M, M, M, M, B,
];

// ── State ────────────────────────────────────────────────────────────────────

/// All per-game simulation state.
#[derive(Clone, Debug)]
pub struct Battlefield {
    pub aircraft: CombatAircraft,
    /// Sprites taking part in the current frame.
    pub sprites: Vec<Sprite>,
    /// Sprites created during a frame; they join `sprites` at the start of
    /// the next one.
    pub pending: Vec<Sprite>,
    pub frame: u64,
    pub score: u64,
}

/// What happened during one `tick`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<SpriteKind>,
    pub kills: u32,
    pub score_gained: u64,
    pub pickups: u32,
    pub aircraft_destroyed: bool,
}

impl Battlefield {
    pub fn new(aircraft: CombatAircraft) -> Self {
        Battlefield {
            aircraft,
            sprites: Vec::new(),
            pending: Vec::new(),
            frame: 0,
            score: 0,
        }
    }

    /// Queue a sprite for the next frame.
    pub fn add_sprite(&mut self, sprite: Sprite) {
        self.pending.push(sprite);
    }

    pub fn alive(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(|s| !s.is_destroyed())
    }

    pub fn alive_enemies(&self) -> impl Iterator<Item = &Sprite> {
        self.alive().filter(|s| s.kind.is_enemy())
    }

    pub fn alive_bullets(&self) -> impl Iterator<Item = &Sprite> {
        self.alive().filter(|s| s.kind.is_bullet())
    }

    pub fn alive_awards(&self) -> impl Iterator<Item = &Sprite> {
        self.alive().filter(|s| s.kind.is_award())
    }
}

// ── Frame steps ──────────────────────────────────────────────────────────────

pub fn merge_pending(field: &mut Battlefield) {
    if !field.pending.is_empty() {
        let pending = std::mem::take(&mut field.pending);
        field.sprites.extend(pending);
    }
}

/// Bullets at or behind the aircraft's nose are stale (the aircraft moved
/// up past them) and are dropped.
pub fn destroy_bullets_behind_aircraft(field: &mut Battlefield) {
    let aircraft_y = field.aircraft.y();
    for bullet in field
        .sprites
        .iter_mut()
        .filter(|s| s.kind.is_bullet() && !s.is_destroyed())
    {
        if bullet.y >= aircraft_y {
            bullet.destroy();
        }
    }
}

pub fn remove_destroyed_sprites(field: &mut Battlefield) {
    field.sprites.retain(|s| !s.is_destroyed());
}

pub fn is_spawn_frame(frame: u64, config: &GameConfig) -> bool {
    frame % config.spawn_interval == 0
}

/// Decide what a spawn decision at `frame` produces, and at what speed.
pub fn choose_spawn(frame: u64, config: &GameConfig, rng: &mut impl Rng) -> (SpriteKind, f32) {
    let call_time = frame / config.spawn_interval;
    if (call_time + 1) % config.pickup_period == 0 {
        let award = if (call_time + 1) % config.bomb_pickup_period == 0 {
            AwardKind::Bomb
        } else {
            AwardKind::Bullet
        };
        return (SpriteKind::Award(award), config.base_speed);
    }

    let enemy = ENEMY_TABLE[rng.gen_range(0..ENEMY_TABLE.len())];
    let speed = if enemy != EnemyKind::Big && rng.gen_bool(config.boost_chance) {
        config.boosted_speed
    } else {
        config.base_speed
    };
    (SpriteKind::Enemy(enemy), speed)
}

/// Create one enemy or pickup just above the canvas, at a random x, and
/// queue it.
pub fn spawn_random_sprite(
    field: &mut Battlefield,
    canvas_width: f32,
    resources: &ResourceTable,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> SpriteKind {
    let (kind, speed) = choose_spawn(field.frame, config, rng);
    let size = resources.sprite_size(kind);
    let max_x = canvas_width - size.width;
    let x = if max_x > 0.0 { rng.gen_range(0.0..=max_x) } else { 0.0 };
    debug!(frame = field.frame, ?kind, x, speed, "spawn");
    field.add_sprite(Sprite::auto(kind, size, speed).at(x, -size.height));
    kind
}

/// Move every live sprite one frame and retire the ones that left the canvas
/// or finished animating.
pub fn advance_sprites(field: &mut Battlefield, canvas: Size, config: &GameConfig) {
    for sprite in field.sprites.iter_mut().filter(|s| !s.is_destroyed()) {
        sprite.advance();
        let gone = match sprite.kind {
            SpriteKind::Bullet(_) => sprite.y + sprite.height < 0.0,
            SpriteKind::Enemy(_) | SpriteKind::Award(_) => sprite.y > canvas.height,
            SpriteKind::Explosion => sprite.age() >= config.explosion_frames,
            SpriteKind::CombatAircraft => false,
        };
        if gone {
            sprite.destroy();
        }
    }
}

fn explosion_at(center: Point, size: Size) -> Sprite {
    let mut explosion = Sprite::fixed(SpriteKind::Explosion, size);
    explosion.center_to(center.x, center.y);
    explosion
}

/// Destroy the enemy at `index`, score it and queue its explosion.
fn kill_enemy(
    field: &mut Battlefield,
    index: usize,
    explosion: Size,
    config: &GameConfig,
) -> u64 {
    let enemy = &mut field.sprites[index];
    enemy.destroy();
    let value = match enemy.kind {
        SpriteKind::Enemy(kind) => config.score_for(kind),
        _ => 0,
    };
    let center = enemy.center();
    field.score += value;
    field.add_sprite(explosion_at(center, explosion));
    value
}

/// Pairwise bounding-box tests: bullets against enemies, then the aircraft
/// against enemies and pickups.
pub fn resolve_collisions(
    field: &mut Battlefield,
    resources: &ResourceTable,
    config: &GameConfig,
    report: &mut TickReport,
) {
    let explosion = resources.sprite_size(SpriteKind::Explosion);

    // Bullets ↔ enemies
    let bullets: Vec<usize> = indices_of(&field.sprites, |k| k.is_bullet());
    let enemies: Vec<usize> = indices_of(&field.sprites, |k| k.is_enemy());
    for &bi in &bullets {
        for &ei in &enemies {
            if field.sprites[bi].collides_with(&field.sprites[ei]) {
                field.sprites[bi].destroy();
                report.score_gained += kill_enemy(field, ei, explosion, config);
                report.kills += 1;
                break;
            }
        }
    }

    // Aircraft ↔ enemies
    if field
        .alive_enemies()
        .any(|enemy| field.aircraft.body.collides_with(enemy))
    {
        field.aircraft.destroy();
        report.aircraft_destroyed = true;
        return;
    }

    // Aircraft ↔ pickups
    let aircraft = &mut field.aircraft;
    for award in field
        .sprites
        .iter_mut()
        .filter(|s| s.kind.is_award() && !s.is_destroyed())
    {
        if aircraft.body.collides_with(award) {
            award.destroy();
            if let SpriteKind::Award(kind) = award.kind {
                debug!(?kind, "pickup collected");
                aircraft.collect(kind, config.double_shot_volleys);
                report.pickups += 1;
            }
        }
    }
}

fn indices_of(sprites: &[Sprite], pred: impl Fn(&SpriteKind) -> bool) -> Vec<usize> {
    sprites
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_destroyed() && pred(&s.kind))
        .map(|(i, _)| i)
        .collect()
}

pub fn fire(field: &mut Battlefield, resources: &ResourceTable, config: &GameConfig) {
    let yellow = resources.sprite_size(SpriteKind::Bullet(BulletColor::Yellow));
    let blue = resources.sprite_size(SpriteKind::Bullet(BulletColor::Blue));
    let volley = field
        .aircraft
        .fire(config.fire_interval, config.bullet_speed, yellow, blue);
    field.pending.extend(volley);
}

// ── Bomb ─────────────────────────────────────────────────────────────────────

/// Spend one bomb to destroy every live enemy that is at least partly on
/// the canvas.  Returns the number of enemies cleared, or `None` if the
/// aircraft has no bomb left.
pub fn drop_bomb(
    field: &mut Battlefield,
    canvas: Size,
    resources: &ResourceTable,
    config: &GameConfig,
) -> Option<u32> {
    if field.aircraft.is_destroyed() || !field.aircraft.take_bomb() {
        return None;
    }
    let screen = Rect::new(0.0, 0.0, canvas.width, canvas.height);
    let explosion = resources.sprite_size(SpriteKind::Explosion);
    let targets: Vec<usize> = field
        .sprites
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind.is_enemy() && !s.is_destroyed() && s.rect().intersects(&screen))
        .map(|(i, _)| i)
        .collect();
    let mut gained = 0;
    for &i in &targets {
        gained += kill_enemy(field, i, explosion, config);
    }
    debug!(cleared = targets.len(), gained, bombs_left = field.aircraft.bomb_count(), "bomb");
    Some(targets.len() as u32)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
pub fn tick(
    field: &mut Battlefield,
    canvas: Size,
    resources: &ResourceTable,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> TickReport {
    let mut report = TickReport::default();

    // ── 0. Keep the aircraft on screen, parked bottom-centre at frame 0 ──────
    if field.frame == 0 {
        let half_height = field.aircraft.body.height / 2.0;
        field
            .aircraft
            .center_to(Point::new(canvas.width / 2.0, canvas.height - half_height));
    }
    field.aircraft.clamp_to(canvas);

    // ── 1. Sprites created last frame join in ─────────────────────────────────
    merge_pending(field);

    // ── 2. Stale bullets ──────────────────────────────────────────────────────
    destroy_bullets_behind_aircraft(field);

    // ── 3. Purge ──────────────────────────────────────────────────────────────
    remove_destroyed_sprites(field);

    // ── 4. Spawn on the cadence ───────────────────────────────────────────────
    if is_spawn_frame(field.frame, config) {
        report.spawned = Some(spawn_random_sprite(field, canvas.width, resources, config, rng));
    }

    // ── 5. Motion ─────────────────────────────────────────────────────────────
    advance_sprites(field, canvas, config);

    // ── 6. Collisions ─────────────────────────────────────────────────────────
    resolve_collisions(field, resources, config, &mut report);

    // ── 7. Player fire ────────────────────────────────────────────────────────
    fire(field, resources, config);

    field.frame += 1;
    report
}
