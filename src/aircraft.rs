/// The player's combat aircraft.

use crate::entities::{AwardKind, BulletColor, Point, Size, Sprite, SpriteKind};

/// Gap between the aircraft's nose and a freshly fired bullet.
const MUZZLE_GAP: f32 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct CombatAircraft {
    pub body: Sprite,
    bomb_count: u32,
    /// Remaining blue double-shot volleys; zero means single yellow shots.
    double_shots_left: u32,
    /// Own cadence counter, independent of the spawn cadence.
    fire_clock: u64,
}

impl CombatAircraft {
    pub fn new(size: Size) -> Self {
        CombatAircraft {
            body: Sprite::fixed(SpriteKind::CombatAircraft, size),
            bomb_count: 0,
            double_shots_left: 0,
            fire_clock: 0,
        }
    }

    pub fn x(&self) -> f32 {
        self.body.x
    }

    pub fn y(&self) -> f32 {
        self.body.y
    }

    pub fn bomb_count(&self) -> u32 {
        self.bomb_count
    }

    pub fn is_upgraded(&self) -> bool {
        self.double_shots_left > 0
    }

    pub fn double_shots_left(&self) -> u32 {
        self.double_shots_left
    }

    pub fn is_destroyed(&self) -> bool {
        self.body.is_destroyed()
    }

    pub fn destroy(&mut self) {
        self.body.destroy();
    }

    pub fn center_to(&mut self, p: Point) {
        self.body.center_to(p.x, p.y);
    }

    /// Keep the whole aircraft inside the canvas.
    pub fn clamp_to(&mut self, canvas: Size) {
        let max_x = (canvas.width - self.body.width).max(0.0);
        let max_y = (canvas.height - self.body.height).max(0.0);
        self.body.x = self.body.x.clamp(0.0, max_x);
        self.body.y = self.body.y.clamp(0.0, max_y);
    }

    /// Apply a pickup's effect.
    pub fn collect(&mut self, award: AwardKind, double_shot_volleys: u32) {
        match award {
            AwardKind::Bomb => self.bomb_count += 1,
            AwardKind::Bullet => self.double_shots_left = double_shot_volleys,
        }
    }

    /// Spend one bomb charge. Returns false when none is left.
    pub fn take_bomb(&mut self) -> bool {
        if self.bomb_count == 0 {
            return false;
        }
        self.bomb_count -= 1;
        true
    }

    /// Advance the firing cadence by one frame and return the bullets of this
    /// frame's volley, if any.  `yellow` and `blue` are the bullet sizes.
    pub fn fire(
        &mut self,
        fire_interval: u64,
        bullet_speed: f32,
        yellow: Size,
        blue: Size,
    ) -> Vec<Sprite> {
        let due = self.fire_clock % fire_interval == 0;
        self.fire_clock += 1;
        if !due || self.is_destroyed() {
            return Vec::new();
        }

        let body = &self.body;
        if self.double_shots_left == 0 {
            let x = body.x + (body.width - yellow.width) / 2.0;
            let y = body.y - yellow.height - MUZZLE_GAP;
            return vec![
                Sprite::auto(SpriteKind::Bullet(BulletColor::Yellow), yellow, -bullet_speed).at(x, y),
            ];
        }

        let y = body.y - blue.height - MUZZLE_GAP;
        let left_x = body.x + body.width / 4.0 - blue.width / 2.0;
        let right_x = body.x + body.width * 3.0 / 4.0 - blue.width / 2.0;
        self.double_shots_left -= 1;
        vec![
            Sprite::auto(SpriteKind::Bullet(BulletColor::Blue), blue, -bullet_speed).at(left_x, y),
            Sprite::auto(SpriteKind::Bullet(BulletColor::Blue), blue, -bullet_speed).at(right_x, y),
        ]
    }
}
