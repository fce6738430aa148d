/// Game entity types: geometry, sprites and the closed set of sprite kinds.
///
/// Sprites carry their own motion rule and destroyed flag; everything that
/// needs more than one sprite (collisions, spawning, scoring) lives in
/// `compute`.

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

/// Axis-aligned rectangle, `left`/`top` inclusive, `right`/`bottom` exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect { left, top, right, bottom }
    }

    pub fn from_origin(origin: Point, size: Size) -> Self {
        Rect {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty()
            && p.x >= self.left
            && p.x < self.right
            && p.y >= self.top
            && p.y < self.bottom
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Small,
    Middle,
    Big,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletColor {
    /// Single shot.
    Yellow,
    /// Upgraded double shot.
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AwardKind {
    /// Adds one bomb charge.
    Bomb,
    /// Switches the aircraft to double shots for a number of volleys.
    Bullet,
}

/// Everything the renderer may be asked to draw as a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    CombatAircraft,
    Enemy(EnemyKind),
    Bullet(BulletColor),
    Award(AwardKind),
    Explosion,
}

impl SpriteKind {
    pub fn is_enemy(&self) -> bool {
        matches!(self, SpriteKind::Enemy(_))
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, SpriteKind::Bullet(_))
    }

    pub fn is_award(&self) -> bool {
        matches!(self, SpriteKind::Award(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Started,
    Paused,
    Over,
    /// Inert: before the first `start` and after `destroy`.
    Destroyed,
}

/// Image resources loaded once per session, in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceId {
    CombatAircraft,
    Explosion,
    YellowBullet,
    BlueBullet,
    SmallEnemy,
    MiddleEnemy,
    BigEnemy,
    BombAward,
    BulletAward,
    Pause,
    PauseActive,
    Bomb,
}

impl ResourceId {
    pub const ALL: [ResourceId; 12] = [
        ResourceId::CombatAircraft,
        ResourceId::Explosion,
        ResourceId::YellowBullet,
        ResourceId::BlueBullet,
        ResourceId::SmallEnemy,
        ResourceId::MiddleEnemy,
        ResourceId::BigEnemy,
        ResourceId::BombAward,
        ResourceId::BulletAward,
        ResourceId::Pause,
        ResourceId::PauseActive,
        ResourceId::Bomb,
    ];

    /// Image used for a sprite kind.
    pub fn for_sprite(kind: SpriteKind) -> ResourceId {
        match kind {
            SpriteKind::CombatAircraft => ResourceId::CombatAircraft,
            SpriteKind::Enemy(EnemyKind::Small) => ResourceId::SmallEnemy,
            SpriteKind::Enemy(EnemyKind::Middle) => ResourceId::MiddleEnemy,
            SpriteKind::Enemy(EnemyKind::Big) => ResourceId::BigEnemy,
            SpriteKind::Bullet(BulletColor::Yellow) => ResourceId::YellowBullet,
            SpriteKind::Bullet(BulletColor::Blue) => ResourceId::BlueBullet,
            SpriteKind::Award(AwardKind::Bomb) => ResourceId::BombAward,
            SpriteKind::Award(AwardKind::Bullet) => ResourceId::BulletAward,
            SpriteKind::Explosion => ResourceId::Explosion,
        }
    }
}

/// Opaque image handle: a renderer-chosen key plus the image size, which the
/// core uses as the size of every sprite drawn with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageHandle {
    pub key: u32,
    pub size: Size,
}

// ── Sprites ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Moves only when told to (aircraft, explosions).
    Fixed,
    /// Moves `speed` units down the y axis every frame; negative goes up.
    Auto { speed: f32 },
}

/// Any movable, drawable game entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    motion: Motion,
    destroyed: bool,
    age: u64,
}

impl Sprite {
    /// A sprite that never moves on its own.
    pub fn fixed(kind: SpriteKind, size: Size) -> Self {
        Sprite {
            kind,
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
            motion: Motion::Fixed,
            destroyed: false,
            age: 0,
        }
    }

    /// An AutoSprite. The speed cannot be changed afterwards.
    pub fn auto(kind: SpriteKind, size: Size, speed: f32) -> Self {
        Sprite {
            motion: Motion::Auto { speed },
            ..Sprite::fixed(kind, size)
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn speed(&self) -> f32 {
        match self.motion {
            Motion::Fixed => 0.0,
            Motion::Auto { speed } => speed,
        }
    }

    /// Frames this sprite has been advanced.
    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin(self.position(), self.size())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn center_to(&mut self, cx: f32, cy: f32) {
        self.x = cx - self.width / 2.0;
        self.y = cy - self.height / 2.0;
    }

    /// Apply one frame of the sprite's own motion rule.
    pub fn advance(&mut self) {
        if let Motion::Auto { speed } = self.motion {
            self.y += speed;
        }
        self.age += 1;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Idempotent.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn collides_with(&self, other: &Sprite) -> bool {
        !self.destroyed && !other.destroyed && self.rect().intersects(&other.rect())
    }
}
