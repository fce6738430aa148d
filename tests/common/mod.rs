#![allow(dead_code)]

use std::cell::Cell;

use game_plane::entities::{ImageHandle, Point, Rect, ResourceId, Size, SpriteKind};
use game_plane::render::{Clock, Dialog, FrameContext, Hud, Renderer, ResourceTable};

pub const CANVAS_W: f32 = 480.0;
pub const CANVAS_H: f32 = 1000.0;

pub fn canvas() -> Size {
    Size::new(CANVAS_W, CANVAS_H)
}

pub fn image_size(id: ResourceId) -> Size {
    match id {
        ResourceId::CombatAircraft => Size::new(50.0, 60.0),
        ResourceId::Explosion => Size::new(50.0, 40.0),
        ResourceId::YellowBullet | ResourceId::BlueBullet => Size::new(10.0, 20.0),
        ResourceId::SmallEnemy => Size::new(30.0, 20.0),
        ResourceId::MiddleEnemy => Size::new(50.0, 40.0),
        ResourceId::BigEnemy => Size::new(70.0, 60.0),
        ResourceId::BombAward | ResourceId::BulletAward => Size::new(30.0, 20.0),
        ResourceId::Pause | ResourceId::PauseActive => Size::new(40.0, 20.0),
        ResourceId::Bomb => Size::new(30.0, 20.0),
    }
}

pub const PAUSE_RECT: Rect = Rect { left: 0.0, top: 0.0, right: 40.0, bottom: 20.0 };
pub const DIALOG_RECT: Rect = Rect { left: 100.0, top: 300.0, right: 200.0, bottom: 340.0 };

/// Records every call the game makes.
#[derive(Default)]
pub struct RecordingRenderer {
    pub size: Size,
    pub loads: Vec<ResourceId>,
    pub sprites: Vec<(SpriteKind, Point)>,
    pub huds: Vec<Hud>,
    pub dialogs: Vec<Dialog>,
    pub redraws: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        RecordingRenderer { size: canvas(), ..Default::default() }
    }

    pub fn clear_frame(&mut self) {
        self.sprites.clear();
        self.huds.clear();
        self.dialogs.clear();
        self.redraws = 0;
    }
}

impl Renderer for RecordingRenderer {
    fn canvas_size(&self) -> Size {
        self.size
    }

    fn load_image_resource(&mut self, id: ResourceId) -> ImageHandle {
        self.loads.push(id);
        ImageHandle { key: id as u32, size: image_size(id) }
    }

    fn draw_sprite(&mut self, kind: SpriteKind, position: Point, _size: Size, _ctx: &FrameContext) {
        self.sprites.push((kind, position));
    }

    fn draw_hud(&mut self, hud: &Hud) -> Rect {
        self.huds.push(hud.clone());
        PAUSE_RECT
    }

    fn draw_dialog(&mut self, dialog: Dialog, _score: u64) -> Rect {
        self.dialogs.push(dialog);
        DIALOG_RECT
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

pub fn resources() -> ResourceTable {
    ResourceTable::load(&mut RecordingRenderer::new())
}

/// Hand-driven clock.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn at(ms: u64) -> Self {
        ManualClock { now: Cell::new(ms) }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
