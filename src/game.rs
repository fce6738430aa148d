/// The game surface: lifecycle state machine plus per-frame orchestration.
///
/// `GameView` is driven from one thread by two host callbacks:
/// `on_touch_event` (queues raw touches) and `on_draw` (classifies queued
/// touches, updates the simulation when running, and draws).

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::aircraft::CombatAircraft;
use crate::compute::{self, Battlefield};
use crate::config::{ConfigError, GameConfig};
use crate::entities::{GameStatus, Rect, Size, SpriteKind};
use crate::input::{TouchDisambiguator, TouchEvent, TouchIntent};
use crate::render::{Clock, Dialog, FrameContext, Hud, Renderer, ResourceTable};

pub struct GameView {
    config: GameConfig,
    status: GameStatus,
    battlefield: Option<Battlefield>,
    /// Loaded by `start`, kept across restarts, dropped by `destroy`.
    resources: Option<ResourceTable>,
    input: TouchDisambiguator,
    touches: VecDeque<TouchEvent>,
    /// Hit areas reported by the renderer on the last frame.
    pause_rect: Rect,
    dialog_rect: Rect,
    canvas: Size,
    rng: StdRng,
}

impl GameView {
    /// Fails when `config` does not pass `GameConfig::validate`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(GameView {
            input: TouchDisambiguator::new(config.single_click_ms, config.double_click_ms),
            config,
            status: GameStatus::Destroyed,
            battlefield: None,
            resources: None,
            touches: VecDeque::new(),
            pause_rect: Rect::default(),
            dialog_rect: Rect::default(),
            canvas: Size::default(),
            rng,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn frame(&self) -> u64 {
        self.battlefield.as_ref().map_or(0, |f| f.frame)
    }

    pub fn score(&self) -> u64 {
        self.battlefield.as_ref().map_or(0, |f| f.score)
    }

    pub fn battlefield(&self) -> Option<&Battlefield> {
        self.battlefield.as_ref()
    }

    pub fn battlefield_mut(&mut self) -> Option<&mut Battlefield> {
        self.battlefield.as_mut()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn input(&self) -> &TouchDisambiguator {
        &self.input
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Load every image resource and begin a new game.
    pub fn start<R: Renderer>(&mut self, renderer: &mut R) {
        self.destroy();
        self.canvas = renderer.canvas_size();
        self.resources = Some(ResourceTable::load(renderer));
        self.start_when_resources_ready(renderer);
    }

    fn start_when_resources_ready<R: Renderer>(&mut self, renderer: &mut R) {
        let Some(resources) = self.resources.as_ref() else {
            return;
        };
        let aircraft = CombatAircraft::new(resources.sprite_size(SpriteKind::CombatAircraft));
        self.battlefield = Some(Battlefield::new(aircraft));
        self.status = GameStatus::Started;
        info!(canvas = ?self.canvas, "game started");
        renderer.request_redraw();
    }

    /// Begin a fresh game after game over, reusing the loaded resources.
    pub fn restart<R: Renderer>(&mut self, renderer: &mut R) {
        if self.status != GameStatus::Over {
            return;
        }
        info!(score = self.score(), "restart");
        self.clear_battlefield();
        self.start_when_resources_ready(renderer);
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Started {
            self.status = GameStatus::Paused;
            info!(frame = self.frame(), "paused");
        }
    }

    pub fn resume<R: Renderer>(&mut self, renderer: &mut R) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Started;
            info!(frame = self.frame(), "resumed");
            renderer.request_redraw();
        }
    }

    fn clear_battlefield(&mut self) {
        self.status = GameStatus::Destroyed;
        self.battlefield = None;
    }

    /// Tear everything down, including cached resources and any tap still
    /// waiting for confirmation.
    pub fn destroy(&mut self) {
        if self.status != GameStatus::Destroyed {
            info!(score = self.score(), frame = self.frame(), "destroyed");
        }
        self.clear_battlefield();
        self.resources = None;
        self.touches.clear();
        self.input =
            TouchDisambiguator::new(self.config.single_click_ms, self.config.double_click_ms);
        self.pause_rect = Rect::default();
        self.dialog_rect = Rect::default();
    }

    // ── Host callbacks ───────────────────────────────────────────────────────

    /// Queue a raw touch; it is classified on the next `on_draw`.
    pub fn on_touch_event<R: Renderer>(&mut self, event: TouchEvent, renderer: &mut R) {
        match self.status {
            GameStatus::Destroyed => {}
            GameStatus::Started => self.touches.push_back(event),
            GameStatus::Paused | GameStatus::Over => {
                self.touches.push_back(event);
                renderer.request_redraw();
            }
        }
    }

    /// One frame: input, update (when running), draw.
    pub fn on_draw<R: Renderer, C: Clock>(&mut self, renderer: &mut R, clock: &C) {
        self.canvas = renderer.canvas_size();

        while let Some(event) = self.touches.pop_front() {
            for intent in self.input.classify(&event) {
                self.apply_intent(intent, renderer);
            }
        }
        if let Some(intent) = self.input.confirm_single_click(clock.now_ms()) {
            self.apply_intent(intent, renderer);
        }

        match self.status {
            GameStatus::Started => self.draw_game_started(renderer),
            GameStatus::Paused => self.draw_game_paused(renderer),
            GameStatus::Over => self.draw_game_over(renderer),
            GameStatus::Destroyed => {}
        }
    }

    fn apply_intent<R: Renderer>(&mut self, intent: TouchIntent, renderer: &mut R) {
        match (self.status, intent) {
            (GameStatus::Started, TouchIntent::Move(p)) => {
                if let Some(field) = self.battlefield.as_mut() {
                    field.aircraft.center_to(p);
                }
            }
            (GameStatus::Started, TouchIntent::DoubleClick(_)) => {
                if let (Some(field), Some(resources)) =
                    (self.battlefield.as_mut(), self.resources.as_ref())
                {
                    if compute::drop_bomb(field, self.canvas, resources, &self.config).is_none() {
                        debug!("double tap without bombs");
                    }
                }
            }
            (GameStatus::Started, TouchIntent::SingleClick(p)) if self.pause_rect.contains(p) => {
                self.pause();
            }
            (GameStatus::Paused, TouchIntent::SingleClick(p)) if self.dialog_rect.contains(p) => {
                self.resume(renderer);
            }
            (GameStatus::Over, TouchIntent::SingleClick(p)) if self.dialog_rect.contains(p) => {
                self.restart(renderer);
            }
            _ => {}
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    fn draw_game_started<R: Renderer>(&mut self, renderer: &mut R) {
        let (Some(field), Some(resources)) = (self.battlefield.as_mut(), self.resources.as_ref())
        else {
            return;
        };

        let report = compute::tick(field, self.canvas, resources, &self.config, &mut self.rng);

        self.pause_rect = renderer.draw_hud(&Hud {
            status: self.status,
            score: field.score,
            bomb_count: field.aircraft.bomb_count(),
        });
        draw_sprites(field, renderer);

        if report.aircraft_destroyed {
            self.status = GameStatus::Over;
            info!(score = field.score, frame = field.frame, "game over");
        }
        renderer.request_redraw();
    }

    fn draw_game_paused<R: Renderer>(&mut self, renderer: &mut R) {
        let Some(field) = self.battlefield.as_ref() else {
            return;
        };
        self.pause_rect = renderer.draw_hud(&Hud {
            status: self.status,
            score: field.score,
            bomb_count: field.aircraft.bomb_count(),
        });
        draw_sprites(field, renderer);
        self.dialog_rect = renderer.draw_dialog(Dialog::Continue, field.score);

        if self.input.pending_deadline().is_some() {
            renderer.request_redraw();
        }
    }

    fn draw_game_over<R: Renderer>(&mut self, renderer: &mut R) {
        self.dialog_rect = renderer.draw_dialog(Dialog::Restart, self.score());

        if self.input.pending_deadline().is_some() {
            renderer.request_redraw();
        }
    }
}

/// Every live sprite, then the aircraft on top.
fn draw_sprites<R: Renderer>(field: &Battlefield, renderer: &mut R) {
    for sprite in field.alive() {
        let ctx = FrameContext { frame: field.frame, age: sprite.age() };
        renderer.draw_sprite(sprite.kind, sprite.position(), sprite.size(), &ctx);
    }
    let body = &field.aircraft.body;
    if !body.is_destroyed() {
        let ctx = FrameContext { frame: field.frame, age: field.frame };
        renderer.draw_sprite(body.kind, body.position(), body.size(), &ctx);
    }
}
