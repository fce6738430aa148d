/// Rendering layer: all terminal I/O lives here.
///
/// `TerminalCanvas` implements the game's `Renderer` by stamping glyph art
/// into an in-memory character grid; `present` writes that grid to the
/// terminal.  The simulation works in canvas units, `UNIT_X` per column and
/// `UNIT_Y` per row, so speeds stay fractional at terminal resolution.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use game_plane::entities::{
    AwardKind, BulletColor, EnemyKind, GameStatus, ImageHandle, Point, Rect, ResourceId, Size,
    SpriteKind,
};
use game_plane::render::{Dialog, FrameContext, Hud, Renderer};

pub const UNIT_X: f32 = 10.0;
pub const UNIT_Y: f32 = 20.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Reset;
const C_PLAYER: Color = Color::White;
const C_ENEMY_SMALL: Color = Color::Green;
const C_ENEMY_MIDDLE: Color = Color::Yellow;
const C_ENEMY_BIG: Color = Color::Red;
const C_BULLET_YELLOW: Color = Color::Yellow;
const C_BULLET_BLUE: Color = Color::Cyan;
const C_AWARD_BOMB: Color = Color::Magenta;
const C_AWARD_BULLET: Color = Color::Blue;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HUD: Color = Color::Yellow;
const C_DIALOG: Color = Color::White;
const C_BUTTON: Color = Color::Green;

// ── Glyph art ─────────────────────────────────────────────────────────────────

const ART_AIRCRAFT: &[&str] = &["  ▲  ", " /█\\ ", "<═╩═>"];
const ART_SMALL: &[&str] = &["«▼»"];
const ART_MIDDLE: &[&str] = &["╔═▼═╗", " \\█/ "];
const ART_BIG: &[&str] = &["◢█████◣", "╠═◉═◉═╣", " ╲▼▼▼╱ "];
const ART_BULLET_YELLOW: &[&str] = &["│"];
const ART_BULLET_BLUE: &[&str] = &["║"];
const ART_AWARD_BOMB: &[&str] = &["(B)"];
const ART_AWARD_BULLET: &[&str] = &["(W)"];
const ART_PAUSE: &[&str] = &["[||]"];
const ART_PAUSE_ACTIVE: &[&str] = &["[|>]"];
const ART_BOMB: &[&str] = &["(@)"];
const ART_EXPLOSION: [&[&str]; 3] = [
    &["  *  ", " *** "],
    &[" \\|/ ", "-- --"],
    &[" . . ", ".   ."],
];

fn art_for(id: ResourceId) -> &'static [&'static str] {
    match id {
        ResourceId::CombatAircraft => ART_AIRCRAFT,
        ResourceId::Explosion => ART_EXPLOSION[0],
        ResourceId::YellowBullet => ART_BULLET_YELLOW,
        ResourceId::BlueBullet => ART_BULLET_BLUE,
        ResourceId::SmallEnemy => ART_SMALL,
        ResourceId::MiddleEnemy => ART_MIDDLE,
        ResourceId::BigEnemy => ART_BIG,
        ResourceId::BombAward => ART_AWARD_BOMB,
        ResourceId::BulletAward => ART_AWARD_BULLET,
        ResourceId::Pause => ART_PAUSE,
        ResourceId::PauseActive => ART_PAUSE_ACTIVE,
        ResourceId::Bomb => ART_BOMB,
    }
}

/// Size of a piece of art in columns and rows.
fn art_cells(art: &[&str]) -> (u16, u16) {
    let cols = art.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (cols as u16, art.len() as u16)
}

fn color_for(kind: SpriteKind) -> Color {
    match kind {
        SpriteKind::CombatAircraft => C_PLAYER,
        SpriteKind::Enemy(EnemyKind::Small) => C_ENEMY_SMALL,
        SpriteKind::Enemy(EnemyKind::Middle) => C_ENEMY_MIDDLE,
        SpriteKind::Enemy(EnemyKind::Big) => C_ENEMY_BIG,
        SpriteKind::Bullet(BulletColor::Yellow) => C_BULLET_YELLOW,
        SpriteKind::Bullet(BulletColor::Blue) => C_BULLET_BLUE,
        SpriteKind::Award(AwardKind::Bomb) => C_AWARD_BOMB,
        SpriteKind::Award(AwardKind::Bullet) => C_AWARD_BULLET,
        SpriteKind::Explosion => C_EXPLOSION,
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: C_BACKGROUND };

pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    redraw_requested: bool,
    explosion_frames: u64,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16, explosion_frames: u64) -> Self {
        TerminalCanvas {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            redraw_requested: true,
            explosion_frames,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
        self.redraw_requested = true;
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// True once per `request_redraw`.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Canvas coordinates of a cell's centre.
    pub fn cell_center(&self, col: u16, row: u16) -> Point {
        Point::new(
            (col as f32 + 0.5) * UNIT_X,
            (row as f32 + 0.5) * UNIT_Y,
        )
    }

    fn cell_rect(col: u16, row: u16, cols: u16, rows: u16) -> Rect {
        Rect::new(
            col as f32 * UNIT_X,
            row as f32 * UNIT_Y,
            (col + cols) as f32 * UNIT_X,
            (row + rows) as f32 * UNIT_Y,
        )
    }

    /// Write text starting at a cell, clipped to the grid.  Spaces are
    /// transparent so overlapping art keeps its outline.
    fn put(&mut self, col: i32, row: i32, text: &str, color: Color) {
        if row < 0 || row >= self.rows as i32 {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i32;
            if c < 0 || c >= self.cols as i32 || ch == ' ' {
                continue;
            }
            self.cells[row as usize * self.cols as usize + c as usize] = Cell { ch, color };
        }
    }

    fn put_art(&mut self, col: i32, row: i32, art: &[&str], color: Color) {
        for (i, line) in art.iter().enumerate() {
            self.put(col, row + i as i32, line, color);
        }
    }

    fn put_centered(&mut self, row: u16, text: &str, color: Color) {
        let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.put(col as i32, row as i32, text, color);
    }
}

impl Renderer for TerminalCanvas {
    fn canvas_size(&self) -> Size {
        Size::new(self.cols as f32 * UNIT_X, self.rows as f32 * UNIT_Y)
    }

    fn load_image_resource(&mut self, id: ResourceId) -> ImageHandle {
        let (cols, rows) = art_cells(art_for(id));
        ImageHandle {
            key: id as u32,
            size: Size::new(cols as f32 * UNIT_X, rows as f32 * UNIT_Y),
        }
    }

    fn draw_sprite(&mut self, kind: SpriteKind, position: Point, _size: Size, ctx: &FrameContext) {
        let art = match kind {
            SpriteKind::Explosion => {
                let stages = ART_EXPLOSION.len() as u64;
                let stage = (ctx.age * stages / self.explosion_frames.max(1)).min(stages - 1);
                ART_EXPLOSION[stage as usize]
            }
            other => art_for(ResourceId::for_sprite(other)),
        };
        let col = (position.x / UNIT_X).round() as i32;
        let row = (position.y / UNIT_Y).round() as i32;
        self.put_art(col, row, art, color_for(kind));
    }

    fn draw_hud(&mut self, hud: &Hud) -> Rect {
        let pause_art = if hud.status == GameStatus::Started {
            ART_PAUSE
        } else {
            ART_PAUSE_ACTIVE
        };
        let (pw, ph) = art_cells(pause_art);
        self.put_art(1, 0, pause_art, C_HUD);
        self.put(pw as i32 + 3, 0, &hud.score.to_string(), C_HUD);

        if hud.bomb_count > 0 {
            let row = self.rows.saturating_sub(1) as i32;
            self.put_art(0, row, ART_BOMB, C_AWARD_BOMB);
            let (bw, _) = art_cells(ART_BOMB);
            self.put(bw as i32 + 1, row, &format!("X {}", hud.bomb_count), C_HUD);
        }

        Self::cell_rect(1, 0, pw, ph)
    }

    fn draw_dialog(&mut self, dialog: Dialog, score: u64) -> Rect {
        let width = 24u16.min(self.cols.saturating_sub(2)).max(4);
        let height = 7u16;
        let left = (self.cols.saturating_sub(width)) / 2;
        let top = (self.rows.saturating_sub(height)) / 2;
        let inner = "─".repeat(width.saturating_sub(2) as usize);

        self.put(left as i32, top as i32, &format!("┌{inner}┐"), C_DIALOG);
        for r in 1..height - 1 {
            self.put(left as i32, (top + r) as i32, "│", C_DIALOG);
            self.put((left + width - 1) as i32, (top + r) as i32, "│", C_DIALOG);
        }
        self.put(left as i32, (top + height - 1) as i32, &format!("└{inner}┘"), C_DIALOG);

        self.put_centered(top + 1, "PLANE WAR SCORE", C_DIALOG);
        self.put_centered(top + 3, &score.to_string(), C_HUD);

        let label = match dialog {
            Dialog::Continue => "[ Continue ]",
            Dialog::Restart => "[ Restart ]",
        };
        let label_cols = label.chars().count() as u16;
        let button_col = (self.cols / 2).saturating_sub(label_cols / 2);
        let button_row = top + 5;
        self.put(button_col as i32, button_row as i32, label, C_BUTTON);

        Self::cell_rect(button_col, button_row, label_cols, 1)
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Write the whole grid to the terminal.
pub fn present<W: Write>(out: &mut W, canvas: &TerminalCanvas) -> std::io::Result<()> {
    let mut current = C_BACKGROUND;
    out.queue(style::SetForegroundColor(current))?;
    for row in 0..canvas.rows {
        out.queue(cursor::MoveTo(0, row))?;
        let start = row as usize * canvas.cols as usize;
        let line = &canvas.cells[start..start + canvas.cols as usize];
        let mut text = String::with_capacity(line.len());
        for cell in line {
            if cell.color != current {
                if !text.is_empty() {
                    out.queue(Print(std::mem::take(&mut text)))?;
                }
                out.queue(style::SetForegroundColor(cell.color))?;
                current = cell.color;
            }
            text.push(cell.ch);
        }
        out.queue(Print(text))?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
