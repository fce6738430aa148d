/// The contract between the simulation core and whatever draws it.
///
/// The core never touches pixels, fonts or layout.  It tells the renderer
/// what to draw and where, and asks it for the rectangles of the buttons it
/// laid out so taps can be hit-tested on the next frame.

use crate::entities::{GameStatus, ImageHandle, Point, Rect, ResourceId, Size, SpriteKind};

/// Per-draw context handed to `Renderer::draw_sprite`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameContext {
    /// Game frame being drawn.
    pub frame: u64,
    /// Frames the drawn sprite has existed; picks explosion stages.
    pub age: u64,
}

/// Score/bomb overlay and the pause button.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub status: GameStatus,
    pub score: u64,
    pub bomb_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialog {
    /// Shown while paused; the button resumes.
    Continue,
    /// Shown after game over; the button restarts.
    Restart,
}

pub trait Renderer {
    /// Current drawing surface size, in canvas units.
    fn canvas_size(&self) -> Size;

    /// Called once per resource when the game starts; the result is cached
    /// for the whole session.
    fn load_image_resource(&mut self, id: ResourceId) -> ImageHandle;

    fn draw_sprite(&mut self, kind: SpriteKind, position: Point, size: Size, ctx: &FrameContext);

    /// Draw score, bomb count and the pause button; returns the pause
    /// button's rectangle.
    fn draw_hud(&mut self, hud: &Hud) -> Rect;

    /// Draw the score dialog; returns its button's rectangle.
    fn draw_dialog(&mut self, dialog: Dialog, score: u64) -> Rect;

    /// Ask the host to schedule another frame.
    fn request_redraw(&mut self);
}

/// Monotonic milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Image handles for every `ResourceId`, loaded once.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceTable {
    images: Vec<ImageHandle>,
}

impl ResourceTable {
    pub fn load<R: Renderer + ?Sized>(renderer: &mut R) -> Self {
        let images = ResourceId::ALL
            .iter()
            .map(|&id| renderer.load_image_resource(id))
            .collect();
        ResourceTable { images }
    }

    pub fn get(&self, id: ResourceId) -> ImageHandle {
        self.images[id as usize]
    }

    pub fn size_of(&self, id: ResourceId) -> Size {
        self.get(id).size
    }

    pub fn sprite_size(&self, kind: SpriteKind) -> Size {
        self.size_of(ResourceId::for_sprite(kind))
    }
}
