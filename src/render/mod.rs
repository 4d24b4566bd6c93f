use crate::{
    config,
    types::{ArenaSize, BodySnapshot, ColorId, Vec2},
};

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderCell {
    pub ch: char,
    pub depth: u8,
    pub color: ColorId,
}

const EMPTY: RenderCell = RenderCell {
    ch: ' ',
    depth: 0,
    color: ColorId::Background,
};

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        self.cells.resize(len, EMPTY);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    /// Writes a glyph unless a deeper one already owns the cell.
    fn set(&mut self, x: i32, y: i32, ch: char, depth: u8, color: ColorId) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        if depth >= cell.depth {
            *cell = RenderCell { ch, depth, color };
        }
    }
}

/// Arena units covered by one terminal cell on each axis.
pub fn cell_scale(arena: ArenaSize, viewport: Viewport) -> Vec2 {
    Vec2::new(
        arena.width / viewport.width.max(1) as f32,
        arena.height / viewport.height.max(1) as f32,
    )
}

/// Rasterises every visible body as a ring with a marker at its center. The
/// primary body draws over the others.
pub fn draw(snapshot: &[BodySnapshot], arena: ArenaSize, viewport: Viewport, frame: &mut FrameBuffer) {
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.clear();
    }
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }

    let scale = cell_scale(arena, viewport);
    for body in snapshot.iter().filter(|b| b.visible) {
        let (color, depth, marker) = if body.primary {
            (ColorId::Primary, 2, '@')
        } else {
            (ColorId::Other, 1, 'o')
        };
        draw_ring(frame, body.pos, scale, color, depth);
        let cx = (body.pos.x / scale.x).floor() as i32;
        let cy = (body.pos.y / scale.y).floor() as i32;
        frame.set(cx, cy, marker, depth, color);
    }
}

fn draw_ring(frame: &mut FrameBuffer, center: Vec2, scale: Vec2, color: ColorId, depth: u8) {
    let r = config::ICON_RADIUS;
    let x0 = ((center.x - r) / scale.x).floor() as i32;
    let x1 = ((center.x + r) / scale.x).floor() as i32;
    let y0 = ((center.y - r) / scale.y).floor() as i32;
    let y1 = ((center.y + r) / scale.y).floor() as i32;
    // Thickness of one cell, measured in arena units along the coarser axis.
    let band = scale.x.max(scale.y) * 0.5;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let cell_center = Vec2::new((x as f32 + 0.5) * scale.x, (y as f32 + 0.5) * scale.y);
            let dist = (cell_center - center).length();
            if (dist - r).abs() <= band {
                frame.set(x, y, '·', depth, color);
            }
        }
    }
}
