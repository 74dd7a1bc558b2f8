//! Drawing surface state: the ordered segment list that the visible canvas is
//! repainted from each frame, plus a raster mirror (`image::RgbaImage`) that
//! receives every segment in parallel so the export paths always have pixel
//! data matching what is on screen.

use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};

/// Default canvas background.
pub const DEFAULT_BACKGROUND: Color32 = Color32::WHITE;

/// One drawn line segment. The visible canvas and the raster mirror are both
/// rendered from values of this type, which is what keeps them in lockstep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Pos2,
    pub to: Pos2,
    pub color: Color32,
    pub width: f32,
}

pub struct Board {
    width: u32,
    height: u32,
    background: Color32,
    segments: Vec<Segment>,
    mirror: RgbaImage,
    /// True once anything has been drawn since the last clear. Gates the
    /// destructive-clear confirmation.
    dirty: bool,
    /// Last recorded pointer position; segments are drawn from here.
    anchor: Option<Pos2>,
}

impl Board {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: DEFAULT_BACKGROUND,
            segments: Vec::new(),
            mirror: RgbaImage::from_pixel(width, height, to_rgba(DEFAULT_BACKGROUND)),
            dirty: false,
            anchor: None,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn anchor(&self) -> Option<Pos2> {
        self.anchor
    }

    /// The raster mirror, for the image-export and snapshot paths.
    pub fn snapshot(&self) -> &RgbaImage {
        &self.mirror
    }

    /// Record the anchor point on pointer press.
    pub fn press(&mut self, pos: Pos2) {
        self.anchor = Some(self.clamp(pos));
    }

    /// Draw one segment from the anchor to `pos` on both surfaces, then
    /// advance the anchor. Called per drag event.
    pub fn stroke_to(&mut self, pos: Pos2, color: Color32, width: f32) {
        let pos = self.clamp(pos);
        let Some(from) = self.anchor else {
            // Drag event without a press (e.g. drag started outside the
            // canvas): treat it as the press.
            self.anchor = Some(pos);
            return;
        };
        self.push_segment(Segment {
            from,
            to: pos,
            color,
            width,
        });
        self.anchor = Some(pos);
    }

    /// "Connect the dots": one segment from the last recorded point to `pos`
    /// without requiring a drag. First such click only sets the anchor.
    pub fn connect_to(&mut self, pos: Pos2, color: Color32, width: f32) {
        self.stroke_to(pos, color, width);
    }

    /// Erase all strokes, reset the background to the default and repaint the
    /// mirror. Clears the dirty flag. Confirmation is the caller's job.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.background = DEFAULT_BACKGROUND;
        self.anchor = None;
        self.dirty = false;
        self.rebuild_mirror();
    }

    /// Set the canvas background. Strokes are untouched; the mirror is rebuilt
    /// (background first, then every segment in order) so the export invariant
    /// holds afterwards.
    pub fn fill(&mut self, color: Color32) {
        self.background = color;
        self.dirty = true;
        self.rebuild_mirror();
    }

    fn push_segment(&mut self, segment: Segment) {
        rasterize_segment(&mut self.mirror, &segment);
        self.segments.push(segment);
        self.dirty = true;
    }

    fn rebuild_mirror(&mut self) {
        let bg = to_rgba(self.background);
        for px in self.mirror.pixels_mut() {
            *px = bg;
        }
        for segment in &self.segments {
            rasterize_segment(&mut self.mirror, segment);
        }
    }

    fn clamp(&self, pos: Pos2) -> Pos2 {
        Pos2::new(
            pos.x.clamp(0.0, self.width.saturating_sub(1) as f32),
            pos.y.clamp(0.0, self.height.saturating_sub(1) as f32),
        )
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

/// Rasterize one segment with round caps: filled discs of radius `width / 2`
/// stamped at sub-pixel steps along the line.
fn rasterize_segment(img: &mut RgbaImage, segment: &Segment) {
    let (x0, y0) = (segment.from.x, segment.from.y);
    let (x1, y1) = (segment.to.x, segment.to.y);
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len = (dx * dx + dy * dy).sqrt();
    let steps = (len * 2.0).ceil() as i32;
    let radius = (segment.width / 2.0).max(0.5);
    let color = to_rgba(segment.color);

    for i in 0..=steps {
        let t = i as f32 / steps.max(1) as f32;
        stamp_disc(img, x0 + dx * t, y0 + dy * t, radius, color);
    }
}

fn stamp_disc(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let r = radius.ceil() as i32;
    let r_sq = radius * radius;
    for oy in -r..=r {
        for ox in -r..=r {
            if (ox * ox + oy * oy) as f32 > r_sq {
                continue;
            }
            let px = cx as i32 + ox;
            let py = cy as i32 + oy;
            if px >= 0 && px < w && py >= 0 && py < h {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn mirror_pixel(board: &Board, x: u32, y: u32) -> Rgba<u8> {
        *board.snapshot().get_pixel(x, y)
    }

    #[test]
    fn stroke_draws_on_canvas_and_mirror() {
        let mut board = Board::new(100, 100);
        board.press(pos2(10.0, 50.0));
        board.stroke_to(pos2(90.0, 50.0), Color32::RED, 4.0);

        assert_eq!(board.segments().len(), 1);
        let seg = board.segments()[0];
        assert_eq!(seg.from, pos2(10.0, 50.0));
        assert_eq!(seg.to, pos2(90.0, 50.0));
        assert_eq!(seg.color, Color32::RED);
        assert!(board.is_dirty());

        // Mirror carries the same segment: sample along the midline.
        for x in [10u32, 50, 90] {
            assert_eq!(mirror_pixel(&board, x, 50), Rgba([255, 0, 0, 255]));
        }
        // And nothing far away from it.
        assert_eq!(mirror_pixel(&board, 50, 10), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn drag_advances_anchor() {
        let mut board = Board::new(100, 100);
        board.press(pos2(10.0, 10.0));
        board.stroke_to(pos2(20.0, 10.0), Color32::BLACK, 2.0);
        board.stroke_to(pos2(30.0, 10.0), Color32::BLACK, 2.0);

        assert_eq!(board.segments()[1].from, pos2(20.0, 10.0));
        assert_eq!(board.anchor(), Some(pos2(30.0, 10.0)));
    }

    #[test]
    fn connect_to_draws_from_last_point_without_drag() {
        let mut board = Board::new(100, 100);
        board.press(pos2(10.0, 10.0));
        board.connect_to(pos2(80.0, 80.0), Color32::BLUE, 3.0);

        assert_eq!(board.segments().len(), 1);
        assert_eq!(board.segments()[0].from, pos2(10.0, 10.0));
        // The mirror got the segment too.
        assert_eq!(mirror_pixel(&board, 45, 45), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn stroke_without_press_only_sets_anchor() {
        let mut board = Board::new(100, 100);
        board.stroke_to(pos2(40.0, 40.0), Color32::BLACK, 2.0);

        assert!(board.segments().is_empty());
        assert!(!board.is_dirty());
        assert_eq!(board.anchor(), Some(pos2(40.0, 40.0)));
    }

    #[test]
    fn clear_resets_strokes_background_and_dirty_flag() {
        let mut board = Board::new(100, 100);
        board.press(pos2(10.0, 10.0));
        board.stroke_to(pos2(90.0, 90.0), Color32::BLACK, 5.0);
        board.fill(Color32::YELLOW);
        board.clear();

        assert!(board.segments().is_empty());
        assert!(!board.is_dirty());
        assert_eq!(board.background(), DEFAULT_BACKGROUND);
        assert_eq!(mirror_pixel(&board, 50, 50), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn fill_changes_background_but_keeps_strokes() {
        let mut board = Board::new(100, 100);
        board.press(pos2(10.0, 50.0));
        board.stroke_to(pos2(90.0, 50.0), Color32::RED, 4.0);
        board.fill(Color32::YELLOW);

        assert_eq!(board.segments().len(), 1);
        assert!(board.is_dirty());
        assert_eq!(board.background(), Color32::YELLOW);
        // Mirror rebuild: new background where nothing was drawn, stroke
        // pixels still on top of it.
        assert_eq!(mirror_pixel(&board, 50, 10), Rgba([255, 255, 0, 255]));
        assert_eq!(mirror_pixel(&board, 50, 50), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn zero_sized_board_clamps_without_panicking() {
        let mut board = Board::new(0, 0);
        board.press(pos2(10.0, 10.0));
        board.stroke_to(pos2(20.0, 20.0), Color32::BLACK, 2.0);
        assert_eq!(board.segments()[0].to, pos2(0.0, 0.0));
    }

    #[test]
    fn positions_are_clamped_to_the_canvas() {
        let mut board = Board::new(100, 100);
        board.press(pos2(-10.0, 50.0));
        board.stroke_to(pos2(500.0, 50.0), Color32::BLACK, 2.0);

        let seg = board.segments()[0];
        assert_eq!(seg.from, pos2(0.0, 50.0));
        assert_eq!(seg.to, pos2(99.0, 50.0));
    }
}
