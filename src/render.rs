// MotionCue — Cue Rendering
//
// Draws one `DotFrame` onto any monochrome embedded-graphics target:
//   - left dot: hugs the left edge, vertically centred, slides along x
//   - top dot:  hugs the top edge, horizontally centred, slides along y
//   - toggle label centred along the bottom edge
// Hidden dots are simply not drawn.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::config::*;
use crate::session::DotFrame;

pub const LABEL_ENABLE: &str = "Enable Cues";
pub const LABEL_DISABLE: &str = "Disable Cues";

pub fn toggle_label(enabled: bool) -> &'static str {
    if enabled { LABEL_DISABLE } else { LABEL_ENABLE }
}

/// Resting top-left corners of the two dots on a target of `size`.
pub fn dot_anchors(size: Size) -> (Point, Point) {
    let radius = (DOT_DIAMETER / 2) as i32;
    let left = Point::new(DOT_EDGE_MARGIN, size.height as i32 / 2 - radius);
    let top = Point::new(size.width as i32 / 2 - radius, DOT_EDGE_MARGIN);
    (left, top)
}

pub fn draw_cues<D>(target: &mut D, frame: &DotFrame, enabled: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let area = target.bounding_box();
    target.clear(BinaryColor::Off)?;

    let (left, top) = dot_anchors(area.size);
    let left = area.top_left + left;
    let top = area.top_left + top;
    let dot_style = PrimitiveStyle::with_fill(BinaryColor::On);

    if frame.dot_left_visible {
        let shift = Point::new(frame.dot_left_offset_x.round() as i32, 0);
        Circle::new(left + shift, DOT_DIAMETER).into_styled(dot_style).draw(target)?;
    }
    if frame.dot_top_visible {
        let shift = Point::new(0, frame.dot_top_offset_y.round() as i32);
        Circle::new(top + shift, DOT_DIAMETER).into_styled(dot_style).draw(target)?;
    }

    let label_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let layout = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Bottom)
        .build();
    let anchor = area.top_left + Point::new(area.size.width as i32 / 2, area.size.height as i32 - 1);
    Text::with_text_style(toggle_label(enabled), anchor, label_style, layout).draw(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::display::FrameBuffer;
    use embedded_graphics::mock_display::MockDisplay;

    fn visible(x: f32, y: f32) -> DotFrame {
        DotFrame {
            dot_left_offset_x: x,
            dot_left_visible: true,
            dot_top_offset_y: y,
            dot_top_visible: true,
        }
    }

    /// Centre of the left / top dot at rest on the 128×64 panel.
    const LEFT_CENTER: (i32, i32) = (5, 32);
    const TOP_CENTER: (i32, i32) = (64, 5);

    #[test]
    fn resting_dots_sit_at_their_anchors() {
        let mut fb = FrameBuffer::new();
        draw_cues(&mut fb, &visible(0.0, 0.0), true).unwrap();
        assert!(fb.pixel(LEFT_CENTER.0, LEFT_CENTER.1));
        assert!(fb.pixel(TOP_CENTER.0, TOP_CENTER.1));
    }

    #[test]
    fn offsets_slide_the_dots() {
        let mut fb = FrameBuffer::new();
        draw_cues(&mut fb, &visible(-7.5, 12.0), true).unwrap();

        // -7.5 rounds away from zero to -8: the dot is pushed mostly off-screen.
        assert!(!fb.pixel(LEFT_CENTER.0, LEFT_CENTER.1));
        assert!(fb.pixel(TOP_CENTER.0, TOP_CENTER.1 + 12));
        assert!(!fb.pixel(TOP_CENTER.0, TOP_CENTER.1));

        let mut fb = FrameBuffer::new();
        draw_cues(&mut fb, &visible(20.0, 0.0), true).unwrap();
        assert!(fb.pixel(LEFT_CENTER.0 + 20, LEFT_CENTER.1));
    }

    #[test]
    fn hidden_dots_are_not_drawn() {
        let mut fb = FrameBuffer::new();
        draw_cues(&mut fb, &DotFrame::default(), false).unwrap();
        assert!(!fb.pixel(LEFT_CENTER.0, LEFT_CENTER.1));
        assert!(!fb.pixel(TOP_CENTER.0, TOP_CENTER.1));
        // Only the label remains, all of it in the bottom text row.
        assert!(fb.lit_pixels() > 0);
        for y in 0..50 {
            for x in 0..SCREEN_WIDTH as i32 {
                assert!(!fb.pixel(x, y), "stray pixel at ({x}, {y})");
            }
        }
    }

    #[test]
    fn label_tracks_enabled_flag() {
        assert_eq!(toggle_label(false), "Enable Cues");
        assert_eq!(toggle_label(true), "Disable Cues");

        let mut off = FrameBuffer::new();
        let mut on = FrameBuffer::new();
        draw_cues(&mut off, &DotFrame::default(), false).unwrap();
        draw_cues(&mut on, &DotFrame::default(), true).unwrap();
        assert_ne!(off.as_bytes(), on.as_bytes());
    }

    #[test]
    fn redraw_erases_previous_frame() {
        let mut fb = FrameBuffer::new();
        draw_cues(&mut fb, &visible(0.0, 0.0), true).unwrap();
        draw_cues(&mut fb, &DotFrame::default(), true).unwrap();
        assert!(!fb.pixel(LEFT_CENTER.0, LEFT_CENTER.1));
    }

    #[test]
    fn layout_follows_target_size() {
        let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);

        draw_cues(&mut display, &visible(0.0, -100.0), true).unwrap();

        // 64×64 mock: left dot centred vertically at y = 32, top dot pushed off.
        assert_eq!(display.get_pixel(Point::new(5, 32)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(32, 5)), Some(BinaryColor::Off));
    }
}
