//! Caption box drawing.

use super::{Frame, TeamColors, TextBitmap};

/// Draw text on a filled box and return the result as a new frame.
///
/// The box spans `(x, y - text_height - padding)` to
/// `(x + text_width + padding, y + padding)` where
/// `x = (frame_width - text_width - padding) / 2 + x_offset` and
/// `y = y_offset`, so it is horizontally centred before the offset is
/// applied. The text baseline starts at `(x + padding / 2, y - padding / 2)`.
/// The input frame is left untouched.
pub fn draw_text_with_background(
    frame: &Frame,
    text: &TextBitmap,
    colors: TeamColors,
    x_offset: i64,
    y_offset: i64,
    padding: u32,
) -> Frame {
    let text_width = i64::from(text.width());
    let text_height = i64::from(text.ascent());
    let padding = i64::from(padding);

    let x = (i64::from(frame.width()) - text_width - padding).div_euclid(2) + x_offset;
    let y = y_offset;

    let mut out = frame.clone();
    out.fill_rect(
        x,
        y - text_height - padding,
        x + text_width + padding,
        y + padding,
        colors.background,
    );
    out.blend_text(x + padding / 2, y - padding / 2, text, colors.foreground);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const GREY: [u8; 3] = [90, 90, 90];

    fn colors() -> TeamColors {
        TeamColors {
            background: [255, 0, 0],
            foreground: [255, 255, 255],
        }
    }

    fn solid_text(width: u32, ascent: u32) -> TextBitmap {
        TextBitmap::new(width, ascent, 0, vec![255; (width * ascent) as usize]).unwrap()
    }

    #[test]
    fn test_box_is_centred_and_padded() {
        let frame = Frame::filled(200, 150, GREY);
        let out = draw_text_with_background(&frame, &solid_text(20, 10), colors(), 0, 50, 10);

        // x = (200 - 20 - 10) / 2 = 85; box spans x 85..=115, y 30..=60
        assert_eq!(out.pixel(85, 30), Some([255, 0, 0]));
        assert_eq!(out.pixel(115, 60), Some([255, 0, 0]));
        assert_eq!(out.pixel(84, 30), Some(GREY));
        assert_eq!(out.pixel(116, 60), Some(GREY));
        assert_eq!(out.pixel(85, 29), Some(GREY));
        assert_eq!(out.pixel(85, 61), Some(GREY));
    }

    #[test]
    fn test_text_drawn_inside_box() {
        let frame = Frame::filled(200, 150, GREY);
        let out = draw_text_with_background(&frame, &solid_text(20, 10), colors(), 0, 50, 10);

        // Baseline origin (90, 45): text occupies x 90..110, y 35..45.
        assert_eq!(out.pixel(90, 35), Some([255, 255, 255]));
        assert_eq!(out.pixel(109, 44), Some([255, 255, 255]));
        assert_eq!(out.pixel(88, 40), Some([255, 0, 0]));
        assert_eq!(out.pixel(100, 46), Some([255, 0, 0]));
    }

    #[test]
    fn test_input_frame_is_not_modified() {
        let frame = Frame::filled(64, 64, GREY);
        let before = frame.clone();
        let _ = draw_text_with_background(&frame, &solid_text(8, 8), colors(), 0, 20, 4);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_x_offset_shifts_box() {
        let frame = Frame::filled(200, 150, GREY);
        let out = draw_text_with_background(&frame, &solid_text(20, 10), colors(), 30, 50, 10);
        assert_eq!(out.pixel(115, 40), Some([255, 0, 0]));
        assert_eq!(out.pixel(100, 40), Some(GREY));
    }

    #[test]
    fn test_oversized_text_is_clipped() {
        let frame = Frame::filled(10, 10, GREY);
        let out = draw_text_with_background(&frame, &solid_text(40, 30), colors(), 0, 20, 10);
        assert_eq!(out.width(), 10);
        assert_eq!(out.pixel(0, 0), Some([255, 255, 255]));
    }
}
