use ndarray::{s, Axis};

use crate::overlay::font;
use crate::overlay::overlay_surface::OverlaySurface;
use crate::overlay::summary::Summary;
use crate::recognition::domain::recognition_result::RecognitionResult;
use crate::shared::constants::{
    BOX_STROKE, KNOWN_COLOR, LABEL_HEIGHT, LABEL_PADDING_X, LABEL_TEXT_COLOR, LABEL_TEXT_SCALE,
    UNKNOWN_COLOR,
};
use crate::shared::face_box::FaceBox;

/// Renders one recognition response.
///
/// The overlay is cleared and redrawn and the summary rebuilt from the
/// same result slice in one call, so the two outputs always reflect a
/// single response. Results draw in input order; later boxes and labels
/// paint over earlier ones where they overlap.
pub fn render(results: &[RecognitionResult], overlay: &mut OverlaySurface) -> Summary {
    overlay.clear();
    for result in results {
        draw_result(overlay, result);
    }
    Summary::of(results)
}

/// Label text uses whole-percent confidence, e.g. `0.873` becomes `"Alice (87%)"`.
pub fn label_text(result: &RecognitionResult) -> String {
    format!("{} ({:.0}%)", result.name, result.confidence * 100.0)
}

fn draw_result(overlay: &mut OverlaySurface, result: &RecognitionResult) {
    let color = if result.is_unknown() {
        UNKNOWN_COLOR
    } else {
        KNOWN_COLOR
    };
    stroke_rect(overlay, result.face_box, color, BOX_STROKE);
    draw_label(overlay, result, color);
}

fn draw_label(overlay: &mut OverlaySurface, result: &RecognitionResult, color: [u8; 3]) {
    let text = label_text(result);
    let text_width = font::measure(&text, LABEL_TEXT_SCALE);
    let background = FaceBox::new(
        result.face_box.x,
        result.face_box.y - LABEL_HEIGHT as i32,
        (text_width + 2 * LABEL_PADDING_X) as i32,
        LABEL_HEIGHT as i32,
    );
    fill_rect(overlay, background, color);

    let text_y = background.y + ((LABEL_HEIGHT - font::line_height(LABEL_TEXT_SCALE)) / 2) as i32;
    font::draw(
        overlay.frame_mut(),
        background.x + LABEL_PADDING_X as i32,
        text_y,
        &text,
        LABEL_TEXT_COLOR,
        LABEL_TEXT_SCALE,
    );
}

fn fill_rect(overlay: &mut OverlaySurface, rect: FaceBox, color: [u8; 3]) {
    let Some(clip) = rect.clipped_to(overlay.width(), overlay.height()) else {
        return;
    };
    let mut pixels = overlay.frame_mut().as_ndarray_mut();
    let mut region = pixels.slice_mut(s![
        clip.y1 as usize..clip.y2 as usize,
        clip.x1 as usize..clip.x2 as usize,
        ..
    ]);
    for mut px in region.lanes_mut(Axis(2)) {
        px[0] = color[0];
        px[1] = color[1];
        px[2] = color[2];
        px[3] = 255;
    }
}

fn stroke_rect(overlay: &mut OverlaySurface, rect: FaceBox, color: [u8; 3], stroke: u32) {
    let t = stroke as i32;
    let bands = [
        FaceBox::new(rect.x, rect.y, rect.width, t),
        FaceBox::new(rect.x, rect.bottom() - t, rect.width, t),
        FaceBox::new(rect.x, rect.y, t, rect.height),
        FaceBox::new(rect.right() - t, rect.y, t, rect.height),
    ];
    for band in bands {
        fill_rect(overlay, band, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::NO_FACE_PLACEHOLDER;

    fn surface() -> OverlaySurface {
        OverlaySurface::new(640, 480)
    }

    fn result(name: &str, confidence: f64, bbox: [i32; 4]) -> RecognitionResult {
        RecognitionResult::new(name, confidence, FaceBox::from_wire(bbox))
    }

    #[test]
    fn test_empty_results_clear_overlay_and_placeholder() {
        let mut overlay = surface();
        // Pre-draw garbage so clearing is observable
        overlay.frame_mut().data_mut()[0..8].fill(77);
        let summary = render(&[], &mut overlay);
        assert!(overlay.is_clear());
        assert_eq!(summary.lines(), vec![NO_FACE_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn test_known_face_box_corners_and_summary() {
        let mut overlay = surface();
        let summary = render(&[result("Alice", 0.92, [10, 20, 100, 150])], &mut overlay);

        // Rectangle spans (10,20)-(110,170); stroke paints inward
        assert_eq!(overlay.pixel(10, 20), Some(KNOWN_COLOR));
        assert_eq!(overlay.pixel(109, 169), Some(KNOWN_COLOR));
        assert_eq!(overlay.pixel(109, 20), Some(KNOWN_COLOR));
        assert_eq!(overlay.pixel(10, 169), Some(KNOWN_COLOR));
        // Interior stays empty
        assert_eq!(overlay.pixel(60, 95), None);

        let lines = summary.lines();
        assert_eq!(lines, vec!["Alice  92.0%".to_string()]);
    }

    #[test]
    fn test_unknown_face_uses_unknown_color() {
        let mut overlay = surface();
        render(&[result("Unknown", 0.31, [50, 100, 60, 60])], &mut overlay);
        assert_eq!(overlay.pixel(50, 100), Some(UNKNOWN_COLOR));
    }

    #[test]
    fn test_one_box_and_label_per_result() {
        let mut overlay = surface();
        render(
            &[
                result("Alice", 0.9, [20, 100, 50, 50]),
                result("Unknown", 0.4, [300, 200, 80, 80]),
            ],
            &mut overlay,
        );
        // Each result's box edge and label background are present
        assert_eq!(overlay.pixel(20, 100), Some(KNOWN_COLOR));
        assert_eq!(overlay.pixel(20, 100 - LABEL_HEIGHT), Some(KNOWN_COLOR));
        assert_eq!(overlay.pixel(300, 200), Some(UNKNOWN_COLOR));
        assert_eq!(overlay.pixel(300, 200 - LABEL_HEIGHT), Some(UNKNOWN_COLOR));
    }

    #[test]
    fn test_later_results_draw_over_earlier() {
        let mut overlay = surface();
        render(
            &[
                result("Alice", 0.9, [100, 100, 50, 50]),
                result("Unknown", 0.4, [100, 100, 50, 50]),
            ],
            &mut overlay,
        );
        assert_eq!(overlay.pixel(100, 100), Some(UNKNOWN_COLOR));
    }

    #[test]
    fn test_render_replaces_previous_response() {
        let mut overlay = surface();
        render(&[result("Alice", 0.9, [10, 50, 40, 40])], &mut overlay);
        render(&[result("Bob", 0.8, [400, 300, 40, 40])], &mut overlay);
        // Old box gone, new one present
        assert_eq!(overlay.pixel(10, 50), None);
        assert_eq!(overlay.pixel(400, 300), Some(KNOWN_COLOR));
    }

    #[test]
    fn test_label_background_sized_to_text() {
        let mut overlay = surface();
        let r = result("Alice", 0.92, [100, 100, 80, 80]);
        let width = font::measure(&label_text(&r), LABEL_TEXT_SCALE) + 2 * LABEL_PADDING_X;
        render(&[r], &mut overlay);

        let label_y = 100 - LABEL_HEIGHT / 2;
        // Just inside the right edge of the background
        assert!(overlay.pixel(100 + width - 1, label_y).is_some());
        // Just outside it
        assert_eq!(overlay.pixel(100 + width, label_y), None);
    }

    #[test]
    fn test_label_text_whole_percent() {
        let r = result("Alice", 0.873, [0, 0, 10, 10]);
        assert_eq!(label_text(&r), "Alice (87%)");
        let r = result("Bob", 0.92, [0, 0, 10, 10]);
        assert_eq!(label_text(&r), "Bob (92%)");
    }

    #[test]
    fn test_label_clipped_at_top_edge() {
        let mut overlay = surface();
        // Box at y=5: the 25px label strip extends above the surface
        render(&[result("Alice", 0.9, [30, 5, 60, 60])], &mut overlay);
        assert!(!overlay.is_clear());
        assert_eq!(overlay.pixel(30, 0), Some(KNOWN_COLOR));
    }

    #[test]
    fn test_offscreen_box_still_summarized() {
        let mut overlay = surface();
        let summary = render(&[result("Alice", 0.9, [2000, 2000, 50, 50])], &mut overlay);
        assert_eq!(summary.lines().len(), 1);
    }
}
