use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use vb_detect::data::{LabelPalette, PipelineConfig};
use vb_detect::detection_runners::DetectionPipeline;

use fixtures::{camera_frame, stub_engine, tensor_with};

#[test]
fn detections_draw_onto_the_prepared_frame() {
    let data = tensor_with(&[(0, [320.0, 320.0, 100.0, 50.0, 0.5])]);
    let mut pipeline = DetectionPipeline::new(PipelineConfig::direct_overlay(), stub_engine(data));
    let frame = camera_frame(1280, 720);

    let overlay = pipeline.run_frame(&frame).unwrap();
    let (prepared, _) = vb_detect::prepare(&frame, &pipeline.config().prepare).unwrap();
    let mut canvas = prepared.to_rgba_image().unwrap();

    let mut palette = LabelPalette::with_seed(&[], 7);
    for det in &overlay.detections {
        let (x, y, w, h) = det.bbox.as_xy_wh_i32();
        let colour = palette.colour(&det.label).to_rgba8();
        draw_hollow_rect_mut(&mut canvas, Rect::at(x, y).of_size(w as u32, h as u32), colour);
    }

    let expected = palette.get("homeplate").unwrap().to_rgba8();
    assert_eq!(*canvas.get_pixel(270, 295), expected);
    assert_eq!(*canvas.get_pixel(369, 344), expected);
    // inside the box is untouched; BGRA (40, 80, 120) reads back as RGBA (120, 80, 40)
    let inside = canvas.get_pixel(320, 320);
    assert!((inside[0] as i16 - 120).abs() <= 1 && (inside[2] as i16 - 40).abs() <= 1);
    assert_eq!(overlay.detections[0].caption(), "homeplate\n50.0%");
}
