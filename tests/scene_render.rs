use termreel::{
    DemoReel, FontSpec, FrameIndex, FrameRange, InMemorySink, Renderer, Scene, TitleCard,
    render_range_to_sink, render_to_sink,
};

fn font_bytes() -> Option<Vec<u8>> {
    match FontSpec::monospace_defaults().load() {
        Ok(bytes) => Some(bytes),
        Err(_) => {
            eprintln!("skipping: no system monospace font available");
            None
        }
    }
}

#[test]
fn demo_frames_have_canvas_dimensions() {
    let Some(bytes) = font_bytes() else { return };
    let scene = DemoReel::new().unwrap();
    let mut renderer = Renderer::new(scene.canvas(), &bytes).unwrap();

    // One frame from each stage kind: title card, typing, banner fade, hold.
    for f in [0u64, 35, 45, 69, 160, 179] {
        let frame = renderer
            .render_frame(|p| scene.draw(FrameIndex(f), p))
            .unwrap();
        assert_eq!(frame.width, scene.canvas().width);
        assert_eq!(frame.height, scene.canvas().height);
        assert_eq!(
            frame.data.len(),
            (frame.width * frame.height * 4) as usize
        );
        assert!(frame.premultiplied);
    }
}

#[test]
fn rendering_is_deterministic() {
    let Some(bytes) = font_bytes() else { return };
    let scene = DemoReel::new().unwrap();
    let mut renderer = Renderer::new(scene.canvas(), &bytes).unwrap();

    let a = renderer
        .render_frame(|p| scene.draw(FrameIndex(45), p))
        .unwrap();
    let b = renderer
        .render_frame(|p| scene.draw(FrameIndex(45), p))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn frames_are_not_blank() {
    let Some(bytes) = font_bytes() else { return };
    let scene = DemoReel::new().unwrap();
    let mut renderer = Renderer::new(scene.canvas(), &bytes).unwrap();

    // A banner-hold frame has the accent border, so it must differ from the
    // bare background frame.
    let banner = renderer
        .render_frame(|p| scene.draw(FrameIndex(60), p))
        .unwrap();
    let typing = renderer
        .render_frame(|p| scene.draw(FrameIndex(31), p))
        .unwrap();
    assert_ne!(banner.data, typing.data);
}

#[test]
fn demo_rejects_out_of_range_frames() {
    let Some(bytes) = font_bytes() else { return };
    let scene = DemoReel::new().unwrap();
    let mut renderer = Renderer::new(scene.canvas(), &bytes).unwrap();

    assert!(
        renderer
            .render_frame(|p| scene.draw(FrameIndex(scene.total_frames()), p))
            .is_err()
    );
}

#[test]
fn title_card_streams_all_frames_in_order() {
    let Some(bytes) = font_bytes() else { return };
    let scene = TitleCard::new().unwrap();
    let mut renderer = Renderer::new(scene.canvas(), &bytes).unwrap();

    let mut sink = InMemorySink::new();
    let stats = render_to_sink(&scene, &mut renderer, &mut sink).unwrap();

    assert_eq!(stats.frames_total, 30);
    assert_eq!(sink.frames().len(), 30);
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!(frame.width, 560);
        assert_eq!(frame.height, 280);
    }

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (560, 280));
    assert_eq!(cfg.fps.num, 10);
}

#[test]
fn sub_range_renders_only_requested_frames() {
    let Some(bytes) = font_bytes() else { return };
    let scene = DemoReel::new().unwrap();
    let mut renderer = Renderer::new(scene.canvas(), &bytes).unwrap();

    let mut sink = InMemorySink::new();
    let range = FrameRange::new(FrameIndex(40), FrameIndex(50)).unwrap();
    let stats = render_range_to_sink(&scene, range, &mut renderer, &mut sink).unwrap();

    assert_eq!(stats.frames_total, 10);
    assert_eq!(sink.frames().len(), 10);
    assert_eq!(sink.frames()[0].0, FrameIndex(40));
    assert_eq!(sink.frames()[9].0, FrameIndex(49));

    // Out-of-bounds ranges are rejected up front.
    let too_far = FrameRange::new(FrameIndex(170), FrameIndex(200)).unwrap();
    assert!(render_range_to_sink(&scene, too_far, &mut renderer, &mut sink).is_err());
}

#[test]
fn title_card_frames_are_identical() {
    let Some(bytes) = font_bytes() else { return };
    let scene = TitleCard::new().unwrap();
    let mut renderer = Renderer::new(scene.canvas(), &bytes).unwrap();

    let mut sink = InMemorySink::new();
    render_to_sink(&scene, &mut renderer, &mut sink).unwrap();

    let first = &sink.frames()[0].1;
    for (_, frame) in sink.frames() {
        assert_eq!(frame.data, first.data);
    }
}
