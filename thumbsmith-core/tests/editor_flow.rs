//! End-to-end editing flows: pointer interaction, history, reordering,
//! templates, and persistence.

use thumbsmith_core::{
    builtin_template, EditKey, Editor, ElementKind, ImageAsset, ImageFormat, PointerEvent,
    ProjectStore, DEFAULT_KEY, MAX_UNDO_DEPTH,
};

fn small_image() -> ImageAsset {
    ImageAsset::new("photo.png", ImageFormat::Png, 50.0, 50.0)
}

#[test]
fn adding_then_undoing_returns_to_empty() {
    let mut editor = Editor::default();
    for _ in 0..5 {
        editor.add_text();
    }
    assert_eq!(editor.scene().len(), 5);

    for _ in 0..5 {
        assert!(editor.undo());
    }
    assert!(editor.scene().is_empty());
    assert!(!editor.undo());
}

#[test]
fn undo_stack_caps_at_forty_evicting_oldest() {
    let mut editor = Editor::default();
    for _ in 0..=MAX_UNDO_DEPTH {
        editor.add_text();
    }
    assert_eq!(editor.history().undo_depth(), MAX_UNDO_DEPTH);

    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, MAX_UNDO_DEPTH);
    // The empty-scene snapshot was evicted by the 41st mutation, so the
    // oldest reachable state still holds the first element.
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn redo_stack_cleared_by_mutation_after_undo() {
    let mut editor = Editor::default();
    editor.add_text();
    editor.add_text();

    assert!(editor.undo());
    assert!(editor.history().can_redo());

    editor.add_text();
    assert!(!editor.history().can_redo());
    assert!(!editor.redo());
}

#[test]
fn undo_and_redo_clear_selection() {
    let mut editor = Editor::default();
    editor.add_text();
    editor.select(0);
    assert_eq!(editor.scene().selected(), Some(0));

    assert!(editor.undo());
    assert_eq!(editor.scene().selected(), None);

    assert!(editor.redo());
    assert_eq!(editor.scene().selected(), None);
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn reorder_is_noop_at_extremes() {
    let mut editor = Editor::default();
    for _ in 0..3 {
        editor.add_text();
    }
    let layer_of = |editor: &Editor, i: usize| editor.scene().elements()[i].transform.layer;

    // Top element can't go higher
    editor.select(2);
    editor.bring_forward();
    assert_eq!(layer_of(&editor, 2), 2);

    // Bottom element can't go lower
    editor.select(0);
    editor.send_back();
    assert_eq!(layer_of(&editor, 0), 0);

    // Middle element moves both ways
    editor.select(1);
    editor.bring_forward();
    assert_eq!(layer_of(&editor, 1), 2);
    editor.send_back();
    editor.send_back();
    assert_eq!(layer_of(&editor, 1), 0);
}

#[test]
fn reorder_changes_hit_order() {
    let mut editor = Editor::default();
    for _ in 0..3 {
        editor.add_image(small_image());
    }
    // All three images overlap at the default placement spot.
    let (x, y) = (540.0, 290.0);
    assert_eq!(editor.pointer_down(x, y), Some(2));
    editor.pointer_up();

    // Send the top element below the middle one; the middle becomes
    // top-most for hit-testing.
    editor.select(2);
    editor.send_back();
    editor.send_back();
    assert_eq!(editor.pointer_down(x, y), Some(1));
}

#[test]
fn hit_testing_honors_rotation() {
    let mut editor = Editor::default();
    let index = editor.add_text();
    editor.select(index);
    editor.set_rotation(45.0);

    // A point along the rotated long axis, inside the local box.
    let d = 100.0_f32;
    let (sin, cos) = 45.0_f32.to_radians().sin_cos();
    let hit_x = 640.0 + d * cos;
    let hit_y = 360.0 + d * sin;
    assert_eq!(editor.pointer_down(hit_x, hit_y), Some(index));
    editor.pointer_up();

    // The same offset along the canvas X axis now falls outside the
    // rotated box (local y magnitude exceeds half the height).
    assert_eq!(editor.pointer_down(640.0 + d, 360.0), None);
    assert_eq!(editor.scene().selected(), None);
}

#[test]
fn drag_keeps_grab_offset() {
    let mut editor = Editor::default();
    editor.add_image(small_image());

    // Element center is at (540, 290); grab 10px right and down of it.
    assert_eq!(editor.pointer_down(550.0, 300.0), Some(0));
    editor.pointer_move(600.0, 500.0);

    let t = &editor.scene().elements()[0].transform;
    assert!((t.x - 590.0).abs() < f32::EPSILON);
    assert!((t.y - 490.0).abs() < f32::EPSILON);

    // Release ends the drag; further movement is ignored.
    editor.pointer_up();
    assert!(!editor.is_dragging());
    editor.pointer_move(100.0, 100.0);
    let t = &editor.scene().elements()[0].transform;
    assert!((t.x - 590.0).abs() < f32::EPSILON);
}

#[test]
fn pointer_events_drive_a_full_drag() {
    let mut editor = Editor::default();
    editor.add_image(small_image());

    editor.handle_pointer(&PointerEvent::down(540.0, 290.0));
    assert!(editor.is_dragging());
    editor.handle_pointer(&PointerEvent::moved(200.0, 200.0));
    editor.handle_pointer(&PointerEvent::up(200.0, 200.0));
    assert!(!editor.is_dragging());

    let t = &editor.scene().elements()[0].transform;
    assert!((t.x - 200.0).abs() < f32::EPSILON);
    assert!((t.y - 200.0).abs() < f32::EPSILON);
}

#[test]
fn snap_clamps_each_axis_to_center() {
    let mut editor = Editor::default();
    editor.add_image(small_image());
    assert_eq!(editor.pointer_down(540.0, 290.0), Some(0));

    // Within 10px of the center column only: X snaps, Y doesn't.
    editor.pointer_move(633.0, 100.0);
    let t = &editor.scene().elements()[0].transform;
    assert!((t.x - 640.0).abs() < f32::EPSILON);
    assert!((t.y - 100.0).abs() < f32::EPSILON);

    // Near both axes: clamps exactly to the canvas center.
    editor.pointer_move(633.0, 355.0);
    let t = &editor.scene().elements()[0].transform;
    assert!((t.x - 640.0).abs() < f32::EPSILON);
    assert!((t.y - 360.0).abs() < f32::EPSILON);
}

#[test]
fn keyboard_nudges_deletes_and_cycles() {
    let mut editor = Editor::default();
    editor.add_text();
    editor.add_text();

    // No selection: keys are ignored.
    editor.handle_key(EditKey::ArrowUp);
    assert_eq!(editor.scene().len(), 2);

    editor.select(0);
    let y0 = editor.scene().elements()[0].transform.y;
    editor.handle_key(EditKey::ArrowUp);
    editor.handle_key(EditKey::ArrowLeft);
    let t = &editor.scene().elements()[0].transform;
    assert!((t.y - (y0 - 5.0)).abs() < f32::EPSILON);
    assert!((t.x - 635.0).abs() < f32::EPSILON);

    editor.handle_key(EditKey::Tab);
    assert_eq!(editor.scene().selected(), Some(1));
    editor.handle_key(EditKey::Tab);
    assert_eq!(editor.scene().selected(), Some(0));

    editor.handle_key(EditKey::Delete);
    assert_eq!(editor.scene().len(), 1);
    assert_eq!(editor.scene().selected(), None);
}

#[test]
fn style_edits_only_touch_text_elements() {
    let mut editor = Editor::default();
    editor.add_image(small_image());
    editor.select(0);

    editor.set_color("#123456");
    editor.set_rotation(30.0);
    editor.set_font_size(99.0);
    editor.set_corner_radius(8.0);

    let element = &editor.scene().elements()[0];
    assert!(element.is_image());
    assert!((element.transform.rotation).abs() < f32::EPSILON);
    assert!((element.transform.corner_radius).abs() < f32::EPSILON);
}

#[test]
fn text_style_edits_apply() {
    let mut editor = Editor::default();
    let index = editor.add_text();
    editor.select(index);

    editor.set_content("Big Title");
    editor.set_font_family("Oswald");
    editor.set_font_size(96.0);
    editor.set_color("#fdb92b");
    editor.set_stroke(true);
    editor.set_shadow(true);
    editor.set_text_background(Some("#000".to_string()));
    editor.set_rotation(-6.0);
    editor.set_corner_radius(12.0);

    let element = &editor.scene().elements()[index];
    match &element.kind {
        ElementKind::Text {
            content,
            font_family,
            font_size,
            color,
            stroke,
            shadow,
            background,
            ..
        } => {
            assert_eq!(content, "Big Title");
            assert_eq!(font_family, "Oswald");
            assert!((font_size - 96.0).abs() < f32::EPSILON);
            assert_eq!(color, "#fdb92b");
            assert!(stroke);
            assert!(shadow);
            assert_eq!(background.as_deref(), Some("#000"));
        }
        ElementKind::Image { .. } => panic!("expected text element"),
    }
    assert!((element.transform.rotation - -6.0).abs() < f32::EPSILON);
    assert!((element.transform.corner_radius - 12.0).abs() < f32::EPSILON);
}

#[test]
fn status_line_reflects_selection() {
    let mut editor = Editor::default();
    assert_eq!(editor.status_line(), None);

    let index = editor.add_text();
    editor.select(index);
    assert_eq!(
        editor.status_line().as_deref(),
        Some("X:640 Y:360 | W:300 H:80 | rot:0")
    );

    editor.add_image(small_image());
    editor.select(1);
    assert_eq!(
        editor.status_line().as_deref(),
        Some("X:540 Y:290 | W:50 H:50")
    );
}

#[test]
fn templates_replace_elements_and_clear_selection() {
    let mut editor = Editor::default();
    editor.add_text();
    editor.select(0);

    let template = builtin_template("Gaming").expect("builtin");
    editor.apply_template(&template);

    assert_eq!(editor.scene().len(), 2);
    assert_eq!(editor.scene().selected(), None);
    let layers: Vec<_> = editor
        .scene()
        .elements()
        .iter()
        .map(|e| e.transform.layer)
        .collect();
    assert_eq!(layers, vec![1, 2]);
}

#[test]
fn documents_round_trip_through_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ProjectStore::new(dir.path()).expect("store");

    let mut editor = Editor::default();
    editor.add_text();
    editor.add_image(small_image());
    editor.set_background("bg.png");
    store
        .save(DEFAULT_KEY, &editor.save_document())
        .expect("save");

    let mut restored = Editor::default();
    restored.load_document(store.load(DEFAULT_KEY).expect("load"));
    assert_eq!(restored.scene().len(), 2);
    assert_eq!(restored.scene().background.as_deref(), Some("bg.png"));
    assert_eq!(restored.scene().selected(), None);
}
