// Host-side tests for the interaction state machine, the scene controller and
// catalog selection.

use card_core::*;

fn scene() -> CardScene {
    CardScene::new(Catalog::projects(), Tuning::default())
}

#[test]
fn enter_click_leave_menu_select_sequence() {
    let mut s = scene();
    for ev in [
        InteractionEvent::PointerEnterCard,
        InteractionEvent::CardClicked,
        InteractionEvent::PointerLeaveCard,
        InteractionEvent::MenuButtonClicked,
        InteractionEvent::CatalogSelected(ContentId(2)),
    ] {
        s.dispatch(ev).expect("known ids only");
    }
    assert_eq!(
        s.interaction(),
        InteractionState {
            hovering: false,
            expanded: true,
            menu_open: false,
        }
    );
    assert_eq!(s.active_item().id, ContentId(2));
    assert_eq!(s.active_item().title, "DIGITAL FASHION");
    assert_eq!(s.selection().revision(), 1);
}

#[test]
fn card_click_toggles_expansion() {
    let mut s = scene();
    s.dispatch(InteractionEvent::CardClicked).unwrap();
    assert!(s.interaction().expanded);
    s.dispatch(InteractionEvent::CardClicked).unwrap();
    assert!(!s.interaction().expanded);
}

#[test]
fn menu_toggle_leaves_hover_and_expansion() {
    let mut s = scene();
    s.pointer_over_card(true);
    s.dispatch(InteractionEvent::CardClicked).unwrap();
    s.dispatch(InteractionEvent::MenuButtonClicked).unwrap();
    let st = s.interaction();
    assert!(st.menu_open && st.hovering && st.expanded);
    assert_eq!(menu_label(st.menu_open), "CLOSE");
    s.dispatch(InteractionEvent::MenuButtonClicked).unwrap();
    assert_eq!(menu_label(s.interaction().menu_open), "MENU");
}

#[test]
fn unknown_selection_is_rejected_without_side_effects() {
    let mut s = scene();
    s.dispatch(InteractionEvent::MenuButtonClicked).unwrap();
    let before = s.interaction();
    let err = s
        .dispatch(InteractionEvent::CatalogSelected(ContentId(99)))
        .unwrap_err();
    assert_eq!(err, SelectionError::UnknownItem(ContentId(99)));
    assert_eq!(s.interaction(), before, "menu stays open");
    assert_eq!(s.active_item().id, ContentId(1));
    assert_eq!(s.selection().revision(), 0);
}

#[test]
fn reselecting_active_item_keeps_revision() {
    let mut s = scene();
    s.dispatch(InteractionEvent::MenuButtonClicked).unwrap();
    s.dispatch(InteractionEvent::CatalogSelected(ContentId(1))).unwrap();
    assert!(!s.interaction().menu_open);
    assert_eq!(s.selection().revision(), 0);
}

#[test]
fn catalog_hover_switches_cursor_preset() {
    let mut s = scene();
    assert_eq!(s.cursor(), CursorPreset::NORMAL);
    s.dispatch(InteractionEvent::CatalogHover(true)).unwrap();
    assert_eq!(s.cursor(), CursorPreset::HIGHLIGHT);
    assert_eq!(s.interaction(), InteractionState::default());
    s.dispatch(InteractionEvent::CatalogHover(false)).unwrap();
    assert_eq!(s.cursor(), CursorPreset::NORMAL);
}

#[test]
fn hover_is_edge_triggered() {
    let mut s = scene();
    s.pointer_over_card(true);
    s.pointer_over_card(true);
    assert!(s.interaction().hovering);
    s.pointer_over_card(false);
    assert!(!s.interaction().hovering);
}

#[test]
fn selection_revision_flows_into_frame_texture() {
    let mut s = scene();
    let first = s.frame(PointerSample::default(), 0.0, 0.016).uniforms.texture;
    assert_eq!(first.content, Some(ContentId(1)));
    s.dispatch(InteractionEvent::MenuButtonClicked).unwrap();
    s.dispatch(InteractionEvent::CatalogSelected(ContentId(3))).unwrap();
    let next = s.frame(PointerSample::default(), 0.016, 0.016).uniforms.texture;
    assert_eq!(next.content, Some(ContentId(3)));
    assert!(next.revision > first.revision);
}

#[test]
fn catalog_rejects_empty_and_duplicates() {
    assert_eq!(Catalog::new(vec![]).unwrap_err(), SelectionError::EmptyCatalog);
    let dup = Catalog::new(vec![
        ContentItem::new(1, "A", "/a.png"),
        ContentItem::new(1, "B", "/b.png"),
    ]);
    assert_eq!(dup.unwrap_err(), SelectionError::DuplicateItem(ContentId(1)));
}

#[test]
fn built_in_catalog_order() {
    let c = Catalog::projects();
    let titles: Vec<&str> = c.items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        ["CONCERT SERIES", "DIGITAL FASHION", "SPACE EXPLORER"]
    );
    assert_eq!(c.first().image_ref, "/card-bg.jpg");
    assert_eq!(c.position(ContentId(3)), Some(2));
}

#[test]
fn selection_counts_only_real_changes() {
    let mut sel = Selection::new(Catalog::projects());
    assert_eq!(sel.select(ContentId(2)), Ok(true));
    assert_eq!(sel.select(ContentId(2)), Ok(false));
    assert_eq!(sel.select(ContentId(1)), Ok(true));
    assert_eq!(sel.revision(), 2);
    assert_eq!(
        sel.select(ContentId(7)),
        Err(SelectionError::UnknownItem(ContentId(7)))
    );
    assert_eq!(sel.active().id, ContentId(1));
}

#[test]
fn explicit_menu_open_close_never_touch_selection() {
    let mut s = scene();
    s.dispatch(InteractionEvent::MenuButtonClicked).unwrap();
    s.dispatch(InteractionEvent::CatalogSelected(ContentId(3))).unwrap();
    s.pointer_over_card(true);
    s.dispatch(InteractionEvent::CardClicked).unwrap();
    let revision = s.selection().revision();

    for _ in 0..3 {
        s.dispatch(InteractionEvent::OpenMenu).unwrap();
        assert!(s.interaction().menu_open);
    }
    for _ in 0..3 {
        s.dispatch(InteractionEvent::CloseMenu).unwrap();
        assert!(!s.interaction().menu_open);
    }
    assert_eq!(s.active_item().id, ContentId(3));
    assert_eq!(s.selection().revision(), revision);
    assert!(s.interaction().hovering && s.interaction().expanded);
}

#[test]
fn closed_menu_ignores_any_catalog_id() {
    let mut s = scene();
    assert_eq!(
        s.dispatch(InteractionEvent::CatalogSelected(ContentId(99))),
        Ok(())
    );
    assert_eq!(
        s.dispatch(InteractionEvent::CatalogSelected(ContentId(2))),
        Ok(())
    );
    assert_eq!(s.interaction(), InteractionState::default());
    assert_eq!(s.active_item().id, ContentId(1));
    assert_eq!(s.selection().revision(), 0);
}
