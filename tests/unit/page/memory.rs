use super::*;
use crate::config::model::FrameBounds;

#[test]
fn new_page_mounts_everything() {
    let page = MemoryPage::new(Viewport::new(800.0, 600.0));
    for element in Element::ALL {
        assert!(page.is_mounted(element));
    }
}

#[test]
fn fades_on_unmounted_elements_are_dropped() {
    let mut page = MemoryPage::new(Viewport::new(800.0, 600.0)).without(Element::Curtain);
    page.fade(Element::Curtain, Fade::out(100));
    page.fade(Element::LoadingOverlay, Fade::out(100));
    assert_eq!(page.fades_of(Element::Curtain), 0);
    assert_eq!(page.opacity(Element::LoadingOverlay), Some(0.0));
}

#[test]
fn user_scroll_is_not_a_controller_write() {
    let mut page = MemoryPage::new(Viewport::new(800.0, 600.0));
    page.user_scroll(120.0);
    assert_eq!(page.scroll_offset(), 120.0);
    assert_eq!(page.scroll_writes(), 0);
    page.scroll_to(0.0);
    assert_eq!(page.scroll_writes(), 1);
}

#[test]
fn applied_frame_tracks_rect_and_indicator() {
    let mut page = MemoryPage::new(Viewport::new(1000.0, 500.0));
    let style = FrameStyle::minimum(&FrameBounds::default());
    page.apply_frame(&style);
    assert_eq!(page.frame(), Some(style));
    assert_eq!(page.frame_rect().map(|r| r.width()), Some(200.0));
    assert_eq!(page.opacity(Element::ScrollIndicator), Some(1.0));
}
