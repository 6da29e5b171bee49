use super::*;

#[test]
fn re_adding_a_kind_replaces_the_registration() {
    let mut l = Listeners::new();
    let first = l.add(Owner::Expansion, EventKind::Scroll);
    let second = l.add(Owner::Expansion, EventKind::Scroll);
    assert_ne!(first, second);
    assert_eq!(l.count(EventKind::Scroll), 1);
    assert!(!l.remove(first));
    assert!(l.remove(second));
    assert!(l.is_empty());
}

#[test]
fn replace_owner_never_accumulates() {
    let mut l = Listeners::new();
    l.add(Owner::Viewport, EventKind::Resize);
    for _ in 0..10 {
        l.replace_owner(
            Owner::Expansion,
            &[EventKind::Scroll, EventKind::Wheel, EventKind::TouchMove],
        );
    }
    assert_eq!(l.count_owner(Owner::Expansion), 3);
    assert_eq!(l.count(EventKind::Resize), 1);
    assert_eq!(l.len(), 4);
}

#[test]
fn owners_are_reported_in_registration_order() {
    let mut l = Listeners::new();
    l.add(Owner::Dismissal, EventKind::Wheel);
    l.add(Owner::Expansion, EventKind::Wheel);
    l.add(Owner::Viewport, EventKind::Resize);
    assert_eq!(
        l.owners_for(EventKind::Wheel),
        vec![Owner::Dismissal, Owner::Expansion]
    );
    assert!(l.is_listening(Owner::Viewport, EventKind::Resize));
}

#[test]
fn remove_owner_only_touches_that_owner() {
    let mut l = Listeners::new();
    l.add(Owner::Dismissal, EventKind::KeyDown);
    l.add(Owner::Dismissal, EventKind::Click);
    l.add(Owner::Hint, EventKind::PointerDown);
    assert_eq!(l.remove_owner(Owner::Dismissal), 2);
    assert_eq!(l.remove_owner(Owner::Dismissal), 0);
    assert_eq!(l.owners_for(EventKind::PointerDown), vec![Owner::Hint]);
}
