use super::*;
use crate::{foundation::core::Viewport, page::memory::MemoryPage};

fn page() -> MemoryPage {
    MemoryPage::new(Viewport::new(800.0, 600.0))
}

#[test]
fn acquire_is_idempotent_while_held() {
    let mut page = page();
    let mut lock = ScrollLock::new();
    assert!(lock.acquire(LockReason::Loading, Millis(0), &mut page));
    assert!(!lock.acquire(LockReason::Expansion, Millis(5), &mut page));
    assert_eq!(lock.token().map(|t| t.reason), Some(LockReason::Loading));
    assert_eq!(lock.acquisitions(), 1);
    assert_eq!(page.suppress_writes(), 1);
    assert!(page.is_scroll_suppressed());
}

#[test]
fn release_clears_exactly_once() {
    let mut page = page();
    let mut lock = ScrollLock::new();
    lock.acquire(LockReason::Expansion, Millis(3), &mut page);
    let token = lock.release(&mut page).unwrap();
    assert_eq!(token.acquired_at, Millis(3));
    assert!(lock.release(&mut page).is_none());
    assert_eq!(lock.releases(), 1);
    assert_eq!(page.suppress_writes(), 2);
    assert!(!page.is_scroll_suppressed());
}

#[test]
fn reacquire_after_release_is_a_new_token() {
    let mut page = page();
    let mut lock = ScrollLock::new();
    lock.acquire(LockReason::Loading, Millis(0), &mut page);
    lock.release(&mut page);
    assert!(lock.acquire(LockReason::Expansion, Millis(10), &mut page));
    assert_eq!(lock.acquisitions(), 2);
    assert!(lock.is_held());
}
