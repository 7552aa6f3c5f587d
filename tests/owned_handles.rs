use alx_event::ffi::{AllegroDisplay, AllegroTimer};
use alx_event::hooks::{self, NativeHooks};
use alx_event::{Display, Event, EventSource, RawEvent, Timer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

static DISPLAYS_DESTROYED: AtomicUsize = AtomicUsize::new(0);
static TIMERS_DESTROYED: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn destroy_display(_display: *mut AllegroDisplay) {
    DISPLAYS_DESTROYED.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn destroy_timer(_timer: *mut AllegroTimer) {
    TIMERS_DESTROYED.fetch_add(1, Ordering::SeqCst);
}

fn setup() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        hooks::install(NativeHooks {
            destroy_display: Some(destroy_display),
            destroy_timer: Some(destroy_timer),
            ..NativeHooks::default()
        })
        .unwrap();
    });
}

fn fake<T>(addr: usize) -> *mut T {
    addr as *mut T
}

#[test]
fn owned_and_borrowed_handles() {
    setup();

    // Accessor handles are non-owning: dropping them destroys nothing.
    let ev = Event::from_builtin(RawEvent::timer(fake(0x10), 0.0, 1, 0.0)).unwrap();
    drop(ev.timer());
    drop(ev.display());
    assert_eq!(TIMERS_DESTROYED.load(Ordering::SeqCst), 0);
    assert_eq!(DISPLAYS_DESTROYED.load(Ordering::SeqCst), 0);

    // Owned handles destroy once; relinquished ones not at all.
    drop(unsafe { Display::from_raw_owned(fake(0x20)) });
    assert_eq!(DISPLAYS_DESTROYED.load(Ordering::SeqCst), 1);

    let timer = unsafe { Timer::new(fake(0x30), true) };
    let raw = timer.into_raw();
    assert_eq!(raw, fake(0x30));
    assert_eq!(TIMERS_DESTROYED.load(Ordering::SeqCst), 0);

    drop(unsafe { Timer::from_raw_owned(raw) });
    assert_eq!(TIMERS_DESTROYED.load(Ordering::SeqCst), 1);

    // Null owned handles and kinds without a hook are skipped.
    drop(unsafe { Display::from_raw_owned(std::ptr::null_mut()) });
    drop(unsafe { EventSource::from_raw_owned(fake(0x40)) });
    assert_eq!(DISPLAYS_DESTROYED.load(Ordering::SeqCst), 1);
}

#[test]
fn install_twice_fails() {
    setup();
    assert!(matches!(
        hooks::install(NativeHooks::default()),
        Err(alx_event::Error::HooksAlreadyInstalled)
    ));
}
