use alx_event::event_type::{self, fourcc, USER_EVENT_TYPE_BASE};
use alx_event::ffi::{RawUserEvent, UserEventDescriptor};
use alx_event::{Event, EventKind, EventType, RawEvent};
use approx::assert_relative_eq;
use std::ptr::null_mut;
use std::sync::atomic::{AtomicUsize, Ordering};

fn fake<T>(addr: usize) -> *mut T {
    addr as *mut T
}

fn refcount(descr: *mut UserEventDescriptor) -> i32 {
    unsafe { (*descr).refcount.load(Ordering::SeqCst) }
}

#[test]
fn timer_scenario() {
    let ev = Event::from_builtin(RawEvent::timer(fake(0x100), 12.5, 42, 0.5)).unwrap();

    assert_eq!(ev.event_type(), event_type::TIMER);
    assert_eq!(ev.timer_count(), 42);
    assert_relative_eq!(ev.timer_error(), 0.5);
    assert_relative_eq!(ev.timestamp(), 12.5);
    assert!(!ev.is_user_event());

    let timer = ev.timer();
    assert_eq!(timer.raw(), fake(0x100));
    assert!(!timer.is_owned());
    assert_eq!(ev.kind(), EventKind::Timer { count: 42, error: 0.5 });
}

#[test]
fn user_scenario_releases_exactly_once() {
    // Extra references stand in for copies held by other queues; the count shows
    // precisely how many releases happened.
    let descr = UserEventDescriptor::allocate(None, 3);
    let raw = RawEvent::user(USER_EVENT_TYPE_BASE + 1, fake(0x200), 0.0, descr, [1, 2, 3, 4]);

    {
        let ev = unsafe { Event::from_raw(raw) };
        assert!(ev.is_user_event());
        assert_eq!(
            [ev.user_data1(), ev.user_data2(), ev.user_data3(), ev.user_data4()],
            [1, 2, 3, 4]
        );
        assert_eq!(ev.source().raw(), fake(0x200));
        assert_eq!(refcount(descr), 3);
    }
    assert_eq!(refcount(descr), 2);

    // Drain the remaining references so the descriptor is freed.
    drop(unsafe { Event::from_raw(raw) });
    drop(unsafe { Event::from_raw(raw) });
}

#[test]
fn builtin_events_never_release() {
    // A descriptor pointer in the user slot of a non-user event must be left alone.
    let descr = UserEventDescriptor::allocate(None, 1);
    let mut raw = RawEvent::user(event_type::KEY_DOWN, null_mut(), 0.0, descr, [0; 4]);

    for t in [event_type::NONE, event_type::KEY_DOWN, event_type::DISPLAY_CLOSE, 511] {
        raw.type_ = t;
        let ev = Event::from_builtin(raw).unwrap();
        let copy = ev.clone();
        drop(ev);
        drop(copy);
        assert_eq!(refcount(descr), 1, "tag {t} touched the payload");
    }

    raw.type_ = USER_EVENT_TYPE_BASE;
    drop(unsafe { Event::from_raw(raw) });
}

static PAYLOAD_FREED: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn free_payload(event: *mut RawUserEvent) {
    drop(Box::from_raw((*event).data1 as *mut String));
    PAYLOAD_FREED.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn clones_share_the_payload() {
    let payload = Box::into_raw(Box::new(String::from("level loaded"))) as isize;
    let descr = UserEventDescriptor::allocate(Some(free_payload), 1);
    let raw = RawEvent::user(fourcc(*b"LVL1"), null_mut(), 0.0, descr, [payload, 0, 0, 0]);
    let ev = unsafe { Event::from_raw(raw) };

    let copy = ev.clone();
    assert_eq!(refcount(descr), 2);
    assert_eq!(unsafe { &*(copy.user_data1() as *const String) }, "level loaded");

    drop(ev);
    assert_eq!(PAYLOAD_FREED.load(Ordering::SeqCst), 0);
    drop(copy);
    assert_eq!(PAYLOAD_FREED.load(Ordering::SeqCst), 1);
}

#[test]
fn copies_release_on_other_threads() {
    let descr = UserEventDescriptor::allocate(None, 1);
    let raw = RawEvent::user(USER_EVENT_TYPE_BASE, null_mut(), 0.0, descr, [0; 4]);
    let ev = unsafe { Event::from_raw(raw) };

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let copy = ev.clone();
            std::thread::spawn(move || drop(copy))
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }
    assert_eq!(refcount(descr), 1);
    drop(ev);
}

#[test]
fn joystick_handles_point_at_stored_objects() {
    let raw = RawEvent::joystick(
        event_type::JOYSTICK_BUTTON_DOWN,
        fake(0x300),
        0.0,
        fake(0x310),
        0,
        0,
        0.0,
        5,
    );
    let ev = Event::from_builtin(raw).unwrap();
    assert_eq!(ev.builtin_type(), Some(EventType::JoystickButtonDown));
    assert_eq!(ev.joystick().raw(), fake(0x300));
    assert_eq!(ev.joystick_id().raw(), fake(0x310));
    assert!(!ev.joystick().is_owned());
    assert!(!ev.joystick_id().is_owned());
    assert_eq!(ev.joystick_button(), 5);
    assert_eq!(ev.joystick_stick(), 0);
    assert_eq!(ev.joystick_axis(), 0);
    assert_relative_eq!(ev.joystick_pos(), 0.0);
}

#[test]
fn roundtrip_preserves_float_bits() {
    let ev = Event::from_builtin(RawEvent::timer(null_mut(), f64::MIN_POSITIVE, i64::MIN, -0.0)).unwrap();
    assert_eq!(ev.timer_count(), i64::MIN);
    assert_eq!(ev.timer_error().to_bits(), (-0.0f64).to_bits());
    assert_eq!(ev.timestamp().to_bits(), f64::MIN_POSITIVE.to_bits());
}

#[test]
fn user_records_are_not_adopted_by_safe_code() {
    // A bogus descriptor address: the safe constructor must refuse before anything
    // could release through it.
    let raw = RawEvent::user(USER_EVENT_TYPE_BASE, null_mut(), 0.0, fake(0x10), [0; 4]);
    assert!(Event::from_builtin(raw).is_none());
}
