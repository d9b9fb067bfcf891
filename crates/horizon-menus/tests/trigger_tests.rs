//! Context-menu triggering through realized popups.

use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use horizon_menus::{
    Action, Conventions, HeadlessToolkit, KeyboardModifiers, MenuItemDescriptor, MouseButton,
    Offset, Platform, Point, PointerEvent, PointerPhase, PopupTriggerPhase, SourceGeometry,
    WidgetId, activate_popup_item, attach_popup, context_menu, new_popup_menu, realize,
};
use parking_lot::Mutex;

fn copy_item(toolkit: &HeadlessToolkit, hits: &Arc<Mutex<usize>>) -> horizon_menus::Widget {
    let hits = hits.clone();
    let desc = MenuItemDescriptor::builder()
        .text("Copy")
        .action(Action::new(move |_| *hits.lock() += 1))
        .build()
        .unwrap();
    realize(toolkit, &desc).unwrap()
}

#[test]
fn test_gesture_shows_popup_once() {
    let toolkit = HeadlessToolkit::new();
    let hits = Arc::new(Mutex::new(0));
    let source = Arc::new(SourceGeometry::new(WidgetId::next(), Offset::new(300.0, 200.0)));
    let items = vec![copy_item(&toolkit, &hits)];
    let detector = context_menu(&toolkit, "Canvas", source, items).unwrap();
    let conventions = Conventions::for_platform(Platform::Windows);

    let at = Point::new(12.0, 8.0);
    let press = PointerEvent::from_conventions(
        &conventions,
        MouseButton::Right,
        PointerPhase::Press,
        at,
        KeyboardModifiers::NONE,
    );
    let release = PointerEvent::from_conventions(
        &conventions,
        MouseButton::Right,
        PointerPhase::Release,
        at,
        KeyboardModifiers::NONE,
    );

    let shows = Arc::new(Mutex::new(Vec::new()));
    let shows_clone = shows.clone();
    detector.popup().lock().shown.connect(move |pos| shows_clone.lock().push(*pos));

    assert!(!detector.mouse_pressed(&press));
    assert!(detector.mouse_released(&release));
    assert_eq!(*shows.lock(), vec![Point::new(312.0, 208.0)]);

    assert!(activate_popup_item(detector.popup(), "Copy"));
    assert!(!detector.popup().lock().is_visible());
    assert_eq!(*hits.lock(), 1);
}

#[test]
fn test_left_click_never_triggers_on_linux() {
    let toolkit = HeadlessToolkit::new();
    let source = SourceGeometry::new(WidgetId::next(), Offset::ZERO);
    let detector = context_menu(&toolkit, "List", source, Vec::new()).unwrap();
    let conventions = Conventions::for_platform(Platform::Linux);

    for phase in [PointerPhase::Press, PointerPhase::Release] {
        let event = PointerEvent::from_conventions(
            &conventions,
            MouseButton::Left,
            phase,
            Point::new(1.0, 1.0),
            KeyboardModifiers::CTRL,
        );
        assert!(!detector.handle(&event));
    }
    assert!(!detector.popup().lock().is_visible());
}

#[test]
fn test_conventions_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.toml");
    std::fs::write(
        &path,
        "platform = \"linux\"\npopup_trigger_phase = \"release\"\n",
    )
    .unwrap();

    let conventions = Conventions::load(&path).unwrap();
    assert_eq!(conventions.popup_trigger_phase, PopupTriggerPhase::Release);

    let toolkit = HeadlessToolkit::new();
    let detector = context_menu(
        &toolkit,
        "Tree",
        SourceGeometry::new(WidgetId::next(), Offset::new(1.0, 1.0)),
        Vec::new(),
    )
    .unwrap();
    let press = PointerEvent::from_conventions(
        &conventions,
        MouseButton::Right,
        PointerPhase::Press,
        Point::ZERO,
        KeyboardModifiers::NONE,
    );
    assert!(!detector.handle(&press));
}

#[test]
fn test_callbacks_can_lock_shared_popup() {
    let toolkit = HeadlessToolkit::new();
    let popup = Arc::new(Mutex::new(new_popup_menu(&toolkit, "Canvas", Vec::new()).unwrap()));
    let (tx, rx) = mpsc::channel();

    let shown_popup = Arc::clone(&popup);
    let shown_tx = tx.clone();
    popup.lock().shown.connect(move |_| {
        let visible = shown_popup.lock().is_visible();
        shown_tx.send(format!("shown:{visible}")).unwrap();
    });

    let action_popup = Arc::clone(&popup);
    let desc = MenuItemDescriptor::builder()
        .text("Dismiss")
        .action(Action::new(move |event| {
            let mut popup = action_popup.lock();
            popup.hide();
            tx.send(format!("action:{}", event.command)).unwrap();
        }))
        .build()
        .unwrap();
    popup.lock().add_item(realize(&toolkit, &desc).unwrap());

    let source = SourceGeometry::new(WidgetId::next(), Offset::new(5.0, 5.0));
    let detector = attach_popup(Arc::clone(&popup), source);
    let worker = thread::spawn(move || {
        let event = PointerEvent::new(MouseButton::Right, PointerPhase::Press, Point::ZERO)
            .with_popup_trigger(true);
        let shown = detector.handle(&event);
        let activated = activate_popup_item(detector.popup(), "Dismiss");
        (shown, activated)
    });

    let timeout = Duration::from_secs(3);
    assert_eq!(rx.recv_timeout(timeout).unwrap(), "shown:true");
    assert_eq!(rx.recv_timeout(timeout).unwrap(), "action:Dismiss");
    assert_eq!(worker.join().unwrap(), (true, true));
    assert!(!popup.lock().is_visible());
}
