//! Tray binding against real image files.

use std::collections::BTreeMap;
use std::sync::Arc;

use horizon_menus::{
    Action, ActionEvent, FileImageLoader, HeadlessToolkit, ImageLoadError, MenuEntry, MenuError,
    activate_popup_item, bind_tray, popup_from_entries,
};
use parking_lot::Mutex;

fn write_png(dir: &tempfile::TempDir, name: &str, size: u32) -> std::path::PathBuf {
    let path = dir.path().join(name);
    image::RgbaImage::from_pixel(size, size, image::Rgba([0, 128, 255, 255]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn test_bind_tray_from_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir, "tray.png", 22);
    let toolkit = HeadlessToolkit::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let handler = |name: &'static str| {
        let log = log.clone();
        Action::new(move |event: &ActionEvent| log.lock().push(format!("{name}:{}", event.command)))
    };
    let mut actions = BTreeMap::new();
    actions.insert("open", handler("h1"));
    actions.insert("exit", handler("h2"));

    let popup = Arc::new(Mutex::new(popup_from_entries(&toolkit, &[]).unwrap()));
    let mut tray = bind_tray(&toolkit, FileImageLoader, &path, "Horizon", popup, actions).unwrap();

    assert_eq!(tray.image().width(), 22);
    assert_eq!(tray.tooltip(), "Horizon");
    assert_eq!(tray.listener_count(), 2);

    tray.activate_command("open");
    assert_eq!(*log.lock(), vec!["h1:open".to_string()]);

    tray.activate_command("exit");
    assert_eq!(*log.lock(), vec!["h1:open".to_string(), "h2:exit".to_string()]);
}

#[test]
fn test_missing_image_is_image_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let toolkit = HeadlessToolkit::new();
    let popup = Arc::new(Mutex::new(popup_from_entries(&toolkit, &[]).unwrap()));

    let err = bind_tray(
        &toolkit,
        FileImageLoader,
        dir.path().join("absent.png"),
        "Horizon",
        popup,
        Vec::<(String, Action)>::new(),
    )
    .unwrap_err();

    match err {
        MenuError::ImageLoad { path, source } => {
            assert!(path.ends_with("absent.png"));
            assert!(matches!(source, ImageLoadError::Decode(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_tray_popup_routes_commands() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir, "tray.png", 16);
    let toolkit = HeadlessToolkit::new();
    let hits = Arc::new(Mutex::new(Vec::new()));
    let entry = |label: &str, command: &str| {
        let hits = hits.clone();
        MenuEntry::new(
            label,
            command,
            Action::new(move |event: &ActionEvent| hits.lock().push(event.command.clone())),
        )
    };

    let popup = popup_from_entries(&toolkit, &[entry("Show Window", "show"), entry("Quit", "quit")])
        .unwrap();
    let tray = bind_tray(
        &toolkit,
        FileImageLoader,
        &path,
        "Horizon",
        Arc::new(Mutex::new(popup)),
        Vec::<(String, Action)>::new(),
    )
    .unwrap();

    assert!(activate_popup_item(tray.popup(), "quit"));
    assert_eq!(*hits.lock(), vec!["quit".to_string()]);
}
