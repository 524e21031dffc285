use uploader_core::{
    mount_headless, BatchOutcome, CandidateFile, DispatchOutcome, DragEventKind, MemoryInput,
    MemoryPreviewBackend, MemorySurface, NativeInput, RawHandle, Uploader, UploaderConfig,
    UploaderError, UploaderIntent,
};

fn image(name: &str, handle: u64) -> CandidateFile {
    CandidateFile::new(name, 1024, "image/jpeg", RawHandle(handle))
}

fn config_with_strict(strict: bool) -> UploaderConfig {
    let mut config = UploaderConfig::default();
    config.sync.strict = strict;
    config
}

#[test]
fn test_listeners_follow_mount_and_unmount() {
    let input = MemoryInput::new();
    let surface = MemorySurface::new();
    let previews = MemoryPreviewBackend::new();

    for _ in 0..3 {
        let mut uploader = Uploader::mount(
            UploaderConfig::default(),
            Box::new(input.clone()),
            Box::new(surface.clone()),
            Box::new(previews.clone()),
        )
        .unwrap();
        assert_eq!(surface.listener_count(), 4);
        for kind in DragEventKind::ALL {
            assert_eq!(surface.listeners_for(kind), 1);
        }

        uploader.unmount();
        assert_eq!(surface.listener_count(), 0);
    }
}

#[test]
fn test_drop_of_mounted_uploader_cleans_up() {
    let (mut uploader, _input, surface, previews) = mount_headless(UploaderConfig::default()).unwrap();
    uploader
        .dispatch(UploaderIntent::Pick { files: vec![image("a.jpg", 1)] })
        .unwrap();
    uploader.view();
    assert_eq!(previews.live_count(), 1);

    drop(uploader);

    assert_eq!(surface.listener_count(), 0);
    assert_eq!(previews.live_count(), 0);
}

#[test]
fn test_dispatch_after_unmount_fails() {
    let (mut uploader, _input, _surface, _previews) = mount_headless(UploaderConfig::default()).unwrap();
    uploader.unmount();
    uploader.unmount();

    let result = uploader.dispatch(UploaderIntent::Reset);

    assert!(matches!(result, Err(UploaderError::NotMounted)));
    assert!(!uploader.is_mounted());
}

#[test]
fn test_preview_released_once_after_load() {
    let (mut uploader, _input, _surface, previews) = mount_headless(UploaderConfig::default()).unwrap();
    uploader
        .dispatch(UploaderIntent::Pick { files: vec![image("a.jpg", 1), image("b.jpg", 2)] })
        .unwrap();

    let view = uploader.view();
    let handle = view.items[0].preview.clone().expect("preview handle");
    assert_eq!(previews.live_count(), 2);

    // a re-render before load reuses the handle
    let again = uploader.view();
    assert_eq!(again.items[0].preview.as_ref(), Some(&handle));
    assert_eq!(previews.created(), 2);

    let first = uploader
        .dispatch(UploaderIntent::PreviewLoaded { handle: handle.clone() })
        .unwrap();
    let second = uploader
        .dispatch(UploaderIntent::PreviewLoaded { handle })
        .unwrap();

    assert_eq!(first, DispatchOutcome::PreviewReleased { released: true });
    assert_eq!(second, DispatchOutcome::PreviewReleased { released: false });
    assert_eq!(previews.revoked(), 1);

    let after = uploader.view();
    assert!(after.items[0].preview.is_none());
    assert!(after.items[1].preview.is_some());
    assert_eq!(previews.created(), 2);
}

#[test]
fn test_delete_releases_unloaded_preview() {
    let (mut uploader, _input, _surface, previews) = mount_headless(UploaderConfig::default()).unwrap();
    uploader
        .dispatch(UploaderIntent::Pick { files: vec![image("a.jpg", 1)] })
        .unwrap();
    let key = uploader.view().items[0].key;

    uploader.dispatch(UploaderIntent::Delete { key }).unwrap();

    assert_eq!(previews.live_count(), 0);
    assert_eq!(uploader.previews().live_count(), 0);
}

#[test]
fn test_reset_releases_previews() {
    let (mut uploader, _input, _surface, previews) = mount_headless(UploaderConfig::default()).unwrap();
    uploader
        .dispatch(UploaderIntent::Pick { files: vec![image("a.jpg", 1), image("b.jpg", 2)] })
        .unwrap();
    uploader.view();

    uploader.dispatch(UploaderIntent::Reset).unwrap();

    assert_eq!(previews.live_count(), 0);
}

#[test]
fn test_strict_sync_failure_is_reported() {
    let (mut uploader, input, _surface, _previews) = mount_headless(config_with_strict(true)).unwrap();
    input.detach();

    let result = uploader.dispatch(UploaderIntent::Pick { files: vec![image("a.jpg", 1)] });

    match result {
        Err(err) => assert!(err.is_sync_failure()),
        Ok(outcome) => panic!("expected sync failure, got {:?}", outcome),
    }
}

#[test]
fn test_strict_sync_failure_keeps_working_set() {
    let (mut uploader, input, _surface, previews) = mount_headless(config_with_strict(true)).unwrap();
    uploader
        .dispatch(UploaderIntent::Pick { files: vec![image("a.jpg", 1)] })
        .unwrap();
    uploader.view();
    let before = uploader.manager().working_set().clone();
    let key = before.keys()[0];
    input.detach();

    assert!(uploader
        .dispatch(UploaderIntent::Pick { files: vec![image("b.jpg", 2)] })
        .is_err());
    assert!(uploader.manager().working_set().same_as(&before));

    assert!(uploader.dispatch(UploaderIntent::Delete { key }).is_err());
    assert!(uploader.dispatch(UploaderIntent::Reset).is_err());
    assert!(uploader.manager().working_set().same_as(&before));
    assert_eq!(previews.live_count(), 1);

    let view = uploader.view();
    assert_eq!(view.items.len(), 1);
    assert_eq!(input.files(), vec![RawHandle(1)]);
}

#[test]
fn test_lenient_sync_failure_is_skipped() {
    let (mut uploader, input, _surface, _previews) = mount_headless(config_with_strict(false)).unwrap();
    input.detach();

    let outcome = uploader
        .dispatch(UploaderIntent::Pick { files: vec![image("a.jpg", 1)] })
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Batch(BatchOutcome::Accepted { added: 1 }));
    assert_eq!(input.file_count(), 0);
}

#[test]
fn test_mount_rejects_bad_accept_range() {
    let mut config = UploaderConfig::default();
    config.picker.accept = "pictures".to_string();

    let result = mount_headless(config);

    assert!(matches!(result, Err(UploaderError::InvalidAcceptRange(_))));
}

#[test]
fn test_exact_accept_range_limits_batches() {
    let mut config = UploaderConfig::default();
    config.picker.accept = "image/png".to_string();
    let (mut uploader, _input, _surface, _previews) = mount_headless(config).unwrap();

    let outcome = uploader
        .dispatch(UploaderIntent::Pick { files: vec![image("a.jpg", 1)] })
        .unwrap();

    assert!(matches!(outcome, DispatchOutcome::Batch(BatchOutcome::Rejected(_))));
    assert_eq!(uploader.view().picker.accept, "image/png");
}

#[test]
fn test_intents_from_json() {
    let (mut uploader, input, _surface, _previews) = mount_headless(UploaderConfig::default()).unwrap();
    let script = r#"[
        {"type": "DragEnter", "data": {"has_files": true}},
        {"type": "DragOver"},
        {"type": "Drop", "data": {"files": [
            {"name": "a.png", "size_bytes": 10, "media_type": "image/png",
             "last_modified": "2024-05-01T12:00:00Z", "raw_handle": 11}
        ]}},
        {"type": "DismissRejection"}
    ]"#;

    let intents: Vec<UploaderIntent> = serde_json::from_str(script).unwrap();
    for intent in intents {
        uploader.dispatch(intent).unwrap();
    }

    let view = uploader.view();
    assert_eq!(view.items.len(), 1);
    assert!(!view.hovering);
    assert_eq!(input.file_count(), 1);

    let json = view.to_json().unwrap();
    assert!(json.contains("\"size_label\": \"0.0MB\""));
}
