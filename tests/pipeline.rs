use copy_all_chat::capture::{ClipboardBridge, HostClipboard};
use copy_all_chat::collect::{ClickCapture, GeminiClassifier, TurnCollector};
use copy_all_chat::copy_all::{CopyAll, CopyOutcome};
use copy_all_chat::feedback::{Feedback, Notice};
use copy_all_chat::host::simulated::{MemoryClipboard, PageFixture, SimulatedPage};
use copy_all_chat::toolbar;
use copy_all_chat::writer::{ClipboardWriter, HostAsyncStrategy};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_millis(1800);

#[derive(Default)]
struct Notices(Mutex<Vec<Notice>>);

impl Feedback for Notices {
    fn notify(&self, notice: &Notice) {
        self.0.lock().unwrap().push(notice.clone());
    }
}

fn build(fixture: PageFixture, clipboard: Arc<MemoryClipboard>, notices: Arc<Notices>) -> CopyAll {
    let host: Arc<dyn HostClipboard> = clipboard;
    let bridge = Arc::new(ClipboardBridge::new(host));
    let page = Arc::new(SimulatedPage::new(bridge.clone(), fixture.copies));
    let trigger = Arc::new(ClickCapture::new(bridge.clone(), page, TIMEOUT));
    let collector = TurnCollector::new(Arc::new(GeminiClassifier), trigger);
    let writer = ClipboardWriter::new(vec![Box::new(HostAsyncStrategy::new(bridge.clone()))]);
    CopyAll::new(bridge, collector, writer, notices)
}

fn demo_fixture() -> PageFixture {
    PageFixture::parse(include_str!("../demos/conversation.json")).unwrap()
}

#[tokio::test(start_paused = true)]
async fn copies_demo_conversation() {
    let fixture = demo_fixture();
    let mut document = fixture.document.clone();
    assert!(toolbar::ensure_button(&mut document).is_some());
    let geometry = fixture.toolbar.expect("demo has toolbar geometry");
    let anchor = toolbar::position_button(&mut document, geometry).unwrap();
    assert_eq!((anchor.left, anchor.top), (888.0, 12.0));

    let clipboard = Arc::new(MemoryClipboard::new());
    let notices = Arc::new(Notices::default());
    let copy_all = build(fixture, clipboard.clone(), notices.clone());

    let started = tokio::time::Instant::now();
    let outcome = copy_all.run(&document).await;
    let elapsed = started.elapsed();

    let expected = [
        "「用户」\nWhat is a borrow checker?",
        "「助手」\nIt **checks** references at compile time.",
        "「用户」\nThanks!",
        "「助手」\n",
    ]
    .join("\n\n========\n\n");

    let CopyOutcome::Copied { payload, .. } = outcome else {
        panic!("expected a copy, got {:?}", outcome);
    };
    assert_eq!(payload.as_str(), expected);
    assert_eq!(payload.blocks().len(), 4);
    assert_eq!(clipboard.contents().as_deref(), Some(expected.as_str()));
    assert_eq!(*notices.0.lock().unwrap(), vec![Notice::Copied]);

    // Only the silent button costs a full timeout
    assert!(elapsed >= TIMEOUT);
    assert!(elapsed < TIMEOUT + Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn turn_order_ignores_capture_latency() {
    let json = r#"{
        "document": {"id": 1, "tag": "html", "children": [
            {"id": 10, "tag": "user-query", "children": [{"id": 11, "tag": "button", "attrs": {"aria-label": "复制提示"}}]},
            {"id": 20, "tag": "model-response", "children": [{"id": 21, "tag": "button", "attrs": {"data-test-id": "copy-button"}}]},
            {"id": 30, "tag": "user-query", "children": [{"id": 31, "tag": "button", "attrs": {"aria-label": "复制提示"}}]}
        ]},
        "copies": [
            {"control": 11, "delay_ms": 1700, "action": {"via": "write_text", "text": "1"}},
            {"control": 21, "delay_ms": 1, "action": {"via": "write_text", "text": "2"}},
            {"control": 31, "delay_ms": 900, "action": {"via": "write_text", "text": "3"}}
        ]
    }"#;
    let fixture = PageFixture::parse(json).unwrap();
    let document = fixture.document.clone();
    let clipboard = Arc::new(MemoryClipboard::new());
    let copy_all = build(fixture, clipboard.clone(), Arc::new(Notices::default()));

    copy_all.run(&document).await;

    assert_eq!(
        clipboard.contents().as_deref(),
        Some("「用户」\n1\n\n========\n\n「助手」\n2\n\n========\n\n「用户」\n3")
    );
}

#[tokio::test(start_paused = true)]
async fn missing_formats_and_buttons_leave_empty_blocks() {
    let json = r#"{
        "document": {"id": 1, "tag": "html", "children": [
            {"id": 10, "tag": "user-query"},
            {"id": 20, "tag": "model-response", "children": [{"id": 21, "tag": "button", "attrs": {"data-test-id": "copy-button"}}]}
        ]},
        "copies": [
            {"control": 21, "action": {"via": "write", "items": [[["image/png", "..."]]]}}
        ]
    }"#;
    let fixture = PageFixture::parse(json).unwrap();
    let document = fixture.document.clone();
    let clipboard = Arc::new(MemoryClipboard::new());
    let copy_all = build(fixture, clipboard.clone(), Arc::new(Notices::default()));

    let started = tokio::time::Instant::now();
    copy_all.run(&document).await;

    assert_eq!(
        clipboard.contents().as_deref(),
        Some("「用户」\n\n\n========\n\n「助手」\n")
    );
    // Neither turn waited for a timeout
    assert!(started.elapsed() < TIMEOUT);
}

#[tokio::test]
async fn empty_page_only_notifies() {
    let fixture = PageFixture::parse(r#"{"document": {"id": 1, "tag": "html"}}"#).unwrap();
    let document = fixture.document.clone();
    let clipboard = Arc::new(MemoryClipboard::new());
    let notices = Arc::new(Notices::default());
    let copy_all = build(fixture, clipboard.clone(), notices.clone());

    assert_eq!(copy_all.run(&document).await, CopyOutcome::NoConversation);
    assert_eq!(clipboard.contents(), None);
    assert_eq!(notices.0.lock().unwrap()[0].to_string(), "没找到对话内容");
}
