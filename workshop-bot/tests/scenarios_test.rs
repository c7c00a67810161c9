//! End-to-end workshop scenarios: the full command set dispatched against a recording transport
//! and an in-memory store.

use std::sync::Arc;

use chatbot_core::store::{get_as, put_as};
use chatbot_core::testing::{group_chat, private_chat, test_user, text_update, RecordingTransport, Sent};
use chatbot_core::{
    PhotoSize, Update, User, ACCESS_DENIED_MESSAGE, ADMINS, APOLOGY_MESSAGE, COUNTERS,
};
use dispatcher::{DispatchOutcome, Dispatcher};
use storage::InMemoryStore;
use workshop_bot::config::{BaseConfig, BotConfig, WorkshopConfig, DEFAULT_LOGO_URL};
use workshop_bot::build_dispatcher;

const CREATOR_ID: i64 = 123456789;
const NO_ANSWER: &str = "Sorry, I have no answer for you today.";

struct Harness {
    transport: Arc<RecordingTransport>,
    store: Arc<InMemoryStore>,
    dispatcher: Dispatcher,
}

fn config() -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "123:abc".to_string(),
            telegram_api_url: None,
            log_file: "logs/test.log".to_string(),
            database_url: ":memory:".to_string(),
        },
        workshop: WorkshopConfig {
            bot_username: "MyWorkshopBot".to_string(),
            creator_id: CREATOR_ID,
            logo_url: DEFAULT_LOGO_URL.to_string(),
            icon_path: "assets/chatbot.jpg".to_string(),
        },
    }
}

fn harness() -> Harness {
    let transport = Arc::new(RecordingTransport::new());
    let store = Arc::new(InMemoryStore::new());
    let dispatcher = build_dispatcher(&config(), transport.clone(), store.clone()).unwrap();
    Harness {
        transport,
        store,
        dispatcher,
    }
}

fn photo(file_id: &str, file_size: u32) -> PhotoSize {
    PhotoSize {
        file_id: file_id.to_string(),
        file_size,
        file_path: None,
    }
}

fn photo_update(user: &User, photos: Vec<PhotoSize>) -> Update {
    Update::photo("photo-1", user.clone(), private_chat(user.id), photos)
}

/// **Test: /hello answers exactly "Hello world" once.**
#[tokio::test]
async fn test_hello() {
    let h = harness();
    h.dispatcher.dispatch(text_update(&test_user(2, "Foo"), "/hello")).await;
    assert_eq!(h.transport.texts(), vec!["Hello world"]);
}

/// **Test: /hi from Marcus greets and compliments, in that order; others only get the greeting.**
#[tokio::test]
async fn test_hi_marcus_scenario() {
    let h = harness();

    let outcome = h.dispatcher.dispatch(text_update(&test_user(2, "Marcus"), "/hi")).await;
    assert_eq!(outcome, DispatchOutcome::Command("hi".to_string()));
    assert_eq!(h.transport.texts(), vec!["Hi, Marcus", "Wow, nice name!"]);

    h.transport.clear();
    h.dispatcher.dispatch(text_update(&test_user(3, "Grace"), "/hi")).await;
    assert_eq!(h.transport.texts(), vec!["Hi, Grace"]);
}

/// **Test: /count three times yields 1, 2, 3; counters are per user.**
#[tokio::test]
async fn test_count_sequence() {
    let h = harness();
    let foo = test_user(2, "Foo");
    for _ in 0..3 {
        h.dispatcher.dispatch(text_update(&foo, "/count")).await;
    }
    h.dispatcher.dispatch(text_update(&test_user(3, "Bar"), "/count")).await;

    assert_eq!(
        h.transport.texts(),
        vec![
            "Foo, your count is now 1!",
            "Foo, your count is now 2!",
            "Foo, your count is now 3!",
            "Bar, your count is now 1!",
        ]
    );
}

/// **Test: A corrupt counter is reported with an apology and left untouched.**
#[tokio::test]
async fn test_count_with_corrupt_counter() {
    let h = harness();
    put_as(&*h.store, COUNTERS, "2", &"x").await.unwrap();

    h.dispatcher.dispatch(text_update(&test_user(2, "Foo"), "/count")).await;

    assert_eq!(h.transport.texts(), vec![APOLOGY_MESSAGE]);
    let stored: Option<String> = get_as(&*h.store, COUNTERS, "2").await.unwrap();
    assert_eq!(stored.as_deref(), Some("x"));
}

/// **Test: Concurrent /count updates from one user never lose an increment.**
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_count() {
    let h = Arc::new(harness());
    let user = test_user(2, "Foo");
    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let h = h.clone();
            let update = text_update(&user, "/count");
            tokio::spawn(async move { h.dispatcher.dispatch(update).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let count: Option<i64> = get_as(&*h.store, chatbot_core::COUNTERS, "2").await.unwrap();
    assert_eq!(count, Some(20));
}

/// **Test: Unknown commands and plain text get exactly one "no answer" message.**
#[tokio::test]
async fn test_default_fallback() {
    let h = harness();
    let user = test_user(2, "Foo");
    for text in ["/unknown", "hello there", "/Hello"] {
        h.transport.clear();
        h.dispatcher.dispatch(text_update(&user, text)).await;
        assert_eq!(h.transport.texts(), vec![NO_ANSWER]);
    }
}

/// **Test: /add sums two numbers, reports missing inputs and rejects non-numbers.**
#[tokio::test]
async fn test_add() {
    let h = harness();
    let user = test_user(2, "Foo");

    h.dispatcher.dispatch(text_update(&user, "/add 2 40")).await;
    h.dispatcher.dispatch(text_update(&user, "/add 2")).await;
    h.dispatcher.dispatch(text_update(&user, "/add two 3")).await;

    assert_eq!(
        h.transport.texts(),
        vec![
            "The sum of 2 and 40 is 42",
            "Sorry, this feature requires 2 additional inputs.",
            "Sorry, 'two' is not a whole number.",
        ]
    );
}

/// **Test: /contacts lists every user who wrote to the bot, by username.**
#[tokio::test]
async fn test_contacts() {
    let h = harness();
    let mut anon = test_user(4, "Zed");
    anon.username = None;

    h.dispatcher.dispatch(text_update(&test_user(2, "Foo"), "hi")).await;
    h.dispatcher.dispatch(text_update(&anon, "hi")).await;
    h.transport.clear();
    h.dispatcher.dispatch(text_update(&test_user(3, "Bar"), "/contacts")).await;

    assert_eq!(
        h.transport.texts(),
        vec!["The following users already contacted me: foo, bar, Zed"]
    );
}

/// **Test: A photo is downloaded at its largest size and echoed; equal sizes keep the first.**
#[tokio::test]
async fn test_photo_echo_picks_first_largest() {
    let h = harness();
    let user = test_user(2, "Foo");
    let update = photo_update(&user, vec![photo("small", 10), photo("big-a", 500), photo("big-b", 500)]);

    assert_eq!(h.dispatcher.dispatch(update).await, DispatchOutcome::Reply);

    assert_eq!(h.transport.downloads(), vec!["photos/big-a.jpg"]);
    assert_eq!(
        h.transport.sent(),
        vec![
            Sent::Text {
                chat_id: 2,
                text: "Yeah, I got it!".to_string()
            },
            Sent::PhotoFileId {
                chat_id: 2,
                file_id: "big-a".to_string()
            },
        ]
    );
}

/// **Test: A known file path skips resolution.**
#[tokio::test]
async fn test_photo_with_known_path() {
    let h = harness();
    h.transport.fail_file_resolution();
    let mut known = photo("known", 5);
    known.file_path = Some("photos/known-path.jpg".to_string());

    h.dispatcher.dispatch(photo_update(&test_user(2, "Foo"), vec![known])).await;

    assert_eq!(h.transport.downloads(), vec!["photos/known-path.jpg"]);
    assert_eq!(h.transport.texts(), vec!["Yeah, I got it!"]);
}

/// **Test: Resolution or download failures answer "Houston, we have a problem!".**
#[tokio::test]
async fn test_photo_failures() {
    let h = harness();
    let user = test_user(2, "Foo");

    h.transport.fail_file_resolution();
    h.dispatcher.dispatch(photo_update(&user, vec![photo("a", 1)])).await;
    assert_eq!(h.transport.texts(), vec!["Houston, we have a problem!"]);

    let h = harness();
    h.transport.fail_downloads();
    h.dispatcher.dispatch(photo_update(&user, vec![photo("a", 1)])).await;
    assert_eq!(h.transport.texts(), vec!["Houston, we have a problem!"]);
    assert!(!h
        .transport
        .sent()
        .iter()
        .any(|s| matches!(s, Sent::PhotoFileId { .. })));
}

/// **Test: /logo sends the configured URL and /icon uploads the configured file.**
#[tokio::test]
async fn test_logo_and_icon() {
    let h = harness();
    let user = test_user(2, "Foo");

    h.dispatcher.dispatch(text_update(&user, "/logo")).await;
    h.dispatcher.dispatch(text_update(&user, "/icon")).await;

    assert_eq!(
        h.transport.sent(),
        vec![
            Sent::PhotoUrl {
                chat_id: 2,
                url: DEFAULT_LOGO_URL.to_string()
            },
            Sent::PhotoUpload {
                chat_id: 2,
                path: "assets/chatbot.jpg".into()
            },
        ]
    );
}

/// **Test: /keyboard sends the two shortcut rows.**
#[tokio::test]
async fn test_keyboard() {
    let h = harness();
    h.dispatcher.dispatch(text_update(&test_user(2, "Foo"), "/keyboard")).await;

    let expected_rows = vec![
        vec!["/hello".to_string(), "/hi".to_string(), "/count".to_string()],
        vec!["/contacts".to_string(), "/logo".to_string(), "/icon".to_string()],
    ];
    assert_eq!(
        h.transport.sent(),
        vec![Sent::Keyboard {
            chat_id: 2,
            text: "Enjoy this wonderful keyboard!".to_string(),
            rows: expected_rows
        }]
    );
}

/// **Test: /format sends three MarkdownV2 messages.**
#[tokio::test]
async fn test_format() {
    let h = harness();
    h.dispatcher.dispatch(text_update(&test_user(2, "Foo"), "/format")).await;

    let sent = h.transport.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|s| matches!(s, Sent::Markdown { .. })));
    assert_eq!(
        h.transport.texts()[0],
        "You can make text *bold* or _italic_\\."
    );
}

/// **Test: /commands lists documented commands in registration order and omits the default.**
#[tokio::test]
async fn test_commands_listing() {
    let h = harness();
    h.dispatcher.dispatch(text_update(&test_user(2, "Foo"), "/commands")).await;

    let text = &h.transport.texts()[0];
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "hello - says hello world");
    assert_eq!(lines[1], "hi - says hi");
    assert!(lines.contains(&"add - adds two numbers"));
    assert!(!text.contains("default"));
}

/// **Test: Only the creator can promote and demote; promoted users are stored as admins.**
#[tokio::test]
async fn test_promote_and_demote() {
    let h = harness();
    let creator = test_user(CREATOR_ID, "Ada");
    let foo = test_user(2, "Foo");

    h.dispatcher.dispatch(text_update(&foo, "/promote @foo")).await;
    assert_eq!(h.transport.texts(), vec![ACCESS_DENIED_MESSAGE]);

    h.transport.clear();
    h.dispatcher.dispatch(text_update(&creator, "/promote @Foo")).await;
    assert_eq!(h.transport.texts(), vec!["@foo is now an admin."]);
    let admin: Option<bool> = get_as(&*h.store, ADMINS, "2").await.unwrap();
    assert_eq!(admin, Some(true));

    h.transport.clear();
    h.dispatcher.dispatch(text_update(&creator, "/promote @nobody")).await;
    assert_eq!(h.transport.texts(), vec!["Sorry, I don't know @nobody."]);

    h.transport.clear();
    h.dispatcher.dispatch(text_update(&creator, "/demote foo")).await;
    h.dispatcher.dispatch(text_update(&creator, "/demote foo")).await;
    assert_eq!(
        h.transport.texts(),
        vec!["@foo is no longer an admin.", "@foo was not an admin."]
    );
}

/// **Test: /promote without a username asks for the one missing input.**
#[tokio::test]
async fn test_promote_missing_input() {
    let h = harness();

    let outcome = h
        .dispatcher
        .dispatch(text_update(&test_user(CREATOR_ID, "Ada"), "/promote"))
        .await;

    assert_eq!(outcome, DispatchOutcome::ArgumentCountRejected("promote".to_string()));
    assert_eq!(
        h.transport.texts(),
        vec!["Sorry, this feature requires 1 additional input."]
    );
}

/// **Test: Commands work in group chats and answer in the group.**
#[tokio::test]
async fn test_group_chat() {
    let h = harness();
    let update = Update::text("g-1", test_user(2, "Foo"), group_chat(-42), "/hello@MyWorkshopBot");

    h.dispatcher.dispatch(update).await;

    assert_eq!(
        h.transport.sent(),
        vec![Sent::Text {
            chat_id: -42,
            text: "Hello world".to_string()
        }]
    );
}

/// **Test: In a group, a command meant for another bot gets only the default answer.**
#[tokio::test]
async fn test_group_chat_command_for_other_bot() {
    let h = harness();
    let update = Update::text("g-2", test_user(2, "Foo"), group_chat(-42), "/count@SomeOtherBot");

    let outcome = h.dispatcher.dispatch(update).await;

    assert_eq!(outcome, DispatchOutcome::Default);
    assert_eq!(h.transport.texts(), vec![NO_ANSWER]);
    let count: Option<i64> = get_as(&*h.store, COUNTERS, "2").await.unwrap();
    assert!(count.is_none());
}

/// **Test: When every send fails, dispatch still completes and the store is updated.**
#[tokio::test]
async fn test_send_failure_is_contained() {
    let h = harness();
    h.transport.fail_sends();

    let outcome = h.dispatcher.dispatch(text_update(&test_user(2, "Foo"), "/count")).await;

    assert_eq!(outcome, DispatchOutcome::Command("count".to_string()));
    assert!(h.transport.sent().is_empty());
    let count: Option<i64> = get_as(&*h.store, chatbot_core::COUNTERS, "2").await.unwrap();
    assert_eq!(count, Some(1));
}
