//! Command buffer tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use serde_json::json;

use centrix_client::Pipe;
use centrix_core::protocol::{
    ChannelsOptions, DisconnectOptions, HistoryOptions, Method, PublishOptions, PublishRequest,
    SubscribeOptions, UnsubscribeOptions,
};

#[test]
fn every_add_appends_one_command_in_order() {
    let pipe = Pipe::new();
    pipe.add_publish("chat", &json!({"input": "test"}), PublishOptions::new()).unwrap();
    pipe.add_broadcast(vec!["a".into(), "b".into()], &json!(1), PublishOptions::new()).unwrap();
    pipe.add_subscribe("chat", "42", SubscribeOptions::new());
    pipe.add_unsubscribe("chat", "42", UnsubscribeOptions::new());
    pipe.add_disconnect("42", DisconnectOptions::new());
    pipe.add_presence("chat");
    pipe.add_presence_stats("chat");
    pipe.add_history("chat", HistoryOptions::new());
    pipe.add_history_remove("chat");
    pipe.add_channels(ChannelsOptions::new());
    pipe.add_info();

    assert_eq!(
        pipe.methods(),
        vec![
            Method::Publish,
            Method::Broadcast,
            Method::Subscribe,
            Method::Unsubscribe,
            Method::Disconnect,
            Method::Presence,
            Method::PresenceStats,
            Method::History,
            Method::HistoryRemove,
            Method::Channels,
            Method::Info,
        ]
    );
    assert_eq!(pipe.len(), 11);
}

#[test]
fn bulk_publish_appends_all_requests() {
    let pipe = Pipe::new();
    pipe.add_info();
    let requests = (0..3)
        .map(|i| PublishRequest::new(format!("ch{i}"), &json!({ "n": i })).unwrap())
        .collect();
    pipe.add_publish_requests(requests);
    assert_eq!(pipe.len(), 4);
    assert_eq!(&pipe.methods()[1..], &[Method::Publish; 3]);
}

#[test]
fn failed_encode_leaves_buffer_untouched() {
    let pipe = Pipe::new();
    pipe.add_presence("chat");

    let mut bad: HashMap<(u8, u8), u8> = HashMap::new();
    bad.insert((0, 0), 0);
    let err = pipe
        .add_publish("chat", &bad, PublishOptions::new())
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "ENCODE");
    assert_eq!(pipe.methods(), vec![Method::Presence]);
}

#[test]
fn reset_clears_buffer() {
    let pipe = Pipe::new();
    pipe.add_info();
    pipe.add_presence("chat");
    assert!(!pipe.is_empty());

    pipe.reset();
    assert_eq!(pipe.len(), 0);
    assert!(pipe.is_empty());

    pipe.add_info();
    assert_eq!(pipe.len(), 1);
}

#[test]
fn concurrent_appends_are_all_kept() {
    let pipe = Arc::new(Pipe::new());
    let threads = 8;
    let per_thread = 200;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let pipe = Arc::clone(&pipe);
            thread::spawn(move || {
                for i in 0..per_thread {
                    pipe.add_publish(&format!("t{t}"), &json!(i), PublishOptions::new())
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(pipe.len(), threads * per_thread);
    assert!(pipe.methods().iter().all(|m| *m == Method::Publish));
}
