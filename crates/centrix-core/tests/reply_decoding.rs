//! Response-side stream and result decoding tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use centrix_core::protocol::ndjson::{decode_replies, decode_replies_exact};
use serde_json::{json, Value};

use centrix_core::protocol::{
    ApiError, BroadcastResult, ChannelsResult, HistoryResult, InfoResult, PresenceResult,
    PresenceStatsResult, PublishResponse, PublishResult, Reply,
};

fn load(name: &str) -> Vec<u8> {
    fs::read(format!("tests/vectors/{name}")).unwrap()
}

fn one(json: &str) -> Reply {
    serde_json::from_str(json).unwrap()
}

fn load_reply(name: &str) -> Reply {
    serde_json::from_slice(&load(name)).unwrap()
}

fn raw_value(raw: &serde_json::value::RawValue) -> Value {
    serde_json::from_str(raw.get()).unwrap()
}

#[test]
fn publish_replies_decode_in_order() {
    let replies = decode_replies_exact(&load("replies_publish_ok.ndjson"), 2).unwrap();
    let offsets: Vec<u64> = replies
        .iter()
        .map(|r| r.decode::<PublishResult>().unwrap().offset)
        .collect();
    assert_eq!(offsets, vec![1, 2]);
    assert_eq!(replies[0].decode::<PublishResult>().unwrap().epoch, "xyz");
}

#[test]
fn error_in_middle_reply_is_isolated() {
    let replies = decode_replies_exact(&load("replies_mixed_error.ndjson"), 3).unwrap();

    assert!(replies[0].error.is_none());
    assert!(replies[1].error.is_some());
    assert!(replies[2].error.is_none());

    let published = replies[0].decode::<PublishResult>().unwrap();
    assert_eq!(published.offset, 7);

    let err = replies[1].decode::<PresenceResult>().expect_err("server error");
    assert_eq!(err.code().as_str(), "API");
    let api = err.api_error().unwrap();
    assert_eq!(api.code, 108);
    assert_eq!(api.message, "not available");

    let stats = replies[2].decode::<PresenceStatsResult>().unwrap();
    assert_eq!(stats.num_clients, 3);
    assert_eq!(stats.num_users, 2);
}

#[test]
fn stream_decoder_handles_escaped_and_real_newlines() {
    let replies = decode_replies(&load("replies_multiline.ndjson")).unwrap();
    assert_eq!(replies.len(), 2);

    let history = replies[0].decode::<HistoryResult>().unwrap();
    assert_eq!(history.offset, 1);
    assert_eq!(history.epoch, "e1");
    assert_eq!(history.publications.len(), 1);
    assert!(history.publications[0].data.get().contains("line one\\nline two"));

    let channels = replies[1].decode::<ChannelsResult>().unwrap();
    assert_eq!(channels.channels["chat:index"].num_clients, 4);
}

#[test]
fn truncated_element_fails_whole_stream() {
    let err = decode_replies(&load("replies_truncated.ndjson")).expect_err("must fail");
    assert_eq!(err.code().as_str(), "MALFORMED_RESPONSE");
}

#[test]
fn non_object_element_fails_whole_stream() {
    let err = decode_replies(b"{\"result\":{}}\n42\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "MALFORMED_RESPONSE");
}

#[test]
fn count_mismatch_is_malformed() {
    let body = load("replies_publish_ok.ndjson");
    for expected in [1, 3] {
        let err = decode_replies_exact(&body, expected).expect_err("must fail");
        assert_eq!(err.code().as_str(), "MALFORMED_RESPONSE", "expected={expected}");
    }
}

#[test]
fn empty_body_has_no_replies() {
    assert!(decode_replies(b"").unwrap().is_empty());
    assert!(decode_replies(b"\n\n").unwrap().is_empty());
}

#[test]
fn info_result_ignores_unknown_fields() {
    let body = String::from_utf8(load("info_result.json")).unwrap();
    let reply = one(&format!("{{\"result\":{body}}}"));
    let info = reply.decode::<InfoResult>().unwrap();
    assert_eq!(info.nodes.len(), 1);
    let node = &info.nodes[0];
    assert_eq!(node.name, "node-1");
    assert_eq!(node.num_clients, 12);
    assert_eq!(node.uptime, 3600);
    assert_eq!(node.process.unwrap().rss, 52428800);
    assert_eq!(node.metrics.as_ref().unwrap().items["node.num_clients"], 12.0);
}

#[test]
fn missing_result_is_decode_error() {
    for json in [r#"{}"#, r#"{"result":null}"#] {
        let err = one(json).decode::<InfoResult>().expect_err("must fail");
        assert_eq!(err.code().as_str(), "DECODE", "reply={json}");
    }
}

#[test]
fn shape_mismatch_is_decode_error() {
    let err = one(r#"{"result":{"presence":[1,2,3]}}"#)
        .decode::<PresenceResult>()
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "DECODE");

    let err = one(r#"{"result":{}}"#)
        .decode::<ChannelsResult>()
        .expect_err("channels map is required");
    assert_eq!(err.code().as_str(), "DECODE");
}

#[test]
fn echoed_method_must_match_decoder() {
    let reply = one(r#"{"method":"history","result":{"offset":1}}"#);
    let err = reply.decode::<PublishResult>().expect_err("must fail");
    assert_eq!(err.code().as_str(), "DECODE");
    assert!(reply.decode::<HistoryResult>().is_ok());
}

#[test]
fn empty_publish_result_is_zero_position() {
    let res = one(r#"{"result":{}}"#).decode::<PublishResult>().unwrap();
    assert_eq!(res, PublishResult::default());
}

#[test]
fn check_surfaces_only_server_errors() {
    assert!(one(r#"{"result":{}}"#).check().is_ok());
    assert!(one(r#"{}"#).check().is_ok());
    let err = one(r#"{"error":{"code":102,"message":"unknown channel"}}"#)
        .check()
        .expect_err("must fail");
    assert_eq!(err.to_string(), "api error 102: unknown channel");
}

#[test]
fn broadcast_result_keeps_per_channel_outcome() {
    let res = load_reply("broadcast_result.json")
        .decode::<BroadcastResult>()
        .unwrap();
    assert_eq!(
        res.responses,
        vec![
            PublishResponse {
                error: None,
                result: Some(PublishResult {
                    offset: 1,
                    epoch: "e1".into(),
                }),
            },
            PublishResponse {
                error: Some(ApiError {
                    code: 102,
                    message: "unknown channel".into(),
                }),
                result: None,
            },
        ]
    );
}

#[test]
fn presence_result_decodes_client_info() {
    let res = load_reply("presence_result.json")
        .decode::<PresenceResult>()
        .unwrap();
    assert_eq!(res.presence.len(), 2);

    let c1 = &res.presence["c1"];
    assert_eq!(c1.user, "42");
    assert_eq!(c1.client, "c1");
    assert_eq!(raw_value(c1.conn_info.as_deref().unwrap()), json!({"name": "alice"}));
    assert_eq!(raw_value(c1.chan_info.as_deref().unwrap()), json!({"role": "admin"}));

    let c2 = &res.presence["c2"];
    assert_eq!(c2.user, "");
    assert!(c2.conn_info.is_none());
    assert!(c2.chan_info.is_none());
}

#[test]
fn history_result_decodes_publication_info() {
    let res = load_reply("history_result.json")
        .decode::<HistoryResult>()
        .unwrap();
    assert_eq!(res.offset, 5);
    assert_eq!(res.epoch, "ep");
    assert_eq!(res.publications.len(), 2);

    let first = &res.publications[0];
    assert_eq!(first.offset, 4);
    assert_eq!(raw_value(&first.data), json!({"text": "hi"}));
    let info = first.info.as_ref().unwrap();
    assert_eq!(info.user, "42");
    assert_eq!(info.client, "c1");
    assert_eq!(raw_value(info.conn_info.as_deref().unwrap()), json!({"name": "alice"}));

    let second = &res.publications[1];
    assert_eq!(raw_value(&second.data), json!("plain"));
    assert!(second.info.is_none());
}
