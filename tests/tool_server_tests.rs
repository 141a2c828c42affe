//! End-to-end tests for the stdio tool server with every tool registered

use std::io::Cursor;
use std::sync::Arc;

use qa_match::tools::register_all_tools;
use qa_match::{KnowledgeBase, MatchConfig, ToolServer};
use serde_json::{json, Value};

/// Feed `requests` through a fresh server, one JSON object per line
fn exchange(kb: &Arc<KnowledgeBase>, requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
    let mut server = ToolServer::new(Cursor::new(input), Vec::new());
    register_all_tools(&mut server, Arc::clone(kb));
    server.run().unwrap();

    String::from_utf8(server.into_writer())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

/// Parse the JSON text carried in a tool result's first content item
fn payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_lists_all_tools() {
    let kb = Arc::new(KnowledgeBase::in_memory(MatchConfig::default()));
    let out = exchange(&kb, &[json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})]);

    let names: Vec<&str> = out[0]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 15);
    for expected in ["query_answer", "add_qa", "batch_add_qa", "import_qa_file", "get_stats"] {
        assert!(names.contains(&expected), "missing {}", expected);
    }
    assert!(out[0]["result"]["tools"][0]["inputSchema"].is_object());
}

#[test]
fn test_add_then_query() {
    let kb = Arc::new(KnowledgeBase::in_memory(MatchConfig::default()));
    let out = exchange(
        &kb,
        &[
            call(
                1,
                "add_qa",
                json!({"question": "如何重启系统?", "answer": "点击开始菜单，选择重启选项。", "category": "电脑问题"}),
            ),
            call(2, "query_answer", json!({"query": "怎么重启系统"})),
            call(3, "query_answer", json!({"query": "今天天气如何", "threshold": 0.3})),
        ],
    );

    assert_eq!(payload(&out[0])["id"], 1);

    let hit = payload(&out[1]);
    assert_eq!(hit["matched"], true);
    assert_eq!(hit["entry_id"], 1);
    assert_eq!(hit["answer"], "点击开始菜单，选择重启选项。");

    let miss = payload(&out[2]);
    assert_eq!(miss["matched"], false);
    assert!(miss.get("answer").is_none());
    assert_eq!(kb.stats().total_queries, 2);
}

#[test]
fn test_batch_add_and_categories() {
    let kb = Arc::new(KnowledgeBase::in_memory(MatchConfig::default()));
    let out = exchange(
        &kb,
        &[
            call(
                1,
                "batch_add_qa",
                json!({"items": [
                    {"question": "如何重启系统?", "answer": "点击开始菜单。", "category": "电脑问题"},
                    {"question": "如何修改群名片?", "answer": "在群聊设置里修改。", "category": "群管理"},
                    {"answer": "缺少问题"}
                ]}),
            ),
            call(2, "list_categories", json!({})),
            call(3, "batch_delete_qa", json!({"ids": [2, 9]})),
        ],
    );

    let report = payload(&out[0]);
    assert_eq!(report["added"], json!([1, 2]));
    assert_eq!(report["skipped"], json!([2]));
    assert_eq!(payload(&out[1])["categories"], json!(["电脑问题", "群管理"]));
    assert_eq!(kb.list_all().len(), 1);
}

#[test]
fn test_missing_entries_are_tool_errors() {
    let kb = Arc::new(KnowledgeBase::in_memory(MatchConfig::default()));
    let out = exchange(
        &kb,
        &[
            call(1, "get_qa", json!({"id": 42})),
            call(2, "record_feedback", json!({"id": 42, "helpful": true})),
            call(3, "add_qa", json!({"question": "", "answer": "x"})),
        ],
    );

    assert_eq!(out[0]["result"]["isError"], true);
    assert_eq!(out[1]["result"]["isError"], true);
    assert_eq!(out[2]["error"]["code"], -32603);
}

#[test]
fn test_feedback_and_stats_tools() {
    let kb = Arc::new(KnowledgeBase::in_memory(MatchConfig::default()));
    kb.create("如何重启系统?", "点击开始菜单。", None).unwrap();

    let out = exchange(
        &kb,
        &[
            call(1, "record_feedback", json!({"id": 1, "helpful": true})),
            call(2, "get_qa", json!({"id": 1})),
            call(3, "get_stats", json!({})),
            call(4, "rebuild_index", json!({})),
        ],
    );

    assert_eq!(payload(&out[0])["feedback"]["helpful"], 1);
    assert_eq!(payload(&out[1])["entry"]["question"], "如何重启系统?");
    assert_eq!(payload(&out[2])["stats"]["entry_count"], 1);
    assert_eq!(payload(&out[3])["entry_count"], 1);
}
