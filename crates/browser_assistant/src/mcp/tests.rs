use crate::config::SessionConfig;
use crate::mcp::handler::MessageHandler;
use crate::session::Session;
use crate::tests::mocks::MockPageDriver;
use crate::tools::core::{Capability, ToolMode, ToolRegistry};
use crate::utils::MockWriter;
use page_driver::{DialogKind, PageEvent};
use std::sync::Arc;
use tokio::sync::Mutex;

struct TestConnection {
    handler: MessageHandler,
    messages: Arc<Mutex<Vec<String>>>,
    session: Arc<Session>,
    driver: MockPageDriver,
}

fn setup(mode: ToolMode, capabilities: &[Capability]) -> TestConnection {
    let driver = MockPageDriver::new();
    let session = Session::with_driver(SessionConfig::default(), Arc::new(driver.clone()));
    let registry = ToolRegistry::select(mode, capabilities);
    let writer = MockWriter::new();
    let messages = writer.messages.clone();
    let handler = MessageHandler::with_dependencies(session.clone(), registry, Box::new(writer));
    TestConnection {
        handler,
        messages,
        session,
        driver,
    }
}

async fn last_response(conn: &TestConnection) -> serde_json::Value {
    let messages = conn.messages.lock().await;
    serde_json::from_str(messages.last().expect("no response written")).unwrap()
}

fn call_frame(name: &str, arguments: serde_json::Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
    .to_string()
}

#[tokio::test]
async fn tools_list_exposes_schema_and_annotations() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.handler
        .handle_message(r#"{"jsonrpc": "2.0", "method": "tools/list", "id": 1}"#)
        .await
        .unwrap();

    let response = last_response(&conn).await;
    assert_eq!(response["jsonrpc"], "2.0");
    let tools = response["result"]["tools"].as_array().unwrap();
    assert!(!tools.is_empty());

    let snapshot = tools
        .iter()
        .find(|t| t["name"] == "browser_snapshot")
        .expect("browser_snapshot missing");
    assert!(snapshot["description"].is_string());
    assert_eq!(snapshot["inputSchema"]["type"], "object");
    assert_eq!(snapshot["annotations"]["readOnlyHint"], true);
    assert_eq!(snapshot["annotations"]["destructiveHint"], false);
    assert_eq!(snapshot["annotations"]["openWorldHint"], true);

    let click = tools
        .iter()
        .find(|t| t["name"] == "browser_click")
        .expect("browser_click missing");
    assert_eq!(click["annotations"]["readOnlyHint"], false);
    assert_eq!(click["annotations"]["destructiveHint"], true);
}

#[tokio::test]
async fn tools_list_is_idempotent() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    let frame = r#"{"jsonrpc": "2.0", "method": "tools/list", "id": 1}"#;
    conn.handler.handle_message(frame).await.unwrap();
    conn.handler.handle_message(frame).await.unwrap();

    let messages = conn.messages.lock().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], messages[1]);
}

#[tokio::test]
async fn capability_allow_list_limits_discovery() {
    let mut conn = setup(ToolMode::Snapshot, &[Capability::Pdf]);
    conn.handler
        .handle_message(r#"{"jsonrpc": "2.0", "method": "tools/list", "id": 1}"#)
        .await
        .unwrap();

    let response = last_response(&conn).await;
    let names: Vec<&str> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"browser_pdf_save"));
    assert!(names.contains(&"browser_navigate"));
    assert!(!names.contains(&"browser_navigate_back"));
    assert!(!names.contains(&"browser_wait_for"));
}

#[tokio::test]
async fn unknown_tool_returns_error_envelope() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.handler
        .handle_message(&call_frame("nonexistent", serde_json::json!({})))
        .await
        .unwrap();

    let response = last_response(&conn).await;
    let result = &response["result"];
    assert_eq!(result["isError"], true);
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "Tool \"nonexistent\" not found");
}

#[tokio::test]
async fn modal_state_blocks_unrelated_tool() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.driver.queue_event(PageEvent::DialogOpened {
        kind: DialogKind::Confirm,
        message: "Leave page?".to_string(),
    });

    conn.handler
        .handle_message(&call_frame(
            "browser_click",
            serde_json::json!({"selector": "#submit"}),
        ))
        .await
        .unwrap();

    let response = last_response(&conn).await;
    let result = &response["result"];
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("does not handle the modal state"));
    assert!(text.contains("Leave page?"));
    // The gate rejected before any driver interaction
    assert!(conn.driver.calls().is_empty());
}

#[tokio::test]
async fn dialog_tool_passes_gate_and_resolves_state() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.driver.queue_event(PageEvent::DialogOpened {
        kind: DialogKind::Confirm,
        message: "Leave page?".to_string(),
    });

    conn.handler
        .handle_message(&call_frame(
            "browser_handle_dialog",
            serde_json::json!({"accept": true}),
        ))
        .await
        .unwrap();

    let response = last_response(&conn).await;
    assert_eq!(response["result"]["isError"], false);
    assert!(conn
        .driver
        .calls()
        .contains(&"handle_dialog accept=true".to_string()));
    assert!(conn.session.modal_states().await.is_empty());
}

#[tokio::test]
async fn dialog_tool_requires_open_dialog() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.handler
        .handle_message(&call_frame(
            "browser_handle_dialog",
            serde_json::json!({"accept": true}),
        ))
        .await
        .unwrap();

    let response = last_response(&conn).await;
    let result = &response["result"];
    assert_eq!(result["isError"], true);
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("can only be used when there is related modal state present"));
}

#[tokio::test]
async fn invalid_arguments_are_reported_with_detail() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.handler
        .handle_message(&call_frame("browser_click", serde_json::json!({})))
        .await
        .unwrap();

    let response = last_response(&conn).await;
    let result = &response["result"];
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Invalid arguments for tool \"browser_click\""));
    assert!(conn.driver.calls().is_empty());
}

#[tokio::test]
async fn action_failure_is_normalized_into_error_envelope() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.driver.fail_with("browser crashed");

    conn.handler
        .handle_message(&call_frame(
            "browser_navigate",
            serde_json::json!({"url": "https://example.com/"}),
        ))
        .await
        .unwrap();

    let response = last_response(&conn).await;
    let result = &response["result"];
    assert_eq!(result["isError"], true);
    assert_eq!(result["content"][0]["text"], "browser crashed");
}

#[tokio::test]
async fn snapshot_capture_happens_once_after_action() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.handler
        .handle_message(&call_frame(
            "browser_navigate",
            serde_json::json!({"url": "https://example.com/"}),
        ))
        .await
        .unwrap();

    let response = last_response(&conn).await;
    assert_eq!(response["result"]["isError"], false);

    let calls = conn.driver.calls();
    let navigate_pos = calls
        .iter()
        .position(|c| c.starts_with("navigate"))
        .expect("navigate not called");
    let snapshot_positions: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| c.as_str() == "snapshot")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(snapshot_positions.len(), 1);
    assert!(snapshot_positions[0] > navigate_pos);
}

#[tokio::test]
async fn console_messages_override_is_returned_verbatim() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.driver.set_console(vec![page_driver::ConsoleMessage {
        level: "error".to_string(),
        text: "boom".to_string(),
    }]);

    conn.handler
        .handle_message(&call_frame("browser_console_messages", serde_json::json!({})))
        .await
        .unwrap();

    let response = last_response(&conn).await;
    let result = &response["result"];
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"].as_array().unwrap().len(), 1);
    assert_eq!(result["content"][0]["text"], "[error] boom");
    // Override bypasses the default trace formatting entirely
    assert_ne!(result["content"][0]["text"], "// Read console messages");
}

#[tokio::test]
async fn busy_session_rejects_pipelined_call() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    let _permit = conn.session.try_begin_execution().unwrap();

    conn.handler
        .handle_message(&call_frame(
            "browser_navigate",
            serde_json::json!({"url": "https://example.com/"}),
        ))
        .await
        .unwrap();

    let response = last_response(&conn).await;
    let result = &response["result"];
    assert_eq!(result["isError"], true);
    assert_eq!(
        result["content"][0]["text"],
        "Another tool call is still in progress"
    );
    assert!(conn.driver.calls().is_empty());
}

#[tokio::test]
async fn initialize_records_client_version() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.handler
        .handle_message(
            r#"{"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05",
                "clientInfo": {"name": "test-client", "version": "3.2.1"},
                "capabilities": {}
            }}"#,
        )
        .await
        .unwrap();

    let response = last_response(&conn).await;
    assert_eq!(response["result"]["serverInfo"]["name"], "browser-assistant");
    assert_eq!(
        conn.session.client_version().as_deref(),
        Some("test-client/3.2.1")
    );
}

#[tokio::test]
async fn malformed_frame_is_ignored() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.handler
        .handle_message("this is not json")
        .await
        .unwrap();
    assert!(conn.messages.lock().await.is_empty());
}

#[tokio::test]
async fn unknown_method_gets_protocol_error() {
    let mut conn = setup(ToolMode::Snapshot, &[]);
    conn.handler
        .handle_message(r#"{"jsonrpc": "2.0", "id": 7, "method": "resources/list"}"#)
        .await
        .unwrap();

    let response = last_response(&conn).await;
    assert_eq!(response["error"]["code"], -32601);
}

#[tokio::test]
async fn vision_catalog_is_offered_in_vision_mode() {
    let mut conn = setup(ToolMode::Vision, &[]);
    conn.handler
        .handle_message(r#"{"jsonrpc": "2.0", "method": "tools/list", "id": 1}"#)
        .await
        .unwrap();

    let response = last_response(&conn).await;
    let names: Vec<&str> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"browser_screen_capture"));
    assert!(names.contains(&"browser_screen_click"));
    assert!(!names.contains(&"browser_snapshot"));
    assert!(!names.contains(&"browser_click"));
}
