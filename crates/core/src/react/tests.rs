use reloop_model::{ErrorKind, Message, Role, ToolCall, Usage};
use reloop_test_model::{PresetFailure, PresetResponse, TestModelProvider};

use crate::tool::ToolDefinition;
use crate::{CompletionRequestPayload, Error, ReactLoop};

fn echo_payload() -> CompletionRequestPayload {
    CompletionRequestPayload::new(vec![Message::user("Say hi")]).with_tool(
        ToolDefinition::function("echo", "Echoes the arguments", |args| {
            format!("echo:{args}")
        }),
    )
}

fn usage(total: u64) -> Usage {
    Usage {
        prompt_tokens: total - 1,
        completion_tokens: 1,
        total_tokens: total,
    }
}

#[tokio::test]
async fn test_final_answer_first() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(PresetResponse::text("Hello!"));
    let observer = model_provider.clone();

    let mut payload = echo_payload();
    let completion = ReactLoop::new(model_provider)
        .run(&mut payload, 5)
        .await
        .unwrap();

    assert_eq!(completion.message.content, "Hello!");
    assert_eq!(completion.iterations, 1);
    assert_eq!(observer.call_count(), 1);
    assert_eq!(payload.messages().len(), 2);
}

#[tokio::test]
async fn test_empty_final_answer() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(PresetResponse::text(""));

    let mut payload = echo_payload();
    let completion = ReactLoop::new(model_provider)
        .run(&mut payload, 5)
        .await
        .unwrap();
    assert_eq!(completion.message.content, "");
}

#[tokio::test]
async fn test_echo_scenario() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(PresetResponse::tool_calls([
        ToolCall::function("t1", "echo", "hi"),
    ]));
    model_provider.add_response(PresetResponse::text("done"));
    let observer = model_provider.clone();

    let mut payload = echo_payload();
    let completion = ReactLoop::new(model_provider)
        .run(&mut payload, 5)
        .await
        .unwrap();

    assert_eq!(completion.message.content, "done");
    assert_eq!(completion.iterations, 2);
    assert_eq!(observer.call_count(), 2);

    let messages = payload.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].tool_calls[0].id, "t1");
    assert_eq!(messages[2].role, Role::Tool);
    assert_eq!(messages[2].content, "echo:hi");
    assert_eq!(messages[2].tool_call_id.as_deref(), Some("t1"));
    assert_eq!(messages[3].content, "done");

    // The second request carries the tool result.
    let requests = observer.requests();
    assert_eq!(requests[1].messages.len(), 3);
    assert_eq!(requests[1].tools[0].name, "echo");
}

#[tokio::test]
async fn test_tool_results_follow_call_order() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(PresetResponse::tool_calls([
        ToolCall::function("t1", "echo", "a"),
        ToolCall::function("t2", "echo", "b"),
        ToolCall::function("t3", "echo", "c"),
    ]));
    model_provider.add_response(PresetResponse::tool_calls([
        ToolCall::function("t4", "echo", "d"),
    ]));
    model_provider.add_response(PresetResponse::text("done"));
    let observer = model_provider.clone();

    let mut payload = echo_payload();
    ReactLoop::new(model_provider)
        .run(&mut payload, 5)
        .await
        .unwrap();

    assert_eq!(observer.call_count(), 3);
    let results: Vec<_> = payload
        .new_messages()
        .iter()
        .filter(|msg| msg.role == Role::Tool)
        .map(|msg| {
            (msg.tool_call_id.as_deref().unwrap(), msg.content.as_str())
        })
        .collect();
    assert_eq!(
        results,
        vec![
            ("t1", "echo:a"),
            ("t2", "echo:b"),
            ("t3", "echo:c"),
            ("t4", "echo:d")
        ]
    );
}

#[tokio::test]
async fn test_budget_exceeded() {
    let mut model_provider = TestModelProvider::default();
    model_provider.repeat_response(PresetResponse::tool_calls([
        ToolCall::function("t1", "echo", "again"),
    ]));
    let observer = model_provider.clone();

    let mut payload = echo_payload();
    let err = ReactLoop::new(model_provider)
        .run(&mut payload, 3)
        .await
        .unwrap_err();

    assert!(err.is_budget_exceeded());
    assert!(matches!(err, Error::BudgetExceeded { max_iterations: 3 }));
    assert_eq!(observer.call_count(), 3);
    // Every reply and tool result is kept for inspection.
    assert_eq!(payload.new_messages().len(), 6);
}

#[tokio::test]
async fn test_unknown_tool_is_skipped() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(PresetResponse::tool_calls([
        ToolCall::function("t1", "read_file", r#"{"path":"a.txt"}"#),
        ToolCall::function("t2", "echo", "hi"),
    ]));
    model_provider.add_response(PresetResponse::text("done"));

    let mut payload = echo_payload();
    let completion = ReactLoop::new(model_provider)
        .run(&mut payload, 5)
        .await
        .unwrap();

    assert_eq!(completion.message.content, "done");
    let tool_results: Vec<_> = payload
        .messages()
        .iter()
        .filter(|msg| msg.role == Role::Tool)
        .collect();
    assert_eq!(tool_results.len(), 1);
    assert_eq!(tool_results[0].tool_call_id.as_deref(), Some("t2"));
}

#[tokio::test]
async fn test_network_error() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(PresetResponse::failure(PresetFailure::Transport));
    let observer = model_provider.clone();

    let mut payload = echo_payload();
    let err = ReactLoop::new(model_provider)
        .run(&mut payload, 5)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Transport));
    assert_eq!(observer.call_count(), 1);
    assert_eq!(payload.messages().len(), 1);
}

#[tokio::test]
async fn test_error_after_tool_round() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(PresetResponse::tool_calls([
        ToolCall::function("t1", "echo", "hi"),
    ]));
    model_provider
        .add_response(PresetResponse::failure(PresetFailure::RateLimit));
    let observer = model_provider.clone();

    let mut payload = echo_payload();
    let err = ReactLoop::new(model_provider)
        .run(&mut payload, 5)
        .await
        .unwrap_err();

    // Not retried by the loop.
    assert_eq!(err.kind(), Some(ErrorKind::RateLimit));
    assert_eq!(observer.call_count(), 2);
    assert_eq!(payload.messages().len(), 3);
}

#[tokio::test]
async fn test_zero_choices() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(PresetResponse::NoChoices);

    let mut payload = echo_payload();
    let err = ReactLoop::new(model_provider)
        .run(&mut payload, 5)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
    assert_eq!(payload.messages().len(), 1);
}

#[tokio::test]
async fn test_invalid_payload() {
    let model_provider = TestModelProvider::default();
    let observer = model_provider.clone();
    let react_loop = ReactLoop::new(model_provider);

    let mut empty = CompletionRequestPayload::default();
    let err = react_loop.run(&mut empty, 5).await.unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(_)));

    let mut payload = echo_payload();
    let err = react_loop.run(&mut payload, 0).await.unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(_)));

    assert_eq!(observer.call_count(), 0);
}

#[tokio::test]
async fn test_usage_is_summed() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(
        PresetResponse::tool_calls([ToolCall::function("t1", "echo", "hi")])
            .with_usage(usage(10)),
    );
    model_provider.add_response(PresetResponse::text("done"));
    model_provider.add_response(PresetResponse::text("bye").with_usage(usage(4)));

    let react_loop = ReactLoop::new(model_provider);
    let mut payload = echo_payload();
    let completion = react_loop.run(&mut payload, 5).await.unwrap();
    assert_eq!(completion.usage, Some(usage(10)));

    // The caller can continue the same conversation.
    payload.add_messages([Message::user("Thanks")]);
    let completion = react_loop.run(&mut payload, 5).await.unwrap();
    assert_eq!(completion.message.content, "bye");
    assert_eq!(completion.usage, Some(usage(4)));
    assert_eq!(payload.messages().len(), 6);
}
