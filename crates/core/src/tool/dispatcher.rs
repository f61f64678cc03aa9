use reloop_model::{Message, ToolCall};

use crate::payload::CompletionRequestPayload;
use crate::tool::Registry;

/// Executes the requested tool calls in order and appends one result
/// message per resolved call.
///
/// Calls naming an unregistered tool are skipped without a result message.
pub(crate) fn dispatch(
    payload: &mut CompletionRequestPayload,
    tool_calls: &[ToolCall],
) {
    let span = debug_span!("tool dispatcher");
    let _enter = span.enter();

    let registry = Registry::from_definitions(&payload.tools);
    for call in tool_calls {
        let name = &call.function.name;
        let Some(tool) = registry.get(name) else {
            warn!("tool not found: {name}");
            continue;
        };
        let arguments = &call.function.arguments;
        trace!("invoking a tool ({}) with args: {arguments:?}", call.id);
        let output = tool.invoke(arguments);
        trace!("tool ({}) returned: {output:?}", call.id);
        payload.add_message(Message::tool_result(&call.id, output));
    }
}
