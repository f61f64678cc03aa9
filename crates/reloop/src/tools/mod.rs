//! A set of demo tools that models can use.

mod current_time;
mod echo;
mod word_count;

use reloop_core::ToolDefinition;

pub use current_time::CurrentTimeTool;
pub use echo::EchoTool;
pub use word_count::WordCountTool;

/// Returns every demo tool, ready to be registered on a payload.
pub fn demo_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::typed(EchoTool::new()),
        ToolDefinition::new(CurrentTimeTool),
        ToolDefinition::typed(WordCountTool::new()),
    ]
}
