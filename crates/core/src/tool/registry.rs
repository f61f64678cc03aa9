use std::collections::HashMap;

use crate::tool::ToolDefinition;

/// Name lookup over the tools of a payload.
pub struct Registry {
    tools: HashMap<String, ToolDefinition>,
}

impl Registry {
    /// Builds a registry. A later definition replaces an earlier one with
    /// the same name.
    pub fn from_definitions(definitions: &[ToolDefinition]) -> Self {
        let mut tools = HashMap::with_capacity(definitions.len());
        for def in definitions {
            tools.insert(def.name().to_owned(), def.clone());
        }
        Self { tools }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }
}
