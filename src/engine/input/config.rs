// Input configuration and remapping system

use super::action::{self, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys/buttons) to game actions
///
/// Gameplay bindings are remappable; global bindings (menu, pause) are
/// merged in at construction and can be rebound like any other.
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Reverse mapping for quick lookups (action -> all sources)
    action_to_sources: HashMap<Action, Vec<InputSource>>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            action_to_sources: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// The default configuration: gameplay bindings plus global ones
    pub fn standard() -> Self {
        let mut bindings = action::default_bindings();
        bindings.extend(action::global_bindings());
        Self::from_bindings(bindings)
    }

    /// Bind an input source to an action, replacing any previous binding
    /// for that source
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.unbind_source(source);

        self.bindings.insert(source, action);
        self.action_to_sources.entry(action).or_default().push(source);
    }

    /// Unbind an input source
    pub fn unbind_source(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.remove(&source) {
            if let Some(sources) = self.action_to_sources.get_mut(&action) {
                sources.retain(|s| *s != source);
                if sources.is_empty() {
                    self.action_to_sources.remove(&action);
                }
            }
        }
    }

    /// Unbind all sources for an action
    pub fn unbind_action(&mut self, action: Action) {
        if let Some(sources) = self.action_to_sources.remove(&action) {
            for source in sources {
                self.bindings.remove(&source);
            }
        }
    }

    /// Look up the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// All sources bound to an action
    pub fn sources_for(&self, action: Action) -> &[InputSource] {
        self.action_to_sources
            .get(&action)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of active bindings
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::standard()
    }
}
