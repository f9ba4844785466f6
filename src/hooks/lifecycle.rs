use std::fmt;

/// The two points every dispatched action is bracketed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    /// Before the handler: stash local changes, fetch and prune remotes
    Pre,
    /// After the handler, even a failed one: pop the stash if there is one
    Post,
}

impl HookType {
    /// Get the hook name as a string
    pub fn name(&self) -> &'static str {
        match self {
            HookType::Pre => "action-hook-pre",
            HookType::Post => "action-hook-post",
        }
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
