//! The Script component: which behavior an object runs during play.

/// Names the script type attached to a GameObject.
///
/// The tag is resolved against the
/// [`ScriptRegistry`](crate::script::ScriptRegistry) when play starts; the
/// component itself holds no behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptComponent {
    pub attached_script: String,
    pub active: bool,
}

impl ScriptComponent {
    pub fn new(attached_script: &str) -> Self {
        Self {
            attached_script: attached_script.to_string(),
            active: true,
        }
    }

    pub fn attached_script(&self) -> &str {
        &self.attached_script
    }
}
