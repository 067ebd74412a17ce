//! The typed-command reveal.
//!
//! Commands are revealed in three phases as typing progress runs 0..1: the
//! leading slash alone, then the whole prefix at once, then the command name
//! character by character.

use crate::foundation::math::clamp01;

/// A slash command as it appears on the prompt line, e.g. prefix
/// `"/session:"` and name `"restart"`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TypedCommand {
    pub prefix: String,
    pub name: String,
}

impl TypedCommand {
    pub fn new(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
        }
    }

    pub fn full(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }

    /// The visible portion of the command at `progress`.
    ///
    /// Progress below 0.1 shows only the prefix's first character, below 0.2
    /// the whole prefix, and the remaining 0.2..1.0 reveals the name one
    /// character at a time (complete exactly at 1.0).
    pub fn visible(&self, progress: f64) -> String {
        let p = clamp01(progress);
        if p < 0.1 {
            return self.prefix.chars().take(1).collect();
        }
        if p < 0.2 {
            return self.prefix.clone();
        }

        let t = (p - 0.2) / 0.8;
        let shown = (t * self.name.chars().count() as f64) as usize;
        let mut out = self.prefix.clone();
        out.extend(self.name.chars().take(shown));
        out
    }
}
