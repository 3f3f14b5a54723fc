//! Terminal palette for schema dumps and decoded arguments.
//!
//! Each field is a role rather than a hue, so the dump and the JSON printer
//! agree on what a color means.

#[derive(Clone, Copy, Debug)]
pub struct Colors {
    /// Type, struct and function names.
    pub ty: &'static str,
    /// Struct members, parameters and JSON object keys.
    pub field: &'static str,
    /// Decoded numbers.
    pub number: &'static str,
    /// Type flag sets.
    pub flags: &'static str,
    /// Ids, sizes, offsets and punctuation.
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        ty: "\x1b[36m",
        field: "\x1b[34m",
        number: "\x1b[32m",
        flags: "\x1b[33m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Every role empty, so callers can emit codes unconditionally.
    pub const OFF: Self = Self {
        ty: "",
        field: "",
        number: "",
        flags: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// `text` wrapped in `role` and a reset.
    pub fn paint(&self, role: &str, text: impl std::fmt::Display) -> String {
        format!("{role}{text}{}", self.reset)
    }
}
