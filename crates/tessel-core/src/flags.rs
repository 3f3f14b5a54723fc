//! Type capability and shape flags.

use std::fmt;

bitflags::bitflags! {
    /// Flags carried by every registered type.
    ///
    /// `INPUT`/`OUTPUT` double as the direction mode of function parameters.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u32 {
        const INPUT = 1 << 0;
        const OUTPUT = 1 << 1;
        const POD = 1 << 2;
        const STRUCT = 1 << 3;
        const POINTER = 1 << 4;
        const REFERENCE = 1 << 5;
        const ALIAS = 1 << 6;
        const ARRAY = 1 << 7;
        const ENDIANSWAP = 1 << 8;
    }
}

impl TypeFlags {
    /// Flags that require a positive `dataSize` at registration.
    pub const SIZED: Self = Self::POD
        .union(Self::POINTER)
        .union(Self::REFERENCE)
        .union(Self::ARRAY);
}

/// Pipe-separated flag names, e.g. `INPUT|POD`. Empty flags print `NONE`.
impl fmt::Display for TypeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        for (i, (name, _)) in self.iter_names().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
