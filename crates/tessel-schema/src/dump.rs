//! Human-readable schema dump.
//!
//! One line per item, in registration order. Struct members and function
//! parameters are listed under their owner.

use std::fmt;

use tessel_core::{Colors, StringId};

use crate::Schema;

/// Render `schema` as text.
pub fn dump(schema: &Schema, colors: Colors) -> String {
    Dump { schema, colors }.to_string()
}

struct Dump<'a> {
    schema: &'a Schema,
    colors: Colors,
}

impl Dump<'_> {
    fn quoted(&self, role: &str, text: &str) -> String {
        self.colors.paint(role, format_args!("'{text}'"))
    }

    fn string(&self, role: &str, id: StringId) -> String {
        match self.schema.strings().get_string(id) {
            Some(text) => self.quoted(role, text),
            None => format!("#{}", id.as_u32()),
        }
    }

    fn ty(&self, id: StringId) -> String {
        self.string(self.colors.ty, id)
    }

    fn field(&self, id: StringId) -> String {
        self.string(self.colors.field, id)
    }

    fn hashed(&self, hash: u32) -> String {
        match self.schema.strings().get_string_by_hash(hash) {
            Some(text) => self.quoted(self.colors.ty, text),
            None => format!("0x{hash:08X}"),
        }
    }

    fn strings(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.colors;
        writeln!(f, "Strings:")?;
        for (id, text, entry) in self.schema.strings().iter() {
            writeln!(
                f,
                "  {}[{}] 0x{:08X}{} {} {}offset:{}{}",
                c.dim,
                id.as_u32(),
                entry.hash,
                c.reset,
                self.quoted(c.ty, text),
                c.dim,
                entry.offset,
                c.reset
            )?;
        }
        Ok(())
    }

    fn types(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.colors;
        writeln!(f, "Types:")?;
        for (id, entry) in self.schema.types().iter() {
            writeln!(
                f,
                "  {}[{}]{} {} {}size:{} flags:0x{:X}{} {} alias:{} {}elements:{}{}",
                c.dim,
                id.as_u32(),
                c.reset,
                self.hashed(entry.hash),
                c.dim,
                entry.data_size,
                entry.flags.bits(),
                c.reset,
                c.paint(c.flags, entry.flags),
                self.ty(entry.aliased_type_id),
                c.dim,
                entry.num_elements,
                c.reset
            )?;
        }
        Ok(())
    }

    fn structs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.colors;
        writeln!(f, "Structs:")?;
        for (id, def) in self.schema.structs().iter() {
            writeln!(
                f,
                "  {}[{}]{} {} {}size:{} align:{} members:{}{}",
                c.dim,
                id.as_u32(),
                c.reset,
                self.ty(def.name_id()),
                c.dim,
                def.total_size_with_padding(),
                def.alignment(),
                def.num_members(),
                c.reset
            )?;
            for (i, member) in def.members().iter().enumerate() {
                writeln!(
                    f,
                    "    {}[{i}]{} {} type:{} {}size:{} padding:{}{}",
                    c.dim,
                    c.reset,
                    self.field(member.name_id),
                    self.ty(member.type_id),
                    c.dim,
                    member.data_size,
                    member.alignment_padding,
                    c.reset
                )?;
            }
        }
        Ok(())
    }

    fn functions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.colors;
        writeln!(f, "Functions:")?;
        for (id, def) in self.schema.functions().iter() {
            writeln!(
                f,
                "  {}[{}]{} {} returns:{} {}payload:{} inputs:{} outputs:{}{}",
                c.dim,
                id.as_u32(),
                c.reset,
                self.ty(def.name_id()),
                self.ty(def.return_type_id()),
                c.dim,
                def.parameter_data_size(),
                def.num_inputs(),
                def.num_outputs(),
                c.reset
            )?;
            for param in def.parameters() {
                writeln!(
                    f,
                    "    {}[{}]{} {} type:{} {}mode:{}{}",
                    c.dim,
                    param.index,
                    c.reset,
                    self.field(param.name_id),
                    self.ty(param.type_id),
                    c.dim,
                    param.mode,
                    c.reset
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.strings(f)?;
        self.types(f)?;
        self.structs(f)?;
        self.functions(f)
    }
}
