//! Decoded argument values.

use serde::{Serialize, Serializer};

use tessel_core::Colors;

/// A value read from, or written to, an argument payload.
///
/// `Struct` keeps members in layout order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f32),
    Array(Vec<Value>),
    Struct(Vec<(String, Value)>),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(x) => serializer.serialize_f32(*x),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Struct(fields) => serializer.collect_map(fields.iter().map(|(k, v)| (k, v))),
        }
    }
}

impl Value {
    /// Convert parsed JSON. Objects keep their key order.
    ///
    /// Returns `None` for strings, booleans and null.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        Some(match json {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64()? as f32)
                }
            }
            serde_json::Value::Array(items) => {
                Value::Array(items.iter().map(Value::from_json).collect::<Option<_>>()?)
            }
            serde_json::Value::Object(fields) => Value::Struct(
                fields
                    .iter()
                    .map(|(k, v)| Some((k.clone(), Value::from_json(v)?)))
                    .collect::<Option<_>>()?,
            ),
            _ => return None,
        })
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
        }
    }

    /// Render as JSON, jq style: keys in the field color, numbers in the
    /// number color, punctuation dim. `pretty` indents by two spaces.
    pub fn format(&self, pretty: bool, colors: Colors) -> String {
        let mut printer = Printer::new(pretty, colors);
        printer.value(self);
        printer.out
    }
}

/// Render decoded arguments as one JSON object, see [`Value::format`].
pub fn format_arguments(arguments: &[(String, Value)], pretty: bool, colors: Colors) -> String {
    let mut printer = Printer::new(pretty, colors);
    printer.object(arguments);
    printer.out
}

struct Printer {
    out: String,
    colors: Colors,
    pretty: bool,
    depth: usize,
}

impl Printer {
    fn new(pretty: bool, colors: Colors) -> Self {
        Self {
            out: String::new(),
            colors,
            pretty,
            depth: 0,
        }
    }

    fn value(&mut self, value: &Value) {
        match value {
            Value::Int(n) => self.number(&n.to_string()),
            Value::UInt(n) => self.number(&n.to_string()),
            Value::Float(x) => self.number(&float_text(*x)),
            Value::Array(items) => self.container('[', ']', items, |p, item| p.value(item)),
            Value::Struct(fields) => self.object(fields),
        }
    }

    fn object(&mut self, fields: &[(String, Value)]) {
        self.container('{', '}', fields, |p, (key, value)| {
            let quoted = serde_json::Value::from(key.as_str()).to_string();
            p.colored(p.colors.field, &quoted);
            p.punct(':');
            if p.pretty {
                p.out.push(' ');
            }
            p.value(value);
        });
    }

    /// Bracketed, comma-separated items. Empty containers stay on one line.
    fn container<T>(&mut self, open: char, close: char, items: &[T], mut item: impl FnMut(&mut Self, &T)) {
        self.punct(open);
        if !items.is_empty() {
            self.depth += 1;
            for (n, it) in items.iter().enumerate() {
                if n > 0 {
                    self.punct(',');
                }
                self.line_break();
                item(self, it);
            }
            self.depth -= 1;
            self.line_break();
        }
        self.punct(close);
    }

    fn line_break(&mut self) {
        if self.pretty {
            self.out.push('\n');
            self.out.extend(std::iter::repeat_n(' ', self.depth * 2));
        }
    }

    fn number(&mut self, text: &str) {
        self.colored(self.colors.number, text);
    }

    fn punct(&mut self, c: char) {
        self.out.push_str(self.colors.dim);
        self.out.push(c);
        self.out.push_str(self.colors.reset);
    }

    fn colored(&mut self, color: &str, text: &str) {
        self.out.push_str(color);
        self.out.push_str(text);
        self.out.push_str(self.colors.reset);
    }
}

/// JSON spelling of an `f32`: always has a fraction or exponent, `null`
/// when not finite.
fn float_text(x: f32) -> String {
    if !x.is_finite() {
        return "null".to_owned();
    }
    let text = x.to_string();
    if text.contains(['.', 'e']) {
        text
    } else {
        format!("{text}.0")
    }
}
