//! Template pattern compiler.
//!
//! A template has the shape `{kind}[alternatives]{count}[alternatives]{count}...`
//! where `kind` is one of the Avro primitive names (except `null` and `bytes`),
//! each `[...]` holds `|`-separated options and `{count}` is a decimal repeat.
//!
//! Options:
//! - `a-z`, `A-Z`, `0-9` - one random character from the class
//! - `a-Z` - upper or lower case letter (two alternatives)
//! - `uuid()` - a freshly generated v4 UUID
//! - `timestamp_ms()` - the current Unix time in milliseconds
//! - anything else - the literal text, surrounding whitespace removed
//!
//! Compilation happens once; [`CompiledPattern::generate`] renders the segments
//! and parses the rendered text into a value of the declared kind.

use crate::error::GeneratorError;
use rand::Rng;
use record_schema::{ScalarKind, Value};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while compiling a template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Malformed pattern '{template}': {reason}")]
    Malformed { template: String, reason: String },

    #[error("Unsupported pattern type '{0}'")]
    UnsupportedKind(String),

    #[error("Empty option list in segment {segment} of pattern '{template}'")]
    EmptyOptions { template: String, segment: usize },

    #[error("Repeat count '{count}' in segment {segment} of pattern '{template}' must be a non-negative integer")]
    InvalidRepeat {
        template: String,
        segment: usize,
        count: String,
    },
}

/// Character class an option draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
}

impl CharClass {
    fn alphabet(&self) -> &'static [u8] {
        match self {
            CharClass::Lowercase => b"abcdefghijklmnopqrstuvwxyz",
            CharClass::Uppercase => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharClass::Digit => b"0123456789",
        }
    }
}

/// Option whose text is produced at invocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicFunction {
    /// `uuid()`
    Uuid,
    /// `timestamp_ms()`
    TimestampMs,
}

impl DynamicFunction {
    fn call(&self) -> String {
        match self {
            DynamicFunction::Uuid => Uuid::new_v4().to_string(),
            DynamicFunction::TimestampMs => chrono::Utc::now().timestamp_millis().to_string(),
        }
    }
}

/// One alternative inside a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSource {
    Class(CharClass),
    Literal(String),
    Function(DynamicFunction),
}

impl OptionSource {
    fn render_into<R: Rng>(&self, rng: &mut R, out: &mut String) {
        match self {
            OptionSource::Class(class) => {
                let alphabet = class.alphabet();
                out.push(char::from(alphabet[rng.random_range(0..alphabet.len())]));
            }
            OptionSource::Literal(text) => out.push_str(text),
            OptionSource::Function(function) => out.push_str(&function.call()),
        }
    }
}

/// A `[options]{count}` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Number of times an alternative is drawn.
    pub repeat: usize,
    /// Non-empty list of alternatives.
    pub alternatives: Vec<OptionSource>,
}

/// A compiled template: declared kind plus its segments in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    kind: ScalarKind,
    segments: Vec<Segment>,
}

impl CompiledPattern {
    /// Compile a template string.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let malformed = |reason: &str| PatternError::Malformed {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let rest = template
            .strip_prefix('{')
            .ok_or_else(|| malformed("expected '{' followed by a type name"))?;
        let (kind_name, mut rest) = rest
            .split_once('}')
            .ok_or_else(|| malformed("unterminated type name"))?;
        let kind = ScalarKind::from_type_name(kind_name)
            .ok_or_else(|| PatternError::UnsupportedKind(kind_name.to_string()))?;

        let mut segments = Vec::new();
        while !rest.is_empty() {
            let segment = segments.len();
            let body = rest
                .strip_prefix('[')
                .ok_or_else(|| malformed("expected '[' to open an option list"))?;
            let (options, after) = body
                .split_once(']')
                .ok_or_else(|| malformed("unterminated option list"))?;
            let count = after
                .strip_prefix('{')
                .ok_or_else(|| malformed("expected '{' with a repeat count after ']'"))?;
            let (count, after) = count
                .split_once('}')
                .ok_or_else(|| malformed("unterminated repeat count"))?;

            let repeat = parse_repeat(count).ok_or_else(|| PatternError::InvalidRepeat {
                template: template.to_string(),
                segment,
                count: count.to_string(),
            })?;

            if options.is_empty() {
                return Err(PatternError::EmptyOptions {
                    template: template.to_string(),
                    segment,
                });
            }
            let mut alternatives = Vec::new();
            for token in options.split('|') {
                push_option(token.trim(), &mut alternatives);
            }

            segments.push(Segment {
                repeat,
                alternatives,
            });
            rest = after;
        }

        if segments.is_empty() {
            return Err(malformed("at least one segment is required"));
        }

        Ok(Self { kind, segments })
    }

    /// Declared kind of the values this pattern produces.
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render the segments into text without parsing it.
    pub fn render<R: Rng>(&self, rng: &mut R) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            for _ in 0..segment.repeat {
                let pick = rng.random_range(0..segment.alternatives.len());
                segment.alternatives[pick].render_into(rng, &mut out);
            }
        }
        out
    }

    /// Render the segments and parse the result as the declared kind.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Value, GeneratorError> {
        parse_text(self.kind, self.render(rng))
    }
}

/// Parse rendered text into a value of `kind`.
pub fn parse_text(kind: ScalarKind, text: String) -> Result<Value, GeneratorError> {
    let parsed = match kind {
        ScalarKind::String => return Ok(Value::String(text)),
        ScalarKind::Boolean => text.parse::<bool>().ok().map(Value::Boolean),
        ScalarKind::Int => text.parse::<i32>().ok().map(Value::Int),
        ScalarKind::Long => text.parse::<i64>().ok().map(Value::Long),
        ScalarKind::Float => text.parse::<f32>().ok().map(Value::Float),
        ScalarKind::Double => text.parse::<f64>().ok().map(Value::Double),
    };
    parsed.ok_or_else(|| GeneratorError::Parse { value: text, kind })
}

fn parse_repeat(count: &str) -> Option<usize> {
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    count.parse::<usize>().ok()
}

/// Classify one trimmed token.
fn push_option(token: &str, alternatives: &mut Vec<OptionSource>) {
    match token {
        "a-z" => alternatives.push(OptionSource::Class(CharClass::Lowercase)),
        "A-Z" => alternatives.push(OptionSource::Class(CharClass::Uppercase)),
        "0-9" => alternatives.push(OptionSource::Class(CharClass::Digit)),
        "a-Z" => {
            alternatives.push(OptionSource::Class(CharClass::Uppercase));
            alternatives.push(OptionSource::Class(CharClass::Lowercase));
        }
        "uuid()" => alternatives.push(OptionSource::Function(DynamicFunction::Uuid)),
        "timestamp_ms()" => {
            alternatives.push(OptionSource::Function(DynamicFunction::TimestampMs))
        }
        literal => alternatives.push(OptionSource::Literal(literal.to_string())),
    }
}
