use serde_json::{Map, Value, json};
use thiserror::Error;
use yomi_types::{Definition, Rank, Term, TermEntry};

/// Fixed-arity JSON array encoding of one kind of dictionary entry.
pub trait Entry: TermEntry {
    /// Default bank file prefix for this kind.
    const BANK_NAME: &'static str;
    /// Default `sequenced` flag of `index.json`.
    const SEQUENCED: Option<bool> = None;
    /// Default `frequencyMode` of `index.json`.
    const FREQUENCY_MODE: Option<&'static str> = None;

    fn from_json(value: &Value) -> Result<Self, EntryError>;

    fn to_json(&self) -> Value;
}

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found: String,
    },
    #[error("definition list is empty")]
    EmptyDefinitions,
    #[error("unsupported string frequency {0:?}")]
    UnsupportedFrequency(String),
}

fn shape(expected: &'static str, found: &Value) -> EntryError {
    EntryError::Shape {
        expected,
        found: found.to_string(),
    }
}

fn fields<'a, const N: usize>(
    value: &'a Value,
    expected: &'static str,
) -> Result<&'a [Value; N], EntryError> {
    value
        .as_array()
        .and_then(|items| <&[Value; N]>::try_from(items.as_slice()).ok())
        .ok_or_else(|| shape(expected, value))
}

fn string(value: &Value, expected: &'static str) -> Result<String, EntryError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| shape(expected, value))
}

/// Tag fields may be `null` in older archives.
fn tags(value: &Value, expected: &'static str) -> Result<String, EntryError> {
    match value {
        Value::Null => Ok(String::new()),
        _ => string(value, expected),
    }
}

fn integer(value: &Value, expected: &'static str) -> Result<i64, EntryError> {
    value.as_i64().ok_or_else(|| shape(expected, value))
}

impl Entry for Definition {
    const BANK_NAME: &'static str = "term_bank";
    const SEQUENCED: Option<bool> = Some(true);

    /// `[text, reading, def_tags, conjugation, popularity, [definitions], sequence, top_tags]`
    fn from_json(value: &Value) -> Result<Self, EntryError> {
        let [text, reading, def_tags, conjugation, popularity, definitions, sequence, top_tags] =
            fields::<8>(value, "8-element definition array")?;

        let definitions = definitions
            .as_array()
            .ok_or_else(|| shape("definition list", definitions))?
            .iter()
            .map(|d| string(d, "definition text"))
            .collect::<Result<Vec<_>, _>>()?;
        if definitions.is_empty() {
            return Err(EntryError::EmptyDefinitions);
        }

        Ok(Definition {
            term: Term::new(string(text, "term text")?, string(reading, "reading")?),
            def_tags: tags(def_tags, "definition tags")?,
            conjugation: tags(conjugation, "conjugation rules")?,
            popularity: integer(popularity, "integer popularity")?,
            definitions,
            sequence_number: integer(sequence, "integer sequence number")?,
            top_tags: tags(top_tags, "term tags")?,
        })
    }

    fn to_json(&self) -> Value {
        json!([
            self.term.text,
            self.term.reading,
            self.def_tags,
            self.conjugation,
            self.popularity,
            self.definitions,
            self.sequence_number,
            self.top_tags,
        ])
    }
}

impl Entry for Rank {
    const BANK_NAME: &'static str = "term_meta_bank";
    const SEQUENCED: Option<bool> = Some(false);
    const FREQUENCY_MODE: Option<&'static str> = Some("rank-based");

    /// `[text, "freq", data]` where data is one of `n`, `{value}`,
    /// `{value, displayValue}`, `{frequency}` or `{reading, frequency}` and
    /// `frequency` is itself `n` or `{value[, displayValue]}`.
    fn from_json(value: &Value) -> Result<Self, EntryError> {
        let [text, mode, data] = fields::<3>(value, "3-element term meta array")?;
        if mode.as_str() != Some("freq") {
            return Err(shape("mode \"freq\"", mode));
        }
        let text = string(text, "term text")?;
        let (reading, rank) = match data {
            Value::Object(obj) if obj.contains_key("frequency") => {
                let reading = obj
                    .get("reading")
                    .map(|r| string(r, "reading"))
                    .transpose()?;
                (reading, frequency(&obj["frequency"])?)
            }
            _ => (None, frequency(data)?),
        };
        Ok(Rank::new(Term::new(text, reading.unwrap_or_default()), rank))
    }

    fn to_json(&self) -> Value {
        let mut data = Map::new();
        data.insert("reading".into(), self.term.reading.clone().into());
        data.insert("frequency".into(), self.rank.into());
        json!([self.term.text, "freq", data])
    }
}

/// Numeric frequency, bare or wrapped as `{value[, displayValue]}`.
fn frequency(value: &Value) -> Result<usize, EntryError> {
    match value {
        Value::String(s) => Err(EntryError::UnsupportedFrequency(s.clone())),
        Value::Object(obj) => match obj.get("value") {
            Some(inner) => frequency(inner),
            None => Err(shape("{value} frequency object", value)),
        },
        _ => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| shape("non-negative integer frequency", value)),
    }
}
