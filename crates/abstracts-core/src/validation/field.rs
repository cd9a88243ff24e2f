use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Nome,
    Cpf,
    Estado,
    Cidade,
    Instituicao,
    Email,
    Areas,
    Resumo,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Nome => "nome",
            Field::Cpf => "cpf",
            Field::Estado => "estado",
            Field::Cidade => "cidade",
            Field::Instituicao => "instituicao",
            Field::Email => "email",
            Field::Areas => "areas",
            Field::Resumo => "resumo",
            Field::Password => "password",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Field-scoped validation failures.
///
/// Every violated rule is recorded in evaluation order; consumers usually want
/// only the first message per field, which is what serialization emits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// First violated rule's message for `field`.
    pub fn first(&self, field: Field) -> Option<&str> {
        self.errors
            .get(&field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// All messages recorded for `field`.
    pub fn messages(&self, field: Field) -> &[String] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(field, first message)` pairs in field order.
    pub fn iter_first(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors
            .iter()
            .filter_map(|(field, messages)| messages.first().map(|m| (*field, m.as_str())))
    }

    /// Field name to first message, as rendered in API responses.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter_first()
            .map(|(field, message)| (field.as_str().to_string(), message.to_string()))
            .collect()
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;
        for (field, message) in self.iter_first() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, message) in self.iter_first() {
            map.serialize_entry(field.as_str(), message)?;
        }
        map.end()
    }
}
