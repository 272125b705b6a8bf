use std::collections::HashMap;

use thiserror::Error;

/// Categorical fields that are dictionary encoded by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Exchange,
    Currency,
    Industry,
    Company,
}

impl Field {
    /// All encoded fields, in persisted-file order.
    pub const ALL: [Field; 4] = [
        Field::Exchange,
        Field::Currency,
        Field::Industry,
        Field::Company,
    ];

    /// Returns the identifier used for the field's persisted dictionary file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Exchange => "exchanges",
            Field::Currency => "currencies",
            Field::Industry => "industries",
            Field::Company => "companies",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dictionary errors.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// Decode was asked for a code that was never allocated.
    #[error("Unknown code {code} for field '{field}' ({known} codes allocated)")]
    UnknownCode { field: Field, code: u32, known: usize },

    /// A persisted mapping is not a dense, duplicate-free code assignment.
    #[error("Corrupt dictionary for field '{field}': {reason}")]
    CorruptMapping { field: Field, reason: String },
}

/// Bidirectional mapping between one field's string domain and dense codes.
///
/// Codes start at 0 and grow in encounter order. Once a code is assigned it
/// is never reassigned, which keeps previously encoded rows decodable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoricalDictionary {
    codes: HashMap<String, u32>,
    values: Vec<String>,
}

impl CategoricalDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the code for `value`, allocating the next unused code on
    /// first sight. Idempotent for repeated values.
    pub fn encode(&mut self, value: &str) -> u32 {
        if let Some(&code) = self.codes.get(value) {
            return code;
        }
        let code = self.values.len() as u32;
        self.codes.insert(value.to_string(), code);
        self.values.push(value.to_string());
        code
    }

    /// Looks up a value without allocating.
    pub fn code_of(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    /// Returns the value for an allocated `code`.
    pub fn decode(&self, field: Field, code: u32) -> Result<&str, DictionaryError> {
        self.values
            .get(code as usize)
            .map(String::as_str)
            .ok_or(DictionaryError::UnknownCode {
                field,
                code,
                known: self.values.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Exports the mapping in the persisted `{ value: code }` shape.
    pub fn to_map(&self) -> HashMap<String, u32> {
        self.codes.clone()
    }

    /// Rebuilds a dictionary from a persisted `{ value: code }` mapping.
    ///
    /// The mapping must assign exactly the codes `0..n`, each once.
    pub fn from_map(
        field: Field,
        map: HashMap<String, u32>,
    ) -> Result<Self, DictionaryError> {
        let mut values = vec![None; map.len()];
        for (value, code) in &map {
            let slot = values.get_mut(*code as usize).ok_or_else(|| {
                DictionaryError::CorruptMapping {
                    field,
                    reason: format!("code {} out of range for {} entries", code, map.len()),
                }
            })?;
            if slot.is_some() {
                return Err(DictionaryError::CorruptMapping {
                    field,
                    reason: format!("code {} assigned twice", code),
                });
            }
            *slot = Some(value.clone());
        }
        let values: Vec<String> = values.into_iter().map(Option::unwrap).collect();
        Ok(Self { codes: map, values })
    }
}

/// The per-field dictionaries owned by a columnar store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictionarySet {
    exchanges: CategoricalDictionary,
    currencies: CategoricalDictionary,
    industries: CategoricalDictionary,
    companies: CategoricalDictionary,
}

impl DictionarySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &CategoricalDictionary {
        match field {
            Field::Exchange => &self.exchanges,
            Field::Currency => &self.currencies,
            Field::Industry => &self.industries,
            Field::Company => &self.companies,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut CategoricalDictionary {
        match field {
            Field::Exchange => &mut self.exchanges,
            Field::Currency => &mut self.currencies,
            Field::Industry => &mut self.industries,
            Field::Company => &mut self.companies,
        }
    }

    /// Encodes `value` for `field`, allocating on first sight.
    pub fn encode(&mut self, field: Field, value: &str) -> u32 {
        self.get_mut(field).encode(value)
    }

    /// Decodes an allocated code back to its string value.
    pub fn decode(&self, field: Field, code: u32) -> Result<&str, DictionaryError> {
        self.get(field).decode(field, code)
    }

    /// Replaces one field's dictionary (used when loading persisted state).
    pub fn set(&mut self, field: Field, dictionary: CategoricalDictionary) {
        *self.get_mut(field) = dictionary;
    }
}
