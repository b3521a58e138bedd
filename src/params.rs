//! Parameters embedded after a loss name.
//!
//! Grammar: `name:key=value,key=value`. Whitespace around keys and values is
//! ignored. Each loss consumes the keys it understands; anything left over
//! is reported by [`LossParams::finish`].

use crate::error::{LossError, LossResult};

#[derive(Debug, Clone)]
struct Entry<'a> {
    key: &'a str,
    value: &'a str,
    consumed: bool,
}

/// Parsed `key=value` list for one loss construction.
#[derive(Debug, Clone, Default)]
pub struct LossParams<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> LossParams<'a> {
    /// No parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the text following `:`.
    pub fn parse(text: &'a str) -> LossResult<Self> {
        if text.trim().is_empty() {
            return Err(LossError::MalformedParams("empty parameter list".into()));
        }

        let mut entries: Vec<Entry<'a>> = Vec::new();
        for item in text.split(',') {
            let (key, value) = item.split_once('=').ok_or_else(|| {
                LossError::MalformedParams(format!("expected key=value, got `{}`", item.trim()))
            })?;
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() {
                return Err(LossError::MalformedParams(format!("missing key in `{}`", item.trim())));
            }
            if entries.iter().any(|e| e.key == key) {
                return Err(LossError::DuplicateParam(key.to_string()));
            }
            entries.push(Entry { key, value, consumed: false });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take a float parameter, falling back to `default` when absent.
    pub fn take_f64(&mut self, key: &'static str, default: f64) -> LossResult<f64> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) else {
            return Ok(default);
        };
        entry.consumed = true;
        entry.value.parse::<f64>().map_err(|_| LossError::MalformedValue {
            param: key,
            value: entry.value.to_string(),
        })
    }

    /// Fail on any key no loss consumed.
    pub fn finish(self, loss: &'static str) -> LossResult<()> {
        match self.entries.into_iter().find(|e| !e.consumed) {
            Some(e) => Err(LossError::UnknownParam { loss, param: e.key.to_string() }),
            None => Ok(()),
        }
    }
}
