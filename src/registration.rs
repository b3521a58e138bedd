//! Name-keyed loss catalog.
//!
//! A catalog is an ordered list of [`Registration`] entries built once per
//! zone. Construction is push-only; duplicate names are resolved at lookup
//! time by [`LookupPolicy`].

use crate::error::{LossError, LossResult};
use crate::loss::{Loss, LossHandle};
use crate::params::LossParams;
use crate::traits::PackedValue;

/// Separates a loss name from its embedded parameters.
pub const PARAM_SEPARATOR: u8 = b':';

/// Which entry wins when several registrations share a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precedence {
    /// Earliest declaration wins.
    #[default]
    First,
    /// Latest declaration wins.
    Last,
}

/// How registered names are compared against the requested name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMatching {
    /// Byte-exact.
    #[default]
    Sensitive,
    /// ASCII letters compare case-insensitively; other bytes byte-exact.
    AsciiInsensitive,
}

/// Lookup policy for a catalog. The default is first-match, case-sensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupPolicy {
    pub precedence: Precedence,
    pub case: CaseMatching,
}

impl LookupPolicy {
    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn with_case(mut self, case: CaseMatching) -> Self {
        self.case = case;
        self
    }
}

/// Construction-time arguments that are not embedded in the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LossConfig {
    /// Number of model outputs: 1 for regression and binary classification,
    /// the class count for multiclass.
    pub output_count: usize,
}

impl Default for LossConfig {
    fn default() -> Self {
        Self { output_count: 1 }
    }
}

/// A loss type that can be placed in a catalog.
pub trait RegistrableLoss<P: PackedValue>: Loss<P> + Sized + 'static {
    /// Registered name, matched against the text before `:`.
    const NAME: &'static str;

    /// Build from config and embedded parameters. Implementations take the
    /// parameters they understand; unknown keys are rejected afterwards.
    fn construct(config: &LossConfig, params: &mut LossParams<'_>) -> LossResult<Self>;
}

pub type LossFactory<P> = fn(&LossConfig, &mut LossParams<'_>) -> LossResult<Box<dyn Loss<P>>>;

/// Catalog entry binding a name to a factory.
pub struct Registration<P: PackedValue> {
    name: &'static str,
    factory: LossFactory<P>,
}

impl<P: PackedValue> Registration<P> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn construct(
        &self,
        config: &LossConfig,
        params: &mut LossParams<'_>,
    ) -> LossResult<Box<dyn Loss<P>>> {
        (self.factory)(config, params)
    }

    /// Match `spec` against this entry. On success returns the bytes after
    /// the separator, or `None` when the spec is the bare name.
    fn match_spec<'s>(&self, spec: &'s [u8], case: CaseMatching) -> Option<Option<&'s [u8]>> {
        let name = self.name.as_bytes();
        if spec.len() < name.len() {
            return None;
        }
        let (head, rest) = spec.split_at(name.len());
        let equal = match case {
            CaseMatching::Sensitive => head == name,
            CaseMatching::AsciiInsensitive => head.eq_ignore_ascii_case(name),
        };
        if !equal {
            return None;
        }
        match rest.split_first() {
            None => Some(None),
            Some((&PARAM_SEPARATOR, params)) => Some(Some(params)),
            Some(_) => None,
        }
    }
}

impl<P: PackedValue> Clone for Registration<P> {
    fn clone(&self) -> Self {
        Self { name: self.name, factory: self.factory }
    }
}

impl<P: PackedValue> std::fmt::Debug for Registration<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration").field("name", &self.name).finish()
    }
}

fn build<P: PackedValue, L: RegistrableLoss<P>>(
    config: &LossConfig,
    params: &mut LossParams<'_>,
) -> LossResult<Box<dyn Loss<P>>> {
    Ok(Box::new(L::construct(config, params)?))
}

/// Register `L` for packed type `P`. Shared verbatim by every zone.
#[inline(always)]
pub fn register<P: PackedValue, L: RegistrableLoss<P>>() -> Registration<P> {
    Registration { name: L::NAME, factory: build::<P, L> }
}

/// Ordered, immutable collection of registrations.
#[derive(Debug, Clone)]
pub struct LossCatalog<P: PackedValue> {
    entries: Vec<Registration<P>>,
    policy: LookupPolicy,
}

impl<P: PackedValue> LossCatalog<P> {
    pub fn new(entries: Vec<Registration<P>>, policy: LookupPolicy) -> Self {
        Self { entries, policy }
    }

    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Registration<P>] {
        &self.entries
    }

    /// Registered names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    /// Locate the entry for `spec` under this catalog's policy.
    ///
    /// Returns the entry and the embedded parameter bytes, if any.
    pub fn find<'s>(&self, spec: &'s [u8]) -> Option<(&Registration<P>, Option<&'s [u8]>)> {
        let case = self.policy.case;
        let mut hits = self
            .entries
            .iter()
            .filter_map(|e| e.match_spec(spec, case).map(|params| (e, params)));
        match self.policy.precedence {
            Precedence::First => hits.next(),
            Precedence::Last => hits.last(),
        }
    }

    /// Look up `spec` and construct the loss it names.
    pub fn create(&self, output_count: usize, spec: &[u8]) -> LossResult<LossHandle<P>> {
        let Some((entry, raw_params)) = self.find(spec) else {
            let name = String::from_utf8_lossy(spec).into_owned();
            log::debug!("no loss registered under {name:?}");
            return Err(LossError::UnknownLoss(name));
        };

        let mut params = match raw_params {
            None => LossParams::empty(),
            Some(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(|_| {
                    LossError::MalformedParams("parameters are not valid UTF-8".into())
                })?;
                LossParams::parse(text)?
            }
        };

        let config = LossConfig { output_count };
        let loss = entry.construct(&config, &mut params)?;
        params.finish(entry.name)?;
        Ok(LossHandle::new(loss))
    }
}
