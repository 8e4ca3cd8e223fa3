//! Strategies turning an item's raw key value into key atoms

use crate::collection::Item;
use crate::options::Options;
use key_tree::{Atom, KeyError, KeyNormalizer};
use serde_json::Value;

/// Reads the key of a single item
///
/// `raw` is the value of the item's key field. Returning `Ok(None)` skips the
/// item. Returning an empty sequence violates the contract and aborts the
/// build.
///
/// Any `Fn(&Value, &Item, &Options)` closure with the same return type is a
/// key reader.
pub trait KeyReader: Send + Sync {
    fn read_key(
        &self,
        raw: &Value,
        item: &Item,
        options: &Options,
    ) -> Result<Option<Vec<Atom>>, KeyError>;
}

impl<F> KeyReader for F
where
    F: Fn(&Value, &Item, &Options) -> Result<Option<Vec<Atom>>, KeyError> + Send + Sync,
{
    fn read_key(
        &self,
        raw: &Value,
        item: &Item,
        options: &Options,
    ) -> Result<Option<Vec<Atom>>, KeyError> {
        self(raw, item, options)
    }
}

/// Splits string keys on the configured separator and coerces components
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeyReader;

impl KeyReader for DefaultKeyReader {
    fn read_key(
        &self,
        raw: &Value,
        _item: &Item,
        options: &Options,
    ) -> Result<Option<Vec<Atom>>, KeyError> {
        let normalizer = KeyNormalizer::new(options.key_separator());
        Ok(normalizer.normalize(Some(raw))?.map(|key| key.into_atoms()))
    }
}

/// Accepts sequences whose components need no further processing
#[derive(Debug, Clone, Copy, Default)]
pub struct AsIsKeyReader;

impl KeyReader for AsIsKeyReader {
    fn read_key(
        &self,
        raw: &Value,
        _item: &Item,
        _options: &Options,
    ) -> Result<Option<Vec<Atom>>, KeyError> {
        Ok(KeyNormalizer::as_is()
            .normalize(Some(raw))?
            .map(|key| key.into_atoms()))
    }
}
