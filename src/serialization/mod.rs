//! # Serialization Module
//!
//! A generic tagged key-value record and the adapter trait that lets layout
//! types encode themselves into one.
//!
//! [`TagCompound`] abstracts over whatever keyed store a host uses for
//! persistence. The crate ships one implementation, [`JsonTag`], backed by a
//! `serde_json` object so tags can be inspected or written out as JSON.

use crate::HallwaysResult;
use serde_json::{Map, Value};

/// JSON-object backed tag record.
pub type JsonTag = Map<String, Value>;

/// A keyed record of primitive values.
///
/// Getters return `None` when the key is missing or holds a value of another
/// type.
pub trait TagCompound {
    fn contains_key(&self, key: &str) -> bool;

    fn get_byte(&self, key: &str) -> Option<i8>;
    fn get_short(&self, key: &str) -> Option<i16>;
    fn get_int(&self, key: &str) -> Option<i32>;
    fn get_long(&self, key: &str) -> Option<i64>;
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_double(&self, key: &str) -> Option<f64>;
    fn get_string(&self, key: &str) -> Option<String>;

    fn set_byte(&mut self, key: &str, value: i8);
    fn set_short(&mut self, key: &str, value: i16);
    fn set_int(&mut self, key: &str, value: i32);
    fn set_long(&mut self, key: &str, value: i64);
    fn set_bool(&mut self, key: &str, value: bool);
    fn set_double(&mut self, key: &str, value: f64);
    fn set_string(&mut self, key: &str, value: &str);
}

/// Types that can be written into and read back from a [`TagCompound`].
pub trait TagSerializable: Sized {
    /// Writes this value's state into `tag`.
    fn write_tag<T: TagCompound>(&self, tag: &mut T);

    /// Rebuilds a value from `tag`, failing on missing or malformed entries.
    fn read_tag<T: TagCompound>(tag: &T) -> HallwaysResult<Self>;
}

impl TagCompound for JsonTag {
    fn contains_key(&self, key: &str) -> bool {
        Map::contains_key(self, key)
    }

    fn get_byte(&self, key: &str) -> Option<i8> {
        self.get_long(key).and_then(|v| i8::try_from(v).ok())
    }

    fn get_short(&self, key: &str) -> Option<i16> {
        self.get_long(key).and_then(|v| i16::try_from(v).ok())
    }

    fn get_int(&self, key: &str) -> Option<i32> {
        self.get_long(key).and_then(|v| i32::try_from(v).ok())
    }

    fn get_long(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    fn get_double(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn set_byte(&mut self, key: &str, value: i8) {
        self.insert(key.to_string(), Value::from(value));
    }

    fn set_short(&mut self, key: &str, value: i16) {
        self.insert(key.to_string(), Value::from(value));
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.insert(key.to_string(), Value::from(value));
    }

    fn set_long(&mut self, key: &str, value: i64) {
        self.insert(key.to_string(), Value::from(value));
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.insert(key.to_string(), Value::from(value));
    }

    fn set_double(&mut self, key: &str, value: f64) {
        self.insert(key.to_string(), Value::from(value));
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), Value::from(value));
    }
}
