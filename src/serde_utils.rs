#![cfg(feature = "serde")]

// Custom `Serialize`/`Deserialize` implementations for tiles, plays and boards, using the same
// strings as their `Display` and `FromStr` implementations (eg, "7E", "7E-6E" and FEN).

use crate::board::state::BoardState;
use crate::play::Play;
use crate::tiles::Tile;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Formatter;
use std::marker::PhantomData;
use std::str::FromStr;

/// Deserializes any value that can be parsed from a string.
struct NotationVisitor<T> {
    expecting: &'static str,
    _marker: PhantomData<T>,
}

impl<T> NotationVisitor<T> {
    fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            _marker: PhantomData,
        }
    }
}

impl<'de, T: FromStr> Visitor<'de> for NotationVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        T::from_str(value).map_err(|_| E::invalid_value(serde::de::Unexpected::Str(value), &self))
    }
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(NotationVisitor::new("a tile, eg, '7E'"))
    }
}

impl Serialize for Play {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de> Deserialize<'de> for Play {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(NotationVisitor::new("a play, eg, '7E-6E'"))
    }
}

impl Serialize for BoardState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_fen().as_str())
    }
}

impl<'de> Deserialize<'de> for BoardState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(NotationVisitor::new(
            "a string representing the board state in FEN format",
        ))
    }
}
