//! The dynamic MessagePack value.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use bytes::Bytes;

use crate::codec::{Pack, Unpack};
use crate::error::{PackError, Result};
use crate::format::decode::{self, Integer};
use crate::format::{Family, encode};
use crate::sink::{Sink, Source};

/// String-keyed map of values, sorted by key.
pub type ValueMap = BTreeMap<String, Value>;

/// Any MessagePack document, held without a static Rust type.
///
/// Non-negative integers travel the same way whatever their signedness, so
/// equality compares `Int` and `UInt` by numeric value.
///
/// Strings are held as Rust `String`s, so a `str` payload that is not valid
/// UTF-8 fails to unpack with `BadFormat` even though the wire format itself
/// accepts any bytes there.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Binary(Vec<u8>),
    Array(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    /// Builds a value from a literal-style list.
    ///
    /// If every item is a two-element array whose first element is a string,
    /// the list becomes a map of those pairs (the first occurrence of a key
    /// wins). Any other list becomes an array. Only the top level is checked;
    /// an empty list is an empty map.
    pub fn from_list(items: Vec<Value>) -> Self {
        let is_map = items.iter().all(|item| match item {
            Self::Array(pair) => pair.len() == 2 && pair[0].is_string(),
            _ => false,
        });
        if !is_map {
            return Self::Array(items);
        }

        let mut map = ValueMap::new();
        for item in items {
            if let Self::Array(pair) = item {
                let mut pair = pair.into_iter();
                if let (Some(Self::String(key)), Some(value)) = (pair.next(), pair.next()) {
                    map.entry(key).or_insert(value);
                }
            }
        }
        Self::Map(map)
    }

    /// Number of elements: 0 for null, the length of arrays, maps and
    /// binaries, and 1 for every other scalar (strings included).
    pub fn size(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::Binary(b) => b.len(),
            Self::Array(items) => items.len(),
            Self::Map(map) => map.len(),
            _ => 1,
        }
    }

    /// Moves the value out, leaving `Null` behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// True for both signed and unsigned integers.
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_) | Self::UInt(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bool_mut(&mut self) -> Option<&mut bool> {
        match self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as an i64, if it is an integer that fits.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// In-place access to an `Int`. A `UInt` is not converted.
    pub fn as_int_mut(&mut self) -> Option<&mut i64> {
        match self {
            Self::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the value as a u64, if it is a non-negative integer.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(u) => Some(*u),
            Self::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// In-place access to a `UInt`. An `Int` is not converted.
    pub fn as_uint_mut(&mut self) -> Option<&mut u64> {
        match self {
            Self::UInt(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float_mut(&mut self) -> Option<&mut f64> {
        match self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a string reference, if it is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_binary_mut(&mut self) -> Option<&mut Vec<u8>> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a map key or an array position.
    ///
    /// Returns `None` if the value is not a container of the right kind or
    /// the entry does not exist. Never changes the value.
    pub fn at<I: ValueIndex>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }

    /// Mutable counterpart of [`at`](Self::at).
    pub fn at_mut<I: ValueIndex>(&mut self, index: I) -> Option<&mut Value> {
        index.index_into_mut(self)
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Binary(_) => "binary",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(i), Self::UInt(u)) | (Self::UInt(u), Self::Int(i)) => {
                u64::try_from(*i).is_ok_and(|i| i == *u)
            }
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Binary(a), Self::Binary(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

// -- Indexing --

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

/// A type that can index into a [`Value`]: `usize` for arrays, strings for maps.
pub trait ValueIndex: private::Sealed {
    #[doc(hidden)]
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value>;

    #[doc(hidden)]
    fn index_into_mut<'v>(&self, v: &'v mut Value) -> Option<&'v mut Value>;

    /// Used by `IndexMut`: panics where `index_into_mut` would return `None`,
    /// except that a string key promotes `Null` to a map and inserts `Null`
    /// for a missing key.
    #[doc(hidden)]
    fn index_or_insert<'v>(&self, v: &'v mut Value) -> &'v mut Value;
}

impl ValueIndex for usize {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        v.as_array()?.get(*self)
    }

    fn index_into_mut<'v>(&self, v: &'v mut Value) -> Option<&'v mut Value> {
        v.as_array_mut()?.get_mut(*self)
    }

    fn index_or_insert<'v>(&self, v: &'v mut Value) -> &'v mut Value {
        match v {
            Value::Array(items) => {
                let len = items.len();
                items.get_mut(*self).unwrap_or_else(|| {
                    panic!("cannot access index {self} of array of length {len}")
                })
            }
            other => panic!("cannot access index {self} of {}", other.kind()),
        }
    }
}

impl ValueIndex for str {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        v.as_map()?.get(self)
    }

    fn index_into_mut<'v>(&self, v: &'v mut Value) -> Option<&'v mut Value> {
        v.as_map_mut()?.get_mut(self)
    }

    fn index_or_insert<'v>(&self, v: &'v mut Value) -> &'v mut Value {
        if v.is_null() {
            *v = Value::Map(ValueMap::new());
        }
        match v {
            Value::Map(map) => map.entry(self.to_owned()).or_default(),
            other => panic!("cannot access key {self:?} of {}", other.kind()),
        }
    }
}

impl ValueIndex for String {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        self.as_str().index_into(v)
    }

    fn index_into_mut<'v>(&self, v: &'v mut Value) -> Option<&'v mut Value> {
        self.as_str().index_into_mut(v)
    }

    fn index_or_insert<'v>(&self, v: &'v mut Value) -> &'v mut Value {
        self.as_str().index_or_insert(v)
    }
}

impl<T: ValueIndex + ?Sized> ValueIndex for &T {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        (**self).index_into(v)
    }

    fn index_into_mut<'v>(&self, v: &'v mut Value) -> Option<&'v mut Value> {
        (**self).index_into_mut(v)
    }

    fn index_or_insert<'v>(&self, v: &'v mut Value) -> &'v mut Value {
        (**self).index_or_insert(v)
    }
}

/// Panics if the value is not a container of the right kind, or the entry is
/// missing. Use [`Value::at`] for a checked lookup.
impl<I: ValueIndex> Index<I> for Value {
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        match index.index_into(self) {
            Some(v) => v,
            None => panic!("no such entry in {}", self.kind()),
        }
    }
}

/// String keys turn `Null` into an empty map and insert missing keys as
/// `Null`. Panics on any other mismatch.
impl<I: ValueIndex> IndexMut<I> for Value {
    fn index_mut(&mut self, index: I) -> &mut Value {
        index.index_or_insert(self)
    }
}

// -- Convenience conversions --

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $wide:ty => $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v as $wide)
                }
            }
        )*
    };
}

impl_from_int!(Int: i64 => i8, i16, i32, i64, isize);
impl_from_int!(UInt: u64 => u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Binary(b.to_vec())
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Self::Binary(b.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<ValueMap> for Value {
    fn from(m: ValueMap) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

// -- Wire format --

impl Pack for Value {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        match self {
            Self::Null => encode::write_nil(out),
            Self::Bool(b) => encode::write_bool(out, *b),
            Self::Int(i) => encode::write_sint(out, *i),
            Self::UInt(u) => encode::write_uint(out, *u),
            Self::Float(v) => encode::write_f64(out, *v),
            Self::String(s) => encode::write_str(out, s),
            Self::Binary(b) => encode::write_bin(out, b),
            Self::Array(items) => {
                encode::write_array_len(out, items.len())?;
                for item in items {
                    item.pack(out)?;
                }
                Ok(())
            }
            Self::Map(map) => {
                encode::write_map_len(out, map.len())?;
                for (key, value) in map {
                    encode::write_str(out, key)?;
                    value.pack(out)?;
                }
                Ok(())
            }
        }
    }
}

impl Unpack for Value {
    /// Peeks the tag first, so an unsupported tag is left in the source.
    fn unpack<R: Source + ?Sized>(input: &mut R) -> Result<Self> {
        let tag = input.peek()?;
        if Family::of(tag).is_none() {
            return Err(PackError::bad_format(tag, "MessagePack value"));
        }
        let tag = decode::read_tag(input)?;
        Self::unpack_tagged(input, tag)
    }

    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        let Some(family) = Family::of(tag) else {
            return Err(PackError::bad_format(tag, "MessagePack value"));
        };
        let value = match family {
            Family::Nil => Self::Null,
            Family::Bool => Self::Bool(decode::read_bool(tag)?),
            Family::UInt | Family::Int => match decode::read_int(input, tag)? {
                Integer::Unsigned(u) => Self::UInt(u),
                Integer::Signed(i) => Self::Int(i),
            },
            Family::Float => Self::Float(decode::read_f64(input, tag)?),
            Family::Str => Self::String(decode::read_str(input, tag)?),
            Family::Bin => Self::Binary(decode::read_bin(input, tag)?),
            Family::Array => {
                let len = decode::read_array_len(input, tag)?;
                let mut items = Vec::with_capacity(decode::capacity_hint(input, len));
                for _ in 0..len {
                    items.push(Self::unpack(input)?);
                }
                Self::Array(items)
            }
            Family::Map => {
                let len = decode::read_map_len(input, tag)?;
                let mut map = ValueMap::new();
                for _ in 0..len {
                    let key = String::unpack(input)?;
                    let value = Self::unpack(input)?;
                    map.insert(key, value);
                }
                Self::Map(map)
            }
        };
        Ok(value)
    }
}
