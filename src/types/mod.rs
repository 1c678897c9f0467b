//! Dynamic value type.

mod value;

pub use value::{Value, ValueIndex, ValueMap};

/// Builds a [`Value`] from a literal.
///
/// `null` is [`Value::Null`]; a bracketed list goes through
/// [`Value::from_list`], so a list of `[string, value]` pairs becomes a map;
/// anything else goes through `Value::from`.
///
/// ```
/// use mpackr::{Value, value};
///
/// let v = value!([["name", "Alice"], ["langs", ["en", "fr"]], ["email", null]]);
/// assert_eq!(v["name"].as_str(), Some("Alice"));
/// assert_eq!(v["langs"][1].as_str(), Some("fr"));
/// assert_eq!(v["email"], Value::Null);
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::types::Value::Null
    };

    (@list [$($done:expr,)*]) => {
        $crate::types::Value::from_list(vec![$($done,)*])
    };
    (@list [$($done:expr,)*] null $(, $($rest:tt)*)?) => {
        $crate::value!(@list [$($done,)* $crate::types::Value::Null,] $($($rest)*)?)
    };
    (@list [$($done:expr,)*] [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::value!(@list [$($done,)* $crate::value!([$($inner)*]),] $($($rest)*)?)
    };
    (@list [$($done:expr,)*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::value!(@list [$($done,)* $crate::types::Value::from($next),] $($($rest)*)?)
    };

    ([$($items:tt)*]) => {
        $crate::value!(@list [] $($items)*)
    };
    ($other:expr) => {
        $crate::types::Value::from($other)
    };
}
