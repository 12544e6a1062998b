//! Key extraction and ordering shared by every algorithm.
//!
//! A [`Comparator`] pairs a [`Key`] with an [`Order`]. Algorithms only ever
//! ask it one question: where does `a` sit relative to `b` once keys are
//! extracted and the direction applied. With `Order::Descending` the
//! effective "less" relation becomes `key(a) > key(b)`.
//!
//! Keys may be plain closures (`|r: &Record| r.score`), fallible closures
//! wrapped with [`try_key`], or [`JsonKey`] for `serde_json::Value` records.
//! Leaving the key out is [`Identity`], which compares elements directly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Sort direction, applied once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Order::Descending
        } else {
            Order::Ascending
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Order::Descending
    }

    #[inline]
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Order::Ascending => ord,
            Order::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Ascending => f.write_str("ascending"),
            Order::Descending => f.write_str("descending"),
        }
    }
}

/// Reason a key could not be extracted from an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFailure(pub String);

impl fmt::Display for KeyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts an orderable value from an element.
///
/// Implementations must be deterministic: algorithms call `extract` on the
/// same element many times and expect the same answer.
pub trait Key<T> {
    type Output: PartialOrd + fmt::Debug;

    fn extract(&self, item: &T) -> std::result::Result<Self::Output, KeyFailure>;

    /// Ordering of the keys of `a` and `b`, before any direction is applied.
    ///
    /// The provided methods extract owned keys. Keys that can order elements
    /// in place override all three.
    fn compare_items(&self, a: &T, b: &T) -> Result<Ordering>
    where
        T: fmt::Debug,
    {
        let ka = self
            .extract(a)
            .map_err(|e| Error::comparison(a, b, e.0))?;
        let kb = self
            .extract(b)
            .map_err(|e| Error::comparison(b, a, e.0))?;
        ka.partial_cmp(&kb)
            .ok_or_else(|| Error::comparison(a, b, unordered(&ka, &kb)))
    }

    fn compare_target(&self, item: &T, target: &Self::Output) -> Result<Ordering>
    where
        T: fmt::Debug,
    {
        let key = self
            .extract(item)
            .map_err(|e| Error::comparison(item, target, e.0))?;
        key.partial_cmp(target)
            .ok_or_else(|| Error::comparison(item, target, unordered(&key, target)))
    }

    fn eq_target(&self, item: &T, target: &Self::Output) -> Result<bool>
    where
        T: fmt::Debug,
    {
        let key = self
            .extract(item)
            .map_err(|e| Error::comparison(item, target, e.0))?;
        Ok(key == *target)
    }
}

fn unordered(a: &impl fmt::Debug, b: &impl fmt::Debug) -> String {
    format!("keys {:?} and {:?} have no ordering", a, b)
}

/// Compares elements directly.
///
/// Comparisons borrow the elements; `extract` clones and is only reached
/// by callers that want an owned key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T> Key<T> for Identity
where
    T: Clone + PartialOrd + fmt::Debug,
{
    type Output = T;

    fn extract(&self, item: &T) -> std::result::Result<T, KeyFailure> {
        Ok(item.clone())
    }

    #[inline]
    fn compare_items(&self, a: &T, b: &T) -> Result<Ordering> {
        a.partial_cmp(b)
            .ok_or_else(|| Error::comparison(a, b, unordered(a, b)))
    }

    #[inline]
    fn compare_target(&self, item: &T, target: &T) -> Result<Ordering> {
        item.partial_cmp(target)
            .ok_or_else(|| Error::comparison(item, target, unordered(item, target)))
    }

    #[inline]
    fn eq_target(&self, item: &T, target: &T) -> Result<bool> {
        Ok(item == target)
    }
}

impl<T, K, F> Key<T> for F
where
    F: Fn(&T) -> K,
    K: PartialOrd + fmt::Debug,
{
    type Output = K;

    #[inline]
    fn extract(&self, item: &T) -> std::result::Result<K, KeyFailure> {
        Ok(self(item))
    }
}

/// Key built from a closure that may fail.
#[derive(Clone, Copy)]
pub struct TryKey<F>(F);

/// Wrap a fallible key closure. Any `Err` it returns surfaces as
/// [`Error::Comparison`] naming the elements involved.
pub fn try_key<F>(f: F) -> TryKey<F> {
    TryKey(f)
}

impl<T, K, E, F> Key<T> for TryKey<F>
where
    F: Fn(&T) -> std::result::Result<K, E>,
    K: PartialOrd + fmt::Debug,
    E: fmt::Display,
{
    type Output = K;

    fn extract(&self, item: &T) -> std::result::Result<K, KeyFailure> {
        (self.0)(item).map_err(|e| KeyFailure(e.to_string()))
    }
}

/// Scalar pulled out of a JSON record.
///
/// Values only order against the same kind; a number never orders against
/// a string, which surfaces as a comparison error. Integers keep their full
/// 64-bit range and order exactly against floats.
#[derive(Debug, Clone)]
pub enum JsonScalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

/// 2^63 and 2^64, both exact in `f64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;
const U64_END: f64 = 18_446_744_073_709_551_616.0;

fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if f >= I64_END {
        return Some(Ordering::Less);
    }
    if f < -I64_END {
        return Some(Ordering::Greater);
    }
    // In range, so the truncated value casts exactly.
    let whole = f.trunc();
    let frac = 0.0f64.partial_cmp(&(f - whole))?;
    Some(i.cmp(&(whole as i64)).then(frac))
}

fn cmp_uint_float(u: u64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if f >= U64_END {
        return Some(Ordering::Less);
    }
    if f < 0.0 {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    let frac = 0.0f64.partial_cmp(&(f - whole))?;
    Some(u.cmp(&(whole as u64)).then(frac))
}

fn cmp_int_uint(i: i64, u: u64) -> Ordering {
    match u64::try_from(i) {
        Ok(i) => i.cmp(&u),
        Err(_) => Ordering::Less,
    }
}

impl PartialOrd for JsonScalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use JsonScalar::*;
        match (self, other) {
            (Null, Null) => Some(Ordering::Equal),
            (Bool(a), Bool(b)) => a.partial_cmp(b),
            (Int(a), Int(b)) => a.partial_cmp(b),
            (UInt(a), UInt(b)) => a.partial_cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), UInt(b)) => Some(cmp_int_uint(*a, *b)),
            (UInt(a), Int(b)) => Some(cmp_int_uint(*b, *a).reverse()),
            (Int(a), Float(b)) => cmp_int_float(*a, *b),
            (Float(a), Int(b)) => cmp_int_float(*b, *a).map(Ordering::reverse),
            (UInt(a), Float(b)) => cmp_uint_float(*a, *b),
            (Float(a), UInt(b)) => cmp_uint_float(*b, *a).map(Ordering::reverse),
            (String(a), String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Equal exactly when the two order as equal, so `1` matches `1.0`.
impl PartialEq for JsonScalar {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl From<i64> for JsonScalar {
    fn from(v: i64) -> Self {
        JsonScalar::Int(v)
    }
}

impl From<f64> for JsonScalar {
    fn from(v: f64) -> Self {
        JsonScalar::Float(v)
    }
}

impl From<bool> for JsonScalar {
    fn from(v: bool) -> Self {
        JsonScalar::Bool(v)
    }
}

impl From<&str> for JsonScalar {
    fn from(v: &str) -> Self {
        JsonScalar::String(v.to_string())
    }
}

/// Key addressing a field of a JSON record by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonKey {
    pointer: String,
}

impl JsonKey {
    /// Key on a top-level object field, e.g. `JsonKey::field("val")`.
    pub fn field(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidKey {
                reason: "field name must not be empty".to_string(),
            });
        }
        let escaped = name.replace('~', "~0").replace('/', "~1");
        Ok(Self {
            pointer: format!("/{}", escaped),
        })
    }

    /// Key on an RFC 6901 pointer such as `/author/name`.
    pub fn pointer(path: &str) -> Result<Self> {
        if !path.starts_with('/') {
            return Err(Error::InvalidKey {
                reason: format!("json pointer must start with '/', got {:?}", path),
            });
        }
        Ok(Self {
            pointer: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.pointer
    }
}

impl Key<Value> for JsonKey {
    type Output = JsonScalar;

    fn extract(&self, item: &Value) -> std::result::Result<JsonScalar, KeyFailure> {
        let value = item
            .pointer(&self.pointer)
            .ok_or_else(|| KeyFailure(format!("missing field {}", self.pointer)))?;
        match value {
            Value::Null => Ok(JsonScalar::Null),
            Value::Bool(b) => Ok(JsonScalar::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(JsonScalar::Int)
                .or_else(|| n.as_u64().map(JsonScalar::UInt))
                .or_else(|| n.as_f64().map(JsonScalar::Float))
                .ok_or_else(|| {
                    KeyFailure(format!("number at {} is not representable", self.pointer))
                }),
            Value::String(s) => Ok(JsonScalar::String(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(KeyFailure(format!(
                "value at {} is not a scalar",
                self.pointer
            ))),
        }
    }
}

/// Key plus direction: the effective ordering relation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator<K = Identity> {
    key: K,
    order: Order,
}

impl Comparator<Identity> {
    /// Direct comparison, ascending.
    pub fn natural() -> Self {
        Self::default()
    }
}

impl<K> Comparator<K> {
    pub fn by_key(key: K) -> Self {
        Self {
            key,
            order: Order::Ascending,
        }
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Shorthand for `with_order(Order::from_reverse(reverse))`.
    pub fn reverse(self, reverse: bool) -> Self {
        self.with_order(Order::from_reverse(reverse))
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Effective ordering of `a` relative to `b`.
    pub fn compare<T>(&self, a: &T, b: &T) -> Result<Ordering>
    where
        T: fmt::Debug,
        K: Key<T>,
    {
        Ok(self.order.apply(self.key.compare_items(a, b)?))
    }

    /// `effective_less(a, b)`.
    pub fn less<T>(&self, a: &T, b: &T) -> Result<bool>
    where
        T: fmt::Debug,
        K: Key<T>,
    {
        Ok(self.compare(a, b)? == Ordering::Less)
    }

    /// Effective ordering of an element's key relative to a search target.
    pub fn compare_to_target<T>(&self, item: &T, target: &K::Output) -> Result<Ordering>
    where
        T: fmt::Debug,
        K: Key<T>,
    {
        Ok(self.order.apply(self.key.compare_target(item, target)?))
    }

    /// Whether an element's key equals the target.
    pub fn matches<T>(&self, item: &T, target: &K::Output) -> Result<bool>
    where
        T: fmt::Debug,
        K: Key<T>,
    {
        self.key.eq_target(item, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_natural_and_reversed() {
        let asc = Comparator::natural();
        assert!(asc.less(&1, &2).unwrap());
        assert!(!asc.less(&2, &1).unwrap());
        assert!(!asc.less(&2, &2).unwrap());

        let desc = Comparator::natural().reverse(true);
        assert!(desc.less(&2, &1).unwrap());
        assert!(!desc.less(&1, &2).unwrap());
        assert_eq!(desc.order(), Order::Descending);
    }

    #[test]
    fn test_closure_key() {
        let by_len = Comparator::by_key(|s: &&str| s.len());
        assert!(by_len.less(&"ab", &"abc").unwrap());
        assert_eq!(by_len.compare(&"ab", &"xy").unwrap(), Ordering::Equal);
        assert!(by_len.matches(&"xyz", &3).unwrap());
    }

    #[test]
    fn test_nan_is_comparison_error() {
        let cmp = Comparator::natural();
        let err = cmp.compare(&1.0f64, &f64::NAN).unwrap_err();
        match err {
            Error::Comparison { left, right, .. } => {
                assert_eq!(left, "1.0");
                assert_eq!(right, "NaN");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_try_key_failure_names_elements() {
        let cmp = Comparator::by_key(try_key(|s: &String| s.parse::<i32>()));
        assert!(cmp.less(&"4".to_string(), &"10".to_string()).unwrap());

        let err = cmp.compare(&"7".to_string(), &"seven".to_string()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"seven\""), "{msg}");
        assert!(msg.contains("invalid digit"), "{msg}");
    }

    #[test]
    fn test_json_field_key() {
        let cmp = Comparator::by_key(JsonKey::field("val").unwrap());
        let a = json!({"val": 3});
        let b = json!({"val": 1});
        assert!(cmp.less(&b, &a).unwrap());
        assert!(cmp.matches(&b, &JsonScalar::from(1)).unwrap());
    }

    #[test]
    fn test_json_key_missing_field_and_mixed_types() {
        let cmp = Comparator::by_key(JsonKey::field("val").unwrap());
        let err = cmp.compare(&json!({"val": 1}), &json!({"other": 2})).unwrap_err();
        assert!(err.to_string().contains("missing field /val"));

        let err = cmp.compare(&json!({"val": 1}), &json!({"val": "one"})).unwrap_err();
        assert!(matches!(err, Error::Comparison { .. }));
    }

    #[test]
    fn test_json_integers_beyond_f64_precision() {
        let cmp = Comparator::by_key(JsonKey::field("val").unwrap());
        let low = json!({"val": 9007199254740992u64});
        let high = json!({"val": 9007199254740993u64});
        assert!(cmp.less(&low, &high).unwrap());
        assert!(!cmp.matches(&low, &JsonScalar::from(9007199254740993i64)).unwrap());
        assert!(cmp.matches(&high, &JsonScalar::from(9007199254740993i64)).unwrap());

        let big = json!({"val": u64::MAX});
        assert!(cmp.less(&high, &big).unwrap());
        assert!(cmp.less(&json!({"val": -1}), &big).unwrap());
    }

    #[test]
    fn test_json_mixed_int_and_float() {
        let int = JsonScalar::Int;
        assert_eq!(int(1), JsonScalar::Float(1.0));
        assert!(int(1) < JsonScalar::Float(1.5));
        assert!(int(-2) < JsonScalar::Float(-1.5));
        assert!(int(-1) > JsonScalar::Float(-1.5));
        assert!(int(i64::MAX) < JsonScalar::Float(9.3e18));
        assert!(int(9007199254740993) > JsonScalar::Float(9007199254740992.0));
        assert!(JsonScalar::UInt(u64::MAX) > JsonScalar::Float(1.8e19));
        assert!(JsonScalar::UInt(3) > JsonScalar::Float(-0.5));
        assert!(JsonScalar::UInt(5) > int(-5));
        assert_eq!(JsonScalar::UInt(5), int(5));
        assert_eq!(int(1).partial_cmp(&JsonScalar::Float(f64::NAN)), None);
        assert_eq!(int(1).partial_cmp(&JsonScalar::from("1")), None);
    }

    #[derive(Debug, PartialEq, PartialOrd)]
    struct CountedClone(i32);

    thread_local! {
        static CLONES: std::cell::Cell<usize> = std::cell::Cell::new(0);
    }

    impl Clone for CountedClone {
        fn clone(&self) -> Self {
            CLONES.with(|c| c.set(c.get() + 1));
            CountedClone(self.0)
        }
    }

    #[test]
    fn test_identity_compares_without_cloning() {
        let cmp = Comparator::natural();
        let (a, b) = (CountedClone(1), CountedClone(2));
        assert!(cmp.less(&a, &b).unwrap());
        assert_eq!(cmp.compare_to_target(&b, &a).unwrap(), Ordering::Greater);
        assert!(cmp.matches(&a, &CountedClone(1)).unwrap());
        assert_eq!(CLONES.with(|c| c.get()), 0);
    }

    #[test]
    fn test_invalid_json_keys() {
        assert!(matches!(JsonKey::field(""), Err(Error::InvalidKey { .. })));
        assert!(matches!(JsonKey::pointer("val"), Err(Error::InvalidKey { .. })));
        assert_eq!(JsonKey::field("a/b").unwrap().path(), "/a~1b");
        assert_eq!(JsonKey::pointer("/author/name").unwrap().path(), "/author/name");
    }
}
