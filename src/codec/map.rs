//! Pack/Unpack for associative containers.
//!
//! Pairs are written in the container's own iteration order: sorted for
//! `BTreeMap`, unspecified for `HashMap`. On decode, a repeated key keeps the
//! last value read.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use super::{Pack, Unpack};
use crate::error::Result;
use crate::format::{decode, encode};
use crate::sink::{Sink, Source};

fn pack_pairs<'a, K, V, S, I>(out: &mut S, len: usize, pairs: I) -> Result<()>
where
    K: Pack + 'a,
    V: Pack + 'a,
    S: Sink + ?Sized,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    encode::write_map_len(out, len)?;
    for (key, value) in pairs {
        key.pack(out)?;
        value.pack(out)?;
    }
    Ok(())
}

/// Reads `len` pairs, handing each to `insert` in wire order.
fn unpack_pairs<K, V, R>(input: &mut R, tag: u8, mut insert: impl FnMut(K, V)) -> Result<()>
where
    K: Unpack,
    V: Unpack,
    R: Source + ?Sized,
{
    let len = decode::read_map_len(input, tag)?;
    for _ in 0..len {
        let key = K::unpack(input)?;
        let value = V::unpack(input)?;
        insert(key, value);
    }
    Ok(())
}

impl<K: Pack, V: Pack> Pack for BTreeMap<K, V> {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        pack_pairs(out, self.len(), self)
    }
}

impl<K: Unpack + Ord, V: Unpack> Unpack for BTreeMap<K, V> {
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        let mut map = Self::new();
        unpack_pairs(input, tag, |k, v| {
            map.insert(k, v);
        })?;
        Ok(map)
    }
}

impl<K: Pack, V: Pack, H> Pack for HashMap<K, V, H> {
    fn pack<S: Sink + ?Sized>(&self, out: &mut S) -> Result<()> {
        pack_pairs(out, self.len(), self)
    }
}

impl<K, V, H> Unpack for HashMap<K, V, H>
where
    K: Unpack + Eq + Hash,
    V: Unpack,
    H: BuildHasher + Default,
{
    fn unpack_tagged<R: Source + ?Sized>(input: &mut R, tag: u8) -> Result<Self> {
        let mut map = Self::with_hasher(H::default());
        unpack_pairs(input, tag, |k, v| {
            map.insert(k, v);
        })?;
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_slice, to_vec};
    use crate::error::ErrorKind;

    #[test]
    fn empty_map() {
        assert_eq!(to_vec(&BTreeMap::<String, u8>::new()).unwrap(), vec![0x80]);
    }

    #[test]
    fn ordered_map_writes_sorted_keys() {
        let map = BTreeMap::from([("b".to_string(), 2u8), ("a".to_string(), 1u8)]);
        assert_eq!(
            to_vec(&map).unwrap(),
            vec![0x82, 0xA1, b'a', 0x01, 0xA1, b'b', 0x02]
        );
    }

    #[test]
    fn map16_header() {
        let map: BTreeMap<u32, bool> = (0..16).map(|i| (i, i % 2 == 0)).collect();
        let bytes = to_vec(&map).unwrap();
        assert_eq!(&bytes[..3], &[0xDE, 0x00, 0x10]);
        assert_eq!(from_slice::<BTreeMap<u32, bool>>(&bytes).unwrap(), map);
    }

    #[test]
    fn unordered_map_round_trip_preserves_pairs() {
        let map = HashMap::from([
            ("name".to_string(), "Alice".to_string()),
            ("city".to_string(), "Paris".to_string()),
            ("lang".to_string(), "fr".to_string()),
        ]);
        let bytes = to_vec(&map).unwrap();
        let back: HashMap<String, String> = from_slice(&bytes).unwrap();
        assert_eq!(back, map);

        // Re-encoding through an ordered map may reorder bytes but keeps pairs.
        let ordered: BTreeMap<String, String> = from_slice(&bytes).unwrap();
        assert_eq!(ordered.len(), 3);
        assert_eq!(ordered["city"], "Paris");
        let again: HashMap<String, String> = from_slice(&to_vec(&ordered).unwrap()).unwrap();
        assert_eq!(again, map);
    }

    #[test]
    fn duplicate_keys_last_wins() {
        // {"k": 1, "k": 2}
        let bytes = [0x82, 0xA1, b'k', 0x01, 0xA1, b'k', 0x02];
        let map: BTreeMap<String, u8> = from_slice(&bytes).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["k"], 2);
    }

    #[test]
    fn nested_map_values() {
        let map = BTreeMap::from([(1u8, vec![Some(1.5f32), None])]);
        let bytes = to_vec(&map).unwrap();
        assert_eq!(from_slice::<BTreeMap<u8, Vec<Option<f32>>>>(&bytes).unwrap(), map);
    }

    #[test]
    fn map_from_array_is_bad_format() {
        let err = from_slice::<BTreeMap<u8, u8>>(&[0x90]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadFormat);
    }

    #[test]
    fn truncated_map32_is_out_of_data() {
        let err = from_slice::<BTreeMap<String, u8>>(&[0xDF, 0x00, 0x00, 0x00, 0x02]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfData);
    }
}
