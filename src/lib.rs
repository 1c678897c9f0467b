//! mpackr: a pure-Rust MessagePack codec.
//!
//! The crate writes and reads the MessagePack binary format with canonical,
//! minimal-width encodings, byte-compatible with other MessagePack
//! implementations. Typed Rust values map onto the format statically; the
//! dynamic [`Value`] holds documents of unknown shape.
//!
//! # Architecture
//!
//! - **`byteorder`**: Host ⇄ big-endian word conversion
//! - **`sink`**: `Sink`/`Source` byte-stream traits and their adapters
//! - **`format`**: Tag table and primitive encoders/decoders
//! - **`codec`**: `Pack`/`Unpack` typed dispatch and structured records
//! - **`types`**: Dynamic `Value` and the `value!` literal macro
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! let scores = BTreeMap::from([("alice".to_string(), 3u32), ("bob".to_string(), 5)]);
//! let bytes = mpackr::to_vec(&scores).unwrap();
//! let back: BTreeMap<String, u32> = mpackr::from_slice(&bytes).unwrap();
//! assert_eq!(back, scores);
//! ```

pub mod byteorder;
pub mod codec;
pub mod error;
pub mod format;
pub mod sink;
pub mod types;

pub use codec::{
    FieldReader, FieldWriter, Named, Pack, Record, RecordMode, Unpack, from_slice, pack_record,
    to_vec, unpack_record,
};
pub use error::{ErrorKind, PackError};
pub use format::Family;
pub use sink::{IoSink, IoSource, Sink, Source};
pub use types::{Value, ValueMap};
