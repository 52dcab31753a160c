#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Wire encodings for seqdelta edit scripts.
//!
//! The crate turns an [`engine::EditScript`] into bytes that can be stored or
//! sent elsewhere, and parses such bytes back with strict validation. It is
//! split into the variable-length integer codec used by the binary layout and
//! the script codec proper.
//!
//! # Examples
//!
//! Encode a script in the compact binary layout and recognise it again from
//! its header:
//!
//! ```
//! use engine::{EditScript, Operation};
//! use protocol::{WireFormat, decode_script, detect_format, encode_script};
//!
//! let script = EditScript::new(vec![Operation::insert(0, vec!["hello".to_owned()])]);
//! let bytes = encode_script(&script, WireFormat::Binary).expect("binary encoding cannot fail");
//!
//! assert_eq!(detect_format(&bytes), WireFormat::Binary);
//! let decoded = decode_script::<String>(&bytes, WireFormat::Binary).expect("valid script");
//! assert_eq!(decoded, script);
//! ```

mod error;
pub mod script;
mod varint;

pub use error::{DecodeError, EncodeError};
pub use script::{
    MAGIC, ParseWireFormatError, VERSION, WireFormat, WireToken, decode_script, detect_format,
    encode_script,
};
pub use varint::{MAX_VARINT_LEN, decode_varint, encode_varint_to_vec, encoded_len};
