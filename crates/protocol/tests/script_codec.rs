//! Integration tests for the script codec over real document diffs.
//!
//! ## Test Coverage
//!
//! - Encode/decode of every strategy's scripts in both formats
//! - Decoded scripts still rebuild the new revision
//! - Corrupted input is rejected, never misapplied

use engine::{DiffStrategy, Strategy, apply_patch};
use protocol::{DecodeError, WireFormat, decode_script, detect_format, encode_script};
use test_support::split_cases;

#[test]
fn decoded_scripts_rebuild_every_fixture() {
    for (label, old, new) in split_cases() {
        for strategy in Strategy::ALL {
            let script = strategy.diff(&old, &new);
            for format in WireFormat::ALL {
                let bytes = encode_script(&script, format).expect("encode");
                assert_eq!(detect_format(&bytes), format, "{label}/{strategy}/{format}");

                let decoded: engine::EditScript<String> =
                    decode_script(&bytes, format).expect("decode");
                assert_eq!(decoded, script, "{label}/{strategy}/{format}");
                assert_eq!(
                    apply_patch(&old, &decoded).as_ref(),
                    Ok(&new),
                    "{label}/{strategy}/{format}"
                );
            }
        }
    }
}

#[test]
fn truncated_binary_scripts_are_rejected() {
    for (label, old, new) in split_cases() {
        let script = engine::diff(&old, &new);
        let bytes = encode_script(&script, WireFormat::Binary).expect("encode");
        for cut in [1, bytes.len() / 2, bytes.len() - 1] {
            let result = decode_script::<String>(&bytes[..cut], WireFormat::Binary);
            assert!(
                matches!(
                    result,
                    Err(DecodeError::Truncated { .. } | DecodeError::LengthOverflow { .. })
                ),
                "{label} cut at {cut}: {result:?}"
            );
        }
    }
}

#[test]
fn json_with_wrong_types_is_rejected() {
    let result = decode_script::<String>(br#"[[0, 0, "not-an-array"]]"#, WireFormat::Json);
    assert!(matches!(result, Err(DecodeError::Json(_))));
}

#[test]
fn binary_read_as_json_fails_cleanly() {
    let (_, old, new) = split_cases().remove(0);
    let bytes = encode_script(&engine::diff(&old, &new), WireFormat::Binary).expect("encode");
    assert!(decode_script::<String>(&bytes, WireFormat::Json).is_err());
}
