//! JSON script layout: an array of `[index, deleteCount, insertions]` triples.

use engine::EditScript;

use super::token::WireToken;
use crate::error::{DecodeError, EncodeError};

pub(super) fn encode<T: WireToken>(script: &EditScript<T>) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(script)?)
}

pub(super) fn decode<T: WireToken>(input: &[u8]) -> Result<EditScript<T>, DecodeError> {
    Ok(serde_json::from_slice(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Operation;

    #[test]
    fn encodes_triples() {
        let script = EditScript::new(vec![
            Operation::replace(1, 1, vec!["x".to_owned()]),
            Operation::delete(3, 2),
        ]);
        let encoded = encode(&script).expect("encode");
        assert_eq!(encoded, br#"[[1,1,["x"]],[3,2,[]]]"#);
    }

    #[test]
    fn accepts_whitespace() {
        let decoded: EditScript<String> =
            decode(b" [ [0, 0, [\"a\", \"b\"]] ]\n").expect("decode");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.operations()[0].insertions(), ["a", "b"]);
    }

    #[test]
    fn rejects_wrong_shapes() {
        for input in [
            &br#"{"i":[0,0],"a":[]}"#[..],
            br#"[[0,0]]"#,
            br#"[[0,0,[],1]]"#,
            br#"[["0",0,[]]]"#,
            br#"[[-1,0,[]]]"#,
            br#"[[0,0,[1]]]"#,
            br#"[[0,0,[]]] trailing"#,
            br#"[[0,0,["#,
        ] {
            assert!(
                matches!(decode::<String>(input), Err(DecodeError::Json(_))),
                "{}",
                String::from_utf8_lossy(input)
            );
        }
    }
}
