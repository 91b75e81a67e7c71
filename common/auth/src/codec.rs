//! Segment codec for compact tokens: JSON, then base64url without padding.
//!
//! Decoding accepts segments with or without trailing `=` so tokens produced
//! by padding-happy encoders still round-trip.

use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;

const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode_segment<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_vec(value)?;
    Ok(encode_bytes(&json))
}

pub fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, CodecError> {
    let bytes = decode_bytes(segment)?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    SEGMENT_ENGINE.encode(bytes)
}

pub fn decode_bytes(segment: &str) -> Result<Vec<u8>, CodecError> {
    Ok(SEGMENT_ENGINE.decode(segment)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        alg: String,
        typ: String,
    }

    #[test]
    fn header_encodes_to_the_well_known_segment() {
        let header = Sample {
            alg: "RS256".into(),
            typ: "JWT".into(),
        };
        let encoded = encode_segment(&header).expect("encode");
        assert_eq!(encoded, "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9");
    }

    #[test]
    fn output_uses_url_safe_alphabet_without_padding() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet.
        let encoded = encode_bytes(&[0xfb, 0xff]);
        assert_eq!(encoded, "-_8");
    }

    #[test]
    fn decode_accepts_padded_input() {
        assert_eq!(decode_bytes("-_8=").expect("padded"), vec![0xfb, 0xff]);
        assert_eq!(decode_bytes("-_8").expect("unpadded"), vec![0xfb, 0xff]);
    }

    #[test]
    fn malformed_segments_surface_as_errors() {
        let err = decode_segment::<Sample>("not base64!").expect_err("bad base64");
        assert!(matches!(err, CodecError::Base64(_)));

        let not_json = encode_bytes(b"plain text");
        let err = decode_segment::<Sample>(&not_json).expect_err("bad json");
        assert!(matches!(err, CodecError::Json(_)));
    }
}
