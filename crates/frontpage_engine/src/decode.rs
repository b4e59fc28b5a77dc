//! Byte-to-text decoding for fetched listing pages.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("page bytes are malformed for encoding {encoding}")]
pub struct DecodeError {
    pub encoding: String,
}

/// Decode raw page bytes to UTF-8.
///
/// Encoding choice: BOM, then the Content-Type charset parameter, then
/// `chardetng` detection over the full body. Bytes that are malformed for
/// the chosen encoding are an error rather than silently replaced.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedPage, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| content_type.and_then(header_charset))
        .unwrap_or_else(|| sniff_encoding(bytes));

    let (text, _, malformed) = encoding.decode(bytes);
    if malformed {
        return Err(DecodeError {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(DecodedPage {
        html: text.into_owned(),
        encoding: encoding.name().to_string(),
    })
}

fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|parameter| {
        let (name, value) = parameter.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches(['"', '\''].as_ref()).as_bytes())
    })
}

fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}
