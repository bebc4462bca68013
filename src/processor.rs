//! 멤버 변환 모듈
//!
//! 멤버 바이트를 대상 CCSID로 다시 인코딩하면서 레코드마다
//! 끝 공백을 제거하고 줄 끝을 LF로 통일합니다.

use crate::ccsid::Codec;
use crate::error::Result;

/// 멤버 바이트 변환
///
/// # Arguments
/// * `bytes` - 원본 CCSID로 저장된 멤버 데이터
/// * `source` - 원본 코덱
/// * `target` - 대상 코덱
///
/// # Returns
/// 대상 CCSID로 인코딩된 바이트 (모든 레코드가 LF로 끝남)
pub fn transcode_member(bytes: &[u8], source: &Codec, target: &Codec) -> Result<Vec<u8>> {
    let text = source.decode(bytes)?;
    target.encode(&normalize_records(&text))
}

/// 레코드 끝 공백 제거 및 줄 끝 정규화
///
/// LF, CR LF, CR, NEL(EBCDIC 줄바꿈)을 모두 레코드 구분자로 봅니다.
pub fn normalize_records(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for record in split_records(text) {
        output.push_str(record.trim_end());
        output.push('\n');
    }
    output
}

/// 텍스트를 레코드 단위로 분리 (마지막 구분자 뒤의 빈 레코드는 제외)
fn split_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '\n' | '\u{85}' => {
                records.push(&text[start..i]);
                start = i + ch.len_utf8();
            }
            '\r' => {
                records.push(&text[start..i]);
                start = i + 1;
                if let Some(&(_, '\n')) = chars.peek() {
                    chars.next();
                    start += 1;
                }
            }
            _ => {}
        }
    }

    if start < text.len() {
        records.push(&text[start..]);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_whitespace_removed() {
        assert_eq!(normalize_records("A   \nB\t \n"), "A\nB\n");
    }

    #[test]
    fn test_terminators_normalized() {
        assert_eq!(normalize_records("A\r\nB\rC\u{85}D"), "A\nB\nC\nD\n");
    }

    #[test]
    fn test_blank_records_kept() {
        assert_eq!(normalize_records("A\n    \nB\n"), "A\n\nB\n");
    }

    #[test]
    fn test_empty_member() {
        assert_eq!(normalize_records(""), "");
    }

    #[test]
    fn test_leading_whitespace_kept() {
        assert_eq!(normalize_records("     C   EVAL X = 1   \n"), "     C   EVAL X = 1\n");
    }

    #[test]
    fn test_transcode_ebcdic_to_utf8() {
        let source = Codec::from_ccsid(37).unwrap();
        let target = Codec::from_ccsid(1208).unwrap();
        // "A  " NL "B"
        let bytes = [0xC1, 0x40, 0x40, 0x15, 0xC2];
        assert_eq!(transcode_member(&bytes, &source, &target).unwrap(), b"A\nB\n");
    }

    #[test]
    fn test_transcode_unmappable() {
        let source = Codec::from_ccsid(1208).unwrap();
        let target = Codec::from_ccsid(367).unwrap();
        assert!(transcode_member("café\n".as_bytes(), &source, &target).is_err());
    }
}
