//! CCSID 코덱 모듈
//!
//! 호스트가 인식하는 CCSID 목록과 바이트 <-> 문자열 변환,
//! 프로브 파일을 이용한 CCSID 사전 검증을 담당합니다.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{CvtError, Result};
use crate::host::SourceHost;

/// 기본 대상 CCSID (UTF-8)
pub const DEFAULT_TARGET_CCSID: u32 = 1208;

/// 카탈로그에 CCSID가 없을 때의 원본 CCSID (EBCDIC US)
pub const DEFAULT_SOURCE_CCSID: u32 = 37;

/// 지원하는 문자 인코딩 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Utf8,
    Utf16Be,
    Latin1,
    Ascii,
    SingleByte(&'static [char; 256]),
}

/// CCSID 하나에 대응하는 코덱
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    ccsid: u32,
    scheme: Scheme,
}

impl Codec {
    /// CCSID로 코덱 조회 (인식하지 못하면 None)
    pub fn from_ccsid(ccsid: u32) -> Option<Self> {
        let scheme = match ccsid {
            1208 => Scheme::Utf8,
            1200 | 13488 => Scheme::Utf16Be,
            819 => Scheme::Latin1,
            367 => Scheme::Ascii,
            37 => Scheme::SingleByte(&CP037),
            500 => Scheme::SingleByte(&CP500),
            _ => return None,
        };
        Some(Self { ccsid, scheme })
    }

    /// 바이트를 문자열로 해석
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self.scheme {
            Scheme::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| CvtError::Malformed {
                ccsid: self.ccsid,
                reason: e.to_string(),
            }),
            Scheme::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(CvtError::Malformed {
                        ccsid: self.ccsid,
                        reason: "odd number of bytes".to_string(),
                    });
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|e| CvtError::Malformed {
                    ccsid: self.ccsid,
                    reason: e.to_string(),
                })
            }
            Scheme::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Scheme::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        Ok(char::from(b))
                    } else {
                        Err(CvtError::Malformed {
                            ccsid: self.ccsid,
                            reason: format!("byte 0x{:02X} is outside ASCII", b),
                        })
                    }
                })
                .collect(),
            Scheme::SingleByte(table) => Ok(bytes.iter().map(|&b| table[b as usize]).collect()),
        }
    }

    /// 문자열을 바이트로 변환
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self.scheme {
            Scheme::Utf8 => Ok(text.as_bytes().to_vec()),
            Scheme::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Scheme::Latin1 => self.encode_below(text, 0x100),
            Scheme::Ascii => self.encode_below(text, 0x80),
            Scheme::SingleByte(table) => {
                let reverse: HashMap<char, u8> = table
                    .iter()
                    .enumerate()
                    .map(|(byte, &ch)| (ch, byte as u8))
                    .collect();
                text.chars()
                    .map(|ch| {
                        reverse.get(&ch).copied().ok_or(CvtError::Unmappable {
                            ch,
                            ccsid: self.ccsid,
                        })
                    })
                    .collect()
            }
        }
    }

    fn encode_below(&self, text: &str, limit: u32) -> Result<Vec<u8>> {
        text.chars()
            .map(|ch| {
                if (ch as u32) < limit {
                    Ok(ch as u8)
                } else {
                    Err(CvtError::Unmappable {
                        ch,
                        ccsid: self.ccsid,
                    })
                }
            })
            .collect()
    }
}

/// 대상 CCSID 사전 검증
///
/// 호스트에는 CCSID만 따로 검증하는 기능이 없으므로, `probe_dir`에
/// 고유한 이름의 프로브 파일을 만들어 CCSID 태그를 붙여 봅니다.
/// 프로브 파일은 성공/실패와 관계없이 삭제됩니다.
pub fn validate_ccsid<H: SourceHost + ?Sized>(host: &H, ccsid: u32, probe_dir: &Path) -> Result<()> {
    let probe = tempfile::Builder::new()
        .prefix(".cvtsrcpf-probe-")
        .tempfile_in(probe_dir)
        .map_err(|e| CvtError::io(probe_dir, e))?;

    debug!(probe = %probe.path().display(), ccsid, "tagging probe file");
    let tagged = host.tag_ccsid(probe.path(), ccsid);

    probe
        .close()
        .map_err(|e| CvtError::io(probe_dir, e))?;
    tagged
}

/// CCSID 37 (EBCDIC US/Canada)
static CP037: [char; 256] = [
    '\u{0000}', '\u{0001}', '\u{0002}', '\u{0003}', '\u{009C}', '\u{0009}', '\u{0086}', '\u{007F}',
    '\u{0097}', '\u{008D}', '\u{008E}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{000E}', '\u{000F}',
    '\u{0010}', '\u{0011}', '\u{0012}', '\u{0013}', '\u{009D}', '\u{0085}', '\u{0008}', '\u{0087}',
    '\u{0018}', '\u{0019}', '\u{0092}', '\u{008F}', '\u{001C}', '\u{001D}', '\u{001E}', '\u{001F}',
    '\u{0080}', '\u{0081}', '\u{0082}', '\u{0083}', '\u{0084}', '\u{000A}', '\u{0017}', '\u{001B}',
    '\u{0088}', '\u{0089}', '\u{008A}', '\u{008B}', '\u{008C}', '\u{0005}', '\u{0006}', '\u{0007}',
    '\u{0090}', '\u{0091}', '\u{0016}', '\u{0093}', '\u{0094}', '\u{0095}', '\u{0096}', '\u{0004}',
    '\u{0098}', '\u{0099}', '\u{009A}', '\u{009B}', '\u{0014}', '\u{0015}', '\u{009E}', '\u{001A}',
    '\u{0020}', '\u{00A0}', '\u{00E2}', '\u{00E4}', '\u{00E0}', '\u{00E1}', '\u{00E3}', '\u{00E5}',
    '\u{00E7}', '\u{00F1}', '\u{00A2}', '\u{002E}', '\u{003C}', '\u{0028}', '\u{002B}', '\u{007C}',
    '\u{0026}', '\u{00E9}', '\u{00EA}', '\u{00EB}', '\u{00E8}', '\u{00ED}', '\u{00EE}', '\u{00EF}',
    '\u{00EC}', '\u{00DF}', '\u{0021}', '\u{0024}', '\u{002A}', '\u{0029}', '\u{003B}', '\u{00AC}',
    '\u{002D}', '\u{002F}', '\u{00C2}', '\u{00C4}', '\u{00C0}', '\u{00C1}', '\u{00C3}', '\u{00C5}',
    '\u{00C7}', '\u{00D1}', '\u{00A6}', '\u{002C}', '\u{0025}', '\u{005F}', '\u{003E}', '\u{003F}',
    '\u{00F8}', '\u{00C9}', '\u{00CA}', '\u{00CB}', '\u{00C8}', '\u{00CD}', '\u{00CE}', '\u{00CF}',
    '\u{00CC}', '\u{0060}', '\u{003A}', '\u{0023}', '\u{0040}', '\u{0027}', '\u{003D}', '\u{0022}',
    '\u{00D8}', '\u{0061}', '\u{0062}', '\u{0063}', '\u{0064}', '\u{0065}', '\u{0066}', '\u{0067}',
    '\u{0068}', '\u{0069}', '\u{00AB}', '\u{00BB}', '\u{00F0}', '\u{00FD}', '\u{00FE}', '\u{00B1}',
    '\u{00B0}', '\u{006A}', '\u{006B}', '\u{006C}', '\u{006D}', '\u{006E}', '\u{006F}', '\u{0070}',
    '\u{0071}', '\u{0072}', '\u{00AA}', '\u{00BA}', '\u{00E6}', '\u{00B8}', '\u{00C6}', '\u{00A4}',
    '\u{00B5}', '\u{007E}', '\u{0073}', '\u{0074}', '\u{0075}', '\u{0076}', '\u{0077}', '\u{0078}',
    '\u{0079}', '\u{007A}', '\u{00A1}', '\u{00BF}', '\u{00D0}', '\u{00DD}', '\u{00DE}', '\u{00AE}',
    '\u{005E}', '\u{00A3}', '\u{00A5}', '\u{00B7}', '\u{00A9}', '\u{00A7}', '\u{00B6}', '\u{00BC}',
    '\u{00BD}', '\u{00BE}', '\u{005B}', '\u{005D}', '\u{00AF}', '\u{00A8}', '\u{00B4}', '\u{00D7}',
    '\u{007B}', '\u{0041}', '\u{0042}', '\u{0043}', '\u{0044}', '\u{0045}', '\u{0046}', '\u{0047}',
    '\u{0048}', '\u{0049}', '\u{00AD}', '\u{00F4}', '\u{00F6}', '\u{00F2}', '\u{00F3}', '\u{00F5}',
    '\u{007D}', '\u{004A}', '\u{004B}', '\u{004C}', '\u{004D}', '\u{004E}', '\u{004F}', '\u{0050}',
    '\u{0051}', '\u{0052}', '\u{00B9}', '\u{00FB}', '\u{00FC}', '\u{00F9}', '\u{00FA}', '\u{00FF}',
    '\u{005C}', '\u{00F7}', '\u{0053}', '\u{0054}', '\u{0055}', '\u{0056}', '\u{0057}', '\u{0058}',
    '\u{0059}', '\u{005A}', '\u{00B2}', '\u{00D4}', '\u{00D6}', '\u{00D2}', '\u{00D3}', '\u{00D5}',
    '\u{0030}', '\u{0031}', '\u{0032}', '\u{0033}', '\u{0034}', '\u{0035}', '\u{0036}', '\u{0037}',
    '\u{0038}', '\u{0039}', '\u{00B3}', '\u{00DB}', '\u{00DC}', '\u{00D9}', '\u{00DA}', '\u{009F}',
];

/// CCSID 500 (EBCDIC International)
static CP500: [char; 256] = [
    '\u{0000}', '\u{0001}', '\u{0002}', '\u{0003}', '\u{009C}', '\u{0009}', '\u{0086}', '\u{007F}',
    '\u{0097}', '\u{008D}', '\u{008E}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{000E}', '\u{000F}',
    '\u{0010}', '\u{0011}', '\u{0012}', '\u{0013}', '\u{009D}', '\u{0085}', '\u{0008}', '\u{0087}',
    '\u{0018}', '\u{0019}', '\u{0092}', '\u{008F}', '\u{001C}', '\u{001D}', '\u{001E}', '\u{001F}',
    '\u{0080}', '\u{0081}', '\u{0082}', '\u{0083}', '\u{0084}', '\u{000A}', '\u{0017}', '\u{001B}',
    '\u{0088}', '\u{0089}', '\u{008A}', '\u{008B}', '\u{008C}', '\u{0005}', '\u{0006}', '\u{0007}',
    '\u{0090}', '\u{0091}', '\u{0016}', '\u{0093}', '\u{0094}', '\u{0095}', '\u{0096}', '\u{0004}',
    '\u{0098}', '\u{0099}', '\u{009A}', '\u{009B}', '\u{0014}', '\u{0015}', '\u{009E}', '\u{001A}',
    '\u{0020}', '\u{00A0}', '\u{00E2}', '\u{00E4}', '\u{00E0}', '\u{00E1}', '\u{00E3}', '\u{00E5}',
    '\u{00E7}', '\u{00F1}', '\u{005B}', '\u{002E}', '\u{003C}', '\u{0028}', '\u{002B}', '\u{0021}',
    '\u{0026}', '\u{00E9}', '\u{00EA}', '\u{00EB}', '\u{00E8}', '\u{00ED}', '\u{00EE}', '\u{00EF}',
    '\u{00EC}', '\u{00DF}', '\u{005D}', '\u{0024}', '\u{002A}', '\u{0029}', '\u{003B}', '\u{005E}',
    '\u{002D}', '\u{002F}', '\u{00C2}', '\u{00C4}', '\u{00C0}', '\u{00C1}', '\u{00C3}', '\u{00C5}',
    '\u{00C7}', '\u{00D1}', '\u{00A6}', '\u{002C}', '\u{0025}', '\u{005F}', '\u{003E}', '\u{003F}',
    '\u{00F8}', '\u{00C9}', '\u{00CA}', '\u{00CB}', '\u{00C8}', '\u{00CD}', '\u{00CE}', '\u{00CF}',
    '\u{00CC}', '\u{0060}', '\u{003A}', '\u{0023}', '\u{0040}', '\u{0027}', '\u{003D}', '\u{0022}',
    '\u{00D8}', '\u{0061}', '\u{0062}', '\u{0063}', '\u{0064}', '\u{0065}', '\u{0066}', '\u{0067}',
    '\u{0068}', '\u{0069}', '\u{00AB}', '\u{00BB}', '\u{00F0}', '\u{00FD}', '\u{00FE}', '\u{00B1}',
    '\u{00B0}', '\u{006A}', '\u{006B}', '\u{006C}', '\u{006D}', '\u{006E}', '\u{006F}', '\u{0070}',
    '\u{0071}', '\u{0072}', '\u{00AA}', '\u{00BA}', '\u{00E6}', '\u{00B8}', '\u{00C6}', '\u{00A4}',
    '\u{00B5}', '\u{007E}', '\u{0073}', '\u{0074}', '\u{0075}', '\u{0076}', '\u{0077}', '\u{0078}',
    '\u{0079}', '\u{007A}', '\u{00A1}', '\u{00BF}', '\u{00D0}', '\u{00DD}', '\u{00DE}', '\u{00AE}',
    '\u{00A2}', '\u{00A3}', '\u{00A5}', '\u{00B7}', '\u{00A9}', '\u{00A7}', '\u{00B6}', '\u{00BC}',
    '\u{00BD}', '\u{00BE}', '\u{00AC}', '\u{007C}', '\u{00AF}', '\u{00A8}', '\u{00B4}', '\u{00D7}',
    '\u{007B}', '\u{0041}', '\u{0042}', '\u{0043}', '\u{0044}', '\u{0045}', '\u{0046}', '\u{0047}',
    '\u{0048}', '\u{0049}', '\u{00AD}', '\u{00F4}', '\u{00F6}', '\u{00F2}', '\u{00F3}', '\u{00F5}',
    '\u{007D}', '\u{004A}', '\u{004B}', '\u{004C}', '\u{004D}', '\u{004E}', '\u{004F}', '\u{0050}',
    '\u{0051}', '\u{0052}', '\u{00B9}', '\u{00FB}', '\u{00FC}', '\u{00F9}', '\u{00FA}', '\u{00FF}',
    '\u{005C}', '\u{00F7}', '\u{0053}', '\u{0054}', '\u{0055}', '\u{0056}', '\u{0057}', '\u{0058}',
    '\u{0059}', '\u{005A}', '\u{00B2}', '\u{00D4}', '\u{00D6}', '\u{00D2}', '\u{00D3}', '\u{00D5}',
    '\u{0030}', '\u{0031}', '\u{0032}', '\u{0033}', '\u{0034}', '\u{0035}', '\u{0036}', '\u{0037}',
    '\u{0038}', '\u{0039}', '\u{00B3}', '\u{00DB}', '\u{00DC}', '\u{00D9}', '\u{00DA}', '\u{009F}',
];
