//! 에러 타입 정의 모듈
//!
//! cvtsrcpf에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// cvtsrcpf에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum CvtError {
    /// 라이브러리가 존재하지 않음
    #[error("Library {library} not found")]
    MissingLibrary { library: String },

    /// 소스 물리 파일이 존재하지 않음
    #[error("Source physical file {library}/{container} not found")]
    MissingContainer { library: String, container: String },

    /// 호스트가 인식하지 못하는 CCSID
    #[error("CCSID {ccsid} is not valid")]
    InvalidEncoding { ccsid: u32 },

    /// 대상 CCSID로 표현할 수 없는 문자
    #[error("character {ch:?} cannot be represented in CCSID {ccsid}")]
    Unmappable { ch: char, ccsid: u32 },

    /// 원본 CCSID로 해석할 수 없는 바이트
    #[error("member data is not valid CCSID {ccsid}: {reason}")]
    Malformed { ccsid: u32, reason: String },

    /// 멤버 카탈로그 파싱 실패
    #[error("member catalog {path} is unreadable: {reason}")]
    Catalog { path: PathBuf, reason: String },

    /// 파일 입출력 실패
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 유효하지 않은 패턴
    #[error("invalid member pattern: {pattern}")]
    InvalidPattern { pattern: String },
}

impl CvtError {
    /// 경로 정보를 붙여 IO 에러를 감싼다
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CvtError::Io {
            path: path.into(),
            source,
        }
    }
}

/// cvtsrcpf 결과 타입 별칭
pub type Result<T> = std::result::Result<T, CvtError>;
