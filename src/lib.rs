//! cvtsrcpf - SOURCE PHYSICAL FILE TO IFS CONVERTER
//!
//! 소스 물리 파일의 멤버들을 대상 디렉터리의 개별 스트림 파일로 변환하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - **파일 이름 규칙**: `NAME.TYPE` 형식, 예약 이름과 겹치는 유형은 별도 확장자 사용
//! - **충돌 해결**: 이미 있는 파일은 덮어쓰지 않고 `NAME (n).TYPE`으로 저장
//! - **CCSID 변환**: 멤버 데이터를 대상 CCSID로 다시 인코딩
//! - **레코드 정리**: 레코드 끝 공백 제거, 줄 끝은 LF로 통일
//! - **패턴 필터링**: glob 형식의 멤버 이름 필터
//! - **드라이런 모드**: 실제 쓰기 없이 대상 파일 이름만 확인
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법 (UTF-8)
//! cvtsrcpf QRPGLESRC MYLIB
//!
//! # CCSID 지정
//! cvtsrcpf -c 819 QCLSRC MYLIB
//!
//! # 특정 멤버만, 쓰지 않고 확인
//! cvtsrcpf -m "AB*" --dry-run QRPGLESRC MYLIB
//! ```

pub mod ccsid;
pub mod cli;
pub mod destination;
pub mod error;
pub mod host;
pub mod members;
pub mod naming;
pub mod pattern;
pub mod pipeline;
pub mod processor;
pub mod stats;

// Re-exports for convenient access
pub use ccsid::{validate_ccsid, Codec};
pub use cli::Args;
pub use destination::Destination;
pub use error::{CvtError, Result};
pub use host::{MemberData, MemberRow, QsysTree, SourceHost};
pub use members::{enumerate_members, MemberRecord};
pub use naming::{extension, format_filename, resolve_filename};
pub use pattern::PatternMatcher;
pub use pipeline::{run_conversion, ConvertOptions, RunReport};
pub use processor::transcode_member;
pub use stats::{format_bytes, Statistics};
