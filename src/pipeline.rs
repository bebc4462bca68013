//! 변환 파이프라인 모듈
//!
//! 사전 확인 → CCSID 검증 → 멤버 조회 → 멤버별 변환/쓰기 → 요약 순서로
//! 한 번의 실행을 진행합니다. 멤버는 하나씩 순서대로 처리됩니다.

use indicatif::ProgressBar;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::ccsid::{self, Codec, DEFAULT_TARGET_CCSID};
use crate::destination::Destination;
use crate::error::{CvtError, Result};
use crate::host::SourceHost;
use crate::members::{enumerate_members, MemberRecord};
use crate::naming::{extension, resolve_filename};
use crate::pattern::PatternMatcher;
use crate::processor::transcode_member;
use crate::stats::Statistics;

/// 실행 끝에 출력하는 안내 문구
pub const INCLUDE_REMINDER: &str =
    "Reminder: C include members were given the .H extension; rename them to .h if your build expects it.";

/// 변환 실행 옵션
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// 라이브러리 이름 (대문자)
    pub library: String,
    /// 소스 물리 파일 이름 (대문자)
    pub container: String,
    /// 대상 CCSID
    pub ccsid: u32,
    /// 멤버 이름 필터
    pub member_pattern: Option<String>,
    /// 쓰지 않고 대상 이름만 출력
    pub dry_run: bool,
    /// CCSID 검증용 프로브 파일 위치
    pub probe_dir: PathBuf,
    /// 대상 디렉터리
    pub output_dir: PathBuf,
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new(container: &str, library: &str) -> Self {
        Self {
            library: library.to_uppercase(),
            container: container.to_uppercase(),
            ccsid: DEFAULT_TARGET_CCSID,
            member_pattern: None,
            dry_run: false,
            probe_dir: std::env::temp_dir(),
            output_dir: PathBuf::from("."),
        }
    }

    /// 대상 CCSID 설정
    pub fn with_ccsid(mut self, ccsid: u32) -> Self {
        self.ccsid = ccsid;
        self
    }

    /// 멤버 이름 필터 설정
    pub fn with_member_pattern(mut self, pattern: Option<String>) -> Self {
        self.member_pattern = pattern;
        self
    }

    /// 드라이런 설정
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 프로브 디렉터리 설정
    pub fn with_probe_dir(mut self, probe_dir: PathBuf) -> Self {
        self.probe_dir = probe_dir;
        self
    }

    /// 대상 디렉터리 설정
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }
}

/// 변환에 실패한 멤버
#[derive(Debug)]
pub struct MemberFailure {
    pub member: MemberRecord,
    pub error: CvtError,
}

/// 실행 결과
#[derive(Debug)]
pub struct RunReport {
    /// 대상 멤버 수
    pub found: usize,
    /// 멤버별 대상 파일 (변환 순서)
    pub written: Vec<PathBuf>,
    /// 실패한 멤버 목록
    pub failures: Vec<MemberFailure>,
    /// 통계
    pub stats: Statistics,
}

impl RunReport {
    /// 실패 없이 끝났는지 여부
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 소스 물리 파일 하나를 대상 디렉터리로 변환
///
/// 사전 확인, CCSID 검증, 멤버 조회 중 실패하면 아무 것도 쓰지 않고
/// 에러를 반환합니다. 멤버별 실패는 기록 후 다음 멤버로 진행합니다.
///
/// # Arguments
/// * `host` - 호스트 객체 공간
/// * `options` - 실행 옵션
/// * `out` - 보고 출력 (멤버별 한 줄)
/// * `pb` - 진행률 바 (출력 중에는 잠시 숨김)
pub fn run_conversion<H, W>(
    host: &H,
    options: &ConvertOptions,
    out: &mut W,
    pb: &ProgressBar,
) -> Result<RunReport>
where
    H: SourceHost + ?Sized,
    W: Write,
{
    let library = options.library.as_str();
    let container = options.container.as_str();

    if !host.library_exists(library) {
        return Err(CvtError::MissingLibrary {
            library: library.to_string(),
        });
    }
    if !host.container_exists(library, container) {
        return Err(CvtError::MissingContainer {
            library: library.to_string(),
            container: container.to_string(),
        });
    }

    ccsid::validate_ccsid(host, options.ccsid, &options.probe_dir)?;
    let target = Codec::from_ccsid(options.ccsid).ok_or(CvtError::InvalidEncoding {
        ccsid: options.ccsid,
    })?;
    let source_ccsid = host.container_ccsid(library, container)?;
    let source =
        Codec::from_ccsid(source_ccsid).ok_or(CvtError::InvalidEncoding { ccsid: source_ccsid })?;
    debug!(source = source_ccsid, target = options.ccsid, "codecs ready");

    let matcher = PatternMatcher::new(options.member_pattern.clone())?;
    let members: Vec<MemberRecord> = enumerate_members(host, library, container)?
        .into_iter()
        .filter(|m| matcher.matches(&m.name))
        .collect();
    report(
        out,
        pb,
        format_args!(
            "{} source members found in {}/{}.",
            members.len(),
            library,
            container
        ),
    )?;

    let mut destination = Destination::open(&options.output_dir)?;
    let mut run = RunReport {
        found: members.len(),
        written: Vec::with_capacity(members.len()),
        failures: Vec::new(),
        stats: Statistics::new(members.len()),
    };
    pb.set_length(members.len() as u64);

    for member in members {
        let ext = extension(&member.member_type, container);
        let filename = resolve_filename(&member.name, ext, |c| destination.exists(c));
        debug!(member = %member.name, filename = %filename, "destination resolved");

        let result = if options.dry_run {
            destination.reserve(&filename);
            Ok((destination.absolute(&filename), 0, 0))
        } else {
            convert_member(host, options, &member, &source, &target, &destination, &filename)
        };

        match result {
            Ok((path, bytes_read, bytes_written)) => {
                report(
                    out,
                    pb,
                    format_args!(
                        "Member {}/{}({}) type {} -> {}",
                        library,
                        container,
                        member.name,
                        member.member_type,
                        path.display()
                    ),
                )?;
                run.stats.record_converted(bytes_read, bytes_written);
                run.written.push(path);
            }
            Err(error) => {
                warn!(member = %member.name, %error, "member conversion failed");
                run.stats.record_failed();
                run.failures.push(MemberFailure { member, error });
            }
        }
        pb.inc(1);
    }

    let verb = if options.dry_run {
        "would be converted"
    } else {
        "converted"
    };
    report(
        out,
        pb,
        format_args!("{} source members {}.", run.stats.converted, verb),
    )?;
    report(out, pb, format_args!("{}", INCLUDE_REMINDER))?;
    info!(
        converted = run.stats.converted,
        failed = run.stats.failed,
        "run finished"
    );

    Ok(run)
}

/// 멤버 하나 변환 후 쓰기 (대상 경로, 읽은 바이트, 쓴 바이트)
fn convert_member<H: SourceHost + ?Sized>(
    host: &H,
    options: &ConvertOptions,
    member: &MemberRecord,
    source: &Codec,
    target: &Codec,
    destination: &Destination,
    filename: &str,
) -> Result<(PathBuf, u64, u64)> {
    let bytes = host.read_member(&options.library, &options.container, &member.source_name)?;
    let converted = transcode_member(&bytes, source, target)?;
    let path = destination.write(filename, &converted)?;
    Ok((path, bytes.len() as u64, converted.len() as u64))
}

/// 진행률 바를 잠시 숨기고 보고 한 줄 출력
fn report<W: Write>(out: &mut W, pb: &ProgressBar, line: fmt::Arguments<'_>) -> Result<()> {
    pb.suspend(|| writeln!(out, "{}", line))
        .map_err(|e| CvtError::io("<stdout>", e))
}
