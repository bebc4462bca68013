//! 통계 및 유틸리티 모듈
//!
//! 변환 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::io::Write;
use std::time::{Duration, Instant};

/// 변환 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 변환 대상 멤버 수
    pub total_members: usize,
    /// 변환 성공 수
    pub converted: usize,
    /// 변환 실패 수
    pub failed: usize,
    /// 읽은 총 바이트
    pub bytes_read: u64,
    /// 쓴 총 바이트
    pub bytes_written: u64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_members: usize) -> Self {
        Self {
            total_members,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 변환 성공 기록
    pub fn record_converted(&mut self, bytes_read: u64, bytes_written: u64) {
        self.converted += 1;
        self.bytes_read += bytes_read;
        self.bytes_written += bytes_written;
    }

    /// 변환 실패 기록
    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 통계 요약 출력
    pub fn print_summary<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "\n{}", "═".repeat(50).bright_blue())?;
        writeln!(out, "{}", " Conversion statistics".bright_white().bold())?;
        writeln!(out, "{}", "═".repeat(50).bright_blue())?;

        writeln!(out, "  Members:      {}", self.total_members)?;
        writeln!(out, "  Converted:    {}", self.converted.to_string().green())?;
        if self.failed > 0 {
            writeln!(out, "  Failed:       {}", self.failed.to_string().red())?;
        } else {
            writeln!(out, "  Failed:       {}", "0".green())?;
        }
        writeln!(out, "  Bytes read:   {}", format_bytes(self.bytes_read))?;
        writeln!(out, "  Bytes written: {}", format_bytes(self.bytes_written))?;
        writeln!(out, "  Elapsed:      {}", format_duration(self.elapsed()))?;

        writeln!(out, "{}", "═".repeat(50).bright_blue())
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use cvtsrcpf::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}s", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
