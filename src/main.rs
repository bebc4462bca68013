//! cvtsrcpf - SOURCE PHYSICAL FILE TO IFS CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cvtsrcpf::{
    cli::Args,
    pipeline::{run_conversion, ConvertOptions, MemberFailure},
    QsysTree,
};

fn main() -> ExitCode {
    let program = program_name();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // 도움말은 stdout, 사용법 오류는 stderr
            return match e.kind() {
                ErrorKind::DisplayVersion => {
                    let _ = e.print();
                    ExitCode::SUCCESS
                }
                ErrorKind::DisplayHelp => {
                    let _ = e.print();
                    ExitCode::from(1)
                }
                _ => {
                    eprint!("{}: {}", program, e.render());
                    ExitCode::from(1)
                }
            };
        }
    };

    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{}: {}", program, format!("{:#}", e).red());
            ExitCode::from(1)
        }
    }
}

/// 변환 실행 (모든 멤버가 성공하면 true)
fn run(args: &Args) -> Result<bool> {
    let options = args.to_options();
    let host = QsysTree::new(&args.qsys_root);

    if args.verbose {
        print_header(&options);
    }

    let pb = create_progress_bar();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let report = run_conversion(&host, &options, &mut out, &pb)?;
    pb.finish_and_clear();
    out.flush().context("failed to flush report")?;

    print_errors(&report.failures);

    if args.verbose {
        report
            .stats
            .print_summary(&mut io::stderr())
            .context("failed to print statistics")?;
    }

    Ok(report.is_success())
}

/// 로그 초기화 (stderr, 기본 warn / -v 이면 debug)
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// 실행한 명령 이름 (에러 메시지 접두어)
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(std::path::Path::new)
        .and_then(|p| p.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cvtsrcpf".to_string())
}

/// 헤더 출력
fn print_header(options: &ConvertOptions) {
    eprintln!("\n{}", "═".repeat(50).bright_blue());
    eprintln!(
        "{}",
        " SOURCE PHYSICAL FILE TO IFS CONVERTER".bright_white().bold()
    );
    eprintln!("{}", "═".repeat(50).bright_blue());
    eprintln!(
        "  Source file:  {}/{}",
        options.library.bright_cyan(),
        options.container.bright_cyan()
    );
    eprintln!("  Target CCSID: {}", options.ccsid);
    eprintln!("  Output dir:   {}", options.output_dir.display());

    if let Some(ref pattern) = options.member_pattern {
        eprintln!("  Members:      {}", pattern.bright_magenta());
    }

    if options.dry_run {
        eprintln!("  {}", "Dry run (nothing is written)".yellow());
    }

    eprintln!("{}", "═".repeat(50).bright_blue());
}

/// 진행률 바 생성
fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 실패한 멤버 목록 출력
fn print_errors(failures: &[MemberFailure]) {
    let program = program_name();
    for failure in failures {
        eprintln!(
            "{}: member {} not converted: {}",
            program,
            failure.member.name,
            failure.error.to_string().red()
        );
    }
}
