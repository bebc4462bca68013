//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::ccsid::DEFAULT_TARGET_CCSID;
use crate::pipeline::ConvertOptions;

/// cvtsrcpf CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "cvtsrcpf",
    author = "YourName <your@email.com>",
    version,
    disable_help_flag = true,
    about = "Convert the members of a source physical file into stream files",
    long_about = r#"
SOURCE PHYSICAL FILE TO IFS CONVERTER
=====================================

Copies every member of a source physical file into its own stream file
in the current directory. The file name is the member name with the
member type as extension (CMD, MENU and PNLGRP become CMDSRC, MENUSRC and
PNLGRPSRC; type C in file H becomes H). Existing files are never
overwritten: a " (n)" suffix is added instead. Trailing blanks are
removed from every record and records end with a line feed.

Examples:
  cvtsrcpf QRPGLESRC MYLIB
  cvtsrcpf -c 819 QCLSRC MYLIB
  cvtsrcpf -m "AB*" --dry-run QRPGLESRC MYLIB
"#
)]
pub struct Args {
    /// Source physical file to convert
    pub container: String,

    /// Library containing the source physical file
    pub library: String,

    /// Target CCSID of the stream files
    #[arg(short = 'c', long = "ccsid", default_value_t = DEFAULT_TARGET_CCSID)]
    pub ccsid: u32,

    /// Only convert members matching this glob pattern
    #[arg(short, long)]
    pub member: Option<String>,

    /// Directory receiving the stream files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Root of the host object tree (contains QSYS.LIB)
    #[arg(long, default_value = "/")]
    pub qsys_root: PathBuf,

    /// Directory for the CCSID probe file (default: system temp dir)
    #[arg(long)]
    pub probe_dir: Option<PathBuf>,

    /// Show destinations without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print help
    #[arg(short = 'h', short_alias = '?', long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Args {
    /// 실행 옵션으로 변환
    pub fn to_options(&self) -> ConvertOptions {
        let options = ConvertOptions::new(&self.container, &self.library)
            .with_ccsid(self.ccsid)
            .with_member_pattern(self.member.clone())
            .with_dry_run(self.dry_run)
            .with_output_dir(self.output_dir.clone());

        match &self.probe_dir {
            Some(dir) => options.with_probe_dir(dir.clone()),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_positional_arguments() {
        let args = Args::try_parse_from(["cvtsrcpf", "qrpglesrc", "mylib"]).unwrap();
        let options = args.to_options();
        assert_eq!(options.container, "QRPGLESRC");
        assert_eq!(options.library, "MYLIB");
        assert_eq!(options.ccsid, DEFAULT_TARGET_CCSID);
    }

    #[test]
    fn test_ccsid_option() {
        let args = Args::try_parse_from(["cvtsrcpf", "-c", "819", "F", "L"]).unwrap();
        assert_eq!(args.ccsid, 819);
    }

    #[test]
    fn test_help_flags() {
        for flag in ["-h", "-?", "--help"] {
            let err = Args::try_parse_from(["cvtsrcpf", flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp, "{}", flag);
        }
    }

    #[test]
    fn test_usage_errors() {
        assert!(Args::try_parse_from(["cvtsrcpf", "F"]).is_err());
        assert!(Args::try_parse_from(["cvtsrcpf", "F", "L", "EXTRA"]).is_err());
        assert!(Args::try_parse_from(["cvtsrcpf", "--bogus", "F", "L"]).is_err());
        assert!(Args::try_parse_from(["cvtsrcpf", "-c", "abc", "F", "L"]).is_err());
    }
}
