//! 대상 디렉터리 모듈
//!
//! 대상 디렉터리가 파일 이름 충돌 여부의 기준입니다.
//! 존재 확인은 매번 파일 시스템에 직접 묻고, 드라이런에서는
//! 이번 실행에서 계획된 이름을 메모리에 함께 기록합니다.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CvtError, Result};

/// 변환 결과를 쓰는 디렉터리
#[derive(Debug)]
pub struct Destination {
    dir: PathBuf,
    planned: HashSet<String>,
}

impl Destination {
    /// 대상 디렉터리 열기 (절대 경로로 변환)
    pub fn open(dir: &Path) -> Result<Self> {
        let dir = dir.canonicalize().map_err(|e| CvtError::io(dir, e))?;
        Ok(Self {
            dir,
            planned: HashSet::new(),
        })
    }

    /// 파일 이름의 절대 경로
    pub fn absolute(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// 이름이 이미 사용 중인지 확인
    pub fn exists(&self, name: &str) -> bool {
        self.planned.contains(name) || self.absolute(name).exists()
    }

    /// 쓰지 않고 이름만 예약 (드라이런)
    pub fn reserve(&mut self, name: &str) {
        self.planned.insert(name.to_string());
    }

    /// 새 파일을 만들어 내용 쓰기 (기존 파일은 덮어쓰지 않음)
    pub fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.absolute(name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| CvtError::io(&path, e))?;
        file.write_all(bytes).map_err(|e| CvtError::io(&path, e))?;
        Ok(path)
    }
}
