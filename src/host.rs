//! 호스트 객체 공간 모듈
//!
//! 라이브러리/소스 물리 파일 존재 확인, 멤버 메타데이터 조회,
//! 멤버 데이터 읽기, CCSID 태그 설정을 담당합니다.
//!
//! 로컬 구현인 [`QsysTree`]는 IFS 명명 규칙을 따르는 디렉터리 트리를
//! 호스트 객체 공간으로 사용합니다.
//!
//! ```text
//! <root>/QSYS.LIB/<LIBRARY>.LIB/<FILE>.FILE/<MEMBER>.MBR
//! ```

use memmap2::Mmap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::ccsid::{Codec, DEFAULT_SOURCE_CCSID};
use crate::error::{CvtError, Result};

/// 멤버 유형이 없음을 나타내는 값
pub const NO_TYPE_SENTINEL: &str = "*NONE";

/// 멤버 카탈로그 파일 이름 (소스 물리 파일 디렉터리 안)
pub const CATALOG_FILE: &str = ".srcmbr.json";

/// 메타데이터 조회 결과 한 행 (멤버 이름, 선언된 유형)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub name: String,
    pub member_type: Option<String>,
}

/// 변환에 필요한 호스트 기능
pub trait SourceHost {
    /// 라이브러리 존재 여부
    fn library_exists(&self, library: &str) -> bool;

    /// 라이브러리 안의 소스 물리 파일 존재 여부
    fn container_exists(&self, library: &str, container: &str) -> bool;

    /// 소스 물리 파일의 모든 멤버와 선언된 유형 조회
    fn query_members(&self, library: &str, container: &str) -> Result<Vec<MemberRow>>;

    /// 멤버 데이터가 저장된 CCSID
    fn container_ccsid(&self, library: &str, container: &str) -> Result<u32>;

    /// 멤버 원본 바이트 읽기 (`member`는 호스트에 저장된 이름 그대로)
    fn read_member(&self, library: &str, container: &str, member: &str) -> Result<MemberData>;

    /// 스트림 파일에 CCSID 속성 설정
    fn tag_ccsid(&self, path: &Path, ccsid: u32) -> Result<()>;
}

/// 읽어 들인 멤버 데이터
#[derive(Debug)]
pub enum MemberData {
    /// 메모리 매핑된 대용량 멤버
    Mapped(Mmap),
    /// 메모리로 읽은 멤버
    Loaded(Vec<u8>),
}

impl Deref for MemberData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            MemberData::Mapped(mmap) => &mmap[..],
            MemberData::Loaded(bytes) => bytes.as_slice(),
        }
    }
}

/// `.srcmbr.json` 카탈로그
#[derive(Debug, Default, Deserialize)]
struct Catalog {
    #[serde(default)]
    ccsid: Option<u32>,
    #[serde(default)]
    members: BTreeMap<String, Option<String>>,
}

impl Catalog {
    /// 멤버 유형 조회 (정확히 같은 키 우선, 없으면 대소문자 무시)
    fn member_type(&self, name: &str) -> Option<String> {
        self.members
            .get(name)
            .or_else(|| {
                self.members
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, member_type)| member_type)
            })
            .cloned()
            .flatten()
    }
}

/// 디렉터리 트리 기반 호스트
#[derive(Debug, Clone)]
pub struct QsysTree {
    root: PathBuf,
    /// 이 크기 이상인 멤버는 메모리 매핑으로 읽음
    mmap_threshold: u64,
}

impl QsysTree {
    /// `root` 아래의 `QSYS.LIB`를 객체 공간으로 사용
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mmap_threshold: 10 * 1024 * 1024, // 10MB
        }
    }

    /// 메모리 매핑 임계값 설정
    pub fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }

    /// 라이브러리 디렉터리 경로
    pub fn library_path(&self, library: &str) -> PathBuf {
        self.root
            .join("QSYS.LIB")
            .join(format!("{}.LIB", library))
    }

    /// 소스 물리 파일 디렉터리 경로
    pub fn container_path(&self, library: &str, container: &str) -> PathBuf {
        self.library_path(library)
            .join(format!("{}.FILE", container))
    }

    /// 멤버 파일 경로
    pub fn member_path(&self, library: &str, container: &str, member: &str) -> PathBuf {
        self.container_path(library, container)
            .join(format!("{}.MBR", member))
    }

    fn load_catalog(&self, library: &str, container: &str) -> Result<Catalog> {
        let path = self.container_path(library, container).join(CATALOG_FILE);
        if !path.exists() {
            return Ok(Catalog::default());
        }

        let file = File::open(&path).map_err(|e| CvtError::io(&path, e))?;
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| CvtError::Catalog {
            path,
            reason: e.to_string(),
        })
    }
}

impl SourceHost for QsysTree {
    fn library_exists(&self, library: &str) -> bool {
        self.library_path(library).is_dir()
    }

    fn container_exists(&self, library: &str, container: &str) -> bool {
        self.container_path(library, container).is_dir()
    }

    fn query_members(&self, library: &str, container: &str) -> Result<Vec<MemberRow>> {
        let dir = self.container_path(library, container);
        let catalog = self.load_catalog(library, container)?;

        let mut rows = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                CvtError::io(&dir, source)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let Some(name) = file_name.strip_suffix(".MBR") else {
                continue;
            };

            let member_type = catalog
                .member_type(name)
                .or_else(|| Some(NO_TYPE_SENTINEL.to_string()));
            rows.push(MemberRow {
                name: name.to_string(),
                member_type,
            });
        }

        Ok(rows)
    }

    fn container_ccsid(&self, library: &str, container: &str) -> Result<u32> {
        let catalog = self.load_catalog(library, container)?;
        Ok(catalog.ccsid.unwrap_or(DEFAULT_SOURCE_CCSID))
    }

    fn read_member(&self, library: &str, container: &str, member: &str) -> Result<MemberData> {
        let path = self.member_path(library, container, member);
        let file = File::open(&path).map_err(|e| CvtError::io(&path, e))?;
        let size = file.metadata().map_err(|e| CvtError::io(&path, e))?.len();

        if size >= self.mmap_threshold {
            // 대용량 멤버: 메모리 매핑 사용
            let mmap = unsafe { Mmap::map(&file).map_err(|e| CvtError::io(&path, e))? };
            Ok(MemberData::Mapped(mmap))
        } else {
            std::fs::read(&path)
                .map(MemberData::Loaded)
                .map_err(|e| CvtError::io(&path, e))
        }
    }

    fn tag_ccsid(&self, path: &Path, ccsid: u32) -> Result<()> {
        // 로컬 파일 시스템에는 CCSID 속성이 없으므로 파일과 코덱만 확인
        if !path.is_file() {
            return Err(CvtError::io(
                path,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }
        Codec::from_ccsid(ccsid)
            .map(|_| ())
            .ok_or(CvtError::InvalidEncoding { ccsid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_tree() -> (TempDir, QsysTree) {
        let temp_dir = TempDir::new().unwrap();
        let file_dir = temp_dir.path().join("QSYS.LIB/MYLIB.LIB/QRPGSRC.FILE");
        fs::create_dir_all(&file_dir).unwrap();
        fs::write(file_dir.join("A.MBR"), b"a").unwrap();
        fs::write(file_dir.join("B.MBR"), b"b").unwrap();
        fs::write(file_dir.join("notes.txt"), b"ignored").unwrap();
        fs::write(
            file_dir.join(CATALOG_FILE),
            r#"{"ccsid": 1208, "members": {"A": "RPGLE", "B": null}}"#,
        )
        .unwrap();
        let tree = QsysTree::new(temp_dir.path());
        (temp_dir, tree)
    }

    #[test]
    fn test_object_existence() {
        let (_temp_dir, tree) = setup_tree();
        assert!(tree.library_exists("MYLIB"));
        assert!(!tree.library_exists("NOLIB"));
        assert!(tree.container_exists("MYLIB", "QRPGSRC"));
        assert!(!tree.container_exists("MYLIB", "QCLSRC"));
    }

    #[test]
    fn test_query_members_uses_catalog() {
        let (_temp_dir, tree) = setup_tree();
        let mut rows = tree.query_members("MYLIB", "QRPGSRC").unwrap();
        rows.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].member_type.as_deref(), Some("RPGLE"));
        assert_eq!(rows[1].member_type.as_deref(), Some(NO_TYPE_SENTINEL));
        assert_eq!(tree.container_ccsid("MYLIB", "QRPGSRC").unwrap(), 1208);
    }

    #[test]
    fn test_missing_catalog_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let file_dir = temp_dir.path().join("QSYS.LIB/L.LIB/F.FILE");
        fs::create_dir_all(&file_dir).unwrap();
        fs::write(file_dir.join("M.MBR"), b"").unwrap();

        let tree = QsysTree::new(temp_dir.path());
        let rows = tree.query_members("L", "F").unwrap();
        assert_eq!(rows[0].member_type.as_deref(), Some(NO_TYPE_SENTINEL));
        assert_eq!(tree.container_ccsid("L", "F").unwrap(), DEFAULT_SOURCE_CCSID);
    }

    #[test]
    fn test_broken_catalog() {
        let (temp_dir, tree) = setup_tree();
        fs::write(
            temp_dir.path().join("QSYS.LIB/MYLIB.LIB/QRPGSRC.FILE").join(CATALOG_FILE),
            "{ broken",
        )
        .unwrap();
        assert!(matches!(
            tree.query_members("MYLIB", "QRPGSRC"),
            Err(CvtError::Catalog { .. })
        ));
    }

    #[test]
    fn test_read_member_with_mmap() {
        let (_temp_dir, tree) = setup_tree();
        let tree = tree.with_mmap_threshold(0);
        let data = tree.read_member("MYLIB", "QRPGSRC", "A").unwrap();
        assert!(matches!(data, MemberData::Mapped(_)));
        assert_eq!(&data[..], b"a");
    }

    #[test]
    fn test_read_member_small() {
        let (_temp_dir, tree) = setup_tree();
        let data = tree.read_member("MYLIB", "QRPGSRC", "B").unwrap();
        assert!(matches!(data, MemberData::Loaded(_)));
        assert_eq!(&data[..], b"b");
    }

    #[test]
    fn test_catalog_lookup_ignores_case() {
        let temp_dir = TempDir::new().unwrap();
        let file_dir = temp_dir.path().join("QSYS.LIB/L.LIB/F.FILE");
        fs::create_dir_all(&file_dir).unwrap();
        fs::write(file_dir.join("ab1001.MBR"), b"").unwrap();
        fs::write(
            file_dir.join(CATALOG_FILE),
            r#"{"members": {"AB1001": "RPGLE"}}"#,
        )
        .unwrap();

        let tree = QsysTree::new(temp_dir.path());
        let rows = tree.query_members("L", "F").unwrap();
        assert_eq!(rows[0].name, "ab1001");
        assert_eq!(rows[0].member_type.as_deref(), Some("RPGLE"));
    }
}
