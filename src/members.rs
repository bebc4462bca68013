//! 멤버 목록 조회 모듈
//!
//! 호스트 메타데이터에서 멤버 목록을 가져와 정규화하고 정렬합니다.

use crate::error::Result;
use crate::host::{SourceHost, NO_TYPE_SENTINEL};

/// 소스 물리 파일의 멤버 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    /// 멤버 이름 (대문자)
    pub name: String,
    /// 멤버 유형 (대문자, 유형이 없으면 빈 문자열)
    pub member_type: String,
    /// 호스트에 저장된 원래 멤버 이름 (데이터 읽기용)
    pub source_name: String,
}

impl MemberRecord {
    /// 이름과 유형을 대문자로 정규화하여 생성
    pub fn new(name: &str, member_type: &str) -> Self {
        let member_type = member_type.trim();
        let member_type = if member_type.eq_ignore_ascii_case(NO_TYPE_SENTINEL) {
            ""
        } else {
            member_type
        };

        Self {
            name: name.trim().to_uppercase(),
            source_name: name.to_string(),
            member_type: member_type.to_uppercase(),
        }
    }

    /// 정렬 키 (`NAME.TYPE`)
    pub fn sort_key(&self) -> String {
        format!("{}.{}", self.name, self.member_type)
    }
}

/// 멤버 목록을 정렬된 순서로 조회
///
/// 정렬은 실행마다 같은 파일 이름이 나오도록 보장합니다.
pub fn enumerate_members<H: SourceHost + ?Sized>(
    host: &H,
    library: &str,
    container: &str,
) -> Result<Vec<MemberRecord>> {
    let mut members: Vec<MemberRecord> = host
        .query_members(library, container)?
        .into_iter()
        .map(|row| MemberRecord::new(&row.name, row.member_type.as_deref().unwrap_or("")))
        .collect();

    sort_members(&mut members);
    Ok(members)
}

/// `NAME.TYPE` 사전순 정렬 (같으면 원래 이름 순)
pub fn sort_members(members: &mut [MemberRecord]) {
    members.sort_by_cached_key(|m| (m.sort_key(), m.source_name.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let member = MemberRecord::new("ab1001", "rpgle");
        assert_eq!(member.name, "AB1001");
        assert_eq!(member.member_type, "RPGLE");

        assert_eq!(MemberRecord::new("X", "*NONE").member_type, "");
        assert_eq!(MemberRecord::new("X", "").member_type, "");
    }

    #[test]
    fn test_sort_order() {
        let mut members = vec![MemberRecord::new("B", "RPGLE"), MemberRecord::new("A", "")];
        sort_members(&mut members);
        assert_eq!(members[0], MemberRecord::new("A", ""));
        assert_eq!(members[1], MemberRecord::new("B", "RPGLE"));
    }

    #[test]
    fn test_source_name_preserved() {
        let member = MemberRecord::new("ab1001", "RPGLE");
        assert_eq!(member.name, "AB1001");
        assert_eq!(member.source_name, "ab1001");
    }

    #[test]
    fn test_same_key_ordered_by_source_name() {
        let mut members = vec![MemberRecord::new("a", "TXT"), MemberRecord::new("A", "TXT")];
        sort_members(&mut members);
        assert_eq!(members[0].source_name, "A");
        assert_eq!(members[1].source_name, "a");
    }

    #[test]
    fn test_sort_uses_name_then_type() {
        let mut members = vec![
            MemberRecord::new("A", "RPGLE"),
            MemberRecord::new("A", "CLLE"),
            MemberRecord::new("AB", ""),
        ];
        sort_members(&mut members);
        let keys: Vec<String> = members.iter().map(MemberRecord::sort_key).collect();
        assert_eq!(keys, vec!["A.CLLE", "A.RPGLE", "AB."]);
    }
}
