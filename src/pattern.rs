//! 패턴 매칭 모듈
//!
//! glob 패턴을 사용한 멤버 이름 필터링을 담당합니다.

use glob::Pattern;

use crate::error::{CvtError, Result};

/// 컴파일된 멤버 이름 패턴
#[derive(Debug, Default)]
pub struct PatternMatcher {
    pattern: Option<Pattern>,
}

impl PatternMatcher {
    /// 새 패턴 매처 생성
    ///
    /// 멤버 이름은 대문자이므로 패턴도 대문자로 바꿔 컴파일합니다.
    ///
    /// # Examples
    /// ```
    /// use cvtsrcpf::pattern::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::new(Some("ab10*".to_string())).unwrap();
    /// assert!(matcher.matches("AB1001"));
    /// assert!(!matcher.matches("X"));
    /// ```
    pub fn new(pattern: Option<String>) -> Result<Self> {
        let compiled = match pattern {
            Some(ref p) => Some(
                Pattern::new(&p.to_uppercase())
                    .map_err(|_| CvtError::InvalidPattern { pattern: p.clone() })?,
            ),
            None => None,
        };

        Ok(Self { pattern: compiled })
    }

    /// 멤버 이름이 패턴과 일치하는지 확인 (패턴이 없으면 항상 true)
    pub fn matches(&self, member_name: &str) -> bool {
        match &self.pattern {
            Some(p) => p.matches(member_name),
            None => true,
        }
    }
}
