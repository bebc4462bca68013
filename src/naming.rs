//! 파일 이름 결정 모듈
//!
//! 멤버 이름과 유형으로부터 대상 파일 이름을 만들고,
//! 이름이 겹치면 `NAME (n).EXT` 형태로 번호를 붙여 충돌을 피합니다.

use tracing::debug;

/// 멤버 유형과 소스 파일 이름으로 확장자 결정
///
/// 빌드 도구 예약 이름이나 컴파일된 객체 이름과 겹치는 유형만 바꾸고
/// 나머지는 유형을 그대로 확장자로 사용합니다.
///
/// # Examples
/// ```
/// use cvtsrcpf::naming::extension;
///
/// assert_eq!(extension("CMD", "QCMDSRC"), "CMDSRC");
/// assert_eq!(extension("C", "H"), "H");
/// assert_eq!(extension("C", "QCSRC"), "C");
/// assert_eq!(extension("", "QRPGLESRC"), "");
/// ```
pub fn extension<'a>(member_type: &'a str, container: &str) -> &'a str {
    match member_type {
        "" => "",
        "CMD" => "CMDSRC",
        "MENU" => "MENUSRC",
        "PNLGRP" => "PNLGRPSRC",
        "C" if container == "H" => "H",
        other => other,
    }
}

/// 후보 파일 이름 생성
///
/// `counter`가 0보다 크면 이름 뒤에 ` (counter)`를 붙이고,
/// 확장자가 있으면 `.ext`를 붙입니다.
///
/// # Examples
/// ```
/// use cvtsrcpf::naming::format_filename;
///
/// assert_eq!(format_filename("AB1001", "RPGLE", 0), "AB1001.RPGLE");
/// assert_eq!(format_filename("AB1001", "RPGLE", 2), "AB1001 (2).RPGLE");
/// assert_eq!(format_filename("X", "", 0), "X");
/// ```
pub fn format_filename(name: &str, extension: &str, counter: u32) -> String {
    let mut filename = String::from(name);
    if counter > 0 {
        filename.push_str(&format!(" ({})", counter));
    }
    if !extension.is_empty() {
        filename.push('.');
        filename.push_str(extension);
    }
    filename
}

/// 충돌하지 않는 첫 번째 파일 이름 반환
///
/// 카운터를 하나씩 올릴 때마다 `exists`를 다시 호출합니다.
/// 같은 실행에서 먼저 쓴 파일도 이후 멤버에게는 기존 파일이므로
/// 후보를 미리 계산해 두면 안 됩니다.
pub fn resolve_filename<F>(name: &str, extension: &str, mut exists: F) -> String
where
    F: FnMut(&str) -> bool,
{
    let mut counter = 0;
    let mut candidate = format_filename(name, extension, counter);
    while exists(&candidate) {
        debug!(candidate = %candidate, "destination exists");
        counter += 1;
        candidate = format_filename(name, extension, counter);
    }
    candidate
}
