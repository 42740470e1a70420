//! 패키지 이름에서 프로젝트 키를 만드는 슬러그 규칙.

/// 프로젝트 키에 쓸 수 없어 제거하는 문자.
const INVALID_CHARACTERS: &[char] = &['?', '$', '*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@', '/'];

/// 이름을 프로젝트 키 슬러그로 변환한다.
/// 결정적이며 이미 슬러그인 값에 다시 적용해도 결과가 같다.
pub fn slugify(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !INVALID_CHARACTERS.contains(c))
        .collect();

    let mut out = String::with_capacity(stripped.len());
    let mut pending_separator = false;
    for ch in stripped.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('-');
        }
        pending_separator = false;
        out.extend(ch.to_lowercase());
    }
    out
}
