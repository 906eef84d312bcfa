pub mod password;

/// 数字字符集，序列号从这里取字符
pub const DIGITS: &str = "0123456789";

/// 字母和数字，用于生成令牌
pub const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 从给定字符集中随机生成指定长度的字符串
pub fn random_string(length: usize, chars: &str) -> String {
    use std::iter;

    let chars: Vec<char> = chars.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())])
        .take(length)
        .collect()
}

/// 转义 HTML 文本和属性值
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_string_uses_charset() {
        let s = random_string(32, DIGITS);
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_random_string_empty_charset() {
        assert_eq!(random_string(8, ""), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
