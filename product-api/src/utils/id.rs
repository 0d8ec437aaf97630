/// 宽松地解析路径中的整数 id
///
/// 跳过前导空白, 允许一个正负号, 取紧随其后的最长数字串: `"12abc"` -> 12, `"1.5"` -> 1。
/// 没有数字或超出 `i64` 范围时返回 `None`, 调用方按"不存在"处理。
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();

    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some(1))]
    #[case("42", Some(42))]
    #[case("007", Some(7))]
    #[case("  5", Some(5))]
    #[case("12abc", Some(12))]
    #[case("1.5", Some(1))]
    #[case("-3", Some(-3))]
    #[case("+8", Some(8))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("-", None)]
    #[case("99999999999999999999", None)]
    fn test_parse_id(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_id(raw), expected);
    }
}
