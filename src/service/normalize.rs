use unicode_normalization::UnicodeNormalization;

/// 名称归一化: 小写、NFD 分解后去除重音符号、首尾去空白、连续空白合并为单个空格
pub fn normalize_name(name: &str) -> String {
    let stripped: String = name
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 可选字段的归一化，缺失时为空串
pub fn normalize_opt(name: Option<&str>) -> String {
    name.map(normalize_name).unwrap_or_default()
}

/// 只保留 ASCII 数字 (CUIT 比较用)
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}
