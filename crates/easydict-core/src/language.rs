use serde::{Deserialize, Serialize};

pub const AUTO: &str = "auto";

/// A selectable language with its display names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangPair {
    pub code: String,
    pub name: String,
    pub name_en: String,
}

const LANGUAGES: &[(&str, &str, &str)] = &[
    (AUTO, "自动检测", "Auto Detect"),
    ("zh-CN", "简体中文", "Chinese (Simplified)"),
    ("zh-TW", "繁體中文", "Chinese (Traditional)"),
    ("en", "英语", "English"),
    ("ja", "日语", "Japanese"),
    ("ko", "韩语", "Korean"),
    ("fr", "法语", "French"),
    ("de", "德语", "German"),
    ("es", "西班牙语", "Spanish"),
    ("pt", "葡萄牙语", "Portuguese"),
    ("ru", "俄语", "Russian"),
    ("ar", "阿拉伯语", "Arabic"),
    ("th", "泰语", "Thai"),
    ("vi", "越南语", "Vietnamese"),
    ("it", "意大利语", "Italian"),
    ("nl", "荷兰语", "Dutch"),
    ("pl", "波兰语", "Polish"),
    ("uk", "乌克兰语", "Ukrainian"),
    ("id", "印度尼西亚语", "Indonesian"),
    ("ms", "马来语", "Malay"),
    ("hi", "印地语", "Hindi"),
    ("tr", "土耳其语", "Turkish"),
];

pub fn supported_languages() -> Vec<LangPair> {
    LANGUAGES
        .iter()
        .map(|(code, name, name_en)| LangPair {
            code: code.to_string(),
            name: name.to_string(),
            name_en: name_en.to_string(),
        })
        .collect()
}

/// Languages valid as a translation target (everything but `auto`)
pub fn target_languages() -> Vec<LangPair> {
    supported_languages()
        .into_iter()
        .filter(|lang| lang.code != AUTO)
        .collect()
}

pub fn is_supported(code: &str) -> bool {
    LANGUAGES.iter().any(|(c, _, _)| *c == code)
}

#[derive(Default)]
struct ScriptCounts {
    han: u32,
    kana: u32,
    hangul: u32,
    latin: u32,
    cyrillic: u32,
    arabic: u32,
    thai: u32,
}

impl ScriptCounts {
    fn of(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars() {
            match c {
                '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}' => counts.han += 1,
                '\u{3040}'..='\u{309f}' | '\u{30a0}'..='\u{30ff}' | '\u{31f0}'..='\u{31ff}' => {
                    counts.kana += 1
                }
                '\u{ac00}'..='\u{d7af}' | '\u{1100}'..='\u{11ff}' => counts.hangul += 1,
                '\u{0400}'..='\u{04ff}' => counts.cyrillic += 1,
                '\u{0600}'..='\u{06ff}' => counts.arabic += 1,
                '\u{0e00}'..='\u{0e7f}' => counts.thai += 1,
                'a'..='z' | 'A'..='Z' => counts.latin += 1,
                _ => {}
            }
        }
        counts
    }

    fn total(&self) -> u32 {
        self.han + self.kana + self.hangul + self.latin + self.cyrillic + self.arabic + self.thai
    }
}

/// Script-ratio heuristic used when the user leaves the source on `auto`.
///
/// Kana wins over Han so that Japanese text with kanji is not read as Chinese.
pub fn detect_language(text: &str) -> &'static str {
    let counts = ScriptCounts::of(text.trim());
    let total = counts.total();
    if total == 0 {
        return "en";
    }

    let share = |n: u32| n as f64 / total as f64;

    if counts.kana > 0 && share(counts.kana) > 0.1 {
        "ja"
    } else if counts.hangul > 0 && share(counts.hangul) > 0.15 {
        "ko"
    } else if counts.han > 0 && share(counts.han) > 0.2 {
        "zh-CN"
    } else if counts.cyrillic > counts.latin {
        "ru"
    } else if counts.arabic > counts.latin {
        "ar"
    } else if counts.thai > counts.latin {
        "th"
    } else {
        "en"
    }
}

/// Target for an `auto` target selection: Chinese text goes to English,
/// everything else to the configured default.
pub fn auto_target_lang(source: &str, default_target: &str) -> String {
    if source.starts_with("zh") {
        "en".to_string()
    } else {
        default_target.to_string()
    }
}
