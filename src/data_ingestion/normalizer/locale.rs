//! 月份名稱在地化轉換
//!
//! 時間格式只以英文月份名稱表示，來源中的俄文月份（屬格）需要先替換。

use std::borrow::Cow;

/// 俄文月份（屬格）對照英文月份全名
const RUSSIAN_MONTHS: [(&str, &str); 12] = [
    ("января", "January"),
    ("февраля", "February"),
    ("марта", "March"),
    ("апреля", "April"),
    ("мая", "May"),
    ("июня", "June"),
    ("июля", "July"),
    ("августа", "August"),
    ("сентября", "September"),
    ("октября", "October"),
    ("ноября", "November"),
    ("декабря", "December"),
];

/// 月份名稱轉換器
#[derive(Debug, Clone, Copy)]
pub struct LocaleTranslator {
    table: &'static [(&'static str, &'static str)],
}

impl LocaleTranslator {
    /// 俄文 → 英文
    pub fn russian() -> Self {
        Self {
            table: &RUSSIAN_MONTHS,
        }
    }

    /// 將字串中所有已知的月份名稱替換為英文
    ///
    /// 沒有任何符合時直接借用輸入，不配置新字串。
    pub fn translate<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut output = Cow::Borrowed(input);
        for (source, reference) in self.table {
            if output.contains(source) {
                output = Cow::Owned(output.replace(source, reference));
            }
        }
        output
    }
}

impl Default for LocaleTranslator {
    fn default() -> Self {
        Self::russian()
    }
}
