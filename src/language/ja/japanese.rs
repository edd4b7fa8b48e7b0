use crate::language::cjk_utils::{is_code_point_in_range, CodepointRange};

pub const KATAKANA_SMALL_KA_CODE_POINT: u32 = 0x30f5;
pub const KATAKANA_SMALL_KE_CODE_POINT: u32 = 0x30f6;

pub const HIRAGANA_CONVERSION_RANGE: CodepointRange = (0x3041, 0x3096);
pub const KATAKANA_CONVERSION_RANGE: CodepointRange = (0x30a1, 0x30f6);

/// Folds katakana onto hiragana so that `バカがい` and `ばかがい` compare equal.
///
/// ヵ and ヶ are left alone (they are counters as often as they are kana),
/// as are the prolonged sound mark and anything outside the katakana block.
pub fn convert_katakana_to_hiragana<T: AsRef<str>>(text: T) -> String {
    let text = text.as_ref();
    let offset = KATAKANA_CONVERSION_RANGE.0 - HIRAGANA_CONVERSION_RANGE.0;
    let mut result = String::with_capacity(text.len());

    for char in text.chars() {
        let code_point = char as u32;
        let converted_char = match code_point {
            KATAKANA_SMALL_KA_CODE_POINT | KATAKANA_SMALL_KE_CODE_POINT => char,
            _ if is_code_point_in_range(code_point, KATAKANA_CONVERSION_RANGE) => {
                std::char::from_u32(code_point - offset).unwrap_or(char)
            }
            _ => char,
        };
        result.push(converted_char);
    }

    result
}
