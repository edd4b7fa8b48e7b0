/// 0 - minInclusive
/// 1 - maxInclusive
pub type CodepointRange = (u32, u32);

pub fn is_code_point_in_range(code_point: u32, range: CodepointRange) -> bool {
    code_point >= range.0 && code_point <= range.1
}

