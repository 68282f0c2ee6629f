//! Formatting helpers

use crate::domain::pricing::{Wad, WAD};

/// Render a WAD-scaled value as a decimal string with up to six fractional digits
pub fn format_wad(value: Wad) -> String {
    let whole = value / WAD;
    let frac = value % WAD;
    if frac == 0 {
        return whole.to_string();
    }
    // keep six digits of the 18-digit fractional part, then trim zeros
    let frac_six = frac / 1_000_000_000_000;
    let mut rendered = format!("{}.{:06}", whole, frac_six);
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }
    rendered
}

/// Scale a whole-token amount up to WAD
pub fn whole_to_wad(tokens: u64) -> Wad {
    Wad::from(tokens) * WAD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole() {
        assert_eq!(format_wad(WAD), "1");
        assert_eq!(format_wad(25 * WAD), "25");
        assert_eq!(format_wad(0), "0");
    }

    #[test]
    fn test_format_fractional() {
        assert_eq!(format_wad(WAD / 2), "0.5");
        assert_eq!(format_wad(WAD + WAD / 4), "1.25");
        assert_eq!(format_wad(3 * WAD / 1000), "0.003");
    }

    #[test]
    fn test_whole_to_wad() {
        assert_eq!(whole_to_wad(4), 4 * WAD);
    }
}
