//! Brazilian mobile number mask applied on every keystroke of the phone field.

/// Length of the `(DD) DDDDD-DDDD` template.
pub const MASKED_PHONE_LEN: usize = 15;

const AREA_CODE_DIGITS: usize = 2;
const PREFIX_DIGITS: usize = 5;
const MAX_HYPHENATED_RUN: usize = 9;

/// Mask a raw phone input as `(DD) DDDDD-DDDD`.
///
/// Non-digits are dropped first. The area code is parenthesized once a third
/// digit exists, and the hyphen goes after the first five digits of the
/// trailing digit run (at most nine long) once that run has six or more
/// digits. The result never exceeds [`MASKED_PHONE_LEN`] characters.
pub fn mask_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() <= AREA_CODE_DIGITS {
        return digits;
    }

    let (area_code, local) = digits.split_at(AREA_CODE_DIGITS);
    let mut masked = String::with_capacity(MASKED_PHONE_LEN + 1);
    masked.push('(');
    masked.push_str(area_code);
    masked.push_str(") ");

    if local.len() > PREFIX_DIGITS {
        let run = local.len().min(MAX_HYPHENATED_RUN);
        let hyphen_at = local.len() - run + PREFIX_DIGITS;
        masked.push_str(&local[..hyphen_at]);
        masked.push('-');
        masked.push_str(&local[hyphen_at..]);
    } else {
        masked.push_str(local);
    }

    masked.truncate(MASKED_PHONE_LEN);
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_full_mobile_number() {
        assert_eq!(mask_phone("11987654321"), "(11) 98765-4321");
    }

    #[test]
    fn strips_punctuation_before_formatting() {
        assert_eq!(mask_phone("(11) 98765-4321"), "(11) 98765-4321");
        assert_eq!(mask_phone("+55 11 9.8765 4321"), "(55) 1198765-43");
    }

    #[test]
    fn keeps_short_inputs_unparenthesized() {
        assert_eq!(mask_phone(""), "");
        assert_eq!(mask_phone("abc"), "");
        assert_eq!(mask_phone("1"), "1");
        assert_eq!(mask_phone("11"), "11");
    }

    #[test]
    fn progressive_keystrokes_follow_template() {
        assert_eq!(mask_phone("119"), "(11) 9");
        assert_eq!(mask_phone("1198765"), "(11) 98765");
        assert_eq!(mask_phone("11987654"), "(11) 98765-4");
        assert_eq!(mask_phone("1198765432"), "(11) 98765-432");
    }

    #[test]
    fn overflowing_digits_are_truncated() {
        assert_eq!(mask_phone("119876543210"), "(11) 987654-321");
        for raw in ["1198765432101234", "99999999999999999999", "1a2b3c4d5e6f7g8h9i0j"] {
            assert!(mask_phone(raw).len() <= MASKED_PHONE_LEN, "{raw}");
        }
    }

    #[test]
    fn remasking_is_stable() {
        let once = mask_phone("21912345678");
        assert_eq!(mask_phone(&once), once);
    }
}
