//! Touch-typing finger assignments for the next expected key. The table is
//! the conventional QWERTY column layout; lookup is case-insensitive and
//! total, so the view can ask about any character without a fallback path.

use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
    Thumb,
}

/// Advisory assignment for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHint {
    Assigned { hand: Hand, finger: Finger },
    /// The space bar; either thumb by convention.
    EitherThumb,
    Unassigned,
}

/// Label shown for characters the table does not cover.
pub const UNASSIGNED_LABEL: &str = "no assigned finger";

/// Case-insensitive lookup. Total over all of `char`.
pub fn hint(c: char) -> KeyHint {
    use Finger::*;
    use Hand::*;

    let assigned = |hand, finger| KeyHint::Assigned { hand, finger };

    match c.to_ascii_lowercase() {
        ' ' => KeyHint::EitherThumb,
        'q' | 'a' | 'z' => assigned(Left, Pinky),
        'w' | 's' | 'x' => assigned(Left, Ring),
        'e' | 'd' | 'c' => assigned(Left, Middle),
        'r' | 'f' | 'v' | 't' | 'g' | 'b' => assigned(Left, Index),
        'y' | 'h' | 'n' | 'u' | 'j' | 'm' => assigned(Right, Index),
        'i' | 'k' | ',' => assigned(Right, Middle),
        'o' | 'l' | '.' => assigned(Right, Ring),
        'p' | ';' | '/' | '\'' => assigned(Right, Pinky),
        _ => KeyHint::Unassigned,
    }
}

/// Human-readable label for the hint line, e.g. "left pinky".
pub fn hint_label(c: char) -> String {
    match hint(c) {
        KeyHint::Assigned { hand, finger } => format!("{hand} {finger}"),
        KeyHint::EitherThumb => "either thumb".to_string(),
        KeyHint::Unassigned => UNASSIGNED_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_all_letters_are_assigned() {
        for c in 'a'..='z' {
            assert_matches!(hint(c), KeyHint::Assigned { .. }, "letter {c} unmapped");
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        for c in 'a'..='z' {
            assert_eq!(hint(c), hint(c.to_ascii_uppercase()));
        }
    }

    #[test]
    fn test_home_row_columns() {
        assert_eq!(
            hint('a'),
            KeyHint::Assigned {
                hand: Hand::Left,
                finger: Finger::Pinky
            }
        );
        assert_eq!(
            hint('j'),
            KeyHint::Assigned {
                hand: Hand::Right,
                finger: Finger::Index
            }
        );
        assert_eq!(
            hint(';'),
            KeyHint::Assigned {
                hand: Hand::Right,
                finger: Finger::Pinky
            }
        );
    }

    #[test]
    fn test_space_is_thumb() {
        assert_eq!(hint(' '), KeyHint::EitherThumb);
        assert_eq!(hint_label(' '), "either thumb");
    }

    #[test]
    fn test_unmapped_characters_fall_back() {
        assert_eq!(hint('7'), KeyHint::Unassigned);
        assert_eq!(hint('ü'), KeyHint::Unassigned);
        assert_eq!(hint('\t'), KeyHint::Unassigned);
        assert_eq!(hint_label('7'), UNASSIGNED_LABEL);
    }

    #[test]
    fn test_labels_read_naturally() {
        assert_eq!(hint_label('q'), "left pinky");
        assert_eq!(hint_label('K'), "right middle");
        assert_eq!(hint_label('b'), "left index");
    }
}
