//! File naming rules shared by the stages.

/// Name of the exported model state inside the model directory.
pub const STATE_FILE_NAME: &str = "state.facebox";

/// Prefix prepended to composited output images.
pub const TAGGED_PREFIX: &str = "tagged_";

/// The characters of `s` before the first decimal digit, or all of `s` if it has none.
pub fn digit_prefix(s: &str) -> &str {
    match s.char_indices().find(|(_, c)| c.is_ascii_digit()) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Everything before the first `.` ("alice.2.jpg" -> "alice").
pub fn file_stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Person label for a training image named `<person><id>.<ext>`.
pub fn person_label(file_name: &str) -> &str {
    digit_prefix(file_stem(file_name))
}

pub fn result_file_name(stem: &str) -> String {
    format!("{stem}.json")
}

pub fn source_image_name(stem: &str) -> String {
    format!("{stem}.jpg")
}

pub fn tag_file_name(name: &str) -> String {
    format!("{name}.jpg")
}

pub fn tagged_file_name(image_name: &str) -> String {
    format!("{TAGGED_PREFIX}{image_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_prefix_stops_at_first_digit() {
        assert_eq!(digit_prefix("alice1"), "alice");
        assert_eq!(digit_prefix("alice12bob3"), "alice");
        assert_eq!(digit_prefix("alice1.jpg"), "alice");
    }

    #[test]
    fn test_digit_prefix_without_digits() {
        assert_eq!(digit_prefix("bob"), "bob");
        assert_eq!(digit_prefix(""), "");
    }

    #[test]
    fn test_digit_prefix_leading_digit() {
        assert_eq!(digit_prefix("7up"), "");
    }

    #[test]
    fn test_digit_prefix_multibyte() {
        assert_eq!(digit_prefix("zoë2"), "zoë");
        assert_eq!(digit_prefix("renée"), "renée");
    }

    #[test]
    fn test_digit_prefix_ignores_non_decimal_numerics() {
        assert_eq!(person_label("bob²1.jpg"), "bob²");
        assert_eq!(digit_prefix("henryⅧ2"), "henryⅧ");
        assert_eq!(digit_prefix("half½3"), "half½");
        assert_eq!(digit_prefix("bob²"), "bob²");
    }

    #[test]
    fn test_person_label() {
        assert_eq!(person_label("alice1.jpg"), "alice");
        assert_eq!(person_label("bob.jpg"), "bob");
        assert_eq!(person_label("carol.v2.jpg"), "carol");
        assert_eq!(person_label("dave"), "dave");
    }

    #[test]
    fn test_file_stem_first_dot() {
        assert_eq!(file_stem("group.photo.jpg"), "group");
        assert_eq!(file_stem("noext"), "noext");
        assert_eq!(file_stem(".hidden"), "");
    }

    #[test]
    fn test_output_names() {
        assert_eq!(result_file_name("party"), "party.json");
        assert_eq!(source_image_name("party"), "party.jpg");
        assert_eq!(tagged_file_name("party.jpg"), "tagged_party.jpg");
        assert_eq!(tag_file_name("alice"), "alice.jpg");
    }
}
