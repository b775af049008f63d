pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 10_000;
pub const MAX_CONTEXT_LEN: usize = 4_000;

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert_eq!(
            validate_required("   ", "Title", MAX_TITLE_LEN),
            Some("Title is required".to_string())
        );
        assert_eq!(validate_required("Budget", "Title", MAX_TITLE_LEN), None);
    }

    #[test]
    fn length_limits_count_characters() {
        let title = "é".repeat(MAX_TITLE_LEN);
        assert_eq!(validate_required(&title, "Title", MAX_TITLE_LEN), None);
        let too_long = "x".repeat(MAX_CONTEXT_LEN + 1);
        assert!(validate_optional(&too_long, "Context", MAX_CONTEXT_LEN).is_some());
        assert_eq!(validate_optional("", "Context", MAX_CONTEXT_LEN), None);
    }
}
