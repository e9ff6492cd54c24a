use aws_sdk_ssm::error::ProvideErrorMetadata;
use fleetdoc_core::ServiceError;

/// Upper bound the service puts on a command comment.
pub(crate) const MAX_COMMENT_CHARS: usize = 100;

/// Map an SDK error to a remote failure, preferring `code: message` when the service sent one.
pub(crate) fn sdk_error<E>(operation: &'static str, err: E) -> ServiceError
where
    E: ProvideErrorMetadata + std::fmt::Display,
{
    ServiceError::remote(operation, describe(err.code(), err.message(), &err))
}

fn describe(code: Option<&str>, message: Option<&str>, fallback: &dyn std::fmt::Display) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => fallback.to_string(),
    }
}

pub(crate) fn truncate_comment(comment: &str) -> String {
    comment.chars().take(MAX_COMMENT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_code_and_message() {
        assert_eq!(
            describe(Some("AccessDeniedException"), Some("not allowed"), &"dispatch failure"),
            "AccessDeniedException: not allowed"
        );
        assert_eq!(describe(Some("Throttling"), None, &"x"), "Throttling");
        assert_eq!(describe(None, None, &"dispatch failure"), "dispatch failure");
    }

    #[test]
    fn long_comments_are_truncated() {
        let long = "x".repeat(250);
        assert_eq!(truncate_comment(&long).len(), MAX_COMMENT_CHARS);
        assert_eq!(truncate_comment("short"), "short");
    }
}
