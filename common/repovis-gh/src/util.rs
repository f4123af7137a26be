//! Utility functions for interpreting `gh` failures

/// Extract the HTTP status code from `gh` error output
///
/// `gh` reports API failures as `HTTP 403: Resource not accessible ...`.
/// Returns the first three-digit code following `HTTP `.
pub fn parse_http_status(text: &str) -> Option<u16> {
    let mut rest = text;
    while let Some(pos) = rest.find("HTTP ") {
        let after = &rest[pos + 5..];
        let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.len() == 3
            && let Ok(status) = digits.parse::<u16>()
        {
            return Some(status);
        }
        rest = after;
    }
    None
}

/// Get a human-readable description for a `gh` exit code
pub fn describe_exit_code(exit_code: i32) -> &'static str {
    match exit_code {
        0 => "success",
        1 => "general error",
        2 => "cancelled",
        4 => "authentication required",
        126 => "command invoked cannot execute",
        127 => "command not found",
        130 => "terminated by Control-C",
        131..=255 => "terminated by signal",
        _ => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http_status() {
        assert_eq!(parse_http_status("HTTP 404: Not Found"), Some(404));
        assert_eq!(
            parse_http_status("GraphQL: something\nHTTP 403: API rate limit exceeded"),
            Some(403)
        );
        assert_eq!(parse_http_status("HTTP 4040"), None);
        assert_eq!(parse_http_status("HTTP x HTTP 429: slow down"), Some(429));
        assert_eq!(parse_http_status("no status here"), None);
    }

    #[test]
    fn test_describe_exit_code() {
        assert_eq!(describe_exit_code(0), "success");
        assert_eq!(describe_exit_code(1), "general error");
        assert_eq!(describe_exit_code(2), "cancelled");
        assert_eq!(describe_exit_code(4), "authentication required");
        assert_eq!(describe_exit_code(127), "command not found");
        assert_eq!(describe_exit_code(137), "terminated by signal");
        assert_eq!(describe_exit_code(42), "error");
        assert_eq!(describe_exit_code(-1), "error");
    }
}
