use once_cell::sync::Lazy;
use regex::Regex;

// The provider embeds the token in its root page markup in one of two
// shapes. Both patterns live here so a markup change only touches this
// function; a miss is reported by the caller as a per-product failure.
static VQD_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"vqd='([^']+)'").unwrap());
static VQD_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"vqd=([^&]+)&").unwrap());

/// Pull the vqd token out of the provider's root page body.
pub fn extract_vqd(body: &str) -> Option<String> {
    VQD_QUOTED
        .captures(body)
        .or_else(|| VQD_PARAM.captures(body))
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_pattern() {
        let body = "...;vqd='4-123456789';...";
        assert_eq!(extract_vqd(body).as_deref(), Some("4-123456789"));
    }

    #[test]
    fn test_query_param_pattern() {
        let body = "<a href=\"/i.js?q=widget&vqd=4-987654321&o=json\">";
        assert_eq!(extract_vqd(body).as_deref(), Some("4-987654321"));
    }

    #[test]
    fn test_quoted_pattern_takes_precedence() {
        let body = "vqd=4-aaa&x=1 and also vqd='4-bbb'";
        assert_eq!(extract_vqd(body).as_deref(), Some("4-bbb"));
    }

    #[test]
    fn test_no_token() {
        assert_eq!(extract_vqd("<html>nothing here</html>"), None);
        assert_eq!(extract_vqd(""), None);
    }
}
