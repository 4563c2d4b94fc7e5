//! Cache key builders.

/// Counter key for one fixed rate-limit window of a route and caller.
pub fn rate_limit(route: &str, caller: &str, window: u64) -> String {
    format!("rate:{route}:{caller}:{window}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_key() {
        assert_eq!(
            rate_limit("notifications", "user:42", 7),
            "rate:notifications:user:42:7"
        );
    }
}
