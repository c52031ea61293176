/// Build a backend origin from a request Host header.
/// IP-literal hosts (digits, dots and colons only) keep plain `http`; named hosts use `https`.
pub fn origin_from_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let is_ip_literal = !host.is_empty() && host.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ':');
    let scheme = if is_ip_literal { "http" } else { "https" };
    format!("{}://{}", scheme, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_hosts_stay_on_http() {
        assert_eq!(origin_from_host("127.0.0.1:3000"), "http://127.0.0.1:3000");
        assert_eq!(origin_from_host("10.0.0.2"), "http://10.0.0.2");
    }

    #[test]
    fn named_hosts_upgrade_to_https() {
        assert_eq!(origin_from_host("chat.example.com"), "https://chat.example.com");
        assert_eq!(origin_from_host("localhost:3000"), "https://localhost:3000");
    }
}
