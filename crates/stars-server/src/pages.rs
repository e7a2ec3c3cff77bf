//! Static pages

const INDEX_TEMPLATE: &str = include_str!("../static/index.html");

/// Render the Web App home page for `webapp_url`.
///
/// The URL lands both in markup and in a script string literal, so the
/// characters that could end either are percent-encoded.
pub fn render_index(webapp_url: &str) -> String {
    let url = webapp_url
        .replace('"', "%22")
        .replace('<', "%3C")
        .replace('>', "%3E")
        .replace('\\', "%5C");
    INDEX_TEMPLATE.replace("{{WEBAPP_URL}}", &url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_url() {
        let html = render_index("https://stars.example.com");
        assert!(html.contains(r#"const baseUrl = "https://stars.example.com";"#));
        assert!(!html.contains("{{WEBAPP_URL}}"));
    }

    #[test]
    fn test_render_escapes_breakout() {
        let html = render_index(r#"https://x.example"</script><script>alert(1)"#);
        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains("https://x.example%22%3C/script%3E"));
    }
}
