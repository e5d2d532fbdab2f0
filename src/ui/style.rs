// src/ui/style.rs - Stylesheet injection for the desktop webview

/// Base rules shipped inside the binary.
pub const BASE_CSS: &str = include_str!("../../assets/kitchen-ops.css");

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// `<head>` fragment: the Tailwind runtime plus the embedded base rules.
pub fn custom_head() -> String {
    format!(
        r#"<script src="{}"></script>
<style>
{}
</style>"#,
        TAILWIND_CDN, BASE_CSS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_embeds_base_css() {
        let head = custom_head();
        assert!(head.contains(TAILWIND_CDN));
        assert!(head.contains("[draggable=\"true\"]"));
    }
}
