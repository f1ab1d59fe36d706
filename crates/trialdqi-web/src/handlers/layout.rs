//! Page shells, navigation and small HTML fragments shared by the views.

use trialdqi_common::{Priority, RiskLevel};

pub const BRAND: &str = "ClinicalDQI";
pub const BRAND_TAGLINE: &str = "Data Quality Platform";

/// Escape text for interpolation into HTML bodies and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `1672` -> `"1,672"`
pub fn thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Sidebar entry currently highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    AllStudies,
    StudyOverview,
    AlertsQueue,
    None,
}

fn nav_link(href: &str, label: &str, active: bool) -> String {
    let class = if active { "nav-link active" } else { "nav-link" };
    format!(r#"<a href="{}" class="{}">{}</a>"#, escape(href), class, label)
}

fn sidebar(study_id: Option<&str>, active: Nav) -> String {
    let mut links = vec![nav_link("/", "All Studies", active == Nav::AllStudies)];
    if let Some(id) = study_id {
        links.push(nav_link(&format!("/study/{id}"), "Study Overview", active == Nav::StudyOverview));
        links.push(nav_link(&format!("/study/{id}/alerts"), "Alerts Queue", active == Nav::AlertsQueue));
    }

    format!(r#"
<aside class="sidebar">
    <a href="/" class="brand">
        <span class="brand-name">{BRAND}</span>
        <span class="brand-tagline">{BRAND_TAGLINE}</span>
    </a>
    <nav class="sidebar-nav">
        {}
    </nav>
</aside>"#, links.join("\n        "))
}

fn document(title: &str, body: &str) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} — {BRAND}</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
{}
</body>
</html>"#, escape(title), body)
}

/// Study-scoped page with the sidebar.
pub fn dashboard_page(title: &str, study_id: Option<&str>, active: Nav, content: &str) -> String {
    document(title, &format!(r#"<div class="app-container">
{}
<main class="main-content">
{}
</main>
</div>"#, sidebar(study_id, active), content))
}

/// Full-width page without the sidebar.
pub fn plain_page(title: &str, content: &str) -> String {
    document(title, content)
}

pub fn badge(variant: &str, text: &str) -> String {
    format!(r#"<span class="badge badge-{}">{}</span>"#, variant, escape(text))
}

pub fn risk_badge(level: RiskLevel) -> String {
    badge(&format!("risk-{}", level.as_str()), level.label())
}

pub fn priority_badge(priority: Priority) -> String {
    let variant = match priority {
        Priority::High   => "priority-high",
        Priority::Medium => "priority-medium",
        Priority::Low    => "priority-low",
    };
    badge(variant, priority.label())
}

/// Left-border class for an alert row.
pub fn alert_class(priority: Priority) -> &'static str {
    match priority {
        Priority::High   => "alert-critical",
        Priority::Medium => "alert-warning",
        Priority::Low    => "alert-info",
    }
}

pub fn clean_badge(is_clean: bool) -> String {
    if is_clean {
        badge("clean", "Clean")
    } else {
        badge("not-clean", "Not Clean")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("SITE-001 • Japan"), "SITE-001 • Japan");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1672), "1,672");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_sidebar_without_study_has_only_home() {
        let html = dashboard_page("Not found", None, Nav::None, "");
        assert!(html.contains("All Studies"));
        assert!(!html.contains("Alerts Queue"));
    }

    #[test]
    fn test_sidebar_marks_active_link() {
        let html = dashboard_page("Alerts", Some("NOVA-2024-001"), Nav::AlertsQueue, "");
        assert!(html.contains(r#"<a href="/study/NOVA-2024-001/alerts" class="nav-link active">"#));
        assert!(html.contains(r#"<a href="/study/NOVA-2024-001" class="nav-link">"#));
    }
}
