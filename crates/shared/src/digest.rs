use crate::models::{Digest, DigestEntry};

const NO_TITLE: &str = "No title";
const NO_SOURCE: &str = "Unknown";
const NO_URL: &str = "#";
const NO_DESCRIPTION: &str = "No description available";

pub struct DigestRenderer;

impl DigestRenderer {
    fn generated_line(digest: &Digest) -> String {
        digest
            .generated_at
            .format("%Y-%m-%d at %H:%M UTC")
            .to_string()
    }

    /// Markdown form; this is what gets saved and mailed as plain text.
    pub fn markdown(digest: &Digest) -> String {
        let mut md = String::new();

        md.push_str(&format!("# {}\n", digest.template.title));
        md.push_str(&format!("**{}**\n\n---\n\n", digest.long_date()));

        for entry in &digest.entries {
            let fields = EntryFields::from(entry);

            md.push_str(&format!("## {}. {}\n\n", entry.rank, fields.title));
            md.push_str(&format!(
                "**Source:** {} | **[Read Full Article]({})**\n\n",
                fields.source, fields.url
            ));
            md.push_str(&format!("**Summary:** {}\n\n", fields.description));
            md.push_str(&format!(
                "**Why You Should Care:** {}\n\n",
                entry.insight.why_care
            ));
            md.push_str(&format!("**What This Means:** {}\n\n", entry.insight.what_means));
            md.push_str("---\n\n");
        }

        // Footer
        md.push_str("\n---\n\n");
        md.push_str(&format!("*Generated on {}*\n\n", Self::generated_line(digest)));
        md.push_str(&format!("**About This Digest:** {}\n\n", digest.template.about));
        md.push_str("**Feedback or Questions?** Reply to this email.\n");

        md
    }

    /// Self-contained HTML e-mail body with the same sections as the markdown form.
    pub fn html(digest: &Digest) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(&format!(
            "  <title>{}</title>\n",
            Self::escape_html(&digest.subject())
        ));
        html.push_str("  <style>\n");
        html.push_str("    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; }\n");
        html.push_str("    h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }\n");
        html.push_str("    h2 { color: #34495e; margin-top: 30px; }\n");
        html.push_str("    a { color: #3498db; text-decoration: none; }\n");
        html.push_str("    a:hover { text-decoration: underline; }\n");
        html.push_str("    hr { border: none; border-top: 1px solid #ecf0f1; margin: 30px 0; }\n");
        html.push_str("    .footer { background-color: #f8f9fa; padding: 20px; margin-top: 40px; border-radius: 5px; font-size: 0.9em; color: #666; }\n");
        html.push_str("  </style>\n");
        html.push_str("</head>\n<body>\n");

        html.push_str(&format!(
            "<h1>{}</h1>\n",
            Self::escape_html(&digest.template.title)
        ));
        html.push_str(&format!("<p><strong>{}</strong></p>\n", digest.long_date()));
        html.push_str("<hr>\n");

        for entry in &digest.entries {
            let fields = EntryFields::from(entry);

            html.push_str(&format!(
                "<h2>{}. {}</h2>\n",
                entry.rank,
                Self::escape_html(fields.title)
            ));
            html.push_str(&format!(
                "<p><strong>Source:</strong> {} | <strong><a href=\"{}\">Read Full Article</a></strong></p>\n",
                Self::escape_html(fields.source),
                Self::escape_html(fields.url)
            ));
            html.push_str(&format!(
                "<p><strong>Summary:</strong> {}</p>\n",
                Self::escape_html(fields.description)
            ));
            html.push_str(&format!(
                "<p><strong>Why You Should Care:</strong> {}</p>\n",
                Self::escape_html(&entry.insight.why_care)
            ));
            html.push_str(&format!(
                "<p><strong>What This Means:</strong> {}</p>\n",
                Self::escape_html(&entry.insight.what_means)
            ));
            html.push_str("<hr>\n");
        }

        html.push_str("<div class=\"footer\">\n");
        html.push_str(&format!(
            "  <p><em>Generated on {}</em></p>\n",
            Self::generated_line(digest)
        ));
        html.push_str(&format!(
            "  <p><strong>About This Digest:</strong> {}</p>\n",
            Self::escape_html(&digest.template.about)
        ));
        html.push_str("  <p><strong>Feedback or Questions?</strong> Reply to this email.</p>\n");
        html.push_str("</div>\n");

        html.push_str("</body>\n</html>");
        html
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }
}

/// Story fields with placeholders filled in for anything missing or blank
struct EntryFields<'a> {
    title: &'a str,
    source: &'a str,
    url: &'a str,
    description: &'a str,
}

impl<'a> From<&'a DigestEntry> for EntryFields<'a> {
    fn from(entry: &'a DigestEntry) -> Self {
        let article = &entry.story.article;
        Self {
            title: or_placeholder(article.title.as_deref(), NO_TITLE),
            source: or_placeholder(article.source.as_deref(), NO_SOURCE),
            url: or_placeholder(Some(article.url.as_str()), NO_URL),
            description: or_placeholder(article.description.as_deref(), NO_DESCRIPTION),
        }
    }
}

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}
