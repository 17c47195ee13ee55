//! Rewrite rules for serving cached pages straight from the web server
//!
//! The rules live in a marked block inside the web server rules file. The
//! block is a pure function of a few store variables, so whether the file
//! is current can be decided by regenerating and comparing.

use declarative::VariableStore;
use std::fmt;

pub const BEGIN_MARKER: &str = "# BEGIN WPSuperCache";
pub const END_MARKER: &str = "# END WPSuperCache";

/// Outcome reported by the rewrite rules getter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    /// Marker block matches the generated rules
    Configured,
    /// Marker block present but stale
    Outdated,
    /// No rules file, or no marker block in it
    Missing,
}

impl RuleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configured => "configured",
            Self::Outdated => "outdated-rules",
            Self::Missing => "missing-rules",
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate the full marker block for the current store values
pub fn generate(store: &impl VariableStore, content_dir: &str) -> String {
    let content_dir = content_dir.trim_matches('/');
    let cache_root = format!("/{content_dir}/cache/supercache/%{{SERVER_NAME}}/$1");
    let compress = store.get_variable("cache_compression").is_truthy();

    let mut lines = vec![
        BEGIN_MARKER.to_string(),
        "<IfModule mod_rewrite.c>".to_string(),
        "RewriteEngine On".to_string(),
        "RewriteBase /".to_string(),
        "AddDefaultCharset UTF-8".to_string(),
        "RewriteCond %{REQUEST_METHOD} !POST".to_string(),
        "RewriteCond %{QUERY_STRING} ^$".to_string(),
    ];

    if store.get_variable("wp_cache_not_logged_in").is_truthy() {
        lines.push(
            "RewriteCond %{HTTP:Cookie} !^.*(comment_author_|wordpress_logged_in|wp-postpass_).*$"
                .to_string(),
        );
    }

    if store.get_variable("wp_cache_mobile_enabled").is_truthy() {
        lines.push(
            "RewriteCond %{HTTP_USER_AGENT} !^.*(Android|BlackBerry|iPhone|iPod|Opera\\ Mini|Windows\\ Phone).*$"
                .to_string(),
        );
    }

    let file = if compress { "index.html.gz" } else { "index.html" };
    if compress {
        lines.push("RewriteCond %{HTTP:Accept-Encoding} gzip".to_string());
    }
    lines.push(format!("RewriteCond %{{DOCUMENT_ROOT}}{cache_root}/{file} -f"));
    lines.push(format!("RewriteRule ^(.*) \"{cache_root}/{file}\" [L]"));
    lines.push("</IfModule>".to_string());
    lines.push(END_MARKER.to_string());

    lines.join("\n")
}

/// Byte range of the marker block (markers included), if both markers exist
fn block_range(contents: &str) -> Option<(usize, usize)> {
    let start = contents.find(BEGIN_MARKER)?;
    let end = contents[start..].find(END_MARKER)? + start + END_MARKER.len();
    Some((start, end))
}

/// Compare the rules file contents against the generated block
pub fn status(contents: Option<&str>, generated: &str) -> RuleStatus {
    let Some(contents) = contents else {
        return RuleStatus::Missing;
    };

    match block_range(contents) {
        None => RuleStatus::Missing,
        Some((start, end)) if contents[start..end] == *generated => RuleStatus::Configured,
        Some(_) => RuleStatus::Outdated,
    }
}

/// Replace the marker block in `contents`, or prepend it when absent
///
/// Everything outside the block is preserved.
pub fn splice(contents: &str, generated: &str) -> String {
    match block_range(contents) {
        Some((start, end)) => format!("{}{}{}", &contents[..start], generated, &contents[end..]),
        None if contents.trim().is_empty() => format!("{generated}\n"),
        None => format!("{generated}\n\n{contents}"),
    }
}
