//! HTML digest rendering.
//!
//! Produces the email body: a header with the localized date, the day-level
//! summary when present, and a table of numbered articles where each
//! localized title links to the original story. All styling is inline, as
//! email clients require.

use crate::models::Digest;
use std::fmt::Write;

/// Render the digest into a self-contained HTML fragment for the email body.
pub fn render_digest(digest: &Digest, date_str: &str) -> String {
    let mut rows = String::new();
    for (i, entry) in digest.articles.iter().enumerate() {
        write!(
            rows,
            r#"
        <tr>
            <td style="padding: 14px 0; border-bottom: 1px solid #eee;">
                <a href="{link}" style="color: #0066cc; text-decoration: none; font-size: 16px; font-weight: bold;">
                    {number}. {title}
                </a><br>
                <p style="color: #444; font-size: 13px; line-height: 1.6; margin: 6px 0 4px 0;">
                    {summary}
                </p>
                <span style="color: #999; font-size: 11px;">{source}</span>
            </td>
        </tr>"#,
            link = entry.article.link,
            number = i + 1,
            title = entry.localized_title,
            summary = entry.localized_summary,
            source = entry.article.source,
        )
        .unwrap();
    }

    let day_summary = digest
        .day_summary
        .as_deref()
        .map(|summary| {
            format!(
                r#"
        <p style="color: #333; font-size: 14px; line-height: 1.7; background: #f5f8fa; padding: 12px 16px; border-left: 3px solid #0066cc;">
            {summary}
        </p>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"
    <div style="max-width: 600px; margin: 0 auto; font-family: -apple-system, sans-serif; color: #333;">
        <h1 style="font-size: 22px; border-bottom: 3px solid #0066cc; padding-bottom: 8px;">
            Novidades de IA no mundo — {date_str}
        </h1>
{day_summary}
        <h2 style="font-size: 16px; margin-top: 20px;">Notícias de IA</h2>
        <table style="width: 100%; border-collapse: collapse;">
            {rows}
        </table>

        <p style="color: #999; font-size: 11px; margin-top: 24px; text-align: center;">
            Gerado automaticamente pelo Daily AI News
        </p>
    </div>
    "#
    )
}
