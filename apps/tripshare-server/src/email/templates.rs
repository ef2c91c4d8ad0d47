//! Email templates for access notices.

use chrono::{DateTime, Utc};
use tripshare_access::Notice;
use tripshare_storage::MemberRole;

/// Rendered email: subject plus plain-text and HTML bodies.
pub struct EmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

fn role_phrase(role: MemberRole) -> &'static str {
    match role {
        MemberRole::Editor => "view and edit",
        MemberRole::Viewer => "view",
    }
}

fn expiry_line(expires_at: Option<DateTime<Utc>>) -> String {
    match expires_at {
        Some(at) => format!("This invitation expires on {}.", at.format("%B %-d, %Y")),
        None => "This invitation does not expire.".to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn html_page(heading: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background: #f5f5f5; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 40px 20px; }}
        .card {{ background: white; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        h1 {{ color: #1a1a1a; margin-top: 0; font-size: 24px; }}
        .button {{ display: inline-block; padding: 12px 24px; background: #2563eb; color: white; border-radius: 6px; text-decoration: none; }}
        .muted {{ color: #666; font-size: 14px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="card">
            <h1>{}</h1>
            {}
        </div>
    </div>
</body>
</html>"#,
        heading, body
    )
}

impl EmailContent {
    pub fn for_notice(notice: &Notice) -> Self {
        match notice {
            Notice::Invitation {
                trip_name,
                inviter_name,
                role,
                url,
                expires_at,
            } => Self::invitation(trip_name, inviter_name, *role, url, *expires_at),
            Notice::AddedToTrip {
                trip_name,
                inviter_name,
                role,
            } => Self::added_to_trip(trip_name, inviter_name, *role),
        }
    }

    fn invitation(
        trip_name: &str,
        inviter_name: &str,
        role: MemberRole,
        url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let expiry = expiry_line(expires_at);
        let text = format!(
            r#"{inviter} invited you to {action} the trip "{trip}".

Accept the invitation:
{url}

{expiry}"#,
            inviter = inviter_name,
            action = role_phrase(role),
            trip = trip_name,
            url = url,
            expiry = expiry,
        );
        let body = format!(
            r#"<p>{inviter} invited you to {action} the trip <strong>{trip}</strong>.</p>
            <p><a class="button" href="{url}">Accept invitation</a></p>
            <p class="muted">{expiry}</p>"#,
            inviter = escape_html(inviter_name),
            action = role_phrase(role),
            trip = escape_html(trip_name),
            url = escape_html(url),
            expiry = expiry,
        );

        Self {
            subject: format!("{} invited you to {}", inviter_name, trip_name),
            text,
            html: html_page("You're invited", &body),
        }
    }

    fn added_to_trip(trip_name: &str, inviter_name: &str, role: MemberRole) -> Self {
        let text = format!(
            r#"{inviter} added you to the trip "{trip}". You can now {action} it."#,
            inviter = inviter_name,
            trip = trip_name,
            action = role_phrase(role),
        );
        let body = format!(
            r#"<p>{inviter} added you to the trip <strong>{trip}</strong>. You can now {action} it.</p>"#,
            inviter = escape_html(inviter_name),
            trip = escape_html(trip_name),
            action = role_phrase(role),
        );

        Self {
            subject: format!("{} added you to {}", inviter_name, trip_name),
            text,
            html: html_page("New trip", &body),
        }
    }
}
