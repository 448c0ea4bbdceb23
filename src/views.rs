// ABOUTME: Server-rendered HTML views for the coach roster pages
// ABOUTME: Builds escaped HTML strings; no template engine involved
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! HTML views
//!
//! Every page goes through [`layout`], which renders the shared shell and
//! navigation. User-supplied text is escaped with `html-escape` at every
//! interpolation point; attribute values use the double-quoted-attribute
//! encoder.

use std::fmt::Write;

use axum::http::StatusCode;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::auth::AuthResult;
use crate::database::coaches::{Coach, SortField, SortOrder};

/// Render a derived percentage: two decimals, or an em-dash when absent
#[must_use]
pub fn fmt_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "\u{2014}".to_owned(), |v| format!("{v:.2}"))
}

fn nav(user: Option<&AuthResult>) -> String {
    let account = user.map_or_else(
        || {
            r#"<a href="/auth/sign-in">Sign in</a> <a href="/auth/sign-up">Sign up</a>"#.to_owned()
        },
        |auth| {
            let name = auth.display_name.as_deref().unwrap_or(&auth.email);
            format!(
                r#"<span class="who">{}</span> <a href="/auth/sign-out">Sign out</a>"#,
                encode_text(name)
            )
        },
    );
    format!(
        r#"<nav><a href="/">Courtside</a> <a href="/coaches">Coaches</a> <span class="account">{account}</span></nav>"#
    )
}

/// Shared page shell
#[must_use]
pub fn layout(title: &str, user: Option<&AuthResult>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Courtside</title>
</head>
<body>
{nav}
<main>
{body}
</main>
</body>
</html>"#,
        title = encode_text(title),
        nav = nav(user),
    )
}

/// GET / landing page
#[must_use]
pub fn landing_page(user: Option<&AuthResult>) -> String {
    let body = r#"<h1>Courtside</h1>
<p>A roster of head coaches and their win-loss records.</p>
<p><a href="/coaches">Browse the coaches</a></p>"#;
    layout("Home", user, body)
}

fn sort_link(label: &str, field: SortField, current: SortField, order: SortOrder) -> String {
    // Clicking the active column flips the direction
    let next_order = if field == current {
        match order {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    } else {
        SortOrder::Descending
    };
    format!(
        r#"<a href="/coaches?sortField={}&amp;sortOrder={}">{}</a>"#,
        field.as_str(),
        next_order.as_str(),
        encode_text(label)
    )
}

/// GET /coaches list view
#[must_use]
pub fn coaches_index(
    coaches: &[Coach],
    sort_field: SortField,
    sort_order: SortOrder,
    user: Option<&AuthResult>,
) -> String {
    let mut body = String::from("<h1>Coaches</h1>\n");

    if user.is_some_and(|u| u.role.is_admin()) {
        body.push_str(r#"<p><a href="/coaches/new">Add a coach</a></p>"#);
        body.push('\n');
    }

    body.push_str("<table>\n<thead><tr>");
    for (label, field) in [
        ("Name", SortField::Name),
        ("Seasons", SortField::Seasons),
        ("W", SortField::RegularSeasonWins),
        ("GP", SortField::TotalRegularSeasonGames),
        ("Win %", SortField::RegularWinPercent),
        ("Playoffs", SortField::PlayoffBerths),
        ("Playoff Win %", SortField::PlayoffWinPercent),
    ] {
        let _ = write!(
            body,
            "<th>{}</th>",
            sort_link(label, field, sort_field, sort_order)
        );
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    for coach in coaches {
        let _ = write!(
            body,
            r#"<tr><td><a href="/coaches/{id}">{name}</a>{active}</td><td>{seasons}</td><td>{wins}</td><td>{games}</td><td>{reg_pct}</td><td>{berths}</td><td>{po_pct}</td></tr>
"#,
            id = coach.id,
            name = encode_text(&coach.name),
            active = if coach.is_active { " (active)" } else { "" },
            seasons = coach.seasons,
            wins = coach.regular_season_wins,
            games = coach.total_regular_season_games,
            reg_pct = fmt_percent(coach.regular_win_percent),
            berths = coach.playoff_berths,
            po_pct = fmt_percent(coach.playoff_win_percent),
        );
    }
    body.push_str("</tbody>\n</table>");

    layout("Coaches", user, &body)
}

/// GET /coaches/:id detail view
#[must_use]
pub fn coach_show(coach: &Coach, user: Option<&AuthResult>) -> String {
    let mut body = format!("<h1>{}</h1>\n", encode_text(&coach.name));
    let _ = write!(
        body,
        r"<dl>
<dt>Status</dt><dd>{status}</dd>
<dt>Seasons</dt><dd>{seasons}</dd>
<dt>Regular season</dt><dd>{wins} wins in {games} games ({reg_pct}%)</dd>
<dt>Playoff berths</dt><dd>{berths}</dd>
<dt>Playoffs</dt><dd>{po_wins} wins in {po_games} games ({po_pct}%)</dd>
</dl>
",
        status = if coach.is_active { "Active" } else { "Retired" },
        seasons = coach.seasons,
        wins = coach.regular_season_wins,
        games = coach.total_regular_season_games,
        reg_pct = fmt_percent(coach.regular_win_percent),
        berths = coach.playoff_berths,
        po_wins = coach.playoff_wins,
        po_games = coach.playoff_games,
        po_pct = fmt_percent(coach.playoff_win_percent),
    );

    if user.is_some() {
        let _ = write!(
            body,
            r#"<p><a href="/coaches/{id}/edit">Edit</a></p>
<form method="post" action="/coaches/{id}?_method=DELETE">
<button type="submit">Delete</button>
</form>
"#,
            id = coach.id,
        );
    }

    layout(&coach.name, user, &body)
}

fn coach_fields(coach: Option<&Coach>) -> String {
    let name = coach.map(|c| c.name.as_str()).unwrap_or_default();
    let checked = if coach.is_some_and(|c| c.is_active) {
        " checked"
    } else {
        ""
    };
    let num = |f: fn(&Coach) -> i64| coach.map(f).unwrap_or_default().to_string();
    format!(
        r#"<label>Name <input type="text" name="name" value="{name}" required></label>
<label>Active <input type="checkbox" name="isActive"{checked}></label>
<label>Seasons <input type="number" name="seasons" value="{seasons}"></label>
<label>Regular season wins <input type="number" name="regularSeasonWins" value="{wins}"></label>
<label>Regular season games <input type="number" name="totalRegularSeasonGames" value="{games}"></label>
<label>Playoff berths <input type="number" name="playoffBerths" value="{berths}"></label>
<label>Playoff wins <input type="number" name="playoffWins" value="{po_wins}"></label>
<label>Playoff games <input type="number" name="playoffGames" value="{po_games}"></label>"#,
        name = encode_double_quoted_attribute(name),
        seasons = num(|c| c.seasons),
        wins = num(|c| c.regular_season_wins),
        games = num(|c| c.total_regular_season_games),
        berths = num(|c| c.playoff_berths),
        po_wins = num(|c| c.playoff_wins),
        po_games = num(|c| c.playoff_games),
    )
}

/// GET /coaches/new form
#[must_use]
pub fn coach_form_new(user: Option<&AuthResult>) -> String {
    let body = format!(
        r#"<h1>New coach</h1>
<form method="post" action="/coaches">
{}
<button type="submit">Create</button>
</form>"#,
        coach_fields(None)
    );
    layout("New coach", user, &body)
}

/// GET /coaches/:id/edit form, pre-filled
#[must_use]
pub fn coach_form_edit(coach: &Coach, user: Option<&AuthResult>) -> String {
    let body = format!(
        r#"<h1>Edit {name}</h1>
<form method="post" action="/coaches/{id}?_method=PUT">
{fields}
<button type="submit">Save</button>
</form>"#,
        name = encode_text(&coach.name),
        id = coach.id,
        fields = coach_fields(Some(coach)),
    );
    layout("Edit coach", user, &body)
}

/// GET /auth/sign-up form
#[must_use]
pub fn sign_up_page() -> String {
    let body = r#"<h1>Sign up</h1>
<form method="post" action="/auth/sign-up">
<label>Email <input type="email" name="email" required></label>
<label>Display name <input type="text" name="displayName"></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Sign up</button>
</form>"#;
    layout("Sign up", None, body)
}

/// GET /auth/sign-in form
#[must_use]
pub fn sign_in_page() -> String {
    let body = r#"<h1>Sign in</h1>
<form method="post" action="/auth/sign-in">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Sign in</button>
</form>"#;
    layout("Sign in", None, body)
}

/// Error page used by the `AppError` responder
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<h1>{code} {reason}</h1>
<p>{message}</p>
<p><a href="/coaches">Back to the coaches</a></p>"#,
        code = status.as_u16(),
        reason = encode_text(reason),
        message = encode_text(message),
    );
    layout(reason, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_percent_renders_two_decimals_or_dash() {
        assert_eq!(fmt_percent(Some(50.0)), "50.00");
        assert_eq!(fmt_percent(Some(33.33)), "33.33");
        assert_eq!(fmt_percent(Some(0.0)), "0.00");
        assert_eq!(fmt_percent(None), "\u{2014}");
    }

    #[test]
    fn layout_escapes_title() {
        let page = layout("<script>", None, "body");
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script> | Courtside"));
    }

    #[test]
    fn error_page_escapes_message() {
        let page = error_page(StatusCode::NOT_FOUND, "no <coach> here");
        assert!(page.contains("404 Not Found"));
        assert!(page.contains("no &lt;coach&gt; here"));
    }
}
