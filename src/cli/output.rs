use chrono::{DateTime, Duration, Local};
use colored::Colorize;
use serde_json::Value;

use crate::config::{missing_credentials_help, Settings};
use crate::error::AuthError;
use crate::oauth::AuthorizationReport;

const PREVIEW_EDGE: usize = 10;

/// Shorten a token to its first and last ten characters.
pub fn preview(token: &str) -> String {
    let len = token.chars().count();
    if len <= PREVIEW_EDGE * 2 {
        return token.to_string();
    }
    let head: String = token.chars().take(PREVIEW_EDGE).collect();
    let tail: String = token.chars().skip(len - PREVIEW_EDGE).collect();
    format!("{head}...{tail}")
}

/// Expiry value as printed in the summary: verbatim, or `None` when absent.
pub fn format_expiry_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn expires_at(obtained_at: DateTime<Local>, secs: Option<i64>) -> Option<DateTime<Local>> {
    obtained_at.checked_add_signed(Duration::try_seconds(secs?)?)
}

fn format_expiry_line(label: &str, obtained_at: DateTime<Local>, value: Option<&Value>) -> String {
    let mut line = format!(
        "{label} Expires In (seconds): {}",
        format_expiry_value(value)
    );
    if let Some(at) = expires_at(obtained_at, value.and_then(Value::as_i64)) {
        line.push_str(&format!(" (at {})", at.format("%Y-%m-%d %H:%M:%S %:z")));
    }
    line
}

/// Render the summary lines for a finished exchange.
pub fn summary_lines(report: &AuthorizationReport, is_tty: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let response = &report.exchange.response;

    match &report.persisted {
        Ok(path) => {
            let msg = format!("Successfully updated {} with new tokens.", path.display());
            lines.push(if is_tty { msg.green().to_string() } else { msg });
        }
        Err(e) => {
            let msg = format!("Error: {e}");
            lines.push(if is_tty { msg.red().to_string() } else { msg });
        }
    }

    if let Some((access, refresh)) = response.token_pair() {
        let rule = "---------------------";
        let title = "--- Token Summary ---";
        lines.push(if is_tty {
            title.bold().to_string()
        } else {
            title.to_string()
        });
        lines.push(format!("Access Token:   {}", preview(access)));
        lines.push(format!("Refresh Token:  {}", preview(refresh)));
        lines.push(rule.to_string());
    }

    lines.push(format_expiry_line(
        "Access Token",
        report.obtained_at,
        response.expires_in.as_ref(),
    ));
    lines.push(format_expiry_line(
        "Refresh Token",
        report.obtained_at,
        response.refresh_token_expires_in.as_ref(),
    ));
    lines
}

pub fn print_report(report: &AuthorizationReport, settings: &Settings, is_tty: bool) {
    if settings.show_response {
        println!("\nResponse containing the User access token and refresh token:");
        println!(
            "{}",
            serde_json::to_string_pretty(&report.exchange.raw).unwrap_or_default()
        );
    }
    println!();
    for line in summary_lines(report, is_tty) {
        println!("{line}");
    }
}

/// Report a fatal error on stdout, next to the rest of the run's output.
pub fn print_error(err: &AuthError, settings: &Settings) {
    println!("Error: {err}");
    if matches!(err, AuthError::ConfigurationMissing { .. }) {
        println!(
            "{}",
            missing_credentials_help(&settings.provider, &settings.env_file)
        );
    }
}

pub fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdout())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;

    use super::*;
    use crate::oauth::{TokenExchange, TokenResponse};

    fn report(
        access: Option<&str>,
        refresh: Option<&str>,
        persisted: Result<PathBuf, AuthError>,
    ) -> AuthorizationReport {
        AuthorizationReport {
            exchange: TokenExchange {
                response: TokenResponse {
                    access_token: access.map(Value::from),
                    refresh_token: refresh.map(Value::from),
                    expires_in: Some(Value::from(7200)),
                    refresh_token_expires_in: None,
                    token_type: None,
                },
                raw: serde_json::json!({}),
            },
            persisted,
            obtained_at: Local.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn preview_long_token() {
        let token = "a".repeat(28);
        assert_eq!(preview(&token), "aaaaaaaaaa...aaaaaaaaaa");
        assert_eq!(
            preview("0123456789abcdefghijKLMNOPQRSTUV"),
            "0123456789...MNOPQRSTUV"
        );
    }

    #[test]
    fn preview_short_token_in_full() {
        assert_eq!(preview("short"), "short");
        let twenty = "x".repeat(20);
        assert_eq!(preview(&twenty), twenty);
        assert_eq!(preview(&"y".repeat(21)), "yyyyyyyyyy...yyyyyyyyyy");
    }

    #[test]
    fn expiry_values_verbatim() {
        assert_eq!(format_expiry_value(Some(&Value::from(7200))), "7200");
        assert_eq!(format_expiry_value(Some(&Value::from("7200"))), "7200");
        assert_eq!(format_expiry_value(Some(&Value::from(7200.5))), "7200.5");
        assert_eq!(format_expiry_value(Some(&Value::Null)), "None");
        assert_eq!(format_expiry_value(None), "None");
    }

    #[test]
    fn expiry_line_skips_instant_for_non_integer() {
        let start = Local.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            format_expiry_line("Access Token", start, Some(&Value::from("7200"))),
            "Access Token Expires In (seconds): 7200"
        );
        assert!(format_expiry_line("Access Token", start, Some(&Value::from(60)))
            .starts_with("Access Token Expires In (seconds): 60 (at "));
    }

    #[test]
    fn expiry_instant() {
        let start = Local.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let at = expires_at(start, Some(7200)).unwrap();
        assert_eq!(at - start, Duration::hours(2));
        assert!(expires_at(start, None).is_none());
    }

    #[test]
    fn summary_for_persisted_tokens() {
        let access = "a".repeat(28);
        let refresh = "b".repeat(28);
        let lines = summary_lines(
            &report(Some(&access), Some(&refresh), Ok(PathBuf::from(".env"))),
            false,
        );
        assert_eq!(lines[0], "Successfully updated .env with new tokens.");
        assert!(lines.contains(&"Access Token:   aaaaaaaaaa...aaaaaaaaaa".to_string()));
        assert!(lines.contains(&"Refresh Token:  bbbbbbbbbb...bbbbbbbbbb".to_string()));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("Access Token Expires In (seconds): 7200 (at ")));
        assert_eq!(
            lines.last().unwrap(),
            "Refresh Token Expires In (seconds): None"
        );
    }

    #[test]
    fn summary_for_incomplete_response() {
        let lines = summary_lines(
            &report(
                Some("only-access"),
                None,
                Err(AuthError::IncompleteTokenResponse {
                    path: PathBuf::from(".env"),
                }),
            ),
            false,
        );
        assert_eq!(
            lines[0],
            "Error: Could not retrieve access_token or refresh_token. .env not updated."
        );
        assert!(!lines.iter().any(|l| l.contains("Token Summary")));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn summary_after_write_failure_still_shows_tokens() {
        let lines = summary_lines(
            &report(
                Some("acc"),
                Some("ref"),
                Err(AuthError::Persistence {
                    path: PathBuf::from("/ro/.env"),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                }),
            ),
            false,
        );
        assert_eq!(lines[0], "Error: Failed to update /ro/.env: denied");
        assert!(lines.contains(&"Access Token:   acc".to_string()));
    }
}
