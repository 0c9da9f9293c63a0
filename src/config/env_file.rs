use std::path::{Path, PathBuf};

/// Set keys in a dotenv-style file in one read-modify-write pass, creating
/// the file if needed.
///
/// The first `KEY=` (or `export KEY=`) line is rewritten in place, later
/// duplicates of the same key are dropped, keys not yet present are appended.
/// All other lines are kept as they were.
pub fn set_keys(path: &Path, entries: &[(&str, &str)]) -> std::io::Result<()> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    let updated = apply_entries(&content, entries);
    write_replacing(path, &updated)?;
    tracing::debug!("Updated {} key(s) in {}", entries.len(), path.display());
    Ok(())
}

fn apply_entries(content: &str, entries: &[(&str, &str)]) -> String {
    let mut written = vec![false; entries.len()];
    let mut lines: Vec<String> = Vec::new();

    for line in content.lines() {
        let matched =
            line_key(line).and_then(|k| entries.iter().position(|(key, _)| *key == k));
        match matched {
            Some(idx) if written[idx] => {}
            Some(idx) => {
                let (key, value) = entries[idx];
                let prefix = if line.trim_start().starts_with("export ") {
                    "export "
                } else {
                    ""
                };
                lines.push(format!("{prefix}{key}={}", quote_value(value)));
                written[idx] = true;
            }
            None => lines.push(line.to_string()),
        }
    }

    for (idx, (key, value)) in entries.iter().enumerate() {
        if !written[idx] {
            lines.push(format!("{key}={}", quote_value(value)));
        }
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Key assigned on this line, ignoring comments and blank lines.
fn line_key(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, _) = trimmed.split_once('=')?;
    Some(key.trim())
}

/// Single quotes keep the value literal; fall back to escaped double quotes
/// when the value itself contains a single quote.
fn quote_value(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '$') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

fn write_replacing(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = temp_path(path);
    std::fs::write(&tmp, content)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".env".into());
    path.with_file_name(format!("{name}.tmp"))
}
