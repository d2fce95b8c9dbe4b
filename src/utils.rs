use std::ffi::OsStr;

/// Format a byte count with decimal (1000-based) units, keeping at most three digits
pub fn format_bytes(bytes: u64) -> String {
    const SUFFIXES: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

    if bytes == 0 {
        return "0".to_string();
    }

    let mut magnitude = 0;
    let mut whole = bytes;
    while whole >= 1000 && magnitude < SUFFIXES.len() - 1 {
        whole /= 1000;
        magnitude += 1;
    }
    let scaled = bytes as f64 / 1000f64.powi(magnitude as i32);
    let digits = if scaled < 10.0 {
        three_chars(&format!("{:.2}", scaled))
    } else if scaled < 100.0 {
        three_chars(&format!("{:.1}", scaled))
    } else {
        format!("{:.0}", scaled)
    };
    format!("{} {}", digits, SUFFIXES[magnitude])
}

/// Keep the first three characters of a formatted number, dropping a dangling '.'
fn three_chars(number: &str) -> String {
    let mut kept: String = number.chars().take(3).collect();
    if kept.ends_with('.') {
        kept.pop();
    }
    kept
}

/// Quote a string for the shell (wrap in double quotes if needed)
pub fn shell_quote(s: &str) -> String {
    let needs_quoting = s.is_empty()
        || s.chars().any(|c| {
            c.is_whitespace()
                || matches!(
                    c,
                    '"' | '\'' | '\\' | '$' | '`' | '!' | '*' | '?' | '[' | ']' | '(' | ')'
                        | '{' | '}' | '|' | '&' | ';' | '<' | '>' | '#' | '~'
                )
        });

    if !needs_quoting {
        return s.to_string();
    }
    double_quote(s)
}

fn double_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Quote a file name for the shell without losing bytes that are not UTF-8
pub fn shell_quote_os(name: &OsStr) -> String {
    match name.to_str() {
        Some(name) => shell_quote(name),
        None => quote_raw_bytes(name),
    }
}

/// Valid text is double-quoted; other bytes are produced by `printf` octal escapes
#[cfg(unix)]
fn quote_raw_bytes(name: &OsStr) -> String {
    use std::fmt::Write;
    use std::os::unix::ffi::OsStrExt;

    let mut quoted = String::new();
    for chunk in name.as_bytes().utf8_chunks() {
        if !chunk.valid().is_empty() {
            quoted.push_str(&double_quote(chunk.valid()));
        }
        if !chunk.invalid().is_empty() {
            quoted.push_str("\"$(printf '");
            for byte in chunk.invalid() {
                let _ = write!(quoted, "\\{:03o}", byte);
            }
            quoted.push_str("')\"");
        }
    }
    quoted
}

#[cfg(not(unix))]
fn quote_raw_bytes(name: &OsStr) -> String {
    shell_quote(&name.to_string_lossy())
}

/// Truncate a name to `max_width` characters, marking the cut with '+'
pub fn truncate_name(name: &str, max_width: usize) -> String {
    if name.chars().count() <= max_width {
        return name.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut result: String = name.chars().take(max_width - 1).collect();
    result.push('+');
    result
}
