use serde::Serialize;
use std::io::Write;

/// Marks the one structured line among whatever else the tests print.
pub const SENTINEL: char = '\u{10}';

/// Writes `document` as a single sentinel-prefixed JSON line and flushes.
pub fn write_sentinel_line<W, T>(out: &mut W, document: &T) -> crate::error::Result<()>
where
    W: Write,
    T: Serialize,
{
    let json = serde_json::to_string(document)?;
    writeln!(out, "{} {}", SENTINEL, json)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_starts_with_sentinel_and_space() {
        let mut out = Vec::new();
        write_sentinel_line(&mut out, &json!({ "suites": [], "tests": [] })).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\u{10} {\"suites\":[],\"tests\":[]}\n"
        );
    }
}
