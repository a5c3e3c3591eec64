pub const DEFAULT_FILE_NAME: &str = "downloaded_file";

/// A fetched file ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Extracts the file name from a `Content-Disposition` header value.
///
/// Takes the first `filename` parameter (including `filename*`), accepts
/// quoted and bare values and strips any quote characters.
pub fn file_name_from_disposition(header: &str) -> Option<String> {
    let start = header.find("filename")?;
    let rest = &header[start + "filename".len()..];
    let eq = rest.find(|c: char| c == '=' || c == ';' || c == '\n')?;
    if !rest[eq..].starts_with('=') {
        return None;
    }
    let value = rest[eq + 1..].trim_start();
    let raw = match value.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &value[1..];
            match inner.find(quote) {
                Some(end) => &inner[..end],
                None => inner.split([';', '\n']).next().unwrap_or_default(),
            }
        }
        _ => value.split([';', '\n']).next().unwrap_or_default(),
    };
    let name: String = raw.chars().filter(|c| *c != '"' && *c != '\'').collect();
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_file_name() {
        assert_eq!(
            file_name_from_disposition(r#"attachment; filename="users.csv""#).as_deref(),
            Some("users.csv")
        );
    }

    #[test]
    fn bare_file_name_stops_at_separator() {
        assert_eq!(
            file_name_from_disposition("attachment; filename=report.xlsx; size=10").as_deref(),
            Some("report.xlsx")
        );
    }

    #[test]
    fn missing_file_name() {
        assert_eq!(file_name_from_disposition("attachment"), None);
        assert_eq!(file_name_from_disposition(r#"attachment; filename="""#), None);
    }
}
