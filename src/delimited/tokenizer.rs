/// Pick `;` when the header line has strictly more semicolons than commas
pub fn detect_delimiter(first_line: &str) -> char {
    let commas = first_line.matches(',').count();
    let semicolons = first_line.matches(';').count();
    if semicolons > commas {
        ';'
    } else {
        ','
    }
}

/// First line of `text`, without its `\n` / `\r\n` terminator
pub fn first_line(text: &str) -> &str {
    let line = text.split('\n').next().unwrap_or("");
    line.strip_suffix('\r').unwrap_or(line)
}

/// Split delimited text into rows of raw fields.
///
/// Double quotes toggle quoting anywhere in a field and `""` inside a quoted
/// section is a literal quote. Carriage returns outside quotes are dropped.
/// Fields are not trimmed.
pub fn tokenize(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\r' => {}
            c if c == delimiter => row.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }

    // Input without a trailing newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
