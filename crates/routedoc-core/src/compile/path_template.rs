//! Framework-style (`/pets/:id`) to Swagger-style (`/pets/{id}`) path templates.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece<'a> {
    Literal(&'a str),
    Param(&'a str),
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Split a path into literal runs and parameter names.
///
/// A parameter is `:` followed by at least one word character. A `?` modifier
/// or a parenthesised pattern directly after the name belongs to the
/// parameter and is dropped.
fn scan(path: &str) -> Vec<Piece<'_>> {
    let bytes = path.as_bytes();
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b':' || !bytes.get(i + 1).is_some_and(|c| is_name_char(*c)) {
            i += 1;
            continue;
        }
        if literal_start < i {
            pieces.push(Piece::Literal(&path[literal_start..i]));
        }
        let name_start = i + 1;
        let mut end = name_start;
        while end < bytes.len() && is_name_char(bytes[end]) {
            end += 1;
        }
        pieces.push(Piece::Param(&path[name_start..end]));

        let mut seen_pattern = false;
        let mut seen_modifier = false;
        loop {
            match bytes.get(end) {
                Some(b'(') if !seen_pattern => {
                    end = skip_group(bytes, end);
                    seen_pattern = true;
                }
                Some(b'?') if !seen_modifier => {
                    end += 1;
                    seen_modifier = true;
                }
                _ => break,
            }
        }
        i = end;
        literal_start = end;
    }
    if literal_start < bytes.len() {
        pieces.push(Piece::Literal(&path[literal_start..]));
    }
    pieces
}

/// Index just past the group opened at `open`, honouring nesting and escapes.
fn skip_group(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// Names of the placeholders in `path`, in order of appearance.
pub fn placeholders(path: &str) -> Vec<String> {
    scan(path)
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Param(name) => Some(name.to_string()),
            Piece::Literal(_) => None,
        })
        .collect()
}

/// Rewrite every `:name` placeholder as `{name}`.
pub fn to_openapi(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    for piece in scan(path) {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Param(name) => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
    }
    out
}
