/// Turns an arbitrary name into a single safe path component.
///
/// Only ASCII letters, digits, `.`, `_` and `-` survive, everything else
/// becomes `_`. Names that would still be empty or consist only of dots (`.`,
/// `..`) are replaced by `fallback`.
pub fn sanitize(name: &str, fallback: &str) -> String {
    let sanitized = name
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
            _ => '_',
        })
        .collect::<String>();

    if sanitized.chars().all(|c| c == '.') {
        fallback.to_owned()
    } else {
        sanitized
    }
}
