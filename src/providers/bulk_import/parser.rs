/// Split delimited text into trimmed rows of cells
///
/// Lines are split on `\n` and whitespace-only lines are skipped. A `"`
/// toggles quoted mode and is dropped from the value; a `,` outside quoted
/// mode ends the cell. There is no escaped-quote handling, so `""` inside a
/// quoted cell simply toggles twice.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Vec<String> {
    let mut row = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                row.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    row.push(current.trim().to_string());

    row
}
