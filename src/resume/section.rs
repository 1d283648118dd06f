/// Returns the body lines of the level-2 section titled `title`, or `None`
/// when the heading is absent.
///
/// The body starts after the heading line and stops at the next heading of
/// level 1 or 2, a `---` rule, or the end of the document.
pub(crate) fn section_lines<'a>(lines: &[&'a str], title: &str) -> Option<Vec<&'a str>> {
    let start = lines
        .iter()
        .position(|line| heading_level(line) == Some(2) && heading_text(line) == title)?;

    let body = lines[start + 1..]
        .iter()
        .take_while(|line| !ends_section(line))
        .copied()
        .collect();
    Some(body)
}

/// First section found among `titles`, in order.
pub(crate) fn first_section_lines<'a>(lines: &[&'a str], titles: &[&str]) -> Option<Vec<&'a str>> {
    titles
        .iter()
        .find_map(|title| section_lines(lines, title))
}

pub(crate) fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_end();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    match trimmed[level..].chars().next() {
        None | Some(' ') | Some('\t') => Some(level),
        Some(_) => None,
    }
}

fn heading_text(line: &str) -> &str {
    line.trim_end().trim_start_matches('#').trim()
}

fn ends_section(line: &str) -> bool {
    if line.trim() == "---" {
        return true;
    }
    matches!(heading_level(line), Some(level) if level <= 2)
}
