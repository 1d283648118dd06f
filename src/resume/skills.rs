use crate::content::SkillCategory;

/// One category per line starting with a bold label, e.g.
/// `**Programming:** Python (NumPy, Pandas), SQL`.
pub(crate) fn parse_skill_categories(lines: &[&str]) -> Vec<SkillCategory> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| line.starts_with("**"))
        .filter_map(|line| {
            let (label, rest) = line.split_once(':')?;
            let category = label.replace('*', "").trim().to_owned();
            if category.is_empty() {
                return None;
            }
            let skills = split_top_level(rest)
                .into_iter()
                .map(|token| token.trim_matches(|c: char| c == '*' || c.is_whitespace()))
                .filter(|token| !token.is_empty())
                .map(str::to_owned)
                .collect();
            Some(SkillCategory { category, skills })
        })
        .collect()
}

/// Flattened skill list across categories, capped at `limit`.
pub(crate) fn flatten_skills(categories: &[SkillCategory], limit: usize) -> Vec<String> {
    categories
        .iter()
        .flat_map(|category| category.skills.iter().cloned())
        .take(limit)
        .collect()
}

/// Splits on commas outside parentheses so `Python (NumPy, Pandas)` stays whole.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                tokens.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    tokens.push(&text[start..]);
    tokens
}
