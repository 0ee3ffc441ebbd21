// the collection of utility functions for bracket scanning used by the parser

/// find the first position of the given char at bracket depth zero
pub fn find_char_positions_outside_brackets(s: &str, c: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in s.char_indices() {
        if ch == '(' {
            depth += 1;
        } else if ch == ')' {
            depth = depth.saturating_sub(1);
        } else if ch == c && depth == 0 {
            return Some(i);
        }
    }
    None
}

/// find the position of the closing bracket matching the opening bracket at `bracket_start`
pub fn find_matching_bracket(input: &str, bracket_start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices().skip_while(|(i, _)| *i < bracket_start) {
        if c == '(' {
            depth += 1;
        } else if c == ')' {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// split the string on the given char at bracket depth zero (used for term-by-term
/// decomposition of a sum)
pub fn split_outside_brackets(s: &str, c: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in s.chars() {
        if ch == '(' {
            depth += 1;
        } else if ch == ')' {
            depth = depth.saturating_sub(1);
        }
        if ch == c && depth == 0 {
            parts.push(current.clone());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    parts.push(current);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_char_outside_brackets() {
        assert_eq!(find_char_positions_outside_brackets("x+(a+b)", '+'), Some(1));
        assert_eq!(find_char_positions_outside_brackets("(a+b)", '+'), None);
        assert_eq!(find_char_positions_outside_brackets("sin(x)^2", '^'), Some(6));
    }

    #[test]
    fn test_find_matching_bracket() {
        assert_eq!(find_matching_bracket("(a+(b))", 0), Some(6));
        assert_eq!(find_matching_bracket("sin(x)", 3), Some(5));
        assert_eq!(find_matching_bracket("(a+b", 0), None);
    }

    #[test]
    fn test_split_outside_brackets() {
        let parts = split_outside_brackets("x^2+sin(a+b)+1", '+');
        assert_eq!(parts, vec!["x^2", "sin(a+b)", "1"]);
    }
}
