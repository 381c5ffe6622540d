/// How a statement segment joins the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOp {
    /// First segment of the line.
    Initial,
    /// `;`: always runs.
    Sequence,
    /// `&&`: runs only if the previous status was 0.
    AndThen,
    /// `||`: runs only if the previous status was nonzero.
    OrElse,
}

/// Split a raw line at top-level `;`, `&&`, `||` into (segment, join)
/// pairs. "Top-level" means outside quotes and not backslash-escaped, so
/// `echo "a; b"` stays one segment. Blank segments are dropped.
pub fn split_statements(line: &str) -> Vec<(String, JoinOp)> {
    let chars: Vec<char> = line.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut pending_op = JoinOp::Initial;
    let mut in_single = false;
    let mut in_double = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if in_single {
            current.push(ch);
            if ch == '\'' {
                in_single = false;
            }
            i += 1;
            continue;
        }
        if in_double {
            if ch == '\\' && i + 1 < chars.len() {
                current.push(ch);
                current.push(chars[i + 1]);
                i += 2;
                continue;
            }
            current.push(ch);
            if ch == '"' {
                in_double = false;
            }
            i += 1;
            continue;
        }
        match ch {
            '\\' => {
                current.push(ch);
                if i + 1 < chars.len() {
                    current.push(chars[i + 1]);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            '\'' => {
                in_single = true;
                current.push(ch);
                i += 1;
            }
            '"' => {
                in_double = true;
                current.push(ch);
                i += 1;
            }
            ';' => {
                push_segment(&mut segments, &mut current, pending_op);
                pending_op = JoinOp::Sequence;
                i += 1;
            }
            '&' if chars.get(i + 1) == Some(&'&') => {
                push_segment(&mut segments, &mut current, pending_op);
                pending_op = JoinOp::AndThen;
                i += 2;
            }
            '|' if chars.get(i + 1) == Some(&'|') => {
                push_segment(&mut segments, &mut current, pending_op);
                pending_op = JoinOp::OrElse;
                i += 2;
            }
            c => {
                current.push(c);
                i += 1;
            }
        }
    }

    push_segment(&mut segments, &mut current, pending_op);
    segments
}

fn push_segment(segments: &mut Vec<(String, JoinOp)>, current: &mut String, op: JoinOp) {
    let segment = std::mem::take(current);
    if !segment.trim().is_empty() {
        segments.push((segment, op));
    }
}
