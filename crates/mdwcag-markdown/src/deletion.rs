//! `--text--` deletion markup
//!
//! Shortest match on a single line; the enclosed text may be empty.

const MARKER: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Deleted(&'a str),
}

/// Split `text` into plain runs and deleted runs, in order
pub(crate) fn split(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut search = 0;

    while let Some(found) = text[search..].find(MARKER) {
        let open = search + found;
        let inner_start = open + MARKER.len();
        let line_end = text[inner_start..]
            .find('\n')
            .map_or(text.len(), |n| inner_start + n);

        match text[inner_start..line_end].find(MARKER) {
            Some(len) => {
                let close = inner_start + len;
                if open > plain_start {
                    segments.push(Segment::Text(&text[plain_start..open]));
                }
                segments.push(Segment::Deleted(&text[inner_start..close]));
                plain_start = close + MARKER.len();
                search = plain_start;
            }
            // no closing marker on this line; retry one character later
            None => search = open + 1,
        }
    }

    if plain_start < text.len() {
        segments.push(Segment::Text(&text[plain_start..]));
    }
    segments
}
