//! Alphabetical sorting of option subsections.
//!
//! Inside an `## Options` section, the `###` subsections document individual
//! options and read best alphabetized. Template authors append new options
//! wherever is convenient; this pass puts them in order so hand-curation is
//! never required. Any preamble between the `## Options` heading and the
//! first `###` subsection stays where it is.

/// Sort the `###` subsections of every `## Options` section alphabetically.
pub fn sort(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        out.push(line.to_string());
        i += 1;

        if is_options_heading(line) {
            // Consume the section body up to the next ## heading (or EOF).
            let section_end = lines[i..]
                .iter()
                .position(|l| l.starts_with("## "))
                .map(|p| i + p)
                .unwrap_or(lines.len());

            let (preamble, subsections) = split_subsections(&lines[i..section_end]);
            out.extend(preamble.iter().map(|l| l.to_string()));

            let mut sorted = subsections;
            sorted.sort_by_key(|s| subsection_key(s));
            for sub in sorted {
                out.extend(sub.iter().map(|l| l.to_string()));
            }
            i = section_end;
        }
    }

    let mut result = out.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    result
}

fn is_options_heading(line: &str) -> bool {
    line.trim_end() == "## Options"
}

/// Split section body lines into (preamble, subsections), where each
/// subsection starts at a `### ` heading.
fn split_subsections<'a>(lines: &[&'a str]) -> (Vec<&'a str>, Vec<Vec<&'a str>>) {
    let mut preamble = Vec::new();
    let mut subsections: Vec<Vec<&str>> = Vec::new();

    for &line in lines {
        if line.starts_with("### ") {
            subsections.push(vec![line]);
        } else if let Some(current) = subsections.last_mut() {
            current.push(line);
        } else {
            preamble.push(line);
        }
    }
    (preamble, subsections)
}

/// Sort key: the heading text, lowercased, with formatting stripped.
fn subsection_key(subsection: &[&str]) -> String {
    subsection
        .first()
        .map(|h| {
            h.trim_start_matches('#')
                .trim()
                .replace('`', "")
                .to_lowercase()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsections_sorted_alphabetically() {
        let doc = "## Options\n\n### zeta\n\nz\n\n### alpha\n\na\n";
        let out = sort(doc);
        let alpha = out.find("### alpha").unwrap();
        let zeta = out.find("### zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn preamble_stays_first() {
        let doc = "## Options\n\nIntro paragraph.\n\n### beta\n\nb\n\n### alpha\n\na\n";
        let out = sort(doc);
        let intro = out.find("Intro paragraph.").unwrap();
        let alpha = out.find("### alpha").unwrap();
        assert!(intro < alpha);
    }

    #[test]
    fn sorting_stops_at_next_section() {
        let doc = "## Options\n\n### b\n\n### a\n\n## Examples\n\n### z\n\n### y\n";
        let out = sort(doc);
        // Options sorted
        assert!(out.find("### a").unwrap() < out.find("### b").unwrap());
        // Examples untouched
        assert!(out.find("### z").unwrap() < out.find("### y").unwrap());
    }

    #[test]
    fn backticked_names_compare_by_text() {
        let doc = "## Options\n\n### `b_opt`\n\n### `a_opt`\n";
        let out = sort(doc);
        assert!(out.find("`a_opt`").unwrap() < out.find("`b_opt`").unwrap());
    }

    #[test]
    fn no_options_section_is_noop() {
        let doc = "# Title\n\n## Usage\n\n### z\n\n### a\n";
        assert_eq!(sort(doc), doc);
    }

    #[test]
    fn already_sorted_is_noop() {
        let doc = "## Options\n\n### alpha\n\na\n\n### beta\n\nb\n";
        assert_eq!(sort(doc), doc);
    }

    #[test]
    fn trailing_newline_preserved() {
        let doc = "## Options\n\n### b\n\n### a\n";
        assert!(sort(doc).ends_with('\n'));
    }
}
