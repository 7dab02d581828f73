//! Office Mix embed size corrections.

/// Literal attribute rewrites applied, in order, to Office Mix fragments.
/// The endpoint's default player sizes are too small for inline use.
const UPSIZE: [(&str, &str); 4] = [
    (r#"width="348""#, r#"width="480""#),
    (r#"height="245""#, r#"height="320""#),
    (r#"height="310""#, r#"height="410""#),
    (r#"height="267""#, r#"height="350""#),
];

pub(crate) fn upsize(html: String) -> String {
    UPSIZE
        .iter()
        .fold(html, |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsizes_known_dimensions_only() {
        let html = r#"<iframe src="https://mix.office.com/embed/x" width="348" height="245" frameborder="0"></iframe>"#;
        assert_eq!(
            upsize(html.to_string()),
            r#"<iframe src="https://mix.office.com/embed/x" width="480" height="320" frameborder="0"></iframe>"#
        );
    }

    #[test]
    fn other_heights() {
        assert_eq!(upsize(r#"height="310""#.into()), r#"height="410""#);
        assert_eq!(upsize(r#"height="267""#.into()), r#"height="350""#);
    }

    #[test]
    fn leaves_unknown_sizes_alone() {
        let html = r#"<iframe width="640" height="360" data-w="348"></iframe>"#;
        assert_eq!(upsize(html.to_string()), html);
    }
}
