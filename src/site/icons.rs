//! The static icon catalog: name to inline SVG markup, fixed at compile
//! time.

const STAR: &str = include_str!("../../assets/svg/star.svg");
const PLAY: &str = include_str!("../../assets/svg/play.svg");
const CROSS: &str = include_str!("../../assets/svg/cross.svg");

/// Markup for an icon name, if the catalog has it.
pub fn markup(name: &str) -> Option<&'static str> {
    match name {
        "star" => Some(STAR),
        "play" => Some(PLAY),
        "cross" => Some(CROSS),
        _ => None,
    }
}

/// Every name the catalog answers to.
pub fn names() -> &'static [&'static str] {
    &["star", "play", "cross"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        for name in names() {
            let markup = markup(name).unwrap();
            assert!(markup.contains("<svg"));
        }
    }

    #[test]
    fn test_unknown_and_empty_names_miss() {
        assert!(markup("unknown").is_none());
        assert!(markup("").is_none());
        assert!(markup("Star").is_none());
    }
}
