use crate::error::CarafeError;

/// Keyword standing for a carafe's stored link
pub const LINK_KEYWORD: &str = "link";

/// How the user asked for a program to be picked
#[derive(Debug, Clone, Copy, Default)]
pub struct Request<'a> {
    pub ask: bool,
    pub location: Option<&'a str>,
    pub link: Option<&'a str>,
}

/// Outcome of [`resolve`] before any filesystem or terminal access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Raw user path, still to be sanitized
    Location(&'a str),
    /// Stored link, already relative to `drive_c`
    Link(&'a str),
    /// Interactive input is required
    Prompt { include_link: bool },
}

/// A single answer to the executable prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Index(usize),
    Link,
}

/// Pick the program to start: `ask` first, then an explicit location, then the link
pub fn resolve<'a>(carafe: &str, request: Request<'a>) -> Result<Resolution<'a>, CarafeError> {
    if request.ask {
        return Ok(Resolution::Prompt { include_link: true });
    }
    if let Some(location) = request.location {
        return Ok(Resolution::Location(location));
    }
    match request.link {
        Some(link) => Ok(Resolution::Link(link)),
        None => Err(CarafeError::NoLink(carafe.to_string())),
    }
}

/// Parse one answer against `count` listed executables
///
/// `link` is only accepted when `link_offered` is set.
pub fn choose(answer: &str, count: usize, link_offered: bool) -> Option<Choice> {
    let answer = answer.trim();
    if link_offered && answer == LINK_KEYWORD {
        return Some(Choice::Link);
    }
    match answer.parse::<usize>() {
        Ok(index) if index < count => Some(Choice::Index(index)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_ask_wins_over_everything() {
        let request = Request {
            ask: true,
            location: Some("app.exe"),
            link: Some("game.exe"),
        };
        assert_eq!(
            resolve("games", request).unwrap(),
            Resolution::Prompt { include_link: true }
        );
    }

    #[test]
    fn test_location_wins_over_link() {
        let request = Request {
            location: Some("C:/app.exe"),
            link: Some("game.exe"),
            ..Request::default()
        };
        assert_eq!(
            resolve("games", request).unwrap(),
            Resolution::Location("C:/app.exe")
        );
    }

    #[test]
    fn test_falls_back_to_link() {
        let request = Request {
            link: Some("game.exe"),
            ..Request::default()
        };
        assert_eq!(resolve("games", request).unwrap(), Resolution::Link("game.exe"));
    }

    #[test]
    fn test_no_link_configured() {
        let err = resolve("games", Request::default()).unwrap_err();
        assert_eq!(err, CarafeError::NoLink("games".to_string()));
    }

    #[rstest]
    #[case("0", 3, false, Some(Choice::Index(0)))]
    #[case(" 2 ", 3, false, Some(Choice::Index(2)))]
    #[case("3", 3, false, None)]
    #[case("-1", 3, false, None)]
    #[case("first", 3, false, None)]
    #[case("", 3, true, None)]
    #[case("link", 3, true, Some(Choice::Link))]
    #[case("link", 3, false, None)]
    #[case("0", 0, true, None)]
    fn test_choose(
        #[case] answer: &str,
        #[case] count: usize,
        #[case] link_offered: bool,
        #[case] expected: Option<Choice>,
    ) {
        assert_eq!(choose(answer, count, link_offered), expected);
    }
}
