//! Line commands typed at the advisor prompt.

use shared::domain::{CourseCode, CreditsTarget, Track};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickTarget {
    Code(CourseCode),
    /// 1-based position in the suggestion dropdown.
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Type(String),
    Pick(PickTarget),
    Remove(CourseCode),
    Track(Option<Track>),
    Credits(CreditsTarget),
    Submit,
    Show,
    Feedback { helpful: bool, comment: Option<String> },
    Comment(String),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  type <text>          search courses (typeahead; empty clears)
  pick <code|n>        add a course, by code or dropdown position
  remove <code>        remove a completed course
  track <name|none>    pre-med, pre-law, pre-grad, pre-mba
  credits <12-21>      target credit load
  submit               request recommendations
  show                 print the current form and result
  feedback up|down     rate the current recommendations
  comment <text>       explain a thumbs-down
  help | quit";

pub fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim_start();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line.trim_end(), ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "type" | "t" => Ok(ReplCommand::Type(rest.to_string())),
        "pick" | "p" => {
            if rest.is_empty() {
                return Err("usage: pick <code|n>".into());
            }
            match rest.parse::<usize>() {
                Ok(0) => Err("dropdown positions start at 1".into()),
                Ok(index) => Ok(ReplCommand::Pick(PickTarget::Index(index))),
                Err(_) => Ok(ReplCommand::Pick(PickTarget::Code(CourseCode::from(rest)))),
            }
        }
        "remove" | "rm" => {
            if rest.is_empty() {
                Err("usage: remove <code>".into())
            } else {
                Ok(ReplCommand::Remove(CourseCode::from(rest)))
            }
        }
        "track" => {
            if rest.is_empty() || rest.eq_ignore_ascii_case("none") {
                Ok(ReplCommand::Track(None))
            } else {
                rest.parse::<Track>()
                    .map(|track| ReplCommand::Track(Some(track)))
                    .map_err(|err| err.to_string())
            }
        }
        "credits" => rest
            .parse::<CreditsTarget>()
            .map(ReplCommand::Credits)
            .map_err(|err| err.to_string()),
        "submit" | "s" => Ok(ReplCommand::Submit),
        "show" => Ok(ReplCommand::Show),
        "feedback" | "fb" => {
            let (rating, comment) = match rest.split_once(char::is_whitespace) {
                Some((rating, comment)) => (rating, Some(comment.trim().to_string())),
                None => (rest, None),
            };
            let helpful = match rating.to_ascii_lowercase().as_str() {
                "up" | "+" => true,
                "down" | "-" => false,
                _ => return Err("usage: feedback up|down [comment]".into()),
            };
            Ok(ReplCommand::Feedback {
                helpful,
                comment: comment.filter(|c| !c.is_empty()),
            })
        }
        "comment" => Ok(ReplCommand::Comment(rest.to_string())),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("unknown command '{other}'; type 'help'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_keeps_inner_spacing_and_allows_empty() {
        assert_eq!(
            parse_command("type  intro to chem"),
            Ok(ReplCommand::Type("intro to chem".into()))
        );
        assert_eq!(parse_command("type"), Ok(ReplCommand::Type(String::new())));
    }

    #[test]
    fn pick_accepts_code_or_position() {
        assert_eq!(
            parse_command("pick CHEM121"),
            Ok(ReplCommand::Pick(PickTarget::Code(CourseCode::from("CHEM121"))))
        );
        assert_eq!(
            parse_command("p 2"),
            Ok(ReplCommand::Pick(PickTarget::Index(2)))
        );
        assert!(parse_command("pick 0").is_err());
        assert!(parse_command("pick").is_err());
    }

    #[test]
    fn track_and_credits_are_validated() {
        assert_eq!(
            parse_command("track pre-law"),
            Ok(ReplCommand::Track(Some(Track::PreLaw)))
        );
        assert_eq!(parse_command("track none"), Ok(ReplCommand::Track(None)));
        assert!(parse_command("track pre-dental").is_err());
        assert!(parse_command("credits 25").is_err());
        assert_eq!(
            parse_command("credits 18"),
            Ok(ReplCommand::Credits(CreditsTarget::new(18).expect("credits")))
        );
    }

    #[test]
    fn feedback_parses_rating_and_optional_comment() {
        assert_eq!(
            parse_command("feedback down too many labs"),
            Ok(ReplCommand::Feedback {
                helpful: false,
                comment: Some("too many labs".into()),
            })
        );
        assert_eq!(
            parse_command("fb up"),
            Ok(ReplCommand::Feedback {
                helpful: true,
                comment: None,
            })
        );
        assert!(parse_command("feedback maybe").is_err());
    }

    #[test]
    fn unknown_verbs_are_reported() {
        let err = parse_command("enroll CHEM121").expect_err("unknown");
        assert!(err.contains("enroll"));
        assert_eq!(parse_command("QUIT"), Ok(ReplCommand::Quit));
    }
}
