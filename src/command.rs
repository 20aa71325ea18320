use url::Url;

use crate::keys::KeyKind;
use crate::youtube::videos::{Period, SortOrder};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the channel A query (and run the search when given with `search`).
    ChannelA(String),
    /// Set the channel B (comparison) query.
    ChannelB(String),
    /// Run the search; optionally setting the channel A query first.
    Search(Option<String>),
    Compare(bool),
    UseAi(bool),
    SetKey(KeyKind, String),
    DeleteKey(KeyKind),
    Sort(SortOrder),
    SetPeriod(Period),
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.strip_prefix(':').unwrap_or(input).trim();

    if input.is_empty() {
        return None;
    }

    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    };

    match cmd {
        "a" if !args.is_empty() => Some(Command::ChannelA(args.to_owned())),
        "b" if !args.is_empty() => Some(Command::ChannelB(args.to_owned())),
        "search" | "s" => {
            let query = (!args.is_empty()).then(|| args.to_owned());
            Some(Command::Search(query))
        }
        "compare" => parse_on_off(args).map(Command::Compare),
        "ai" => parse_on_off(args).map(Command::UseAi),
        "key" => parse_key_command(args),
        "sort" => match args {
            "date" => Some(Command::Sort(SortOrder::Date)),
            "views" | "viewcount" => Some(Command::Sort(SortOrder::ViewCount)),
            _ => None,
        },
        "period" => match args {
            "all" => Some(Command::SetPeriod(Period::All)),
            "7d" => Some(Command::SetPeriod(Period::Days7)),
            "30d" => Some(Command::SetPeriod(Period::Days30)),
            "90d" => Some(Command::SetPeriod(Period::Days90)),
            _ => None,
        },
        "help" | "h" => Some(Command::Help),
        "quit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

fn parse_on_off(args: &str) -> Option<bool> {
    match args {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

/// `key youtube <key>` / `key gemini <key>` / `key delete youtube|gemini`
fn parse_key_command(args: &str) -> Option<Command> {
    let (target, rest) = match args.split_once(char::is_whitespace) {
        Some((target, rest)) => (target, rest.trim()),
        None => (args, ""),
    };

    match target {
        "youtube" if !rest.is_empty() => Some(Command::SetKey(KeyKind::YouTube, rest.to_owned())),
        "gemini" if !rest.is_empty() => Some(Command::SetKey(KeyKind::Gemini, rest.to_owned())),
        "delete" => match rest {
            "youtube" => Some(Command::DeleteKey(KeyKind::YouTube)),
            "gemini" => Some(Command::DeleteKey(KeyKind::Gemini)),
            _ => None,
        },
        _ => None,
    }
}

/// Extract a video ID from a raw ID or a watch/short-link URL.
pub fn parse_video_id(input: &str) -> Option<String> {
    let trimmed = input.trim();

    // Raw video IDs are 11 URL-safe base64 characters.
    if trimmed.len() == 11
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Some(trimmed.to_owned());
    }

    let url = Url::parse(trimmed).ok()?;
    let host = url.host_str()?;

    if host == "youtu.be" {
        let id = url.path_segments()?.next()?;
        return (!id.is_empty()).then(|| id.to_owned());
    }

    if host != "youtube.com" && !host.ends_with(".youtube.com") {
        return None;
    }

    // watch?v=<id>
    if let Some((_, id)) = url.query_pairs().find(|(name, _)| name == "v") {
        return (!id.is_empty()).then(|| id.into_owned());
    }

    // /shorts/<id> or /embed/<id>
    let segments: Vec<&str> = url.path_segments()?.collect();
    if segments.len() >= 2 && matches!(segments[0], "shorts" | "embed") {
        let id = segments[1];
        return (!id.is_empty()).then(|| id.to_owned());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_channels() {
        assert_eq!(
            parse_command(":a @googledevelopers"),
            Some(Command::ChannelA("@googledevelopers".into()))
        );
        assert_eq!(
            parse_command("b UC_x5XG1OV2P6uZZ5FSM9Ttw"),
            Some(Command::ChannelB("UC_x5XG1OV2P6uZZ5FSM9Ttw".into()))
        );
    }

    #[test]
    fn test_parse_command_search() {
        assert_eq!(parse_command(":search"), Some(Command::Search(None)));
        assert_eq!(
            parse_command(":search @handle"),
            Some(Command::Search(Some("@handle".into())))
        );
        assert_eq!(parse_command(":s"), Some(Command::Search(None)));
    }

    #[test]
    fn test_parse_command_toggles() {
        assert_eq!(parse_command(":compare on"), Some(Command::Compare(true)));
        assert_eq!(parse_command(":ai off"), Some(Command::UseAi(false)));
        assert_eq!(parse_command(":compare maybe"), None);
    }

    #[test]
    fn test_parse_command_keys() {
        assert_eq!(
            parse_command(":key youtube AIza123"),
            Some(Command::SetKey(KeyKind::YouTube, "AIza123".into()))
        );
        assert_eq!(
            parse_command(":key delete gemini"),
            Some(Command::DeleteKey(KeyKind::Gemini))
        );
        assert_eq!(parse_command(":key youtube"), None);
    }

    #[test]
    fn test_parse_command_sort_period() {
        assert_eq!(
            parse_command(":sort views"),
            Some(Command::Sort(SortOrder::ViewCount))
        );
        assert_eq!(
            parse_command(":period 30d"),
            Some(Command::SetPeriod(Period::Days30))
        );
        assert_eq!(parse_command(":period yesterday"), None);
    }

    #[test]
    fn test_parse_command_empty() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command(":"), None);
    }

    #[test]
    fn test_parse_video_id_raw() {
        assert_eq!(parse_video_id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".into()));
        assert_eq!(parse_video_id("short"), None);
    }

    #[test]
    fn test_parse_video_id_watch_url() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
            Some("dQw4w9WgXcQ".into())
        );
    }

    #[test]
    fn test_parse_video_id_short_link() {
        assert_eq!(
            parse_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".into())
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".into())
        );
    }

    #[test]
    fn test_parse_video_id_invalid() {
        assert_eq!(parse_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(parse_video_id("not a url"), None);
    }
}
