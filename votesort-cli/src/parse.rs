/// Parsing for item catalogs and voting commands.
use votesort_core::{Item, Vote};

use crate::bail;

/// Parse a catalog as either a JSON array of strings or plain text (one title per line).
///
/// Blank entries are dropped.
pub fn parse_titles(content: &str) -> Vec<String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        let titles: Vec<String> = serde_json::from_str(trimmed)
            .unwrap_or_else(|e| bail(format!("File looks like JSON but failed to parse: {e}")));
        titles
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Assign positional IDs (0..N) to titles, then drop any excluded title.
///
/// IDs are assigned before filtering, so an item keeps the same ID whether or
/// not other items were excluded.
pub fn build_items(titles: Vec<String>, exclude: &[String]) -> Vec<Item> {
    titles
        .into_iter()
        .enumerate()
        .map(|(i, title)| Item::new(i as i64, title))
        .filter(|item| !exclude.iter().any(|ex| ex.trim() == item.title))
        .collect()
}

/// One instruction from the person doing the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Vote(Vote),
    Undo,
    Redo,
    Restart,
    Quit,
}

/// Parse one line of interactive input. Returns `None` for unrecognized input.
pub fn parse_command(line: &str) -> Option<Command> {
    let cmd = match line.trim().to_lowercase().as_str() {
        "1" | "l" | "left" => Command::Vote(Vote::Left),
        "2" | "r" | "right" => Command::Vote(Vote::Right),
        // Both "like both" and "don't know" keep the pair together.
        "t" | "tie" | "=" | "both" | "?" | "skip" => Command::Vote(Vote::Tie),
        "u" | "undo" | "b" | "back" => Command::Undo,
        "y" | "redo" => Command::Redo,
        "restart" => Command::Restart,
        "q" | "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Parse a `--votes` script: one command character per step, whitespace ignored.
///
/// Only `l`, `r`, `t`, `?`, `u` and `y` are allowed; restarting or quitting
/// mid-script makes no sense for a replay.
pub fn parse_script(script: &str) -> Result<Vec<Command>, char> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match parse_command(&c.to_string()) {
            Some(cmd @ (Command::Vote(_) | Command::Undo | Command::Redo)) => Ok(cmd),
            _ => Err(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text_titles() {
        let titles = parse_titles("\n  Wave \n\nSay My Name\nUtopia\n");
        assert_eq!(titles, vec!["Wave", "Say My Name", "Utopia"]);
    }

    #[test]
    fn test_parse_json_titles() {
        let titles = parse_titles(r#"["Wave", "  ", "HALAZIA"]"#);
        assert_eq!(titles, vec!["Wave", "HALAZIA"]);
    }

    #[test]
    fn test_build_items_keeps_ids_stable_across_exclusion() {
        let titles = vec!["Wave".to_string(), "Better".to_string(), "Utopia".to_string()];
        let items = build_items(titles, &["Better".to_string()]);
        assert_eq!(items, vec![Item::new(0, "Wave"), Item::new(2, "Utopia")]);
    }

    #[test]
    fn test_parse_command_aliases() {
        assert_eq!(parse_command("1"), Some(Command::Vote(Vote::Left)));
        assert_eq!(parse_command(" Right "), Some(Command::Vote(Vote::Right)));
        assert_eq!(parse_command("?"), Some(Command::Vote(Vote::Tie)));
        assert_eq!(parse_command("both"), Some(Command::Vote(Vote::Tie)));
        assert_eq!(parse_command("u"), Some(Command::Undo));
        assert_eq!(parse_command("y"), Some(Command::Redo));
        assert_eq!(parse_command("restart"), Some(Command::Restart));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("maybe"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_parse_script() {
        let cmds = parse_script("l r\nt?uy").unwrap();
        assert_eq!(
            cmds,
            vec![
                Command::Vote(Vote::Left),
                Command::Vote(Vote::Right),
                Command::Vote(Vote::Tie),
                Command::Vote(Vote::Tie),
                Command::Undo,
                Command::Redo,
            ]
        );
    }

    #[test]
    fn test_parse_script_rejects_quit_and_unknown() {
        assert_eq!(parse_script("llq"), Err('q'));
        assert_eq!(parse_script("lx"), Err('x'));
    }
}
