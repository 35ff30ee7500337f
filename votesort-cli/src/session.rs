/// Drives a `MergeSorter` from interactive input or a replay script.
///
/// Prompts go to the supplied writer (stderr in practice) so stdout carries
/// nothing but the final ranking.
use std::io::{self, BufRead, Write};

use tracing::{debug, warn};
use votesort_core::{MergeSorter, Pair};

use crate::parse::{Command, parse_command};

/// How a voting session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The ranking is complete.
    Completed,
    /// The user quit before finishing.
    Quit,
    /// Input ran out before the ranking was complete.
    InputClosed,
}

const HELP: &str = "  1/l = left   2/r = right   t = like both   ? = don't know   u = undo   y = redo   restart   q = quit";

fn render_pair(pair: &Pair<'_>, progress: u8) -> String {
    format!(
        "[{progress:>3}%]  (1) {}   vs   (2) {}",
        pair.left.title, pair.right.title
    )
}

/// Apply one command. Returns `Some(end)` if the session should stop.
fn apply<W: Write>(sorter: &mut MergeSorter, cmd: Command, out: &mut W) -> io::Result<Option<SessionEnd>> {
    match cmd {
        Command::Vote(vote) => {
            if let Err(e) = sorter.handle_vote(vote) {
                warn!("vote ignored: {e}");
            }
        }
        Command::Undo => {
            if !sorter.handle_undo() {
                writeln!(out, "  Nothing to undo.")?;
            }
        }
        Command::Redo => {
            if !sorter.handle_redo() {
                writeln!(out, "  Nothing to redo.")?;
            }
        }
        Command::Restart => {
            sorter.restart();
            writeln!(out, "  Started over with a new shuffle.")?;
        }
        Command::Quit => return Ok(Some(SessionEnd::Quit)),
    }
    Ok(None)
}

/// Prompt for votes line by line until the ranking completes, the user quits,
/// or input runs out.
pub fn run_interactive<R: BufRead, W: Write>(
    sorter: &mut MergeSorter,
    input: R,
    out: &mut W,
) -> io::Result<SessionEnd> {
    writeln!(out, "Ranking {} items. Pick the one you like more.", sorter.len())?;
    writeln!(out, "{HELP}")?;

    let mut lines = input.lines();
    while let Some(pair) = sorter.current_pair() {
        let undo_hint = if sorter.can_undo() { "  (u to undo)" } else { "" };
        write!(out, "{}{undo_hint}\n> ", render_pair(&pair, sorter.current_progress()))?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            return Ok(SessionEnd::InputClosed);
        };

        match parse_command(&line) {
            Some(cmd) => {
                debug!(?cmd, "command");
                if let Some(end) = apply(sorter, cmd, out)? {
                    return Ok(end);
                }
            }
            None => writeln!(out, "  Unrecognized input {:?}.\n{HELP}", line.trim())?,
        }
    }

    writeln!(out, "Done after {} votes.", sorter.votes_cast())?;
    Ok(SessionEnd::Completed)
}

/// Replay a parsed script of commands. Commands left over after completion
/// are ignored.
pub fn run_script(sorter: &mut MergeSorter, commands: &[Command]) -> SessionEnd {
    let mut sink = io::sink();
    for (step, &cmd) in commands.iter().enumerate() {
        if sorter.is_complete() && matches!(cmd, Command::Vote(_)) {
            debug!(step, remaining = commands.len() - step, "ranking complete, ignoring rest of script");
            break;
        }
        // Writes to a sink cannot fail.
        if let Ok(Some(end)) = apply(sorter, cmd, &mut sink) {
            return end;
        }
    }

    if sorter.is_complete() {
        SessionEnd::Completed
    } else {
        SessionEnd::InputClosed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use votesort_core::{Item, Vote};

    fn sorter(titles: &[&str]) -> MergeSorter {
        let items = titles
            .iter()
            .enumerate()
            .map(|(i, t)| Item::new(i as i64, *t))
            .collect();
        MergeSorter::start_in_order(items).unwrap()
    }

    fn titles(sorter: &MergeSorter) -> Vec<String> {
        sorter
            .final_result()
            .unwrap()
            .into_iter()
            .map(|item| item.title.clone())
            .collect()
    }

    #[test]
    fn test_interactive_session_completes() {
        let mut s = sorter(&["A", "B", "C"]);
        let input = Cursor::new("2\nl\n1\n");
        let mut out = Vec::new();

        let end = run_interactive(&mut s, input, &mut out).unwrap();
        assert_eq!(end, SessionEnd::Completed);
        // [B, A] after the first vote, then C wins and B, A are appended.
        assert_eq!(titles(&s), vec!["C", "B", "A"]);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(1) A   vs   (2) B"));
        assert!(text.contains("Done after 2 votes."));
    }

    #[test]
    fn test_interactive_undo_and_bad_input() {
        let mut s = sorter(&["A", "B"]);
        let input = Cursor::new("u\nwhat\n1\n");
        let mut out = Vec::new();

        let end = run_interactive(&mut s, input, &mut out).unwrap();
        assert_eq!(end, SessionEnd::Completed);
        assert_eq!(titles(&s), vec!["A", "B"]);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Nothing to undo."));
        assert!(text.contains("Unrecognized input \"what\"."));
    }

    #[test]
    fn test_interactive_quit_and_eof() {
        let mut s = sorter(&["A", "B", "C"]);
        let end = run_interactive(&mut s, Cursor::new("l\nq\n"), &mut Vec::new()).unwrap();
        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(s.votes_cast(), 1);

        let mut s = sorter(&["A", "B", "C"]);
        let end = run_interactive(&mut s, Cursor::new("l\n"), &mut Vec::new()).unwrap();
        assert_eq!(end, SessionEnd::InputClosed);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_script_with_undo_and_redo() {
        let mut s = sorter(&["A", "B", "C", "D"]);
        let script = [
            Command::Vote(Vote::Right), // B over A
            Command::Undo,
            Command::Vote(Vote::Left), // A over B
            Command::Vote(Vote::Tie),  // C, D
            Command::Vote(Vote::Left), // A
            Command::Vote(Vote::Left), // B, then C D appended
        ];
        assert_eq!(run_script(&mut s, &script), SessionEnd::Completed);
        assert_eq!(titles(&s), vec!["A", "B", "C", "D"]);
        assert_eq!(s.votes_cast(), 4);
    }

    #[test]
    fn test_script_that_ends_early() {
        let mut s = sorter(&["A", "B", "C"]);
        assert_eq!(run_script(&mut s, &[Command::Vote(Vote::Left)]), SessionEnd::InputClosed);
    }

    #[test]
    fn test_script_ignores_trailing_votes() {
        let mut s = sorter(&["A", "B"]);
        let script = [Command::Vote(Vote::Left), Command::Vote(Vote::Right)];
        assert_eq!(run_script(&mut s, &script), SessionEnd::Completed);
        assert_eq!(titles(&s), vec!["A", "B"]);
    }
}
